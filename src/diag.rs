//! Diagnostic model shared by the lexer, the parser and the lint rules.

use crate::lint::metadata::RuleMetadata;
use crate::syntax::Span;
use miette::{Diagnostic, LabeledSpan, Report, Severity};
use std::fmt;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagSeverity {
    /// A problem that makes the query wrong or unreliable.
    Error,
    /// A suspicious pattern.
    Warning,
    /// Informational note or advice.
    Note,
}

impl fmt::Display for DiagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagSeverity::Error => write!(f, "error"),
            DiagSeverity::Warning => write!(f, "warning"),
            DiagSeverity::Note => write!(f, "note"),
        }
    }
}

/// Role of a diagnostic label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The anchor location of the diagnostic.
    Primary,
    /// A related location contributing to the diagnostic.
    Secondary,
}

/// A labeled span within a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    pub span: Span,
    pub message: String,
    pub role: LabelRole,
}

impl DiagLabel {
    /// Creates a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Primary,
        }
    }

    /// Creates a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Secondary,
        }
    }
}

/// A structured diagnostic message.
///
/// Lint findings carry the [`RuleMetadata`] of the rule that produced them;
/// lexer and parser diagnostics leave it empty. Secondary labels double as
/// the related locations of a finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub severity: DiagSeverity,
    pub message: String,
    pub labels: Vec<DiagLabel>,
    pub help: Option<String>,
    pub notes: Vec<String>,
    /// Diagnostic code, e.g. `"P001"` or a rule code.
    pub code: Option<String>,
    /// Classification of the rule that raised this diagnostic.
    pub rule: Option<&'static RuleMetadata>,
}

impl Diag {
    /// Creates a new diagnostic with the given severity and message.
    pub fn new(severity: DiagSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            notes: Vec::new(),
            code: None,
            rule: None,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Error, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Warning, message)
    }

    /// Creates a new note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Note, message)
    }

    /// Creates a diagnostic classified by `rule`: severity and code come from the metadata.
    pub fn for_rule(rule: &'static RuleMetadata, message: impl Into<String>) -> Self {
        let mut diag = Self::new(rule.severity.diag_severity(), message);
        diag.code = Some(rule.code.to_string());
        diag.rule = Some(rule);
        diag
    }

    /// Adds a primary label at `span`.
    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::primary(span, message));
        self
    }

    /// Adds a secondary label at `span`.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::secondary(span, message));
        self
    }

    /// Adds a label.
    pub fn with_label(mut self, label: DiagLabel) -> Self {
        self.labels.push(label);
        self
    }

    /// Sets the help text for this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Appends a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns the span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.role == LabelRole::Primary)
            .map(|label| label.span.clone())
    }

    /// Iterates the related locations (secondary labels) in insertion order.
    pub fn related_locations(&self) -> impl Iterator<Item = &DiagLabel> {
        self.labels
            .iter()
            .filter(|label| label.role == LabelRole::Secondary)
    }
}

/// Source text paired with an optional file name, used for rendering.
#[derive(Debug, Clone)]
pub struct SourceFile {
    content: String,
    name: Option<String>,
}

impl SourceFile {
    /// Creates an unnamed source.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    /// Creates a source with a file name.
    pub fn with_name(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the source content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the file name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clamps a span to the bounds of this source.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

/// Converts diagnostics to miette reports carrying the source text.
pub fn convert_diagnostics_to_reports(diagnostics: &[Diag], source: &SourceFile) -> Vec<Report> {
    diagnostics
        .iter()
        .map(|diag| convert_diag_to_report(diag, source))
        .collect()
}

/// Converts a single diagnostic to a miette report.
///
/// Out-of-bounds spans are clamped rather than rejected.
pub fn convert_diag_to_report(diag: &Diag, source: &SourceFile) -> Report {
    let report = Report::new(build_diagnostic(diag, source));
    match source.name() {
        Some(name) => {
            report.with_source_code(miette::NamedSource::new(name, source.content().to_string()))
        }
        None => report.with_source_code(source.content().to_string()),
    }
}

fn build_diagnostic(diag: &Diag, source: &SourceFile) -> RenderedDiagnostic {
    let labels = diag
        .labels
        .iter()
        .map(|label| {
            let span = source.clamp_span(&label.span);
            let offset_len = (span.start, span.end - span.start);
            match label.role {
                LabelRole::Primary => {
                    LabeledSpan::new_primary_with_span(Some(label.message.clone()), offset_len)
                }
                LabelRole::Secondary => {
                    LabeledSpan::new_with_span(Some(label.message.clone()), offset_len)
                }
            }
        })
        .collect();

    let mut notes: Vec<RenderedNote> = diag.notes.iter().cloned().map(RenderedNote).collect();
    if let Some(rule) = diag.rule {
        notes.push(RenderedNote(rule.summary()));
    }

    RenderedDiagnostic {
        message: diag.message.clone(),
        severity: match diag.severity {
            DiagSeverity::Error => Severity::Error,
            DiagSeverity::Warning => Severity::Warning,
            DiagSeverity::Note => Severity::Advice,
        },
        code: diag.code.clone(),
        help: diag.help.clone(),
        labels,
        notes,
    }
}

#[derive(Debug)]
struct RenderedDiagnostic {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    notes: Vec<RenderedNote>,
}

#[derive(Debug)]
struct RenderedNote(String);

impl fmt::Display for RenderedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Display for RenderedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RenderedDiagnostic {}
impl std::error::Error for RenderedNote {}

impl Diagnostic for RenderedDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.clone().into_iter()))
        }
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        if self.notes.is_empty() {
            None
        } else {
            Some(Box::new(self.notes.iter().map(|note| note as &dyn Diagnostic)))
        }
    }
}

impl Diagnostic for RenderedNote {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Advice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::metadata::FIELDS_FROM_JOINS_WITHOUT_ISNULL;

    #[test]
    fn severity_display() {
        assert_eq!(DiagSeverity::Error.to_string(), "error");
        assert_eq!(DiagSeverity::Warning.to_string(), "warning");
        assert_eq!(DiagSeverity::Note.to_string(), "note");
    }

    #[test]
    fn builder_collects_labels() {
        let diag = Diag::error("outer join hazard")
            .with_primary_label(20..40, "join")
            .with_secondary_label(7..15, "+1")
            .with_secondary_label(50..58, "+1")
            .with_help("wrap it in ISNULL");

        assert_eq!(diag.labels.len(), 3);
        assert_eq!(diag.primary_span(), Some(20..40));
        let related: Vec<_> = diag.related_locations().map(|l| l.span.clone()).collect();
        assert_eq!(related, vec![7..15, 50..58]);
        assert_eq!(diag.help.as_deref(), Some("wrap it in ISNULL"));
    }

    #[test]
    fn rule_diagnostic_takes_code_and_severity_from_metadata() {
        let diag = Diag::for_rule(&FIELDS_FROM_JOINS_WITHOUT_ISNULL, "message");
        assert_eq!(diag.severity, DiagSeverity::Error);
        assert_eq!(diag.code.as_deref(), Some("FieldsFromJoinsWithoutIsNull"));
        assert_eq!(diag.rule, Some(&FIELDS_FROM_JOINS_WITHOUT_ISNULL));
    }

    #[test]
    fn clamp_span() {
        let src = SourceFile::new("hello");
        assert_eq!(src.clamp_span(&(0..10)), 0..5);
        let inverted = std::ops::Range { start: 3, end: 2 };
        assert_eq!(src.clamp_span(&inverted), 3..3);
        assert_eq!(src.clamp_span(&(10..20)), 5..5);
    }

    #[test]
    fn report_keeps_label_roles_and_rule_note() {
        let source = SourceFile::with_name("SELECT T2.F FROM A AS T1 LEFT JOIN B AS T2 ON 1=1", "q.sdbl");
        let diag = Diag::for_rule(&FIELDS_FROM_JOINS_WITHOUT_ISNULL, "hazard")
            .with_primary_label(25..50, "join")
            .with_secondary_label(7..11, "+1");

        let report = convert_diag_to_report(&diag, &source);
        assert_eq!(report.to_string(), "hazard");

        let built = build_diagnostic(&diag, &source);
        assert_eq!(built.labels.len(), 2);
        assert!(built.labels[0].primary());
        assert!(!built.labels[1].primary());
        assert_eq!(built.labels[1].label(), Some("+1"));
        assert_eq!(built.severity, Severity::Error);
        let notes: Vec<_> = built
            .related()
            .expect("rule note")
            .map(|note| note.to_string())
            .collect();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("critical"));
    }

    #[test]
    fn report_with_out_of_bounds_span_does_not_panic() {
        let source = SourceFile::new("short");
        let diag = Diag::warning("warn").with_primary_label(0..100, "everything");
        let reports = convert_diagnostics_to_reports(&[diag], &source);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "warn");
    }
}
