//! Static classification attached to every lint rule.

use crate::diag::DiagSeverity;
use std::fmt;

/// What kind of problem a rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticType {
    Error,
    CodeSmell,
    Vulnerability,
    SecurityHotspot,
}

/// Impact of a rule's findings, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleSeverity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl RuleSeverity {
    /// Maps the rule severity onto the rendering severity.
    pub fn diag_severity(self) -> DiagSeverity {
        match self {
            RuleSeverity::Critical | RuleSeverity::Blocker => DiagSeverity::Error,
            RuleSeverity::Major | RuleSeverity::Minor => DiagSeverity::Warning,
            RuleSeverity::Info => DiagSeverity::Note,
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSeverity::Info => write!(f, "info"),
            RuleSeverity::Minor => write!(f, "minor"),
            RuleSeverity::Major => write!(f, "major"),
            RuleSeverity::Critical => write!(f, "critical"),
            RuleSeverity::Blocker => write!(f, "blocker"),
        }
    }
}

/// Free-form classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTag {
    Sql,
    Suspicious,
    Unpredictable,
    Performance,
    BadPractice,
    Standard,
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTag::Sql => write!(f, "sql"),
            RuleTag::Suspicious => write!(f, "suspicious"),
            RuleTag::Unpredictable => write!(f, "unpredictable"),
            RuleTag::Performance => write!(f, "performance"),
            RuleTag::BadPractice => write!(f, "badpractice"),
            RuleTag::Standard => write!(f, "standard"),
        }
    }
}

/// Classification of a lint rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMetadata {
    /// Stable code, used as the diagnostic code.
    pub code: &'static str,
    pub kind: DiagnosticType,
    pub severity: RuleSeverity,
    /// Estimated effort to fix one finding.
    pub minutes_to_fix: u32,
    pub tags: &'static [RuleTag],
}

impl RuleMetadata {
    /// Returns true if the rule carries `tag`.
    pub fn has_tag(&self, tag: RuleTag) -> bool {
        self.tags.contains(&tag)
    }

    /// One-line human readable classification.
    pub fn summary(&self) -> String {
        let tags = self
            .tags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}: {:?}, {} severity, ~{} min to fix [{}]",
            self.code, self.kind, self.severity, self.minutes_to_fix, tags
        )
    }
}

/// Outer-joined fields used without an `ISNULL` guard.
pub static FIELDS_FROM_JOINS_WITHOUT_ISNULL: RuleMetadata = RuleMetadata {
    code: "FieldsFromJoinsWithoutIsNull",
    kind: DiagnosticType::Error,
    severity: RuleSeverity::Critical,
    minutes_to_fix: 2,
    tags: &[RuleTag::Sql, RuleTag::Suspicious, RuleTag::Unpredictable],
};
