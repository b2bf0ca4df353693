//! Lint driver: walks a syntax tree and runs the outer-join check on every join.

pub mod error;
pub mod metadata;
pub mod outer_join;

use std::ops::ControlFlow;

use crate::diag::{Diag, SourceFile, convert_diagnostics_to_reports};
use crate::parser::parse;
use crate::syntax::{NodeId, SyntaxTree, Visit, walk_children, walk_tree};
use error::AnalysisError;
use miette::Report;
use outer_join::OuterJoinCheck;
use tracing::warn;

/// Configuration for the outer-join check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintConfig {
    /// Scan the select list of the enclosing query.
    pub check_select_list: bool,

    /// Scan the `WHERE` clause of the enclosing query.
    pub check_where_clause: bool,

    /// Scan the conditions of the other joins on the same source.
    pub check_sibling_joins: bool,

    /// Attach a help line suggesting `ISNULL`.
    pub with_help: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            check_select_list: true,
            check_where_clause: true,
            check_sibling_joins: true,
            with_help: true,
        }
    }
}

impl LintConfig {
    /// Enables or disables the select list scan.
    pub fn check_select_list(mut self, enabled: bool) -> Self {
        self.check_select_list = enabled;
        self
    }

    /// Enables or disables the `WHERE` scan.
    pub fn check_where_clause(mut self, enabled: bool) -> Self {
        self.check_where_clause = enabled;
        self
    }

    /// Enables or disables the sibling join scan.
    pub fn check_sibling_joins(mut self, enabled: bool) -> Self {
        self.check_sibling_joins = enabled;
        self
    }

    /// Enables or disables the help line.
    pub fn with_help(mut self, enabled: bool) -> Self {
        self.with_help = enabled;
        self
    }
}

/// Findings for one syntax tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    /// One diagnostic per offending join, in document order.
    pub diagnostics: Vec<Diag>,
    /// The error that stopped analysis, if any. Diagnostics for the joins
    /// checked before it are kept.
    pub error: Option<AnalysisError>,
}

impl LintReport {
    /// Returns true when there are no findings and no error.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.error.is_none()
    }

    /// Renders the findings, followed by the analysis error, as miette reports.
    pub fn into_reports(self, source: &SourceFile) -> Vec<Report> {
        let mut reports = convert_diagnostics_to_reports(&self.diagnostics, source);
        if let Some(error) = self.error {
            reports.push(Report::new(error).with_source_code(source.content().to_string()));
        }
        reports
    }
}

/// Runs the outer-join check over whole trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linter {
    check: OuterJoinCheck,
}

impl Linter {
    /// Creates a linter with the given configuration.
    pub fn new(config: LintConfig) -> Self {
        Self {
            check: OuterJoinCheck::new(config),
        }
    }

    /// Checks every join of `tree` in pre-order.
    ///
    /// The first structural error stops the walk.
    pub fn lint_tree(&self, tree: &SyntaxTree) -> LintReport {
        let mut walker = JoinWalker {
            check: &self.check,
            diagnostics: Vec::new(),
        };
        let error = match walk_tree(&mut walker, tree) {
            ControlFlow::Continue(()) => None,
            ControlFlow::Break(error) => {
                warn!(join = %error.join(), %error, "analysis aborted");
                Some(error)
            }
        };
        LintReport {
            diagnostics: walker.diagnostics,
            error,
        }
    }
}

struct JoinWalker<'c> {
    check: &'c OuterJoinCheck,
    diagnostics: Vec<Diag>,
}

impl Visit for JoinWalker<'_> {
    type Break = AnalysisError;

    fn visit_join(&mut self, tree: &SyntaxTree, join: NodeId) -> ControlFlow<AnalysisError> {
        match self.check.check_join(tree, join) {
            Ok(Some(diag)) => self.diagnostics.push(diag),
            Ok(None) => {}
            Err(error) => return ControlFlow::Break(error),
        }
        walk_children(self, tree, join)
    }
}

/// Everything produced by [`lint`]: parse problems, findings and the
/// analysis error if one occurred.
#[derive(Debug, Clone)]
pub struct LintOutcome {
    pub tree: Option<SyntaxTree>,
    pub parse_diagnostics: Vec<Diag>,
    pub report: LintReport,
}

impl LintOutcome {
    /// Lint findings only.
    pub fn diagnostics(&self) -> &[Diag] {
        &self.report.diagnostics
    }

    /// Renders parse diagnostics, then findings, then the analysis error.
    pub fn into_reports(self, source: &str) -> Vec<Report> {
        let source = SourceFile::new(source);
        let mut reports = convert_diagnostics_to_reports(&self.parse_diagnostics, &source);
        reports.extend(self.report.into_reports(&source));
        reports
    }
}

/// Parses `source` and lints it with the default configuration.
pub fn lint(source: &str) -> LintOutcome {
    lint_with_config(source, LintConfig::default())
}

/// Parses `source` and lints it with `config`.
pub fn lint_with_config(source: &str, config: LintConfig) -> LintOutcome {
    let parsed = parse(source);
    let report = match &parsed.tree {
        Some(tree) => Linter::new(config).lint_tree(tree),
        None => LintReport::default(),
    };
    LintOutcome {
        tree: parsed.tree,
        parse_diagnostics: parsed.diagnostics,
        report,
    }
}
