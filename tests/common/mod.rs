//! Common test utilities
//!
//! Shared helpers for the integration tests.
//!
//! # Parsing Helpers
//! - [`parse_cleanly`] - Parse source and return the tree, panicking on diagnostics
//! - [`format_diagnostics`] - Format diagnostics for display in assertions
//!
//! # Lint Helpers
//! - [`lint_cleanly`] - Lint source that must parse and analyse without errors
//! - [`related_texts`] - Source text of every related location of a finding
//! - [`primary_text`] - Source text under the anchor of a finding

#![allow(dead_code)]

use sdbl_lint::{Diag, SyntaxTree, lint, parse};

/// Format diagnostics for display in assertion messages.
pub fn format_diagnostics(diags: &[Diag]) -> String {
    diags
        .iter()
        .map(|diag| format!("{diag:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse source and return the tree, panicking if any diagnostics occur.
///
/// # Example
/// ```no_run
/// let tree = parse_cleanly("SELECT 1");
/// assert_eq!(tree.children(tree.root()).len(), 1);
/// ```
pub fn parse_cleanly(source: &str) -> SyntaxTree {
    let result = parse(source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for `{source}`:\n{}",
        format_diagnostics(&result.diagnostics)
    );
    result
        .tree
        .unwrap_or_else(|| panic!("expected tree for source: {source}"))
}

/// Lint source and return the findings.
///
/// # Panics
/// Panics if the source does not parse cleanly or analysis stops with an error.
///
/// # Example
/// ```no_run
/// let findings = lint_cleanly("SELECT T2.A FROM A AS T1 LEFT JOIN B AS T2 ON T1.X = T2.X");
/// assert_eq!(findings.len(), 1);
/// ```
pub fn lint_cleanly(source: &str) -> Vec<Diag> {
    let outcome = lint(source);
    assert!(
        outcome.parse_diagnostics.is_empty(),
        "unexpected parse diagnostics for `{source}`:\n{}",
        format_diagnostics(&outcome.parse_diagnostics)
    );
    if let Some(error) = &outcome.report.error {
        panic!("analysis of `{source}` failed: {error}");
    }
    outcome.report.diagnostics
}

/// Source text of every related location of `diag`, in order.
pub fn related_texts<'s>(source: &'s str, diag: &Diag) -> Vec<&'s str> {
    diag.related_locations()
        .map(|label| &source[label.span.clone()])
        .collect()
}

/// Source text under the primary label of `diag`.
pub fn primary_text<'s>(source: &'s str, diag: &Diag) -> &'s str {
    let span = diag
        .primary_span()
        .unwrap_or_else(|| panic!("diagnostic without anchor: {diag:?}"));
    &source[span]
}
