//! Outer-joined fields read without an `ISNULL` guard.
//!
//! An outer join fills every column of its optional side with NULL when no
//! row matches. Comparisons against such a column are neither true nor
//! false, and arithmetic or concatenation silently yields NULL. This check
//! finds, per join, the references to the nullable side that are not
//! wrapped in `ISNULL` within the select list, the `WHERE` clause and the
//! conditions of the other joins on the same source.

mod classify;
mod collect;
mod guard;
mod scope;

pub use classify::nullable_aliases;
pub use collect::collect_candidates;
pub use guard::is_guarded;
pub use scope::{enclosing_query, select_list, sibling_joins, where_expression};

use super::LintConfig;
use super::error::AnalysisError;
use super::metadata::FIELDS_FROM_JOINS_WITHOUT_ISNULL;
use crate::diag::Diag;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};
use tracing::{debug, trace};

/// The three places a nullable alias is looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanKind {
    Select,
    Where,
    Join,
}

impl ScanKind {
    /// Statement kind produced for expressions in this place.
    pub fn statement_kind(self) -> NodeKind {
        match self {
            ScanKind::Select => NodeKind::SelectStatement,
            ScanKind::Where => NodeKind::WhereStatement,
            ScanKind::Join => NodeKind::JoinStatement,
        }
    }

    /// Node that bounds the upward guard search.
    pub fn root_kind(self) -> NodeKind {
        match self {
            ScanKind::Select => NodeKind::SelectedField,
            ScanKind::Where => NodeKind::Where,
            ScanKind::Join => NodeKind::Join,
        }
    }

    /// Returns true for the nodes the guard search stops at.
    pub fn is_boundary(self, kind: NodeKind) -> bool {
        kind == self.statement_kind() || kind == self.root_kind()
    }
}

/// The outer-join NULL check.
///
/// Holds configuration only; every call works on a local accumulator, so a
/// single instance can be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OuterJoinCheck {
    config: LintConfig,
}

impl OuterJoinCheck {
    /// Creates a check with the given configuration.
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Checks one join and returns at most one diagnostic for it.
    ///
    /// The diagnostic is anchored at the join and carries one `+1` label per
    /// unguarded reference to an alias the join made nullable.
    pub fn check_join(
        &self,
        tree: &SyntaxTree,
        join: NodeId,
    ) -> Result<Option<Diag>, AnalysisError> {
        let aliases = nullable_aliases(tree, join)?;
        debug!(
            join = %join,
            kind = ?tree.join_kind(join),
            aliases = ?aliases,
            "checking join"
        );
        if aliases.is_empty() {
            return Ok(None);
        }

        let mut violations = Vec::new();
        for alias in &aliases {
            let Some(query) = enclosing_query(tree, join) else {
                trace!(alias = %alias, "join outside any query");
                continue;
            };

            if self.config.check_select_list
                && let Some(list) = select_list(tree, query)
            {
                scan(tree, list, ScanKind::Select, alias, &mut violations);
            }
            if self.config.check_where_clause
                && let Some(condition) = where_expression(tree, query)
            {
                scan(tree, condition, ScanKind::Where, alias, &mut violations);
            }
            if self.config.check_sibling_joins {
                for sibling in sibling_joins(tree, join) {
                    if let Some(condition) =
                        tree.first_child_of_kind(sibling, NodeKind::JoinExpression)
                    {
                        scan(tree, condition, ScanKind::Join, alias, &mut violations);
                    }
                }
            }
        }

        if violations.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.report(tree, join, &aliases, &violations)))
    }

    fn report(
        &self,
        tree: &SyntaxTree,
        join: NodeId,
        aliases: &[smol_str::SmolStr],
        violations: &[NodeId],
    ) -> Diag {
        let kind = tree
            .join_kind(join)
            .map(|kind| kind.to_string())
            .unwrap_or_default();
        let aliases = aliases
            .iter()
            .map(|alias| format!("`{alias}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut diag = Diag::for_rule(
            &FIELDS_FROM_JOINS_WITHOUT_ISNULL,
            format!("fields of {aliases} may be NULL after this {kind} join and are used without ISNULL"),
        )
        .with_primary_label(tree.span(join), "outer join");

        for &column in violations.iter().filter(|&&column| column != join) {
            diag = diag.with_secondary_label(tree.span(column), "+1");
        }
        if self.config.with_help {
            diag = diag.with_help("wrap each marked field in ISNULL(field, default)");
        }
        diag
    }
}

/// Appends the unguarded references to `alias` found under `scan_root`.
fn scan(
    tree: &SyntaxTree,
    scan_root: NodeId,
    scan: ScanKind,
    alias: &str,
    violations: &mut Vec<NodeId>,
) {
    for column in collect_candidates(tree, scan_root, scan) {
        let Some(table) = tree.column_table_alias(column) else {
            continue;
        };
        if !same_alias(table, alias) {
            continue;
        }
        if is_guarded(tree, column, scan) {
            trace!(column = %column, "reference is guarded");
            continue;
        }
        if !violations.contains(&column) {
            trace!(column = %column, scan = ?scan, "unguarded reference");
            violations.push(column);
        }
    }
}

/// Aliases compare case-insensitively, Cyrillic included.
fn same_alias(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
