//! Node kinds of the query syntax tree.

use crate::lexer::token::TokenKind;
use std::fmt;

/// The closed set of node kinds produced by the parser.
///
/// Expressions are wrapped in a statement kind that depends on where they
/// appear: select list items produce [`NodeKind::SelectStatement`], the WHERE
/// clause [`NodeKind::WhereStatement`], join conditions
/// [`NodeKind::JoinStatement`], and the remaining clauses
/// [`NodeKind::ClauseStatement`]. Statement nodes nest to express operator
/// composition; a primary operand sits in a [`NodeKind::Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `;`-separated list of queries. Always the root of a parsed tree.
    Package,
    /// A plain `SELECT` query.
    Query,
    /// A `SELECT ... INTO name` query creating a temporary table.
    TemporaryTableMainQuery,
    /// Queries combined with `UNION [ALL]`.
    Union,
    /// `INTO name` clause.
    TemporaryTable,
    /// `TOP n` / `DISTINCT` / `ALLOWED` modifiers.
    Limitations,
    /// Comma-separated select list.
    SelectList,
    /// One select list item with its optional alias.
    SelectedField,
    /// `FROM` clause.
    DataSources,
    /// A table, parameter, subquery or parenthesised source with its alias and joins.
    DataSource,
    /// Dotted table path such as `Catalog.Goods`.
    Table,
    /// Subquery used as a data source or `IN` operand.
    Subquery,
    /// `AS name` binding, or a bare trailing name.
    Alias,
    /// `[INNER|LEFT|RIGHT|FULL] [OUTER] JOIN source ON condition`.
    Join,
    /// Condition of a join.
    JoinExpression,
    /// `WHERE` clause.
    Where,
    /// Condition of the `WHERE` clause.
    WhereExpression,
    /// `GROUP BY` clause.
    GroupBy,
    /// `HAVING` clause.
    Having,
    /// `ORDER BY` clause.
    OrderBy,
    SelectStatement,
    WhereStatement,
    JoinStatement,
    ClauseStatement,
    /// A primary operand: column, literal, parameter, call or CASE.
    Statement,
    /// `alias.Field[.SubField...]`, or a bare `Field`.
    Column,
    /// Any call other than the `ISNULL` guard, which is a statement form.
    FunctionCall,
    /// `CASE WHEN ... THEN ... [ELSE ...] END`.
    Case,
    /// Comma-separated list in `IN (...)`.
    ExpressionList,
    /// A single token.
    Terminal(TokenKind),
}

impl NodeKind {
    /// Returns true for the expression wrapper kinds (not the primary operand).
    pub fn is_boundary_statement(self) -> bool {
        matches!(
            self,
            NodeKind::SelectStatement
                | NodeKind::WhereStatement
                | NodeKind::JoinStatement
                | NodeKind::ClauseStatement
        )
    }

    /// Returns true for the kinds that own a select list and a scope of aliases.
    pub fn is_query(self) -> bool {
        matches!(self, NodeKind::Query | NodeKind::TemporaryTableMainQuery)
    }

    /// Returns the token kind if this is a terminal.
    pub fn token(self) -> Option<TokenKind> {
        match self {
            NodeKind::Terminal(token) => Some(token),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Terminal(token) => write!(f, "terminal `{token}`"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Join flavour, determined by the keyword present on the join node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "inner"),
            JoinKind::Left => write!(f, "left"),
            JoinKind::Right => write!(f, "right"),
            JoinKind::Full => write!(f, "full"),
        }
    }
}
