//! Where the columns of a join's aliases are visible.

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// Nearest strict ancestor that is a query owning a select list.
pub fn enclosing_query(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|&id| tree.kind(id).is_query())
}

/// Other joins hanging off the same data source as `join`.
pub fn sibling_joins(tree: &SyntaxTree, join: NodeId) -> Vec<NodeId> {
    let Some(source) = tree
        .ancestors(join)
        .find(|&id| tree.kind(id) == NodeKind::DataSource)
    else {
        return Vec::new();
    };
    tree.children_of_kind(source, NodeKind::Join)
        .filter(|&sibling| sibling != join)
        .collect()
}

/// The select list of a query.
pub fn select_list(tree: &SyntaxTree, query: NodeId) -> Option<NodeId> {
    tree.first_child_of_kind(query, NodeKind::SelectList)
}

/// The condition of the query's `WHERE` clause, if it has a non-empty one.
pub fn where_expression(tree: &SyntaxTree, query: NodeId) -> Option<NodeId> {
    let clause = tree
        .children_of_kind(query, NodeKind::Where)
        .find(|&clause| !tree.children(clause).is_empty())?;
    tree.first_child_of_kind(clause, NodeKind::WhereExpression)
}
