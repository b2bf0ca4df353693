//! Immutable syntax tree visitor infrastructure.

use std::ops::ControlFlow;

use super::kind::NodeKind;
use super::tree::{NodeId, SyntaxTree};

/// Shared type alias for visitor traversal methods.
pub type VisitResult<B> = ControlFlow<B>;

macro_rules! try_visit {
    ($expr:expr) => {
        match $expr {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(b) => return ControlFlow::Break(b),
        }
    };
}

/// Pre-order visitor over a [`SyntaxTree`].
///
/// Override the `visit_*` hook for the node kinds of interest and call the
/// matching `walk_*` function to keep descending.
pub trait Visit {
    /// Early-exit payload produced when traversal stops.
    type Break;

    fn visit_node(&mut self, tree: &SyntaxTree, node: NodeId) -> VisitResult<Self::Break> {
        walk_node(self, tree, node)
    }

    fn visit_query(&mut self, tree: &SyntaxTree, query: NodeId) -> VisitResult<Self::Break> {
        walk_children(self, tree, query)
    }

    fn visit_join(&mut self, tree: &SyntaxTree, join: NodeId) -> VisitResult<Self::Break> {
        walk_children(self, tree, join)
    }

    fn visit_column(&mut self, tree: &SyntaxTree, column: NodeId) -> VisitResult<Self::Break> {
        walk_children(self, tree, column)
    }
}

/// Dispatches `node` to the hook for its kind.
pub fn walk_node<V: Visit + ?Sized>(
    visitor: &mut V,
    tree: &SyntaxTree,
    node: NodeId,
) -> VisitResult<V::Break> {
    match tree.kind(node) {
        NodeKind::Query | NodeKind::TemporaryTableMainQuery => visitor.visit_query(tree, node),
        NodeKind::Join => visitor.visit_join(tree, node),
        NodeKind::Column => visitor.visit_column(tree, node),
        _ => walk_children(visitor, tree, node),
    }
}

/// Visits every child of `node` in source order.
pub fn walk_children<V: Visit + ?Sized>(
    visitor: &mut V,
    tree: &SyntaxTree,
    node: NodeId,
) -> VisitResult<V::Break> {
    for &child in tree.children(node) {
        try_visit!(visitor.visit_node(tree, child));
    }
    ControlFlow::Continue(())
}

/// Visits the whole tree starting at its root.
pub fn walk_tree<V: Visit + ?Sized>(visitor: &mut V, tree: &SyntaxTree) -> VisitResult<V::Break> {
    visitor.visit_node(tree, tree.root())
}
