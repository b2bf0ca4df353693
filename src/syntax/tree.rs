//! Arena-backed syntax tree with index-based parent and child links.
//!
//! Nodes are immutable once the tree is built. Parent links are plain
//! [`NodeId`]s, so walking upwards never involves ownership.

use super::kind::{JoinKind, NodeKind};
use super::span::Span;
use crate::lexer::token::TokenKind;
use smol_str::SmolStr;
use std::fmt;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) span: Span,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Token text for terminals, empty otherwise.
    pub(crate) text: SmolStr,
}

/// An immutable syntax tree.
///
/// Every node except the root has exactly one parent, and children are kept
/// in source order. Passing a [`NodeId`] from another tree is a logic error
/// and may panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn from_parts(nodes: Vec<NodeData>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Returns the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the kind of a node.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.data(id).kind
    }

    /// Returns the source range covered by a node.
    pub fn span(&self, id: NodeId) -> Span {
        self.data(id).span.clone()
    }

    /// Returns the parent of a node, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    /// Returns the children of a node in source order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    /// Returns the first child of a node.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Returns the first direct child of the given kind.
    pub fn first_child_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == kind)
    }

    /// Iterates the direct children of the given kind.
    pub fn children_of_kind(
        &self,
        id: NodeId,
        kind: NodeKind,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.kind(child) == kind)
    }

    /// Iterates strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Iterates strict descendants in pre-order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Iterates every node of the given kind in document order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(move |&id| self.kind(id) == kind)
    }

    /// Returns the token kind of a terminal node.
    pub fn token_kind(&self, id: NodeId) -> Option<TokenKind> {
        self.kind(id).token()
    }

    /// Returns the source text of a terminal node.
    pub fn token_text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Terminal(_) => Some(self.data(id).text.as_str()),
            _ => None,
        }
    }

    /// Returns the text of all terminals under `id`, concatenated without separators.
    pub fn text(&self, id: NodeId) -> String {
        std::iter::once(id)
            .chain(self.descendants(id))
            .filter_map(|node| self.token_text(node))
            .collect()
    }

    /// Returns true if the first child of `id` is the `ISNULL` keyword.
    pub fn is_guard_call(&self, id: NodeId) -> bool {
        self.first_child(id)
            .and_then(|head| self.token_kind(head))
            .is_some_and(|kind| kind == TokenKind::IsNull)
    }

    /// Returns the kind of a join node, or `None` for any other node.
    ///
    /// `LEFT` wins over `RIGHT`, which wins over `FULL`; a join carrying none
    /// of them is inner.
    pub fn join_kind(&self, join: NodeId) -> Option<JoinKind> {
        if self.kind(join) != NodeKind::Join {
            return None;
        }
        let has = |wanted: TokenKind| {
            self.children(join)
                .iter()
                .any(|&child| self.token_kind(child) == Some(wanted))
        };
        let kind = if has(TokenKind::Left) {
            JoinKind::Left
        } else if has(TokenKind::Right) {
            JoinKind::Right
        } else if has(TokenKind::Full) {
            JoinKind::Full
        } else {
            JoinKind::Inner
        };
        Some(kind)
    }

    /// Returns the alias bound by a data source, if it has one.
    pub fn data_source_alias(&self, data_source: NodeId) -> Option<&str> {
        let alias = self.first_child_of_kind(data_source, NodeKind::Alias)?;
        self.children(alias)
            .iter()
            .rev()
            .find(|&&child| self.token_kind(child) == Some(TokenKind::Identifier))
            .and_then(|&child| self.token_text(child))
    }

    /// Returns the table alias qualifying a column, if it is qualified.
    pub fn column_table_alias(&self, column: NodeId) -> Option<&str> {
        let children = self.children(column);
        if children.len() < 3 {
            return None;
        }
        self.token_text(children[0])
    }

    /// Returns the field name of a column reference.
    pub fn column_name(&self, column: NodeId) -> Option<&str> {
        let children = self.children(column);
        let name = if children.len() >= 3 {
            children[2]
        } else {
            *children.first()?
        };
        self.token_text(name)
    }
}

/// Iterator over the strict ancestors of a node.
pub struct Ancestors<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over the strict descendants of a node.
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TreeBuilder;

    /// `T2.Field` wrapped as a select item, built by hand.
    fn column_tree() -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new();
        let alias = b.terminal(TokenKind::Identifier, 7..9, "T2");
        let dot = b.terminal(TokenKind::Dot, 9..10, ".");
        let field = b.terminal(TokenKind::Identifier, 10..15, "Field");
        let column = b.node(NodeKind::Column, vec![alias, dot, field]);
        let statement = b.node(NodeKind::Statement, vec![column]);
        let select = b.node(NodeKind::SelectStatement, vec![statement]);
        let item = b.node(NodeKind::SelectedField, vec![select]);
        let list = b.node(NodeKind::SelectList, vec![item]);
        let tree = b.finish(list).expect("valid tree");
        (tree, column)
    }

    #[test]
    fn navigation() {
        let (tree, column) = column_tree();
        assert_eq!(tree.kind(column), NodeKind::Column);
        assert_eq!(tree.span(column), 7..15);
        assert_eq!(tree.children(column).len(), 3);

        let kinds: Vec<_> = tree.ancestors(column).map(|id| tree.kind(id)).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Statement,
                NodeKind::SelectStatement,
                NodeKind::SelectedField,
                NodeKind::SelectList,
            ]
        );
        assert_eq!(tree.ancestors(tree.root()).count(), 0);
    }

    #[test]
    fn descendants_are_pre_order() {
        let (tree, _) = column_tree();
        let kinds: Vec<_> = tree
            .descendants(tree.root())
            .map(|id| tree.kind(id))
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::SelectedField,
                NodeKind::SelectStatement,
                NodeKind::Statement,
                NodeKind::Column,
                NodeKind::Terminal(TokenKind::Identifier),
                NodeKind::Terminal(TokenKind::Dot),
                NodeKind::Terminal(TokenKind::Identifier),
            ]
        );
    }

    #[test]
    fn column_accessors() {
        let (tree, column) = column_tree();
        assert_eq!(tree.column_table_alias(column), Some("T2"));
        assert_eq!(tree.column_name(column), Some("Field"));
        assert_eq!(tree.text(column), "T2.Field");
        assert_eq!(tree.text(tree.root()), "T2.Field");
    }

    #[test]
    fn unqualified_column_has_no_alias() {
        let mut b = TreeBuilder::new();
        let field = b.terminal(TokenKind::Identifier, 0..5, "Field");
        let column = b.node(NodeKind::Column, vec![field]);
        let tree = b.finish(column).expect("valid tree");
        assert_eq!(tree.column_table_alias(column), None);
        assert_eq!(tree.column_name(column), Some("Field"));
    }

    #[test]
    fn guard_call_is_structural() {
        let mut b = TreeBuilder::new();
        let isnull = b.terminal(TokenKind::IsNull, 0..6, "ISNULL");
        let guarded = b.node(NodeKind::SelectStatement, vec![isnull]);
        let plain = b.node(NodeKind::SelectStatement, vec![]);
        let item = b.node(NodeKind::SelectedField, vec![guarded, plain]);
        let tree = b.finish(item).expect("valid tree");
        assert!(tree.is_guard_call(guarded));
        assert!(!tree.is_guard_call(plain));
        assert!(!tree.is_guard_call(isnull));
    }

    #[test]
    fn join_kind_from_keywords() {
        let mut b = TreeBuilder::new();
        let right = b.terminal(TokenKind::Right, 0..5, "RIGHT");
        let join_kw = b.terminal(TokenKind::Join, 6..10, "JOIN");
        let right_join = b.node(NodeKind::Join, vec![right, join_kw]);
        let bare_kw = b.terminal(TokenKind::Join, 11..15, "JOIN");
        let bare_join = b.node(NodeKind::Join, vec![bare_kw]);
        let source = b.node(NodeKind::DataSource, vec![right_join, bare_join]);
        let tree = b.finish(source).expect("valid tree");

        assert_eq!(tree.join_kind(right_join), Some(JoinKind::Right));
        assert_eq!(tree.join_kind(bare_join), Some(JoinKind::Inner));
        assert_eq!(tree.join_kind(source), None);
    }

    #[test]
    fn alias_lookup() {
        let mut b = TreeBuilder::new();
        let table = b.terminal(TokenKind::Identifier, 0..3, "Tab");
        let table = b.node(NodeKind::Table, vec![table]);
        let as_kw = b.terminal(TokenKind::As, 4..6, "AS");
        let name = b.terminal(TokenKind::Identifier, 7..9, "T1");
        let alias = b.node(NodeKind::Alias, vec![as_kw, name]);
        let source = b.node(NodeKind::DataSource, vec![table, alias]);
        let tree = b.finish(source).expect("valid tree");
        assert_eq!(tree.data_source_alias(source), Some("T1"));
        assert_eq!(tree.data_source_alias(table), None);
    }

    #[test]
    fn nodes_of_kind_walks_whole_tree() {
        let (tree, column) = column_tree();
        assert_eq!(tree.nodes_of_kind(NodeKind::Column).collect::<Vec<_>>(), vec![column]);
        assert_eq!(tree.nodes_of_kind(NodeKind::SelectList).count(), 1);
        assert_eq!(tree.nodes_of_kind(NodeKind::Join).count(), 0);
    }
}
