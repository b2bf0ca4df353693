//! Bottom-up construction of [`SyntaxTree`]s.
//!
//! Children are created before their parent; [`TreeBuilder::node`] links them.
//! Shape problems are recorded and reported once by [`TreeBuilder::finish`],
//! so the parser can build without threading results through every call.

use super::kind::NodeKind;
use super::span::{Span, cover};
use super::tree::{NodeData, NodeId, SyntaxTree};
use crate::lexer::token::{Token, TokenKind};
use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// Violations of the one-root, one-parent tree invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TreeError {
    #[error("node {0} was attached to more than one parent")]
    #[diagnostic(code(syntax::shared_node))]
    SharedNode(NodeId),

    #[error("node {0} was referenced but never created by this builder")]
    #[diagnostic(code(syntax::unknown_node))]
    UnknownNode(NodeId),

    #[error("node {0} has no parent and is not the root")]
    #[diagnostic(code(syntax::detached_node))]
    Detached(NodeId),

    #[error("root node {0} is attached to a parent")]
    #[diagnostic(code(syntax::root_has_parent))]
    RootHasParent(NodeId),
}

/// Position in a [`TreeBuilder`] that can be rolled back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    nodes: usize,
    problems: usize,
}

/// Builder for syntax trees.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    problems: Vec<TreeError>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a terminal for a lexed token.
    pub fn token(&mut self, token: &Token) -> NodeId {
        self.terminal(token.kind, token.span.clone(), token.text.clone())
    }

    /// Adds a terminal node.
    pub fn terminal(&mut self, kind: TokenKind, span: Span, text: impl Into<SmolStr>) -> NodeId {
        self.push(NodeData {
            kind: NodeKind::Terminal(kind),
            span,
            parent: None,
            children: Vec::new(),
            text: text.into(),
        })
    }

    /// Adds an inner node owning `children`, spanning from the first child to the last.
    ///
    /// A node without children gets an empty span at offset zero.
    pub fn node(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let mut span: Option<Span> = None;
        for &child in &children {
            let Some(data) = self.nodes.get_mut(child.index()) else {
                self.problems.push(TreeError::UnknownNode(child));
                continue;
            };
            if data.parent.is_some() {
                self.problems.push(TreeError::SharedNode(child));
                continue;
            }
            data.parent = Some(id);
            span = Some(match span {
                Some(current) => cover(&current, &data.span),
                None => data.span.clone(),
            });
        }
        self.push(NodeData {
            kind,
            span: span.unwrap_or(0..0),
            parent: None,
            children,
            text: SmolStr::default(),
        })
    }

    /// Returns the current position, for use with [`TreeBuilder::rollback`].
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            nodes: self.nodes.len(),
            problems: self.problems.len(),
        }
    }

    /// Discards every node created after `checkpoint`.
    ///
    /// Older nodes adopted by a discarded node become parentless again.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.nodes.truncate(checkpoint.nodes);
        self.problems.truncate(checkpoint.problems);
        for data in &mut self.nodes {
            if data.parent.is_some_and(|parent| parent.index() >= checkpoint.nodes) {
                data.parent = None;
            }
        }
    }

    /// Validates the tree invariants and returns the finished tree rooted at `root`.
    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        if let Some(problem) = self.problems.into_iter().next() {
            return Err(problem);
        }
        let Some(root_data) = self.nodes.get(root.index()) else {
            return Err(TreeError::UnknownNode(root));
        };
        if root_data.parent.is_some() {
            return Err(TreeError::RootHasParent(root));
        }
        if let Some(index) = self
            .nodes
            .iter()
            .enumerate()
            .position(|(index, data)| index != root.index() && data.parent.is_none())
        {
            return Err(TreeError::Detached(NodeId::new(index)));
        }
        Ok(SyntaxTree::from_parts(self.nodes, root))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(data);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_parent_links_and_spans() {
        let mut b = TreeBuilder::new();
        let one = b.terminal(TokenKind::Number, 7..8, "1");
        let plus = b.terminal(TokenKind::Plus, 9..10, "+");
        let two = b.terminal(TokenKind::Number, 11..12, "2");
        let sum = b.node(NodeKind::SelectStatement, vec![one, plus, two]);
        let tree = b.finish(sum).expect("valid tree");

        assert_eq!(tree.root(), sum);
        assert_eq!(tree.span(sum), 7..12);
        assert_eq!(tree.parent(plus), Some(sum));
        assert_eq!(tree.parent(sum), None);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn shared_child_is_rejected() {
        let mut b = TreeBuilder::new();
        let leaf = b.terminal(TokenKind::Number, 0..1, "1");
        let first = b.node(NodeKind::Statement, vec![leaf]);
        let second = b.node(NodeKind::Statement, vec![leaf]);
        let root = b.node(NodeKind::SelectStatement, vec![first, second]);
        assert_eq!(b.finish(root), Err(TreeError::SharedNode(leaf)));
    }

    #[test]
    fn detached_node_is_rejected() {
        let mut b = TreeBuilder::new();
        let stray = b.terminal(TokenKind::Number, 0..1, "1");
        let root = b.node(NodeKind::Package, vec![]);
        assert_eq!(b.finish(root), Err(TreeError::Detached(stray)));
    }

    #[test]
    fn non_root_root_is_rejected() {
        let mut b = TreeBuilder::new();
        let leaf = b.terminal(TokenKind::Number, 0..1, "1");
        let _parent = b.node(NodeKind::Statement, vec![leaf]);
        assert_eq!(b.finish(leaf), Err(TreeError::RootHasParent(leaf)));
    }

    #[test]
    fn rollback_discards_partial_work() {
        let mut b = TreeBuilder::new();
        let kept = b.terminal(TokenKind::Number, 0..1, "1");
        let mark = b.checkpoint();
        let abandoned = b.terminal(TokenKind::Plus, 2..3, "+");
        let _partial = b.node(NodeKind::Statement, vec![kept, abandoned]);
        b.rollback(mark);

        let root = b.node(NodeKind::SelectStatement, vec![kept]);
        let tree = b.finish(root).expect("valid tree");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.parent(kept), Some(root));
    }

    #[test]
    fn unknown_child_is_rejected() {
        let mut b = TreeBuilder::new();
        let ghost = NodeId::new(42);
        let root = b.node(NodeKind::Statement, vec![ghost]);
        assert_eq!(b.finish(root), Err(TreeError::UnknownNode(ghost)));
    }
}
