//! Syntax tree foundation: spans, node kinds, the arena tree and its visitor.

mod builder;
mod kind;
mod span;
mod tree;
pub mod visit;

pub use builder::{Checkpoint, TreeBuilder, TreeError};
pub use kind::{JoinKind, NodeKind};
pub use span::{Span, cover};
pub use tree::{Ancestors, Descendants, NodeId, SyntaxTree};
pub use visit::{Visit, VisitResult, walk_children, walk_node, walk_tree};
