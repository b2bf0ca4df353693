//! Errors that abort analysis of a document.

use crate::syntax::{JoinKind, NodeId, NodeKind};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// A tree shape the outer-join check cannot reason about.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum AnalysisError {
    /// A `RIGHT` or `FULL` join whose parent is not a data source.
    #[error("{join_kind} join {join} is not attached to a data source (parent: {})", describe_parent(.parent))]
    #[diagnostic(
        code(lint::structural_mismatch),
        help("the outer side of a join is the data source it hangs off")
    )]
    StructuralMismatch {
        join: NodeId,
        join_kind: JoinKind,
        parent: Option<NodeKind>,
        #[label("this join")]
        span: SourceSpan,
    },
}

impl AnalysisError {
    /// Returns the join the error is about.
    pub fn join(&self) -> NodeId {
        match self {
            AnalysisError::StructuralMismatch { join, .. } => *join,
        }
    }
}

fn describe_parent(parent: &Option<NodeKind>) -> String {
    match parent {
        Some(kind) => kind.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_join_and_parent() {
        let err = AnalysisError::StructuralMismatch {
            join: NodeId::new(3),
            join_kind: JoinKind::Right,
            parent: Some(NodeKind::Where),
            span: (4..10).into(),
        };
        let message = err.to_string();
        assert!(message.contains("#3"), "{message}");
        assert!(message.contains(&NodeKind::Where.to_string()), "{message}");
        assert_eq!(err.join(), NodeId::new(3));
    }

    #[test]
    fn detached_join_reports_no_parent() {
        let err = AnalysisError::StructuralMismatch {
            join: NodeId::new(0),
            join_kind: JoinKind::Full,
            parent: None,
            span: (0..0).into(),
        };
        assert!(err.to_string().ends_with("(parent: none)"));
        assert_eq!(
            err.code().map(|code| code.to_string()).as_deref(),
            Some("lint::structural_mismatch")
        );
    }
}
