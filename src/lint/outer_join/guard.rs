//! Null-guard detection for a single column reference.

use super::ScanKind;
use crate::syntax::{NodeId, SyntaxTree};

/// Returns true if some statement between `column` and the scan's root is
/// an `ISNULL` call.
///
/// The walk hops from statement to statement: the nearest statement or root
/// at or above the cursor is inspected, then the walk resumes at its parent.
/// Reaching the root, an empty statement or the top of the tree means the
/// reference is unguarded.
pub fn is_guarded(tree: &SyntaxTree, column: NodeId, scan: ScanKind) -> bool {
    let mut cursor = Some(column);
    while let Some(start) = cursor {
        let boundary = std::iter::once(start)
            .chain(tree.ancestors(start))
            .find(|&id| scan.is_boundary(tree.kind(id)));
        let Some(boundary) = boundary else {
            return false;
        };
        if tree.kind(boundary) == scan.root_kind() || tree.children(boundary).is_empty() {
            return false;
        }
        if tree.is_guard_call(boundary) {
            return true;
        }
        cursor = tree.parent(boundary);
    }
    false
}
