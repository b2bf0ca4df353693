//! Candidate column references under a scan root.

use super::ScanKind;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};
use tracing::trace;

/// Collects the columns sitting directly in the operands of `scan`'s
/// statements under `scan_root`, in document order.
///
/// A statement headed by `ISNULL` is skipped along with everything
/// beneath it.
pub fn collect_candidates(tree: &SyntaxTree, scan_root: NodeId, scan: ScanKind) -> Vec<NodeId> {
    let statement_kind = scan.statement_kind();
    let mut candidates = Vec::new();
    let mut stack: Vec<NodeId> = tree.children(scan_root).iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        if tree.kind(node) == statement_kind {
            if tree.is_guard_call(node) {
                trace!(statement = %node, "guarded statement pruned");
                continue;
            }
            let column = tree
                .first_child_of_kind(node, NodeKind::Statement)
                .and_then(|operand| tree.first_child_of_kind(operand, NodeKind::Column));
            if let Some(column) = column {
                candidates.push(column);
            }
        }
        stack.extend(tree.children(node).iter().rev().copied());
    }
    candidates
}
