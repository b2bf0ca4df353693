//! Maps a join to the aliases it makes nullable.

use crate::lint::error::AnalysisError;
use crate::syntax::{JoinKind, NodeId, NodeKind, SyntaxTree};
use smol_str::SmolStr;

/// Returns the aliases whose columns may be NULL because of `join`.
///
/// `LEFT` nullifies the joined source, `RIGHT` the source the join hangs
/// off, and `FULL` both (outer first). Inner joins and non-join nodes
/// yield nothing; so does a side without an alias.
pub fn nullable_aliases(tree: &SyntaxTree, join: NodeId) -> Result<Vec<SmolStr>, AnalysisError> {
    let Some(kind) = tree.join_kind(join) else {
        return Ok(Vec::new());
    };

    let aliases = match kind {
        JoinKind::Inner => Vec::new(),
        JoinKind::Left => joined_alias(tree, join).into_iter().collect(),
        JoinKind::Right => outer_alias(tree, join, kind)?.into_iter().collect(),
        JoinKind::Full => outer_alias(tree, join, kind)?
            .into_iter()
            .chain(joined_alias(tree, join))
            .collect(),
    };
    Ok(aliases)
}

/// Alias of the data source the join brings in.
fn joined_alias(tree: &SyntaxTree, join: NodeId) -> Option<SmolStr> {
    let source = tree.first_child_of_kind(join, NodeKind::DataSource)?;
    tree.data_source_alias(source).map(SmolStr::new)
}

/// Alias of the data source the join hangs off.
fn outer_alias(
    tree: &SyntaxTree,
    join: NodeId,
    kind: JoinKind,
) -> Result<Option<SmolStr>, AnalysisError> {
    match tree.parent(join) {
        Some(parent) if tree.kind(parent) == NodeKind::DataSource => {
            Ok(tree.data_source_alias(parent).map(SmolStr::new))
        }
        parent => Err(AnalysisError::StructuralMismatch {
            join,
            join_kind: kind,
            parent: parent.map(|p| tree.kind(p)),
            span: tree.span(join).into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::TokenKind;
    use crate::parse;
    use crate::syntax::TreeBuilder;

    fn first_join_aliases(source: &str) -> Vec<SmolStr> {
        let tree = parse(source).tree.expect("expected tree");
        let join = tree.nodes_of_kind(NodeKind::Join).next().expect("join");
        nullable_aliases(&tree, join).expect("well-formed join")
    }

    #[test]
    fn inner_join_nullifies_nothing() {
        assert!(first_join_aliases("SELECT 1 FROM A AS T1 INNER JOIN B AS T2 ON T1.X = T2.X").is_empty());
        assert!(first_join_aliases("SELECT 1 FROM A AS T1 JOIN B AS T2 ON T1.X = T2.X").is_empty());
    }

    #[test]
    fn each_outer_kind_picks_its_side() {
        assert_eq!(
            first_join_aliases("SELECT 1 FROM A AS T1 LEFT JOIN B AS T2 ON T1.X = T2.X"),
            vec!["T2"]
        );
        assert_eq!(
            first_join_aliases("SELECT 1 FROM A AS T1 RIGHT JOIN B AS T2 ON T1.X = T2.X"),
            vec!["T1"]
        );
        assert_eq!(
            first_join_aliases("SELECT 1 FROM A AS T1 FULL OUTER JOIN B AS T2 ON T1.X = T2.X"),
            vec!["T1", "T2"]
        );
    }

    #[test]
    fn side_without_alias_contributes_nothing() {
        assert_eq!(
            first_join_aliases("SELECT 1 FROM A FULL JOIN B AS T2 ON A.X = T2.X"),
            vec!["T2"]
        );
        assert!(first_join_aliases("SELECT 1 FROM A AS T1 LEFT JOIN B ON T1.X = B.X").is_empty());
    }

    fn hand_built_join(kind: TokenKind, keyword: &str, wrap_in: Option<NodeKind>) -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new();
        let kw = b.terminal(kind, 0..keyword.len(), keyword);
        let join_kw = b.terminal(TokenKind::Join, 10..14, "JOIN");
        let join = b.node(NodeKind::Join, vec![kw, join_kw]);
        let root = match wrap_in {
            Some(parent) => b.node(parent, vec![join]),
            None => join,
        };
        (b.finish(root).expect("valid tree"), join)
    }

    #[test]
    fn right_join_outside_data_source_is_a_mismatch() {
        let (tree, join) = hand_built_join(TokenKind::Right, "RIGHT", Some(NodeKind::Where));
        let err = nullable_aliases(&tree, join).expect_err("mismatch");
        assert_eq!(
            err,
            AnalysisError::StructuralMismatch {
                join,
                join_kind: JoinKind::Right,
                parent: Some(NodeKind::Where),
                span: (0..14).into(),
            }
        );
    }

    #[test]
    fn parentless_full_join_is_a_mismatch() {
        let (tree, join) = hand_built_join(TokenKind::Full, "FULL", None);
        assert!(matches!(
            nullable_aliases(&tree, join),
            Err(AnalysisError::StructuralMismatch { parent: None, .. })
        ));
    }

    #[test]
    fn parentless_left_join_is_fine() {
        let (tree, join) = hand_built_join(TokenKind::Left, "LEFT", None);
        assert_eq!(nullable_aliases(&tree, join), Ok(Vec::new()));
    }
}
