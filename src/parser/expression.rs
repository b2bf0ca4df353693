//! Expression parsing.
//!
//! Every expression is parsed for a context given as a boundary statement
//! kind (`SelectStatement`, `WhereStatement`, `JoinStatement` or
//! `ClauseStatement`). Operators and guard calls produce a node of that kind;
//! an operand becomes a `Statement` wrapped in one. A bare column in a select
//! list is therefore `SelectStatement[Statement[Column]]`.
//!
//! Precedence, loosest first: `OR`, `AND`, `NOT`, comparison and predicates,
//! `+ -`, `* /`, unary minus.

use super::Parser;
use super::base::PResult;
use crate::lexer::keywords::ContextualKeyword;
use crate::lexer::token::TokenKind;
use crate::syntax::{NodeId, NodeKind};

impl Parser {
    /// Parses a full expression in the given statement context.
    pub(super) fn parse_expression(&mut self, context: NodeKind) -> PResult<NodeId> {
        self.parse_or(context)
    }

    fn parse_or(&mut self, context: NodeKind) -> PResult<NodeId> {
        let mut left = self.parse_and(context)?;
        while self.stream.check(TokenKind::Or) {
            let op = self.bump();
            let right = self.parse_and(context)?;
            left = self.builder.node(context, vec![left, op, right]);
        }
        Ok(left)
    }

    fn parse_and(&mut self, context: NodeKind) -> PResult<NodeId> {
        let mut left = self.parse_not(context)?;
        while self.stream.check(TokenKind::And) {
            let op = self.bump();
            let right = self.parse_not(context)?;
            left = self.builder.node(context, vec![left, op, right]);
        }
        Ok(left)
    }

    fn parse_not(&mut self, context: NodeKind) -> PResult<NodeId> {
        if self.stream.check(TokenKind::Not) {
            let op = self.bump();
            let operand = self.parse_not(context)?;
            return Ok(self.builder.node(context, vec![op, operand]));
        }
        self.parse_predicate(context)
    }

    /// Parses comparisons, `IS [NOT] NULL`, `REFS table`, `[NOT] IN [HIERARCHY]`,
    /// `[NOT] BETWEEN` and `[NOT] LIKE`.
    fn parse_predicate(&mut self, context: NodeKind) -> PResult<NodeId> {
        let left = self.parse_additive(context)?;
        let kind = self.stream.kind();

        if self.stream.check_word(ContextualKeyword::Refs)
            && self.stream.peek_kind() == TokenKind::Identifier
        {
            let refs = self.bump();
            let table = self.parse_reference_type()?;
            return Ok(self.builder.node(context, vec![left, refs, table]));
        }

        if kind.is_comparison() {
            let op = self.bump();
            let right = self.parse_additive(context)?;
            return Ok(self.builder.node(context, vec![left, op, right]));
        }

        if kind == TokenKind::Is {
            let mut children = vec![left, self.bump()];
            if let Some(not) = self.eat(TokenKind::Not) {
                children.push(not);
            }
            children.push(self.expect(TokenKind::Null, "NULL")?);
            return Ok(self.builder.node(context, children));
        }

        let negated = kind == TokenKind::Not
            && matches!(
                self.stream.peek_kind(),
                TokenKind::In | TokenKind::Between | TokenKind::Like
            );
        if !negated && !matches!(kind, TokenKind::In | TokenKind::Between | TokenKind::Like) {
            return Ok(left);
        }

        let mut children = vec![left];
        if negated {
            children.push(self.bump());
        }
        match self.stream.kind() {
            TokenKind::In => {
                children.push(self.bump());
                if self.stream.check_word(ContextualKeyword::Hierarchy) {
                    children.push(self.bump());
                }
                children.push(self.parse_in_list(context)?);
            }
            TokenKind::Between => {
                children.push(self.bump());
                children.push(self.parse_additive(context)?);
                children.push(self.expect(TokenKind::And, "AND")?);
                children.push(self.parse_additive(context)?);
            }
            _ => {
                children.push(self.bump());
                children.push(self.parse_additive(context)?);
            }
        }
        Ok(self.builder.node(context, children))
    }

    /// Parses the right-hand side of `IN`: a subquery or a parenthesized list.
    fn parse_in_list(&mut self, context: NodeKind) -> PResult<NodeId> {
        if self.stream.check(TokenKind::LParen) && self.stream.peek_kind() == TokenKind::Select {
            return self.parse_subquery();
        }
        let mut children = vec![self.expect(TokenKind::LParen, "`(`")?];
        children.push(self.parse_expression(context)?);
        while self.stream.check(TokenKind::Comma) {
            children.push(self.bump());
            children.push(self.parse_expression(context)?);
        }
        children.push(self.expect(TokenKind::RParen, "`)`")?);
        Ok(self.builder.node(NodeKind::ExpressionList, children))
    }

    /// Parses the table path after `REFS`, such as `Catalog.Goods`.
    fn parse_reference_type(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.bump()];
        while self.stream.check(TokenKind::Dot) {
            children.push(self.bump());
            children.push(self.parse_name_segment()?);
        }
        Ok(self.builder.node(NodeKind::Table, children))
    }

    fn parse_additive(&mut self, context: NodeKind) -> PResult<NodeId> {
        let mut left = self.parse_multiplicative(context)?;
        while self.stream.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let op = self.bump();
            let right = self.parse_multiplicative(context)?;
            left = self.builder.node(context, vec![left, op, right]);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self, context: NodeKind) -> PResult<NodeId> {
        let mut left = self.parse_unary(context)?;
        while self.stream.at_any(&[TokenKind::Star, TokenKind::Slash]) {
            let op = self.bump();
            let right = self.parse_unary(context)?;
            left = self.builder.node(context, vec![left, op, right]);
        }
        Ok(left)
    }

    fn parse_unary(&mut self, context: NodeKind) -> PResult<NodeId> {
        if self.stream.check(TokenKind::Minus) {
            let op = self.bump();
            let operand = self.parse_unary(context)?;
            return Ok(self.builder.node(context, vec![op, operand]));
        }
        self.parse_primary(context)
    }

    fn parse_primary(&mut self, context: NodeKind) -> PResult<NodeId> {
        match self.stream.kind() {
            TokenKind::IsNull => self.parse_guard_call(context),
            TokenKind::LParen if self.stream.peek_kind() == TokenKind::Select => {
                let subquery = self.parse_subquery()?;
                let operand = self.builder.node(NodeKind::Statement, vec![subquery]);
                Ok(self.builder.node(context, vec![operand]))
            }
            TokenKind::LParen => {
                let open = self.bump();
                let inner = self.parse_expression(context)?;
                let close = self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.builder.node(context, vec![open, inner, close]))
            }
            _ => {
                let operand = self.parse_operand(context)?;
                let operand = self.builder.node(NodeKind::Statement, vec![operand]);
                Ok(self.builder.node(context, vec![operand]))
            }
        }
    }

    /// Parses `ISNULL(value, replacement)`.
    fn parse_guard_call(&mut self, context: NodeKind) -> PResult<NodeId> {
        let mut children = vec![self.bump(), self.expect(TokenKind::LParen, "`(`")?];
        children.push(self.parse_expression(context)?);
        children.push(self.expect(TokenKind::Comma, "`,`")?);
        children.push(self.parse_expression(context)?);
        children.push(self.expect(TokenKind::RParen, "`)`")?);
        Ok(self.builder.node(context, children))
    }

    /// Parses the content of a `Statement`: a column, literal, parameter,
    /// function call or `CASE` expression.
    fn parse_operand(&mut self, context: NodeKind) -> PResult<NodeId> {
        let kind = self.stream.kind();
        match kind {
            TokenKind::Identifier if self.stream.peek_kind() == TokenKind::LParen => {
                self.parse_function_call(context)
            }
            TokenKind::Identifier => self.parse_column(),
            TokenKind::Case => self.parse_case(context),
            TokenKind::Parameter => Ok(self.bump()),
            _ if kind.is_literal() => Ok(self.bump()),
            _ => Err(self.stream.error_here(
                format!("expected expression, found {kind}"),
                "P003",
            )),
        }
    }

    /// Parses `name` or `alias.field[.field...]`.
    fn parse_column(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.bump()];
        while self.stream.check(TokenKind::Dot) {
            children.push(self.bump());
            children.push(self.parse_name_segment()?);
        }
        Ok(self.builder.node(NodeKind::Column, children))
    }

    /// Parses `name(args)`, including `COUNT(*)`, `COUNT(DISTINCT x)` and
    /// casts of the form `CAST(x AS Type(10, 2))`.
    fn parse_function_call(&mut self, context: NodeKind) -> PResult<NodeId> {
        let mut children = vec![self.bump(), self.bump()];
        if let Some(distinct) = self.eat(TokenKind::Distinct) {
            children.push(distinct);
        }

        if self.stream.check(TokenKind::Star) {
            children.push(self.bump());
        } else if !self.stream.check(TokenKind::RParen) {
            children.push(self.parse_expression(context)?);
            if self.stream.check(TokenKind::As) {
                children.push(self.bump());
                self.parse_type_name(&mut children)?;
            }
            while self.stream.check(TokenKind::Comma) {
                children.push(self.bump());
                children.push(self.parse_expression(context)?);
            }
        }

        children.push(self.expect(TokenKind::RParen, "`)`")?);
        Ok(self.builder.node(NodeKind::FunctionCall, children))
    }

    /// Parses a type reference such as `Number(15, 2)` or `Catalog.Goods`
    /// as flat terminals.
    fn parse_type_name(&mut self, children: &mut Vec<NodeId>) -> PResult<()> {
        children.push(self.expect(TokenKind::Identifier, "type name")?);
        while self.stream.check(TokenKind::Dot) {
            children.push(self.bump());
            children.push(self.parse_name_segment()?);
        }
        if self.stream.check(TokenKind::LParen) {
            children.push(self.bump());
            children.push(self.expect(TokenKind::Number, "type length")?);
            while self.stream.check(TokenKind::Comma) {
                children.push(self.bump());
                children.push(self.expect(TokenKind::Number, "type precision")?);
            }
            children.push(self.expect(TokenKind::RParen, "`)`")?);
        }
        Ok(())
    }

    /// Parses `CASE WHEN c THEN v ... [ELSE v] END`.
    fn parse_case(&mut self, context: NodeKind) -> PResult<NodeId> {
        let mut children = vec![self.bump()];
        if !self.stream.check(TokenKind::When) {
            return Err(self.unexpected("WHEN"));
        }
        while self.stream.check(TokenKind::When) {
            children.push(self.bump());
            children.push(self.parse_expression(context)?);
            children.push(self.expect(TokenKind::Then, "THEN")?);
            children.push(self.parse_expression(context)?);
        }
        if let Some(else_kw) = self.eat(TokenKind::Else) {
            children.push(else_kw);
            children.push(self.parse_expression(context)?);
        }
        children.push(self.expect(TokenKind::End, "END")?);
        Ok(self.builder.node(NodeKind::Case, children))
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::token::TokenKind;
    use crate::parse;
    use crate::syntax::{NodeId, NodeKind, SyntaxTree};

    fn select_expression(source: &str) -> (SyntaxTree, NodeId) {
        let result = parse(source);
        assert!(
            result.diagnostics.is_empty(),
            "unexpected diagnostics: {:?}",
            result.diagnostics
        );
        let tree = result.tree.expect("expected tree");
        let field = tree
            .nodes_of_kind(NodeKind::SelectedField)
            .next()
            .expect("selected field");
        let expression = tree.first_child(field).expect("expression");
        (tree, expression)
    }

    fn child_kinds(tree: &SyntaxTree, node: NodeId) -> Vec<NodeKind> {
        tree.children(node).iter().map(|&c| tree.kind(c)).collect()
    }

    #[test]
    fn bare_column_is_wrapped_in_statement() {
        let (tree, expr) = select_expression("SELECT T2.Field FROM Tab AS T2");
        assert_eq!(tree.kind(expr), NodeKind::SelectStatement);
        assert_eq!(child_kinds(&tree, expr), vec![NodeKind::Statement]);

        let statement = tree.first_child(expr).expect("statement");
        let column = tree.first_child(statement).expect("column");
        assert_eq!(tree.kind(column), NodeKind::Column);
        assert_eq!(tree.column_table_alias(column), Some("T2"));
        assert_eq!(tree.column_name(column), Some("Field"));
    }

    #[test]
    fn guard_call_layout() {
        let (tree, expr) = select_expression("SELECT ISNULL(T2.Field, 0) FROM Tab AS T2");
        assert!(tree.is_guard_call(expr));
        assert_eq!(
            child_kinds(&tree, expr),
            vec![
                NodeKind::Terminal(TokenKind::IsNull),
                NodeKind::Terminal(TokenKind::LParen),
                NodeKind::SelectStatement,
                NodeKind::Terminal(TokenKind::Comma),
                NodeKind::SelectStatement,
                NodeKind::Terminal(TokenKind::RParen),
            ]
        );
    }

    #[test]
    fn binary_operators_nest_by_precedence() {
        let (tree, expr) = select_expression("SELECT T.A + T.B * 2 FROM Tab AS T");
        let children = tree.children(expr);
        assert_eq!(children.len(), 3);
        assert_eq!(tree.token_kind(children[1]), Some(TokenKind::Plus));
        assert_eq!(tree.children(children[2]).len(), 3);
        assert_eq!(tree.token_kind(tree.children(children[2])[1]), Some(TokenKind::Star));
    }

    #[test]
    fn where_and_join_contexts() {
        let tree = parse(
            "SELECT 1 FROM A AS T1 LEFT JOIN B AS T2 ON T1.X = T2.X \
             WHERE NOT T2.Y IS NULL AND T2.Z NOT IN (1, 2)",
        )
        .tree
        .expect("expected tree");
        assert!(tree.nodes_of_kind(NodeKind::JoinStatement).count() >= 3);
        assert!(tree.nodes_of_kind(NodeKind::WhereStatement).count() >= 5);
        assert_eq!(tree.nodes_of_kind(NodeKind::ExpressionList).count(), 1);
    }

    #[test]
    fn function_calls_and_case() {
        let (tree, expr) = select_expression(
            "SELECT CASE WHEN COUNT(DISTINCT T.A) > 1 THEN CAST(T.B AS Number(10, 2)) \
             ELSE SUM(T.C) END FROM Tab AS T",
        );
        let statement = tree.first_child(expr).expect("statement");
        let case = tree.first_child(statement).expect("case");
        assert_eq!(tree.kind(case), NodeKind::Case);
        assert_eq!(tree.nodes_of_kind(NodeKind::FunctionCall).count(), 3);
        assert_eq!(tree.nodes_of_kind(NodeKind::Column).count(), 3);
    }

    #[test]
    fn between_like_and_in_subquery() {
        let result = parse(
            "SELECT 1 FROM Tab AS T WHERE T.A BETWEEN 1 AND 5 AND T.B LIKE \"%x%\" \
             AND T.C IN (SELECT S.C FROM Src AS S)",
        );
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let tree = result.tree.expect("expected tree");
        assert_eq!(tree.nodes_of_kind(NodeKind::Subquery).count(), 1);
    }

    #[test]
    fn refs_predicate_takes_a_table_path() {
        let (tree, expr) = select_expression("SELECT T.Owner REFS Catalog.Goods FROM Tab AS T");
        assert_eq!(
            child_kinds(&tree, expr),
            vec![
                NodeKind::SelectStatement,
                NodeKind::Terminal(TokenKind::Identifier),
                NodeKind::Table,
            ]
        );
        let table = tree.children(expr)[2];
        assert_eq!(tree.text(table), "Catalog.Goods");
    }

    #[test]
    fn in_hierarchy_before_the_list() {
        let (tree, expr) = select_expression("SELECT T.Ref IN HIERARCHY (&Group) FROM Tab AS T");
        assert_eq!(
            child_kinds(&tree, expr),
            vec![
                NodeKind::SelectStatement,
                NodeKind::Terminal(TokenKind::In),
                NodeKind::Terminal(TokenKind::Identifier),
                NodeKind::ExpressionList,
            ]
        );

        let result = parse(
            "ВЫБРАТЬ 1 ИЗ Справочник.Товары КАК Т \
             ГДЕ Т.Ссылка НЕ В ИЕРАРХИИ (ВЫБРАТЬ Г.Ссылка ИЗ Справочник.Группы КАК Г) \
             И Т.Владелец ССЫЛКА Справочник.Организации",
        );
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn missing_operand_is_reported() {
        let result = parse("SELECT T.A + FROM Tab AS T");
        assert!(result.tree.is_none());
        assert_eq!(result.diagnostics[0].code.as_deref(), Some("P003"));
    }
}
