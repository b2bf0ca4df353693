//! Statement, query and data source parsing.

use super::Parser;
use super::base::PResult;
use crate::lexer::token::TokenKind;
use crate::syntax::{NodeId, NodeKind};

impl Parser {
    /// Parses a query, or a chain of queries joined by `UNION`.
    pub(super) fn parse_statement(&mut self) -> PResult<NodeId> {
        let first = self.parse_query()?;
        if !self.stream.check(TokenKind::Union) {
            return Ok(first);
        }

        let mut children = vec![first];
        while self.stream.check(TokenKind::Union) {
            children.push(self.bump());
            if let Some(all) = self.eat(TokenKind::All) {
                children.push(all);
            }
            children.push(self.parse_query()?);
        }
        Ok(self.builder.node(NodeKind::Union, children))
    }

    /// Parses a single `SELECT` query with all of its clauses.
    ///
    /// A query with an `INTO` clause becomes a temporary table query.
    fn parse_query(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.expect(TokenKind::Select, "SELECT")?];
        if let Some(limitations) = self.parse_limitations()? {
            children.push(limitations);
        }
        children.push(self.parse_select_list()?);

        let mut kind = NodeKind::Query;
        if self.stream.check(TokenKind::Into) {
            children.push(self.parse_temporary_table()?);
            kind = NodeKind::TemporaryTableMainQuery;
        }
        if self.stream.check(TokenKind::From) {
            children.push(self.parse_data_sources()?);
        }
        if self.stream.check(TokenKind::Where) {
            children.push(self.parse_where()?);
        }
        if self.stream.check(TokenKind::Group) {
            children.push(self.parse_group_by()?);
        }
        if self.stream.check(TokenKind::Having) {
            let having = self.bump();
            let condition = self.parse_expression(NodeKind::ClauseStatement)?;
            children.push(self.builder.node(NodeKind::Having, vec![having, condition]));
        }
        if self.stream.check(TokenKind::Order) {
            children.push(self.parse_order_by()?);
        }

        Ok(self.builder.node(kind, children))
    }

    /// Parses `ALLOWED`, `DISTINCT` and `TOP n` in any order.
    fn parse_limitations(&mut self) -> PResult<Option<NodeId>> {
        let mut children = Vec::new();
        loop {
            match self.stream.kind() {
                TokenKind::Allowed | TokenKind::Distinct => children.push(self.bump()),
                TokenKind::Top => {
                    children.push(self.bump());
                    children.push(self.expect(TokenKind::Number, "row count")?);
                }
                _ => break,
            }
        }
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.builder.node(NodeKind::Limitations, children)))
    }

    fn parse_select_list(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.parse_selected_field()?];
        while self.stream.check(TokenKind::Comma) {
            children.push(self.bump());
            children.push(self.parse_selected_field()?);
        }
        Ok(self.builder.node(NodeKind::SelectList, children))
    }

    /// Parses `*`, `alias.*` or an expression with an optional alias.
    fn parse_selected_field(&mut self) -> PResult<NodeId> {
        if self.stream.check(TokenKind::Star) {
            let star = self.bump();
            return Ok(self.builder.node(NodeKind::SelectedField, vec![star]));
        }
        if self.at_qualified_star() {
            let mut children = vec![self.bump()];
            while !self.stream.check(TokenKind::Star) {
                children.push(self.bump());
                if !self.stream.check(TokenKind::Star) {
                    children.push(self.parse_name_segment()?);
                }
            }
            children.push(self.bump());
            return Ok(self.builder.node(NodeKind::SelectedField, children));
        }
        let mut children = vec![self.parse_expression(NodeKind::SelectStatement)?];
        if let Some(alias) = self.parse_alias()? {
            children.push(alias);
        }
        Ok(self.builder.node(NodeKind::SelectedField, children))
    }

    /// Looks ahead for `name(.name)*.*`.
    fn at_qualified_star(&self) -> bool {
        if !self.stream.check(TokenKind::Identifier) {
            return false;
        }
        let mut n = 1;
        while self.stream.nth_kind(n) == TokenKind::Dot {
            let next = self.stream.nth_kind(n + 1);
            if next == TokenKind::Star {
                return true;
            }
            if next != TokenKind::Identifier && !next.is_keyword() {
                return false;
            }
            n += 2;
        }
        false
    }

    /// Parses `AS name` or a bare `name`.
    fn parse_alias(&mut self) -> PResult<Option<NodeId>> {
        let children = if self.stream.check(TokenKind::As) {
            let as_kw = self.bump();
            vec![as_kw, self.expect(TokenKind::Identifier, "alias name")?]
        } else if self.stream.check(TokenKind::Identifier) {
            vec![self.bump()]
        } else {
            return Ok(None);
        };
        Ok(Some(self.builder.node(NodeKind::Alias, children)))
    }

    fn parse_temporary_table(&mut self) -> PResult<NodeId> {
        let into = self.bump();
        let name = self.expect(TokenKind::Identifier, "temporary table name")?;
        Ok(self.builder.node(NodeKind::TemporaryTable, vec![into, name]))
    }

    fn parse_data_sources(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.bump(), self.parse_data_source()?];
        while self.stream.check(TokenKind::Comma) {
            children.push(self.bump());
            children.push(self.parse_data_source()?);
        }
        Ok(self.builder.node(NodeKind::DataSources, children))
    }

    /// Parses a source with its optional alias and the joins hanging off it.
    fn parse_data_source(&mut self) -> PResult<NodeId> {
        let mut children = Vec::new();
        match self.stream.kind() {
            TokenKind::LParen if self.stream.peek_kind() == TokenKind::Select => {
                children.push(self.parse_subquery()?);
            }
            TokenKind::LParen => {
                children.push(self.bump());
                children.push(self.parse_data_source()?);
                children.push(self.expect(TokenKind::RParen, "`)`")?);
            }
            TokenKind::Parameter => children.push(self.bump()),
            TokenKind::Identifier => children.push(self.parse_table()?),
            _ => return Err(self.unexpected("table, subquery or parameter")),
        }

        if let Some(alias) = self.parse_alias()? {
            children.push(alias);
        }
        while self.stream.kind().starts_join() {
            children.push(self.parse_join()?);
        }
        Ok(self.builder.node(NodeKind::DataSource, children))
    }

    /// Parses a dotted table path, with virtual table parameters if present.
    fn parse_table(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.bump()];
        while self.stream.check(TokenKind::Dot) {
            children.push(self.bump());
            children.push(self.parse_name_segment()?);
        }

        if self.stream.check(TokenKind::LParen) {
            children.push(self.bump());
            while !self.stream.check(TokenKind::RParen) {
                if self.stream.check(TokenKind::Comma) {
                    children.push(self.bump());
                    continue;
                }
                children.push(self.parse_expression(NodeKind::ClauseStatement)?);
                if !self.stream.at_any(&[TokenKind::Comma, TokenKind::RParen]) {
                    return Err(self.unexpected("`,` or `)`"));
                }
            }
            children.push(self.bump());
        }
        Ok(self.builder.node(NodeKind::Table, children))
    }

    /// Parses `( query )` into a subquery node.
    pub(super) fn parse_subquery(&mut self) -> PResult<NodeId> {
        let open = self.expect(TokenKind::LParen, "`(`")?;
        let query = self.parse_statement()?;
        let close = self.expect(TokenKind::RParen, "`)`")?;
        Ok(self.builder.node(NodeKind::Subquery, vec![open, query, close]))
    }

    /// Parses `[INNER | LEFT | RIGHT | FULL] [OUTER] JOIN source ON condition`.
    fn parse_join(&mut self) -> PResult<NodeId> {
        let mut children = Vec::new();
        if self.stream.at_any(&[
            TokenKind::Inner,
            TokenKind::Left,
            TokenKind::Right,
            TokenKind::Full,
        ]) {
            children.push(self.bump());
        }
        if let Some(outer) = self.eat(TokenKind::Outer) {
            children.push(outer);
        }
        children.push(self.expect(TokenKind::Join, "JOIN")?);
        children.push(self.parse_data_source()?);
        children.push(self.expect(TokenKind::On, "ON")?);

        let condition = self.parse_expression(NodeKind::JoinStatement)?;
        children.push(self.builder.node(NodeKind::JoinExpression, vec![condition]));
        Ok(self.builder.node(NodeKind::Join, children))
    }

    fn parse_where(&mut self) -> PResult<NodeId> {
        let where_kw = self.bump();
        let condition = self.parse_expression(NodeKind::WhereStatement)?;
        let expression = self
            .builder
            .node(NodeKind::WhereExpression, vec![condition]);
        Ok(self.builder.node(NodeKind::Where, vec![where_kw, expression]))
    }

    /// `GROUP BY` also accepts the Russian `ПО`, which lexes as `ON`.
    fn parse_group_by(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.bump(), self.expect_by()?];
        children.push(self.parse_expression(NodeKind::ClauseStatement)?);
        while self.stream.check(TokenKind::Comma) {
            children.push(self.bump());
            children.push(self.parse_expression(NodeKind::ClauseStatement)?);
        }
        Ok(self.builder.node(NodeKind::GroupBy, children))
    }

    fn parse_order_by(&mut self) -> PResult<NodeId> {
        let mut children = vec![self.bump(), self.expect_by()?];
        loop {
            children.push(self.parse_expression(NodeKind::ClauseStatement)?);
            if self.stream.at_any(&[TokenKind::Asc, TokenKind::Desc]) {
                children.push(self.bump());
            }
            if !self.stream.check(TokenKind::Comma) {
                break;
            }
            children.push(self.bump());
        }
        Ok(self.builder.node(NodeKind::OrderBy, children))
    }

    fn expect_by(&mut self) -> PResult<NodeId> {
        if self.stream.at_any(&[TokenKind::By, TokenKind::On]) {
            Ok(self.bump())
        } else {
            Err(self.unexpected("BY"))
        }
    }

    /// Parses a name after a dot. Keywords are valid names in this position.
    pub(super) fn parse_name_segment(&mut self) -> PResult<NodeId> {
        let kind = self.stream.kind();
        if kind == TokenKind::Identifier || kind.is_keyword() {
            Ok(self.bump())
        } else {
            Err(self.unexpected("name"))
        }
    }
}
