//! Parser infrastructure for query text.
//!
//! The parser consumes the token stream produced by the lexer and builds a
//! [`SyntaxTree`] bottom-up. Errors are recovered at statement boundaries:
//! a broken statement is dropped from the tree and parsing resumes after the
//! next `;`.

pub mod base;
mod expression;
mod query;

use crate::diag::{Diag, DiagSeverity, SourceFile, convert_diagnostics_to_reports};
use crate::lexer::token::{Token, TokenKind};
use crate::syntax::{NodeId, NodeKind, SyntaxTree, TreeBuilder};
use base::{PResult, TokenStream};
use miette::Report;
use tracing::debug;

/// Result of parsing query text.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The syntax tree, or None if parsing failed without producing any statement.
    pub tree: Option<SyntaxTree>,
    /// Lexer and parser diagnostics, in the order they were produced.
    pub diagnostics: Vec<Diag>,
}

impl ParseResult {
    /// Returns true if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == DiagSeverity::Error)
    }

    /// Renders the diagnostics as miette reports against `source`.
    pub fn reports(&self, source: &str) -> Vec<Report> {
        convert_diagnostics_to_reports(&self.diagnostics, &SourceFile::new(source))
    }
}

/// Query parser with statement-level error recovery.
pub struct Parser {
    stream: TokenStream,
    builder: TreeBuilder,
    diagnostics: Vec<Diag>,
}

impl Parser {
    /// Creates a new parser from a token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            builder: TreeBuilder::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Merges lexer diagnostics with parser diagnostics.
    pub fn with_lexer_diagnostics(mut self, lex_diags: Vec<Diag>) -> Self {
        let mut all_diags = lex_diags;
        all_diags.append(&mut self.diagnostics);
        self.diagnostics = all_diags;
        self
    }

    /// Parses the token stream into a package of statements.
    pub fn parse(mut self) -> ParseResult {
        let mut children = Vec::new();
        let mut statements = 0usize;

        loop {
            while self.stream.check(TokenKind::Semicolon) {
                children.push(self.bump());
            }
            if self.stream.is_eof() {
                break;
            }

            let mark = self.builder.checkpoint();
            match self.parse_statement() {
                Ok(statement) => {
                    children.push(statement);
                    statements += 1;
                    if !self.stream.at_any(&[TokenKind::Semicolon, TokenKind::Eof]) {
                        let diag = self.stream.error_here(
                            format!("expected `;` or end of input, found {}", self.stream.kind()),
                            "P002",
                        );
                        self.diagnostics.push(*diag);
                        self.synchronize();
                    }
                }
                Err(diag) => {
                    self.builder.rollback(mark);
                    self.diagnostics.push(*diag);
                    self.synchronize();
                }
            }
        }

        let root = self.builder.node(NodeKind::Package, children);
        let tree = match self.builder.finish(root) {
            Ok(tree) => Some(tree),
            Err(err) => {
                self.diagnostics
                    .push(Diag::error(format!("malformed syntax tree: {err}")).with_code("P000"));
                None
            }
        };

        let has_error = self
            .diagnostics
            .iter()
            .any(|diag| diag.severity == DiagSeverity::Error);
        let tree = if has_error && statements == 0 {
            None
        } else {
            tree
        };

        ParseResult {
            tree,
            diagnostics: self.diagnostics,
        }
    }

    /// Skips to the next statement separator.
    fn synchronize(&mut self) {
        let skipped_from = self.stream.position();
        while !self.stream.at_any(&[TokenKind::Semicolon, TokenKind::Eof]) {
            self.stream.advance();
        }
        debug!(
            skipped = self.stream.position() - skipped_from,
            "recovered at statement boundary"
        );
    }

    /// Turns the current token into a terminal node and advances.
    fn bump(&mut self) -> NodeId {
        let id = self.builder.token(self.stream.current());
        self.stream.advance();
        id
    }

    /// Consumes the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Option<NodeId> {
        self.stream.check(kind).then(|| self.bump())
    }

    /// Consumes a token of the given kind or reports what was expected.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> PResult<NodeId> {
        if self.stream.check(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> base::ParseError {
        self.stream.error_here(
            format!("expected {expected}, found {}", self.stream.kind()),
            "P001",
        )
    }
}

/// Tokenizes and parses `source`.
pub fn parse(source: &str) -> ParseResult {
    let lexed = crate::lexer::tokenize(source);
    Parser::new(lexed.tokens)
        .with_lexer_diagnostics(lexed.diagnostics)
        .parse()
}
