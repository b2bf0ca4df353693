//! Token stream navigation shared by the parser modules.

use crate::diag::Diag;
use crate::lexer::keywords::{ContextualKeyword, lookup_contextual};
use crate::lexer::token::{Token, TokenKind};

/// Common error type for parsing operations.
pub type ParseError = Box<Diag>;

/// Common result type for parsing operations.
pub type PResult<T> = Result<T, ParseError>;

/// Owned token stream with a cursor.
///
/// The stream always ends with an EOF token, so [`TokenStream::current`]
/// never runs out of tokens.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Creates a stream, appending an EOF token when the input lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof)) {
            let eof_pos = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));
        }
        Self { tokens, pos: 0 }
    }

    /// Returns the current token.
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Returns the kind of the token `n` places ahead, or EOF past the end.
    pub fn nth_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Advances to the next token. Does nothing at EOF.
    pub fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns true if the current token has the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Returns true if the current token has any of the given kinds.
    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind())
    }

    /// Returns true if the current token is an identifier spelling `word`.
    pub fn check_word(&self, word: ContextualKeyword) -> bool {
        self.check(TokenKind::Identifier) && lookup_contextual(&self.current().text) == Some(word)
    }

    /// Returns true once the cursor has reached the EOF token.
    pub fn is_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Creates an error at the current token.
    pub fn error_here(&self, message: impl Into<String>, code: &str) -> ParseError {
        Box::new(
            Diag::error(message.into())
                .with_primary_label(self.current().span.clone(), "here")
                .with_code(code),
        )
    }

    /// Returns the cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }
}
