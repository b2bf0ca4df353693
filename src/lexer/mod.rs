//! Lexical analysis for the query language.
//!
//! Raw token shapes are recognised by a `logos` automaton; words are then
//! classified through the bilingual keyword table. The lexer is error tolerant:
//! unknown characters become diagnostics and scanning continues.

pub mod keywords;
pub mod token;

use crate::diag::Diag;
use crate::syntax::Span;
use logos::Logos;
use token::{Token, TokenKind};

/// Result of lexical analysis.
///
/// Contains both the tokens produced and any diagnostics encountered during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, including an EOF token at the end.
    pub tokens: Vec<Token>,
    /// Diagnostics encountered during lexing.
    pub diagnostics: Vec<Diag>,
}

/// Token shapes as seen by the automaton, before keyword classification.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[regex(r"[a-zA-Z_а-яА-ЯёЁ][a-zA-Z0-9_а-яА-ЯёЁ]*")]
    Word,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""([^"]|"")*""#)]
    String,
    #[regex(r"&[a-zA-Z_а-яА-ЯёЁ][a-zA-Z0-9_а-яА-ЯёЁ]*")]
    Parameter,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
}

impl RawToken {
    fn classify(self, text: &str) -> TokenKind {
        match self {
            RawToken::Word => keywords::lookup_keyword(text).unwrap_or(TokenKind::Identifier),
            RawToken::Number => TokenKind::Number,
            RawToken::String => TokenKind::String,
            RawToken::Parameter => TokenKind::Parameter,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Semicolon => TokenKind::Semicolon,
        }
    }
}

/// A lexical analyzer for query source text.
pub struct Lexer<'a> {
    /// The source text being lexed.
    source: &'a str,
    /// Accumulated tokens.
    tokens: Vec<Token>,
    /// Accumulated diagnostics.
    diagnostics: Vec<Diag>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenizes the source text and returns the result.
    pub fn tokenize(mut self) -> LexerResult {
        let mut raw = RawToken::lexer(self.source);
        while let Some(next) = raw.next() {
            let span = raw.span();
            let text = raw.slice();
            match next {
                Ok(shape) => {
                    let kind = shape.classify(text);
                    self.tokens.push(Token::new(kind, span, text));
                }
                Err(()) => self.unrecognized(span, text),
            }
        }

        // Always add EOF token
        let eof_pos = self.source.len();
        self.tokens
            .push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));

        LexerResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn unrecognized(&mut self, span: Span, text: &str) {
        let diag = if text.starts_with('"') {
            Diag::error("unclosed string literal")
                .with_primary_label(span, "string starts here")
                .with_code("S002")
        } else {
            Diag::error(format!("invalid character '{text}'"))
                .with_primary_label(span, "here")
                .with_code("S001")
        };
        self.diagnostics.push(diag);
    }
}

/// Convenience function to tokenize a source string.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}
