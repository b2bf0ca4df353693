//! Token types and representations for SDBL lexical analysis.

use crate::syntax::Span;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token in the query language.
///
/// Keywords have one variant regardless of spelling: `SELECT` and `ВЫБРАТЬ`
/// both lex to [`TokenKind::Select`]. Payload-carrying tokens (identifiers,
/// numbers, strings, parameters) keep their text on the [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Query structure keywords
    Select,
    Allowed,
    Distinct,
    Top,
    Into,
    From,
    Where,
    As,
    Group,
    By,
    Order,
    Having,
    Union,
    All,
    Asc,
    Desc,

    // Join keywords
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    /// `ON` / `ПО`. The Russian spelling doubles as `BY`.
    On,

    // Logical and predicate keywords
    And,
    Or,
    Not,
    Is,
    In,
    Between,
    Like,

    // Expression keywords
    /// The null-coalescing guard function, `ISNULL` / `ЕСТЬNULL`.
    IsNull,
    Case,
    When,
    Then,
    Else,
    End,

    // Literal keywords
    True,
    False,
    Null,
    Undefined,

    // Words and literals
    Identifier,
    Number,
    String,
    Parameter,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Punctuation
    LParen,
    RParen,
    Comma,
    Dot,
    Semicolon,

    Eof,
}

impl TokenKind {
    /// Returns true if this token is a keyword in either spelling.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Select
                | TokenKind::Allowed
                | TokenKind::Distinct
                | TokenKind::Top
                | TokenKind::Into
                | TokenKind::From
                | TokenKind::Where
                | TokenKind::As
                | TokenKind::Group
                | TokenKind::By
                | TokenKind::Order
                | TokenKind::Having
                | TokenKind::Union
                | TokenKind::All
                | TokenKind::Asc
                | TokenKind::Desc
                | TokenKind::Join
                | TokenKind::Inner
                | TokenKind::Left
                | TokenKind::Right
                | TokenKind::Full
                | TokenKind::Outer
                | TokenKind::On
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Is
                | TokenKind::In
                | TokenKind::Between
                | TokenKind::Like
                | TokenKind::IsNull
                | TokenKind::Case
                | TokenKind::When
                | TokenKind::Then
                | TokenKind::Else
                | TokenKind::End
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Undefined
        )
    }

    /// Returns true if this token is a literal value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Undefined
        )
    }

    /// Returns true if this token is a binary comparison operator.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
        )
    }

    /// Returns true if this token starts one of the join forms.
    pub fn starts_join(&self) -> bool {
        matches!(
            self,
            TokenKind::Join
                | TokenKind::Inner
                | TokenKind::Left
                | TokenKind::Right
                | TokenKind::Full
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Select => "SELECT",
            TokenKind::Allowed => "ALLOWED",
            TokenKind::Distinct => "DISTINCT",
            TokenKind::Top => "TOP",
            TokenKind::Into => "INTO",
            TokenKind::From => "FROM",
            TokenKind::Where => "WHERE",
            TokenKind::As => "AS",
            TokenKind::Group => "GROUP",
            TokenKind::By => "BY",
            TokenKind::Order => "ORDER",
            TokenKind::Having => "HAVING",
            TokenKind::Union => "UNION",
            TokenKind::All => "ALL",
            TokenKind::Asc => "ASC",
            TokenKind::Desc => "DESC",
            TokenKind::Join => "JOIN",
            TokenKind::Inner => "INNER",
            TokenKind::Left => "LEFT",
            TokenKind::Right => "RIGHT",
            TokenKind::Full => "FULL",
            TokenKind::Outer => "OUTER",
            TokenKind::On => "ON",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Is => "IS",
            TokenKind::In => "IN",
            TokenKind::Between => "BETWEEN",
            TokenKind::Like => "LIKE",
            TokenKind::IsNull => "ISNULL",
            TokenKind::Case => "CASE",
            TokenKind::When => "WHEN",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::Undefined => "UNDEFINED",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Parameter => "parameter",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "<>",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Eof => "<EOF>",
        };
        f.write_str(text)
    }
}

/// A lexical token with its kind, source span and original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in source text.
    pub span: Span,
    /// The token text exactly as written.
    pub text: SmolStr,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}
