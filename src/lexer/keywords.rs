//! Keyword recognition for the query language.
//!
//! Every keyword has an English and a Russian spelling and both are
//! case-insensitive. `ПО` is shared by `ON` and `BY`, so it always lexes as
//! [`TokenKind::On`] and the parser accepts it wherever `BY` is expected.

use super::token::TokenKind;

/// Looks up a keyword by name (case-insensitive, either spelling).
pub fn lookup_keyword(name: &str) -> Option<TokenKind> {
    let upper = name.to_uppercase();
    let kind = match upper.as_str() {
        "SELECT" | "ВЫБРАТЬ" => TokenKind::Select,
        "ALLOWED" | "РАЗРЕШЕННЫЕ" | "РАЗРЕШЁННЫЕ" => TokenKind::Allowed,
        "DISTINCT" | "РАЗЛИЧНЫЕ" => TokenKind::Distinct,
        "TOP" | "ПЕРВЫЕ" => TokenKind::Top,
        "INTO" | "ПОМЕСТИТЬ" => TokenKind::Into,
        "FROM" | "ИЗ" => TokenKind::From,
        "WHERE" | "ГДЕ" => TokenKind::Where,
        "AS" | "КАК" => TokenKind::As,
        "GROUP" | "СГРУППИРОВАТЬ" => TokenKind::Group,
        "BY" => TokenKind::By,
        "ORDER" | "УПОРЯДОЧИТЬ" => TokenKind::Order,
        "HAVING" | "ИМЕЮЩИЕ" => TokenKind::Having,
        "UNION" | "ОБЪЕДИНИТЬ" => TokenKind::Union,
        "ALL" | "ВСЕ" => TokenKind::All,
        "ASC" | "ВОЗР" => TokenKind::Asc,
        "DESC" | "УБЫВ" => TokenKind::Desc,

        "JOIN" | "СОЕДИНЕНИЕ" => TokenKind::Join,
        "INNER" | "ВНУТРЕННЕЕ" => TokenKind::Inner,
        "LEFT" | "ЛЕВОЕ" => TokenKind::Left,
        "RIGHT" | "ПРАВОЕ" => TokenKind::Right,
        "FULL" | "ПОЛНОЕ" => TokenKind::Full,
        "OUTER" | "ВНЕШНЕЕ" => TokenKind::Outer,
        "ON" | "ПО" => TokenKind::On,

        "AND" | "И" => TokenKind::And,
        "OR" | "ИЛИ" => TokenKind::Or,
        "NOT" | "НЕ" => TokenKind::Not,
        "IS" | "ЕСТЬ" => TokenKind::Is,
        "IN" | "В" => TokenKind::In,
        "BETWEEN" | "МЕЖДУ" => TokenKind::Between,
        "LIKE" | "ПОДОБНО" => TokenKind::Like,

        "ISNULL" | "ЕСТЬNULL" => TokenKind::IsNull,
        "CASE" | "ВЫБОР" => TokenKind::Case,
        "WHEN" | "КОГДА" => TokenKind::When,
        "THEN" | "ТОГДА" => TokenKind::Then,
        "ELSE" | "ИНАЧЕ" => TokenKind::Else,
        "END" | "КОНЕЦ" => TokenKind::End,

        "TRUE" | "ИСТИНА" => TokenKind::True,
        "FALSE" | "ЛОЖЬ" => TokenKind::False,
        "NULL" => TokenKind::Null,
        "UNDEFINED" | "НЕОПРЕДЕЛЕНО" => TokenKind::Undefined,

        _ => return None,
    };
    Some(kind)
}

/// Words that act as keywords only in one position and stay ordinary
/// identifiers everywhere else. `Ссылка` is a common field name, for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextualKeyword {
    /// `HIERARCHY` / `ИЕРАРХИИ`, right after `IN`.
    Hierarchy,
    /// `REFS` / `ССЫЛКА`, between an operand and a table path.
    Refs,
}

/// Looks up a contextual keyword (case-insensitive, either spelling).
pub fn lookup_contextual(name: &str) -> Option<ContextualKeyword> {
    match name.to_uppercase().as_str() {
        "HIERARCHY" | "ИЕРАРХИИ" => Some(ContextualKeyword::Hierarchy),
        "REFS" | "ССЫЛКА" => Some(ContextualKeyword::Refs),
        _ => None,
    }
}
