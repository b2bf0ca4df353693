//! Outer-join NULL hazard lint for 1C-style queries, with rich diagnostics.
//!
//! An outer join fills the columns of its optional side with NULL when no row
//! matches. This library parses query text (English or Russian keywords),
//! builds a syntax tree and reports every outer join whose nullable fields are
//! read without an `ISNULL` guard. Diagnostics render through miette.
//!
//! # Example
//!
//! ```
//! use sdbl_lint::lint;
//!
//! let source = "SELECT T2.Price FROM Catalog.Goods AS T1 \
//!               LEFT JOIN InformationRegister.Prices AS T2 ON T1.Ref = T2.Goods";
//! let outcome = lint(source);
//!
//! assert!(outcome.parse_diagnostics.is_empty());
//! assert_eq!(outcome.diagnostics().len(), 1);
//!
//! let diag = &outcome.diagnostics()[0];
//! let related: Vec<_> = diag
//!     .related_locations()
//!     .map(|label| &source[label.span.clone()])
//!     .collect();
//! assert_eq!(related, ["T2.Price"]);
//! ```

pub mod diag;
pub mod lexer;
pub mod lint;
pub mod parser;
pub mod syntax;

pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole, SourceFile};
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use lint::error::AnalysisError;
pub use lint::metadata::{
    DiagnosticType, FIELDS_FROM_JOINS_WITHOUT_ISNULL, RuleMetadata, RuleSeverity, RuleTag,
};
pub use lint::outer_join::{OuterJoinCheck, ScanKind};
pub use lint::{LintConfig, LintOutcome, LintReport, Linter, lint, lint_with_config};
pub use parser::{ParseResult, Parser, parse};
pub use syntax::{JoinKind, NodeId, NodeKind, Span, SyntaxTree, TreeBuilder, TreeError};
