//! # oxide-ql-core
//!
//! The syntax layer of a PartiQL-style query language: a hand-written lexer
//! and a recursive descent parser with Pratt expression parsing.
//!
//! Query text goes through three stages:
//! - the [`lexer`] turns it into position-tagged tokens, canonicalizing
//!   literals and fusing multi-word keywords such as `LEFT OUTER JOIN`;
//! - the [`parser`] builds an intermediate [`ParseNode`] tree;
//! - the tree is rendered into the [`ast`], which prints as an s-expression.
//!
//! ```rust
//! use oxide_ql_core::parse;
//!
//! let ast = parse("SELECT a FROM t WHERE a > 1").unwrap();
//! assert_eq!(
//!     ast.to_string(),
//!     "(select (project (list (id a))) (from (id t)) (where (> (id a) (lit 1))))"
//! );
//! ```
//!
//! The alternate format adds source positions:
//!
//! ```rust
//! let ast = oxide_ql_core::parse("a + 1").unwrap();
//! assert_eq!(
//!     format!("{ast:#}"),
//!     "(meta (+ (meta (id a) {line:1,column:1}) (meta (lit 1) {line:1,column:5})) \
//!      {line:1,column:3})"
//! );
//! ```

pub mod ast;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod parser;
mod query;

pub use ast::{Expr, ExprKind, Literal};
pub use dialect::{Dialect, GenericDialect};
pub use error::{Error, Result};
pub use lexer::{tokenize, Lexer, LexerError, Token, TokenType};
pub use parser::{ParseNode, ParseType, Parser, ParserError};
pub use query::QueryParser;

/// Parses `source` into an AST with the generic dialect.
///
/// # Errors
///
/// Returns an error if `source` cannot be tokenized or is not a single valid
/// query expression.
pub fn parse(source: &str) -> Result<Expr> {
    QueryParser::new().parse(source)
}
