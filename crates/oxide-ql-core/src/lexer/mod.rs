//! Query lexer.
//!
//! This module provides a hand-written lexer that turns query text into a
//! sequence of position-tagged tokens, canonicalizing literals and fusing
//! multi-word keywords and operators along the way.

mod error;
pub mod keywords;
mod number;
mod position;
mod token;
mod tokenizer;

pub use error::{LexerError, LexerErrorKind};
pub use position::SourcePosition;
pub use token::{Token, TokenType};
pub use tokenizer::Lexer;

/// Tokenizes `source` with the generic dialect.
///
/// # Errors
///
/// Returns a [`LexerError`] on the first character sequence that does not
/// form a valid token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
    Lexer::new(source).tokenize()
}
