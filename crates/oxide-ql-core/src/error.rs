//! Crate-level error type.

use thiserror::Error;

use crate::lexer::{LexerError, SourcePosition};
use crate::parser::ParserError;

/// An error from any stage of the front end.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lexer(#[from] LexerError),
    /// The tokens do not form a valid query.
    #[error(transparent)]
    Parser(#[from] ParserError),
}

impl Error {
    /// Returns where in the source the error was detected, if known.
    #[must_use]
    pub const fn position(&self) -> Option<SourcePosition> {
        match self {
            Self::Lexer(err) => Some(err.position),
            Self::Parser(err) => err.position,
        }
    }
}

/// Result type for front end operations.
pub type Result<T> = std::result::Result<T, Error>;
