//! Lexer error types.

use thiserror::Error;

use super::SourcePosition;

/// The category of a lexer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexerErrorKind {
    /// A character that cannot start any token.
    InvalidChar,
    /// Operator characters that do not form a known operator.
    InvalidOperator,
    /// A malformed string, identifier or numeric literal.
    InvalidLiteral,
    /// A back-tick block that is unterminated or rejected by the literal parser.
    InvalidEmbeddedLiteral,
}

impl LexerErrorKind {
    /// Returns a short description of the failure category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidChar => "invalid character",
            Self::InvalidOperator => "invalid operator",
            Self::InvalidLiteral => "invalid literal",
            Self::InvalidEmbeddedLiteral => "invalid embedded literal",
        }
    }
}

/// A lexer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {position}: {} {token_text:?}: {message}", .kind.as_str())]
pub struct LexerError {
    /// The failure category.
    pub kind: LexerErrorKind,
    /// Where the offending text starts.
    pub position: SourcePosition,
    /// The offending source text.
    pub token_text: String,
    /// Details about the failure.
    pub message: String,
}

impl LexerError {
    /// Creates a new lexer error.
    #[must_use]
    pub fn new(
        kind: LexerErrorKind,
        position: SourcePosition,
        token_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            position,
            token_text: token_text.into(),
            message: message.into(),
        }
    }
}
