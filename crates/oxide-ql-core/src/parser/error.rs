//! Parser error types.

use core::fmt;

use crate::lexer::{SourcePosition, Token, TokenType};

/// The category of a parser failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserErrorKind {
    /// A token that no production accepts at this point.
    UnexpectedToken,
    /// A specific token type was required.
    ExpectedTokenType(TokenType),
    /// A specific keyword was required.
    ExpectedKeyword,
    /// An expression was required.
    ExpectedExpression,
    /// A type name was required.
    ExpectedTypeName,
    /// A type parameter that is not an unsigned integer literal.
    InvalidTypeParameter,
    /// A type with the wrong number of parameters.
    CastArity,
    /// A CASE expression without any WHEN clause.
    ExpectedWhenClause,
    /// A SELECT or PIVOT without FROM.
    MissingFromClause,
    /// A path step that is neither a name, `*` nor a bracketed expression.
    InvalidPathComponent,
    /// A literal used as a GROUP BY key.
    UnsupportedLiteralsInGroupBy,
    /// An aggregate called with the wrong number of arguments.
    InvalidArgumentCount,
    /// A parse tree that does not have the shape its kind requires.
    MalformedExpression,
    /// Expressions nested deeper than the configured limit.
    NestingTooDeep,
}

/// A parser error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    /// The failure category.
    pub kind: ParserErrorKind,
    /// The error message.
    pub message: String,
    /// Where the offending token starts.
    pub position: Option<SourcePosition>,
    /// The offending token.
    pub token: Option<Token>,
}

impl ParserError {
    /// Creates a new parser error located at `token`.
    #[must_use]
    pub fn new(kind: ParserErrorKind, message: impl Into<String>, token: Option<&Token>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: token.and_then(|t| t.position),
            token: token.cloned(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: &str, found: Option<&Token>) -> Self {
        Self::new(
            ParserErrorKind::UnexpectedToken,
            format!("expected {expected}, found {}", describe(found)),
            found,
        )
    }

    /// Creates an error for a missing token of a given type.
    #[must_use]
    pub fn expected_type(expected: TokenType, found: Option<&Token>) -> Self {
        Self::new(
            ParserErrorKind::ExpectedTokenType(expected),
            format!("expected {expected}, found {}", describe(found)),
            found,
        )
    }

    /// Creates an error for a missing keyword.
    #[must_use]
    pub fn expected_keyword(keyword: &str, found: Option<&Token>) -> Self {
        Self::new(
            ParserErrorKind::ExpectedKeyword,
            format!(
                "expected keyword {}, found {}",
                keyword.to_uppercase(),
                describe(found)
            ),
            found,
        )
    }
}

fn describe(token: Option<&Token>) -> String {
    token.map_or_else(|| String::from("end of input"), ToString::to_string)
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "Parser error at {position}: {}", self.message),
            None => write!(f, "Parser error: {}", self.message),
        }
    }
}

impl std::error::Error for ParserError {}
