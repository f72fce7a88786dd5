//! Token types for the query lexer.

use core::fmt;

use serde::Serialize;

use super::SourcePosition;
use crate::ast::Literal;
use crate::parser::pratt;

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftCurly,
    /// }
    RightCurly,
    /// <<
    LeftDoubleAngle,
    /// >>
    RightDoubleAngle,
    /// Unquoted identifier (case-insensitive).
    Identifier,
    /// Double-quoted identifier (case-sensitive).
    QuotedIdentifier,
    /// Symbolic or keyword operator (e.g., `+`, `and`, `not_in`).
    Operator,
    /// Reserved word that is not an operator.
    Keyword,
    /// Literal value.
    Literal,
    /// .
    Dot,
    /// *
    Star,
    /// ,
    Comma,
    /// :
    Colon,
    /// ;
    Semicolon,
    /// AS
    As,
    /// AT
    At,
    /// FOR
    For,
    /// MISSING
    Missing,
    /// NULL
    Null,
    /// End of input
    Eof,
}

impl TokenType {
    /// Returns a short human-readable description, used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::LeftCurly => "'{'",
            Self::RightCurly => "'}'",
            Self::LeftDoubleAngle => "'<<'",
            Self::RightDoubleAngle => "'>>'",
            Self::Identifier => "identifier",
            Self::QuotedIdentifier => "quoted identifier",
            Self::Operator => "operator",
            Self::Keyword => "keyword",
            Self::Literal => "literal",
            Self::Dot => "'.'",
            Self::Star => "'*'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::As => "AS",
            Self::At => "AT",
            Self::For => "FOR",
            Self::Missing => "MISSING",
            Self::Null => "NULL",
            Self::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its position in the source.
///
/// Tokens are immutable once the lexer has produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenType,
    /// Canonical text for keywords, operators and identifiers.
    pub text: Option<String>,
    /// The literal value; only present on `Literal` tokens.
    pub value: Option<Literal>,
    /// Where the token starts.
    pub position: Option<SourcePosition>,
}

impl Token {
    /// Creates a token with no text or value.
    #[must_use]
    pub const fn new(kind: TokenType, position: Option<SourcePosition>) -> Self {
        Self {
            kind,
            text: None,
            value: None,
            position,
        }
    }

    /// Creates a token carrying canonical text.
    #[must_use]
    pub fn with_text(
        kind: TokenType,
        text: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            value: None,
            position,
        }
    }

    /// Creates a literal token.
    #[must_use]
    pub const fn literal(value: Literal, position: Option<SourcePosition>) -> Self {
        Self {
            kind: TokenType::Literal,
            text: None,
            value: Some(value),
            position,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenType::Eof
    }

    /// Returns the normalized keyword text used for grammar dispatch.
    ///
    /// Keywords and operators yield their canonical text; the dedicated
    /// reserved-word token types yield their lowercase spelling.
    #[must_use]
    pub fn keyword_text(&self) -> Option<&str> {
        match self.kind {
            TokenType::Keyword | TokenType::Operator => self.text.as_deref(),
            TokenType::Null => Some("null"),
            TokenType::Missing => Some("missing"),
            TokenType::As => Some("as"),
            TokenType::At => Some("at"),
            TokenType::For => Some("for"),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword or keyword operator.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.keyword_text() == Some(keyword)
    }

    /// Returns true if this token may start a unary expression.
    #[must_use]
    pub fn is_unary_operator(&self) -> bool {
        self.kind == TokenType::Operator
            && self.text.as_deref().is_some_and(pratt::is_unary_operator)
    }

    /// Returns true if this token can appear between two operands.
    #[must_use]
    pub fn is_binary_operator(&self) -> bool {
        self.infix_precedence().is_some()
    }

    /// Returns the infix precedence of this token (higher binds tighter).
    #[must_use]
    pub fn infix_precedence(&self) -> Option<i32> {
        match self.kind {
            TokenType::Operator => self.text.as_deref().and_then(pratt::infix_precedence),
            TokenType::Star => pratt::infix_precedence("*"),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, &self.value) {
            (Some(text), _) => write!(f, "'{text}'"),
            (None, Some(value)) => write!(f, "{value}"),
            (None, None) => f.write_str(self.kind.describe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_text_for_reserved_types() {
        let missing = Token::new(TokenType::Missing, None);
        let null = Token::new(TokenType::Null, None);
        let comma = Token::new(TokenType::Comma, None);
        assert_eq!(missing.keyword_text(), Some("missing"));
        assert_eq!(null.keyword_text(), Some("null"));
        assert_eq!(comma.keyword_text(), None);
    }

    #[test]
    fn test_operator_classification() {
        let minus = Token::with_text(TokenType::Operator, "-", None);
        let not = Token::with_text(TokenType::Operator, "not", None);
        let and = Token::with_text(TokenType::Operator, "and", None);
        let star = Token::new(TokenType::Star, None);
        assert!(minus.is_unary_operator());
        assert!(minus.is_binary_operator());
        assert!(not.is_unary_operator());
        assert!(!not.is_binary_operator());
        assert!(!and.is_unary_operator());
        assert_eq!(and.infix_precedence(), Some(20));
        assert_eq!(star.infix_precedence(), Some(60));
    }

    #[test]
    fn test_identifier_is_not_keyword() {
        let ident = Token::with_text(TokenType::Identifier, "select", None);
        assert_eq!(ident.keyword_text(), None);
        assert!(!ident.is_keyword("select"));
    }

    #[test]
    fn test_token_display() {
        let kw = Token::with_text(TokenType::Keyword, "from", None);
        let lit = Token::literal(Literal::Integer(3.into()), None);
        let eof = Token::new(TokenType::Eof, None);
        assert_eq!(kw.to_string(), "'from'");
        assert_eq!(lit.to_string(), "3");
        assert_eq!(eof.to_string(), "end of input");
    }
}
