//! The front end entry point: text in, AST out.

use tracing::debug;

use crate::ast::Expr;
use crate::dialect::{Dialect, GenericDialect};
use crate::error::Result;
use crate::lexer::{Lexer, LexerError, Token};
use crate::parser::{Parser, ParserError};

/// Parses query text into an AST under a dialect.
///
/// A `QueryParser` holds no per-query state and may be shared between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct QueryParser<D: Dialect = GenericDialect> {
    dialect: D,
}

impl QueryParser {
    /// Creates a parser for the generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dialect: GenericDialect::new(),
        }
    }
}

impl<D: Dialect> QueryParser<D> {
    /// Creates a parser for the given dialect.
    #[must_use]
    pub const fn with_dialect(dialect: D) -> Self {
        Self { dialect }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Tokenizes `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`LexerError`] if `source` contains an invalid token.
    pub fn tokenize(&self, source: &str) -> std::result::Result<Vec<Token>, LexerError> {
        Lexer::with_dialect(source, &self.dialect).tokenize()
    }

    /// Parses `source` into an AST.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be tokenized or is not a single
    /// valid query expression.
    pub fn parse(&self, source: &str) -> Result<Expr> {
        let tokens = self.tokenize(source)?;
        Ok(self.parse_tokens(&tokens)?)
    }

    /// Parses an already tokenized statement.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] if the tokens are not a single valid query
    /// expression.
    pub fn parse_tokens(&self, tokens: &[Token]) -> std::result::Result<Expr, ParserError> {
        let mut parser = Parser::new(tokens).with_max_depth(self.dialect.max_nesting_depth());
        let tree = parser
            .parse_statement()
            .inspect_err(|err| debug!(%err, "parser rejected input"))?;
        let ast = tree.to_ast()?;
        debug!(
            tokens = tokens.len(),
            dialect = self.dialect.name(),
            "parsed statement"
        );
        Ok(ast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ShallowDialect;

    impl Dialect for ShallowDialect {
        fn name(&self) -> &'static str {
            "shallow"
        }

        fn supports_comments(&self) -> bool {
            false
        }

        fn max_nesting_depth(&self) -> usize {
            4
        }
    }

    #[test]
    fn test_parse_generic() {
        let parser = QueryParser::new();
        assert_eq!(parser.dialect().name(), "generic");
        assert_eq!(parser.parse("1 + 2").unwrap().to_string(), "(+ (lit 1) (lit 2))");
    }

    #[test]
    fn test_dialect_depth_limit() {
        let parser = QueryParser::with_dialect(ShallowDialect);
        assert!(parser.parse("f(a)").is_ok());
        assert!(parser.parse("((((((a))))))").is_err());
    }

    #[test]
    fn test_dialect_without_comments() {
        let parser = QueryParser::with_dialect(ShallowDialect);
        assert!(parser.parse("a /* note */").is_err());
        assert!(QueryParser::new().parse("a /* note */").is_ok());
    }
}
