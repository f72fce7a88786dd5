#![allow(dead_code)]

use std::sync::Once;

use oxide_ql_core::lexer::{LexerError, Token, TokenType};
use oxide_ql_core::parser::ParserError;
use oxide_ql_core::{Error, Expr};

static TRACING: Once = Once::new();

/// Installs a test subscriber so `RUST_LOG`-style output shows up with
/// `--nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

pub fn parse(source: &str) -> Expr {
    init_tracing();
    oxide_ql_core::parse(source)
        .unwrap_or_else(|e| panic!("Failed to parse: {source}\nError: {e}"))
}

/// Parses `source` and renders the AST as an s-expression.
pub fn render(source: &str) -> String {
    parse(source).to_string()
}

pub fn parse_err(source: &str) -> Error {
    init_tracing();
    oxide_ql_core::parse(source)
        .expect_err(&format!("Expected parse error for: {source}"))
}

pub fn parser_err(source: &str) -> ParserError {
    match parse_err(source) {
        Error::Parser(err) => err,
        other => panic!("Expected parser error for {source}, got {other:?}"),
    }
}

pub fn lexer_err(source: &str) -> LexerError {
    match parse_err(source) {
        Error::Lexer(err) => err,
        other => panic!("Expected lexer error for {source}, got {other:?}"),
    }
}

pub fn tokens(source: &str) -> Vec<Token> {
    init_tracing();
    oxide_ql_core::tokenize(source)
        .unwrap_or_else(|e| panic!("Failed to tokenize: {source}\nError: {e}"))
}

pub fn token_kinds(source: &str) -> Vec<TokenType> {
    tokens(source).iter().map(|t| t.kind).collect()
}
