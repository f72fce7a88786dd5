//! Tests for tokenization.

mod common;
use common::*;

use oxide_ql_core::ast::Literal;
use oxide_ql_core::lexer::{LexerErrorKind, SourcePosition, TokenType};
use serde_json::json;

#[test]
fn positions_are_monotonic() {
    let toks = tokens("SELECT a,\r\n  b.c AS \"X\"\n FROM t -- trailing\nWHERE x >= 1.5");
    assert_eq!(toks[0].position, Some(SourcePosition::new(1, 1)));
    let positions: Vec<_> = toks.iter().filter_map(|t| t.position).collect();
    assert_eq!(positions.len(), toks.len());
    assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn positions_track_lines_and_comments() {
    let toks = tokens("a -- one\n/* two\n */ b");
    assert_eq!(toks[1].position, Some(SourcePosition::new(3, 5)));
    assert_eq!(toks[1].text.as_deref(), Some("b"));
}

#[test]
fn left_outer_join_fuses_into_one_token() {
    let toks = tokens("LEFT OUTER JOIN");
    assert_eq!(toks.len(), 2);
    assert_eq!(toks[0].kind, TokenType::Keyword);
    assert_eq!(toks[0].text.as_deref(), Some("left_join"));
    assert_eq!(toks[1].kind, TokenType::Eof);
}

#[test]
fn fused_operators() {
    let texts: Vec<_> = tokens("a NOT IN b IS NOT c UNION ALL d")
        .into_iter()
        .filter(|t| t.kind == TokenType::Operator)
        .filter_map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["not_in", "is_not", "union_all"]);
}

#[test]
fn unmatched_keyword_sequence_stays_split() {
    assert_eq!(
        token_kinds("LEFT a"),
        vec![TokenType::Keyword, TokenType::Identifier, TokenType::Eof]
    );
}

#[test]
fn keyword_aliases() {
    let texts: Vec<_> = tokens("VARCHAR char DEC Int BOOL")
        .into_iter()
        .filter_map(|t| t.text)
        .collect();
    assert_eq!(
        texts,
        vec!["character_varying", "character", "decimal", "integer", "boolean"]
    );
}

#[test]
fn reserved_word_token_types() {
    assert_eq!(
        token_kinds("NULL missing AS at FOR"),
        vec![
            TokenType::Null,
            TokenType::Missing,
            TokenType::As,
            TokenType::At,
            TokenType::For,
            TokenType::Eof,
        ]
    );
}

#[test]
fn identifiers_keep_their_spelling() {
    let toks = tokens("MyTable \"Quoted \"\"Name\"\"\"");
    assert_eq!(toks[0].kind, TokenType::Identifier);
    assert_eq!(toks[0].text.as_deref(), Some("MyTable"));
    assert_eq!(toks[1].kind, TokenType::QuotedIdentifier);
    assert_eq!(toks[1].text.as_deref(), Some("Quoted \"Name\""));
}

#[test]
fn literal_values() {
    let values: Vec<_> = tokens("'it''s' TRUE false 42")
        .into_iter()
        .filter_map(|t| t.value)
        .collect();
    assert_eq!(
        values,
        vec![
            Literal::String(String::from("it's")),
            Literal::Boolean(true),
            Literal::Boolean(false),
            Literal::Integer(42.into()),
        ]
    );
}

#[test]
fn decimal_scale_is_preserved() {
    let parts: Vec<_> = tokens("[600., .1, 0.00e0, -2.50]")
        .iter()
        .filter_map(|t| t.value.as_ref().and_then(Literal::decimal_parts))
        .map(|(coefficient, exponent)| (coefficient.to_string(), exponent))
        .collect();
    assert_eq!(
        parts,
        vec![
            (String::from("600"), 0),
            (String::from("1"), -1),
            (String::from("0"), -2),
            (String::from("-250"), -2),
        ]
    );
}

#[test]
fn embedded_literal_is_parsed_as_json() {
    let toks = tokens("`{\"a\": [1, \"`\"]}`");
    assert_eq!(
        toks[0].value,
        Some(Literal::Embedded(json!({"a": [1, "`"]})))
    );
}

#[test]
fn operator_spellings() {
    let texts: Vec<_> = tokens("a <= b <> c != d || e")
        .into_iter()
        .filter(|t| t.kind == TokenType::Operator)
        .filter_map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["<=", "<>", "<>", "||"]);
    assert_eq!(
        token_kinds("<<>>"),
        vec![
            TokenType::LeftDoubleAngle,
            TokenType::RightDoubleAngle,
            TokenType::Eof
        ]
    );
}

#[test]
fn lexer_error_kinds() {
    assert_eq!(lexer_err("a # b").kind, LexerErrorKind::InvalidChar);
    assert_eq!(lexer_err("a & b").kind, LexerErrorKind::InvalidOperator);
    assert_eq!(lexer_err("12abc").kind, LexerErrorKind::InvalidLiteral);
    assert_eq!(lexer_err("1e+").kind, LexerErrorKind::InvalidLiteral);
    assert_eq!(lexer_err("'open").kind, LexerErrorKind::InvalidLiteral);
    assert_eq!(
        lexer_err("1.5e-9223372036854775808").kind,
        LexerErrorKind::InvalidLiteral
    );
    assert_eq!(lexer_err("1e5000").kind, LexerErrorKind::InvalidLiteral);
    assert_eq!(
        lexer_err("`{not json`").kind,
        LexerErrorKind::InvalidEmbeddedLiteral
    );
}

#[test]
fn extreme_exponent_is_reported_not_wrapped() {
    let toks = tokens("1.5e-9223372036854775807");
    let (coefficient, exponent) = toks[0]
        .value
        .as_ref()
        .and_then(Literal::decimal_parts)
        .unwrap();
    assert_eq!(coefficient.to_string(), "15");
    assert_eq!(exponent, i64::MIN);
}

#[test]
fn lexer_error_reports_position_and_text() {
    let err = lexer_err("SELECT a\nFROM t WHERE #");
    assert_eq!(err.position, SourcePosition::new(2, 14));
    assert_eq!(err.token_text, "#");
    assert!(err.to_string().starts_with("Lexer error at line 2, column 14"));
}
