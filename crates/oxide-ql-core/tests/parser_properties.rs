//! Cross-cutting properties of the front end.

mod common;
use common::*;

use oxide_ql_core::lexer::TokenType;
use oxide_ql_core::{Parser, QueryParser};

#[test]
fn expression_stops_at_boundary() {
    let cases: &[(&str, &[TokenType])] = &[
        ("a + b, c", &[TokenType::Comma]),
        ("f(x) AS y", &[TokenType::As]),
        ("t.a AT i", &[TokenType::As, TokenType::At]),
        ("x[1] ]", &[TokenType::RightBracket]),
        ("a * b : c", &[TokenType::Colon]),
        ("a.b[0]", &[TokenType::LeftBracket]),
        ("a OR b", &[TokenType::Operator]),
        ("CASE WHEN a THEN b END)", &[TokenType::RightParen]),
    ];

    for (source, boundary) in cases {
        let toks = tokens(source);
        let mut parser = Parser::new(&toks);
        parser
            .parse_expression(-1, boundary)
            .unwrap_or_else(|e| panic!("{source}: {e}"));
        let remaining = parser.remaining();
        assert!(
            remaining.first().map_or(true, |t| boundary.contains(&t.kind)),
            "{source}: stopped at {:?}",
            remaining.first()
        );
        assert!(toks[..toks.len() - 1].ends_with(remaining));
    }
}

#[test]
fn remaining_is_a_shrinking_suffix() {
    let toks = tokens("f(a), b");
    let mut parser = Parser::new(&toks);
    assert_eq!(parser.remaining().len(), 6);

    parser.parse_expression(-1, &[TokenType::Comma]).unwrap();
    let remaining = parser.remaining();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].kind, TokenType::Comma);
    assert_eq!(remaining, &toks[4..6]);
}

#[test]
fn trailing_semicolon_is_insignificant() {
    for query in [
        "a + 1",
        "SELECT a FROM t WHERE b",
        "CAST(x AS INT)",
        "{'k': [1, 2]}",
        "PIVOT v AT k FROM t",
    ] {
        let plain = parse(query);
        let terminated = parse(&format!("{query};"));
        assert_eq!(plain, terminated, "{query}");
        assert_eq!(format!("{plain:#}"), format!("{terminated:#}"));
    }
}

#[test]
fn whitespace_only_moves_positions() {
    let compact = render("SELECT a FROM t WHERE b=1");
    let spaced = render("  SELECT\ta\n FROM   t\r\n WHERE b = 1  ");
    assert_eq!(compact, spaced);
}

#[test]
fn every_rendered_node_has_a_position() {
    let ast = parse("SELECT x.a FROM t AS x WHERE x.b IN [1, 2]");
    let annotated = format!("{ast:#}");
    assert!(annotated.starts_with("(meta (select"));
    assert!(!annotated.contains("{line:0"));
    assert!(annotated.contains("(meta (lit \"a\") {line:1,column:10})"));
    assert!(annotated.contains("(as (meta x {line:1,column:22})"));
}

#[test]
fn ast_serializes_to_json() {
    let ast = parse("a.b");
    let json = serde_json::to_value(&ast).unwrap();
    assert_eq!(json["meta"]["line"], 1);
    assert!(json["kind"]["Path"].is_object());
}

#[test]
fn query_parser_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let parser = QueryParser::new();
    assert_send_sync(&parser);

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["a + 1", "SELECT * FROM t", "[1, 2]"]
            .into_iter()
            .map(|query| {
                let parser = &parser;
                scope.spawn(move || parser.parse(query).map(|ast| ast.to_string()))
            })
            .collect();
        let rendered: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "(+ (id a) (lit 1))",
                "(select (project (*)) (from (id t)))",
                "(list (lit 1) (lit 2))",
            ]
        );
    });
}
