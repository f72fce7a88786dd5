//! Tests for literal rendering and type productions.

mod common;
use common::*;

use oxide_ql_core::ast::{DataType, ExprKind, Literal};
use oxide_ql_core::parser::ParserErrorKind;

#[test]
fn numeric_literals_keep_written_scale() {
    assert_eq!(render("42"), "(lit 42)");
    assert_eq!(render("600."), "(lit 600d0)");
    assert_eq!(render(".1"), "(lit 1d-1)");
    assert_eq!(render("0.00e0"), "(lit 0d-2)");
    assert_eq!(render("1.5E+2"), "(lit 150d0)");
    assert_eq!(render("2.e1"), "(lit 20d0)");
}

#[test]
fn decimal_value_and_scale_round_trip() {
    for (source, coefficient, exponent) in [("600.", "600", 0), (".1", "1", -1), ("12.340", "12340", -3)] {
        let ast = parse(source);
        let ExprKind::Lit(value) = &ast.kind else {
            panic!("expected literal for {source}, got {ast}");
        };
        let parts = value.decimal_parts().map(|(c, e)| (c.to_string(), e));
        assert_eq!(parts, Some((String::from(coefficient), exponent)), "{source}");
    }
}

#[test]
fn numeric_literals_are_exact_at_any_size() {
    assert_eq!(render("9223372036854775808"), "(lit 9223372036854775808)");
    assert_eq!(
        render("-123456789012345678901234567890"),
        "(lit -123456789012345678901234567890)"
    );
    assert_eq!(render("0.00000000000000000000000000001"), "(lit 1d-29)");
    assert_eq!(
        render("79228162514264337593543950336.0"),
        "(lit 792281625142643375935439503360d-1)"
    );
}

#[test]
fn oversized_type_parameter_is_rejected() {
    assert_eq!(
        parser_err("CAST(x AS VARCHAR(99999999999999999999))").kind,
        ParserErrorKind::InvalidTypeParameter
    );
}

#[test]
fn other_literals() {
    assert_eq!(render("'hello'"), "(lit \"hello\")");
    assert_eq!(render("TRUE"), "(lit true)");
    assert_eq!(render("NULL"), "(lit null)");
    assert_eq!(render("MISSING"), "(missing)");
    assert_eq!(render("`[1, 2]`"), "(lit `[1,2]`)");
}

#[test]
fn embedded_literal_value() {
    let ast = parse("`{\"k\": \"v\"}`");
    let ExprKind::Lit(Literal::Embedded(value)) = &ast.kind else {
        panic!("expected embedded literal, got {ast}");
    };
    assert_eq!(value["k"], "v");
}

#[test]
fn cast_with_parameterized_type() {
    assert_eq!(
        render("CAST(5 AS VARCHAR(1))"),
        "(cast (lit 5) (type character_varying 1))"
    );
    assert_eq!(
        render("CAST(x AS CHARACTER VARYING)"),
        "(cast (id x) (type character_varying))"
    );
    assert_eq!(
        render("CAST(x AS DECIMAL(10, 2))"),
        "(cast (id x) (type decimal 10 2))"
    );
    assert_eq!(
        render("CAST(a + 1 AS DOUBLE PRECISION)"),
        "(cast (+ (id a) (lit 1)) (type double_precision))"
    );
}

#[test]
fn cast_target_is_typed() {
    let ast = parse("CAST(x AS NUMERIC(5))");
    let ExprKind::Cast { data_type, .. } = &ast.kind else {
        panic!("expected cast, got {ast}");
    };
    assert_eq!(
        data_type.kind,
        ExprKind::Type(DataType::Numeric {
            precision: Some(5),
            scale: None,
        })
    );
}

#[test]
fn every_zero_arity_type_is_accepted() {
    for name in [
        "MISSING", "NULL", "BOOLEAN", "SMALLINT", "INT", "REAL", "TIMESTAMP", "STRING", "SYMBOL",
        "CLOB", "BLOB", "STRUCT", "TUPLE", "LIST", "SEXP", "BAG",
    ] {
        let rendered = render(&format!("CAST(x AS {name})"));
        assert!(rendered.starts_with("(cast (id x) (type "), "{rendered}");
    }
}
