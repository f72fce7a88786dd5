//! Operator precedence tables.
//!
//! Higher precedence binds tighter. Operators of the same precedence are
//! left associative.

use crate::ast::{BinaryOp, UnaryOp};

/// Precedence of `UNION`, `INTERSECT` and `EXCEPT`, the loosest operators.
///
/// Clause bodies are parsed at this precedence so that a set operator ends
/// the enclosing query instead of the clause.
pub const SET_OPERATOR_PRECEDENCE: i32 = 5;

/// Returns the infix precedence of an operator, given its canonical text.
///
/// Returns `None` if the text is not an infix operator.
#[must_use]
pub const fn infix_precedence(op: &str) -> Option<i32> {
    match op.as_bytes() {
        b"union" | b"union_all" | b"intersect" | b"intersect_all" | b"except"
        | b"except_all" => Some(SET_OPERATOR_PRECEDENCE),
        b"or" => Some(10),
        b"and" => Some(20),
        b"=" | b"<>" | b"is" | b"is_not" | b"in" | b"not_in" => Some(30),
        b"<" | b"<=" | b">" | b">=" | b"between" | b"not_between" | b"like" | b"not_like" => {
            Some(40)
        }
        b"+" | b"-" | b"||" => Some(50),
        b"*" | b"/" | b"%" => Some(60),
        _ => None,
    }
}

/// Returns true if the operator may start a unary expression.
#[must_use]
pub const fn is_unary_operator(op: &str) -> bool {
    matches!(op.as_bytes(), b"+" | b"-" | b"not")
}

/// Returns the positive form of a fused negated operator.
///
/// `a NOT IN b` renders as `NOT (a IN b)`.
#[must_use]
pub const fn negated_operator(op: &str) -> Option<&'static str> {
    match op.as_bytes() {
        b"is_not" => Some("is"),
        b"not_in" => Some("in"),
        b"not_between" => Some("between"),
        b"not_like" => Some("like"),
        _ => None,
    }
}

/// Converts operator text to a binary operator.
#[must_use]
pub const fn binary_op(op: &str) -> Option<BinaryOp> {
    match op.as_bytes() {
        b"union" => Some(BinaryOp::Union),
        b"union_all" => Some(BinaryOp::UnionAll),
        b"intersect" => Some(BinaryOp::Intersect),
        b"intersect_all" => Some(BinaryOp::IntersectAll),
        b"except" => Some(BinaryOp::Except),
        b"except_all" => Some(BinaryOp::ExceptAll),
        b"or" => Some(BinaryOp::Or),
        b"and" => Some(BinaryOp::And),
        b"=" => Some(BinaryOp::Eq),
        b"<>" => Some(BinaryOp::NotEq),
        b"is" => Some(BinaryOp::Is),
        b"in" => Some(BinaryOp::In),
        b"<" => Some(BinaryOp::Lt),
        b"<=" => Some(BinaryOp::LtEq),
        b">" => Some(BinaryOp::Gt),
        b">=" => Some(BinaryOp::GtEq),
        b"+" => Some(BinaryOp::Add),
        b"-" => Some(BinaryOp::Sub),
        b"||" => Some(BinaryOp::Concat),
        b"*" => Some(BinaryOp::Mul),
        b"/" => Some(BinaryOp::Div),
        b"%" => Some(BinaryOp::Mod),
        _ => None,
    }
}

/// Converts operator text to a unary operator.
#[must_use]
pub const fn unary_op(op: &str) -> Option<UnaryOp> {
    match op.as_bytes() {
        b"+" => Some(UnaryOp::Plus),
        b"-" => Some(UnaryOp::Neg),
        b"not" => Some(UnaryOp::Not),
        _ => None,
    }
}
