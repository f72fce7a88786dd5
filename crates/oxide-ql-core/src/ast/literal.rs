//! Literal values carried by `Literal` tokens and `lit` AST nodes.

use core::fmt;

use num_bigint::BigInt;
use serde::Serialize;

/// A canonicalized literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// Integer literal (e.g., `42`), of any magnitude.
    Integer(BigInt),
    /// Fixed-point decimal literal with value `coefficient * 10^exponent`.
    ///
    /// The written scale is preserved, so `600.` and `600.0` are distinct
    /// values here. `exponent` is never positive.
    Decimal {
        /// The digits, with sign.
        coefficient: BigInt,
        /// The negated scale.
        exponent: i64,
    },
    /// String literal (e.g., `'hello'`).
    String(String),
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// `NULL`.
    Null,
    /// A structured value from a back-tick delimited block.
    Embedded(serde_json::Value),
}

impl Literal {
    /// Returns the integer value, if this is an integer literal that fits in
    /// an `i64`.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => i64::try_from(n).ok(),
            _ => None,
        }
    }

    /// Returns `(coefficient, exponent)` for decimal literals.
    #[must_use]
    pub const fn decimal_parts(&self) -> Option<(&BigInt, i64)> {
        match self {
            Self::Decimal {
                coefficient,
                exponent,
            } => Some((coefficient, *exponent)),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal {
                coefficient,
                exponent,
            } => write!(f, "{coefficient}d{exponent}"),
            Self::String(s) => write_quoted(f, s, '"'),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::Embedded(value) => write!(f, "`{value}`"),
        }
    }
}

/// Writes `text` between `quote` characters, escaping the quote and backslash.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    use fmt::Write;

    f.write_char(quote)?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}
