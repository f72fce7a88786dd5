//! Data type definitions used by `CAST` and `IS`.

use core::fmt;
use core::ops::RangeInclusive;

use serde::Serialize;

/// Data types that can be named in a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// The absent value.
    Missing,
    /// SQL null.
    Null,
    /// Boolean.
    Boolean,
    /// Small integer.
    Smallint,
    /// Integer.
    Integer,
    /// Float with optional precision.
    Float(Option<u32>),
    /// Real.
    Real,
    /// Double precision.
    DoublePrecision,
    /// Decimal with optional precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u32>,
        /// Number of digits after the decimal point.
        scale: Option<u32>,
    },
    /// Numeric with optional precision and scale.
    Numeric {
        /// Total number of digits.
        precision: Option<u32>,
        /// Number of digits after the decimal point.
        scale: Option<u32>,
    },
    /// Timestamp.
    Timestamp,
    /// Fixed-length character string.
    Character(Option<u32>),
    /// Variable-length character string.
    CharacterVarying(Option<u32>),
    /// Unbounded string.
    String,
    /// Symbol.
    Symbol,
    /// Character large object.
    Clob,
    /// Binary large object.
    Blob,
    /// Struct.
    Struct,
    /// Tuple.
    Tuple,
    /// Ordered list.
    List,
    /// S-expression.
    Sexp,
    /// Unordered bag.
    Bag,
}

/// Returns how many parameters the named type accepts, or `None` if `name`
/// is not a type.
#[must_use]
pub fn type_arity(name: &str) -> Option<RangeInclusive<usize>> {
    match name {
        "missing" | "null" | "boolean" | "smallint" | "integer" | "real" | "double_precision"
        | "timestamp" | "string" | "symbol" | "clob" | "blob" | "struct" | "tuple" | "list"
        | "sexp" | "bag" => Some(0..=0),
        "float" | "character" | "character_varying" => Some(0..=1),
        "decimal" | "numeric" => Some(0..=2),
        _ => None,
    }
}

impl DataType {
    /// Builds a data type from its canonical name and parameters.
    ///
    /// Returns `None` if the name is unknown or the parameter count is
    /// outside the type's arity.
    #[must_use]
    pub fn from_parts(name: &str, parameters: &[u32]) -> Option<Self> {
        if !type_arity(name)?.contains(&parameters.len()) {
            return None;
        }
        let first = parameters.first().copied();
        let second = parameters.get(1).copied();

        let data_type = match name {
            "missing" => Self::Missing,
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "smallint" => Self::Smallint,
            "integer" => Self::Integer,
            "float" => Self::Float(first),
            "real" => Self::Real,
            "double_precision" => Self::DoublePrecision,
            "decimal" => Self::Decimal {
                precision: first,
                scale: second,
            },
            "numeric" => Self::Numeric {
                precision: first,
                scale: second,
            },
            "timestamp" => Self::Timestamp,
            "character" => Self::Character(first),
            "character_varying" => Self::CharacterVarying(first),
            "string" => Self::String,
            "symbol" => Self::Symbol,
            "clob" => Self::Clob,
            "blob" => Self::Blob,
            "struct" => Self::Struct,
            "tuple" => Self::Tuple,
            "list" => Self::List,
            "sexp" => Self::Sexp,
            "bag" => Self::Bag,
            _ => return None,
        };
        Some(data_type)
    }

    /// Returns the canonical type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Smallint => "smallint",
            Self::Integer => "integer",
            Self::Float(_) => "float",
            Self::Real => "real",
            Self::DoublePrecision => "double_precision",
            Self::Decimal { .. } => "decimal",
            Self::Numeric { .. } => "numeric",
            Self::Timestamp => "timestamp",
            Self::Character(_) => "character",
            Self::CharacterVarying(_) => "character_varying",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Clob => "clob",
            Self::Blob => "blob",
            Self::Struct => "struct",
            Self::Tuple => "tuple",
            Self::List => "list",
            Self::Sexp => "sexp",
            Self::Bag => "bag",
        }
    }

    /// Returns the parameters written after the type name.
    #[must_use]
    pub fn parameters(&self) -> Vec<u32> {
        match self {
            Self::Float(p) | Self::Character(p) | Self::CharacterVarying(p) => {
                p.iter().copied().collect()
            }
            Self::Decimal { precision, scale } | Self::Numeric { precision, scale } => {
                precision.iter().chain(scale).copied().collect()
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(type {}", self.name())?;
        for parameter in self.parameters() {
            write!(f, " {parameter}")?;
        }
        f.write_str(")")
    }
}
