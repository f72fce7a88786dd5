//! Abstract Syntax Tree (AST) types produced by the parser.
//!
//! Every type renders as an s-expression through `Display`, and serializes
//! through `serde`.

mod expression;
mod literal;
mod statement;
mod types;

pub use expression::{
    BinaryOp, CaseSensitivity, Expr, ExprKind, PathStep, SetQuantifier, StructField, UnaryOp,
    WhenBranch,
};
pub use literal::Literal;
pub use statement::{
    Alias, FromItem, FromSource, GroupBy, GroupKey, JoinKind, Projection, Select, SelectItem,
};
pub use types::{type_arity, DataType};
