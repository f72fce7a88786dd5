//! Query parser.
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Parsing produces a [`ParseNode`] tree, which [`ParseNode::to_ast`] renders
//! into the AST.

mod error;
mod node;
mod parser;
pub mod pratt;
mod render;
mod select;

pub use error::{ParserError, ParserErrorKind};
pub use node::{ParseNode, ParseType};
pub use parser::Parser;
