//! Query dialect support.
//!
//! A dialect bundles the configurable parts of the front end: how embedded
//! literal blocks are parsed, whether comments are accepted, and how deeply
//! expressions may nest.

mod generic;

pub use generic::GenericDialect;

use crate::ast::Literal;

/// Default limit on expression nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Trait for dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Parses the body of a back-tick delimited literal block.
    ///
    /// The default accepts JSON text.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if `text` is not a valid value.
    fn parse_embedded_literal(&self, text: &str) -> Result<Literal, String> {
        serde_json::from_str(text)
            .map(Literal::Embedded)
            .map_err(|e| e.to_string())
    }

    /// Returns whether `--` and `/* */` comments are skipped.
    fn supports_comments(&self) -> bool {
        true
    }

    /// Returns how deeply terms may nest before parsing is abandoned.
    fn max_nesting_depth(&self) -> usize {
        DEFAULT_MAX_NESTING_DEPTH
    }
}
