//! Source location tracking for tokens and AST nodes.

use core::fmt;

use serde::Serialize;

/// A line/column location in the query text.
///
/// Both coordinates are 1-based. Ordering is line-major, column-minor, so
/// tokens produced by the lexer are sorted by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number (in characters), starting at 1.
    pub column: usize,
}

impl SourcePosition {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of any input.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 1)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
