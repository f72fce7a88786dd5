//! Generic dialect.

use super::Dialect;

/// The default dialect: JSON embedded literals, comments enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert!(dialect.supports_comments());
        assert_eq!(dialect.max_nesting_depth(), 64);
    }

    #[test]
    fn test_embedded_literal_is_json() {
        let dialect = GenericDialect::new();
        let lit = dialect.parse_embedded_literal(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(lit, Literal::Embedded(serde_json::json!({"a": [1, 2]})));
        assert!(dialect.parse_embedded_literal("{a:").is_err());
    }
}
