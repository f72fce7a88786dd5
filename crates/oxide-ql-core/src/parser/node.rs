//! The intermediate parse tree.

use crate::lexer::{SourcePosition, Token, TokenType};

/// The kind of a parse tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseType {
    Atom,
    SelectList,
    SelectValue,
    Pivot,
    Distinct,
    Where,
    Group,
    GroupPartial,
    Having,
    Limit,
    Call,
    CallAgg,
    CallDistinctAgg,
    CallAggWildcard,
    ArgList,
    AsAlias,
    AtAlias,
    Unpivot,
    InnerJoin,
    LeftJoin,
    RightJoin,
    OuterJoin,
    Path,
    PathKey,
    PathParent,
    PathWildcard,
    PathUnpivot,
    Unary,
    Binary,
    Ternary,
    List,
    Struct,
    Member,
    Cast,
    Type,
    Case,
    When,
    Else,
    Bag,
}

/// A node of the parse tree.
///
/// Tokens are borrowed from the token slice being parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode<'t> {
    /// The node kind.
    pub kind: ParseType,
    /// The token the node was built from.
    pub token: Option<&'t Token>,
    /// The child nodes, in source order.
    pub children: Vec<ParseNode<'t>>,
}

impl<'t> ParseNode<'t> {
    /// Creates a node borrowing its token.
    #[must_use]
    pub const fn new(kind: ParseType, token: Option<&'t Token>, children: Vec<Self>) -> Self {
        Self {
            kind,
            token,
            children,
        }
    }

    /// Creates a childless node.
    #[must_use]
    pub const fn leaf(kind: ParseType, token: &'t Token) -> Self {
        Self::new(kind, Some(token), Vec::new())
    }

    /// Returns the token the node was built from.
    #[must_use]
    pub const fn token(&self) -> Option<&'t Token> {
        self.token
    }

    /// Returns the position of the node's token.
    #[must_use]
    pub fn position(&self) -> Option<SourcePosition> {
        self.token().and_then(|t| t.position)
    }

    /// Returns true if this is an atom built from a literal, `NULL` or
    /// `MISSING` token.
    #[must_use]
    pub fn is_literal_atom(&self) -> bool {
        self.kind == ParseType::Atom
            && self.token().is_some_and(|t| {
                matches!(
                    t.kind,
                    TokenType::Literal | TokenType::Null | TokenType::Missing
                )
            })
    }
}
