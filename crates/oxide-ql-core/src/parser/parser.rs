//! Query parser implementation: expressions, terms and literals.

use tracing::trace;

use super::error::{ParserError, ParserErrorKind};
use super::node::{ParseNode, ParseType};
use crate::ast::{type_arity, Literal};
use crate::dialect::DEFAULT_MAX_NESTING_DEPTH;
use crate::lexer::{keywords, Token, TokenType};

/// Aggregate functions, which take exactly one argument.
const AGGREGATES: &[&str] = &["count", "sum", "avg", "min", "max"];

/// Reserved words that may be called like functions.
const KEYWORD_FUNCTIONS: &[&str] = &[
    "exists",
    "upper",
    "lower",
    "size",
    "substring",
    "trim",
    "coalesce",
    "nullif",
    "char_length",
    "character_length",
    "octet_length",
    "bit_length",
    "extract",
];

/// Query parser over a token slice.
///
/// The parser only moves forward: [`Parser::remaining`] is always a suffix
/// of the input and shrinks as productions consume tokens.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    /// Creates a new parser for the given tokens.
    #[must_use]
    pub const fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Sets how deeply expressions may nest.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the tokens not consumed yet, without the trailing EOF token.
    #[must_use]
    pub fn remaining(&self) -> &'t [Token] {
        let tokens = self.tokens;
        let end = match tokens.last() {
            Some(last) if last.is_eof() => tokens.len() - 1,
            _ => tokens.len(),
        };
        &tokens[self.pos.min(end)..end]
    }

    /// Parses a complete statement: one expression, an optional `;`, and
    /// nothing else.
    ///
    /// # Errors
    ///
    /// Returns a `ParserError` if the tokens do not form a single expression.
    pub fn parse_statement(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let node = self.parse_expression(-1, &[])?;
        if self.check(TokenType::Semicolon) {
            self.advance();
        }
        if let Some(token) = self.peek() {
            return Err(ParserError::unexpected("end of statement", Some(token)));
        }
        Ok(node)
    }

    /// Parses an expression by precedence climbing.
    ///
    /// Infix operators are folded in while their precedence is greater than
    /// `precedence`. Tokens whose type is in `boundary` are never consumed as
    /// infix operators or path steps, so the expression ends in front of them.
    ///
    /// # Errors
    ///
    /// Returns a `ParserError` if no expression starts at the current token.
    pub fn parse_expression(
        &mut self,
        precedence: i32,
        boundary: &[TokenType],
    ) -> Result<ParseNode<'t>, ParserError> {
        self.nested(|parser| parser.parse_infix(precedence, boundary))
    }

    fn parse_infix(
        &mut self,
        precedence: i32,
        boundary: &[TokenType],
    ) -> Result<ParseNode<'t>, ParserError> {
        let mut left = self.parse_unary(boundary)?;

        while let Some(op) = self.peek() {
            if boundary.contains(&op.kind) {
                break;
            }
            let Some(op_precedence) = op.infix_precedence() else {
                break;
            };
            if op_precedence <= precedence {
                break;
            }
            self.advance();

            left = match op.keyword_text() {
                Some("between" | "not_between") => {
                    let low = self.parse_expression(op_precedence, boundary)?;
                    self.expect_keyword("and")?;
                    let high = self.parse_expression(op_precedence, boundary)?;
                    ParseNode::new(ParseType::Ternary, Some(op), vec![left, low, high])
                }
                Some("like" | "not_like") => {
                    let pattern = self.parse_expression(op_precedence, boundary)?;
                    if self.check_keyword("escape") {
                        self.advance();
                        let escape = self.parse_expression(op_precedence, boundary)?;
                        ParseNode::new(ParseType::Ternary, Some(op), vec![left, pattern, escape])
                    } else {
                        ParseNode::new(ParseType::Binary, Some(op), vec![left, pattern])
                    }
                }
                Some("is" | "is_not") => {
                    let data_type = self.parse_type()?;
                    ParseNode::new(ParseType::Binary, Some(op), vec![left, data_type])
                }
                _ => {
                    let right = self.parse_expression(op_precedence, boundary)?;
                    ParseNode::new(ParseType::Binary, Some(op), vec![left, right])
                }
            };
        }

        Ok(left)
    }

    /// Parses a unary operator applied to a unary term, or a term followed by
    /// path steps.
    fn parse_unary(&mut self, boundary: &[TokenType]) -> Result<ParseNode<'t>, ParserError> {
        if let Some(op) = self.peek().filter(|t| t.is_unary_operator()) {
            self.advance();
            let operand = self.nested(|parser| parser.parse_unary(boundary))?;
            return Ok(ParseNode::new(ParseType::Unary, Some(op), vec![operand]));
        }

        let term = self.parse_term()?;
        self.parse_path(term, boundary)
    }

    /// Parses the path steps following `root`.
    fn parse_path(
        &mut self,
        root: ParseNode<'t>,
        boundary: &[TokenType],
    ) -> Result<ParseNode<'t>, ParserError> {
        let mut steps = Vec::new();

        while let Some(token) = self.peek() {
            if boundary.contains(&token.kind) {
                break;
            }
            match token.kind {
                TokenType::Dot => {
                    self.advance();
                    while self.check(TokenType::Dot) {
                        let dot = self.advance();
                        steps.push(ParseNode::new(ParseType::PathParent, dot, Vec::new()));
                    }
                    steps.push(self.parse_dot_step()?);
                }
                TokenType::LeftBracket => {
                    self.advance();
                    if self.check(TokenType::Star)
                        && self.peek_nth(1).is_some_and(|t| t.kind == TokenType::RightBracket)
                    {
                        let star = self.advance();
                        self.advance();
                        steps.push(ParseNode::new(ParseType::PathWildcard, star, Vec::new()));
                    } else {
                        let index = self.parse_expression(-1, &[TokenType::RightBracket])?;
                        self.expect(TokenType::RightBracket)?;
                        steps.push(index);
                    }
                }
                _ => break,
            }
        }

        if steps.is_empty() {
            return Ok(root);
        }
        let token = root.token;
        let mut children = Vec::with_capacity(steps.len() + 1);
        children.push(root);
        children.extend(steps);
        Ok(ParseNode {
            kind: ParseType::Path,
            token,
            children,
        })
    }

    /// Parses the step after a `.`: a name becomes a key, `*` unpivots.
    ///
    /// Keywords are accepted as case-insensitive keys unless the lexer may
    /// have respelled them.
    fn parse_dot_step(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let token = self.peek();
        match token {
            Some(t)
                if matches!(t.kind, TokenType::Identifier | TokenType::QuotedIdentifier)
                    || (t.kind == TokenType::Keyword
                        && !t.text.as_deref().is_some_and(keywords::is_respelled)) =>
            {
                Ok(ParseNode::new(ParseType::PathKey, self.advance(), Vec::new()))
            }
            Some(t) if t.kind == TokenType::Star => {
                Ok(ParseNode::new(ParseType::PathUnpivot, self.advance(), Vec::new()))
            }
            _ => Err(ParserError::new(
                ParserErrorKind::InvalidPathComponent,
                "expected a name or '*' after '.' in path",
                token.or_else(|| self.end_token()),
            )),
        }
    }

    /// Parses a term: a literal, variable, call, collection, or keyword-led
    /// production.
    fn parse_term(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let Some(token) = self.peek() else {
            return Err(ParserError::new(
                ParserErrorKind::ExpectedExpression,
                "expected an expression, found end of input",
                self.end_token(),
            ));
        };

        match token.kind {
            TokenType::LeftParen => self.parse_paren_group(),
            TokenType::LeftBracket => {
                self.parse_sequence(ParseType::List, TokenType::RightBracket)
            }
            TokenType::LeftDoubleAngle => {
                self.parse_sequence(ParseType::Bag, TokenType::RightDoubleAngle)
            }
            TokenType::LeftCurly => self.parse_struct(),
            TokenType::Identifier
                if self.peek_nth(1).is_some_and(|t| t.kind == TokenType::LeftParen) =>
            {
                self.parse_call()
            }
            TokenType::Identifier
            | TokenType::QuotedIdentifier
            | TokenType::Literal
            | TokenType::Null
            | TokenType::Missing => {
                self.advance();
                Ok(ParseNode::leaf(ParseType::Atom, token))
            }
            TokenType::Keyword => self.parse_keyword_term(token),
            _ => Err(ParserError::new(
                ParserErrorKind::ExpectedExpression,
                format!("expected an expression, found {token}"),
                Some(token),
            )),
        }
    }

    fn parse_keyword_term(&mut self, token: &'t Token) -> Result<ParseNode<'t>, ParserError> {
        let keyword = token.keyword_text().unwrap_or_default();
        let called = self
            .peek_nth(1)
            .is_some_and(|t| t.kind == TokenType::LeftParen);

        match keyword {
            "case" => self.parse_case(),
            "cast" => self.parse_cast(),
            "select" => self.parse_select(),
            "pivot" => self.parse_pivot(),
            "values" => self.parse_values(),
            k if called && AGGREGATES.contains(&k) => self.parse_aggregate(),
            k if called && KEYWORD_FUNCTIONS.contains(&k) => self.parse_call(),
            _ => Err(ParserError::unexpected("expression", Some(token))),
        }
    }

    /// Parses `( ... )`: one item is a grouped expression, several form a
    /// list.
    fn parse_paren_group(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let open = self.advance_required()?;
        if self.check(TokenType::RightParen) {
            return Err(ParserError::new(
                ParserErrorKind::ExpectedExpression,
                "expected an expression inside parentheses",
                self.peek(),
            ));
        }

        let mut items = self.parse_items(TokenType::RightParen)?;
        self.expect(TokenType::RightParen)?;

        if items.len() == 1 {
            if let Some(item) = items.pop() {
                return Ok(item);
            }
        }
        Ok(ParseNode::new(ParseType::List, Some(open), items))
    }

    /// Parses a possibly empty, comma separated sequence up to `close`.
    fn parse_sequence(
        &mut self,
        kind: ParseType,
        close: TokenType,
    ) -> Result<ParseNode<'t>, ParserError> {
        let open = self.advance_required()?;
        let items = if self.check(close) {
            Vec::new()
        } else {
            self.parse_items(close)?
        };
        self.expect(close)?;
        Ok(ParseNode::new(kind, Some(open), items))
    }

    /// Parses `expr, expr, ...` stopping in front of `close`.
    pub(super) fn parse_items(
        &mut self,
        close: TokenType,
    ) -> Result<Vec<ParseNode<'t>>, ParserError> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_expression(-1, &[TokenType::Comma, close])?);
            if !self.check(TokenType::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    /// Parses `{name: value, ...}`.
    fn parse_struct(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let open = self.advance_required()?;
        let mut members = Vec::new();

        if !self.check(TokenType::RightCurly) {
            loop {
                let name = self.parse_expression(-1, &[TokenType::Colon])?;
                let colon = self.expect(TokenType::Colon)?;
                let value =
                    self.parse_expression(-1, &[TokenType::Comma, TokenType::RightCurly])?;
                members.push(ParseNode::new(
                    ParseType::Member,
                    Some(colon),
                    vec![name, value],
                ));
                if !self.check(TokenType::Comma) {
                    break;
                }
                self.advance();
            }
        }

        self.expect(TokenType::RightCurly)?;
        Ok(ParseNode::new(ParseType::Struct, Some(open), members))
    }

    /// Parses `name(arg, ...)`.
    fn parse_call(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let name = self.advance_required()?;
        self.expect(TokenType::LeftParen)?;
        let args = if self.check(TokenType::RightParen) {
            Vec::new()
        } else {
            self.parse_items(TokenType::RightParen)?
        };
        self.expect(TokenType::RightParen)?;
        Ok(ParseNode::new(ParseType::Call, Some(name), args))
    }

    /// Parses `agg([ALL | DISTINCT] expr)` and `COUNT(*)`.
    fn parse_aggregate(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let name = self.advance_required()?;
        self.expect(TokenType::LeftParen)?;

        if name.is_keyword("count")
            && self.check(TokenType::Star)
            && self.peek_nth(1).is_some_and(|t| t.kind == TokenType::RightParen)
        {
            self.advance();
            self.advance();
            return Ok(ParseNode::leaf(ParseType::CallAggWildcard, name));
        }

        let kind = if self.check_keyword("distinct") {
            self.advance();
            ParseType::CallDistinctAgg
        } else {
            if self.check_keyword("all") {
                self.advance();
            }
            ParseType::CallAgg
        };

        if self.check(TokenType::RightParen) {
            return Err(ParserError::new(
                ParserErrorKind::InvalidArgumentCount,
                "aggregate functions take exactly one argument",
                Some(name),
            ));
        }
        let arg = self.parse_expression(-1, &[TokenType::Comma, TokenType::RightParen])?;
        if self.check(TokenType::Comma) {
            return Err(ParserError::new(
                ParserErrorKind::InvalidArgumentCount,
                "aggregate functions take exactly one argument",
                Some(name),
            ));
        }
        self.expect(TokenType::RightParen)?;
        Ok(ParseNode::new(kind, Some(name), vec![arg]))
    }

    /// Parses a simple or searched CASE expression.
    fn parse_case(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let case = self.advance_required()?;
        let mut children = Vec::with_capacity(2);

        if !self.check_keyword("when") {
            children.push(self.parse_expression(-1, &[])?);
        }

        let mut clauses = Vec::new();
        while self.check_keyword("when") {
            let when = self.advance();
            let condition = self.parse_expression(-1, &[])?;
            self.expect_keyword("then")?;
            let result = self.parse_expression(-1, &[])?;
            clauses.push(ParseNode::new(
                ParseType::When,
                when,
                vec![condition, result],
            ));
        }
        if clauses.is_empty() {
            return Err(ParserError::new(
                ParserErrorKind::ExpectedWhenClause,
                "expected a WHEN clause in CASE",
                self.peek().or_else(|| self.end_token()),
            ));
        }

        if self.check_keyword("else") {
            let else_token = self.advance();
            let default = self.parse_expression(-1, &[])?;
            clauses.push(ParseNode::new(ParseType::Else, else_token, vec![default]));
        }
        self.expect_keyword("end")?;

        children.push(ParseNode::new(ParseType::ArgList, None, clauses));
        Ok(ParseNode::new(ParseType::Case, Some(case), children))
    }

    /// Parses `CAST(expr AS type)`.
    fn parse_cast(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let cast = self.advance_required()?;
        self.expect(TokenType::LeftParen)?;
        let value = self.parse_expression(-1, &[TokenType::As])?;
        self.expect(TokenType::As)?;
        let data_type = self.parse_type()?;
        self.expect(TokenType::RightParen)?;
        Ok(ParseNode::new(ParseType::Cast, Some(cast), vec![value, data_type]))
    }

    /// Parses a type name with optional parameters, checking them against the
    /// type's arity.
    pub(super) fn parse_type(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let token = self.peek();
        let arity = token
            .and_then(Token::keyword_text)
            .and_then(type_arity)
            .ok_or_else(|| {
                ParserError::new(
                    ParserErrorKind::ExpectedTypeName,
                    format!(
                        "expected a type name, found {}",
                        token.map_or_else(|| String::from("end of input"), ToString::to_string)
                    ),
                    token.or_else(|| self.end_token()),
                )
            })?;
        let name = self.advance_required()?;

        let mut parameters = Vec::new();
        if self.check(TokenType::LeftParen) {
            self.advance();
            parameters = self.parse_items(TokenType::RightParen)?;
            self.expect(TokenType::RightParen)?;
        }

        if let Some(bad) = parameters.iter().find(|p| !is_unsigned_integer(p)) {
            return Err(ParserError::new(
                ParserErrorKind::InvalidTypeParameter,
                "type parameters must be unsigned integer literals",
                bad.token().or(Some(name)),
            ));
        }
        if !arity.contains(&parameters.len()) {
            return Err(ParserError::new(
                ParserErrorKind::CastArity,
                format!(
                    "incorrect arity for type {}: expected {} to {} parameters, found {}",
                    name.keyword_text().unwrap_or_default(),
                    arity.start(),
                    arity.end(),
                    parameters.len()
                ),
                Some(name),
            ));
        }

        Ok(ParseNode::new(ParseType::Type, Some(name), parameters))
    }

    /// Parses `VALUES (row), (row), ...` into a bag of lists.
    fn parse_values(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let values = self.advance_required()?;
        let mut rows = Vec::new();
        loop {
            let open = self.expect(TokenType::LeftParen)?;
            let items = self.parse_items(TokenType::RightParen)?;
            self.expect(TokenType::RightParen)?;
            rows.push(ParseNode::new(ParseType::List, Some(open), items));
            if !self.check(TokenType::Comma) {
                break;
            }
            self.advance();
        }
        Ok(ParseNode::new(ParseType::Bag, Some(values), rows))
    }

    // --- Helper methods ---

    /// Runs `parse` one nesting level deeper, failing past the depth limit.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        if self.depth >= self.max_depth {
            trace!(depth = self.depth, "nesting limit reached");
            return Err(ParserError::new(
                ParserErrorKind::NestingTooDeep,
                format!("expression nesting exceeds {} levels", self.max_depth),
                self.peek().or_else(|| self.end_token()),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Returns the current token, or `None` at the end of input.
    pub(super) fn peek(&self) -> Option<&'t Token> {
        self.peek_nth(0)
    }

    /// Returns the token `n` positions ahead, or `None` past the end of input.
    pub(super) fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + n).filter(|t| !t.is_eof())
    }

    /// Returns the EOF token (or the last token) for errors at end of input.
    pub(super) fn end_token(&self) -> Option<&'t Token> {
        self.tokens.last()
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Consumes the current token, which the caller has already inspected.
    pub(super) fn advance_required(&mut self) -> Result<&'t Token, ParserError> {
        self.advance().ok_or_else(|| {
            ParserError::new(
                ParserErrorKind::UnexpectedToken,
                "unexpected end of input",
                self.end_token(),
            )
        })
    }

    /// Checks if the current token has the given type.
    pub(super) fn check(&self, kind: TokenType) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Expects the current token to have the given type.
    pub(super) fn expect(&mut self, kind: TokenType) -> Result<&'t Token, ParserError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            found => Err(ParserError::expected_type(
                kind,
                found.or_else(|| self.end_token()),
            )),
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: &str) -> Result<&'t Token, ParserError> {
        match self.peek() {
            Some(token) if token.is_keyword(keyword) => {
                self.pos += 1;
                Ok(token)
            }
            found => Err(ParserError::expected_keyword(
                keyword,
                found.or_else(|| self.end_token()),
            )),
        }
    }

    /// Expects and returns an identifier token.
    pub(super) fn expect_identifier(&mut self) -> Result<&'t Token, ParserError> {
        match self.peek() {
            Some(token)
                if matches!(
                    token.kind,
                    TokenType::Identifier | TokenType::QuotedIdentifier
                ) =>
            {
                self.pos += 1;
                Ok(token)
            }
            found => Err(ParserError::expected_type(
                TokenType::Identifier,
                found.or_else(|| self.end_token()),
            )),
        }
    }
}

fn is_unsigned_integer(node: &ParseNode<'_>) -> bool {
    node.kind == ParseType::Atom
        && node
            .token()
            .and_then(|t| t.value.as_ref())
            .and_then(Literal::as_integer)
            .is_some_and(|n| n >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn with_parser<T>(source: &str, f: impl FnOnce(&mut Parser<'_>) -> T) -> T {
        let tokens = tokenize(source).unwrap();
        let mut parser = Parser::new(&tokens);
        f(&mut parser)
    }

    fn kind_of(source: &str) -> ParseType {
        with_parser(source, |p| p.parse_statement().unwrap().kind)
    }

    #[test]
    fn test_boundary_stops_expression() {
        with_parser("a + b, c", |p| {
            let node = p.parse_expression(-1, &[TokenType::Comma]).unwrap();
            assert_eq!(node.kind, ParseType::Binary);
            assert_eq!(p.remaining()[0].kind, TokenType::Comma);
            assert_eq!(p.remaining().len(), 2);
        });
    }

    #[test]
    fn test_boundary_stops_path_steps() {
        with_parser("a.b [1]", |p| {
            let node = p.parse_expression(-1, &[TokenType::LeftBracket]).unwrap();
            assert_eq!(node.kind, ParseType::Path);
            assert_eq!(node.children.len(), 2);
            assert_eq!(p.remaining()[0].kind, TokenType::LeftBracket);
        });
    }

    #[test]
    fn test_precedence_argument_stops_climb() {
        with_parser("a * b + c", |p| {
            let node = p.parse_expression(50, &[]).unwrap();
            assert_eq!(node.kind, ParseType::Binary);
            assert!(p.remaining()[0].is_keyword("+"));
        });
    }

    #[test]
    fn test_remaining_is_empty_after_statement() {
        with_parser("f(a, b);", |p| {
            p.parse_statement().unwrap();
            assert!(p.remaining().is_empty());
        });
    }

    #[test]
    fn test_paren_group_shapes() {
        assert_eq!(kind_of("(a)"), ParseType::Atom);
        assert_eq!(kind_of("(a, b)"), ParseType::List);
        assert_eq!(kind_of("[]"), ParseType::List);
        assert_eq!(kind_of("<<1>>"), ParseType::Bag);
        assert_eq!(kind_of("{'a': 1}"), ParseType::Struct);
    }

    #[test]
    fn test_term_kinds() {
        assert_eq!(kind_of("f(1)"), ParseType::Call);
        assert_eq!(kind_of("upper('a')"), ParseType::Call);
        assert_eq!(kind_of("count(*)"), ParseType::CallAggWildcard);
        assert_eq!(kind_of("sum(DISTINCT x)"), ParseType::CallDistinctAgg);
        assert_eq!(kind_of("-a"), ParseType::Unary);
        assert_eq!(kind_of("a BETWEEN 1 AND 2"), ParseType::Ternary);
        assert_eq!(kind_of("a LIKE 'x' ESCAPE '!'"), ParseType::Ternary);
        assert_eq!(kind_of("CASE WHEN a THEN 1 END"), ParseType::Case);
        assert_eq!(kind_of("VALUES (1, 2), (3, 4)"), ParseType::Bag);
    }

    #[test]
    fn test_path_key_keeps_name_token() {
        with_parser("a.\"B\"", |p| {
            let node = p.parse_statement().unwrap();
            let key = &node.children[1];
            assert_eq!(key.kind, ParseType::PathKey);
            let token = key.token().unwrap();
            assert_eq!(token.kind, TokenType::QuotedIdentifier);
            assert_eq!(token.position, Some(crate::lexer::SourcePosition::new(1, 3)));
        });
    }

    #[test]
    fn test_repeated_dots_add_parent_steps() {
        with_parser("a...b", |p| {
            let node = p.parse_statement().unwrap();
            let kinds: Vec<_> = node.children.iter().map(|c| c.kind).collect();
            assert_eq!(
                kinds,
                vec![
                    ParseType::Atom,
                    ParseType::PathParent,
                    ParseType::PathParent,
                    ParseType::PathKey,
                ]
            );
        });
    }

    #[test]
    fn test_keyword_path_keys() {
        assert_eq!(kind_of("x.value"), ParseType::Path);
        assert_eq!(kind_of("t.date"), ParseType::Path);
        with_parser("x.int", |p| {
            let err = p.parse_statement().unwrap_err();
            assert_eq!(err.kind, ParserErrorKind::InvalidPathComponent);
        });
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        let tokens = tokenize(&deep).unwrap();

        let err = Parser::new(&tokens)
            .with_max_depth(5)
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::NestingTooDeep);

        assert!(Parser::new(&tokens).parse_statement().is_ok());
    }
}
