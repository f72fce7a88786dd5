//! SELECT and PIVOT clause grammar.

use super::error::{ParserError, ParserErrorKind};
use super::node::{ParseNode, ParseType};
use super::parser::Parser;
use super::pratt::SET_OPERATOR_PRECEDENCE;
use crate::lexer::{Token, TokenType};

impl<'t> Parser<'t> {
    /// Parses a SELECT query.
    ///
    /// The node is `SelectList` or `SelectValue`; its first child is the
    /// projection (wrapped in `Distinct` when requested), the second is the
    /// FROM source, followed by the clauses present.
    pub(super) fn parse_select(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let select = self.expect_keyword("select")?;

        let distinct = if self.check_keyword("distinct") {
            self.advance()
        } else {
            if self.check_keyword("all") {
                self.advance();
            }
            None
        };

        let (kind, mut projection) = if self.check_keyword("value") {
            self.advance();
            let value = self.parse_expression(SET_OPERATOR_PRECEDENCE, &[])?;
            (ParseType::SelectValue, value)
        } else if self.check(TokenType::Star) {
            let star = self.advance_required()?;
            (ParseType::SelectList, ParseNode::leaf(ParseType::Atom, star))
        } else {
            let items = self.parse_select_items()?;
            (
                ParseType::SelectList,
                ParseNode::new(ParseType::ArgList, None, items),
            )
        };

        if let Some(distinct) = distinct {
            projection = ParseNode::new(ParseType::Distinct, Some(distinct), vec![projection]);
        }

        let mut children = vec![projection];
        children.extend(self.parse_query_body()?);
        Ok(ParseNode::new(kind, Some(select), children))
    }

    /// Parses `PIVOT value AT name FROM ...`.
    pub(super) fn parse_pivot(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let pivot = self.expect_keyword("pivot")?;
        let value = self.parse_expression(SET_OPERATOR_PRECEDENCE, &[TokenType::At])?;
        let at = self.expect(TokenType::At)?;
        let name = self.parse_expression(SET_OPERATOR_PRECEDENCE, &[])?;
        let member = ParseNode::new(ParseType::Member, Some(at), vec![name, value]);

        let mut children = vec![member];
        children.extend(self.parse_query_body()?);
        Ok(ParseNode::new(ParseType::Pivot, Some(pivot), children))
    }

    fn parse_select_items(&mut self) -> Result<Vec<ParseNode<'t>>, ParserError> {
        let mut items = Vec::new();
        loop {
            let expr =
                self.parse_expression(SET_OPERATOR_PRECEDENCE, &[TokenType::Comma, TokenType::As])?;
            items.push(self.parse_optional_alias(expr, true)?);
            if !self.check(TokenType::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    /// Parses the FROM clause and the optional clauses after it.
    fn parse_query_body(&mut self) -> Result<Vec<ParseNode<'t>>, ParserError> {
        if !self.check_keyword("from") {
            return Err(ParserError::new(
                ParserErrorKind::MissingFromClause,
                "expected FROM clause",
                self.peek().or_else(|| self.end_token()),
            ));
        }
        self.advance();

        let mut body = vec![self.parse_from_source()?];

        if self.check_keyword("where") {
            let token = self.advance();
            let condition = self.parse_expression(SET_OPERATOR_PRECEDENCE, &[])?;
            body.push(ParseNode::new(ParseType::Where, token, vec![condition]));
        }
        if self.check_keyword("group") {
            body.push(self.parse_group_by()?);
        }
        if self.check_keyword("having") {
            let token = self.advance();
            let condition = self.parse_expression(SET_OPERATOR_PRECEDENCE, &[])?;
            body.push(ParseNode::new(ParseType::Having, token, vec![condition]));
        }
        if self.check_keyword("limit") {
            let token = self.advance();
            let count = self.parse_expression(SET_OPERATOR_PRECEDENCE, &[])?;
            body.push(ParseNode::new(ParseType::Limit, token, vec![count]));
        }

        Ok(body)
    }

    /// Parses FROM items joined by commas or JOIN keywords, left-associatively.
    fn parse_from_source(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let mut source = self.parse_from_item()?;

        loop {
            let Some(token) = self.peek() else { break };
            let kind = match (token.kind, token.keyword_text()) {
                (TokenType::Comma, _) => ParseType::InnerJoin,
                (_, Some("join" | "inner_join" | "cross_join")) => ParseType::InnerJoin,
                (_, Some("left_join")) => ParseType::LeftJoin,
                (_, Some("right_join")) => ParseType::RightJoin,
                (_, Some("outer_join")) => ParseType::OuterJoin,
                _ => break,
            };
            self.advance();

            let right = self.parse_from_item()?;
            let mut children = vec![source, right];
            if self.check_keyword("on") {
                self.advance();
                children.push(self.parse_expression(SET_OPERATOR_PRECEDENCE, &[])?);
            } else if kind != ParseType::InnerJoin {
                return Err(ParserError::expected_keyword(
                    "on",
                    self.peek().or_else(|| self.end_token()),
                ));
            }
            source = ParseNode::new(kind, Some(token), children);
        }

        Ok(source)
    }

    /// Parses `[UNPIVOT] expr [[AS] alias] [AT alias]`.
    fn parse_from_item(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let unpivot = if self.check_keyword("unpivot") {
            self.advance()
        } else {
            None
        };

        let mut item = self.parse_expression(
            SET_OPERATOR_PRECEDENCE,
            &[TokenType::As, TokenType::At, TokenType::Comma],
        )?;
        if unpivot.is_some() {
            item = ParseNode::new(ParseType::Unpivot, unpivot, vec![item]);
        }

        item = self.parse_optional_alias(item, true)?;

        if self.check(TokenType::At) {
            self.advance();
            let alias = self.expect_identifier()?;
            item = ParseNode::new(ParseType::AtAlias, Some(alias), vec![item]);
        }

        Ok(item)
    }

    /// Parses `GROUP [PARTIAL] BY key, ... [GROUP AS name]`.
    fn parse_group_by(&mut self) -> Result<ParseNode<'t>, ParserError> {
        let group = self.expect_keyword("group")?;
        let kind = if self.check_keyword("partial") {
            self.advance();
            ParseType::GroupPartial
        } else {
            ParseType::Group
        };
        self.expect_keyword("by")?;

        let mut keys = Vec::new();
        loop {
            let key =
                self.parse_expression(SET_OPERATOR_PRECEDENCE, &[TokenType::Comma, TokenType::As])?;
            if key.is_literal_atom() {
                return Err(ParserError::new(
                    ParserErrorKind::UnsupportedLiteralsInGroupBy,
                    "literals are not supported in GROUP BY",
                    key.token(),
                ));
            }
            keys.push(self.parse_optional_alias(key, false)?);
            if !self.check(TokenType::Comma) {
                break;
            }
            self.advance();
        }

        let mut children = vec![ParseNode::new(ParseType::ArgList, None, keys)];

        if self.check_keyword("group")
            && self.peek_nth(1).is_some_and(|t| t.kind == TokenType::As)
        {
            self.advance();
            self.advance();
            let name = self.expect_identifier()?;
            children.push(ParseNode::leaf(ParseType::Atom, name));
        }

        Ok(ParseNode::new(kind, Some(group), children))
    }

    /// Wraps `expr` in an `AsAlias` node when `AS name` (or, if `bare` is set,
    /// a bare name) follows.
    fn parse_optional_alias(
        &mut self,
        expr: ParseNode<'t>,
        bare: bool,
    ) -> Result<ParseNode<'t>, ParserError> {
        let alias: Option<&'t Token> = if self.check(TokenType::As) {
            self.advance();
            Some(self.expect_identifier()?)
        } else if bare
            && self.peek().is_some_and(|t| {
                matches!(
                    t.kind,
                    TokenType::Identifier | TokenType::QuotedIdentifier
                )
            })
        {
            self.advance()
        } else {
            None
        };

        Ok(match alias {
            Some(alias) => ParseNode::new(ParseType::AsAlias, Some(alias), vec![expr]),
            None => expr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_tree(source: &str, check: impl FnOnce(&ParseNode<'_>)) {
        let tokens = tokenize(source).unwrap();
        let node = Parser::new(&tokens).parse_statement().unwrap();
        check(&node);
    }

    fn kinds(nodes: &[ParseNode<'_>]) -> Vec<ParseType> {
        nodes.iter().map(|n| n.kind).collect()
    }

    #[test]
    fn test_select_list_shape() {
        parse_tree(
            "SELECT a, b AS c FROM t WHERE x HAVING y LIMIT 1",
            |node| {
                assert_eq!(node.kind, ParseType::SelectList);
                assert_eq!(
                    kinds(&node.children),
                    vec![
                        ParseType::ArgList,
                        ParseType::Atom,
                        ParseType::Where,
                        ParseType::Having,
                        ParseType::Limit,
                    ]
                );
                assert_eq!(
                    kinds(&node.children[0].children),
                    vec![ParseType::Atom, ParseType::AsAlias]
                );
            },
        );
    }

    #[test]
    fn test_distinct_wraps_projection() {
        parse_tree("SELECT DISTINCT VALUE a FROM t", |node| {
            assert_eq!(node.kind, ParseType::SelectValue);
            assert_eq!(node.children[0].kind, ParseType::Distinct);
        });
    }

    #[test]
    fn test_from_aliases_nest() {
        parse_tree("SELECT * FROM UNPIVOT s AS v AT k", |node| {
            let from = &node.children[1];
            assert_eq!(from.kind, ParseType::AtAlias);
            assert_eq!(from.children[0].kind, ParseType::AsAlias);
            assert_eq!(from.children[0].children[0].kind, ParseType::Unpivot);
        });
    }

    #[test]
    fn test_joins_are_left_associative() {
        parse_tree("SELECT * FROM a, b LEFT JOIN c ON x", |node| {
            let from = &node.children[1];
            assert_eq!(from.kind, ParseType::LeftJoin);
            assert_eq!(from.children.len(), 3);
            assert_eq!(from.children[0].kind, ParseType::InnerJoin);
        });
    }

    #[test]
    fn test_group_as_is_trailing_child() {
        parse_tree("SELECT * FROM t GROUP PARTIAL BY a AS k GROUP AS g", |node| {
            let group = &node.children[2];
            assert_eq!(group.kind, ParseType::GroupPartial);
            assert_eq!(kinds(&group.children), vec![ParseType::ArgList, ParseType::Atom]);
        });
    }

    #[test]
    fn test_missing_from() {
        let tokens = tokenize("SELECT a WHERE b").unwrap();
        let err = Parser::new(&tokens).parse_statement().unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::MissingFromClause);
    }

    #[test]
    fn test_outer_join_requires_on() {
        let tokens = tokenize("SELECT * FROM a RIGHT JOIN b").unwrap();
        let err = Parser::new(&tokens).parse_statement().unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::ExpectedKeyword);
    }

    #[test]
    fn test_literal_group_key_rejected() {
        let tokens = tokenize("SELECT * FROM t GROUP BY 1").unwrap();
        let err = Parser::new(&tokens).parse_statement().unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::UnsupportedLiteralsInGroupBy);
    }
}
