//! Rendering of parse trees into the AST.

use super::error::{ParserError, ParserErrorKind};
use super::node::{ParseNode, ParseType};
use super::pratt;
use crate::ast::{
    Alias, BinaryOp, CaseSensitivity, DataType, Expr, ExprKind, FromItem, FromSource, GroupBy,
    GroupKey, JoinKind, Literal, PathStep, Projection, Select, SelectItem, SetQuantifier,
    StructField, UnaryOp, WhenBranch,
};
use crate::lexer::{Token, TokenType};

type RenderResult<T> = Result<T, ParserError>;

impl ParseNode<'_> {
    /// Renders this node into an AST expression.
    ///
    /// Every produced node carries the position of the token it was built
    /// from.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedExpression` error if the tree does not have the
    /// shape its node kinds require. Trees built by [`super::Parser`] always
    /// do.
    pub fn to_ast(&self) -> RenderResult<Expr> {
        let meta = self.position();
        let kind = match self.kind {
            ParseType::Atom => self.render_atom()?,
            ParseType::Path => self.render_path()?,
            ParseType::Call => ExprKind::Call {
                name: self.name()?,
                args: render_all(&self.children)?,
            },
            ParseType::CallAgg | ParseType::CallDistinctAgg => ExprKind::CallAgg {
                name: self.name()?,
                quantifier: if self.kind == ParseType::CallDistinctAgg {
                    SetQuantifier::Distinct
                } else {
                    SetQuantifier::All
                },
                arg: Box::new(self.only_child()?.to_ast()?),
            },
            ParseType::CallAggWildcard => ExprKind::CallAggWildcard { name: self.name()? },
            ParseType::Unary => {
                let op = self
                    .operator()
                    .and_then(pratt::unary_op)
                    .ok_or_else(|| self.malformed("unknown unary operator"))?;
                ExprKind::Unary {
                    op,
                    operand: Box::new(self.only_child()?.to_ast()?),
                }
            }
            ParseType::Binary | ParseType::Ternary => return self.render_operator(),
            ParseType::List => ExprKind::List(render_all(&self.children)?),
            ParseType::Bag => ExprKind::Bag(render_all(&self.children)?),
            ParseType::Struct => ExprKind::Struct(
                self.children
                    .iter()
                    .map(ParseNode::render_member)
                    .collect::<RenderResult<_>>()?,
            ),
            ParseType::Cast => {
                let [value, data_type] = self.children.as_slice() else {
                    return Err(self.malformed("CAST needs a value and a type"));
                };
                ExprKind::Cast {
                    value: Box::new(value.to_ast()?),
                    data_type: Box::new(data_type.to_ast()?),
                }
            }
            ParseType::Type => ExprKind::Type(self.render_type()?),
            ParseType::Case => self.render_case()?,
            ParseType::SelectList | ParseType::SelectValue | ParseType::Pivot => {
                ExprKind::Select(Box::new(self.render_select()?))
            }
            ParseType::Distinct
            | ParseType::Where
            | ParseType::Group
            | ParseType::GroupPartial
            | ParseType::Having
            | ParseType::Limit
            | ParseType::ArgList
            | ParseType::AsAlias
            | ParseType::AtAlias
            | ParseType::Unpivot
            | ParseType::InnerJoin
            | ParseType::LeftJoin
            | ParseType::RightJoin
            | ParseType::OuterJoin
            | ParseType::PathKey
            | ParseType::PathParent
            | ParseType::PathWildcard
            | ParseType::PathUnpivot
            | ParseType::Member
            | ParseType::When
            | ParseType::Else => {
                return Err(self.malformed(&format!("{:?} is not an expression", self.kind)))
            }
        };
        Ok(Expr::new(kind, meta))
    }

    fn render_atom(&self) -> RenderResult<ExprKind> {
        let token = self.token().ok_or_else(|| self.malformed("atom without token"))?;
        match token.kind {
            TokenType::Literal => token
                .value
                .clone()
                .map(ExprKind::Lit)
                .ok_or_else(|| self.malformed("literal without value")),
            TokenType::Null => Ok(ExprKind::Lit(Literal::Null)),
            TokenType::Missing => Ok(ExprKind::Missing),
            TokenType::Identifier | TokenType::QuotedIdentifier => Ok(ExprKind::Id {
                name: token.text.clone().unwrap_or_default(),
                case: case_of(token),
            }),
            _ => Err(self.malformed("atom is not a value")),
        }
    }

    fn render_path(&self) -> RenderResult<ExprKind> {
        let (root, nodes) = self
            .children
            .split_first()
            .ok_or_else(|| self.malformed("path without root"))?;

        let mut steps: Vec<PathStep> = Vec::with_capacity(nodes.len());
        for step in nodes {
            let rendered = match step.kind {
                ParseType::PathKey => {
                    let token = step.token().ok_or_else(|| step.malformed("key without name"))?;
                    PathStep::Key {
                        name: step.name_text()?,
                        case: case_of(token),
                        meta: token.position,
                    }
                }
                ParseType::PathParent => {
                    if let Some(PathStep::Parent { levels, .. }) = steps.last_mut() {
                        *levels += 1;
                        continue;
                    }
                    PathStep::Parent {
                        levels: 1,
                        meta: step.position(),
                    }
                }
                ParseType::PathWildcard => PathStep::Wildcard(step.position()),
                ParseType::PathUnpivot => PathStep::Unpivot(step.position()),
                _ => PathStep::Expr(step.to_ast()?),
            };
            steps.push(rendered);
        }

        Ok(ExprKind::Path {
            root: Box::new(root.to_ast()?),
            steps,
        })
    }

    fn render_operator(&self) -> RenderResult<Expr> {
        let meta = self.position();
        let op = self
            .operator()
            .ok_or_else(|| self.malformed("operator without token"))?;

        if let Some(positive) = pratt::negated_operator(op) {
            let inner = Expr::new(self.render_operands(positive)?, meta);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(inner),
                },
                meta,
            ));
        }
        Ok(Expr::new(self.render_operands(op)?, meta))
    }

    fn render_operands(&self, op: &str) -> RenderResult<ExprKind> {
        match (op, self.children.as_slice()) {
            ("between", [value, low, high]) => Ok(ExprKind::Between {
                value: Box::new(value.to_ast()?),
                low: Box::new(low.to_ast()?),
                high: Box::new(high.to_ast()?),
            }),
            ("like", [value, pattern]) => Ok(ExprKind::Like {
                value: Box::new(value.to_ast()?),
                pattern: Box::new(pattern.to_ast()?),
                escape: None,
            }),
            ("like", [value, pattern, escape]) => Ok(ExprKind::Like {
                value: Box::new(value.to_ast()?),
                pattern: Box::new(pattern.to_ast()?),
                escape: Some(Box::new(escape.to_ast()?)),
            }),
            (op, [left, right]) => {
                let op: BinaryOp = pratt::binary_op(op)
                    .ok_or_else(|| self.malformed(&format!("unknown binary operator {op}")))?;
                Ok(ExprKind::Binary {
                    op,
                    left: Box::new(left.to_ast()?),
                    right: Box::new(right.to_ast()?),
                })
            }
            (op, _) => Err(self.malformed(&format!("wrong operand count for {op}"))),
        }
    }

    fn render_member(&self) -> RenderResult<StructField> {
        match (self.kind, self.children.as_slice()) {
            (ParseType::Member, [name, value]) => Ok(StructField {
                name: name.to_ast()?,
                value: value.to_ast()?,
            }),
            _ => Err(self.malformed("struct fields must be members")),
        }
    }

    fn render_type(&self) -> RenderResult<DataType> {
        let name = self
            .token()
            .and_then(Token::keyword_text)
            .ok_or_else(|| self.malformed("type without name"))?;
        let parameters = self
            .children
            .iter()
            .map(|p| {
                p.token()
                    .and_then(|t| t.value.as_ref())
                    .and_then(Literal::as_integer)
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| {
                        ParserError::new(
                            ParserErrorKind::InvalidTypeParameter,
                            "type parameter out of range",
                            p.token(),
                        )
                    })
            })
            .collect::<RenderResult<Vec<u32>>>()?;
        DataType::from_parts(name, &parameters).ok_or_else(|| {
            ParserError::new(
                ParserErrorKind::CastArity,
                format!("incorrect arity for type {name}"),
                self.token(),
            )
        })
    }

    fn render_case(&self) -> RenderResult<ExprKind> {
        match self.children.as_slice() {
            [value, clauses] => {
                let (branches, default) = clauses.render_case_clauses()?;
                Ok(ExprKind::SimpleCase {
                    value: Box::new(value.to_ast()?),
                    branches,
                    default,
                })
            }
            [clauses] => {
                let (branches, default) = clauses.render_case_clauses()?;
                Ok(ExprKind::SearchedCase { branches, default })
            }
            _ => Err(self.malformed("CASE needs one or two children")),
        }
    }

    fn render_case_clauses(&self) -> RenderResult<(Vec<WhenBranch>, Option<Box<Expr>>)> {
        let mut branches = Vec::new();
        let mut default = None;
        for clause in &self.children {
            match (clause.kind, clause.children.as_slice()) {
                (ParseType::When, [condition, result]) => branches.push(WhenBranch {
                    condition: condition.to_ast()?,
                    result: result.to_ast()?,
                }),
                (ParseType::Else, [result]) => default = Some(Box::new(result.to_ast()?)),
                _ => return Err(clause.malformed("expected WHEN or ELSE")),
            }
        }
        Ok((branches, default))
    }

    fn render_select(&self) -> RenderResult<Select> {
        let [projection, from, clauses @ ..] = self.children.as_slice() else {
            return Err(self.malformed("query needs a projection and a FROM source"));
        };

        let (distinct, projection) = if projection.kind == ParseType::Distinct {
            (true, projection.only_child()?)
        } else {
            (false, projection)
        };

        let projection = match self.kind {
            ParseType::SelectValue => Projection::Value(projection.to_ast()?),
            ParseType::Pivot => match (projection.kind, projection.children.as_slice()) {
                (ParseType::Member, [key, value]) => Projection::Pivot {
                    key: key.to_ast()?,
                    value: value.to_ast()?,
                },
                _ => return Err(projection.malformed("PIVOT needs a member")),
            },
            _ if projection.token().is_some_and(|t| t.kind == TokenType::Star) => Projection::Star,
            _ => Projection::List(
                projection
                    .children
                    .iter()
                    .map(|item| {
                        let (expr, alias) = item.strip_alias(ParseType::AsAlias)?;
                        Ok(SelectItem {
                            expr: expr.to_ast()?,
                            alias,
                        })
                    })
                    .collect::<RenderResult<_>>()?,
            ),
        };

        let mut select = Select {
            projection,
            distinct,
            from: from.render_from()?,
            where_clause: None,
            group_by: None,
            having: None,
            limit: None,
        };

        for clause in clauses {
            match clause.kind {
                ParseType::Where => select.where_clause = Some(clause.only_child()?.to_ast()?),
                ParseType::Group | ParseType::GroupPartial => {
                    select.group_by = Some(clause.render_group()?);
                }
                ParseType::Having => select.having = Some(clause.only_child()?.to_ast()?),
                ParseType::Limit => select.limit = Some(clause.only_child()?.to_ast()?),
                _ => return Err(clause.malformed("unexpected query clause")),
            }
        }

        Ok(select)
    }

    fn render_from(&self) -> RenderResult<FromSource> {
        let join = match self.kind {
            ParseType::InnerJoin => JoinKind::Inner,
            ParseType::LeftJoin => JoinKind::Left,
            ParseType::RightJoin => JoinKind::Right,
            ParseType::OuterJoin => JoinKind::Outer,
            _ => {
                let (item, unpivot) = self.render_from_item()?;
                return Ok(if unpivot {
                    FromSource::Unpivot(item)
                } else {
                    FromSource::Scan(item)
                });
            }
        };

        let (left, right, condition) = match self.children.as_slice() {
            [left, right] => (left, right, None),
            [left, right, condition] => (left, right, Some(condition.to_ast()?)),
            _ => return Err(self.malformed("join needs two sources")),
        };
        Ok(FromSource::Join {
            kind: join,
            left: Box::new(left.render_from()?),
            right: Box::new(right.render_from()?),
            condition,
        })
    }

    /// Renders a FROM item, returning whether it is an UNPIVOT.
    fn render_from_item(&self) -> RenderResult<(FromItem, bool)> {
        let (node, at_alias) = self.strip_alias(ParseType::AtAlias)?;
        let (node, as_alias) = node.strip_alias(ParseType::AsAlias)?;
        let (node, unpivot) = if node.kind == ParseType::Unpivot {
            (node.only_child()?, true)
        } else {
            (node, false)
        };
        Ok((
            FromItem {
                expr: node.to_ast()?,
                as_alias,
                at_alias,
            },
            unpivot,
        ))
    }

    fn render_group(&self) -> RenderResult<GroupBy> {
        let (keys, group_as) = match self.children.as_slice() {
            [keys] => (keys, None),
            [keys, name] => (keys, Some(name.alias()?)),
            _ => return Err(self.malformed("GROUP BY needs keys")),
        };
        let keys = keys
            .children
            .iter()
            .map(|key| {
                let (expr, alias) = key.strip_alias(ParseType::AsAlias)?;
                Ok(GroupKey {
                    expr: expr.to_ast()?,
                    alias,
                })
            })
            .collect::<RenderResult<_>>()?;
        Ok(GroupBy {
            partial: self.kind == ParseType::GroupPartial,
            keys,
            group_as,
        })
    }

    /// Unwraps an alias node of the given kind, returning the aliased node and
    /// the alias.
    fn strip_alias(&self, kind: ParseType) -> RenderResult<(&Self, Option<Alias>)> {
        if self.kind == kind {
            Ok((self.only_child()?, Some(self.alias()?)))
        } else {
            Ok((self, None))
        }
    }

    fn alias(&self) -> RenderResult<Alias> {
        Ok(Alias {
            name: self.name_text()?,
            meta: self.position(),
        })
    }

    fn only_child(&self) -> RenderResult<&Self> {
        match self.children.as_slice() {
            [child] => Ok(child),
            _ => Err(self.malformed("expected exactly one child")),
        }
    }

    fn operator(&self) -> Option<&str> {
        let token = self.token()?;
        if token.kind == TokenType::Star {
            Some("*")
        } else {
            token.keyword_text()
        }
    }

    /// The lowercased function name of a call node.
    fn name(&self) -> RenderResult<String> {
        self.token()
            .and_then(|t| t.text.as_deref())
            .map(str::to_lowercase)
            .ok_or_else(|| self.malformed("call without name"))
    }

    /// The identifier text of an alias or name node.
    fn name_text(&self) -> RenderResult<String> {
        self.token()
            .and_then(|t| t.text.clone())
            .ok_or_else(|| self.malformed("expected a name"))
    }

    fn malformed(&self, message: &str) -> ParserError {
        ParserError::new(ParserErrorKind::MalformedExpression, message, self.token())
    }
}

fn render_all(nodes: &[ParseNode<'_>]) -> RenderResult<Vec<Expr>> {
    nodes.iter().map(ParseNode::to_ast).collect()
}

fn case_of(token: &Token) -> CaseSensitivity {
    if token.kind == TokenType::QuotedIdentifier {
        CaseSensitivity::Sensitive
    } else {
        CaseSensitivity::Insensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, SourcePosition};
    use crate::parser::Parser;

    fn render(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        let node = Parser::new(&tokens).parse_statement().unwrap();
        node.to_ast().unwrap().to_string()
    }

    #[test]
    fn test_negated_operators_wrap_not() {
        assert_eq!(render("a NOT IN b"), "(not (in (id a) (id b)))");
        assert_eq!(render("a IS NOT NULL"), "(not (is (id a) (type null)))");
        assert_eq!(
            render("a NOT BETWEEN 1 AND 2"),
            "(not (between (id a) (lit 1) (lit 2)))"
        );
    }

    #[test]
    fn test_negated_operator_positions() {
        let tokens = tokenize("a NOT LIKE b").unwrap();
        let ast = Parser::new(&tokens).parse_statement().unwrap().to_ast().unwrap();
        let ExprKind::Unary { operand, .. } = &ast.kind else {
            panic!("expected unary");
        };
        assert_eq!(ast.meta, Some(SourcePosition::new(1, 3)));
        assert_eq!(operand.meta, ast.meta);
    }

    #[test]
    fn test_case_forms() {
        assert_eq!(
            render("CASE a WHEN 1 THEN 'x' ELSE 'y' END"),
            r#"(simple_case (id a) (when (lit 1) (lit "x")) (else (lit "y")))"#
        );
        assert_eq!(
            render("CASE WHEN a THEN 1 END"),
            "(searched_case (when (id a) (lit 1)))"
        );
    }

    #[test]
    fn test_struct_rejects_non_member() {
        let key = Token::literal(Literal::Integer(1.into()), None);
        let node = ParseNode::new(
            ParseType::Struct,
            None,
            vec![ParseNode::leaf(ParseType::Atom, &key)],
        );
        let err = node.to_ast().unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::MalformedExpression);
    }

    #[test]
    fn test_case_child_count_checked() {
        let node = ParseNode::new(ParseType::Case, None, Vec::new());
        let err = node.to_ast().unwrap_err();
        assert_eq!(err.kind, ParserErrorKind::MalformedExpression);
    }

    #[test]
    fn test_clause_node_is_not_expression() {
        let node = ParseNode::new(ParseType::Where, None, Vec::new());
        assert!(node.to_ast().is_err());
    }

    #[test]
    fn test_select_rendering() {
        assert_eq!(
            render("SELECT x.a AS b FROM t AS x AT i WHERE x.a > 1 LIMIT 10"),
            "(select (project (list (as b (path (id x) (lit \"a\"))))) \
             (from (at i (as x (id t)))) \
             (where (> (path (id x) (lit \"a\")) (lit 1))) (limit (lit 10)))"
        );
        assert_eq!(
            render("PIVOT v AT n FROM t"),
            "(pivot (member (id n) (id v)) (from (id t)))"
        );
    }
}
