//! Query AST types: SELECT and PIVOT.

use core::fmt;

use serde::Serialize;

use super::expression::{write_form, write_symbol, write_with_meta, Expr};
use crate::lexer::SourcePosition;

/// A name bound by `AS`, `AT` or `GROUP AS`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    /// The name as written (without quotes).
    pub name: String,
    /// Position of the name.
    pub meta: Option<SourcePosition>,
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_with_meta(f, self.meta, |f| write_symbol(f, &self.name))
    }
}

/// What a query produces for each input binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Projection {
    /// `SELECT *`
    Star,
    /// `SELECT a, b AS c`
    List(Vec<SelectItem>),
    /// `SELECT VALUE expr`
    Value(Expr),
    /// `PIVOT value AT key`
    Pivot {
        /// The attribute name of each produced field.
        key: Expr,
        /// The value of each produced field.
        value: Expr,
    },
}

/// An item of a projection list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectItem {
    /// The projected expression.
    pub expr: Expr,
    /// Alias (`AS name` or a bare name).
    pub alias: Option<Alias>,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JoinKind {
    /// `JOIN`, `INNER JOIN`, `CROSS JOIN` or a comma.
    Inner,
    /// `LEFT [OUTER] JOIN`.
    Left,
    /// `RIGHT [OUTER] JOIN`.
    Right,
    /// `FULL [OUTER] JOIN` or `OUTER JOIN`.
    Outer,
}

impl JoinKind {
    /// Returns the join form name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "inner_join",
            Self::Left => "left_join",
            Self::Right => "right_join",
            Self::Outer => "outer_join",
        }
    }
}

/// A single FROM item with its optional aliases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FromItem {
    /// The ranged-over expression.
    pub expr: Expr,
    /// `AS alias` (the element variable).
    pub as_alias: Option<Alias>,
    /// `AT alias` (the position variable).
    pub at_alias: Option<Alias>,
}

/// The FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FromSource {
    /// Iterate over the elements of an expression.
    Scan(FromItem),
    /// Iterate over the attributes of a struct (`UNPIVOT expr`).
    Unpivot(FromItem),
    /// Join of two sources.
    Join {
        /// Join type.
        kind: JoinKind,
        /// Left source.
        left: Box<FromSource>,
        /// Right source.
        right: Box<FromSource>,
        /// `ON` condition.
        condition: Option<Expr>,
    },
}

/// A GROUP BY key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupKey {
    /// The grouping expression.
    pub expr: Expr,
    /// Alias (`AS name`).
    pub alias: Option<Alias>,
}

/// The GROUP BY clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBy {
    /// `GROUP PARTIAL BY`.
    pub partial: bool,
    /// The grouping keys.
    pub keys: Vec<GroupKey>,
    /// `GROUP AS name`.
    pub group_as: Option<Alias>,
}

/// A SELECT or PIVOT query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Select {
    /// The projection.
    pub projection: Projection,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// FROM clause.
    pub from: FromSource,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY clause.
    pub group_by: Option<GroupBy>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// LIMIT clause.
    pub limit: Option<Expr>,
}

fn write_aliased<T: fmt::Display + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    head: &str,
    alias: Option<&Alias>,
    inner: &T,
) -> fmt::Result {
    let Some(alias) = alias else {
        return fmt::Display::fmt(inner, f);
    };
    write!(f, "({head} ")?;
    fmt::Display::fmt(alias, f)?;
    f.write_str(" ")?;
    fmt::Display::fmt(inner, f)?;
    f.write_str(")")
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_aliased(f, "as", self.alias.as_ref(), &self.expr)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_aliased(f, "as", self.alias.as_ref(), &self.expr)
    }
}

struct UnpivotForm<'a>(&'a Expr);

impl fmt::Display for UnpivotForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_form(f, "unpivot", core::slice::from_ref(self.0))
    }
}

struct AsAliased<'a, T: ?Sized>(&'a FromItem, &'a T);

impl<T: fmt::Display + ?Sized> fmt::Display for AsAliased<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_aliased(f, "as", self.0.as_alias.as_ref(), self.1)
    }
}

fn write_from_item<T: fmt::Display + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    item: &FromItem,
    inner: &T,
) -> fmt::Result {
    write_aliased(f, "at", item.at_alias.as_ref(), &AsAliased(item, inner))
}

impl fmt::Display for FromSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(item) => write_from_item(f, item, &item.expr),
            Self::Unpivot(item) => write_from_item(f, item, &UnpivotForm(&item.expr)),
            Self::Join {
                kind,
                left,
                right,
                condition,
            } => {
                write!(f, "({} ", kind.as_str())?;
                fmt::Display::fmt(left.as_ref(), f)?;
                f.write_str(" ")?;
                fmt::Display::fmt(right.as_ref(), f)?;
                if let Some(condition) = condition {
                    f.write_str(" ")?;
                    fmt::Display::fmt(condition, f)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = if self.partial {
            "group_partial"
        } else {
            "group"
        };
        write!(f, "({head} ")?;
        write_form(f, "by", &self.keys)?;
        if let Some(name) = &self.group_as {
            f.write_str(" (name ")?;
            fmt::Display::fmt(name, f)?;
            f.write_str(")")?;
        }
        f.write_str(")")
    }
}

fn write_clause(f: &mut fmt::Formatter<'_>, head: &str, expr: Option<&Expr>) -> fmt::Result {
    match expr {
        Some(expr) => {
            f.write_str(" ")?;
            write_form(f, head, core::slice::from_ref(expr))
        }
        None => Ok(()),
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let project = if self.distinct {
            "project_distinct"
        } else {
            "project"
        };
        match &self.projection {
            Projection::Pivot { key, value } => {
                f.write_str("(pivot ")?;
                write_form(f, "member", &[key, value])?;
            }
            Projection::Star => write!(f, "(select ({project} (*))")?,
            Projection::List(items) => {
                write!(f, "(select ({project} ")?;
                write_form(f, "list", items)?;
                f.write_str(")")?;
            }
            Projection::Value(expr) => {
                write!(f, "(select ({project} ")?;
                write_form(f, "value", core::slice::from_ref(expr))?;
                f.write_str(")")?;
            }
        }

        f.write_str(" (from ")?;
        fmt::Display::fmt(&self.from, f)?;
        f.write_str(")")?;
        write_clause(f, "where", self.where_clause.as_ref())?;
        if let Some(group_by) = &self.group_by {
            f.write_str(" ")?;
            fmt::Display::fmt(group_by, f)?;
        }
        write_clause(f, "having", self.having.as_ref())?;
        write_clause(f, "limit", self.limit.as_ref())?;
        f.write_str(")")
    }
}
