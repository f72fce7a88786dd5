//! Expression AST types.

use core::fmt;

use serde::Serialize;

use super::literal::write_quoted;
use super::statement::Select;
use super::Literal;
use crate::lexer::SourcePosition;

/// An expression together with the position of the token it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    /// The expression itself.
    pub kind: ExprKind,
    /// Where the originating token starts, if it came from source text.
    pub meta: Option<SourcePosition>,
}

impl Expr {
    /// Creates a new expression.
    #[must_use]
    pub const fn new(kind: ExprKind, meta: Option<SourcePosition>) -> Self {
        Self { kind, meta }
    }

    /// Returns the select query if this expression is one.
    #[must_use]
    pub fn as_select(&self) -> Option<&Select> {
        match &self.kind {
            ExprKind::Select(select) => Some(select),
            _ => None,
        }
    }
}

/// Whether an identifier lookup respects case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CaseSensitivity {
    /// Unquoted identifiers.
    Insensitive,
    /// Double-quoted identifiers.
    Sensitive,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    /// +
    Plus,
    /// -
    Neg,
    /// NOT
    Not,
}

impl UnaryOp {
    /// Returns the operator as written in the rendered tree.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "not",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    // Set operators
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,

    // Logical
    Or,
    And,

    // Equality
    Eq,
    NotEq,
    Is,
    In,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Arithmetic
    Add,
    Sub,
    Concat,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Returns the operator as written in the rendered tree.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::UnionAll => "union_all",
            Self::Intersect => "intersect",
            Self::IntersectAll => "intersect_all",
            Self::Except => "except",
            Self::ExceptAll => "except_all",
            Self::Or => "or",
            Self::And => "and",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Is => "is",
            Self::In => "in",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Concat => "||",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }
}

/// `ALL` or `DISTINCT` on an aggregate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SetQuantifier {
    /// Every input value (the default).
    All,
    /// Only distinct input values.
    Distinct,
}

impl SetQuantifier {
    /// Returns the quantifier keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Distinct => "distinct",
        }
    }
}

/// One step of a path expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PathStep {
    /// `.name` or `."Name"`, looked up as a string key.
    Key {
        /// The key as written (without quotes).
        name: String,
        /// Whether the key was quoted.
        case: CaseSensitivity,
        /// Position of the name.
        meta: Option<SourcePosition>,
    },
    /// `[expr]`
    Expr(Expr),
    /// `[*]`
    Wildcard(Option<SourcePosition>),
    /// `.*`
    Unpivot(Option<SourcePosition>),
    /// The extra dots of `a..b`, each climbing one level.
    Parent {
        /// Number of levels climbed.
        levels: usize,
        /// Position of the first extra dot.
        meta: Option<SourcePosition>,
    },
}

/// A field of a struct literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructField {
    /// The field name expression.
    pub name: Expr,
    /// The field value.
    pub value: Expr,
}

/// A `WHEN ... THEN ...` branch of a CASE expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhenBranch {
    /// The compared value (simple CASE) or condition (searched CASE).
    pub condition: Expr,
    /// The branch result.
    pub result: Expr,
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// A literal value.
    Lit(Literal),

    /// `MISSING`.
    Missing,

    /// A variable reference.
    Id {
        /// The identifier as written (without quotes).
        name: String,
        /// Whether the identifier was quoted.
        case: CaseSensitivity,
    },

    /// A path over a root expression.
    Path {
        /// The expression the path starts from.
        root: Box<Expr>,
        /// The steps, in source order.
        steps: Vec<PathStep>,
    },

    /// A function call.
    Call {
        /// Lowercased function name.
        name: String,
        /// The arguments.
        args: Vec<Expr>,
    },

    /// An aggregate call with a single argument.
    CallAgg {
        /// Lowercased aggregate name.
        name: String,
        /// `ALL` or `DISTINCT`.
        quantifier: SetQuantifier,
        /// The aggregated expression.
        arg: Box<Expr>,
    },

    /// `COUNT(*)`.
    CallAggWildcard {
        /// Lowercased aggregate name.
        name: String,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A binary expression.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },

    /// `value BETWEEN low AND high`.
    Between {
        /// The tested value.
        value: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
    },

    /// `value LIKE pattern [ESCAPE escape]`.
    Like {
        /// The tested value.
        value: Box<Expr>,
        /// The pattern.
        pattern: Box<Expr>,
        /// Optional escape character.
        escape: Option<Box<Expr>>,
    },

    /// A type name, as the target of `CAST` or the right side of `IS`.
    Type(super::DataType),

    /// `CAST(value AS type)`.
    Cast {
        /// The converted value.
        value: Box<Expr>,
        /// The target type; always a [`ExprKind::Type`] expression.
        data_type: Box<Expr>,
    },

    /// `[a, b]` or `(a, b)`.
    List(Vec<Expr>),

    /// `<<a, b>>`.
    Bag(Vec<Expr>),

    /// `{k: v, ...}`.
    Struct(Vec<StructField>),

    /// `CASE value WHEN ... END`.
    SimpleCase {
        /// The compared value.
        value: Box<Expr>,
        /// The WHEN branches.
        branches: Vec<WhenBranch>,
        /// The ELSE result.
        default: Option<Box<Expr>>,
    },

    /// `CASE WHEN ... END`.
    SearchedCase {
        /// The WHEN branches.
        branches: Vec<WhenBranch>,
        /// The ELSE result.
        default: Option<Box<Expr>>,
    },

    /// A SELECT or PIVOT query.
    Select(Box<Select>),
}

/// Writes `name` as a bare symbol when it is a plain identifier and as a
/// single-quoted symbol otherwise.
pub(crate) fn write_symbol(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars();
    let plain = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if plain {
        f.write_str(name)
    } else {
        write_quoted(f, name, '\'')
    }
}

/// Writes `(head item item ...)`.
pub(crate) fn write_form<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    head: &str,
    items: &[T],
) -> fmt::Result {
    write!(f, "({head}")?;
    for item in items {
        f.write_str(" ")?;
        fmt::Display::fmt(item, f)?;
    }
    f.write_str(")")
}

/// Writes the node produced by `node`, wrapped as `(meta <node> {line:L,column:C})`
/// in the alternate form when a position is known.
pub(crate) fn write_with_meta(
    f: &mut fmt::Formatter<'_>,
    meta: Option<SourcePosition>,
    node: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    match meta {
        Some(position) if f.alternate() => {
            f.write_str("(meta ")?;
            node(f)?;
            write!(
                f,
                " {{line:{},column:{}}})",
                position.line, position.column
            )
        }
        _ => node(f),
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key { name, case, meta } => write_with_meta(f, *meta, |f| {
                f.write_str("(lit ")?;
                write_quoted(f, name, '"')?;
                if *case == CaseSensitivity::Sensitive {
                    f.write_str(" case_sensitive")?;
                }
                f.write_str(")")
            }),
            Self::Expr(expr) => fmt::Display::fmt(expr, f),
            Self::Wildcard(meta) => write_with_meta(f, *meta, |f| f.write_str("(*)")),
            Self::Unpivot(meta) => write_with_meta(f, *meta, |f| f.write_str("(* unpivot)")),
            Self::Parent { levels, meta } => {
                write_with_meta(f, *meta, |f| write!(f, "(parent {levels})"))
            }
        }
    }
}

impl fmt::Display for WhenBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(when ")?;
        fmt::Display::fmt(&self.condition, f)?;
        f.write_str(" ")?;
        fmt::Display::fmt(&self.result, f)?;
        f.write_str(")")
    }
}

fn write_case(
    f: &mut fmt::Formatter<'_>,
    branches: &[WhenBranch],
    default: Option<&Expr>,
) -> fmt::Result {
    for branch in branches {
        f.write_str(" ")?;
        fmt::Display::fmt(branch, f)?;
    }
    if let Some(default) = default {
        f.write_str(" (else ")?;
        fmt::Display::fmt(default, f)?;
        f.write_str(")")?;
    }
    f.write_str(")")
}

impl Expr {
    fn write_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Lit(value) => write!(f, "(lit {value})"),
            ExprKind::Missing => f.write_str("(missing)"),
            ExprKind::Id { name, case } => {
                f.write_str("(id ")?;
                write_symbol(f, name)?;
                if *case == CaseSensitivity::Sensitive {
                    f.write_str(" case_sensitive")?;
                }
                f.write_str(")")
            }
            ExprKind::Path { root, steps } => {
                f.write_str("(path ")?;
                fmt::Display::fmt(root.as_ref(), f)?;
                for step in steps {
                    f.write_str(" ")?;
                    fmt::Display::fmt(step, f)?;
                }
                f.write_str(")")
            }
            ExprKind::Call { name, args } => {
                f.write_str("(call ")?;
                write_symbol(f, name)?;
                for arg in args {
                    f.write_str(" ")?;
                    fmt::Display::fmt(arg, f)?;
                }
                f.write_str(")")
            }
            ExprKind::CallAgg {
                name,
                quantifier,
                arg,
            } => {
                f.write_str("(call_agg ")?;
                write_symbol(f, name)?;
                write!(f, " {} ", quantifier.as_str())?;
                fmt::Display::fmt(arg.as_ref(), f)?;
                f.write_str(")")
            }
            ExprKind::CallAggWildcard { name } => {
                f.write_str("(call_agg_wildcard ")?;
                write_symbol(f, name)?;
                f.write_str(")")
            }
            ExprKind::Unary { op, operand } => {
                write_form(f, op.as_str(), core::slice::from_ref(operand.as_ref()))
            }
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} ", op.as_str())?;
                fmt::Display::fmt(left.as_ref(), f)?;
                f.write_str(" ")?;
                fmt::Display::fmt(right.as_ref(), f)?;
                f.write_str(")")
            }
            ExprKind::Between { value, low, high } => write_form(
                f,
                "between",
                &[value.as_ref(), low.as_ref(), high.as_ref()],
            ),
            ExprKind::Like {
                value,
                pattern,
                escape,
            } => {
                let mut operands = vec![value.as_ref(), pattern.as_ref()];
                operands.extend(escape.as_deref());
                write_form(f, "like", &operands)
            }
            ExprKind::Type(data_type) => write!(f, "{data_type}"),
            ExprKind::Cast { value, data_type } => {
                write_form(f, "cast", &[value.as_ref(), data_type.as_ref()])
            }
            ExprKind::List(items) => write_form(f, "list", items),
            ExprKind::Bag(items) => write_form(f, "bag", items),
            ExprKind::Struct(fields) => {
                f.write_str("(struct")?;
                for field in fields {
                    f.write_str(" ")?;
                    fmt::Display::fmt(&field.name, f)?;
                    f.write_str(" ")?;
                    fmt::Display::fmt(&field.value, f)?;
                }
                f.write_str(")")
            }
            ExprKind::SimpleCase {
                value,
                branches,
                default,
            } => {
                f.write_str("(simple_case ")?;
                fmt::Display::fmt(value.as_ref(), f)?;
                write_case(f, branches, default.as_deref())
            }
            ExprKind::SearchedCase { branches, default } => {
                f.write_str("(searched_case")?;
                write_case(f, branches, default.as_deref())
            }
            ExprKind::Select(select) => fmt::Display::fmt(select.as_ref(), f),
        }
    }
}

/// Renders the expression as an s-expression.
///
/// The alternate form (`{:#}`) wraps every node that has a source position
/// as `(meta <node> {line:L,column:C})`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_with_meta(f, self.meta, |f| self.write_node(f))
    }
}
