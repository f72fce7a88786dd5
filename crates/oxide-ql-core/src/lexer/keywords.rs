//! Reserved words, keyword aliases and multi-lexeme token tables.

use super::TokenType;

/// Returns true if `word` (already lowercased) is a reserved word.
///
/// The set is SQL-92's reserved words plus the language's own additions
/// (`missing`, `pivot`, `unpivot`, `limit`, `tuple`) and the Ion type names.
#[must_use]
pub const fn is_keyword(word: &str) -> bool {
    matches!(
        word.as_bytes(),
        b"absolute"
            | b"action"
            | b"add"
            | b"all"
            | b"allocate"
            | b"alter"
            | b"and"
            | b"any"
            | b"are"
            | b"as"
            | b"asc"
            | b"assertion"
            | b"at"
            | b"authorization"
            | b"avg"
            | b"begin"
            | b"between"
            | b"bit"
            | b"bit_length"
            | b"both"
            | b"by"
            | b"cascade"
            | b"cascaded"
            | b"case"
            | b"cast"
            | b"catalog"
            | b"char"
            | b"character"
            | b"character_length"
            | b"char_length"
            | b"check"
            | b"close"
            | b"coalesce"
            | b"collate"
            | b"collation"
            | b"column"
            | b"commit"
            | b"connect"
            | b"connection"
            | b"constraint"
            | b"constraints"
            | b"continue"
            | b"convert"
            | b"corresponding"
            | b"count"
            | b"create"
            | b"cross"
            | b"current"
            | b"current_date"
            | b"current_time"
            | b"current_timestamp"
            | b"current_user"
            | b"cursor"
            | b"date"
            | b"day"
            | b"deallocate"
            | b"dec"
            | b"decimal"
            | b"declare"
            | b"default"
            | b"deferrable"
            | b"deferred"
            | b"delete"
            | b"desc"
            | b"describe"
            | b"descriptor"
            | b"diagnostics"
            | b"disconnect"
            | b"distinct"
            | b"domain"
            | b"double"
            | b"drop"
            | b"else"
            | b"end"
            | b"escape"
            | b"except"
            | b"exception"
            | b"exec"
            | b"execute"
            | b"exists"
            | b"external"
            | b"extract"
            | b"false"
            | b"fetch"
            | b"first"
            | b"float"
            | b"for"
            | b"foreign"
            | b"found"
            | b"from"
            | b"full"
            | b"get"
            | b"global"
            | b"go"
            | b"goto"
            | b"grant"
            | b"group"
            | b"having"
            | b"hour"
            | b"identity"
            | b"immediate"
            | b"in"
            | b"indicator"
            | b"initially"
            | b"inner"
            | b"input"
            | b"insensitive"
            | b"insert"
            | b"int"
            | b"integer"
            | b"intersect"
            | b"interval"
            | b"into"
            | b"is"
            | b"isolation"
            | b"join"
            | b"key"
            | b"language"
            | b"last"
            | b"leading"
            | b"left"
            | b"level"
            | b"like"
            | b"local"
            | b"lower"
            | b"match"
            | b"max"
            | b"min"
            | b"minute"
            | b"module"
            | b"month"
            | b"names"
            | b"national"
            | b"natural"
            | b"nchar"
            | b"next"
            | b"no"
            | b"not"
            | b"null"
            | b"nullif"
            | b"numeric"
            | b"octet_length"
            | b"of"
            | b"on"
            | b"only"
            | b"open"
            | b"option"
            | b"or"
            | b"order"
            | b"outer"
            | b"output"
            | b"overlaps"
            | b"pad"
            | b"partial"
            | b"position"
            | b"precision"
            | b"prepare"
            | b"preserve"
            | b"primary"
            | b"prior"
            | b"privileges"
            | b"procedure"
            | b"public"
            | b"read"
            | b"real"
            | b"references"
            | b"relative"
            | b"restrict"
            | b"revoke"
            | b"right"
            | b"rollback"
            | b"rows"
            | b"schema"
            | b"scroll"
            | b"second"
            | b"section"
            | b"select"
            | b"session"
            | b"session_user"
            | b"set"
            | b"size"
            | b"smallint"
            | b"some"
            | b"space"
            | b"sql"
            | b"sqlcode"
            | b"sqlerror"
            | b"sqlstate"
            | b"substring"
            | b"sum"
            | b"system_user"
            | b"table"
            | b"temporary"
            | b"then"
            | b"time"
            | b"timestamp"
            | b"timezone_hour"
            | b"timezone_minute"
            | b"to"
            | b"trailing"
            | b"transaction"
            | b"translate"
            | b"translation"
            | b"trim"
            | b"true"
            | b"union"
            | b"unique"
            | b"unknown"
            | b"update"
            | b"upper"
            | b"usage"
            | b"user"
            | b"using"
            | b"value"
            | b"values"
            | b"varchar"
            | b"varying"
            | b"view"
            | b"when"
            | b"whenever"
            | b"where"
            | b"with"
            | b"work"
            | b"write"
            | b"year"
            | b"zone"
            // Language additions
            | b"missing"
            | b"pivot"
            | b"unpivot"
            | b"limit"
            | b"tuple"
            // Ion type names
            | b"bool"
            | b"boolean"
            | b"string"
            | b"symbol"
            | b"clob"
            | b"blob"
            | b"struct"
            | b"list"
            | b"sexp"
            | b"bag"
    )
}

/// Maps keyword spellings to their canonical form.
#[must_use]
pub fn canonical_keyword(word: &str) -> &str {
    match word {
        "varchar" => "character_varying",
        "char" => "character",
        "dec" => "decimal",
        "int" => "integer",
        "bool" => "boolean",
        other => other,
    }
}

/// Returns true if `canonical` may stand for a different written spelling,
/// either as an alias target or as a fused multi-lexeme token.
#[must_use]
pub fn is_respelled(canonical: &str) -> bool {
    matches!(
        canonical,
        "character_varying" | "character" | "decimal" | "integer" | "boolean"
    ) || MULTI_LEXEME_TOKENS.iter().any(|m| m.fused == canonical)
}

/// Keywords that are lexed as operators.
#[must_use]
pub const fn is_keyword_operator(word: &str) -> bool {
    matches!(
        word.as_bytes(),
        b"and" | b"or" | b"not" | b"in" | b"is" | b"like" | b"between" | b"union" | b"intersect"
            | b"except"
    )
}

/// Classifies a canonical keyword into the token type the lexer emits.
#[must_use]
pub fn keyword_token_type(word: &str) -> TokenType {
    match word {
        "null" => TokenType::Null,
        "missing" => TokenType::Missing,
        "as" => TokenType::As,
        "at" => TokenType::At,
        "for" => TokenType::For,
        w if is_keyword_operator(w) => TokenType::Operator,
        _ => TokenType::Keyword,
    }
}

/// A sequence of adjacent keywords fused into a single token.
pub struct MultiLexeme {
    /// The keyword sequence, in canonical spelling.
    pub lexemes: &'static [&'static str],
    /// The fused token text.
    pub fused: &'static str,
    /// The fused token type.
    pub kind: TokenType,
}

const fn fused(
    lexemes: &'static [&'static str],
    fused: &'static str,
    kind: TokenType,
) -> MultiLexeme {
    MultiLexeme {
        lexemes,
        fused,
        kind,
    }
}

/// Multi-lexeme token table, matched greedily (longest sequence wins).
pub static MULTI_LEXEME_TOKENS: &[MultiLexeme] = &[
    fused(&["not", "in"], "not_in", TokenType::Operator),
    fused(&["is", "not"], "is_not", TokenType::Operator),
    fused(&["not", "between"], "not_between", TokenType::Operator),
    fused(&["not", "like"], "not_like", TokenType::Operator),
    fused(&["union", "all"], "union_all", TokenType::Operator),
    fused(&["intersect", "all"], "intersect_all", TokenType::Operator),
    fused(&["except", "all"], "except_all", TokenType::Operator),
    fused(&["inner", "join"], "inner_join", TokenType::Keyword),
    fused(&["cross", "join"], "cross_join", TokenType::Keyword),
    fused(&["left", "join"], "left_join", TokenType::Keyword),
    fused(&["left", "outer", "join"], "left_join", TokenType::Keyword),
    fused(&["right", "join"], "right_join", TokenType::Keyword),
    fused(&["right", "outer", "join"], "right_join", TokenType::Keyword),
    fused(&["full", "join"], "outer_join", TokenType::Keyword),
    fused(&["full", "outer", "join"], "outer_join", TokenType::Keyword),
    fused(&["outer", "join"], "outer_join", TokenType::Keyword),
    fused(
        &["character", "varying"],
        "character_varying",
        TokenType::Keyword,
    ),
    fused(&["double", "precision"], "double_precision", TokenType::Keyword),
];
