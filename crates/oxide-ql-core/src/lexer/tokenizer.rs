//! Query tokenizer implementation.

use tracing::{debug, trace};

use super::keywords::{self, MultiLexeme, MULTI_LEXEME_TOKENS};
use super::{number, LexerError, LexerErrorKind, SourcePosition, Token, TokenType};
use crate::ast::Literal;
use crate::dialect::{Dialect, GenericDialect};

static GENERIC: GenericDialect = GenericDialect::new();

/// A lexer that tokenizes query text.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// Supplies the embedded literal parser and comment handling.
    dialect: &'a dyn Dialect,
    /// The current byte position.
    pos: usize,
    /// The current line (1-based).
    line: usize,
    /// The current column (1-based, in characters).
    column: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// The line/column of the start of the current token.
    start_position: SourcePosition,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input using the generic dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &GENERIC)
    }

    /// Creates a new lexer for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            line: 1,
            column: 1,
            start: 0,
            start_position: SourcePosition::start(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            // The `\n` of a `\r\n` pair performs the line break.
            '\r' if self.peek() == Some('\n') => {}
            _ => self.column += 1,
        }
        Some(c)
    }

    /// Moves back to the start of the current token.
    fn rewind(&mut self) {
        self.pos = self.start;
        self.line = self.start_position.line;
        self.column = self.start_position.column;
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if !self.dialect.supports_comments() {
                break;
            }

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Multi-line comments (/* ... */)
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Returns the source text of the current token.
    fn text(&self) -> &'a str {
        let input = self.input;
        &input[self.start..self.pos]
    }

    fn token(&self, kind: TokenType) -> Token {
        Token::new(kind, Some(self.start_position))
    }

    fn text_token(&self, kind: TokenType, text: impl Into<String>) -> Token {
        Token::with_text(kind, text, Some(self.start_position))
    }

    fn error(&self, kind: LexerErrorKind, message: impl Into<String>) -> LexerError {
        LexerError::new(kind, self.start_position, self.text(), message)
    }

    /// Scans an identifier, keyword or boolean literal.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(is_identifier_part) {
            self.advance();
        }

        let text = self.text();
        let lower = text.to_lowercase();
        if !keywords::is_keyword(&lower) {
            return self.text_token(TokenType::Identifier, text);
        }

        match keywords::canonical_keyword(&lower) {
            "true" => Token::literal(Literal::Boolean(true), Some(self.start_position)),
            "false" => Token::literal(Literal::Boolean(false), Some(self.start_position)),
            word => self.text_token(keywords::keyword_token_type(word), word),
        }
    }

    /// Scans a double-quoted, case-sensitive identifier.
    fn scan_quoted_identifier(&mut self) -> Result<Token, LexerError> {
        let name = self.scan_delimited('"')?;
        Ok(self.text_token(TokenType::QuotedIdentifier, name))
    }

    /// Scans a single-quoted string literal.
    fn scan_string(&mut self) -> Result<Token, LexerError> {
        let value = self.scan_delimited('\'')?;
        Ok(Token::literal(
            Literal::String(value),
            Some(self.start_position),
        ))
    }

    /// Scans text between `quote` characters, where a doubled quote stands for
    /// one quote character.
    fn scan_delimited(&mut self, quote: char) -> Result<String, LexerError> {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        value.push(quote);
                        self.advance();
                    } else {
                        return Ok(value);
                    }
                }
                Some(c) => value.push(c),
                None => {
                    let what = if quote == '"' {
                        "unterminated quoted identifier"
                    } else {
                        "unterminated string literal"
                    };
                    return Err(self.error(LexerErrorKind::InvalidLiteral, what));
                }
            }
        }
    }

    /// Scans a back-tick delimited literal block and hands its body to the
    /// dialect's embedded literal parser.
    fn scan_embedded(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume opening back-tick
        let body_start = self.pos;

        loop {
            match self.peek() {
                Some('`') => break,
                Some('"') => self.skip_embedded_string('"')?,
                Some('\'') if self.input[self.pos..].starts_with("'''") => {
                    self.skip_embedded_long_string()?;
                }
                Some('\'') => self.skip_embedded_string('\'')?,
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Err(self.error(
                        LexerErrorKind::InvalidEmbeddedLiteral,
                        "unterminated embedded literal",
                    ))
                }
            }
        }

        let input = self.input;
        let body = input[body_start..self.pos].trim();
        self.advance(); // consume closing back-tick

        match self.dialect.parse_embedded_literal(body) {
            Ok(value) => Ok(Token::literal(value, Some(self.start_position))),
            Err(message) => Err(self.error(LexerErrorKind::InvalidEmbeddedLiteral, message)),
        }
    }

    /// Skips a quoted string inside an embedded literal block. Backslash
    /// escapes are honored.
    fn skip_embedded_string(&mut self, quote: char) -> Result<(), LexerError> {
        self.advance(); // consume opening quote
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(self.error(
                        LexerErrorKind::InvalidEmbeddedLiteral,
                        "unterminated string in embedded literal",
                    ))
                }
            }
        }
    }

    /// Skips a `'''` delimited string inside an embedded literal block.
    fn skip_embedded_long_string(&mut self) -> Result<(), LexerError> {
        for _ in 0..3 {
            self.advance();
        }
        loop {
            if self.input[self.pos..].starts_with("'''") {
                for _ in 0..3 {
                    self.advance();
                }
                return Ok(());
            }
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some(_) => {}
                None => {
                    return Err(self.error(
                        LexerErrorKind::InvalidEmbeddedLiteral,
                        "unterminated string in embedded literal",
                    ))
                }
            }
        }
    }

    /// Scans a number, including a folded leading sign.
    fn scan_number(&mut self) -> Result<Token, LexerError> {
        if self.peek().is_some_and(|c| c == '+' || c == '-') {
            self.advance();
        }

        if self.peek() == Some('.') {
            self.advance();
            self.skip_digits();
        } else {
            self.skip_digits();
            if self.peek() == Some('.') && self.dot_continues_number() {
                self.advance();
                self.skip_digits();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error(
                    LexerErrorKind::InvalidLiteral,
                    "expected digits after exponent marker",
                ));
            }
            self.skip_digits();
        }

        if self.peek().is_some_and(is_identifier_part) {
            self.advance();
            return Err(self.error(
                LexerErrorKind::InvalidLiteral,
                "numeric literal runs into an identifier",
            ));
        }

        match number::canonicalize(self.text()) {
            Ok(value) => Ok(Token::literal(value, Some(self.start_position))),
            Err(message) => Err(self.error(LexerErrorKind::InvalidLiteral, message)),
        }
    }

    /// Decides whether a `.` after integer digits belongs to the number.
    ///
    /// `600.` is a decimal, but `1.a`, `1.*` and `1..` leave the dot alone.
    fn dot_continues_number(&self) -> bool {
        match self.peek_next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('e' | 'E') => self
                .peek_nth(2)
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-'),
            Some(c) => !(is_identifier_start(c) || c == '*' || c == '.'),
            None => true,
        }
    }

    /// Scans the next token.
    ///
    /// `previous` is the last token emitted, used to decide whether a sign
    /// directly in front of a digit is part of the number.
    ///
    /// # Errors
    ///
    /// Returns a [`LexerError`] if the input at the current position does not
    /// form a valid token.
    pub fn next_token(&mut self, previous: Option<&Token>) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();
        self.start = self.pos;
        self.start_position = SourcePosition::new(self.line, self.column);

        let Some(c) = self.advance() else {
            return Ok(self.token(TokenType::Eof));
        };

        match c {
            // Single-character tokens
            '(' => Ok(self.token(TokenType::LeftParen)),
            ')' => Ok(self.token(TokenType::RightParen)),
            '[' => Ok(self.token(TokenType::LeftBracket)),
            ']' => Ok(self.token(TokenType::RightBracket)),
            '{' => Ok(self.token(TokenType::LeftCurly)),
            '}' => Ok(self.token(TokenType::RightCurly)),
            ',' => Ok(self.token(TokenType::Comma)),
            ':' => Ok(self.token(TokenType::Colon)),
            ';' => Ok(self.token(TokenType::Semicolon)),
            '*' => Ok(self.token(TokenType::Star)),

            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                self.rewind();
                self.scan_number()
            }
            '.' => Ok(self.token(TokenType::Dot)),

            '+' | '-' if self.starts_number() && sign_may_fold(previous) => {
                self.rewind();
                self.scan_number()
            }
            '+' | '-' | '/' | '%' | '=' => Ok(self.text_token(TokenType::Operator, c)),

            '<' => match self.peek() {
                Some('<') => {
                    self.advance();
                    Ok(self.token(TokenType::LeftDoubleAngle))
                }
                Some('=' | '>') => {
                    self.advance();
                    Ok(self.text_token(TokenType::Operator, self.text()))
                }
                _ => Ok(self.text_token(TokenType::Operator, "<")),
            },
            '>' => match self.peek() {
                Some('>') => {
                    self.advance();
                    Ok(self.token(TokenType::RightDoubleAngle))
                }
                Some('=') => {
                    self.advance();
                    Ok(self.text_token(TokenType::Operator, ">="))
                }
                _ => Ok(self.text_token(TokenType::Operator, ">")),
            },
            '!' if self.peek() == Some('=') => {
                self.advance();
                Ok(self.text_token(TokenType::Operator, "<>"))
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                Ok(self.text_token(TokenType::Operator, "||"))
            }
            '!' | '|' | '&' | '^' | '~' => {
                Err(self.error(LexerErrorKind::InvalidOperator, "unknown operator"))
            }

            '\'' => {
                self.rewind();
                self.scan_string()
            }
            '"' => {
                self.rewind();
                self.scan_quoted_identifier()
            }
            '`' => {
                self.rewind();
                self.scan_embedded()
            }

            c if c.is_ascii_digit() => {
                self.rewind();
                self.scan_number()
            }
            c if is_identifier_start(c) => {
                self.rewind();
                Ok(self.scan_identifier())
            }

            _ => Err(self.error(LexerErrorKind::InvalidChar, "unexpected character")),
        }
    }

    /// Returns true if the characters after a sign begin a number.
    fn starts_number(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Tokenizes the entire input.
    ///
    /// The returned tokens end with an [`TokenType::Eof`] token and have
    /// multi-word keywords and operators fused.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexerError`] encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens: Vec<Token> = Vec::new();
        loop {
            let token = self
                .next_token(tokens.last())
                .inspect_err(|err| debug!(%err, "lexer rejected input"))?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        let tokens = fuse_multi_lexemes(&tokens);
        debug!(
            count = tokens.len(),
            dialect = self.dialect.name(),
            "tokenized query"
        );
        Ok(tokens)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Returns true if a sign following `previous` is in prefix position, where
/// it cannot be a binary operator.
fn sign_may_fold(previous: Option<&Token>) -> bool {
    let Some(token) = previous else {
        return true;
    };
    match token.kind {
        TokenType::Operator
        | TokenType::LeftParen
        | TokenType::LeftBracket
        | TokenType::LeftCurly
        | TokenType::LeftDoubleAngle
        | TokenType::Comma
        | TokenType::Colon
        | TokenType::Semicolon
        | TokenType::As
        | TokenType::At
        | TokenType::For => true,
        TokenType::Keyword => !token.is_keyword("end"),
        _ => false,
    }
}

/// Replaces keyword sequences from the multi-lexeme table with single tokens.
fn fuse_multi_lexemes(tokens: &[Token]) -> Vec<Token> {
    let mut fused = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let Some(entry) = longest_multi_lexeme(&tokens[i..]) {
            trace!(token = entry.fused, "fused multi-lexeme token");
            fused.push(Token::with_text(entry.kind, entry.fused, tokens[i].position));
            i += entry.lexemes.len();
        } else {
            fused.push(tokens[i].clone());
            i += 1;
        }
    }
    fused
}

fn longest_multi_lexeme(tokens: &[Token]) -> Option<&'static MultiLexeme> {
    MULTI_LEXEME_TOKENS
        .iter()
        .filter(|entry| {
            entry.lexemes.len() <= tokens.len()
                && entry.lexemes.iter().zip(tokens).all(|(lexeme, token)| {
                    matches!(token.kind, TokenType::Keyword | TokenType::Operator)
                        && token.text.as_deref() == Some(*lexeme)
                })
        })
        .max_by_key(|entry| entry.lexemes.len())
}
