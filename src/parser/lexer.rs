//! Lexer (tokenizer) for Misnomer source code
//!
//! Pulls characters from a [`SourceStream`] and produces one [`Token`] per call
//! to [`Lexer::next_token`]. The token stream is lazy and finite: after the
//! input is exhausted every call yields an [`TokenKind::Eof`] token. A lexer
//! cannot be rewound; tokenizing again requires a new lexer over a new stream.
//!
//! Characters that start no token are returned as [`TokenKind::Unknown`]
//! tokens rather than errors; rejecting them is the parser's job.

use super::ast::Position;
use crate::source::SourceStream;
use std::fmt;
use tracing::trace;

/// Default limit on the decoded length of a string literal
pub const DEFAULT_MAX_STRING_LENGTH: usize = 1000;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    If,
    Else,
    While,
    Return,
    Returns,
    Var,
    Break,
    Continue,
    Int,
    Float,
    String,
    Nothing,
    Or,
    And,
    Not, // also `!`

    // Operators
    Assignment,   // =
    Equal,        // ==
    NotEqual,     // !=
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
    Add,          // +
    Subtract,     // -
    Multiply,     // *
    Divide,       // /

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;

    // Valued tokens
    NumericLiteral,
    StringLiteral,
    Identifier,
    Unknown,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Return => "'return'",
            TokenKind::Returns => "'returns'",
            TokenKind::Var => "'var'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::String => "'string'",
            TokenKind::Nothing => "'nothing'",
            TokenKind::Or => "'or'",
            TokenKind::And => "'and'",
            TokenKind::Not => "'not'",
            TokenKind::Assignment => "'='",
            TokenKind::Equal => "'=='",
            TokenKind::NotEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Add => "'+'",
            TokenKind::Subtract => "'-'",
            TokenKind::Multiply => "'*'",
            TokenKind::Divide => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::NumericLiteral => "numeric literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Unknown => "unknown character",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// One-character operators and punctuation
pub const SINGLE_CHAR_TOKENS: &[(char, TokenKind)] = &[
    ('=', TokenKind::Assignment),
    ('<', TokenKind::Less),
    ('>', TokenKind::Greater),
    ('!', TokenKind::Not),
    ('+', TokenKind::Add),
    ('-', TokenKind::Subtract),
    ('*', TokenKind::Multiply),
    ('/', TokenKind::Divide),
    ('(', TokenKind::LParen),
    (')', TokenKind::RParen),
    ('{', TokenKind::LBrace),
    ('}', TokenKind::RBrace),
    (',', TokenKind::Comma),
    (':', TokenKind::Colon),
    (';', TokenKind::Semicolon),
];

/// Single-character kinds that may start a two-character operator
pub const DOUBLE_CHAR_PREFIXES: &[TokenKind] = &[
    TokenKind::Assignment,
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::Not,
];

/// Two-character operators
pub const DOUBLE_CHAR_TOKENS: &[(&str, TokenKind)] = &[
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
];

/// Reserved words
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("return", TokenKind::Return),
    ("returns", TokenKind::Returns),
    ("var", TokenKind::Var),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("string", TokenKind::String),
    ("nothing", TokenKind::Nothing),
    ("or", TokenKind::Or),
    ("and", TokenKind::And),
    ("not", TokenKind::Not),
];

/// Escapes that decode to a control or special character
const ESCAPES: &[(char, char)] = &[
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
    ('b', '\u{8}'),
    ('f', '\u{c}'),
    ('\\', '\\'),
    ('0', '\0'),
];

const QUOTES: [char; 2] = ['\'', '"'];

fn single_char_kind(ch: char) -> Option<TokenKind> {
    SINGLE_CHAR_TOKENS
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, kind)| *kind)
}

fn double_char_kind(first: char, second: char) -> Option<TokenKind> {
    DOUBLE_CHAR_TOKENS
        .iter()
        .find(|(text, _)| {
            let mut chars = text.chars();
            chars.next() == Some(first) && chars.next() == Some(second)
        })
        .map(|(_, kind)| *kind)
}

fn keyword_kind(name: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == name)
        .map(|(_, kind)| *kind)
}

/// Payload carried by literal, identifier and unknown tokens
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Int(i64),
    Float(f64),
    Str(String),
    Char(char),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Int(n) => write!(f, "{}", n),
            TokenValue::Float(x) => write!(f, "{}", x),
            TokenValue::Str(s) => write!(f, "{}", s),
            TokenValue::Char(c) => write!(f, "{}", c),
        }
    }
}

/// A lexical unit
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    value: Option<TokenValue>,
    position: Position,
}

impl Token {
    /// Build a token, checking that the value fits the kind.
    pub fn new(
        kind: TokenKind,
        value: Option<TokenValue>,
        position: Position,
    ) -> Result<Self, LexError> {
        let consistent = match (&kind, &value) {
            (TokenKind::NumericLiteral, Some(TokenValue::Int(_) | TokenValue::Float(_))) => true,
            (TokenKind::StringLiteral | TokenKind::Identifier, Some(TokenValue::Str(_))) => true,
            (TokenKind::Unknown, Some(TokenValue::Char(_))) => true,
            (
                TokenKind::NumericLiteral
                | TokenKind::StringLiteral
                | TokenKind::Identifier
                | TokenKind::Unknown,
                _,
            ) => false,
            (_, value) => value.is_none(),
        };

        if !consistent {
            return Err(LexError::InconsistentToken {
                kind,
                value: value.map(|v| v.to_string()).unwrap_or_default(),
                location: position,
            });
        }

        Ok(Token {
            kind,
            value,
            position,
        })
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<TokenValue> {
        self.value
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::StringLiteral, Some(v)) => write!(f, "string literal \"{}\"", v),
            (TokenKind::Identifier, Some(v)) => write!(f, "identifier '{}'", v),
            (TokenKind::Unknown, Some(v)) => write!(f, "unknown character '{}'", v),
            (kind, Some(v)) => write!(f, "{} {}", kind, v),
            (kind, None) => write!(f, "{}", kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// End of input inside a string literal
    UnterminatedString { location: Position },

    /// String literal longer than the configured limit
    StringTooLong { max_length: usize, location: Position },

    /// Malformed number (leading zeros, missing fraction digits, trailing `.`/digit)
    NumericLiteral { reason: String, location: Position },

    /// A token value that does not match its kind
    InconsistentToken {
        kind: TokenKind,
        value: String,
        location: Position,
    },
}

impl LexError {
    pub fn location(&self) -> Position {
        match self {
            LexError::UnterminatedString { location }
            | LexError::StringTooLong { location, .. }
            | LexError::NumericLiteral { location, .. }
            | LexError::InconsistentToken { location, .. } => *location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: ",
            self.location().line,
            self.location().column
        )?;
        match self {
            LexError::UnterminatedString { .. } => {
                write!(f, "the string is not terminated")
            }
            LexError::StringTooLong { max_length, .. } => {
                write!(f, "string literal exceeds {} characters", max_length)
            }
            LexError::NumericLiteral { reason, .. } => {
                write!(f, "invalid numeric literal: {}", reason)
            }
            LexError::InconsistentToken { kind, value, .. } => {
                write!(f, "value '{}' does not fit token kind {}", value, kind)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Lexer over any character source
pub struct Lexer<S: SourceStream> {
    source: S,
    current: Option<char>,
    position: Position, // position of `current`
    max_string_length: usize,
}

impl<S: SourceStream> Lexer<S> {
    /// Create a new lexer with the default string length limit.
    pub fn new(source: S) -> Self {
        Self::with_max_string_length(source, DEFAULT_MAX_STRING_LENGTH)
    }

    pub fn with_max_string_length(source: S, max_string_length: usize) -> Self {
        let mut lexer = Self {
            source,
            current: None,
            position: Position::start(),
            max_string_length,
        };
        lexer.advance();
        lexer
    }

    /// Tokenize the rest of the input, `Eof` token included
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind() == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Produce the next token
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current {
            None => Token::new(TokenKind::Eof, None, self.position)?,
            Some(ch) => {
                if let Some(token) = self.operator(ch)? {
                    token
                } else if QUOTES.contains(&ch) {
                    self.string_literal(ch)?
                } else if ch.is_ascii_digit() {
                    self.number_literal()?
                } else if ch.is_alphabetic() {
                    self.identifier_or_keyword()?
                } else {
                    let location = self.position;
                    self.advance();
                    Token::new(TokenKind::Unknown, Some(TokenValue::Char(ch)), location)?
                }
            }
        };

        trace!(kind = ?token.kind(), value = ?token.value(), position = %token.position(), "token");
        Ok(token)
    }

    /// One- or two-character operator / punctuation
    fn operator(&mut self, ch: char) -> Result<Option<Token>, LexError> {
        let Some(kind) = single_char_kind(ch) else {
            return Ok(None);
        };
        let location = self.position;
        self.advance();

        if DOUBLE_CHAR_PREFIXES.contains(&kind) {
            if let Some(double) = self.current.and_then(|next| double_char_kind(ch, next)) {
                self.advance();
                return Token::new(double, None, location).map(Some);
            }
        }

        Token::new(kind, None, location).map(Some)
    }

    /// Parse string literal opened by `quote`
    fn string_literal(&mut self, quote: char) -> Result<Token, LexError> {
        let location = self.position;
        let mut string = String::new();
        let mut length = 0usize;
        self.advance(); // opening quote

        loop {
            let ch = self
                .current
                .ok_or(LexError::UnterminatedString { location })?;

            if ch == quote {
                self.advance(); // closing quote
                break;
            }

            if length >= self.max_string_length {
                return Err(LexError::StringTooLong {
                    max_length: self.max_string_length,
                    location: self.position,
                });
            }

            if ch == '\\' {
                self.advance();
                let escaped = self
                    .current
                    .ok_or(LexError::UnterminatedString { location })?;

                if escaped == quote {
                    string.push(quote);
                } else if let Some((_, decoded)) = ESCAPES.iter().find(|(c, _)| *c == escaped) {
                    string.push(*decoded);
                } else {
                    // Unknown escapes are kept verbatim
                    string.push('\\');
                    string.push(escaped);
                    length += 1;
                }
            } else {
                string.push(ch);
            }

            length += 1;
            self.advance();
        }

        Token::new(
            TokenKind::StringLiteral,
            Some(TokenValue::Str(string)),
            location,
        )
    }

    /// Parse numeric literal (integer or with a fractional part)
    fn number_literal(&mut self) -> Result<Token, LexError> {
        let location = self.position;
        let integer_digits = self.digits();

        if integer_digits.starts_with("00") {
            return Err(LexError::NumericLiteral {
                reason: format!("leading zeros in '{}'", integer_digits),
                location,
            });
        }

        let integer = integer_digits
            .parse::<i64>()
            .map_err(|_| LexError::NumericLiteral {
                reason: format!("'{}' is out of range", integer_digits),
                location,
            })?;

        let value = if self.current == Some('.') {
            self.advance();
            let fraction_digits = self.digits();
            if fraction_digits.is_empty() {
                return Err(LexError::NumericLiteral {
                    reason: match self.current {
                        Some(ch) => format!("expected a digit after '.', found '{}'", ch),
                        None => "expected a digit after '.', found end of file".to_string(),
                    },
                    location: self.position,
                });
            }
            let fraction: f64 = fraction_digits
                .parse()
                .map_err(|_| LexError::NumericLiteral {
                    reason: format!("invalid fraction '{}'", fraction_digits),
                    location,
                })?;
            let scale = 10f64.powi(fraction_digits.len() as i32);
            TokenValue::Float(integer as f64 + fraction / scale)
        } else {
            TokenValue::Int(integer)
        };

        if let Some(ch) = self.current.filter(|c| c.is_ascii_digit() || *c == '.') {
            return Err(LexError::NumericLiteral {
                reason: format!("unexpected '{}' after number", ch),
                location: self.position,
            });
        }

        Token::new(TokenKind::NumericLiteral, Some(value), location)
    }

    /// Consume a run of ASCII digits
    fn digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.current.filter(|c| c.is_ascii_digit()) {
            digits.push(ch);
            self.advance();
        }
        digits
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Result<Token, LexError> {
        let location = self.position;
        let mut name = String::new();

        while let Some(ch) = self
            .current
            .filter(|c| c.is_alphanumeric() || *c == '_')
        {
            name.push(ch);
            self.advance();
        }

        match keyword_kind(&name) {
            Some(kind) => Token::new(kind, None, location),
            None => Token::new(TokenKind::Identifier, Some(TokenValue::Str(name)), location),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current.is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Load the next character from the source
    fn advance(&mut self) {
        self.position = self.source.position();
        self.current = self.source.next_char();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StringSource;

    fn lex(text: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new(StringSource::new(text)).tokenize()
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text).unwrap().iter().map(Token::kind).collect()
    }

    #[test]
    fn test_single_char_tokens() {
        for (ch, kind) in SINGLE_CHAR_TOKENS {
            let tokens = lex(&ch.to_string()).unwrap();
            assert_eq!(tokens.len(), 2, "for {:?}", ch);
            assert_eq!(tokens[0].kind(), *kind);
            assert_eq!(tokens[0].value(), None);
            assert_eq!(tokens[1].kind(), TokenKind::Eof);
        }
    }

    #[test]
    fn test_double_char_tokens() {
        for (text, kind) in DOUBLE_CHAR_TOKENS {
            let tokens = lex(text).unwrap();
            assert_eq!(tokens.len(), 2, "for {:?}", text);
            assert_eq!(tokens[0].kind(), *kind);
        }
    }

    #[test]
    fn test_keywords() {
        for (word, kind) in KEYWORDS {
            let tokens = lex(word).unwrap();
            assert_eq!(tokens[0].kind(), *kind);
            assert_eq!(tokens[0].value(), None);
        }
    }

    #[test]
    fn test_prefix_without_second_char() {
        assert_eq!(
            kinds("=<!>"),
            vec![
                TokenKind::Assignment,
                TokenKind::Less,
                TokenKind::Not,
                TokenKind::Greater,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds("=== !x"),
            vec![
                TokenKind::Equal,
                TokenKind::Assignment,
                TokenKind::Not,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_function_code() {
        let code = "
            fibonacci(n: int) returns int {
                if (n <= 1) { return n; }
                else {
                    var a: int = fibonacci(n-1);
                    return a+b;
                }
            }
        ";
        use TokenKind::*;
        assert_eq!(
            kinds(code),
            vec![
                Identifier, LParen, Identifier, Colon, Int, RParen, Returns, Int, LBrace, If,
                LParen, Identifier, LessEqual, NumericLiteral, RParen, LBrace, Return,
                Identifier, Semicolon, RBrace, Else, LBrace, Var, Identifier, Colon, Int,
                Assignment, Identifier, LParen, Identifier, Subtract, NumericLiteral, RParen,
                Semicolon, Return, Identifier, Add, Identifier, Semicolon, RBrace, RBrace, Eof
            ]
        );
    }

    #[test]
    fn test_identifier_value_and_position() {
        let tokens = lex("  foo_1\n bar").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Identifier);
        assert_eq!(tokens[0].value(), Some(&TokenValue::Str("foo_1".to_string())));
        assert_eq!(tokens[0].position(), Position::new(1, 3, 3));
        assert_eq!(tokens[1].position(), Position::new(2, 2, 10));
    }

    #[test]
    fn test_numeric_literals() {
        let tokens = lex("0 42 3.25").unwrap();
        assert_eq!(tokens[0].value(), Some(&TokenValue::Int(0)));
        assert_eq!(tokens[1].value(), Some(&TokenValue::Int(42)));
        assert_eq!(tokens[2].value(), Some(&TokenValue::Float(3.25)));
    }

    #[test]
    fn test_fraction_matches_formula() {
        for (n, f) in [(0u32, "5"), (12, "0625"), (7, "3"), (123456, "789"), (1, "000001")] {
            let tokens = lex(&format!("{}.{}", n, f)).unwrap();
            let fraction: f64 = f.parse().unwrap();
            let expected = n as f64 + fraction / 10f64.powi(f.len() as i32);
            assert_eq!(tokens[0].value(), Some(&TokenValue::Float(expected)));
        }
    }

    #[test]
    fn test_malformed_numbers() {
        for text in ["00", "00.5", "1.", "0012", "1.x", "1.2.3", "3.5.", "00.x12"] {
            assert!(
                matches!(lex(text), Err(LexError::NumericLiteral { .. })),
                "{:?} should fail",
                text
            );
        }
    }

    #[test]
    fn test_escapes() {
        let tokens = lex(r#""a\nb\tc\\d\"e""#).unwrap();
        assert_eq!(
            tokens[0].value(),
            Some(&TokenValue::Str("a\nb\tc\\d\"e".to_string()))
        );

        let tokens = lex(r#"'it\'s'"#).unwrap();
        assert_eq!(tokens[0].value(), Some(&TokenValue::Str("it's".to_string())));
    }

    #[test]
    fn test_unknown_escape_is_kept() {
        let tokens = lex(r#""a\qb""#).unwrap();
        assert_eq!(tokens[0].value(), Some(&TokenValue::Str("a\\qb".to_string())));
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("var a: string = 'Testing unterminated string;").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedString {
                location: Position::new(1, 17, 17)
            }
        );
        assert!(matches!(lex(r#""abc\"#), Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn test_string_length_limit() {
        let exact = format!("\"{}\"", "x".repeat(5));
        let source = StringSource::new(&exact);
        assert!(Lexer::with_max_string_length(source, 5).tokenize().is_ok());

        let long = format!("\"{}\"", "x".repeat(6));
        let source = StringSource::new(&long);
        assert!(matches!(
            Lexer::with_max_string_length(source, 5).tokenize(),
            Err(LexError::StringTooLong { max_length: 5, .. })
        ));
    }

    #[test]
    fn test_unknown_character() {
        let tokens = lex("a & b").unwrap();
        assert_eq!(tokens[1].kind(), TokenKind::Unknown);
        assert_eq!(tokens[1].value(), Some(&TokenValue::Char('&')));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new(StringSource::new("x"));
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Identifier);
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Eof);
    }

    #[test]
    fn test_token_value_must_match_kind() {
        let pos = Position::start();
        assert!(Token::new(
            TokenKind::StringLiteral,
            Some(TokenValue::Int(1)),
            pos
        )
        .is_err());
        assert!(Token::new(TokenKind::Identifier, None, pos).is_err());
        assert!(Token::new(TokenKind::If, Some(TokenValue::Str("if".into())), pos).is_err());
        assert!(Token::new(TokenKind::NumericLiteral, Some(TokenValue::Float(1.5)), pos).is_ok());
    }
}
