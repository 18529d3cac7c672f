//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, token helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a single-lookahead recursive descent parser:
//! - This module: Parser struct, token helpers, and coordination
//! - `declarations`: function definitions and parameter lists
//! - `statements`: blocks and statements (if, while, var, ...)
//! - `expressions`: the precedence ladder from `or` down to literals
//!
//! Tokens are pulled from the lexer on demand; only the current token is held.
//!
//! # Optional productions
//!
//! Productions that may legitimately not apply return `Ok(None)` and leave the
//! token stream untouched, letting the caller try the next alternative. Errors
//! are reserved for input that started a production but could not finish it.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind, TokenValue};
use crate::source::{SourceStream, StringSource};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Error raised by the lexer while the parser pulled a token
    Lex(LexError),

    /// The current token is not one of the accepted kinds
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: String,
        location: Position,
    },

    /// A function, `if`, `else` or `while` without a body
    MissingBody {
        construct: String,
        location: Position,
    },

    /// `if` / `while` with an empty condition
    MissingCondition {
        construct: String,
        location: Position,
    },

    /// An expression was required (after `=`, inside parentheses, as an argument)
    MissingExpression { found: String, location: Position },

    /// An operator without its operand
    MissingOperand {
        operator: String,
        found: String,
        location: Position,
    },

    /// Two functions with the same name
    DuplicateFunction { name: String, location: Position },

    /// Two parameters of one function with the same name
    DuplicateParameter {
        function: String,
        parameter: String,
        location: Position,
    },

    /// `break` or `continue` that is not inside a `while` body
    LoopControlOutsideLoop {
        statement: String,
        location: Position,
    },
}

impl ParseError {
    pub fn location(&self) -> Position {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::UnexpectedToken { location, .. }
            | ParseError::MissingBody { location, .. }
            | ParseError::MissingCondition { location, .. }
            | ParseError::MissingExpression { location, .. }
            | ParseError::MissingOperand { location, .. }
            | ParseError::DuplicateFunction { location, .. }
            | ParseError::DuplicateParameter { location, .. }
            | ParseError::LoopControlOutsideLoop { location, .. } => *location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let ParseError::Lex(err) = self {
            return write!(f, "{}", err);
        }

        let location = self.location();
        write!(
            f,
            "Parse error at line {}, column {}: ",
            location.line, location.column
        )?;

        match self {
            ParseError::Lex(_) => Ok(()),
            ParseError::UnexpectedToken {
                expected, found, ..
            } => {
                let expected: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
                write!(f, "expected {}, found {}", expected.join(" or "), found)
            }
            ParseError::MissingBody { construct, .. } => {
                write!(f, "there is no body for {}", construct)
            }
            ParseError::MissingCondition { construct, .. } => {
                write!(f, "missing condition in {} statement", construct)
            }
            ParseError::MissingExpression { found, .. } => {
                write!(f, "expected an expression, found {}", found)
            }
            ParseError::MissingOperand {
                operator, found, ..
            } => {
                write!(f, "expected an operand after '{}', found {}", operator, found)
            }
            ParseError::DuplicateFunction { name, .. } => {
                write!(f, "function '{}' is already defined", name)
            }
            ParseError::DuplicateParameter {
                function,
                parameter,
                ..
            } => {
                write!(
                    f,
                    "parameter '{}' of function '{}' is declared twice",
                    parameter, function
                )
            }
            ParseError::LoopControlOutsideLoop { statement, .. } => {
                write!(f, "'{}' outside of a loop", statement)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Recursive descent parser for Misnomer
pub struct Parser<S: SourceStream> {
    pub(crate) lexer: Lexer<S>,
    pub(crate) current: Token,
    /// Nesting depth of `while` bodies in the function being parsed
    pub(crate) loop_depth: usize,
}

impl Parser<StringSource> {
    /// Parser over in-memory source text
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Parser::new(Lexer::new(StringSource::new(source)))
    }
}

impl<S: SourceStream> Parser<S> {
    pub fn new(mut lexer: Lexer<S>) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            loop_depth: 0,
        })
    }

    /// Parse the entire program (a sequence of function definitions)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while let Some(function) = self.parse_function_definition()? {
            program.add_function(function)?;
        }

        self.expect_token(&[TokenKind::Eof])?;
        Ok(program)
    }

    // ===== Helper methods =====

    /// Consume the current token if it is one of `kinds`
    pub(crate) fn match_token(&mut self, kinds: &[TokenKind]) -> Result<Option<Token>, ParseError> {
        if kinds.contains(&self.current.kind()) {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume the current token, which must be one of `kinds`
    pub(crate) fn expect_token(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        match self.match_token(kinds)? {
            Some(token) => Ok(token),
            None => Err(ParseError::UnexpectedToken {
                expected: kinds.to_vec(),
                found: self.current.to_string(),
                location: self.current_location(),
            }),
        }
    }

    /// Consume an identifier token and return its name
    pub(crate) fn match_identifier(&mut self) -> Result<Option<(String, Position)>, ParseError> {
        let Some(token) = self.match_token(&[TokenKind::Identifier])? else {
            return Ok(None);
        };
        let location = token.position();
        match token.into_value() {
            Some(TokenValue::Str(name)) => Ok(Some((name, location))),
            other => Err(ParseError::Lex(LexError::InconsistentToken {
                kind: TokenKind::Identifier,
                value: other.map(|v| v.to_string()).unwrap_or_default(),
                location,
            })),
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, Position), ParseError> {
        match self.match_identifier()? {
            Some(ident) => Ok(ident),
            None => Err(ParseError::UnexpectedToken {
                expected: vec![TokenKind::Identifier],
                found: self.current.to_string(),
                location: self.current_location(),
            }),
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind() == kind
    }

    /// Replace the current token with the next one from the lexer
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn current_location(&self) -> Position {
        self.current.position()
    }

    pub(crate) fn describe_current(&self) -> String {
        self.current.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse("main() returns int { return 0; }").unwrap();

        assert_eq!(program.len(), 1);
        let main = program.function("main").unwrap();
        assert_eq!(main.params.len(), 0);
        assert_eq!(main.return_type, Type::Int);
        assert_eq!(main.body.statements.len(), 1);
        assert!(matches!(
            main.body.statements[0],
            Stmt::Return {
                expr: Some(Expr::IntLiteral(0, _)),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_program() {
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_function() {
        let err = parse("f() returns int { return 1; } f() returns int { return 2; }").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateFunction { ref name, .. } if name == "f"));
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse("main() returns int { return 0; } ;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_lexer_error_surfaces() {
        let err = parse("main() returns int { return 00; }").unwrap_err();
        assert!(matches!(err, ParseError::Lex(LexError::NumericLiteral { .. })));
    }

    #[test]
    fn test_unexpected_token_message() {
        let err = parse("main( returns int {}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 7: expected ')', found 'returns'"
        );
    }
}
