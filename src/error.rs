//! Top-level error type
//!
//! Every stage has its own error enum; [`Error`] wraps them so callers of
//! [`run_str`](crate::run_str) / [`run_file`](crate::run_file) handle one type.

use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::Position;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use crate::source::SourceError;
use std::fmt;

/// Any error raised while loading, lexing, parsing or running a program
#[derive(Debug)]
pub enum Error {
    Source(SourceError),
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl Error {
    /// Source position the error points at, when it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Source(_) => None,
            Error::Lex(err) => Some(err.location()),
            Error::Parse(err) => Some(err.location()),
            Error::Runtime(err) => err.location(),
        }
    }

    /// Short name of the failing stage
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Source(_) => "Source error",
            Error::Lex(_) => "Lexer error",
            Error::Parse(_) => "Parser error",
            Error::Runtime(_) => "Runtime error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Source(err) => write!(f, "{}", err),
            Error::Lex(err) => write!(f, "{}", err),
            Error::Parse(err) => write!(f, "{}", err),
            Error::Runtime(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Source(err) => Some(err),
            Error::Lex(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Runtime(err) => Some(err),
        }
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::Source(err)
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(err) => Error::Lex(err),
            err => Error::Parse(err),
        }
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Error::Runtime(err)
    }
}
