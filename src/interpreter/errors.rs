//! Runtime error types for the Misnomer interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lexer or parse errors).
//!
//! All runtime errors are fatal - they halt execution and are reported to the caller.

use crate::parser::ast::{Position, Type};
use std::fmt;

/// What kind of name clashed in [`RuntimeError::AlreadyExists`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Variable,
    Function,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Variable => f.write_str("variable"),
            NameKind::Function => f.write_str("function"),
        }
    }
}

/// Where a value was checked against a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTarget {
    Variable,
    Assignment,
    Return,
}

impl fmt::Display for TypeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTarget::Variable => f.write_str("variable"),
            TypeTarget::Assignment => f.write_str("assignment to"),
            TypeTarget::Return => f.write_str("return value of"),
        }
    }
}

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Main function not found
    NoMainFunction,

    /// Call chain deeper than the configured limit
    CallDepthExceeded { function: String, limit: usize },

    /// A variable declared twice in one frame, or a function clashing with another
    AlreadyExists {
        kind: NameKind,
        name: String,
        location: Position,
    },

    /// Undefined variable reference
    UndefinedVariable { name: String, location: Position },

    /// Undefined function call
    UndefinedFunction { name: String, location: Position },

    /// Function argument count mismatch
    ArgumentCountMismatch {
        function: String,
        expected: String,
        got: usize,
        location: Position,
    },

    /// Operator applied to a value of the wrong type
    BadOperandType {
        operator: String,
        operand: String,
        node: String,
        location: Position,
    },

    /// Reciprocal of zero
    DivisionByZero { location: Position },

    /// Conversion builtin could not convert its argument
    CastingError {
        target: Type,
        value: String,
        location: Position,
    },

    /// Value incompatible with a declared type
    TypeMismatch {
        target: TypeTarget,
        name: String,
        expected: String,
        got: String,
        location: Position,
    },

    /// `if` / `while` condition that is not a boolean
    ConditionNotBoolean { got: String, location: Position },

    /// Integer overflow in arithmetic operation
    IntegerOverflow {
        operation: String,
        location: Position,
    },

    /// Terminal input or output failed
    Io { message: String, location: Position },

    /// The worker thread that runs the program could not be started
    RunnerUnavailable { message: String },
}

impl RuntimeError {
    pub fn location(&self) -> Option<Position> {
        match self {
            RuntimeError::NoMainFunction
            | RuntimeError::CallDepthExceeded { .. }
            | RuntimeError::RunnerUnavailable { .. } => None,
            RuntimeError::AlreadyExists { location, .. }
            | RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::UndefinedFunction { location, .. }
            | RuntimeError::ArgumentCountMismatch { location, .. }
            | RuntimeError::BadOperandType { location, .. }
            | RuntimeError::DivisionByZero { location }
            | RuntimeError::CastingError { location, .. }
            | RuntimeError::TypeMismatch { location, .. }
            | RuntimeError::ConditionNotBoolean { location, .. }
            | RuntimeError::IntegerOverflow { location, .. }
            | RuntimeError::Io { location, .. } => Some(*location),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::NoMainFunction => {
                write!(f, "No main() function found")
            }
            RuntimeError::CallDepthExceeded { function, limit } => {
                write!(
                    f,
                    "Maximum call depth of {} exceeded when calling '{}'",
                    limit, function
                )
            }
            RuntimeError::AlreadyExists {
                kind,
                name,
                location,
            } => {
                write!(f, "The {} '{}' already exists at {}", kind, name, location)
            }
            RuntimeError::UndefinedVariable { name, location } => {
                write!(f, "Undefined variable '{}' at {}", name, location)
            }
            RuntimeError::UndefinedFunction { name, location } => {
                write!(f, "Undefined function '{}' at {}", name, location)
            }
            RuntimeError::ArgumentCountMismatch {
                function,
                expected,
                got,
                location,
            } => {
                write!(
                    f,
                    "Function '{}' expects {} argument{}, got {} at {}",
                    function,
                    expected,
                    if expected == "1" { "" } else { "s" },
                    got,
                    location
                )
            }
            RuntimeError::BadOperandType {
                operator,
                operand,
                node,
                location,
            } => {
                write!(
                    f,
                    "Bad operand type for '{}': {} in {} at {}",
                    operator, operand, node, location
                )
            }
            RuntimeError::DivisionByZero { location } => {
                write!(f, "Division by zero at {}", location)
            }
            RuntimeError::CastingError {
                target,
                value,
                location,
            } => {
                write!(
                    f,
                    "Cannot convert {} to {} at {}",
                    value, target, location
                )
            }
            RuntimeError::TypeMismatch {
                target,
                name,
                expected,
                got,
                location,
            } => {
                write!(
                    f,
                    "Type mismatch in {} '{}' at {}: expected {}, got {}",
                    target, name, location, expected, got
                )
            }
            RuntimeError::ConditionNotBoolean { got, location } => {
                write!(
                    f,
                    "Condition must be a comparison or logical expression, got {} at {}",
                    got, location
                )
            }
            RuntimeError::IntegerOverflow {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Integer overflow in operation: {} at {}",
                    operation, location
                )
            }
            RuntimeError::Io { message, location } => {
                write!(f, "Terminal I/O failed at {}: {}", location, message)
            }
            RuntimeError::RunnerUnavailable { message } => {
                write!(f, "Could not start the interpreter thread: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
