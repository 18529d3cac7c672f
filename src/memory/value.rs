//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime values
//! in the Misnomer interpreter. Values are tagged and checked at every use.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 64-bit signed integer
//! - [`Value::Float`]: 64-bit float
//! - [`Value::Str`]: owned UTF-8 string
//! - [`Value::Bool`]: result of comparisons and logical operators (not declarable)
//! - [`Value::Nothing`]: result of a call to a function that returned no value

use crate::parser::ast::Type;
use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    #[default]
    Nothing,
}

impl Value {
    /// Zero value bound by a declaration without initializer
    pub fn zero(ty: Type) -> Self {
        match ty {
            Type::Int => Value::Int(0),
            Type::Float => Value::Float(0.0),
            Type::String => Value::Str(String::new()),
            Type::Nothing => Value::Nothing,
        }
    }

    /// Name of the runtime type, as used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Nothing => "nothing",
        }
    }

    /// Check whether two values have the same runtime type
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Get the numeric value as a float, returns None if not a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Get the boolean value, returns None if not a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nothing => f.write_str("nothing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Value::Str("a b".to_string()).to_string(), "a b");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Nothing.to_string(), "nothing");
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(Value::zero(Type::Int), Value::Int(0));
        assert_eq!(Value::zero(Type::Float), Value::Float(0.0));
        assert_eq!(Value::zero(Type::String), Value::Str(String::new()));
    }

    #[test]
    fn test_same_type() {
        assert!(Value::Int(1).same_type(&Value::Int(2)));
        assert!(!Value::Int(1).same_type(&Value::Float(1.0)));
        assert!(Value::Str("a".into()).same_type(&Value::Str(String::new())));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Float(1.0).type_name(), "float");
        assert_eq!(Value::Bool(false).type_name(), "bool");
        assert_eq!(Value::Nothing.type_name(), "nothing");
    }
}
