//! Built-in function implementations
//!
//! This module provides the functions that are handled directly by the
//! interpreter rather than being defined in user code. They are registered in
//! the function table before any user function, so a user function may not
//! reuse their names.
//!
//! # Supported Built-ins
//!
//! - `print(args...)`: textual forms joined by spaces, then a newline
//! - `read()`: one line of input, without its terminator
//! - `to_int(x)`, `to_float(x)`, `to_string(x)`: conversions
//! - `find_max(args...)`, `find_min(args...)`: extreme of numbers or of strings
//!
//! Builtins do not consume call depth.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::type_system;
use crate::memory::value::Value;
use crate::parser::ast::{Position, Type};
use std::cmp::Ordering;

/// Host-implemented functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    Read,
    ToInt,
    ToFloat,
    ToString,
    FindMax,
    FindMin,
}

/// Accepted argument counts
enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Builtin {
    pub const ALL: &'static [Builtin] = &[
        Builtin::Print,
        Builtin::Read,
        Builtin::ToInt,
        Builtin::ToFloat,
        Builtin::ToString,
        Builtin::FindMax,
        Builtin::FindMin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Read => "read",
            Builtin::ToInt => "to_int",
            Builtin::ToFloat => "to_float",
            Builtin::ToString => "to_string",
            Builtin::FindMax => "find_max",
            Builtin::FindMin => "find_min",
        }
    }

    fn arity(&self) -> Arity {
        match self {
            Builtin::Print => Arity::AtLeast(0),
            Builtin::Read => Arity::Exactly(0),
            Builtin::ToInt | Builtin::ToFloat | Builtin::ToString => Arity::Exactly(1),
            Builtin::FindMax | Builtin::FindMin => Arity::AtLeast(1),
        }
    }

    fn check_arity(&self, got: usize, location: Position) -> Result<(), RuntimeError> {
        let (ok, expected) = match self.arity() {
            Arity::Exactly(n) => (got == n, n.to_string()),
            Arity::AtLeast(n) => (got >= n, format!("at least {}", n)),
        };
        if ok {
            Ok(())
        } else {
            Err(RuntimeError::ArgumentCountMismatch {
                function: self.name().to_string(),
                expected,
                got,
                location,
            })
        }
    }
}

impl Interpreter {
    /// Invoke a builtin with already evaluated arguments
    pub(crate) fn call_builtin(
        &mut self,
        builtin: Builtin,
        args: Vec<Value>,
        location: Position,
    ) -> Result<Value, RuntimeError> {
        builtin.check_arity(args.len(), location)?;

        match builtin {
            Builtin::Print => self.builtin_print(&args, location),
            Builtin::Read => self.builtin_read(location),
            Builtin::ToInt => convert_to_int(first(args), location),
            Builtin::ToFloat => convert_to_float(first(args), location),
            Builtin::ToString => convert_to_string(first(args), location),
            Builtin::FindMax => find_extreme(builtin, args, Ordering::Greater, location),
            Builtin::FindMin => find_extreme(builtin, args, Ordering::Less, location),
        }
    }

    fn builtin_print(&mut self, args: &[Value], location: Position) -> Result<Value, RuntimeError> {
        let text = args
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        self.terminal
            .print_line(&text)
            .map_err(|e| RuntimeError::Io {
                message: e.to_string(),
                location,
            })?;

        Ok(Value::Nothing)
    }

    fn builtin_read(&mut self, location: Position) -> Result<Value, RuntimeError> {
        self.terminal
            .read_line()
            .map(Value::Str)
            .map_err(|e| RuntimeError::Io {
                message: e.to_string(),
                location,
            })
    }
}

fn first(args: Vec<Value>) -> Value {
    args.into_iter().next().unwrap_or_default()
}

fn casting_error(target: Type, value: &Value, location: Position) -> RuntimeError {
    let value = match value {
        Value::Str(s) => format!("\"{}\"", s),
        other => other.to_string(),
    };
    RuntimeError::CastingError {
        target,
        value,
        location,
    }
}

fn convert_to_int(value: Value, location: Position) -> Result<Value, RuntimeError> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    const INT_RANGE: f64 = 9_223_372_036_854_775_808.0;

    match &value {
        Value::Int(_) => Ok(value),
        Value::Float(x) if x.fract() == 0.0 && *x >= -INT_RANGE && *x < INT_RANGE => {
            Ok(Value::Int(*x as i64))
        }
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| casting_error(Type::Int, &value, location)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        _ => Err(casting_error(Type::Int, &value, location)),
    }
}

fn convert_to_float(value: Value, location: Position) -> Result<Value, RuntimeError> {
    match &value {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(_) => Ok(value),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| casting_error(Type::Float, &value, location)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Nothing => Err(casting_error(Type::Float, &value, location)),
    }
}

fn convert_to_string(value: Value, location: Position) -> Result<Value, RuntimeError> {
    match value {
        Value::Nothing => Err(casting_error(Type::String, &value, location)),
        Value::Str(_) => Ok(value),
        other => Ok(Value::Str(other.to_string())),
    }
}

/// Largest (`Ordering::Greater`) or smallest (`Ordering::Less`) argument
fn find_extreme(
    builtin: Builtin,
    args: Vec<Value>,
    wanted: Ordering,
    location: Position,
) -> Result<Value, RuntimeError> {
    let bad_argument = |value: &Value, best: &Value| RuntimeError::BadOperandType {
        operator: builtin.name().to_string(),
        operand: if value.same_type(best) || (value.is_number() && best.is_number()) {
            value.type_name().to_string()
        } else {
            format!("{} and {}", best.type_name(), value.type_name())
        },
        node: "function call".to_string(),
        location,
    };

    let mut values = args.into_iter();
    let mut best = values.next().unwrap_or_default();
    if !best.is_number() && !matches!(best, Value::Str(_)) {
        return Err(bad_argument(&best, &best));
    }

    for value in values {
        match type_system::ordering(&value, &best) {
            Some(Some(ordering)) if ordering == wanted => best = value,
            Some(_) => {}
            None => return Err(bad_argument(&value, &best)),
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::start()
    }

    #[test]
    fn test_to_int() {
        assert_eq!(convert_to_int(Value::Str("-155".into()), pos()).unwrap(), Value::Int(-155));
        assert_eq!(convert_to_int(Value::Str(" 42 ".into()), pos()).unwrap(), Value::Int(42));
        assert_eq!(convert_to_int(Value::Float(3.0), pos()).unwrap(), Value::Int(3));
        assert_eq!(convert_to_int(Value::Bool(true), pos()).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_to_int_rejects_fractions() {
        assert!(matches!(
            convert_to_int(Value::Float(2.5), pos()),
            Err(RuntimeError::CastingError {
                target: Type::Int,
                ..
            })
        ));
        match convert_to_int(Value::Str("2.5".into()), pos()).unwrap_err() {
            RuntimeError::CastingError { target, value, .. } => {
                assert_eq!(target, Type::Int);
                assert_eq!(value, "\"2.5\"");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_to_float() {
        assert_eq!(convert_to_float(Value::Int(2), pos()).unwrap(), Value::Float(2.0));
        assert_eq!(
            convert_to_float(Value::Str("0.25".into()), pos()).unwrap(),
            Value::Float(0.25)
        );
        assert!(convert_to_float(Value::Str("abc".into()), pos()).is_err());
        assert!(convert_to_float(Value::Nothing, pos()).is_err());
    }

    #[test]
    fn test_to_string() {
        assert_eq!(
            convert_to_string(Value::Float(2.0), pos()).unwrap(),
            Value::Str("2.0".into())
        );
        assert_eq!(
            convert_to_string(Value::Int(-3), pos()).unwrap(),
            Value::Str("-3".into())
        );
        assert!(convert_to_string(Value::Nothing, pos()).is_err());
    }

    #[test]
    fn test_find_extremes() {
        let numbers = vec![Value::Int(3), Value::Float(7.5), Value::Int(-1)];
        assert_eq!(
            find_extreme(Builtin::FindMax, numbers.clone(), Ordering::Greater, pos()).unwrap(),
            Value::Float(7.5)
        );
        assert_eq!(
            find_extreme(Builtin::FindMin, numbers, Ordering::Less, pos()).unwrap(),
            Value::Int(-1)
        );

        let words = vec![Value::Str("pear".into()), Value::Str("apple".into())];
        assert_eq!(
            find_extreme(Builtin::FindMin, words, Ordering::Less, pos()).unwrap(),
            Value::Str("apple".into())
        );
    }

    #[test]
    fn test_find_extreme_mixed_types() {
        let mixed = vec![Value::Int(1), Value::Str("a".into())];
        assert!(matches!(
            find_extreme(Builtin::FindMax, mixed, Ordering::Greater, pos()),
            Err(RuntimeError::BadOperandType { .. })
        ));
    }

    #[test]
    fn test_arity() {
        assert!(Builtin::Read.check_arity(0, pos()).is_ok());
        assert!(Builtin::Print.check_arity(5, pos()).is_ok());
        match Builtin::ToInt.check_arity(2, pos()).unwrap_err() {
            RuntimeError::ArgumentCountMismatch { expected, got, .. } => {
                assert_eq!(expected, "1");
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(Builtin::FindMax.check_arity(0, pos()).is_err());
    }
}
