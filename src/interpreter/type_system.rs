//! Declared types and runtime value compatibility
//!
//! Misnomer checks types dynamically: a value is matched against a declared
//! [`Type`] when it is bound to a variable or parameter and when a function
//! returns.
//!
//! # Compatibility Rules
//!
//! - `int` admits `Int`
//! - `float` admits `Float`, and `Int` widened to `Float`
//! - `string` admits `Str`
//! - `nothing` admits only `Nothing`
//!
//! Assignment is stricter: the new value must have exactly the runtime type
//! of the value it replaces (see [`Interpreter::execute_assignment`]).
//!
//! [`Interpreter::execute_assignment`]: crate::interpreter::engine::Interpreter

use crate::interpreter::errors::{RuntimeError, TypeTarget};
use crate::memory::value::Value;
use crate::parser::ast::{Position, Type};
use std::cmp::Ordering;

/// Convert `value` to something storable under `ty`, or None when incompatible
pub fn convert(value: Value, ty: Type) -> Option<Value> {
    match (ty, value) {
        (Type::Int, value @ Value::Int(_)) => Some(value),
        (Type::Float, value @ Value::Float(_)) => Some(value),
        (Type::Float, Value::Int(n)) => Some(Value::Float(n as f64)),
        (Type::String, value @ Value::Str(_)) => Some(value),
        (Type::Nothing, Value::Nothing) => Some(Value::Nothing),
        _ => None,
    }
}

/// Check a value against a declared type, widening where allowed
pub(crate) fn check_declared(
    value: Value,
    ty: Type,
    target: TypeTarget,
    name: &str,
    location: Position,
) -> Result<Value, RuntimeError> {
    let got = value.type_name();
    convert(value, ty).ok_or_else(|| RuntimeError::TypeMismatch {
        target,
        name: name.to_string(),
        expected: ty.to_string(),
        got: got.to_string(),
        location,
    })
}

/// Equality across runtime types: numbers compare numerically, any other
/// pair of different types is unequal
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Nothing, Value::Nothing) => true,
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// Ordering of two numbers or two strings
///
/// The outer None means the pair cannot be ordered at all; the inner None is
/// an unordered float comparison (NaN).
pub fn ordering(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(Some(a.cmp(b))),
        (Value::Str(a), Value::Str(b)) => Some(Some(a.cmp(b))),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Some(a.partial_cmp(&b)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(convert(Value::Int(3), Type::Float), Some(Value::Float(3.0)));
        assert_eq!(convert(Value::Float(1.5), Type::Float), Some(Value::Float(1.5)));
    }

    #[test]
    fn test_no_narrowing_or_cross_conversion() {
        assert_eq!(convert(Value::Float(3.0), Type::Int), None);
        assert_eq!(convert(Value::Str("1".into()), Type::Int), None);
        assert_eq!(convert(Value::Int(1), Type::String), None);
        assert_eq!(convert(Value::Bool(true), Type::Int), None);
        assert_eq!(convert(Value::Int(0), Type::Nothing), None);
        assert_eq!(convert(Value::Nothing, Type::Int), None);
    }

    #[test]
    fn test_check_declared_reports_mismatch() {
        let err = check_declared(
            Value::Str("x".into()),
            Type::Int,
            TypeTarget::Variable,
            "a",
            Position::new(2, 5, 20),
        )
        .unwrap_err();

        assert_eq!(
            err,
            RuntimeError::TypeMismatch {
                target: TypeTarget::Variable,
                name: "a".to_string(),
                expected: "int".to_string(),
                got: "string".to_string(),
                location: Position::new(2, 5, 20),
            }
        );
    }

    #[test]
    fn test_values_equal() {
        assert!(values_equal(&Value::Int(2), &Value::Float(2.0)));
        assert!(!values_equal(&Value::Int(2), &Value::Str("2".into())));
        assert!(values_equal(&Value::Str("a".into()), &Value::Str("a".into())));
        assert!(!values_equal(&Value::Bool(true), &Value::Int(1)));
    }

    #[test]
    fn test_ordering() {
        assert_eq!(ordering(&Value::Int(1), &Value::Float(1.5)), Some(Some(Ordering::Less)));
        assert_eq!(
            ordering(&Value::Str("b".into()), &Value::Str("a".into())),
            Some(Some(Ordering::Greater))
        );
        assert_eq!(ordering(&Value::Str("1".into()), &Value::Int(1)), None);
        assert_eq!(ordering(&Value::Bool(true), &Value::Bool(false)), None);
    }
}
