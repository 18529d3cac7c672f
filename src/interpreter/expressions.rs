//! Expression evaluation
//!
//! Adds `impl Interpreter` methods that evaluate [`Expr`] nodes against the
//! current frame.
//!
//! # Operators
//!
//! - `+` / `*` chains fold from `Int(0)` / `Int(1)`; two ints stay an int
//!   (overflow is an error), any float operand makes the result a float
//! - unary `-` negates a number; the reciprocal (right operand of `/`) always
//!   yields a float and rejects zero
//! - `and` / `or` short-circuit left to right over boolean operands
//! - `==` / `!=` accept any pair; ordering needs two numbers or two strings

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::type_system;
use crate::memory::stack::StackFrame;
use crate::memory::value::Value;
use crate::parser::ast::{CmpOp, Expr, NaryOp, Position, UnOp};
use std::cmp::Ordering;

impl Interpreter {
    /// Evaluate an expression and return its value
    pub(crate) fn evaluate_expr(
        &mut self,
        expr: &Expr,
        frame: &StackFrame,
    ) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLiteral(n, _) => Ok(Value::Int(*n)),

            Expr::FloatLiteral(x, _) => Ok(Value::Float(*x)),

            Expr::StringLiteral(s, _) => Ok(Value::Str(s.clone())),

            Expr::Identifier(name, loc) => {
                frame
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        location: *loc,
                    })
            }

            Expr::Call(call) => self.execute_function_call(call, frame),

            Expr::UnaryOp {
                op,
                operand,
                location,
            } => {
                let value = self.evaluate_expr(operand, frame)?;
                evaluate_unary_op(*op, value, operand, *location)
            }

            Expr::NaryOp {
                op: op @ (NaryOp::And | NaryOp::Or),
                operands,
                ..
            } => self.evaluate_logical(*op, operands, frame),

            Expr::NaryOp { op, operands, .. } => self.evaluate_arithmetic(*op, operands, frame),

            Expr::Comparison {
                op,
                left,
                right,
                location,
            } => {
                let left = self.evaluate_expr(left, frame)?;
                let right = self.evaluate_expr(right, frame)?;
                evaluate_comparison(*op, &left, &right, *location)
            }
        }
    }

    /// Short-circuiting `and` / `or`
    fn evaluate_logical(
        &mut self,
        op: NaryOp,
        operands: &[Expr],
        frame: &StackFrame,
    ) -> Result<Value, RuntimeError> {
        // `and` stops at the first false, `or` at the first true
        let stop_at = op == NaryOp::Or;

        for operand in operands {
            let value = self.evaluate_expr(operand, frame)?;
            let Some(b) = value.as_bool() else {
                return Err(bad_operand(op.symbol(), &value, operand));
            };
            if b == stop_at {
                return Ok(Value::Bool(stop_at));
            }
        }

        Ok(Value::Bool(!stop_at))
    }

    /// `+` / `*` chains
    fn evaluate_arithmetic(
        &mut self,
        op: NaryOp,
        operands: &[Expr],
        frame: &StackFrame,
    ) -> Result<Value, RuntimeError> {
        let mut acc = match op {
            NaryOp::Multiply => Value::Int(1),
            _ => Value::Int(0),
        };

        for operand in operands {
            let value = self.evaluate_expr(operand, frame)?;
            acc = apply_arithmetic(op, acc, value, operand)?;
        }

        Ok(acc)
    }
}

/// Combine the running result of a chain with its next operand
fn apply_arithmetic(
    op: NaryOp,
    acc: Value,
    value: Value,
    operand: &Expr,
) -> Result<Value, RuntimeError> {
    match (&acc, &value) {
        (Value::Int(a), Value::Int(b)) => {
            let result = match op {
                NaryOp::Multiply => a.checked_mul(*b),
                _ => a.checked_add(*b),
            };
            result
                .map(Value::Int)
                .ok_or_else(|| RuntimeError::IntegerOverflow {
                    operation: format!("{} {} {}", a, op.symbol(), b),
                    location: operand.location(),
                })
        }
        _ => match (acc.as_f64(), value.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(match op {
                NaryOp::Multiply => a * b,
                _ => a + b,
            })),
            _ => Err(bad_operand(op.symbol(), &value, operand)),
        },
    }
}

fn evaluate_unary_op(
    op: UnOp,
    value: Value,
    operand: &Expr,
    location: Position,
) -> Result<Value, RuntimeError> {
    match (op, &value) {
        (UnOp::Negate, Value::Int(n)) => {
            n.checked_neg()
                .map(Value::Int)
                .ok_or_else(|| RuntimeError::IntegerOverflow {
                    operation: format!("-{}", n),
                    location,
                })
        }
        (UnOp::Negate, Value::Float(x)) => Ok(Value::Float(-x)),

        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),

        (UnOp::Reciprocal, Value::Int(0)) => Err(RuntimeError::DivisionByZero { location }),
        (UnOp::Reciprocal, Value::Float(x)) if *x == 0.0 => {
            Err(RuntimeError::DivisionByZero { location })
        }
        (UnOp::Reciprocal, Value::Int(n)) => Ok(Value::Float(1.0 / *n as f64)),
        (UnOp::Reciprocal, Value::Float(x)) => Ok(Value::Float(1.0 / x)),

        _ => Err(bad_operand(op.symbol(), &value, operand)),
    }
}

fn evaluate_comparison(
    op: CmpOp,
    left: &Value,
    right: &Value,
    location: Position,
) -> Result<Value, RuntimeError> {
    let result = match op {
        CmpOp::Equal => type_system::values_equal(left, right),
        CmpOp::NotEqual => !type_system::values_equal(left, right),
        _ => {
            let Some(ordering) = type_system::ordering(left, right) else {
                return Err(RuntimeError::BadOperandType {
                    operator: op.symbol().to_string(),
                    operand: format!("{} and {}", left.type_name(), right.type_name()),
                    node: "comparison".to_string(),
                    location,
                });
            };
            match (op, ordering) {
                (CmpOp::Less, Some(Ordering::Less)) => true,
                (CmpOp::LessEqual, Some(Ordering::Less | Ordering::Equal)) => true,
                (CmpOp::Greater, Some(Ordering::Greater)) => true,
                (CmpOp::GreaterEqual, Some(Ordering::Greater | Ordering::Equal)) => true,
                _ => false,
            }
        }
    };
    Ok(Value::Bool(result))
}

fn bad_operand(operator: &str, value: &Value, operand: &Expr) -> RuntimeError {
    RuntimeError::BadOperandType {
        operator: operator.to_string(),
        operand: value.type_name().to_string(),
        node: operand.kind_name().to_string(),
        location: operand.location(),
    }
}
