//! Statement execution
//!
//! Adds `impl Interpreter` methods that dispatch on [`Stmt`] and run the
//! straight-line statements (declarations, assignments, `if`, calls). Loops
//! live in `loops`, `return`/`break`/`continue` in `jumps`.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::{NameKind, RuntimeError, TypeTarget};
use crate::interpreter::type_system;
use crate::memory::stack::StackFrame;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, Position, Stmt, Type};

impl Interpreter {
    /// Execute a single statement
    pub(crate) fn execute_statement(
        &mut self,
        stmt: &Stmt,
        frame: &mut StackFrame,
    ) -> Result<ControlFlow, RuntimeError> {
        match stmt {
            Stmt::VarDecl {
                name,
                var_type,
                init,
                location,
            } => {
                self.execute_var_decl(name, *var_type, init.as_ref(), *location, frame)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Assignment {
                name,
                value,
                location,
            } => {
                self.execute_assignment(name, value, *location, frame)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.execute_if(condition, then_branch, else_branch.as_deref(), frame),

            Stmt::While {
                condition, body, ..
            } => self.execute_while(condition, body, frame),

            Stmt::Return { expr, .. } => self.execute_return(expr.as_ref(), frame),

            Stmt::Break { .. } => Ok(ControlFlow::Break),

            Stmt::Continue { .. } => Ok(ControlFlow::Continue),

            Stmt::Call(call) => {
                // Call as statement (ignore return value)
                self.execute_function_call(call, frame)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Block(block) => self.execute_block(&block.statements, frame),
        }
    }

    /// Declare a variable in the current frame
    pub(crate) fn execute_var_decl(
        &mut self,
        name: &str,
        var_type: Type,
        init: Option<&Expr>,
        location: Position,
        frame: &mut StackFrame,
    ) -> Result<(), RuntimeError> {
        if frame.contains(name) {
            return Err(RuntimeError::AlreadyExists {
                kind: NameKind::Variable,
                name: name.to_string(),
                location,
            });
        }

        let value = match init {
            Some(expr) => {
                let value = self.evaluate_expr(expr, frame)?;
                type_system::check_declared(value, var_type, TypeTarget::Variable, name, location)?
            }
            None => Value::zero(var_type),
        };

        frame.declare(name, value);
        Ok(())
    }

    /// Assign to an existing variable. The runtime type may not change.
    pub(crate) fn execute_assignment(
        &mut self,
        name: &str,
        value: &Expr,
        location: Position,
        frame: &mut StackFrame,
    ) -> Result<(), RuntimeError> {
        if !frame.contains(name) {
            return Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            });
        }

        let new_value = self.evaluate_expr(value, frame)?;

        let Some(current) = frame.get_mut(name) else {
            return Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            });
        };

        if !current.same_type(&new_value) {
            return Err(RuntimeError::TypeMismatch {
                target: TypeTarget::Assignment,
                name: name.to_string(),
                expected: current.type_name().to_string(),
                got: new_value.type_name().to_string(),
                location,
            });
        }

        *current = new_value;
        Ok(())
    }

    /// Execute if / else
    fn execute_if(
        &mut self,
        condition: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
        frame: &mut StackFrame,
    ) -> Result<ControlFlow, RuntimeError> {
        if self.evaluate_condition(condition, frame)? {
            self.execute_statement(then_branch, frame)
        } else if let Some(else_branch) = else_branch {
            self.execute_statement(else_branch, frame)
        } else {
            Ok(ControlFlow::Normal)
        }
    }

    /// Evaluate an `if` / `while` condition, which must be a boolean
    pub(crate) fn evaluate_condition(
        &mut self,
        condition: &Expr,
        frame: &StackFrame,
    ) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expr(condition, frame)?;
        value
            .as_bool()
            .ok_or_else(|| RuntimeError::ConditionNotBoolean {
                got: value.type_name().to_string(),
                location: condition.location(),
            })
    }
}
