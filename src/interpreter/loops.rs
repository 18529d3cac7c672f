//! Loop statement execution (`while`).
//!
//! `break` and `continue` surface from the body as [`ControlFlow`] signals and
//! are translated into a `LoopBodyResult` so the loop driver can react without
//! matching on every signal itself. A `return` inside the body unwinds the loop
//! and propagates to the enclosing function.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::StackFrame;
use crate::parser::ast::{Expr, Stmt};

/// Result returned by [`Interpreter::execute_loop_body`] to signal how the body ended.
pub(crate) enum LoopBodyResult {
    /// Body completed normally or via `continue`, so the loop should iterate again.
    Continue,
    /// `break` was encountered, so the loop should exit cleanly.
    Break,
    /// `return` was triggered; the loop unwinds and hands the signal to its caller.
    Exit(ControlFlow),
}

impl Interpreter {
    /// Executes the loop body once.
    pub(crate) fn execute_loop_body(
        &mut self,
        body: &Stmt,
        frame: &mut StackFrame,
    ) -> Result<LoopBodyResult, RuntimeError> {
        match self.execute_statement(body, frame)? {
            ControlFlow::Normal | ControlFlow::Continue => Ok(LoopBodyResult::Continue),
            ControlFlow::Break => Ok(LoopBodyResult::Break),
            flow @ ControlFlow::Return(_) => Ok(LoopBodyResult::Exit(flow)),
        }
    }

    /// Executes a `while (condition) body` loop.
    ///
    /// The condition is evaluated before each iteration and must be a boolean.
    pub(crate) fn execute_while(
        &mut self,
        condition: &Expr,
        body: &Stmt,
        frame: &mut StackFrame,
    ) -> Result<ControlFlow, RuntimeError> {
        while self.evaluate_condition(condition, frame)? {
            match self.execute_loop_body(body, frame)? {
                LoopBodyResult::Continue => {}
                LoopBodyResult::Break => break,
                LoopBodyResult::Exit(flow) => return Ok(flow),
            }
        }
        Ok(ControlFlow::Normal)
    }
}
