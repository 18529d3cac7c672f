use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::StackFrame;
use crate::memory::value::Value;
use crate::parser::ast::Expr;

impl Interpreter {
    /// `return expr?`: a bare return yields `Nothing`
    pub(crate) fn execute_return(
        &mut self,
        expr: Option<&Expr>,
        frame: &StackFrame,
    ) -> Result<ControlFlow, RuntimeError> {
        let value = match expr {
            Some(ret_expr) => self.evaluate_expr(ret_expr, frame)?,
            None => Value::Nothing,
        };
        Ok(ControlFlow::Return(value))
    }
}
