// Execution engine for the Misnomer interpreter

use crate::config::Config;
use crate::interpreter::builtins::Builtin;
use crate::interpreter::constants::runner_stack_bytes;
use crate::interpreter::errors::{NameKind, RuntimeError, TypeTarget};
use crate::interpreter::type_system;
use crate::memory::stack::StackFrame;
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::terminal::Terminal;
use rustc_hash::FxHashMap;
use std::panic;
use std::sync::Arc;
use std::thread;
use tracing::debug;

/// Entry in the function table
#[derive(Debug, Clone)]
pub enum Callable {
    Builtin(Builtin),
    User(Arc<FunctionDef>),
}

/// Outcome of executing a statement
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ControlFlow {
    Normal,
    Return(Value),
    Break,
    Continue,
}

/// The main interpreter that executes a Misnomer program
pub struct Interpreter {
    /// User functions in declaration order, registered into `functions` when a run starts
    program: Vec<Arc<FunctionDef>>,

    /// Function table shared by every frame (builtins and user functions)
    pub(crate) functions: FxHashMap<String, Callable>,

    /// Terminal for print/read
    pub(crate) terminal: Terminal,

    /// Call budget of the root frame
    pub(crate) max_call_depth: usize,
}

impl Interpreter {
    /// Create a new interpreter with default settings and a capturing terminal
    pub fn new(program: Program) -> Self {
        Self::with_config(program, &Config::default(), Terminal::new())
    }

    pub fn with_config(program: Program, config: &Config, terminal: Terminal) -> Self {
        Interpreter {
            program: program.into_functions().into_iter().map(Arc::new).collect(),
            functions: FxHashMap::default(),
            terminal,
            max_call_depth: config.max_call_depth,
        }
    }

    /// Run the program and return its exit value
    ///
    /// The exit value is whatever `main` returns, or `Int(0)` when it returns nothing.
    ///
    /// Interpreted calls recurse on the host stack, so the program runs on a
    /// worker thread whose stack fits `max_call_depth` nested calls. The call
    /// budget always trips before the host stack runs out.
    pub fn run(&mut self) -> Result<Value, RuntimeError> {
        let stack_size = runner_stack_bytes(self.max_call_depth);

        thread::scope(|scope| {
            let handle = thread::Builder::new()
                .name("misnomer-runner".to_string())
                .stack_size(stack_size)
                .spawn_scoped(scope, move || self.run_main())
                .map_err(|err| RuntimeError::RunnerUnavailable {
                    message: err.to_string(),
                })?;

            match handle.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            }
        })
    }

    /// Register functions and execute `main` on the current thread
    fn run_main(&mut self) -> Result<Value, RuntimeError> {
        self.register_functions()?;

        let main_fn = match self.functions.get("main") {
            Some(Callable::User(def)) => Arc::clone(def),
            _ => return Err(RuntimeError::NoMainFunction),
        };

        // main's body runs directly in the root frame
        let mut frame = StackFrame::new("main", self.max_call_depth);
        let value = match self.execute_block(&main_fn.body.statements, &mut frame)? {
            ControlFlow::Return(Value::Nothing) => Value::Int(0),
            ControlFlow::Return(value) => value,
            _ => Value::Int(0),
        };

        debug!(exit_value = %value, "program finished");
        Ok(value)
    }

    /// Output captured so far
    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn into_terminal(self) -> Terminal {
        self.terminal
    }

    /// Fill the function table: builtins first, then user functions in declaration order
    fn register_functions(&mut self) -> Result<(), RuntimeError> {
        self.functions.clear();
        for builtin in Builtin::ALL {
            self.functions
                .insert(builtin.name().to_string(), Callable::Builtin(*builtin));
        }

        for function in &self.program {
            if self.functions.contains_key(&function.name) {
                return Err(RuntimeError::AlreadyExists {
                    kind: NameKind::Function,
                    name: function.name.clone(),
                    location: function.location,
                });
            }
            self.functions
                .insert(function.name.clone(), Callable::User(Arc::clone(function)));
        }

        Ok(())
    }

    /// Execute statements in order, stopping at the first non-normal outcome
    pub(crate) fn execute_block(
        &mut self,
        statements: &[Stmt],
        frame: &mut StackFrame,
    ) -> Result<ControlFlow, RuntimeError> {
        for stmt in statements {
            let flow = self.execute_statement(stmt, frame)?;
            if flow != ControlFlow::Normal {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }

    /// Evaluate a call: arguments left to right, then dispatch
    pub(crate) fn execute_function_call(
        &mut self,
        call: &CallExpr,
        frame: &StackFrame,
    ) -> Result<Value, RuntimeError> {
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.evaluate_expr(arg, frame)?);
        }

        let callable = self.functions.get(&call.name).cloned().ok_or_else(|| {
            RuntimeError::UndefinedFunction {
                name: call.name.clone(),
                location: call.location,
            }
        })?;

        match callable {
            Callable::Builtin(builtin) => self.call_builtin(builtin, args, call.location),
            Callable::User(function) => {
                self.call_user_function(&function, args, frame, call.location)
            }
        }
    }

    /// Call a user-defined function in a fresh frame
    fn call_user_function(
        &mut self,
        function: &FunctionDef,
        args: Vec<Value>,
        caller: &StackFrame,
        location: Position,
    ) -> Result<Value, RuntimeError> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: function.name.clone(),
                expected: function.params.len().to_string(),
                got: args.len(),
                location,
            });
        }

        let Some(depth) = caller.child_depth() else {
            return Err(RuntimeError::CallDepthExceeded {
                function: function.name.clone(),
                limit: self.max_call_depth,
            });
        };

        // arguments are bound as given; declared parameter types are not enforced
        let mut frame = StackFrame::new(function.name.as_str(), depth);
        for (param, arg) in function.params.iter().zip(args) {
            frame.declare(&param.name, arg);
        }

        debug!(
            function = %function.name,
            remaining_depth = frame.remaining_depth(),
            "call"
        );

        let result = match self.execute_block(&function.body.statements, &mut frame)? {
            ControlFlow::Return(value) => value,
            _ => Value::Nothing,
        };

        type_system::check_declared(
            result,
            function.return_type,
            TypeTarget::Return,
            &function.name,
            location,
        )
    }
}
