//! Misnomer interpreter execution engine
//!
//! This module provides the tree-walking interpreter:
//! - [`engine`]: Interpreter struct, function table, calls
//! - [`statements`], [`loops`], [`jumps`]: statement execution
//! - [`expressions`]: expression evaluation
//! - [`builtins`]: host-implemented functions
//! - [`type_system`]: declared type checks and value comparison
//! - [`errors`]: Runtime error types
//!
//! # Execution Model
//!
//! The interpreter walks the AST directly. Every call gets a fresh
//! [`StackFrame`](crate::memory::stack::StackFrame) holding its variables and
//! the remaining call budget; the function table is shared by all frames.
//! Statements report how they ended through a `ControlFlow` value, which is
//! how `return`, `break` and `continue` unwind.

pub mod builtins;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod expressions;
pub mod jumps;
pub mod loops;
pub mod statements;
pub mod type_system;
