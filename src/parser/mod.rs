//! Misnomer source code parser
//!
//! This module transforms Misnomer source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (characters → tokens)
//! - [`parse`]: Parser struct, errors and token helpers
//! - [`declarations`], [`statements`], [`expressions`]: the grammar, split by construct
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Types: `int`, `float`, `string`, and `nothing` as a return type
//! - Statements: `var` declarations, assignments, `if`/`else`, `while`,
//!   `return`, `break`, `continue`, call statements
//! - Expressions: arithmetic, comparison, `and`/`or`/`not`, function calls
//! - A program is a list of function definitions with an entry point `main`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead. Tokens
//! are pulled from the lexer lazily. No external parser generator dependencies.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
