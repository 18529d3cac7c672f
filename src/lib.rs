//! # Introduction
//!
//! Misnomer is a small statically-declared, dynamically-checked language of
//! functions over integers, floats and strings. This crate tokenises Misnomer
//! source, parses it into an AST and executes it with a tree-walking
//! interpreter.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → exit value
//! ```
//!
//! 1. [`source`]: character streams over strings and UTF-8 files.
//! 2. [`parser`]: tokenises the source and builds an AST; tokens are pulled
//!    lazily with one token of lookahead.
//! 3. [`interpreter`]: walks the AST with per-call frames and a bounded call
//!    depth.
//! 4. [`memory`]: runtime [`memory::value::Value`]s and
//!    [`memory::stack::StackFrame`]s.
//! 5. [`terminal`]: output capture and input for `print` / `read`.
//! 6. [`diagnostic`]: error rendering for the command line.
//!
//! ## Example
//!
//! ```
//! use misnomer::{run_str, Config, Terminal};
//! use misnomer::memory::value::Value;
//!
//! let source = "main() returns int { print(\"hi\"); return 8 + 21; }";
//! let outcome = run_str(source, &Config::default(), Terminal::new()).unwrap();
//! assert_eq!(outcome.value, Value::Int(29));
//! assert_eq!(outcome.terminal.get_output(), vec!["hi"]);
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod source;
pub mod terminal;

pub use config::Config;
pub use error::Error;
pub use terminal::Terminal;

use interpreter::engine::Interpreter;
use memory::value::Value;
use parser::lexer::Lexer;
use parser::parse::Parser;
use source::{FileSource, SourceStream, StringSource};
use std::path::Path;
use tracing::info;

/// Result of a successful run
#[derive(Debug)]
pub struct RunOutcome {
    /// Value returned by `main` (`Int(0)` when it returns nothing)
    pub value: Value,
    /// Terminal after the run, with everything the program printed
    pub terminal: Terminal,
}

/// Lex, parse and run program text
pub fn run_str(source: &str, config: &Config, terminal: Terminal) -> Result<RunOutcome, Error> {
    execute(StringSource::new(source), config, terminal)
}

/// Load a UTF-8 source file, then lex, parse and run it
pub fn run_file(
    path: impl AsRef<Path>,
    config: &Config,
    terminal: Terminal,
) -> Result<RunOutcome, Error> {
    let source = FileSource::open(path.as_ref())?;
    info!(path = %source.path().display(), "loaded source");
    execute(source, config, terminal)
}

/// The whole pipeline over one source stream
fn execute<S: SourceStream>(
    source: S,
    config: &Config,
    terminal: Terminal,
) -> Result<RunOutcome, Error> {
    let lexer = Lexer::with_max_string_length(source, config.max_string_length);
    let program = Parser::new(lexer)?.parse_program()?;
    info!(functions = program.len(), "parsed program");

    let mut interpreter = Interpreter::with_config(program, config, terminal);
    let value = interpreter.run()?;
    info!(exit_value = %value, "execution finished");

    Ok(RunOutcome {
        value,
        terminal: interpreter.into_terminal(),
    })
}
