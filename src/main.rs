// Misnomer: command-line runner

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use misnomer::interpreter::constants::DEFAULT_MAX_CALL_DEPTH;
use misnomer::memory::value::Value;
use misnomer::parser::lexer::DEFAULT_MAX_STRING_LENGTH;
use misnomer::{diagnostic, run_file, Config, Terminal};

/// Run a Misnomer program.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the program source (UTF-8 text).
    path: PathBuf,

    /// Maximum depth of nested function calls.
    #[arg(long, visible_alias = "recursionlimit", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    recursion_limit: usize,

    /// Longest accepted string literal, in characters.
    #[arg(long, default_value_t = DEFAULT_MAX_STRING_LENGTH)]
    max_string_length: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MISNOMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::default()
        .with_max_call_depth(args.recursion_limit)
        .with_max_string_length(args.max_string_length);

    info!(path = %args.path.display(), ?config, "running program");

    match run_file(&args.path, &config, Terminal::stdio()) {
        Ok(outcome) => {
            eprintln!("Program exited with value: {}", outcome.value);
            ExitCode::from(exit_status(&outcome.value))
        }
        Err(err) => {
            if diagnostic::write_colored(&mut io::stderr(), &err).is_err() {
                eprintln!("{}", diagnostic::render(&err));
            }
            ExitCode::FAILURE
        }
    }
}

/// Process status for an exit value: ints modulo 256, anything else 0
fn exit_status(value: &Value) -> u8 {
    match value {
        Value::Int(n) => n.rem_euclid(256) as u8,
        _ => 0,
    }
}
