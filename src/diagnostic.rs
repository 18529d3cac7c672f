//! Error presentation for the command line
//!
//! A diagnostic is a banner line followed by the failing stage and the error
//! message. [`render`] produces plain text; [`write_colored`] writes the same
//! text styled with crossterm.

use crate::error::Error;
use crossterm::style::Stylize;
use std::io::{self, Write};

const BANNER_TITLE: &str = " Encountered error ";
const BANNER_WIDTH: usize = 80;

/// `====== Encountered error ======`, centered in the banner width
pub fn banner() -> String {
    format!("{:=^width$}", BANNER_TITLE, width = BANNER_WIDTH)
}

/// Plain-text diagnostic
pub fn render(error: &Error) -> String {
    format!("{}\n{}", banner(), headline(error))
}

/// Diagnostic styled for a terminal
pub fn write_colored(out: &mut impl Write, error: &Error) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", banner().red().bold())?;
    writeln!(out, "{}", headline(error).red())?;
    out.flush()
}

/// Stage and message on one line
///
/// Lexer and parser messages already start with their stage and position.
fn headline(error: &Error) -> String {
    match error {
        Error::Lex(_) | Error::Parse(_) => error.to_string(),
        _ => format!("{}: {}", error.kind(), error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::errors::RuntimeError;
    use crate::parser::ast::Position;
    use crate::parser::lexer::LexError;

    #[test]
    fn test_banner_is_centered() {
        let banner = banner();
        assert_eq!(banner.chars().count(), 80);
        assert!(banner.starts_with("=============================="));
        assert!(banner.contains(" Encountered error "));
        assert!(banner.ends_with('='));
    }

    #[test]
    fn test_render_runtime_error() {
        let error = Error::Runtime(RuntimeError::NoMainFunction);
        let text = render(&error);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Runtime error: No main() function found");
    }

    #[test]
    fn test_render_lexer_error_keeps_position() {
        let error = Error::Lex(LexError::UnterminatedString {
            location: Position::new(3, 9, 40),
        });
        let text = render(&error);
        assert!(text.contains("Lexer error at line 3, column 9"), "{}", text);
        assert!(!text.contains("Lexer error: Lexer error"));
    }

    #[test]
    fn test_colored_output_contains_message() {
        let mut out = Vec::new();
        write_colored(&mut out, &Error::Runtime(RuntimeError::NoMainFunction)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No main() function found"));
        assert!(text.contains("Encountered error"));
    }
}
