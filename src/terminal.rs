//! Program input and output
//!
//! The interpreter never touches stdin/stdout directly; `print` and `read`
//! go through a [`Terminal`]. Output lines are always recorded so tests and
//! embedders can inspect them, and are echoed to stdout when the terminal was
//! created with [`Terminal::stdio`]. Input comes from stdin or from a scripted
//! list of lines.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where `read` takes its lines from
#[derive(Debug, Clone)]
pub enum Input {
    Stdin,
    Scripted(VecDeque<String>),
}

/// Line-oriented terminal used by the `print` and `read` builtins
#[derive(Debug, Clone)]
pub struct Terminal {
    pub lines: Vec<String>,
    input: Input,
    echo: bool,
}

impl Terminal {
    /// Capturing terminal with no input
    pub fn new() -> Self {
        Terminal {
            lines: Vec::new(),
            input: Input::Scripted(VecDeque::new()),
            echo: false,
        }
    }

    /// Terminal wired to the process: echoes to stdout, reads stdin
    pub fn stdio() -> Self {
        Terminal {
            lines: Vec::new(),
            input: Input::Stdin,
            echo: true,
        }
    }

    /// Capturing terminal whose `read` returns `lines` in order
    pub fn with_input<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Terminal {
            lines: Vec::new(),
            input: Input::Scripted(lines.into_iter().map(Into::into).collect()),
            echo: false,
        }
    }

    /// Print a full line
    pub fn print_line(&mut self, text: &str) -> io::Result<()> {
        if self.echo {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
            stdout.flush()?;
        }
        self.lines.push(text.to_string());
        Ok(())
    }

    /// Read one line without its terminator. Returns an empty string at end of input.
    pub fn read_line(&mut self) -> io::Result<String> {
        match &mut self.input {
            Input::Scripted(queue) => Ok(queue.pop_front().unwrap_or_default()),
            Input::Stdin => {
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Ok(line)
            }
        }
    }

    /// Get all output lines
    pub fn get_output(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|line| line.split('\n').map(|s| s.to_string()))
            .collect()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_output() {
        let mut terminal = Terminal::new();
        terminal.print_line("hello").unwrap();
        terminal.print_line("a\nb").unwrap();
        assert_eq!(terminal.get_output(), vec!["hello", "a", "b"]);
        assert_eq!(terminal.lines.len(), 2);
    }

    #[test]
    fn test_scripted_input() {
        let mut terminal = Terminal::with_input(["first", "second"]);
        assert_eq!(terminal.read_line().unwrap(), "first");
        assert_eq!(terminal.read_line().unwrap(), "second");
        assert_eq!(terminal.read_line().unwrap(), "");
    }
}
