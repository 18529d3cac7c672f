//! Character sources for the lexer
//!
//! The lexer never touches files or strings directly; it pulls characters one
//! at a time from a [`SourceStream`] and asks it where it is. Two
//! implementations are provided:
//!
//! - [`StringSource`]: an in-memory program text
//! - [`FileSource`]: a UTF-8 file, read and decoded once when opened
//!
//! Loading failures are reported by [`FileSource::open`] as [`SourceError`];
//! once a stream exists, reading from it cannot fail.

use crate::parser::ast::Position;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A forward-only stream of characters with position tracking.
pub trait SourceStream {
    /// Returns the next character, or `None` once the stream is exhausted.
    fn next_char(&mut self) -> Option<char>;

    /// Position of the character the next call to [`next_char`](Self::next_char)
    /// will return (or of the end of the stream).
    fn position(&self) -> Position;
}

/// Errors raised while loading a source file
#[derive(Debug)]
pub enum SourceError {
    /// The path does not exist
    FileNotFound { path: PathBuf },

    /// The file is not valid UTF-8
    InvalidEncoding { path: PathBuf, message: String },

    /// Any other I/O failure (permissions, path is a directory, ...)
    Unreadable { path: PathBuf, message: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::FileNotFound { path } => {
                write!(f, "File '{}' could not be found", path.display())
            }
            SourceError::InvalidEncoding { path, message } => {
                write!(
                    f,
                    "File '{}' is not UTF-8 encoded text: {}",
                    path.display(),
                    message
                )
            }
            SourceError::Unreadable { path, message } => {
                write!(f, "File '{}' could not be read: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// In-memory program text
#[derive(Debug, Clone)]
pub struct StringSource {
    chars: Vec<char>,
    index: usize,
    position: Position,
}

impl StringSource {
    pub fn new(text: &str) -> Self {
        StringSource {
            chars: text.chars().collect(),
            index: 0,
            position: Position::start(),
        }
    }
}

impl SourceStream for StringSource {
    fn next_char(&mut self) -> Option<char> {
        let ch = *self.chars.get(self.index)?;
        self.index += 1;
        self.position.advance(ch);
        Some(ch)
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Program text loaded from a file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    inner: StringSource,
}

impl FileSource {
    /// Read and decode `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();

        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::FileNotFound { path: path.clone() },
            _ => SourceError::Unreadable {
                path: path.clone(),
                message: e.to_string(),
            },
        })?;

        let text = String::from_utf8(bytes).map_err(|e| SourceError::InvalidEncoding {
            path: path.clone(),
            message: e.utf8_error().to_string(),
        })?;

        Ok(FileSource {
            inner: StringSource::new(&text),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceStream for FileSource {
    fn next_char(&mut self) -> Option<char> {
        self.inner.next_char()
    }

    fn position(&self) -> Position {
        self.inner.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_advance_per_character() {
        let mut source = StringSource::new("ab\nc");

        assert_eq!(source.position(), Position::new(1, 1, 1));
        assert_eq!(source.next_char(), Some('a'));
        assert_eq!(source.position(), Position::new(1, 2, 2));
        assert_eq!(source.next_char(), Some('b'));
        assert_eq!(source.next_char(), Some('\n'));
        assert_eq!(source.position(), Position::new(2, 1, 4));
        assert_eq!(source.next_char(), Some('c'));
        assert_eq!(source.next_char(), None);
        assert_eq!(source.next_char(), None);
        assert_eq!(source.position(), Position::new(2, 2, 5));
    }

    #[test]
    fn test_missing_file() {
        let err = FileSource::open("definitely/not/here.mn").unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_utf8_file() {
        let path = std::env::temp_dir().join(format!(
            "misnomer-invalid-{}.mn",
            std::process::id()
        ));
        std::fs::write(&path, [0x66, 0xff, 0xfe, 0x6f]).unwrap();

        let err = FileSource::open(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, SourceError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_file_source_reads_text() {
        let path = std::env::temp_dir().join(format!(
            "misnomer-valid-{}.mn",
            std::process::id()
        ));
        std::fs::write(&path, "x\ny").unwrap();

        let mut source = FileSource::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(source.next_char(), Some('x'));
        assert_eq!(source.next_char(), Some('\n'));
        assert_eq!(source.next_char(), Some('y'));
        assert_eq!(source.position().line, 2);
        assert_eq!(source.next_char(), None);
    }
}
