//! Run configuration

use crate::interpreter::constants::DEFAULT_MAX_CALL_DEPTH;
use crate::parser::lexer::DEFAULT_MAX_STRING_LENGTH;

/// Limits applied to a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Call budget of the root frame
    pub max_call_depth: usize,

    /// Longest accepted string literal, in characters
    pub max_string_length: usize,
}

impl Config {
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn with_max_string_length(mut self, max_string_length: usize) -> Self {
        self.max_string_length = max_string_length;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}
