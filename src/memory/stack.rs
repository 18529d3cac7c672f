//! Call frames
//!
//! A [`StackFrame`] is the activation record of one function call. It is
//! created by value when the call starts, moved into the body's execution and
//! dropped on return; the chain of frames lives on the host stack. Each frame
//! also carries the remaining call budget for calls made from it.

use super::value::Value;
use rustc_hash::FxHashMap;

/// Stack frame for a function call
#[derive(Debug, Clone)]
pub struct StackFrame {
    pub function: String,
    variables: FxHashMap<String, Value>,
    remaining_depth: usize,
}

impl StackFrame {
    pub fn new(function: impl Into<String>, remaining_depth: usize) -> Self {
        StackFrame {
            function: function.into(),
            variables: FxHashMap::default(),
            remaining_depth,
        }
    }

    /// Budget a call made from this frame would receive, or None when exhausted
    pub fn child_depth(&self) -> Option<usize> {
        self.remaining_depth.checked_sub(1).filter(|&depth| depth > 0)
    }

    pub fn remaining_depth(&self) -> usize {
        self.remaining_depth
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.variables.get_mut(name)
    }

    /// Bind a variable. Callers check [`contains`](Self::contains) first.
    pub fn declare(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }
}
