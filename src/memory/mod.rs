//! Memory model for the Misnomer interpreter
//!
//! This module provides the core runtime abstractions:
//! - [`value`]: Runtime value representation (Int, Float, Str, Bool, Nothing)
//! - [`stack`]: Per-call frames holding local variables and the call budget
//!
//! There is no heap and no addressable memory: values are owned by the frame
//! that binds them and copied on read.

pub mod stack;
pub mod value;
