//! bytetape common types.
//!
//! This crate provides the data structures shared by the VM and the CLI:
//!
//! - [`Instruction`] — the eight instruction symbols
//! - [`Program`] — filtered instructions with a precomputed jump table
//! - [`Tape`] — the self-extending tape of cells in `0..=255`
//! - [`Excerpt`] — program text split at a failing instruction
//! - [`MismatchedLoopError`], [`TapeError`] — parse and tape errors

pub mod error;
pub mod instruction;
pub mod program;
pub mod tape;

// Re-export commonly used types at the crate root.
pub use error::{LoopMismatch, MismatchedLoopError, TapeError};
pub use instruction::Instruction;
pub use program::{Excerpt, Program};
pub use tape::Tape;
