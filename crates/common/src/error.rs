//! Parse and tape errors.

use crate::program::Excerpt;
use thiserror::Error;

/// Which side of a bracket pair is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMismatch {
    /// A `]` with no open `[` before it.
    UnmatchedClose,
    /// One or more `[` still open at the end of the program.
    UnmatchedOpen { count: usize },
}

/// Brackets in program text do not nest correctly.
///
/// `at` is the position of the offending bracket in the filtered
/// instruction sequence. For unmatched openers it is the earliest one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} at instruction {at}: {excerpt}", describe(.kind))]
pub struct MismatchedLoopError {
    pub kind: LoopMismatch,
    pub at: usize,
    pub excerpt: Excerpt,
}

fn describe(kind: &LoopMismatch) -> String {
    match kind {
        LoopMismatch::UnmatchedClose => "unmatched closing bracket".to_string(),
        LoopMismatch::UnmatchedOpen { count: 1 } => "unmatched opening bracket".to_string(),
        LoopMismatch::UnmatchedOpen { count } => format!("{count} unmatched opening brackets"),
    }
}

/// Errors raised by [`Tape`](crate::Tape) writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapeError {
    /// Attempted to store a value outside 0..=255.
    #[error("value {value} out of range 0-255 for cell {index}")]
    ValueOutOfRange { index: usize, value: i64 },
}
