//! Runtime errors for the bytetape VM.
//!
//! Every error carries the instruction index (`at`) and an [`Excerpt`] of
//! the program split just after the failing instruction, so callers can
//! render where the run stopped. The VM never prints these itself.

use std::io;

use bytetape_common::Excerpt;
use thiserror::Error;

/// Errors that stop a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `+` on a cell already holding 255.
    #[error("cell overflow at instruction {at}: {excerpt}")]
    CellOverflow { at: usize, excerpt: Excerpt },

    /// `-` on a cell holding 0.
    #[error("cell underflow at instruction {at}: {excerpt}")]
    CellUnderflow { at: usize, excerpt: Excerpt },

    /// The data pointer moved left of cell 0.
    #[error("invalid tape index at instruction {at}: {excerpt}")]
    NegativePointer { at: usize, excerpt: Excerpt },

    /// `,` found no input and the EOF policy is [`EofPolicy::Error`](crate::EofPolicy::Error).
    #[error("end of input at instruction {at}: {excerpt}")]
    EndOfInput { at: usize, excerpt: Excerpt },

    /// The configured start cell is past [`MAX_START_POINTER`](crate::MAX_START_POINTER).
    /// Reported before any instruction runs.
    #[error("start cell {start} exceeds the limit of {} cells", crate::MAX_START_POINTER)]
    StartOutOfRange {
        at: usize,
        start: usize,
        excerpt: Excerpt,
    },

    /// The input source failed.
    #[error("input error at instruction {at}: {message}")]
    Input {
        at: usize,
        kind: io::ErrorKind,
        message: String,
        excerpt: Excerpt,
    },
}

impl RuntimeError {
    /// Instruction index where the run stopped.
    pub fn at(&self) -> usize {
        match self {
            RuntimeError::CellOverflow { at, .. }
            | RuntimeError::CellUnderflow { at, .. }
            | RuntimeError::NegativePointer { at, .. }
            | RuntimeError::EndOfInput { at, .. }
            | RuntimeError::StartOutOfRange { at, .. }
            | RuntimeError::Input { at, .. } => *at,
        }
    }

    /// Program text split at the failing instruction.
    pub fn excerpt(&self) -> &Excerpt {
        match self {
            RuntimeError::CellOverflow { excerpt, .. }
            | RuntimeError::CellUnderflow { excerpt, .. }
            | RuntimeError::NegativePointer { excerpt, .. }
            | RuntimeError::EndOfInput { excerpt, .. }
            | RuntimeError::StartOutOfRange { excerpt, .. }
            | RuntimeError::Input { excerpt, .. } => excerpt,
        }
    }
}
