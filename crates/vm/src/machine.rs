//! VM state management: pointers, tape borrow, input source, output buffer.

use std::io::{self, Read};

use crate::error::RuntimeError;
use bytetape_common::{Excerpt, Program, Tape};

/// Highest cell a run may start on.
pub const MAX_START_POINTER: usize = 1 << 24;

/// What `,` does when the input source is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EofPolicy {
    /// Store 0 in the active cell.
    #[default]
    Zero,
    /// Leave the active cell as it was.
    Unchanged,
    /// Stop the run with [`RuntimeError::EndOfInput`].
    Error,
}

/// Per-run settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// End-of-input behavior for `,`.
    pub eof: EofPolicy,
    /// Data pointer at the start of the run. At most [`MAX_START_POINTER`].
    pub start_pointer: usize,
}

/// The bytetape virtual machine.
///
/// A VM borrows a parsed program and a tape for one run. The tape is
/// mutated in place and keeps whatever state the run left it in, even
/// when the run fails.
pub struct VM<'p, 't, R = io::Empty> {
    /// The program being executed.
    pub(crate) program: &'p Program,
    /// The tape being operated on.
    pub(crate) tape: &'t mut Tape,
    /// Source for `,`.
    pub(crate) input: R,
    pub(crate) config: RunConfig,
    /// Instruction pointer.
    pub(crate) ip: usize,
    /// Data pointer. Signed so a move left of cell 0 is observable.
    pub(crate) dp: isize,
    /// Characters emitted by `.` so far.
    pub(crate) output: String,
}

impl<'p, 't> VM<'p, 't> {
    /// Create a VM with no input source and the default configuration.
    pub fn new(program: &'p Program, tape: &'t mut Tape) -> Self {
        Self {
            program,
            tape,
            input: io::empty(),
            config: RunConfig::default(),
            ip: 0,
            dp: 0,
            output: String::new(),
        }
    }
}

impl<'p, 't, R: Read> VM<'p, 't, R> {
    /// Replace the input source used by `,`.
    pub fn with_input<S: Read>(self, input: S) -> VM<'p, 't, S> {
        VM {
            program: self.program,
            tape: self.tape,
            input,
            config: self.config,
            ip: self.ip,
            dp: self.dp,
            output: self.output,
        }
    }

    /// Replace the run configuration. The start pointer is checked when
    /// the run begins.
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Current data pointer. Negative only after a failed run.
    pub fn pointer(&self) -> isize {
        self.dp
    }

    /// Output produced so far, including by a run that failed.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the VM, returning its output.
    pub fn into_output(self) -> String {
        self.output
    }

    /// Data pointer for a fresh run, or an error if the configured start
    /// cell is past [`MAX_START_POINTER`].
    pub(crate) fn start_pointer(&self) -> Result<isize, RuntimeError> {
        let start = self.config.start_pointer;
        match isize::try_from(start) {
            Ok(dp) if start <= MAX_START_POINTER => Ok(dp),
            _ => Err(RuntimeError::StartOutOfRange {
                at: 0,
                start,
                excerpt: Excerpt {
                    consumed: String::new(),
                    remaining: self.program.to_string(),
                },
            }),
        }
    }

    /// Tape index of the active cell.
    pub(crate) fn cell(&self) -> Result<usize, RuntimeError> {
        usize::try_from(self.dp).map_err(|_| RuntimeError::NegativePointer {
            at: self.ip,
            excerpt: self.program.excerpt(self.ip),
        })
    }

    /// Read one byte from the input source. `None` means end of input.
    pub(crate) fn read_byte(&mut self) -> Result<Option<u8>, RuntimeError> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(RuntimeError::Input {
                        at: self.ip,
                        kind: e.kind(),
                        message: e.to_string(),
                        excerpt: self.program.excerpt(self.ip),
                    })
                }
            }
        }
    }
}
