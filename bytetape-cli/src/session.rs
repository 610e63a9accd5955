//! A sequence of program runs sharing one tape.
//!
//! Each submission is parsed into a fresh [`Program`] and executed from
//! the configured start cell against the session's tape, so cell contents
//! carry over from one submission to the next. A failed run keeps its
//! partial output, and every cell change made before the failing
//! instruction stays on the tape.

use std::io::Read;

use bytetape_common::{MismatchedLoopError, Program, Tape};
use bytetape_vm::{RunConfig, RuntimeError, VM};
use thiserror::Error;
use tracing::debug;

/// Why a submission produced no complete output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The program text did not parse; the tape was not touched.
    #[error(transparent)]
    Parse(#[from] MismatchedLoopError),

    /// The run stopped early. `output` holds what was emitted before it did.
    #[error("{error}")]
    Runtime { error: RuntimeError, output: String },
}

impl SessionError {
    /// Output emitted before the failure, if the run got that far.
    pub fn partial_output(&self) -> &str {
        match self {
            SessionError::Parse(_) => "",
            SessionError::Runtime { output, .. } => output,
        }
    }
}

/// Tape plus run settings, reused across submissions.
#[derive(Debug, Default)]
pub struct Session {
    tape: Tape,
    config: RunConfig,
    runs: usize,
}

impl Session {
    pub fn new(config: RunConfig) -> Self {
        Self {
            tape: Tape::new(),
            config,
            runs: 0,
        }
    }

    /// Start from caller-supplied tape contents.
    pub fn with_tape(tape: Tape, config: RunConfig) -> Self {
        Self {
            tape,
            config,
            runs: 0,
        }
    }

    /// Parse `source` into a program without running it.
    pub fn prepare(&self, source: &str) -> Result<Program, SessionError> {
        Ok(Program::parse(source)?)
    }

    /// Run a parsed program against the session tape.
    pub fn execute<R: Read>(&mut self, program: &Program, input: R) -> Result<String, SessionError> {
        self.runs += 1;
        debug!(run = self.runs, instructions = program.len(), "submission");

        let mut vm = VM::new(program, &mut self.tape)
            .with_input(input)
            .with_config(self.config);
        match vm.execute() {
            Ok(output) => Ok(output),
            Err(error) => Err(SessionError::Runtime {
                error,
                output: vm.into_output(),
            }),
        }
    }

    /// Parse and run `source` in one step.
    pub fn submit<R: Read>(&mut self, source: &str, input: R) -> Result<String, SessionError> {
        let program = self.prepare(source)?;
        self.execute(&program, input)
    }

    /// The shared tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Discard all cells and start over with an empty tape.
    pub fn reset(&mut self) {
        self.tape = Tape::new();
        debug!("tape reset");
    }

    /// Number of programs executed so far, including failed ones.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

/// Render materialized cells as `[a, b, c]`, trailing zeros trimmed.
pub fn format_tape(tape: &Tape) -> String {
    let cells = tape.cells();
    let used = cells.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
    let shown: Vec<String> = cells[..used].iter().map(u8::to_string).collect();
    format!("[{}]", shown.join(", "))
}
