//! bytetape virtual machine — executes parsed programs against a tape.
//!
//! The VM is a small state machine with:
//! - An instruction pointer into the program
//! - A data pointer into the tape
//! - An output buffer filled by `.`
//! - An injected input source read by `,`
//!
//! # Usage
//!
//! ```
//! use bytetape_common::{Program, Tape};
//! use bytetape_vm::run;
//!
//! let program = Program::parse("+++++++++[>+++++++<-]>+.").unwrap();
//! let mut tape = Tape::new();
//!
//! let output = run(&program, &mut tape, std::io::empty()).unwrap();
//! assert_eq!(output, "@");
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::RuntimeError;
pub use machine::{EofPolicy, RunConfig, MAX_START_POINTER, VM};

use std::io::Read;

use bytetape_common::{Program, Tape};

/// Execute a program with the default configuration and return its output.
///
/// # Errors
///
/// Returns [`RuntimeError`] if a cell over- or underflows, the data
/// pointer moves left of cell 0, or reading input fails.
pub fn run<R: Read>(program: &Program, tape: &mut Tape, input: R) -> Result<String, RuntimeError> {
    run_with(program, tape, input, RunConfig::default())
}

/// Execute a program with an explicit configuration.
pub fn run_with<R: Read>(
    program: &Program,
    tape: &mut Tape,
    input: R,
    config: RunConfig,
) -> Result<String, RuntimeError> {
    let mut vm = VM::new(program, tape).with_input(input).with_config(config);
    vm.execute()
}
