//! bytetape CLI support: sessions, logging, and the interactive shell.
//!
//! The binary in `main.rs` is a thin dispatcher over these modules.

pub mod logging;
pub mod repl;
pub mod session;

pub use session::{format_tape, Session, SessionError};

/// Exit code for a successful run.
pub const EXIT_OK: i32 = 0;
/// Exit code for unreadable input or a program whose brackets do not match.
pub const EXIT_INPUT: i32 = 1;
/// Exit code for a run that stopped with a runtime error.
pub const EXIT_RUNTIME: i32 = 3;
