//! Log setup for the command-line tools.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging to stderr.
///
/// Use the `RUST_LOG` environment variable to override the default filter,
/// which only reports warnings. `RUST_LOG=bytetape_vm=trace` logs every
/// executed instruction.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
