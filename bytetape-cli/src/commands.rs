//! CLI command implementations.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use bytetape_cli::repl::{report, Prompts, Repl};
use bytetape_cli::{Session, SessionError, EXIT_INPUT, EXIT_RUNTIME};
use bytetape_vm::RunConfig;

/// Parse and execute one program on a fresh tape, reading stdin for `,`.
pub fn run(
    file: Option<&Path>,
    expr: Option<&str>,
    config: RunConfig,
    prompts: &Prompts,
) -> Result<(), i32> {
    let source = match (file, expr) {
        (_, Some(expr)) => expr.to_string(),
        (Some(path), None) => fs::read_to_string(path).map_err(|e| {
            eprintln!("error: cannot read '{}': {e}", path.display());
            EXIT_INPUT
        })?,
        (None, None) => {
            eprintln!("error: run requires a program file or -e <CODE>");
            return Err(EXIT_INPUT);
        }
    };

    let mut session = Session::new(config);
    let program = session.prepare(&source).map_err(|e| {
        eprintln!("error: {e}");
        EXIT_INPUT
    })?;

    if program.contains_input() && !prompts.input.is_empty() {
        print!("{}", prompts.input);
        let _ = io::stdout().flush();
    }

    match session.execute(&program, io::stdin().lock()) {
        Ok(output) => {
            print!("{}{output}", prompts.output);
            let _ = io::stdout().flush();
            Ok(())
        }
        Err(err @ SessionError::Runtime { .. }) => {
            report(&err, prompts);
            Err(EXIT_RUNTIME)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Err(EXIT_INPUT)
        }
    }
}

/// Start the interactive shell.
pub fn repl(config: RunConfig, prompts: Prompts) -> Result<(), i32> {
    let mut repl = Repl::new(Session::new(config), prompts).map_err(|e| {
        eprintln!("error: cannot start shell: {e}");
        EXIT_INPUT
    })?;
    repl.run().map_err(|e| {
        eprintln!("error: {e}");
        EXIT_INPUT
    })
}
