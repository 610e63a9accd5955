//! bytetape CLI — run tape-language programs or start an interactive shell.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Unreadable input or mismatched brackets
//! - 2: Invalid command-line usage
//! - 3: Runtime error

mod commands;

use std::path::PathBuf;
use std::process;

use bytetape_cli::logging::init_logging;
use bytetape_cli::repl::Prompts;
use bytetape_cli::EXIT_OK;
use bytetape_vm::{EofPolicy, RunConfig, MAX_START_POINTER};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bytetape", version, about = "Interpreter for the eight-symbol tape language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program file (or -e CODE) on a fresh tape.
    Run {
        /// Program source file.
        file: Option<PathBuf>,

        /// Program text given on the command line.
        #[arg(short = 'e', long = "expr", conflicts_with = "file", allow_hyphen_values = true)]
        expr: Option<String>,

        #[command(flatten)]
        options: RunOptions,
    },
    /// Start an interactive shell; every line runs against one shared tape.
    Repl {
        #[command(flatten)]
        options: RunOptions,
    },
}

#[derive(Args)]
struct RunOptions {
    /// What `,` stores when input is exhausted.
    #[arg(long, value_enum, default_value_t = EofArg::Zero)]
    eof: EofArg,

    /// Cell the data pointer starts on.
    #[arg(long, default_value_t = 0, value_parser = parse_start)]
    start: usize,

    /// Printed before running a program that reads input.
    #[arg(long)]
    input_prompt: Option<String>,

    /// Printed in front of program output.
    #[arg(long)]
    output_prompt: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EofArg {
    Zero,
    Unchanged,
    Error,
}

fn parse_start(s: &str) -> Result<usize, String> {
    let start: usize = s.parse().map_err(|e| format!("{e}"))?;
    if start > MAX_START_POINTER {
        return Err(format!("start cell must be at most {MAX_START_POINTER}"));
    }
    Ok(start)
}

impl RunOptions {
    fn config(&self) -> RunConfig {
        let eof = match self.eof {
            EofArg::Zero => EofPolicy::Zero,
            EofArg::Unchanged => EofPolicy::Unchanged,
            EofArg::Error => EofPolicy::Error,
        };
        RunConfig {
            eof,
            start_pointer: self.start,
        }
    }

    /// Prompts, falling back to the given defaults.
    fn prompts(&self, input: &str, output: &str) -> Prompts {
        Prompts {
            input: self.input_prompt.clone().unwrap_or_else(|| input.to_string()),
            output: self.output_prompt.clone().unwrap_or_else(|| output.to_string()),
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Run {
            file,
            expr,
            options,
        } => commands::run(
            file.as_deref(),
            expr.as_deref(),
            options.config(),
            &options.prompts("", ""),
        ),
        Command::Repl { options } => commands::repl(options.config(), options.prompts("? ", "")),
    };

    match result {
        Ok(()) => process::exit(EXIT_OK),
        Err(code) => process::exit(code),
    }
}
