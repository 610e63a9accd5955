//! Interactive shell: one program per line, one tape per session.

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

use crate::session::{format_tape, Session, SessionError};

const PROMPT: &str = "! ";

/// Text printed around program I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompts {
    /// Printed before a program that reads input starts running.
    pub input: String,
    /// Printed in front of a program's output.
    pub output: String,
}

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    session: Session,
    prompts: Prompts,
}

impl Repl {
    /// Create a new REPL
    pub fn new(session: Session, prompts: Prompts) -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Repl {
            editor,
            session,
            prompts,
        })
    }

    /// Run the REPL until `:quit` or end of input.
    pub fn run(&mut self) -> RlResult<()> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_line(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("error: {err}");
                    break;
                }
            }
        }

        debug!(runs = self.session.runs(), "session ended");
        Ok(())
    }

    /// Handle REPL commands (starting with :). Returns true to quit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" => true,
            ":help" | ":h" | ":?" => {
                print_help();
                false
            }
            ":tape" | ":t" => {
                println!("{}", format_tape(self.session.tape()));
                false
            }
            ":reset" => {
                self.session.reset();
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    fn eval_line(&mut self, line: &str) {
        let result = self.session.prepare(line).and_then(|program| {
            if program.contains_input() {
                print!("{}", self.prompts.input);
                let _ = io::stdout().flush();
            }
            self.session.execute(&program, io::stdin())
        });

        match result {
            Ok(output) => println!("{}{output}", self.prompts.output),
            Err(err) => report(&err, &self.prompts),
        }
    }
}

/// Print a failed submission: partial output first, then the error.
pub fn report(err: &SessionError, prompts: &Prompts) {
    let partial = err.partial_output();
    if !partial.is_empty() {
        println!("{}{partial}", prompts.output);
    }
    eprintln!("error: {err}");
}

fn print_help() {
    println!("Each line is run as a program against the session tape.");
    println!("Characters other than + - < > . , [ ] are ignored.");
    println!();
    println!("Commands:");
    println!("  :help, :h, :?   Show this help");
    println!("  :tape, :t       Show the tape contents");
    println!("  :reset          Start over with an empty tape");
    println!("  :quit, :q       Exit the shell");
}
