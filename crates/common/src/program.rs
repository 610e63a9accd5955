//! Program representation: filtered instructions plus a bracket jump table.
//!
//! Raw text is reduced to the eight instruction symbols; every other
//! character is dropped. Brackets are matched once, at construction, with
//! an explicit stack. A `Program` that exists is always correctly nested.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{LoopMismatch, MismatchedLoopError};
use crate::instruction::Instruction;

/// Marker placed between the consumed and remaining halves of an excerpt.
pub const EXCERPT_MARKER: &str = " ** ";

/// Program text split at a failing instruction.
///
/// `consumed` runs through the failing instruction (inclusive) and
/// `remaining` holds everything after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub consumed: String,
    pub remaining: String,
}

impl fmt::Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{EXCERPT_MARKER}{}", self.consumed, self.remaining)
    }
}

/// A parsed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    /// `jumps[p]` is the partner of the bracket at `p`; `None` for non-brackets.
    jumps: Vec<Option<usize>>,
}

impl Program {
    /// Filter `source` down to instructions and match its brackets.
    pub fn parse(source: &str) -> Result<Self, MismatchedLoopError> {
        let instructions: Vec<Instruction> =
            source.chars().filter_map(Instruction::from_char).collect();

        let mut jumps = vec![None; instructions.len()];
        let mut open: Vec<usize> = Vec::new();

        for (pos, instr) in instructions.iter().enumerate() {
            match instr {
                Instruction::LoopStart => open.push(pos),
                Instruction::LoopEnd => {
                    let start = open.pop().ok_or_else(|| MismatchedLoopError {
                        kind: LoopMismatch::UnmatchedClose,
                        at: pos,
                        excerpt: excerpt(&instructions, pos),
                    })?;
                    jumps[start] = Some(pos);
                    jumps[pos] = Some(start);
                }
                _ => {}
            }
        }

        if let Some(&first) = open.first() {
            return Err(MismatchedLoopError {
                kind: LoopMismatch::UnmatchedOpen { count: open.len() },
                at: first,
                excerpt: excerpt(&instructions, first),
            });
        }

        debug!(
            instructions = instructions.len(),
            dropped = source.chars().count() - instructions.len(),
            "program parsed"
        );

        Ok(Self {
            instructions,
            jumps,
        })
    }

    /// The filtered instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Instruction at `pos`, if in range.
    pub fn get(&self, pos: usize) -> Option<Instruction> {
        self.instructions.get(pos).copied()
    }

    /// Position of the bracket matching the one at `pos`.
    ///
    /// Returns `None` if `pos` is out of range or not a bracket.
    pub fn jump(&self, pos: usize) -> Option<usize> {
        self.jumps.get(pos).copied().flatten()
    }

    /// Split the program text at `at` for error reporting.
    pub fn excerpt(&self, at: usize) -> Excerpt {
        excerpt(&self.instructions, at)
    }

    /// Returns true if the program reads input anywhere.
    pub fn contains_input(&self) -> bool {
        self.instructions.contains(&Instruction::Input)
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromStr for Program {
    type Err = MismatchedLoopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            write!(f, "{instr}")?;
        }
        Ok(())
    }
}

fn excerpt(instructions: &[Instruction], at: usize) -> Excerpt {
    let split = (at + 1).min(instructions.len());
    let render = |part: &[Instruction]| part.iter().map(|i| i.as_char()).collect::<String>();
    Excerpt {
        consumed: render(&instructions[..split]),
        remaining: render(&instructions[split..]),
    }
}
