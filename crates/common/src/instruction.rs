//! The eight instructions of the tape language.
//!
//! Each instruction is a single ASCII symbol. Any other character in
//! program text is commentary and is dropped when a program is parsed.

use std::fmt;

/// A single tape-language instruction.
///
/// The `#[repr(u8)]` discriminant is the ASCII byte of the symbol, so
/// `instr as u8` yields the source character.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `+` — increment the active cell.
    Increment = b'+',
    /// `-` — decrement the active cell.
    Decrement = b'-',
    /// `<` — move the data pointer one cell left.
    Left = b'<',
    /// `>` — move the data pointer one cell right.
    Right = b'>',
    /// `.` — emit the active cell as a character.
    Output = b'.',
    /// `,` — read one byte of input into the active cell.
    Input = b',',
    /// `[` — jump past the matching `]` if the active cell is zero.
    LoopStart = b'[',
    /// `]` — jump back to the matching `[` if the active cell is nonzero.
    LoopEnd = b']',
}

/// All instructions, in source-symbol order.
pub const ALL_INSTRUCTIONS: [Instruction; 8] = [
    Instruction::Increment,
    Instruction::Decrement,
    Instruction::Left,
    Instruction::Right,
    Instruction::Output,
    Instruction::Input,
    Instruction::LoopStart,
    Instruction::LoopEnd,
];

impl Instruction {
    /// Map a source character to its instruction, or `None` for commentary.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '<' => Some(Instruction::Left),
            '>' => Some(Instruction::Right),
            '.' => Some(Instruction::Output),
            ',' => Some(Instruction::Input),
            '[' => Some(Instruction::LoopStart),
            ']' => Some(Instruction::LoopEnd),
            _ => None,
        }
    }

    /// The source symbol for this instruction.
    pub fn as_char(self) -> char {
        char::from(self as u8)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
