//! Main execution loop and instruction dispatch for the bytetape VM.

use std::io::Read;

use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::machine::{EofPolicy, VM};
use bytetape_common::{Excerpt, Instruction};

impl<'p, 't, R: Read> VM<'p, 't, R> {
    /// Run the program from the first instruction until it halts or fails.
    ///
    /// Returns everything `.` emitted. On failure the partial output is
    /// still available through [`VM::output`], and the tape keeps every
    /// change made before the failing instruction. A start pointer past
    /// [`MAX_START_POINTER`](crate::MAX_START_POINTER) fails before the
    /// tape is touched.
    pub fn execute(&mut self) -> Result<String, RuntimeError> {
        self.ip = 0;
        self.output.clear();

        let result = self.start_pointer().and_then(|dp| {
            self.dp = dp;
            self.run_loop()
        });
        match &result {
            Ok(()) => debug!(
                instructions = self.program.len(),
                pointer = self.dp,
                output_len = self.output.len(),
                "run halted"
            ),
            Err(e) => debug!(at = e.at(), pointer = self.dp, "run failed: {e}"),
        }
        result.map(|()| self.output.clone())
    }

    fn run_loop(&mut self) -> Result<(), RuntimeError> {
        while let Some(instr) = self.program.get(self.ip) {
            trace!(ip = self.ip, dp = self.dp, %instr, "step");
            self.step(instr)?;
            // Checked after every instruction, not only after `<`.
            if self.dp < 0 {
                return Err(RuntimeError::NegativePointer {
                    at: self.ip,
                    excerpt: self.excerpt(),
                });
            }
            self.ip += 1;
        }
        Ok(())
    }

    /// Apply one instruction. Jumps leave `ip` on the partner bracket; the
    /// caller's increment then moves past it.
    fn step(&mut self, instr: Instruction) -> Result<(), RuntimeError> {
        match instr {
            Instruction::Increment => self.exec_add(1),
            Instruction::Decrement => self.exec_add(-1),
            Instruction::Left => {
                self.dp -= 1;
                Ok(())
            }
            Instruction::Right => {
                self.dp += 1;
                Ok(())
            }
            Instruction::Output => self.exec_output(),
            Instruction::Input => self.exec_input(),
            Instruction::LoopStart => {
                if self.current()? == 0 {
                    self.ip = self.partner();
                }
                Ok(())
            }
            Instruction::LoopEnd => {
                if self.current()? != 0 {
                    self.ip = self.partner();
                }
                Ok(())
            }
        }
    }

    fn exec_add(&mut self, delta: i64) -> Result<(), RuntimeError> {
        let cell = self.cell()?;
        let value = i64::from(self.tape.get(cell)) + delta;
        self.tape.set(cell, value).map_err(|_| {
            let (at, excerpt) = (self.ip, self.excerpt());
            if delta < 0 {
                RuntimeError::CellUnderflow { at, excerpt }
            } else {
                RuntimeError::CellOverflow { at, excerpt }
            }
        })
    }

    fn exec_output(&mut self) -> Result<(), RuntimeError> {
        let value = self.current()?;
        self.output.push(char::from(value));
        Ok(())
    }

    fn exec_input(&mut self) -> Result<(), RuntimeError> {
        let cell = self.cell()?;
        let byte = match self.read_byte()? {
            Some(byte) => byte,
            None => match self.config.eof {
                EofPolicy::Zero => 0,
                EofPolicy::Unchanged => return Ok(()),
                EofPolicy::Error => {
                    return Err(RuntimeError::EndOfInput {
                        at: self.ip,
                        excerpt: self.excerpt(),
                    })
                }
            },
        };
        self.tape.write(cell, byte);
        Ok(())
    }

    /// Value of the active cell.
    fn current(&mut self) -> Result<u8, RuntimeError> {
        let cell = self.cell()?;
        Ok(self.tape.get(cell))
    }

    fn partner(&self) -> usize {
        self.program
            .jump(self.ip)
            .expect("parsed programs pair every bracket")
    }

    fn excerpt(&self) -> Excerpt {
        self.program.excerpt(self.ip)
    }
}
