// Program store: validated, immutable instruction table

use super::error::SeqError;
use super::instruction::Instruction;

/// An authored command sequence. Construction validates that every jump and
/// skip target resolves inside the table, so execution never has to guess
/// what an out-of-range branch meant.
#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, SeqError> {
        let len = instructions.len();
        for (at, instruction) in instructions.iter().enumerate() {
            if let Some(target) = instruction.branch_target(at) {
                if target >= len {
                    return Err(SeqError::MalformedProgram { at, target, len });
                }
            }
            if let Instruction::LoadRand { low, high, .. } = instruction {
                if high < low {
                    return Err(SeqError::EmptyRandomRange {
                        at,
                        low: *low,
                        high: *high,
                    });
                }
            }
        }
        Ok(Program { instructions })
    }

    /// Fetch the instruction at `pc`. A counter past the end means the table
    /// fell through its last instruction without a FINISH or JUMP.
    pub fn fetch(&self, pc: usize) -> Result<&Instruction, SeqError> {
        self.instructions.get(pc).ok_or(SeqError::ProgramOverrun {
            pc,
            len: self.instructions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
