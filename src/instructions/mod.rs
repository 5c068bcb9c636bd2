// Instruction module entry point

pub mod instruction;
pub mod parser;

pub use instruction::{Instruction, SingularInstruction};
pub use parser::{Dialect, InstructionParser, SimpleParser, SteppedParser};
