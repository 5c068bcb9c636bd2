use crate::config::{MOVE_FORWARD_LETTER, TURN_LEFT_LETTER, TURN_RIGHT_LETTER};
use std::fmt;

/// One atomic vehicle command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingularInstruction {
    TurnLeft,
    TurnRight,
    MoveForward,
}

impl SingularInstruction {
    pub fn letter(self) -> char {
        match self {
            SingularInstruction::TurnLeft => TURN_LEFT_LETTER,
            SingularInstruction::TurnRight => TURN_RIGHT_LETTER,
            SingularInstruction::MoveForward => MOVE_FORWARD_LETTER,
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            TURN_LEFT_LETTER => Some(SingularInstruction::TurnLeft),
            TURN_RIGHT_LETTER => Some(SingularInstruction::TurnRight),
            MOVE_FORWARD_LETTER => Some(SingularInstruction::MoveForward),
            _ => None,
        }
    }

    /// Only forward moves change coordinates and can be blocked
    pub fn is_move(self) -> bool {
        self == SingularInstruction::MoveForward
    }
}

/// An ordered list of atomic commands; empty means "stay put"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Instruction {
    steps: Vec<SingularInstruction>,
}

impl Instruction {
    pub fn new(steps: Vec<SingularInstruction>) -> Self {
        Instruction { steps }
    }

    pub fn empty() -> Self {
        Instruction::default()
    }

    pub fn steps(&self) -> &[SingularInstruction] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = SingularInstruction> + '_ {
        self.steps.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<Vec<SingularInstruction>> for Instruction {
    fn from(steps: Vec<SingularInstruction>) -> Self {
        Instruction::new(steps)
    }
}

impl FromIterator<SingularInstruction> for Instruction {
    fn from_iter<I: IntoIterator<Item = SingularInstruction>>(iter: I) -> Self {
        Instruction::new(iter.into_iter().collect())
    }
}

// Renders back to the simple letter dialect, e.g. "LMLMM"
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step.letter())?;
        }
        Ok(())
    }
}
