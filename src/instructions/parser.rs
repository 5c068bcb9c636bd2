// Instruction parsers: validate instruction text and decode it into atomic steps

use super::instruction::{Instruction, SingularInstruction};
use crate::config::MAX_REPEAT_COUNT;
use crate::error::{Result, RoverError};

/// Decodes instruction text into an [`Instruction`].
///
/// Implementations only look at the text itself; whitespace anywhere in the
/// input is insignificant.
pub trait InstructionParser {
    /// Dialect name used in logs and help text
    fn name(&self) -> &'static str;

    fn is_valid(&self, text: &str) -> bool {
        self.parse(text).is_ok()
    }

    fn parse(&self, text: &str) -> Result<Instruction>;

    /// Like [`is_valid`](Self::is_valid), but absent input is simply invalid.
    fn is_valid_input(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| self.is_valid(t))
    }

    /// Like [`parse`](Self::parse), but absent input is an argument error
    /// rather than a format error.
    fn parse_input(&self, text: Option<&str>) -> Result<Instruction> {
        match text {
            Some(t) => self.parse(t),
            None => Err(RoverError::invalid_argument("instruction cannot be absent")),
        }
    }
}

/// Available instruction dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Dialect {
    /// One letter per step: "LMLMM"
    #[default]
    Simple,
    /// Letters with optional repeat counts: "LM2R3"
    Stepped,
}

impl Dialect {
    pub fn parser(self) -> Box<dyn InstructionParser> {
        match self {
            Dialect::Simple => Box::new(SimpleParser),
            Dialect::Stepped => Box::new(SteppedParser),
        }
    }
}

fn unknown_character(c: char, text: &str) -> RoverError {
    RoverError::format(format!(
        "Unexpected character '{}' in instruction '{}', only L, R and M are allowed",
        c, text
    ))
}

/// `L`, `R` and `M`, one step per letter
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleParser;

impl InstructionParser for SimpleParser {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn is_valid(&self, text: &str) -> bool {
        text.chars()
            .all(|c| c.is_whitespace() || SingularInstruction::from_letter(c).is_some())
    }

    fn parse(&self, text: &str) -> Result<Instruction> {
        let instruction = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| SingularInstruction::from_letter(c).ok_or_else(|| unknown_character(c, text)))
            .collect::<Result<Instruction>>()?;
        crate::debug_instructions!("Parsed '{}' into {} steps", text, instruction.len());
        Ok(instruction)
    }
}

/// `L`, `R` and `M`, each optionally followed by a repeat count (`M3` = `MMM`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SteppedParser;

impl InstructionParser for SteppedParser {
    fn name(&self) -> &'static str {
        "stepped"
    }

    fn parse(&self, text: &str) -> Result<Instruction> {
        let mut steps = Vec::new();
        let mut chars = text.chars().filter(|c| !c.is_whitespace()).peekable();

        while let Some(c) = chars.next() {
            let step = match SingularInstruction::from_letter(c) {
                Some(step) => step,
                None if c.is_ascii_digit() => {
                    return Err(RoverError::format(format!(
                        "Repeat count without a preceding letter in instruction '{}'",
                        text
                    )));
                }
                None => return Err(unknown_character(c, text)),
            };

            let mut digits = String::new();
            while let Some(d) = chars.next_if(|d| d.is_ascii_digit()) {
                digits.push(d);
            }

            let count = if digits.is_empty() {
                1
            } else {
                match digits.parse::<u32>() {
                    Ok(n) if (1..=MAX_REPEAT_COUNT).contains(&n) => n,
                    _ => {
                        return Err(RoverError::format(format!(
                            "Repeat count '{}' after '{}' must be between 1 and {}",
                            digits, c, MAX_REPEAT_COUNT
                        )));
                    }
                }
            };

            steps.extend(std::iter::repeat_n(step, count as usize));
        }

        crate::debug_instructions!("Parsed stepped '{}' into {} steps", text, steps.len());
        Ok(Instruction::new(steps))
    }
}
