use crate::instructions::{Instruction, SingularInstruction};
use crate::plateau::Plateau;
use crate::types::Position;
use std::fmt;

/// Identity a plateau hands out when a vehicle is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The kind of a vehicle only changes its identity text, never how it moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum VehicleKind {
    Rover,
    #[value(name = "wall-e")]
    WallE,
}

impl VehicleKind {
    pub fn label(self) -> &'static str {
        match self {
            VehicleKind::Rover => "Rover",
            VehicleKind::WallE => "WALL-E",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VehicleKind::Rover => "a six-wheeled exploration rover sent to survey the plateau",
            VehicleKind::WallE => "a waste allocation load lifter, earth class, tidying up the plateau",
        }
    }
}

/// Result of applying one instruction: every pose visited, starting with the
/// pose held before the first step, and whether the run ended early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub path: Vec<Position>,
    pub emergency_stopped: bool,
}

impl MoveOutcome {
    pub fn start_position(&self) -> Position {
        self.path[0]
    }

    pub fn final_position(&self) -> Position {
        self.path[self.path.len() - 1]
    }

    /// Steps committed before finishing or stopping
    pub fn steps_applied(&self) -> usize {
        self.path.len() - 1
    }
}

// Represents a vehicle standing on (or about to be placed on) a plateau
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    kind: VehicleKind,
    name: String,
    position: Position,
}

impl Vehicle {
    pub fn new(kind: VehicleKind, position: Position) -> Self {
        Vehicle {
            kind,
            name: kind.label().to_string(),
            position,
        }
    }

    pub fn rover(position: Position) -> Self {
        Vehicle::new(VehicleKind::Rover, position)
    }

    pub fn wall_e(position: Position) -> Self {
        Vehicle::new(VehicleKind::WallE, position)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn describe(&self) -> String {
        format!("{} ({}), {}", self.name, self.kind.label(), self.kind.description())
    }

    /// Steps through `instruction` against `plateau`, committing each step
    /// until a forward move would land on a cell that is not valid. That move
    /// is dropped and the vehicle stays where it was (the emergency stop).
    ///
    /// Turns never fail. The plateau is only consulted for forward moves, so
    /// if this vehicle is itself registered on `plateau` use
    /// [`Plateau::move_vehicle`], which keeps its old registry entry from
    /// blocking it.
    pub fn apply_move_instruction(&mut self, instruction: &Instruction, plateau: &Plateau) -> MoveOutcome {
        let mut path = Vec::with_capacity(instruction.len() + 1);
        path.push(self.position);

        for step in instruction.iter() {
            let direction = match step {
                SingularInstruction::TurnLeft => self.position.direction.rotate_left(),
                SingularInstruction::TurnRight => self.position.direction.rotate_right(),
                SingularInstruction::MoveForward => self.position.direction,
            };
            // A step off the edge of the i32 grid counts as an invalid cell
            let target = if step.is_move() {
                self.position
                    .coordinates
                    .checked_add(direction.movement_vector())
                    .filter(|&c| plateau.is_valid(c))
            } else {
                Some(self.position.coordinates)
            };

            let Some(coordinates) = target else {
                crate::debug_vehicle!(
                    "{} sensed danger heading {} and stopped at {}",
                    self.name,
                    direction,
                    self.position
                );
                return MoveOutcome {
                    path,
                    emergency_stopped: true,
                };
            };

            self.position = Position::new(coordinates, direction);
            path.push(self.position);
        }

        MoveOutcome {
            path,
            emergency_stopped: false,
        }
    }

    /// Absent instructions are treated the same as empty ones: nothing moves.
    pub fn apply_optional_instruction(
        &mut self,
        instruction: Option<&Instruction>,
        plateau: &Plateau,
    ) -> MoveOutcome {
        match instruction {
            Some(instruction) => self.apply_move_instruction(instruction, plateau),
            None => MoveOutcome {
                path: vec![self.position],
                emergency_stopped: false,
            },
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.name, self.position)
    }
}
