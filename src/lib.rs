//! Plateau rover simulator: vehicles driven by `L`/`R`/`M` instructions
//! across a bounded plateau, stopping short of boundaries, obstacles and
//! each other.

pub mod codec;
pub mod config;
pub mod console;
pub mod error;
pub mod instructions;
pub mod logging;
pub mod mission;
pub mod plateau;
pub mod types;
pub mod vehicle;

pub use error::{Result, RoverError};
pub use instructions::{Dialect, Instruction, InstructionParser, SingularInstruction};
pub use mission::{Mission, MoveReport, MoveStatus};
pub use plateau::{Plateau, PlateauShape};
pub use types::{Coordinates, Direction, Position};
pub use vehicle::{MoveOutcome, Vehicle, VehicleId, VehicleKind};
