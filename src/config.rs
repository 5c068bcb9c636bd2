//! Configuration constants for the plateau rover simulator.

use crate::types::Coordinates;
use crate::vehicle::VehicleKind;

// Prompt examples shown to whoever types positions in
pub const POSITION_EXAMPLE: &str = "1 2 N";
pub const COORDINATES_EXAMPLE: &str = "1 2";

// Plateau defaults
pub const DEFAULT_PLATEAU_MAX: Coordinates = Coordinates { x: 5, y: 5 };
pub const MIN_CIRCULAR_RADIUS: i32 = 1;

// Instruction dialects
pub const TURN_LEFT_LETTER: char = 'L';
pub const TURN_RIGHT_LETTER: char = 'R';
pub const MOVE_FORWARD_LETTER: char = 'M';
pub const MAX_REPEAT_COUNT: u32 = 99; // Upper bound for stepped counts such as "M99"

// Vehicles
pub const DEFAULT_VEHICLE_KIND: VehicleKind = VehicleKind::Rover;

// Random obstacle placement
pub const MAX_SCATTERED_OBSTACLES: usize = 10_000;
pub const SCATTER_ENUMERATION_LIMIT: u64 = 65_536; // Bounding boxes up to this many cells are listed cell by cell
pub const SCATTER_ATTEMPTS_PER_OBSTACLE: usize = 64; // Random draws allowed per obstacle on larger plateaus
