use crate::error::{Result, RoverError};
use crate::instructions::{Dialect, InstructionParser};
use crate::plateau::Plateau;
use crate::types::Position;
use crate::vehicle::{MoveOutcome, Vehicle, VehicleId};
use log::info;
use std::fmt;

/// How an instruction run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Completed,
    EmergencyStopped,
    Empty,
}

/// What happened when a mission sent an instruction to its active vehicle.
/// `Display` renders the status line shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub vehicle_id: VehicleId,
    pub instruction_text: String,
    pub instruction_len: usize,
    pub outcome: MoveOutcome,
}

impl MoveReport {
    pub fn status(&self) -> MoveStatus {
        if self.outcome.emergency_stopped {
            MoveStatus::EmergencyStopped
        } else if self.instruction_len == 0 {
            MoveStatus::Empty
        } else {
            MoveStatus::Completed
        }
    }

    pub fn final_position(&self) -> Position {
        self.outcome.final_position()
    }
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.final_position();
        match self.status() {
            MoveStatus::EmergencyStopped => write!(
                f,
                "sensed danger ahead, stopped at {} instead of applying full instruction {}",
                position, self.instruction_text
            ),
            MoveStatus::Completed => write!(
                f,
                "reached Position {} after fully applying instruction {}",
                position, self.instruction_text
            ),
            MoveStatus::Empty => write!(
                f,
                "Instruction is empty, vehicle is in the same Position {}",
                position
            ),
        }
    }
}

/// Connects a plateau, the vehicle being driven and an instruction dialect.
///
/// Sending an instruction before a plateau is connected or a vehicle is
/// selected is a [`RoverError::State`]. Absent instruction text is treated as
/// an empty instruction.
pub struct Mission {
    plateau: Option<Plateau>,
    active_vehicle: Option<VehicleId>,
    parser: Box<dyn InstructionParser>,
}

impl Mission {
    pub fn new(dialect: Dialect) -> Self {
        Mission::with_parser(dialect.parser())
    }

    pub fn with_parser(parser: Box<dyn InstructionParser>) -> Self {
        Mission {
            plateau: None,
            active_vehicle: None,
            parser,
        }
    }

    pub fn parser(&self) -> &dyn InstructionParser {
        self.parser.as_ref()
    }

    /// Connects `plateau`, returning the previous one. Any vehicle selection
    /// belonged to the old plateau and is cleared.
    pub fn connect_plateau(&mut self, plateau: Plateau) -> Option<Plateau> {
        info!("Connected {}", plateau.shape());
        self.active_vehicle = None;
        self.plateau.replace(plateau)
    }

    pub fn plateau(&self) -> Result<&Plateau> {
        self.plateau
            .as_ref()
            .ok_or_else(|| RoverError::state("no plateau connected"))
    }

    pub fn plateau_mut(&mut self) -> Result<&mut Plateau> {
        self.plateau
            .as_mut()
            .ok_or_else(|| RoverError::state("no plateau connected"))
    }

    /// Puts `vehicle` on the connected plateau and makes it the active vehicle
    pub fn deploy_vehicle(&mut self, vehicle: Vehicle) -> Result<VehicleId> {
        let id = self.plateau_mut()?.add_vehicle(vehicle)?;
        self.active_vehicle = Some(id);
        crate::debug_mission!("Vehicle {} deployed and selected", id);
        Ok(id)
    }

    pub fn select_vehicle(&mut self, id: VehicleId) -> Result<()> {
        if self.plateau()?.vehicle(id).is_none() {
            return Err(RoverError::invalid_argument(format!(
                "no vehicle with id {} on the connected plateau",
                id
            )));
        }
        self.active_vehicle = Some(id);
        Ok(())
    }

    pub fn active_vehicle_id(&self) -> Option<VehicleId> {
        self.active_vehicle
    }

    pub fn active_vehicle(&self) -> Result<&Vehicle> {
        let id = self
            .active_vehicle
            .ok_or_else(|| RoverError::state("no vehicle connected"))?;
        self.plateau()?
            .vehicle(id)
            .ok_or_else(|| RoverError::state(format!("vehicle {} is no longer on the plateau", id)))
    }

    /// Parses `text` and drives the active vehicle with it
    pub fn send_instruction(&mut self, text: Option<&str>) -> Result<MoveReport> {
        self.plateau()?;
        let id = self
            .active_vehicle
            .ok_or_else(|| RoverError::state("no vehicle connected"))?;

        let text = text.unwrap_or_default();
        let instruction = self.parser.parse(text)?;
        let outcome = self.plateau_mut()?.move_vehicle(id, &instruction)?;

        let report = MoveReport {
            vehicle_id: id,
            instruction_text: text.to_string(),
            instruction_len: instruction.len(),
            outcome,
        };
        if report.status() == MoveStatus::EmergencyStopped {
            log::warn!("Vehicle {} {}", id, report);
        } else {
            info!("Vehicle {} {}", id, report);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, Direction};

    fn mission_5x5() -> Mission {
        let mut mission = Mission::new(Dialect::Simple);
        mission.connect_plateau(Plateau::rectangular(Coordinates::new(5, 5)).unwrap());
        mission
    }

    #[test]
    fn test_state_errors() {
        let mut mission = Mission::new(Dialect::Simple);
        assert!(mission.send_instruction(Some("M")).unwrap_err().is_state());
        assert!(mission.plateau().unwrap_err().is_state());
        assert!(mission
            .deploy_vehicle(Vehicle::rover(Position::at(0, 0, Direction::North)))
            .unwrap_err()
            .is_state());

        mission.connect_plateau(Plateau::rectangular(Coordinates::new(5, 5)).unwrap());
        assert!(mission.send_instruction(Some("M")).unwrap_err().is_state());
        assert!(mission.active_vehicle().unwrap_err().is_state());
    }

    #[test]
    fn test_completed_report() {
        let mut mission = mission_5x5();
        mission
            .deploy_vehicle(Vehicle::rover(Position::at(1, 2, Direction::North)))
            .unwrap();
        let report = mission.send_instruction(Some("LMLMLMLMM")).unwrap();
        assert_eq!(report.status(), MoveStatus::Completed);
        assert_eq!(
            report.to_string(),
            "reached Position 1 3 N after fully applying instruction LMLMLMLMM"
        );
        assert_eq!(
            mission.active_vehicle().unwrap().position(),
            Position::at(1, 3, Direction::North)
        );
    }

    #[test]
    fn test_emergency_stop_report() {
        let mut mission = mission_5x5();
        mission.plateau_mut().unwrap().add_obstacle(Coordinates::new(2, 4)).unwrap();
        mission
            .deploy_vehicle(Vehicle::rover(Position::at(1, 2, Direction::North)))
            .unwrap();
        let report = mission.send_instruction(Some("RMLMMM")).unwrap();
        assert_eq!(report.status(), MoveStatus::EmergencyStopped);
        assert_eq!(
            report.to_string(),
            "sensed danger ahead, stopped at 2 3 N instead of applying full instruction RMLMMM"
        );
    }

    #[test]
    fn test_empty_and_absent_instruction() {
        let mut mission = mission_5x5();
        mission
            .deploy_vehicle(Vehicle::rover(Position::at(1, 2, Direction::North)))
            .unwrap();

        for text in [Some(""), Some("   "), None] {
            let report = mission.send_instruction(text).unwrap();
            assert_eq!(report.status(), MoveStatus::Empty);
            assert_eq!(report.outcome.path, vec![Position::at(1, 2, Direction::North)]);
            assert_eq!(
                report.to_string(),
                "Instruction is empty, vehicle is in the same Position 1 2 N"
            );
        }
    }

    #[test]
    fn test_malformed_instruction_leaves_vehicle_alone() {
        let mut mission = mission_5x5();
        mission
            .deploy_vehicle(Vehicle::rover(Position::at(1, 2, Direction::North)))
            .unwrap();
        assert!(mission.send_instruction(Some("MMX")).unwrap_err().is_format());
        assert_eq!(
            mission.active_vehicle().unwrap().position(),
            Position::at(1, 2, Direction::North)
        );
    }

    #[test]
    fn test_vehicle_selection() {
        let mut mission = mission_5x5();
        let first = mission
            .deploy_vehicle(Vehicle::rover(Position::at(0, 0, Direction::North)))
            .unwrap();
        let second = mission
            .deploy_vehicle(Vehicle::wall_e(Position::at(5, 5, Direction::South)))
            .unwrap();
        assert_eq!(mission.active_vehicle_id(), Some(second));

        mission.select_vehicle(first).unwrap();
        let report = mission.send_instruction(Some("MM")).unwrap();
        assert_eq!(report.vehicle_id, first);
        assert_eq!(report.final_position(), Position::at(0, 2, Direction::North));

        assert!(mission.select_vehicle(VehicleId(99)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_reconnect_clears_selection() {
        let mut mission = mission_5x5();
        mission
            .deploy_vehicle(Vehicle::rover(Position::at(0, 0, Direction::North)))
            .unwrap();
        let old = mission.connect_plateau(Plateau::circular(2).unwrap());
        assert_eq!(old.unwrap().vehicle_count(), 1);
        assert_eq!(mission.active_vehicle_id(), None);
        assert!(mission.send_instruction(Some("M")).unwrap_err().is_state());
    }

    #[test]
    fn test_stepped_dialect_mission() {
        let mut mission = Mission::new(Dialect::Stepped);
        mission.connect_plateau(Plateau::rectangular(Coordinates::new(5, 5)).unwrap());
        mission
            .deploy_vehicle(Vehicle::rover(Position::at(0, 0, Direction::East)))
            .unwrap();
        let report = mission.send_instruction(Some("M3LM2")).unwrap();
        assert_eq!(report.final_position(), Position::at(3, 2, Direction::North));
        assert_eq!(mission.parser().name(), "stepped");
    }
}
