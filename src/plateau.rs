use crate::config::{MIN_CIRCULAR_RADIUS, SCATTER_ATTEMPTS_PER_OBSTACLE, SCATTER_ENUMERATION_LIMIT};
use crate::error::{Result, RoverError};
use crate::instructions::Instruction;
use crate::types::Coordinates;
use crate::vehicle::{MoveOutcome, Vehicle, VehicleId};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

/// Geometric outline of a plateau
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateauShape {
    /// Box from (0,0) to `max`, both corners included
    Rectangular { max: Coordinates },
    /// Disk of `radius` centred at (radius, radius)
    Circular { radius: i32 },
}

impl PlateauShape {
    pub fn rectangular(max: Coordinates) -> Result<Self> {
        if max.x < 0 || max.y < 0 {
            return Err(RoverError::invalid_argument(format!(
                "rectangular plateau corner must not be negative, got {}",
                max
            )));
        }
        Ok(PlateauShape::Rectangular { max })
    }

    pub fn circular(radius: i32) -> Result<Self> {
        if radius < MIN_CIRCULAR_RADIUS {
            return Err(RoverError::invalid_argument(format!(
                "circular plateau radius must be at least {}, got {}",
                MIN_CIRCULAR_RADIUS, radius
            )));
        }
        Ok(PlateauShape::Circular { radius })
    }

    /// Pure boundary test; ignores obstacles and vehicles
    pub fn is_within_boundary(&self, coordinates: Coordinates) -> bool {
        match *self {
            PlateauShape::Rectangular { max } => {
                (0..=max.x).contains(&coordinates.x) && (0..=max.y).contains(&coordinates.y)
            }
            PlateauShape::Circular { radius } => {
                let r = i64::from(radius);
                let dx = i64::from(coordinates.x) - r;
                let dy = i64::from(coordinates.y) - r;
                dx * dx + dy * dy <= r * r
            }
        }
    }

    /// Smallest box (min, max corners, inclusive) containing every cell of the
    /// shape. A disk wider than the grid is cut off at `i32::MAX`.
    pub fn bounds(&self) -> (Coordinates, Coordinates) {
        match *self {
            PlateauShape::Rectangular { max } => (Coordinates::new(0, 0), max),
            PlateauShape::Circular { radius } => {
                let diameter = radius.saturating_mul(2);
                (Coordinates::new(0, 0), Coordinates::new(diameter, diameter))
            }
        }
    }

    /// Number of cells in the bounding box
    pub fn bounding_area(&self) -> u64 {
        let (min, max) = self.bounds();
        let width = (i64::from(max.x) - i64::from(min.x) + 1) as u64;
        let height = (i64::from(max.y) - i64::from(min.y) + 1) as u64;
        width.saturating_mul(height)
    }
}

impl fmt::Display for PlateauShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlateauShape::Rectangular { max } => write!(f, "rectangular plateau up to {}", max),
            PlateauShape::Circular { radius } => write!(f, "circular plateau of radius {}", radius),
        }
    }
}

/// The surface vehicles drive on.
///
/// A plateau owns its obstacles and the vehicles standing on it. A cell is
/// *valid* when it is inside the shape, holds no obstacle and no vehicle
/// stands on it. Obstacles and vehicles can only be put on valid cells, so
/// the obstacle list never actually holds duplicates.
#[derive(Debug, Clone)]
pub struct Plateau {
    shape: PlateauShape,
    obstacles: Vec<Coordinates>,
    vehicles: Vec<(VehicleId, Vehicle)>,
    next_vehicle_id: u32,
}

impl Plateau {
    pub fn new(shape: PlateauShape) -> Self {
        crate::debug_plateau!("Created {}", shape);
        Plateau {
            shape,
            obstacles: Vec::new(),
            vehicles: Vec::new(),
            next_vehicle_id: 1,
        }
    }

    pub fn rectangular(max: Coordinates) -> Result<Self> {
        Ok(Plateau::new(PlateauShape::rectangular(max)?))
    }

    pub fn circular(radius: i32) -> Result<Self> {
        Ok(Plateau::new(PlateauShape::circular(radius)?))
    }

    pub fn shape(&self) -> PlateauShape {
        self.shape
    }

    pub fn is_within_boundary(&self, coordinates: Coordinates) -> bool {
        self.shape.is_within_boundary(coordinates)
    }

    pub fn is_obstacle(&self, coordinates: Coordinates) -> bool {
        self.obstacles.contains(&coordinates)
    }

    pub fn is_occupied_by_vehicle(&self, coordinates: Coordinates) -> bool {
        self.vehicle_at_coordinates(coordinates).is_some()
    }

    pub fn is_valid(&self, coordinates: Coordinates) -> bool {
        self.is_within_boundary(coordinates)
            && !self.is_obstacle(coordinates)
            && !self.is_occupied_by_vehicle(coordinates)
    }

    // --- Obstacles ---

    pub fn obstacles(&self) -> &[Coordinates] {
        &self.obstacles
    }

    pub fn add_obstacle(&mut self, coordinates: Coordinates) -> Result<()> {
        if !self.is_valid(coordinates) {
            return Err(RoverError::invalid_argument(format!(
                "cannot place an obstacle at {}: cell is outside the plateau or already taken",
                coordinates
            )));
        }
        self.obstacles.push(coordinates);
        crate::debug_plateau!("Obstacle added at {}", coordinates);
        Ok(())
    }

    /// Removes the first obstacle at `coordinates`; returns whether one was there
    pub fn remove_obstacle(&mut self, coordinates: Coordinates) -> bool {
        match self.obstacles.iter().position(|&o| o == coordinates) {
            Some(index) => {
                self.obstacles.remove(index);
                crate::debug_plateau!("Obstacle removed from {}", coordinates);
                true
            }
            None => false,
        }
    }

    /// Every valid cell of the bounding box, row by row from the bottom left.
    /// This walks the whole box, so keep it to small plateaus.
    pub fn free_cells(&self) -> Vec<Coordinates> {
        let (min, max) = self.shape.bounds();
        (min.y..=max.y)
            .flat_map(|y| (min.x..=max.x).map(move |x| Coordinates::new(x, y)))
            .filter(|&c| self.is_valid(c))
            .collect()
    }

    /// Drops up to `count` obstacles onto distinct free cells picked by `rng`.
    /// Returns how many were placed.
    ///
    /// Small plateaus are enumerated, so fewer than `count` are placed only
    /// when the free cells run out. Larger ones draw random cells inside the
    /// bounding box and retry taken ones, giving up after a fixed number of
    /// draws per obstacle.
    pub fn scatter_obstacles<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        let chosen = if self.shape.bounding_area() <= SCATTER_ENUMERATION_LIMIT {
            let free = self.free_cells();
            let chosen: Vec<Coordinates> = free.choose_multiple(rng, count).copied().collect();
            if chosen.len() < count {
                log::warn!(
                    "Only {} free cells left, placing {} of {} requested obstacles",
                    free.len(),
                    chosen.len(),
                    count
                );
            }
            chosen
        } else {
            self.sample_free_cells(count, rng)
        };

        self.obstacles.extend_from_slice(&chosen);
        crate::debug_plateau!("Scattered {} obstacles", chosen.len());
        chosen.len()
    }

    // Rejection sampling over the bounding box
    fn sample_free_cells<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Coordinates> {
        let (min, max) = self.shape.bounds();
        let mut taken = HashSet::new();
        let mut chosen = Vec::with_capacity(count);
        let mut attempts = count.saturating_mul(SCATTER_ATTEMPTS_PER_OBSTACLE);

        while chosen.len() < count && attempts > 0 {
            attempts -= 1;
            let candidate = Coordinates::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
            if self.is_valid(candidate) && taken.insert(candidate) {
                chosen.push(candidate);
            }
        }

        if chosen.len() < count {
            log::warn!(
                "Gave up after too many taken cells, placing {} of {} requested obstacles",
                chosen.len(),
                count
            );
        }
        chosen
    }

    // --- Vehicles ---

    pub fn vehicles(&self) -> impl Iterator<Item = (VehicleId, &Vehicle)> {
        self.vehicles.iter().map(|(id, vehicle)| (*id, vehicle))
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|(vid, _)| *vid == id)
            .map(|(_, vehicle)| vehicle)
    }

    /// First vehicle, in registration order, standing on `coordinates`
    pub fn vehicle_at_coordinates(&self, coordinates: Coordinates) -> Option<(VehicleId, &Vehicle)> {
        self.vehicles()
            .find(|(_, vehicle)| vehicle.position().coordinates == coordinates)
    }

    /// Registers a vehicle; it must stand on a valid cell
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<VehicleId> {
        let coordinates = vehicle.position().coordinates;
        if !self.is_valid(coordinates) {
            return Err(RoverError::invalid_argument(format!(
                "cannot place {} at {}: cell is outside the plateau or already taken",
                vehicle.name(),
                coordinates
            )));
        }
        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;
        crate::debug_plateau!("Vehicle {} ({}) added at {}", id, vehicle.name(), vehicle.position());
        self.vehicles.push((id, vehicle));
        Ok(id)
    }

    pub fn remove_vehicle(&mut self, id: VehicleId) -> Option<Vehicle> {
        let index = self.vehicles.iter().position(|(vid, _)| *vid == id)?;
        let (_, vehicle) = self.vehicles.remove(index);
        crate::debug_plateau!("Vehicle {} removed from {}", id, vehicle.position());
        Some(vehicle)
    }

    /// Applies `instruction` to a registered vehicle. The vehicle is lifted out
    /// of the registry while it moves so its own cell never blocks it, then put
    /// back in the same registry slot.
    pub fn move_vehicle(&mut self, id: VehicleId, instruction: &Instruction) -> Result<MoveOutcome> {
        let index = self
            .vehicles
            .iter()
            .position(|(vid, _)| *vid == id)
            .ok_or_else(|| RoverError::invalid_argument(format!("no vehicle with id {} on this plateau", id)))?;

        let (vid, mut vehicle) = self.vehicles.remove(index);
        let outcome = vehicle.apply_move_instruction(instruction, self);
        crate::debug_vehicle!(
            vehicle: vid,
            "Vehicle {} moved {} -> {} ({} steps, stopped: {})",
            vid,
            outcome.start_position(),
            outcome.final_position(),
            outcome.steps_applied(),
            outcome.emergency_stopped
        );
        self.vehicles.insert(index, (vid, vehicle));
        Ok(outcome)
    }
}
