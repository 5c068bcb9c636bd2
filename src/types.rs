use std::fmt;
use std::ops::{Add, Sub};

/// A cell on the plateau grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const fn new(x: i32, y: i32) -> Self {
        Coordinates { x, y }
    }

    /// Component-wise sum, or `None` if it leaves the `i32` grid
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Coordinates::new(self.x.checked_add(other.x)?, self.y.checked_add(other.y)?))
    }
}

impl Add for Coordinates {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Coordinates::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coordinates {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Coordinates::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Compass heading of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise order used for rotation
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Quarter turn counter-clockwise
    pub fn rotate_left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// Quarter turn clockwise
    pub fn rotate_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Unit step taken when moving forward while facing this way
    pub fn movement_vector(self) -> Coordinates {
        match self {
            Direction::North => Coordinates::new(0, 1),
            Direction::East => Coordinates::new(1, 0),
            Direction::South => Coordinates::new(0, -1),
            Direction::West => Coordinates::new(-1, 0),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Pose of a vehicle: where it is and which way it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub coordinates: Coordinates,
    pub direction: Direction,
}

impl Position {
    pub const fn new(coordinates: Coordinates, direction: Direction) -> Self {
        Position {
            coordinates,
            direction,
        }
    }

    pub const fn at(x: i32, y: i32, direction: Direction) -> Self {
        Position::new(Coordinates::new(x, y), direction)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coordinates, self.direction)
    }
}
