//! Position-string codec: reads and writes positions such as `"1 2 N"` and
//! coordinates such as `"1 2"`.
//!
//! The accepted grammar is strict: integers are an optional `-` followed by
//! ASCII digits, parts are separated by exactly one space, and the heading is
//! a single upper-case `N`, `E`, `S` or `W`. Integers that do not fit in `i32`
//! are rejected as malformed.

use crate::error::{Result, RoverError};
use crate::types::{Coordinates, Direction, Position};

pub use crate::config::{COORDINATES_EXAMPLE, POSITION_EXAMPLE};

// Parses one `-?[0-9]+` token, refusing '+' signs and overflow
fn parse_integer(token: &str) -> Option<i32> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<i32>().ok()
}

fn parse_coordinate_pair(text: &str) -> Option<Coordinates> {
    let (x, y) = text.split_once(' ')?;
    Some(Coordinates::new(parse_integer(x)?, parse_integer(y)?))
}

fn parse_position(text: &str) -> Option<Position> {
    let (pair, letter) = text.rsplit_once(' ')?;
    let mut letters = letter.chars();
    let direction = Direction::from_letter(letters.next()?)?;
    if letters.next().is_some() {
        return None;
    }
    Some(Position::new(parse_coordinate_pair(pair)?, direction))
}

/// True if `text` looks like `"<int> <int> <N|E|S|W>"`
pub fn is_valid_position_string(text: &str) -> bool {
    parse_position(text).is_some()
}

/// True if `text` looks like `"<int> <int>"`
pub fn is_valid_coordinate_string(text: &str) -> bool {
    parse_coordinate_pair(text).is_some()
}

pub fn to_position(text: &str) -> Result<Position> {
    parse_position(text).ok_or_else(|| {
        RoverError::format(format!(
            "'{}' is not a valid position, expected something like '{}'",
            text, POSITION_EXAMPLE
        ))
    })
}

pub fn to_coordinates(text: &str) -> Result<Coordinates> {
    parse_coordinate_pair(text).ok_or_else(|| {
        RoverError::format(format!(
            "'{}' is not a valid coordinate pair, expected something like '{}'",
            text, COORDINATES_EXAMPLE
        ))
    })
}

pub fn to_position_string(position: &Position) -> String {
    position.to_string()
}

pub fn to_coordinate_string(coordinates: &Coordinates) -> String {
    coordinates.to_string()
}
