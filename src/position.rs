//! Board coordinates and movement directions.

use crate::error::PositionError;
use std::fmt;
use std::str::FromStr;

/// An immutable (row, column) coordinate on a board.
///
/// Coordinates are never negative. Building one from negative values with
/// `Position::new` is an error, while the offset helpers simply return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    /// Creates a position, rejecting negative coordinates.
    ///
    /// # Examples
    /// ```
    /// use inertia::position::Position;
    /// use inertia::error::PositionError;
    ///
    /// let pos = Position::new(2, 3).unwrap();
    /// assert_eq!((pos.row(), pos.column()), (2, 3));
    /// assert_eq!(Position::new(-1, 0), Err(PositionError::NegativeRow(-1)));
    /// assert_eq!(Position::new(0, -4), Err(PositionError::NegativeColumn(-4)));
    /// ```
    pub fn new(row: i64, column: i64) -> Result<Self, PositionError> {
        if row < 0 {
            return Err(PositionError::NegativeRow(row));
        }
        if column < 0 {
            return Err(PositionError::NegativeColumn(column));
        }
        Ok(Position {
            row: row as usize,
            column: column as usize,
        })
    }

    /// Builds a position from indices that are known to be valid.
    pub(crate) fn at(row: usize, column: usize) -> Self {
        Position { row, column }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the position shifted by (`row_offset`, `column_offset`), or `None`
    /// if either coordinate would become negative. There is no upper bound.
    pub fn offset_by(&self, row_offset: i32, column_offset: i32) -> Option<Position> {
        let row = self.row as i64 + row_offset as i64;
        let column = self.column as i64 + column_offset as i64;
        Position::new(row, column).ok()
    }

    /// Like `offset_by`, but also returns `None` when the result falls outside a
    /// `size x size` board.
    ///
    /// # Examples
    /// ```
    /// use inertia::position::Position;
    ///
    /// let corner = Position::new(2, 2).unwrap();
    /// assert_eq!(corner.offset_within(0, 1, 3), None);
    /// assert_eq!(corner.offset_within(-1, 0, 3), Some(Position::new(1, 2).unwrap()));
    /// ```
    pub fn offset_within(&self, row_offset: i32, column_offset: i32, size: usize) -> Option<Position> {
        self.offset_by(row_offset, column_offset)
            .filter(|p| p.row < size && p.column < size)
    }

    /// Shorthand for `offset_within` using a direction's offsets.
    pub fn step(&self, direction: Direction, size: usize) -> Option<Position> {
        self.offset_within(direction.row_offset(), direction.column_offset(), size)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The four directions the player can slide in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn row_offset(&self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Left | Direction::Right => 0,
        }
    }

    pub fn column_offset(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => 0,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parses `UP`, `DOWN`, `LEFT` or `RIGHT`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Ok(Direction::Left),
            "UP" => Ok(Direction::Up),
            "RIGHT" => Ok(Direction::Right),
            "DOWN" => Ok(Direction::Down),
            other => Err(format!("Unknown direction '{}'", other)),
        }
    }
}
