//! Grid positions on the fixed 10×10 board.
//!
//! ## Coordinates
//!
//! Positions are `(row, col)` pairs, 0-indexed. Row 0 is the human's back
//! row, row 9 the AI's. Arithmetic is done in `i32` so that stepping off
//! the board produces `None` instead of wrapping.
//!
//! ## String Form
//!
//! Snapshots key the occupancy map by `"row,col"`. `Display` and `FromStr`
//! round-trip that form.
//!
//! ```
//! use galactic_gladiators::core::Position;
//!
//! let pos = Position::new(3, 7);
//! assert_eq!(pos.to_string(), "3,7");
//! assert_eq!("3,7".parse::<Position>(), Ok(pos));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 10;

/// Orthogonal step directions in scan order: up, down, left, right.
///
/// Every neighbor scan in the engine follows this order, which makes the
/// first-match tie-breaks in rally and infiltration deterministic.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0 = human back row).
    pub row: u8,
    /// Column index.
    pub col: u8,
}

/// Neighbor list without heap allocation (at most four entries).
pub type Neighbors = SmallVec<[Position; 4]>;

impl Position {
    /// Create a position. Does not check bounds.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Create a position from signed coordinates, if they are on the board.
    #[must_use]
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        let size = i32::from(BOARD_SIZE);
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Check whether this position lies on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Step `distance` cells in direction `(dr, dc)`.
    ///
    /// Returns `None` when the result would leave the board.
    #[must_use]
    pub fn offset(self, (dr, dc): (i32, i32), distance: i32) -> Option<Self> {
        Self::checked(
            i32::from(self.row) + dr * distance,
            i32::from(self.col) + dc * distance,
        )
    }

    /// In-bounds orthogonal neighbors, in `DIRECTIONS` order.
    #[must_use]
    pub fn neighbors(self) -> Neighbors {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| self.offset(dir, 1))
            .collect()
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan(self, other: Position) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }

    /// Check whether `other` is orthogonally adjacent.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The board's center cell, used as the AI's advance target.
    #[must_use]
    pub const fn center() -> Self {
        Self::new(BOARD_SIZE / 2, BOARD_SIZE / 2)
    }

    /// Iterate over every cell of a row, left to right.
    pub fn row_cells(row: u8) -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).map(move |col| Position::new(row, col))
    }

    /// Iterate over every cell of the board, row-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(Position::row_cells)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Error returned when a `"row,col"` key cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePositionError(pub String);

impl std::fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid position key {:?}", self.0)
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse::<u8>().map_err(|_| err())?;
        let col = col.trim().parse::<u8>().map_err(|_| err())?;
        let pos = Position::new(row, col);
        if pos.in_bounds() {
            Ok(pos)
        } else {
            Err(err())
        }
    }
}
