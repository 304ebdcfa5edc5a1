//! Board cell representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of columns (west to east).
pub const COLUMNS: u8 = 7;

/// Number of rows (south to north).
pub const ROWS: u8 = 9;

/// Number of cells on the board.
pub const CELL_COUNT: usize = COLUMNS as usize * ROWS as usize;

/// A cell index outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell id {0} is outside the 7x9 board")]
pub struct InvalidCell(pub i64);

/// One of the four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    South,
    North,
    West,
    East,
}

impl Direction {
    /// All directions, in south/north/west/east order.
    pub const ALL: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::West,
        Direction::East,
    ];

    /// Returns the direction pointing back.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::South => Direction::North,
            Direction::North => Direction::South,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::South => "south",
            Direction::North => "north",
            Direction::West => "west",
            Direction::East => "east",
        };
        write!(f, "{}", name)
    }
}

/// A cell on the board, indexed 0-62.
///
/// Cells are laid out column by column:
/// - column 0 holds ids 0 (south edge) to 8 (north edge)
/// - column 1 holds ids 9 to 17, and so on up to column 6 (54-62)
///
/// Moving north or south steps the id by one, moving east or west by nine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CellId(u8);

impl CellId {
    /// Creates a cell from column (0-6) and row (0-8).
    #[inline]
    pub const fn new(column: u8, row: u8) -> Option<Self> {
        if column < COLUMNS && row < ROWS {
            Some(CellId(column * ROWS + row))
        } else {
            None
        }
    }

    /// Creates a cell from index (0-62).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < CELL_COUNT {
            Some(CellId(index))
        } else {
            None
        }
    }

    /// Creates a cell from a compile-time index known to be on the board.
    pub(crate) const fn from_raw(index: u8) -> Self {
        debug_assert!((index as usize) < CELL_COUNT);
        CellId(index)
    }

    /// Returns the index (0-62).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the column (0-6, west to east).
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 / ROWS
    }

    /// Returns the row (0-8, south to north).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 % ROWS
    }

    /// Returns the grid neighbor in `direction`, or `None` at the board edge.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (column, row) = (self.column(), self.row());
        match direction {
            Direction::South if row > 0 => Some(CellId(self.0 - 1)),
            Direction::North if row + 1 < ROWS => Some(CellId(self.0 + 1)),
            Direction::West if column > 0 => Some(CellId(self.0 - ROWS)),
            Direction::East if column + 1 < COLUMNS => Some(CellId(self.0 + ROWS)),
            _ => None,
        }
    }

    /// Returns the direction from `self` to `other` if they share a row or
    /// column and differ.
    pub const fn direction_to(self, other: CellId) -> Option<Direction> {
        if self.column() == other.column() {
            if other.row() < self.row() {
                Some(Direction::South)
            } else if other.row() > self.row() {
                Some(Direction::North)
            } else {
                None
            }
        } else if self.row() == other.row() {
            if other.column() < self.column() {
                Some(Direction::West)
            } else {
                Some(Direction::East)
            }
        } else {
            None
        }
    }

    /// Returns true for the four outer corners.
    #[inline]
    pub const fn is_corner(self) -> bool {
        let column = self.column();
        let row = self.row();
        (column == 0 || column == COLUMNS - 1) && (row == 0 || row == ROWS - 1)
    }

    /// Iterates over every cell in id order.
    pub fn all() -> impl Iterator<Item = CellId> {
        (0..CELL_COUNT as u8).map(CellId)
    }
}

impl TryFrom<u8> for CellId {
    type Error = InvalidCell;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        CellId::from_index(index).ok_or(InvalidCell(index as i64))
    }
}

impl TryFrom<i64> for CellId {
    type Error = InvalidCell;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        u8::try_from(index)
            .ok()
            .and_then(CellId::from_index)
            .ok_or(InvalidCell(index))
    }
}

impl From<CellId> for u8 {
    fn from(cell: CellId) -> Self {
        cell.0
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
