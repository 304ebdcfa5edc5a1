//! Starting layouts and their placement notation.
//!
//! A layout lists which piece starts on which cell. The notation writes the
//! board column by column, west to east, separated by `/`. Each column lists
//! its rows from south to north: a letter is a piece (`r c d w p t l e`,
//! uppercase for South, lowercase for North) and a digit is a run of empty
//! cells. Every column must cover exactly nine rows.

use crate::{CellId, Player, Rank, COLUMNS, ROWS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing or assembling a layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid layout: expected 7 columns, got {0}")]
    InvalidColumnCount(usize),

    #[error("invalid character '{ch}' in column {column}")]
    InvalidCharacter { ch: char, column: usize },

    #[error("column {column} covers {rows} rows, expected 9")]
    InvalidColumnLength { column: usize, rows: u32 },

    #[error("cell {0} holds more than one piece")]
    DuplicateCell(CellId),
}

/// A single piece of a starting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub player: Player,
    pub rank: Rank,
    pub cell: CellId,
}

const fn place(player: Player, rank: Rank, cell: u8) -> Placement {
    Placement {
        player,
        rank,
        cell: CellId::from_raw(cell),
    }
}

/// Canonical North start cells.
const NORTH_START: [Placement; 8] = [
    place(Player::North, Rank::Elephant, 60),
    place(Player::North, Rank::Lion, 8),
    place(Player::North, Rank::Tiger, 62),
    place(Player::North, Rank::Leopard, 24),
    place(Player::North, Rank::Dog, 16),
    place(Player::North, Rank::Wolf, 42),
    place(Player::North, Rank::Cat, 52),
    place(Player::North, Rank::Rat, 6),
];

/// Canonical South start cells.
const SOUTH_START: [Placement; 8] = [
    place(Player::South, Rank::Elephant, 2),
    place(Player::South, Rank::Lion, 54),
    place(Player::South, Rank::Tiger, 0),
    place(Player::South, Rank::Leopard, 38),
    place(Player::South, Rank::Dog, 46),
    place(Player::South, Rank::Wolf, 20),
    place(Player::South, Rank::Cat, 10),
    place(Player::South, Rank::Rat, 56),
];

/// An ordered set of piece placements with no two pieces on one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartLayout {
    placements: Vec<Placement>,
}

impl StartLayout {
    /// Notation of the canonical starting layout.
    pub const STANDARD: &'static str = "T1E3r1l/1C5d1/2W3p2/9/2P3w2/1D5c1/L1R3e1t";

    /// The canonical 16-piece layout, North's pieces first.
    pub fn standard() -> Self {
        let placements = NORTH_START.iter().chain(SOUTH_START.iter()).copied().collect();
        StartLayout { placements }
    }

    /// A layout with no pieces.
    pub fn empty() -> Self {
        StartLayout {
            placements: Vec::new(),
        }
    }

    /// Builds a layout from explicit placements, rejecting shared cells.
    pub fn from_placements(placements: Vec<Placement>) -> Result<Self, LayoutError> {
        let mut seen = HashSet::new();
        for p in &placements {
            if !seen.insert(p.cell) {
                return Err(LayoutError::DuplicateCell(p.cell));
            }
        }
        Ok(StartLayout { placements })
    }

    /// Parses placement notation.
    pub fn parse(notation: &str) -> Result<Self, LayoutError> {
        let columns: Vec<&str> = notation.trim().split('/').collect();
        if columns.len() != COLUMNS as usize {
            return Err(LayoutError::InvalidColumnCount(columns.len()));
        }

        let mut placements = Vec::new();
        for (column, text) in columns.iter().enumerate() {
            let mut row: u32 = 0;
            for ch in text.chars() {
                if let Some(run) = ch.to_digit(10).filter(|d| *d > 0) {
                    row += run;
                    continue;
                }
                let (rank, player) = Rank::from_layout_char(ch)
                    .ok_or(LayoutError::InvalidCharacter { ch, column })?;
                if row >= ROWS as u32 {
                    return Err(LayoutError::InvalidColumnLength {
                        column,
                        rows: row + 1,
                    });
                }
                let cell = CellId::from_raw(column as u8 * ROWS + row as u8);
                placements.push(Placement { player, rank, cell });
                row += 1;
            }
            if row != ROWS as u32 {
                return Err(LayoutError::InvalidColumnLength { column, rows: row });
            }
        }

        Ok(StartLayout { placements })
    }

    /// Serializes the layout to placement notation.
    pub fn to_notation(&self) -> String {
        let mut by_cell = [None; crate::CELL_COUNT];
        for p in &self.placements {
            by_cell[p.cell.index() as usize] = Some(*p);
        }

        let mut columns = Vec::with_capacity(COLUMNS as usize);
        for column in 0..COLUMNS {
            let mut text = String::new();
            let mut empty = 0;
            for row in 0..ROWS {
                let index = (column * ROWS + row) as usize;
                match by_cell[index] {
                    Some(p) => {
                        if empty > 0 {
                            text.push_str(&empty.to_string());
                            empty = 0;
                        }
                        text.push(p.rank.to_layout_char(p.player));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            columns.push(text);
        }
        columns.join("/")
    }

    /// Returns the placements in spawn order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the placements belonging to `player`.
    pub fn placements_of(&self, player: Player) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.player == player)
    }

    /// Returns the number of pieces.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if the layout holds no pieces.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl Default for StartLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for StartLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StartLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl<'a> IntoIterator for &'a StartLayout {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(index: u8) -> CellId {
        CellId::from_index(index).unwrap()
    }

    #[test]
    fn standard_has_sixteen_pieces() {
        let layout = StartLayout::standard();
        assert_eq!(layout.len(), 16);
        assert_eq!(layout.placements_of(Player::North).count(), 8);
        assert_eq!(layout.placements_of(Player::South).count(), 8);
    }

    #[test]
    fn standard_table_cells() {
        let layout = StartLayout::standard();
        let find = |player: Player, rank: Rank| {
            layout
                .placements()
                .iter()
                .find(|p| p.player == player && p.rank == rank)
                .map(|p| p.cell.index())
        };
        assert_eq!(find(Player::North, Rank::Elephant), Some(60));
        assert_eq!(find(Player::South, Rank::Elephant), Some(2));
        assert_eq!(find(Player::South, Rank::Rat), Some(56));
        assert_eq!(find(Player::North, Rank::Rat), Some(6));
    }

    #[test]
    fn standard_notation_matches_table() {
        assert_eq!(StartLayout::standard().to_notation(), StartLayout::STANDARD);
        let parsed = StartLayout::parse(StartLayout::STANDARD).unwrap();
        let mut a: Vec<Placement> = parsed.placements().to_vec();
        let mut b: Vec<Placement> = StartLayout::standard().placements().to_vec();
        a.sort_by_key(|p| p.cell);
        b.sort_by_key(|p| p.cell);
        assert_eq!(a, b);
    }

    #[test]
    fn parse_small_layout() {
        let layout: StartLayout = "R8/9/9/9/9/9/8e".parse().unwrap();
        assert_eq!(
            layout.placements(),
            &[
                Placement {
                    player: Player::South,
                    rank: Rank::Rat,
                    cell: cell(0)
                },
                Placement {
                    player: Player::North,
                    rank: Rank::Elephant,
                    cell: cell(62)
                },
            ]
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            StartLayout::parse("9/9/9"),
            Err(LayoutError::InvalidColumnCount(3))
        );
        assert_eq!(
            StartLayout::parse("9/9/9/x8/9/9/9"),
            Err(LayoutError::InvalidCharacter { ch: 'x', column: 3 })
        );
        assert_eq!(
            StartLayout::parse("9/9/9/8/9/9/9"),
            Err(LayoutError::InvalidColumnLength { column: 3, rows: 8 })
        );
        assert_eq!(
            StartLayout::parse("9/9/9/9R/9/9/9"),
            Err(LayoutError::InvalidColumnLength { column: 3, rows: 10 })
        );
    }

    #[test]
    fn duplicate_cells_rejected() {
        let p = Placement {
            player: Player::South,
            rank: Rank::Cat,
            cell: cell(10),
        };
        assert_eq!(
            StartLayout::from_placements(vec![p, p]),
            Err(LayoutError::DuplicateCell(cell(10)))
        );
    }

    #[test]
    fn empty_layout_notation() {
        assert_eq!(StartLayout::empty().to_notation(), "9/9/9/9/9/9/9");
    }
}
