//! Static board geometry: terrain and neighbor overrides.
//!
//! Most cells derive their neighbors from the grid. Two override tables
//! replace that for specific cells:
//! - corner overrides, which give the four outer corners a fixed move set
//! - leap overrides on river banks, which point across the river to the far
//!   bank for pieces that can leap

use crate::CellSet;
use jungle_core::{CellId, Direction, Player, CELL_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building a topology from a [`BoardSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("cell id {0} is outside the 7x9 board")]
    InvalidCellId(u8),

    #[error("cell {0} is listed under more than one terrain kind")]
    OverlappingTerrain(CellId),

    #[error("both dens are on cell {0}")]
    DenCollision(CellId),

    #[error("cell {0} has more than one neighbor override")]
    ContradictoryOverride(CellId),

    #[error("corner override on cell {0}, which is not a board corner")]
    NotACorner(CellId),

    #[error("override for cell {cell} lists {target} as its {direction} neighbor")]
    MisalignedOverride {
        cell: CellId,
        direction: Direction,
        target: CellId,
    },

    #[error("leap from cell {cell} lands in the river at {target}")]
    LeapIntoRiver { cell: CellId, target: CellId },
}

/// Terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Normal,
    River,
    /// A trap guarding the den of the given player.
    Trap(Player),
    /// The den of the given player.
    Den(Player),
}

impl Terrain {
    #[inline]
    pub const fn is_river(self) -> bool {
        matches!(self, Terrain::River)
    }

    /// Returns the player whose den this trap guards.
    #[inline]
    pub const fn trap_owner(self) -> Option<Player> {
        match self {
            Terrain::Trap(owner) => Some(owner),
            _ => None,
        }
    }

    /// Returns the player who owns this den.
    #[inline]
    pub const fn den_owner(self) -> Option<Player> {
        match self {
            Terrain::Den(owner) => Some(owner),
            _ => None,
        }
    }
}

/// The four orthogonal neighbors of a cell; `None` means off-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Neighbors {
    pub south: Option<CellId>,
    pub north: Option<CellId>,
    pub west: Option<CellId>,
    pub east: Option<CellId>,
}

impl Neighbors {
    /// Grid neighbors of `cell`, stopping at the board edges.
    pub const fn of(cell: CellId) -> Self {
        Neighbors {
            south: cell.step(Direction::South),
            north: cell.step(Direction::North),
            west: cell.step(Direction::West),
            east: cell.step(Direction::East),
        }
    }

    /// Returns the neighbor in `direction`.
    #[inline]
    pub const fn get(&self, direction: Direction) -> Option<CellId> {
        match direction {
            Direction::South => self.south,
            Direction::North => self.north,
            Direction::West => self.west,
            Direction::East => self.east,
        }
    }

    fn set(&mut self, direction: Direction, cell: Option<CellId>) {
        match direction {
            Direction::South => self.south = cell,
            Direction::North => self.north = cell,
            Direction::West => self.west = cell,
            Direction::East => self.east = cell,
        }
    }

    /// Iterates over the on-board neighbors, south/north/west/east.
    pub fn iter(&self) -> impl Iterator<Item = CellId> {
        let neighbors = *self;
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| neighbors.get(direction))
    }

    /// Returns the on-board neighbors as a set.
    pub fn cells(&self) -> CellSet {
        self.iter().collect()
    }
}

/// One row of an override table, in raw cell ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideSpec {
    pub cell: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east: Option<u8>,
}

impl OverrideSpec {
    fn entries(&self) -> impl Iterator<Item = (Direction, u8)> {
        [
            (Direction::South, self.south),
            (Direction::North, self.north),
            (Direction::West, self.west),
            (Direction::East, self.east),
        ]
        .into_iter()
        .filter_map(|(direction, target)| target.map(|t| (direction, t)))
    }
}

/// Shorthand for the canonical tables; negative means off-board.
fn row(cell: u8, south: i8, north: i8, west: i8, east: i8) -> OverrideSpec {
    let id = |v: i8| u8::try_from(v).ok();
    OverrideSpec {
        cell,
        south: id(south),
        north: id(north),
        west: id(west),
        east: id(east),
    }
}

/// Serializable description of a board.
///
/// Every field defaults to the canonical Jungle board, so a config only
/// needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSpec {
    pub south_den: u8,
    pub north_den: u8,
    pub river: Vec<u8>,
    /// Traps guarding South's den.
    pub south_traps: Vec<u8>,
    /// Traps guarding North's den.
    pub north_traps: Vec<u8>,
    pub corners: Vec<OverrideSpec>,
    pub leaps: Vec<OverrideSpec>,
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self::standard()
    }
}

impl BoardSpec {
    /// The canonical board.
    pub fn standard() -> Self {
        BoardSpec {
            south_den: 27,
            north_den: 35,
            river: vec![12, 13, 14, 21, 22, 23, 39, 40, 41, 48, 49, 50],
            south_traps: vec![18, 28, 36],
            north_traps: vec![26, 34, 44],
            corners: vec![
                row(0, -1, 1, -1, 9),
                row(8, 7, -1, -1, 17),
                row(54, -1, 55, 45, -1),
                row(62, 61, -1, 53, -1),
            ],
            leaps: vec![
                row(3, 2, 4, -1, 30),
                row(4, 3, 5, -1, 31),
                row(5, 4, 6, -1, 32),
                row(11, 10, 15, 2, 20),
                row(15, 11, 16, 6, 24),
                row(20, 19, 24, 11, 29),
                row(24, 20, 25, 15, 33),
                row(30, 29, 31, 3, 57),
                row(31, 30, 32, 4, 58),
                row(32, 31, 33, 5, 59),
                row(38, 37, 42, 29, 47),
                row(42, 38, 43, 33, 51),
                row(47, 46, 51, 38, 56),
                row(51, 47, 52, 42, 60),
                row(57, 56, 58, 30, -1),
                row(58, 57, 59, 31, -1),
                row(59, 58, 60, 32, -1),
            ],
        }
    }

    /// Checks the board description and converts it to typed cells.
    fn validate(&self) -> Result<ValidatedBoard, TopologyError> {
        let cell = |index: u8| CellId::from_index(index).ok_or(TopologyError::InvalidCellId(index));
        let cells = |indices: &[u8]| -> Result<Vec<CellId>, TopologyError> {
            indices.iter().map(|&i| cell(i)).collect()
        };

        let south_den = cell(self.south_den)?;
        let north_den = cell(self.north_den)?;
        if south_den == north_den {
            return Err(TopologyError::DenCollision(south_den));
        }

        let river = cells(self.river.as_slice())?;
        let south_traps = cells(self.south_traps.as_slice())?;
        let north_traps = cells(self.north_traps.as_slice())?;

        let mut claimed = CellSet::EMPTY;
        let terrain_cells = [south_den, north_den]
            .into_iter()
            .chain(river.iter().copied())
            .chain(south_traps.iter().copied())
            .chain(north_traps.iter().copied());
        for c in terrain_cells {
            if claimed.contains(c) {
                return Err(TopologyError::OverlappingTerrain(c));
            }
            claimed.insert(c);
        }
        let river: CellSet = river.into_iter().collect();

        let mut keys = CellSet::EMPTY;
        let mut convert = |spec: &OverrideSpec, corner: bool| -> Result<(CellId, Neighbors), TopologyError> {
            let key = cell(spec.cell)?;
            if keys.contains(key) {
                return Err(TopologyError::ContradictoryOverride(key));
            }
            keys.insert(key);
            if corner && !key.is_corner() {
                return Err(TopologyError::NotACorner(key));
            }

            let mut neighbors = Neighbors::default();
            for (direction, index) in spec.entries() {
                let target = cell(index)?;
                if key.direction_to(target) != Some(direction) {
                    return Err(TopologyError::MisalignedOverride {
                        cell: key,
                        direction,
                        target,
                    });
                }
                if !corner && river.contains(target) {
                    return Err(TopologyError::LeapIntoRiver { cell: key, target });
                }
                neighbors.set(direction, Some(target));
            }
            Ok((key, neighbors))
        };

        let corners = self
            .corners
            .iter()
            .map(|spec| convert(spec, true))
            .collect::<Result<Vec<_>, _>>()?;
        let leaps = self
            .leaps
            .iter()
            .map(|spec| convert(spec, false))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedBoard {
            south_den,
            north_den,
            river,
            south_traps: south_traps.into_iter().collect(),
            north_traps: north_traps.into_iter().collect(),
            corners,
            leaps,
        })
    }
}

struct ValidatedBoard {
    south_den: CellId,
    north_den: CellId,
    river: CellSet,
    south_traps: CellSet,
    north_traps: CellSet,
    corners: Vec<(CellId, Neighbors)>,
    leaps: Vec<(CellId, Neighbors)>,
}

/// Immutable board geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    terrain: [Terrain; CELL_COUNT],
    corners: [Option<Neighbors>; CELL_COUNT],
    leaps: [Option<Neighbors>; CELL_COUNT],
    /// Dens indexed by `Player::index()`.
    dens: [CellId; 2],
    river: CellSet,
    /// Traps indexed by the player whose den they guard.
    traps: [CellSet; 2],
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard()
    }
}

impl Topology {
    /// Builds a topology, rejecting malformed specs.
    pub fn new(spec: &BoardSpec) -> Result<Self, TopologyError> {
        let board = spec.validate()?;

        let mut terrain = [Terrain::Normal; CELL_COUNT];
        for cell in board.river {
            terrain[cell.index() as usize] = Terrain::River;
        }
        for cell in board.south_traps {
            terrain[cell.index() as usize] = Terrain::Trap(Player::South);
        }
        for cell in board.north_traps {
            terrain[cell.index() as usize] = Terrain::Trap(Player::North);
        }
        terrain[board.south_den.index() as usize] = Terrain::Den(Player::South);
        terrain[board.north_den.index() as usize] = Terrain::Den(Player::North);

        let mut corners = [None; CELL_COUNT];
        for (cell, neighbors) in board.corners {
            corners[cell.index() as usize] = Some(neighbors);
        }
        let mut leaps = [None; CELL_COUNT];
        for (cell, neighbors) in board.leaps {
            leaps[cell.index() as usize] = Some(neighbors);
        }

        Ok(Topology {
            terrain,
            corners,
            leaps,
            dens: [board.south_den, board.north_den],
            river: board.river,
            traps: [board.south_traps, board.north_traps],
        })
    }

    /// The canonical Jungle board.
    pub fn standard() -> Self {
        // BoardSpec::standard is fixed and covered by standard_spec_is_valid.
        match Self::new(&BoardSpec::standard()) {
            Ok(topology) => topology,
            Err(_) => unreachable!("canonical board validates"),
        }
    }

    /// Returns the terrain of `cell`.
    #[inline]
    pub fn terrain(&self, cell: CellId) -> Terrain {
        self.terrain[cell.index() as usize]
    }

    #[inline]
    pub fn is_river(&self, cell: CellId) -> bool {
        self.river.contains(cell)
    }

    /// Returns the player whose den the trap at `cell` guards.
    #[inline]
    pub fn trap_owner(&self, cell: CellId) -> Option<Player> {
        self.terrain(cell).trap_owner()
    }

    /// Returns the owner of the den at `cell`.
    #[inline]
    pub fn den_owner(&self, cell: CellId) -> Option<Player> {
        self.terrain(cell).den_owner()
    }

    /// Returns `player`'s own den.
    #[inline]
    pub fn den_of(&self, player: Player) -> CellId {
        self.dens[player.index()]
    }

    /// Returns every river cell.
    #[inline]
    pub fn river(&self) -> CellSet {
        self.river
    }

    /// Returns the traps guarding `player`'s den.
    #[inline]
    pub fn traps_of(&self, player: Player) -> CellSet {
        self.traps[player.index()]
    }

    /// Returns the corner override for `cell`, if any.
    #[inline]
    pub fn corner_neighbors(&self, cell: CellId) -> Option<Neighbors> {
        self.corners[cell.index() as usize]
    }

    /// Returns the river-leap override for `cell`, if any.
    #[inline]
    pub fn leap_targets(&self, cell: CellId) -> Option<Neighbors> {
        self.leaps[cell.index() as usize]
    }

    /// Returns true if either override table has an entry for `cell`.
    pub fn has_override(&self, cell: CellId) -> bool {
        self.corner_neighbors(cell).is_some() || self.leap_targets(cell).is_some()
    }

    /// Neighbors of `cell` with both override tables applied.
    ///
    /// An override entry is returned verbatim; every other cell gets its grid
    /// neighbors.
    pub fn neighbors(&self, cell: CellId) -> Neighbors {
        self.corner_neighbors(cell)
            .or_else(|| self.leap_targets(cell))
            .unwrap_or_else(|| Neighbors::of(cell))
    }

    /// Step-by-step neighbors of `cell`: corner overrides apply, leaps do not.
    pub fn adjacent(&self, cell: CellId) -> Neighbors {
        self.corner_neighbors(cell)
            .unwrap_or_else(|| Neighbors::of(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cell(index: u8) -> CellId {
        CellId::from_index(index).unwrap()
    }

    fn ids(neighbors: Neighbors) -> [Option<u8>; 4] {
        [
            neighbors.south.map(CellId::index),
            neighbors.north.map(CellId::index),
            neighbors.west.map(CellId::index),
            neighbors.east.map(CellId::index),
        ]
    }

    #[test]
    fn standard_spec_is_valid() {
        assert!(Topology::new(&BoardSpec::standard()).is_ok());
        assert_eq!(Topology::default(), Topology::standard());
    }

    #[test]
    fn terrain_classification() {
        let board = Topology::standard();
        let count = |pred: fn(Terrain) -> bool| CellId::all().filter(|c| pred(board.terrain(*c))).count();
        assert_eq!(count(|t| t.is_river()), 12);
        assert_eq!(count(|t| t.trap_owner().is_some()), 6);
        assert_eq!(count(|t| t.den_owner().is_some()), 2);
        assert_eq!(count(|t| t == Terrain::Normal), 43);

        assert_eq!(board.terrain(cell(27)), Terrain::Den(Player::South));
        assert_eq!(board.terrain(cell(35)), Terrain::Den(Player::North));
        assert_eq!(board.trap_owner(cell(28)), Some(Player::South));
        assert_eq!(board.trap_owner(cell(34)), Some(Player::North));
        assert_eq!(board.den_of(Player::North), cell(35));
        assert_eq!(board.traps_of(Player::South).to_indices(), vec![18, 28, 36]);
        assert!(board.is_river(cell(40)));
        assert!(!board.is_river(cell(30)));
    }

    #[test]
    fn arithmetic_neighbors() {
        let board = Topology::standard();
        assert_eq!(ids(board.neighbors(cell(28))), [Some(27), Some(29), Some(19), Some(37)]);
        assert_eq!(ids(board.neighbors(cell(9))), [None, Some(10), Some(0), Some(18)]);
        assert_eq!(ids(board.neighbors(cell(53))), [Some(52), None, Some(44), Some(62)]);
    }

    #[test]
    fn corner_overrides_are_verbatim() {
        let board = Topology::standard();
        assert_eq!(ids(board.neighbors(cell(0))), [None, Some(1), None, Some(9)]);
        assert_eq!(ids(board.neighbors(cell(8))), [Some(7), None, None, Some(17)]);
        assert_eq!(ids(board.neighbors(cell(54))), [None, Some(55), Some(45), None]);
        assert_eq!(ids(board.neighbors(cell(62))), [Some(61), None, Some(53), None]);
    }

    #[test]
    fn leap_overrides_jump_the_river() {
        let board = Topology::standard();
        assert_eq!(ids(board.neighbors(cell(3))), [Some(2), Some(4), None, Some(30)]);
        assert_eq!(ids(board.neighbors(cell(11))), [Some(10), Some(15), Some(2), Some(20)]);
        assert_eq!(ids(board.neighbors(cell(24))), [Some(20), Some(25), Some(15), Some(33)]);
        assert_eq!(ids(board.neighbors(cell(31))), [Some(30), Some(32), Some(4), Some(58)]);
        assert_eq!(ids(board.neighbors(cell(59))), [Some(58), Some(60), Some(32), None]);
    }

    #[test]
    fn adjacent_ignores_leaps() {
        let board = Topology::standard();
        assert_eq!(ids(board.adjacent(cell(3))), [Some(2), Some(4), None, Some(12)]);
        assert_eq!(ids(board.adjacent(cell(0))), [None, Some(1), None, Some(9)]);
    }

    #[test]
    fn leap_targets_never_touch_river() {
        let board = Topology::standard();
        for c in CellId::all() {
            if let Some(targets) = board.leap_targets(c) {
                assert!((targets.cells() & board.river()).is_empty(), "cell {}", c);
            }
        }
    }

    #[test]
    fn leap_endpoints_break_symmetry() {
        // 12 is a plain river cell whose west neighbor is 3, but 3 leaps east to 30.
        let board = Topology::standard();
        assert_eq!(board.neighbors(cell(12)).west, Some(cell(3)));
        assert_eq!(board.neighbors(cell(3)).east, Some(cell(30)));
        // Far-bank pairs stay mutual.
        assert_eq!(board.neighbors(cell(30)).west, Some(cell(3)));
    }

    #[test]
    fn every_cell_has_at_most_four_neighbors() {
        let board = Topology::standard();
        for c in CellId::all() {
            let n = board.neighbors(c);
            assert!(n.iter().count() <= 4);
            assert!(n.iter().all(|x| x.index() < CELL_COUNT as u8));
            assert_eq!(board.neighbors(c), n);
        }
    }

    proptest! {
        #[test]
        fn plain_cells_are_symmetric(index in 0u8..63) {
            let board = Topology::standard();
            let a = cell(index);
            prop_assume!(!board.has_override(a));
            for direction in Direction::ALL {
                if let Some(b) = board.neighbors(a).get(direction) {
                    if !board.has_override(b) {
                        prop_assert_eq!(board.neighbors(b).get(direction.opposite()), Some(a));
                    }
                }
            }
        }
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let spec = BoardSpec {
            river: vec![12, 99],
            ..BoardSpec::standard()
        };
        assert_eq!(Topology::new(&spec), Err(TopologyError::InvalidCellId(99)));
    }

    #[test]
    fn rejects_overlapping_terrain() {
        let spec = BoardSpec {
            south_traps: vec![18, 28, 36, 12],
            ..BoardSpec::standard()
        };
        assert_eq!(
            Topology::new(&spec),
            Err(TopologyError::OverlappingTerrain(cell(12)))
        );
    }

    #[test]
    fn rejects_shared_den() {
        let spec = BoardSpec {
            north_den: 27,
            ..BoardSpec::standard()
        };
        assert_eq!(Topology::new(&spec), Err(TopologyError::DenCollision(cell(27))));
    }

    #[test]
    fn rejects_contradictory_overrides() {
        let mut spec = BoardSpec::standard();
        spec.leaps.push(row(0, -1, 1, -1, 9));
        assert_eq!(
            Topology::new(&spec),
            Err(TopologyError::ContradictoryOverride(cell(0)))
        );
    }

    #[test]
    fn rejects_non_corner_corner() {
        let mut spec = BoardSpec::standard();
        spec.corners.push(row(1, 0, 2, -1, 10));
        assert_eq!(Topology::new(&spec), Err(TopologyError::NotACorner(cell(1))));
    }

    #[test]
    fn rejects_leap_into_river() {
        let mut spec = BoardSpec::standard();
        spec.leaps.retain(|o| o.cell != 24);
        spec.leaps.push(row(24, 23, 20, 15, 33));
        assert_eq!(
            Topology::new(&spec),
            Err(TopologyError::LeapIntoRiver {
                cell: cell(24),
                target: cell(23)
            })
        );
    }

    #[test]
    fn rejects_misaligned_override() {
        let mut spec = BoardSpec::standard();
        spec.leaps.retain(|o| o.cell != 24);
        spec.leaps.push(row(24, -1, 20, 15, 33));
        assert_eq!(
            Topology::new(&spec),
            Err(TopologyError::MisalignedOverride {
                cell: cell(24),
                direction: Direction::North,
                target: cell(20)
            })
        );
    }
}
