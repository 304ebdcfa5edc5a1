//! Cell sets backed by a single 64-bit mask.
//!
//! The board has 63 cells, so one bit per cell fits in a `u64`. Legal
//! destinations, occupancy, and terrain classes are all cell sets.

use jungle_core::{CellId, CELL_COUNT, COLUMNS, ROWS};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub};

/// A set of board cells.
///
/// Bit `n` is cell `n`. Bit 63 is never set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet(u64);

impl CellSet {
    /// No cells.
    pub const EMPTY: CellSet = CellSet(0);

    /// Every cell on the board.
    pub const ALL: CellSet = CellSet((1u64 << CELL_COUNT) - 1);

    /// Creates a set holding a single cell.
    #[inline]
    pub const fn from_cell(cell: CellId) -> Self {
        CellSet(1u64 << cell.index())
    }

    /// Returns the raw mask.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of cells in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if `cell` is in the set.
    #[inline]
    pub const fn contains(self, cell: CellId) -> bool {
        (self.0 & (1u64 << cell.index())) != 0
    }

    /// Adds a cell.
    #[inline]
    pub fn insert(&mut self, cell: CellId) {
        self.0 |= 1u64 << cell.index();
    }

    /// Removes a cell.
    #[inline]
    pub fn remove(&mut self, cell: CellId) {
        self.0 &= !(1u64 << cell.index());
    }

    /// Returns a copy without `cell`.
    #[inline]
    pub const fn without(self, cell: CellId) -> Self {
        CellSet(self.0 & !(1u64 << cell.index()))
    }

    /// Removes and returns the lowest cell.
    #[inline]
    pub fn pop_first(&mut self) -> Option<CellId> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            CellId::from_index(index)
        }
    }

    /// Iterates over the cells in id order.
    #[inline]
    pub fn iter(self) -> CellSetIter {
        CellSetIter(self)
    }

    /// Returns the cell ids as plain integers, in order.
    pub fn to_indices(self) -> Vec<u8> {
        self.iter().map(CellId::index).collect()
    }
}

impl BitAnd for CellSet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        CellSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for CellSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for CellSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        CellSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Sub for CellSet {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        CellSet(self.0 & !rhs.0)
    }
}

impl Not for CellSet {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        CellSet(!self.0 & Self::ALL.0)
    }
}

impl FromIterator<CellId> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellId>>(iter: I) -> Self {
        let mut set = CellSet::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl Extend<CellId> for CellSet {
    fn extend<I: IntoIterator<Item = CellId>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl Serialize for CellSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(CellId::index))
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellSet({:#018x})", self.0)?;
        for row in (0..ROWS).rev() {
            write!(f, "{} ", row)?;
            for column in 0..COLUMNS {
                let bit = column * ROWS + row;
                if (self.0 >> bit) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  0 1 2 3 4 5 6")
    }
}

/// Iterator over the cells of a [`CellSet`].
pub struct CellSetIter(CellSet);

impl Iterator for CellSetIter {
    type Item = CellId;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.len();
        (count, Some(count))
    }
}

impl IntoIterator for CellSet {
    type Item = CellId;
    type IntoIter = CellSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        CellSetIter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(index: u8) -> CellId {
        CellId::from_index(index).unwrap()
    }

    #[test]
    fn all_covers_board() {
        assert_eq!(CellSet::ALL.len(), CELL_COUNT);
        assert!(CellSet::ALL.contains(cell(62)));
        assert!(CellSet::EMPTY.is_empty());
        assert_eq!((!CellSet::EMPTY), CellSet::ALL);
    }

    #[test]
    fn insert_remove() {
        let mut set = CellSet::EMPTY;
        set.insert(cell(27));
        set.insert(cell(35));
        assert!(set.contains(cell(27)));
        assert_eq!(set.len(), 2);
        set.remove(cell(27));
        assert!(!set.contains(cell(27)));
        assert_eq!(set.without(cell(35)), CellSet::EMPTY);
    }

    #[test]
    fn iterates_in_order() {
        let set: CellSet = [cell(40), cell(3), cell(62)].into_iter().collect();
        assert_eq!(set.to_indices(), vec![3, 40, 62]);
        assert_eq!(set.iter().size_hint(), (3, Some(3)));
    }

    #[test]
    fn set_operations() {
        let a: CellSet = [cell(1), cell(2)].into_iter().collect();
        let b: CellSet = [cell(2), cell(3)].into_iter().collect();
        assert_eq!((a & b).to_indices(), vec![2]);
        assert_eq!((a | b).to_indices(), vec![1, 2, 3]);
        assert_eq!((a - b).to_indices(), vec![1]);
    }

    #[test]
    fn complement_stays_on_board() {
        let set = !CellSet::from_cell(cell(0));
        assert_eq!(set.len(), CELL_COUNT - 1);
        assert_eq!(set.bits() >> 63, 0);
    }
}
