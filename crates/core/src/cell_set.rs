//! Cell set - one bit per board cell
//!
//! The whole 8x8 board fits in a `u64`, row-major (bit = y * 8 + x).
//! Hypothetical occupancy (preview, generator search) and line unions are
//! computed on these masks instead of cloning the grid.

use crate::types::{Cell, GRID_CELLS, GRID_SIZE};

const _: () = assert!(GRID_CELLS <= 64, "GRID_CELLS must be <= 64 (u64 bitmask)");

/// Bits of row 0
const ROW_MASK: u64 = (1u64 << GRID_SIZE) - 1;

/// Bits of column 0
const COLUMN_MASK: u64 = {
    let mut mask = 0u64;
    let mut y = 0;
    while y < GRID_SIZE as usize {
        mask |= 1u64 << (y * GRID_SIZE as usize);
        y += 1;
    }
    mask
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet(u64);

impl CellSet {
    pub const EMPTY: CellSet = CellSet(0);

    pub const FULL: CellSet = CellSet(if GRID_CELLS == 64 {
        u64::MAX
    } else {
        (1u64 << GRID_CELLS) - 1
    });

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & Self::FULL.0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Mask of a single row
    pub const fn row(y: u8) -> Self {
        Self(ROW_MASK << (y as usize * GRID_SIZE as usize))
    }

    /// Mask of a single column
    pub const fn column(x: u8) -> Self {
        Self(COLUMN_MASK << x)
    }

    /// Returns false for cells outside the board
    pub fn contains(self, cell: Cell) -> bool {
        cell.index().is_some_and(|i| self.0 & (1u64 << i) != 0)
    }

    /// Inserts an in-bounds cell; out-of-bounds cells are ignored and reported
    /// as `false`
    pub fn insert(&mut self, cell: Cell) -> bool {
        match cell.index() {
            Some(i) => {
                self.0 |= 1u64 << i;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, cell: Cell) {
        if let Some(i) = cell.index() {
            self.0 &= !(1u64 << i);
        }
    }

    pub const fn union(self, other: CellSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: CellSet) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: CellSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_superset(self, other: CellSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_disjoint(self, other: CellSet) -> bool {
        self.0 & other.0 == 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Cells in row-major order
    pub fn iter(self) -> CellSetIter {
        CellSetIter(self.0)
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct CellSetIter(u64);

impl Iterator for CellSetIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.0 == 0 {
            return None;
        }
        let i = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1; // clear lowest set bit
        Some(Cell::from_index(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CellSetIter {}
