//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the placement engine, the catalog loaders and any presentation layer.
//!
//! # Board Dimensions
//!
//! The board is a square grid:
//!
//! - **Size**: 8 columns by 8 rows (indexed 0-7 on both axes)
//! - **Cells**: 64 in total, small enough to fit a `u64` occupancy mask
//!
//! # Batch Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BATCH_SIZE` | 3 | Pieces offered to the player at once |
//! | `DEFAULT_MAX_TRY` | 100 | Generator retry bound |
//!
//! # Examples
//!
//! ```
//! use block_grid_types::{Cell, Line, GRID_SIZE};
//!
//! let anchor = Cell::new(2, 3);
//! let placed = anchor + Cell::new(1, 0);
//! assert_eq!(placed, Cell::new(3, 3));
//! assert!(placed.is_inside());
//! assert!(!Cell::new(GRID_SIZE as i32, 0).is_inside());
//!
//! assert_eq!(Line::Row(3).as_str(), "row");
//! ```

use std::fmt;
use std::ops::Add;

/// Board edge length in cells (8)
pub const GRID_SIZE: u8 = 8;

/// Total number of cells on the board (64)
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Number of pieces in a batch (one per spawn point)
pub const BATCH_SIZE: usize = 3;

/// Default retry bound for the solvable batch generator
pub const DEFAULT_MAX_TRY: u32 = 100;

/// An integer board coordinate.
///
/// Used both for absolute board positions and for shape offsets relative to
/// an anchor. `x` grows to the right, `y` grows row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True iff `0 <= x < GRID_SIZE` and `0 <= y < GRID_SIZE`
    #[inline(always)]
    pub fn is_inside(self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE as i32 && self.y >= 0 && self.y < GRID_SIZE as i32
    }

    /// Row-major flat index, `None` when outside the board
    #[inline(always)]
    pub fn index(self) -> Option<usize> {
        if !self.is_inside() {
            return None;
        }
        Some((self.y as usize) * (GRID_SIZE as usize) + (self.x as usize))
    }

    /// Inverse of [`Cell::index`]
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_types::Cell;
    ///
    /// assert_eq!(Cell::from_index(0), Cell::new(0, 0));
    /// assert_eq!(Cell::from_index(9), Cell::new(1, 1));
    /// assert_eq!(Cell::from_index(63), Cell::new(7, 7));
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Self {
        let size = GRID_SIZE as usize;
        Self {
            x: (index % size) as i32,
            y: (index / size) as i32,
        }
    }

    /// Iterate every board cell in row-major order
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_CELLS).map(Cell::from_index)
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Opaque theme label.
///
/// Correlated to a visual asset by the catalog loader; the placement engine
/// only compares ids for distinctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThemeId(pub u32);

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "theme#{}", self.0)
    }
}

/// Identifier of a catalog shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Token stored in every occupied cell.
///
/// The round controller hands out one token per committed placement, so the
/// presentation layer can find the physical bricks a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerToken(pub u32);

/// A full row or column of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    Row(u8),
    Column(u8),
}

impl Line {
    /// Lowercase kind name ("row" / "column")
    pub fn as_str(&self) -> &'static str {
        match self {
            Line::Row(_) => "row",
            Line::Column(_) => "column",
        }
    }

    /// Row or column index
    pub fn index(&self) -> u8 {
        match *self {
            Line::Row(i) | Line::Column(i) => i,
        }
    }

    /// Every cell on this line
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE as i32).map(move |i| match self {
            Line::Row(y) => Cell::new(i, y as i32),
            Line::Column(x) => Cell::new(x as i32, i),
        })
    }
}

/// A cell of the board
///
/// - `None`: Free
/// - `Some(OwnerToken)`: Occupied by the placement that owns the token
///
/// Keeping the token inside the option makes "occupied" and "has an owner"
/// the same fact.
pub type Slot = Option<OwnerToken>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_constants() {
        assert_eq!(GRID_SIZE, 8);
        assert_eq!(GRID_CELLS, 64);
        assert_eq!(BATCH_SIZE, 3);
        assert_eq!(DEFAULT_MAX_TRY, 100);
    }

    #[test]
    fn cell_index_roundtrip_covers_board() {
        for (i, cell) in Cell::all().enumerate() {
            assert_eq!(cell.index(), Some(i));
        }
        assert_eq!(Cell::new(-1, 0).index(), None);
        assert_eq!(Cell::new(0, 8).index(), None);
    }

    #[test]
    fn cell_add_saturates() {
        let far = Cell::new(i32::MAX, 0) + Cell::new(1, 0);
        assert_eq!(far.x, i32::MAX);
        assert!(!far.is_inside());
    }

    #[test]
    fn line_cells() {
        let row: Vec<Cell> = Line::Row(3).cells().collect();
        assert_eq!(row.len(), 8);
        assert!(row.iter().all(|c| c.y == 3));

        let col: Vec<Cell> = Line::Column(5).cells().collect();
        assert!(col.iter().all(|c| c.x == 5));
        assert_eq!(col[7], Cell::new(5, 7));
    }
}
