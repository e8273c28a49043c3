//! Placement validator and commit
//!
//! `check_place`/`can_place` test one anchor, `can_place_anywhere` searches
//! every anchor of the board, and `try_place` is the only way to commit a
//! shape: it re-validates, occupies, then runs the line clear engine.
//!
//! The search is brute force over all 64 anchors. Shapes are tiny and the
//! board is 8x8, so there is no index to keep up to date.

use std::fmt;

use crate::cell_set::CellSet;
use crate::grid::OccupancyGrid;
use crate::line_clear::{clear_full_lines, has_full_line, LineClear};
use crate::shape::Shape;
use crate::types::{Cell, OwnerToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    OutOfBounds { cell: Cell },
    CellOccupied { cell: Cell },
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds { .. } => "out_of_bounds",
            PlaceError::CellOccupied { .. } => "cell_occupied",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds { .. } => "shape would leave the board",
            PlaceError::CellOccupied { .. } => "shape overlaps an occupied cell",
        }
    }

    /// The first offending cell
    pub fn cell(self) -> Cell {
        match self {
            PlaceError::OutOfBounds { cell } | PlaceError::CellOccupied { cell } => cell,
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message(), self.cell())
    }
}

impl std::error::Error for PlaceError {}

/// Check every anchored cell, stopping at the first failure
pub fn check_place(grid: &OccupancyGrid, shape: &Shape, anchor: Cell) -> Result<(), PlaceError> {
    for cell in shape.cells_at(anchor) {
        if !grid.is_inside(cell) {
            return Err(PlaceError::OutOfBounds { cell });
        }
        if !grid.is_free(cell) {
            return Err(PlaceError::CellOccupied { cell });
        }
    }
    Ok(())
}

#[inline]
pub fn can_place(grid: &OccupancyGrid, shape: &Shape, anchor: Cell) -> bool {
    check_place(grid, shape, anchor).is_ok()
}

/// Every legal anchor for `shape`, row-major
pub fn placements<'a>(
    grid: &'a OccupancyGrid,
    shape: &'a Shape,
) -> impl Iterator<Item = Cell> + 'a {
    Cell::all().filter(move |&anchor| can_place(grid, shape, anchor))
}

/// Exhaustive search: true iff some anchor on the board accepts `shape`
pub fn can_place_anywhere(grid: &OccupancyGrid, shape: &Shape) -> bool {
    placements(grid, shape).next().is_some()
}

/// True iff some legal anchor for `shape` would complete a row or column
///
/// Same exhaustive search as [`can_place_anywhere`], simulating the line
/// clear on a hypothetical mask at each legal anchor.
pub fn can_clear_line_anywhere(grid: &OccupancyGrid, shape: &Shape) -> bool {
    let occupied = grid.occupied();
    Cell::all().any(|anchor| match shape.mask_at(anchor) {
        Some(mask) if occupied.is_disjoint(mask) => has_full_line(occupied.union(mask)),
        _ => false,
    })
}

/// A committed placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub owner: OwnerToken,
    pub anchor: Cell,
    /// Cells the shape occupied, in shape order
    pub occupied: Vec<Cell>,
    /// Lines completed by this placement (possibly none)
    pub cleared: LineClear,
    /// Owner of every cleared cell before it was freed, row-major
    pub removed: Vec<(Cell, OwnerToken)>,
}

impl Placement {
    pub fn cleared_any(&self) -> bool {
        !self.cleared.is_empty()
    }

    /// Occupied cells as a mask
    pub fn occupied_mask(&self) -> CellSet {
        self.occupied.iter().copied().collect()
    }
}

/// Validate, occupy, then clear full lines
///
/// Never trusts an earlier preview: the shape is re-checked against the
/// current grid and nothing changes on error.
pub fn try_place(
    grid: &mut OccupancyGrid,
    shape: &Shape,
    anchor: Cell,
    owner: OwnerToken,
) -> Result<Placement, PlaceError> {
    check_place(grid, shape, anchor)?;

    let occupied: Vec<Cell> = shape.cells_at(anchor).collect();
    for &cell in &occupied {
        grid.occupy(cell, owner);
    }

    let (cleared, removed) = clear_full_lines(grid);

    Ok(Placement {
        owner,
        anchor,
        occupied,
        cleared,
        removed,
    })
}
