//! Line clear engine
//!
//! After a commit, every full row and every full column is found against the
//! same snapshot of the board, and the union of their cells is cleared in one
//! step. A row and a column that are both full share their intersection cell;
//! it is cleared once and both lines are reported.

use arrayvec::ArrayVec;

use crate::cell_set::CellSet;
use crate::grid::OccupancyGrid;
use crate::types::{Cell, Line, OwnerToken, GRID_SIZE};

/// Full lines of a board state and the union of their cells
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Full row indices, ascending
    pub rows: ArrayVec<u8, { GRID_SIZE as usize }>,
    /// Full column indices, ascending
    pub columns: ArrayVec<u8, { GRID_SIZE as usize }>,
    /// Union of every cell on a full row or column
    pub cells: CellSet,
}

impl LineClear {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    /// Number of rows plus columns
    pub fn line_count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    /// Rows first, then columns
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.rows
            .iter()
            .map(|&y| Line::Row(y))
            .chain(self.columns.iter().map(|&x| Line::Column(x)))
    }

    /// Cleared cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        self.cells.iter()
    }
}

/// Find every full row and column of `occupied`
///
/// Pure; used for real clears, previews and the generator's search alike, so
/// they cannot disagree.
pub fn find_full_lines(occupied: CellSet) -> LineClear {
    let mut clear = LineClear::default();

    for y in 0..GRID_SIZE {
        let row = CellSet::row(y);
        if occupied.is_superset(row) {
            clear.rows.push(y);
            clear.cells = clear.cells.union(row);
        }
    }

    for x in 0..GRID_SIZE {
        let column = CellSet::column(x);
        if occupied.is_superset(column) {
            clear.columns.push(x);
            clear.cells = clear.cells.union(column);
        }
    }

    clear
}

/// True iff `occupied` has at least one full row or column
#[inline]
pub fn has_full_line(occupied: CellSet) -> bool {
    (0..GRID_SIZE).any(|i| {
        occupied.is_superset(CellSet::row(i)) || occupied.is_superset(CellSet::column(i))
    })
}

/// Clear all full lines of `grid`
///
/// Lines are detected on the pre-clear snapshot, then the union is removed.
/// Returns the detected lines and the owner of every removed cell, row-major.
pub fn clear_full_lines(grid: &mut OccupancyGrid) -> (LineClear, Vec<(Cell, OwnerToken)>) {
    let clear = find_full_lines(grid.occupied());
    if clear.is_empty() {
        return (clear, Vec::new());
    }

    let removed = clear
        .cells()
        .filter_map(|cell| grid.owner(cell).map(|owner| (cell, owner)))
        .collect();
    grid.clear_cells(clear.cells);

    (clear, removed)
}
