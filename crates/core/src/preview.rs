//! Preview (ghost) computer
//!
//! Read-only projection of a commit: which cells the shape would take and
//! which lines would clear. Works on a hypothetical mask, never on the grid,
//! and uses the same line finder as the commit path, so a preview followed
//! by `try_place` with no mutation in between reports the same clear.

use crate::cell_set::CellSet;
use crate::grid::OccupancyGrid;
use crate::line_clear::{find_full_lines, LineClear};
use crate::placement::{check_place, PlaceError};
use crate::shape::Shape;
use crate::types::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub anchor: Cell,
    /// Ghost cells, in shape order
    pub cells: Vec<Cell>,
    /// Lines (and their cells) that would clear on commit
    pub would_clear: LineClear,
}

impl Preview {
    pub fn clears_any(&self) -> bool {
        !self.would_clear.is_empty()
    }

    /// Would-clear cells not covered by the ghost itself
    pub fn clear_highlight(&self) -> CellSet {
        let ghost: CellSet = self.cells.iter().copied().collect();
        self.would_clear.cells.difference(ghost)
    }
}

/// Project placing `shape` at `anchor` without touching `grid`
///
/// # Examples
///
/// ```
/// use block_grid_core::grid::OccupancyGrid;
/// use block_grid_core::preview::preview;
/// use block_grid_core::shape::Shape;
/// use block_grid_core::types::{Cell, OwnerToken, ShapeId};
///
/// let mut grid = OccupancyGrid::new();
/// for x in 0..7 {
///     grid.occupy(Cell::new(x, 0), OwnerToken(0));
/// }
/// let dot = Shape::new(ShapeId(0), [(0, 0)]).unwrap();
///
/// let ghost = preview(&grid, &dot, Cell::new(7, 0)).unwrap();
/// assert_eq!(ghost.would_clear.rows.as_slice(), &[0]);
/// assert_eq!(grid.occupied_count(), 7);
/// ```
pub fn preview(grid: &OccupancyGrid, shape: &Shape, anchor: Cell) -> Result<Preview, PlaceError> {
    check_place(grid, shape, anchor)?;

    let cells: Vec<Cell> = shape.cells_at(anchor).collect();
    let ghost: CellSet = cells.iter().copied().collect();
    let would_clear = find_full_lines(grid.occupied().union(ghost));

    Ok(Preview {
        anchor,
        cells,
        would_clear,
    })
}
