//! Grid module - the occupancy map
//!
//! The grid is an 8x8 board where each cell is either free or occupied by a
//! placement's owner token. Uses a flat array for cache locality and
//! zero-allocation. Coordinates: (x, y) where both range 0..7, row-major.
//!
//! The grid does not validate placements. Callers consult
//! [`crate::placement::can_place`] before occupying cells.

use std::fmt;

use crate::cell_set::CellSet;
use crate::types::{Cell, OwnerToken, Slot, GRID_CELLS, GRID_SIZE};

/// The occupancy grid - 8 x 8 slots in flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Flat array of slots, row-major order (y * SIZE + x)
    slots: [Slot; GRID_CELLS],
    /// Mirror of `slots` as a bitmask, kept in sync by every mutation
    occupied: CellSet,
}

impl OccupancyGrid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            slots: [None; GRID_CELLS],
            occupied: CellSet::EMPTY,
        }
    }

    /// Edge length of the grid
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// True iff the cell lies on the board
    #[inline(always)]
    pub fn is_inside(&self, cell: Cell) -> bool {
        cell.is_inside()
    }

    /// True iff the cell lies on the board and is not occupied
    #[inline(always)]
    pub fn is_free(&self, cell: Cell) -> bool {
        matches!(self.get(cell), Some(None))
    }

    /// True iff the cell lies on the board and is occupied
    #[inline(always)]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        matches!(self.get(cell), Some(Some(_)))
    }

    /// Get the slot at `cell`
    /// Returns None if out of bounds
    pub fn get(&self, cell: Cell) -> Option<Slot> {
        cell.index().map(|idx| self.slots[idx])
    }

    /// Owner of an occupied cell
    pub fn owner(&self, cell: Cell) -> Option<OwnerToken> {
        self.get(cell).flatten()
    }

    /// Mark `cell` occupied by `owner`
    ///
    /// Does not check whether the cell was already occupied; that is the
    /// validator's job. Returns false (and changes nothing) if out of bounds.
    pub fn occupy(&mut self, cell: Cell, owner: OwnerToken) -> bool {
        match cell.index() {
            Some(idx) => {
                self.slots[idx] = Some(owner);
                self.occupied.insert(cell);
                true
            }
            None => false,
        }
    }

    /// Free `cell` and drop its owner token
    /// Returns the previous owner, None if the cell was free or out of bounds
    pub fn clear_cell(&mut self, cell: Cell) -> Option<OwnerToken> {
        let idx = cell.index()?;
        let prev = self.slots[idx].take();
        self.occupied.remove(cell);
        prev
    }

    /// Free every cell in `cells`
    pub(crate) fn clear_cells(&mut self, cells: CellSet) {
        for cell in cells {
            self.clear_cell(cell);
        }
    }

    /// Reset every cell to free (level reset)
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.occupied = CellSet::EMPTY;
    }

    /// Bitmask of occupied cells
    #[inline(always)]
    pub fn occupied(&self) -> CellSet {
        self.occupied
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Get a reference to the internal slot array
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Build a grid from an ASCII picture, `#` occupied and `.` free, row 0
    /// first. Occupied cells get `owner`.
    ///
    /// Returns None if the picture is not 8 rows of 8 cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_core::grid::OccupancyGrid;
    /// use block_grid_core::types::{Cell, OwnerToken};
    ///
    /// let grid = OccupancyGrid::from_ascii(
    ///     "#.......
    ///      ........
    ///      ........
    ///      ........
    ///      ........
    ///      ........
    ///      ........
    ///      .......#",
    ///     OwnerToken(0),
    /// )
    /// .unwrap();
    /// assert!(grid.is_occupied(Cell::new(0, 0)));
    /// assert!(grid.is_occupied(Cell::new(7, 7)));
    /// assert_eq!(grid.occupied_count(), 2);
    /// ```
    pub fn from_ascii(picture: &str, owner: OwnerToken) -> Option<Self> {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != GRID_SIZE as usize {
            return None;
        }

        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != GRID_SIZE as usize {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' => {
                        grid.occupy(Cell::new(x as i32, y as i32), owner);
                    }
                    '.' => {}
                    _ => return None,
                }
            }
        }
        Some(grid)
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = GRID_SIZE as usize;
        for (y, row) in self.slots.chunks(size).enumerate() {
            for slot in row {
                f.write_str(if slot.is_some() { "#" } else { "." })?;
            }
            if y + 1 < size {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
