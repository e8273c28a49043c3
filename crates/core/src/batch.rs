//! Batch of available pieces and the loss detector
//!
//! A batch has one slot per spawn point. Committing a piece empties its slot
//! and leaves the others where they are; the batch is replaced only when
//! every slot is empty.

use crate::grid::OccupancyGrid;
use crate::placement::can_place_anywhere;
use crate::shape::Shape;
use crate::types::ThemeId;

/// A shape paired with the theme it is drawn with
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub theme: ThemeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch {
    slots: Vec<Option<Piece>>,
}

impl Batch {
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self {
            slots: pieces.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots, filled or not
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Pieces still held by the player
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True once every slot has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, slot: usize) -> Option<&Piece> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Remove the piece in `slot`
    pub fn take(&mut self, slot: usize) -> Option<Piece> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn slots(&self) -> &[Option<Piece>] {
        &self.slots
    }

    /// Remaining pieces with their slot index
    pub fn pieces(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }
}

/// True iff the batch still holds pieces and none of them fits anywhere
///
/// An exhausted batch is never lost: loss is judged only on pieces the
/// player still holds.
pub fn is_board_lost(grid: &OccupancyGrid, batch: &Batch) -> bool {
    if batch.is_exhausted() {
        return false;
    }
    batch
        .pieces()
        .all(|(_, piece)| !can_place_anywhere(grid, &piece.shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, OwnerToken, ShapeId};

    fn piece(id: u32, cells: &[(i32, i32)], theme: u32) -> Piece {
        Piece {
            shape: Shape::new(ShapeId(id), cells.iter().copied()).unwrap(),
            theme: ThemeId(theme),
        }
    }

    #[test]
    fn test_take_keeps_slot_positions() {
        let mut batch = Batch::new(vec![
            piece(0, &[(0, 0)], 0),
            piece(1, &[(0, 0), (1, 0)], 1),
            piece(2, &[(0, 0), (0, 1)], 2),
        ]);
        assert_eq!(batch.remaining(), 3);

        let taken = batch.take(1).unwrap();
        assert_eq!(taken.theme, ThemeId(1));
        assert_eq!(batch.remaining(), 2);
        assert_eq!(batch.capacity(), 3);
        assert!(batch.get(1).is_none());
        assert_eq!(batch.get(2).map(|p| p.theme), Some(ThemeId(2)));

        assert!(batch.take(1).is_none());
        assert!(batch.take(5).is_none());

        batch.take(0);
        batch.take(2);
        assert!(batch.is_exhausted());
    }

    #[test]
    fn test_exhausted_batch_is_never_lost() {
        let mut grid = OccupancyGrid::new();
        for cell in Cell::all() {
            grid.occupy(cell, OwnerToken(1));
        }
        assert!(!is_board_lost(&grid, &Batch::default()));

        let mut batch = Batch::new(vec![piece(0, &[(0, 0)], 0)]);
        assert!(is_board_lost(&grid, &batch));
        batch.take(0);
        assert!(!is_board_lost(&grid, &batch));
    }

    #[test]
    fn test_one_placeable_piece_prevents_loss() {
        let mut grid = OccupancyGrid::new();
        for cell in Cell::all() {
            grid.occupy(cell, OwnerToken(1));
        }
        grid.clear_cell(Cell::new(3, 3));

        let batch = Batch::new(vec![
            piece(0, &[(0, 0), (1, 0)], 0),
            piece(1, &[(0, 0)], 1),
        ]);
        assert!(!is_board_lost(&grid, &batch));

        let big_only = Batch::new(vec![piece(0, &[(0, 0), (1, 0)], 0)]);
        assert!(is_board_lost(&grid, &big_only));
    }
}
