//! Loss detector tests

use block_grid::core::{
    can_place_anywhere, is_board_lost, Batch, OccupancyGrid, Piece, RandomSource, SimpleRng,
};
use block_grid::data::default_shapes;
use block_grid::types::{Cell, OwnerToken, ThemeId};

#[test]
fn test_lost_iff_no_piece_fits() {
    let shapes = default_shapes().unwrap();
    let mut rng = SimpleRng::new(808);
    let mut lost_seen = 0;

    for _ in 0..300 {
        let mut grid = OccupancyGrid::new();
        for cell in Cell::all() {
            if rng.next_range(100) < 85 {
                grid.occupy(cell, OwnerToken(0));
            }
        }

        let pieces: Vec<Piece> = (0..3)
            .map(|i| Piece {
                shape: shapes.shapes()[rng.next_range(shapes.len() as u32) as usize].clone(),
                theme: ThemeId(i),
            })
            .collect();
        let expected = pieces.iter().all(|p| !can_place_anywhere(&grid, &p.shape));

        let batch = Batch::new(pieces);
        assert_eq!(is_board_lost(&grid, &batch), expected, "\n{}", grid);
        if expected {
            lost_seen += 1;
        }
    }
    assert!(lost_seen > 0, "dense boards should lose sometimes");
}

#[test]
fn test_consumed_pieces_do_not_count() {
    let shapes = default_shapes().unwrap();
    let dot = shapes.shapes()[0].clone();
    let big = shapes.shapes()[10].clone();

    let mut grid = OccupancyGrid::new();
    for cell in Cell::all() {
        grid.occupy(cell, OwnerToken(0));
    }
    grid.clear_cell(Cell::new(4, 4));

    let mut batch = Batch::new(vec![
        Piece { shape: dot, theme: ThemeId(0) },
        Piece { shape: big, theme: ThemeId(1) },
    ]);
    assert!(!is_board_lost(&grid, &batch));

    // Once the dot is used, only the square is left and it cannot fit
    batch.take(0);
    assert!(is_board_lost(&grid, &batch));

    batch.take(1);
    assert!(!is_board_lost(&grid, &batch), "an empty batch is never lost");
}
