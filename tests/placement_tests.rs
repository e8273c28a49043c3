//! Placement validator and commit tests

use block_grid::core::{
    can_place, can_place_anywhere, check_place, placements, try_place, OccupancyGrid, PlaceError,
    RandomSource, Shape, SimpleRng,
};
use block_grid::data::default_shapes;
use block_grid::types::{Cell, OwnerToken, ShapeId};

fn random_grid(rng: &mut SimpleRng, density: u32) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new();
    for cell in Cell::all() {
        if rng.next_range(100) < density {
            grid.occupy(cell, OwnerToken(0));
        }
    }
    grid
}

fn brute_force_anywhere(grid: &OccupancyGrid, shape: &Shape) -> bool {
    // Wider than the board on purpose: no anchor outside it may ever fit
    for y in -8..16 {
        for x in -8..16 {
            let anchor = Cell::new(x, y);
            let fits = shape.cells().iter().all(|&offset| grid.is_free(anchor + offset));
            if fits {
                return true;
            }
        }
    }
    false
}

#[test]
fn test_scenario_a_l_shape_on_empty_grid() {
    let mut grid = OccupancyGrid::new();
    let l_shape = Shape::new(ShapeId(1), [(0, 0), (1, 0), (0, 1)]).unwrap();

    let placement = try_place(&mut grid, &l_shape, Cell::new(0, 0), OwnerToken(1)).unwrap();

    assert_eq!(placement.occupied.len(), 3);
    assert!(!placement.cleared_any());
    assert!(placement.removed.is_empty());
    assert_eq!(grid.occupied_count(), 3);
    for cell in [Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)] {
        assert_eq!(grid.owner(cell), Some(OwnerToken(1)));
    }
}

#[test]
fn test_can_place_anywhere_matches_brute_force() {
    let shapes = default_shapes().unwrap();
    let mut rng = SimpleRng::new(2024);

    for density in [0, 30, 60, 80, 95, 100] {
        for _ in 0..20 {
            let grid = random_grid(&mut rng, density);
            for shape in shapes.shapes() {
                assert_eq!(
                    can_place_anywhere(&grid, shape),
                    brute_force_anywhere(&grid, shape),
                    "shape {} on\n{}",
                    shape.id(),
                    grid
                );
                assert_eq!(
                    can_place_anywhere(&grid, shape),
                    placements(&grid, shape).next().is_some()
                );
            }
        }
    }
}

#[test]
fn test_placements_are_exactly_the_legal_anchors() {
    let mut rng = SimpleRng::new(77);
    let grid = random_grid(&mut rng, 40);
    let corner = Shape::new(ShapeId(3), [(0, 0), (1, 0), (1, 1)]).unwrap();

    let listed: Vec<Cell> = placements(&grid, &corner).collect();
    let expected: Vec<Cell> = Cell::all().filter(|&a| can_place(&grid, &corner, a)).collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_try_place_succeeds_iff_can_place() {
    let shapes = default_shapes().unwrap();
    let mut rng = SimpleRng::new(31337);

    for _ in 0..200 {
        let grid = random_grid(&mut rng, 45);
        let shape = &shapes.shapes()[rng.next_range(shapes.len() as u32) as usize];
        let anchor = Cell::new(
            rng.next_range(10) as i32 - 1,
            rng.next_range(10) as i32 - 1,
        );

        let allowed = can_place(&grid, shape, anchor);
        let mut after = grid.clone();
        let result = try_place(&mut after, shape, anchor, OwnerToken(7));

        assert_eq!(result.is_ok(), allowed, "shape {} at {}", shape.id(), anchor);
        if !allowed {
            assert_eq!(after, grid, "failed placement must not mutate");
        }
    }
}

#[test]
fn test_only_shape_cells_and_cleared_lines_change() {
    let shapes = default_shapes().unwrap();
    let mut rng = SimpleRng::new(5);

    let mut checked = 0;
    while checked < 100 {
        let grid = random_grid(&mut rng, 70);
        let shape = &shapes.shapes()[rng.next_range(shapes.len() as u32) as usize];
        let Some(anchor) = placements(&grid, shape).next() else {
            continue;
        };

        let mut after = grid.clone();
        let placement = try_place(&mut after, shape, anchor, OwnerToken(7)).unwrap();
        let shape_cells = placement.occupied_mask();

        for cell in Cell::all() {
            if placement.cleared.cells.contains(cell) {
                assert!(after.is_free(cell), "{} was on a cleared line", cell);
            } else if shape_cells.contains(cell) {
                assert_eq!(after.owner(cell), Some(OwnerToken(7)));
            } else {
                assert_eq!(after.get(cell), grid.get(cell), "{} changed", cell);
            }
        }
        checked += 1;
    }
}

#[test]
fn test_place_errors_name_the_cell() {
    let mut grid = OccupancyGrid::new();
    grid.occupy(Cell::new(2, 2), OwnerToken(1));
    let bar = Shape::new(ShapeId(0), [(0, 0), (1, 0), (2, 0)]).unwrap();

    let err = check_place(&grid, &bar, Cell::new(0, 2)).unwrap_err();
    assert_eq!(err, PlaceError::CellOccupied { cell: Cell::new(2, 2) });
    assert_eq!(err.code(), "cell_occupied");

    let err = try_place(&mut grid, &bar, Cell::new(6, 0), OwnerToken(2)).unwrap_err();
    assert_eq!(err.code(), "out_of_bounds");
    assert_eq!(err.cell(), Cell::new(8, 0));
    assert_eq!(grid.occupied_count(), 1);
}
