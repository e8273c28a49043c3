//! Line clear tests

use block_grid::core::{find_full_lines, try_place, OccupancyGrid, Shape};
use block_grid::types::{Cell, Line, OwnerToken, ShapeId};

fn dot() -> Shape {
    Shape::new(ShapeId(0), [(0, 0)]).unwrap()
}

#[test]
fn test_scenario_b_single_row() {
    let mut grid = OccupancyGrid::new();
    for x in 0..7 {
        grid.occupy(Cell::new(x, 3), OwnerToken(1));
    }

    let placement = try_place(&mut grid, &dot(), Cell::new(7, 3), OwnerToken(2)).unwrap();

    assert_eq!(placement.cleared.lines().collect::<Vec<_>>(), vec![Line::Row(3)]);
    assert_eq!(placement.cleared.cells.len(), 8);
    for x in 0..8 {
        assert!(grid.is_free(Cell::new(x, 3)));
    }
    assert!(grid.is_empty());
}

#[test]
fn test_row_and_column_clear_together() {
    let mut grid = OccupancyGrid::new();
    for i in 0..8 {
        if i != 5 {
            grid.occupy(Cell::new(i, 3), OwnerToken(1));
        }
        if i != 3 {
            grid.occupy(Cell::new(5, i), OwnerToken(1));
        }
    }
    // A bystander that must survive
    grid.occupy(Cell::new(0, 0), OwnerToken(1));

    let placement = try_place(&mut grid, &dot(), Cell::new(5, 3), OwnerToken(2)).unwrap();
    let cleared = &placement.cleared;

    assert_eq!(cleared.rows.as_slice(), &[3]);
    assert_eq!(cleared.columns.as_slice(), &[5]);
    assert_eq!(cleared.line_count(), 2);

    // 8 + 8 - 1 shared cell, each listed once
    let cells: Vec<Cell> = cleared.cells().collect();
    assert_eq!(cells.len(), 15);
    assert_eq!(cells.iter().filter(|&&c| c == Cell::new(5, 3)).count(), 1);
    assert_eq!(placement.removed.len(), 15);

    for i in 0..8 {
        assert!(grid.is_free(Cell::new(i, 3)));
        assert!(grid.is_free(Cell::new(5, i)));
    }
    assert_eq!(grid.occupied_count(), 1);
    assert!(grid.is_occupied(Cell::new(0, 0)));
}

#[test]
fn test_removed_cells_keep_their_owners() {
    let mut grid = OccupancyGrid::new();
    for x in 0..7 {
        grid.occupy(Cell::new(x, 0), OwnerToken(x as u32 + 10));
    }
    let placement = try_place(&mut grid, &dot(), Cell::new(7, 0), OwnerToken(99)).unwrap();

    assert_eq!(placement.removed.len(), 8);
    assert_eq!(placement.removed[0], (Cell::new(0, 0), OwnerToken(10)));
    assert_eq!(placement.removed[7], (Cell::new(7, 0), OwnerToken(99)));
}

#[test]
fn test_multi_line_clear() {
    let mut grid = OccupancyGrid::new();
    // Rows 0 and 1 lack only column 7; column 7 lacks only rows 0 and 1
    for cell in Cell::all() {
        if (cell.y < 2 && cell.x < 7) || (cell.x == 7 && cell.y >= 2) {
            grid.occupy(cell, OwnerToken(1));
        }
    }

    let domino = Shape::new(ShapeId(0), [(0, 0), (0, 1)]).unwrap();
    let placement = try_place(&mut grid, &domino, Cell::new(7, 0), OwnerToken(2)).unwrap();

    assert_eq!(
        placement.cleared.lines().collect::<Vec<_>>(),
        vec![Line::Row(0), Line::Row(1), Line::Column(7)]
    );
    assert_eq!(placement.cleared.cells.len(), 8 * 2 + 6);
    assert!(grid.is_empty());
}

#[test]
fn test_find_full_lines_is_pure() {
    let mut grid = OccupancyGrid::new();
    for y in 0..8 {
        grid.occupy(Cell::new(2, y), OwnerToken(1));
    }
    let found = find_full_lines(grid.occupied());
    assert_eq!(found.lines().collect::<Vec<_>>(), vec![Line::Column(2)]);
    assert_eq!(grid.occupied_count(), 8);
}
