//! Core placement logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the block placement puzzle: the occupancy
//! grid, placement validation, line clearing, ghost previews, batch
//! generation and the loss check. It has **zero dependencies** on UI,
//! input or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical batches
//! - **Testable**: Every rule is a plain function over a grid value
//! - **Portable**: The presentation layer only reads cells and owner tokens
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 occupancy grid with owner tokens
//! - [`cell_set`]: 64-bit cell mask for hypothetical boards
//! - [`shape`]: Normalized shapes and the shape/theme catalogs
//! - [`placement`]: Validation, exhaustive anchor search and commit
//! - [`line_clear`]: Simultaneous row/column clearing
//! - [`preview`]: Read-only ghost projection of a commit
//! - [`rng`]: Injected random source and a seeded LCG
//! - [`generator`]: Bounded-retry batch generation
//! - [`batch`]: Spawn-point slots and the loss detector
//! - [`level`]: Round controller tying the pieces together
//!
//! # Game Rules
//!
//! - **Placement**: A shape fits when every anchored cell is on the board and free
//! - **Line Clear**: After a commit, all full rows and columns clear at once
//! - **Batches**: Three pieces at a time, refilled when all three are used
//! - **Loss**: The round is lost when no remaining piece fits anywhere
//!
//! # Example
//!
//! ```
//! use block_grid_core::{Level, Shape, ShapeCatalog, ThemeCatalog};
//! use block_grid_core::types::{Cell, ShapeId};
//!
//! let shapes = ShapeCatalog::new(vec![
//!     Shape::new(ShapeId(0), [(0, 0)]).unwrap(),
//!     Shape::new(ShapeId(1), [(0, 0), (1, 0), (0, 1)]).unwrap(),
//! ])
//! .unwrap();
//!
//! let mut level = Level::new(shapes, ThemeCatalog::sequential(4), 12345);
//! level.start().unwrap();
//!
//! let outcome = level.place(0, Cell::new(0, 0)).unwrap();
//! assert!(!outcome.placement.occupied.is_empty());
//! assert_eq!(level.batch().remaining(), 2);
//! ```

pub mod batch;
pub mod cell_set;
pub mod generator;
pub mod grid;
pub mod level;
pub mod line_clear;
pub mod placement;
pub mod preview;
pub mod rng;
pub mod shape;

pub use block_grid_types as types;

// Re-export commonly used types for convenience
pub use batch::{is_board_lost, Batch, Piece};
pub use cell_set::CellSet;
pub use generator::{
    generate_batch, BatchGenerator, GenerateError, Generated, GenerationOutcome,
    SolvableGenerator, UniformGenerator,
};
pub use grid::OccupancyGrid;
pub use level::{BatchReport, Level, LevelConfig, LevelError, PlaceOutcome, RoundState};
pub use line_clear::{clear_full_lines, find_full_lines, LineClear};
pub use placement::{
    can_clear_line_anywhere, can_place, can_place_anywhere, check_place, placements, try_place,
    PlaceError, Placement,
};
pub use preview::{preview, Preview};
pub use rng::{RandomSource, SimpleRng};
pub use shape::{CatalogError, Shape, ShapeCatalog, ShapeError, ThemeCatalog};
