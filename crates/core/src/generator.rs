//! Batch generator - bounded retry over random draws
//!
//! Each attempt draws `count` shapes uniformly with replacement and `count`
//! distinct themes without replacement, then tests the draw against the
//! current board:
//!
//! - every shape fits somewhere on its own, and
//! - at least one shape can complete a row or column somewhere.
//!
//! The first draw that passes is returned. When none passes within
//! `max_try` attempts the last draw is returned anyway and flagged as
//! [`GenerationOutcome::Exhausted`]; play goes on with a batch that may be
//! unplayable.
//!
//! Each shape is tested independently against the board as it is now, not
//! against the board after the other pieces of the batch are committed.

use std::fmt;

use crate::batch::{Batch, Piece};
use crate::grid::OccupancyGrid;
use crate::placement::{can_clear_line_anywhere, can_place_anywhere};
use crate::rng::{choose, choose_distinct, RandomSource};
use crate::shape::{ShapeCatalog, ThemeCatalog};
use crate::types::DEFAULT_MAX_TRY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    EmptyShapeCatalog,
    InsufficientThemePool { requested: usize, available: usize },
}

impl GenerateError {
    pub fn code(self) -> &'static str {
        match self {
            GenerateError::EmptyShapeCatalog => "empty_shape_catalog",
            GenerateError::InsufficientThemePool { .. } => "insufficient_theme_pool",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GenerateError::EmptyShapeCatalog => "shape catalog is empty",
            GenerateError::InsufficientThemePool { .. } => {
                "theme catalog is smaller than the batch size"
            }
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::EmptyShapeCatalog => f.write_str(self.message()),
            GenerateError::InsufficientThemePool {
                requested,
                available,
            } => write!(
                f,
                "{} (requested {}, available {})",
                self.message(),
                requested,
                available
            ),
        }
    }
}

impl std::error::Error for GenerateError {}

/// How the returned batch relates to the acceptance test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Passed the acceptance test
    Accepted,
    /// No attempt passed; this is the last draw
    Exhausted,
    /// Drawn without any acceptance test
    Unchecked,
}

impl GenerationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationOutcome::Accepted => "accepted",
            GenerationOutcome::Exhausted => "exhausted",
            GenerationOutcome::Unchecked => "unchecked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub batch: Batch,
    /// Draws made, including the returned one
    pub attempts: u32,
    pub outcome: GenerationOutcome,
}

/// A strategy for filling the spawn points
pub trait BatchGenerator {
    fn name(&self) -> &'static str;

    fn generate(
        &self,
        count: usize,
        shapes: &ShapeCatalog,
        themes: &ThemeCatalog,
        grid: &OccupancyGrid,
        rng: &mut dyn RandomSource,
    ) -> Result<Generated, GenerateError>;
}

/// Single draw, no acceptance test
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformGenerator;

impl BatchGenerator for UniformGenerator {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn generate(
        &self,
        count: usize,
        shapes: &ShapeCatalog,
        themes: &ThemeCatalog,
        _grid: &OccupancyGrid,
        rng: &mut dyn RandomSource,
    ) -> Result<Generated, GenerateError> {
        check_pools(count, shapes, themes)?;
        Ok(Generated {
            batch: Batch::new(draw(count, shapes, themes, rng)),
            attempts: 1,
            outcome: GenerationOutcome::Unchecked,
        })
    }
}

/// Bounded retry until a draw passes the acceptance test
#[derive(Debug, Clone, Copy)]
pub struct SolvableGenerator {
    /// Attempt bound; 0 is treated as 1 so a batch is always drawn
    pub max_try: u32,
}

impl SolvableGenerator {
    pub fn new(max_try: u32) -> Self {
        Self { max_try }
    }
}

impl Default for SolvableGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRY)
    }
}

impl BatchGenerator for SolvableGenerator {
    fn name(&self) -> &'static str {
        "solvable"
    }

    fn generate(
        &self,
        count: usize,
        shapes: &ShapeCatalog,
        themes: &ThemeCatalog,
        grid: &OccupancyGrid,
        rng: &mut dyn RandomSource,
    ) -> Result<Generated, GenerateError> {
        check_pools(count, shapes, themes)?;

        let max_try = self.max_try.max(1);
        let mut attempts = 0u32;
        loop {
            let pieces = draw(count, shapes, themes, rng);
            attempts += 1;

            if accepts(grid, &pieces) {
                log::debug!(
                    target: "generator",
                    "accepted batch after {} attempt(s)",
                    attempts
                );
                return Ok(Generated {
                    batch: Batch::new(pieces),
                    attempts,
                    outcome: GenerationOutcome::Accepted,
                });
            }

            if attempts >= max_try {
                log::warn!(
                    target: "generator",
                    "no batch passed acceptance in {} attempt(s); keeping last draw",
                    attempts
                );
                return Ok(Generated {
                    batch: Batch::new(pieces),
                    attempts,
                    outcome: GenerationOutcome::Exhausted,
                });
            }
        }
    }
}

/// Generate with the bounded-retry strategy
pub fn generate_batch(
    count: usize,
    shapes: &ShapeCatalog,
    themes: &ThemeCatalog,
    grid: &OccupancyGrid,
    rng: &mut dyn RandomSource,
    max_try: u32,
) -> Result<Generated, GenerateError> {
    SolvableGenerator::new(max_try).generate(count, shapes, themes, grid, rng)
}

/// Acceptance test: every piece fits, and at least one can clear a line
pub fn accepts(grid: &OccupancyGrid, pieces: &[Piece]) -> bool {
    let mut has_clear = false;
    for piece in pieces {
        if !can_place_anywhere(grid, &piece.shape) {
            return false;
        }
        if !has_clear && can_clear_line_anywhere(grid, &piece.shape) {
            has_clear = true;
        }
    }
    has_clear
}

fn check_pools(
    count: usize,
    shapes: &ShapeCatalog,
    themes: &ThemeCatalog,
) -> Result<(), GenerateError> {
    if shapes.is_empty() {
        return Err(GenerateError::EmptyShapeCatalog);
    }
    if themes.len() < count {
        return Err(GenerateError::InsufficientThemePool {
            requested: count,
            available: themes.len(),
        });
    }
    Ok(())
}

/// Shapes with replacement, then distinct themes. Pools are pre-checked.
fn draw(
    count: usize,
    shapes: &ShapeCatalog,
    themes: &ThemeCatalog,
    rng: &mut dyn RandomSource,
) -> Vec<Piece> {
    let picked: Vec<_> = (0..count)
        .filter_map(|_| choose(rng, shapes.shapes()).cloned())
        .collect();
    let theme_ids = choose_distinct(rng, themes.themes(), count).unwrap_or_default();

    picked
        .into_iter()
        .zip(theme_ids)
        .map(|(shape, theme)| Piece { shape, theme })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::shape::Shape;
    use crate::types::{Cell, OwnerToken, ShapeId};

    fn catalog(shapes: &[&[(i32, i32)]]) -> ShapeCatalog {
        ShapeCatalog::new(
            shapes
                .iter()
                .enumerate()
                .map(|(i, cells)| Shape::new(ShapeId(i as u32), cells.iter().copied()).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_pool_errors_checked_before_drawing() {
        let mut rng = SimpleRng::new(1);
        let grid = OccupancyGrid::new();

        let themes = ThemeCatalog::sequential(5);
        let err = generate_batch(3, &ShapeCatalog::default(), &themes, &grid, &mut rng, 10)
            .unwrap_err();
        assert_eq!(err, GenerateError::EmptyShapeCatalog);

        let shapes = catalog(&[&[(0, 0)]]);
        let err = UniformGenerator
            .generate(3, &shapes, &ThemeCatalog::sequential(2), &grid, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::InsufficientThemePool {
                requested: 3,
                available: 2
            }
        );
        assert_eq!(err.code(), "insufficient_theme_pool");
    }

    #[test]
    fn test_uniform_draws_distinct_themes() {
        let mut rng = SimpleRng::new(5);
        let shapes = catalog(&[&[(0, 0)], &[(0, 0), (1, 0)]]);
        let themes = ThemeCatalog::sequential(3);

        for _ in 0..50 {
            let generated = UniformGenerator
                .generate(3, &shapes, &themes, &OccupancyGrid::new(), &mut rng)
                .unwrap();
            assert_eq!(generated.outcome, GenerationOutcome::Unchecked);
            let mut ids: Vec<_> = generated.batch.pieces().map(|(_, p)| p.theme).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 3);
        }
    }

    #[test]
    fn test_empty_board_has_no_clearing_piece() {
        // Nothing short of an 8-long bar clears a line on an empty board
        let mut rng = SimpleRng::new(2);
        let shapes = catalog(&[&[(0, 0)], &[(0, 0), (1, 0), (2, 0)]]);
        let generated = generate_batch(
            3,
            &shapes,
            &ThemeCatalog::sequential(3),
            &OccupancyGrid::new(),
            &mut rng,
            7,
        )
        .unwrap();
        assert_eq!(generated.outcome, GenerationOutcome::Exhausted);
        assert_eq!(generated.attempts, 7);
        assert_eq!(generated.batch.remaining(), 3);
    }

    #[test]
    fn test_accepts_when_a_line_is_one_short() {
        let mut grid = OccupancyGrid::new();
        for x in 1..8 {
            grid.occupy(Cell::new(x, 0), OwnerToken(1));
        }
        let mut rng = SimpleRng::new(3);
        let shapes = catalog(&[&[(0, 0)]]);
        let generated =
            generate_batch(3, &shapes, &ThemeCatalog::sequential(4), &grid, &mut rng, 100).unwrap();
        assert_eq!(generated.outcome, GenerationOutcome::Accepted);
        assert_eq!(generated.attempts, 1);
    }

    #[test]
    fn test_zero_max_try_still_draws_once() {
        let mut rng = SimpleRng::new(4);
        let shapes = catalog(&[&[(0, 0)]]);
        let generated = generate_batch(
            2,
            &shapes,
            &ThemeCatalog::sequential(2),
            &OccupancyGrid::new(),
            &mut rng,
            0,
        )
        .unwrap();
        assert_eq!(generated.attempts, 1);
        assert_eq!(generated.batch.remaining(), 2);
    }
}
