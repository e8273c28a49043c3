//! Level module - the round controller
//!
//! Owns the grid, the batch, the catalogs, the generator and the RNG, and
//! sequences one player action at a time:
//!
//! ```text
//! AwaitingBatch --generate--> HasPieces --place--> HasPieces
//!                                 |                  |
//!                                 |     batch empty: AwaitingBatch --generate--> HasPieces
//!                                 |                  |
//!                                 +---- no remaining piece fits ----> Lost --replay--> AwaitingBatch
//! ```
//!
//! A new batch is generated when the remaining-piece count reaches zero, and
//! the loss check runs after every commit and after every refill.

use std::fmt;

use crate::batch::{is_board_lost, Batch, Piece};
use crate::generator::{BatchGenerator, GenerateError, GenerationOutcome, SolvableGenerator};
use crate::grid::OccupancyGrid;
use crate::placement::{can_place, try_place, PlaceError, Placement};
use crate::preview::{preview, Preview};
use crate::rng::{RandomSource, SimpleRng};
use crate::shape::{ShapeCatalog, ThemeCatalog};
use crate::types::{Cell, OwnerToken, BATCH_SIZE, DEFAULT_MAX_TRY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundState {
    AwaitingBatch,
    HasPieces,
    Lost,
}

impl RoundState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundState::AwaitingBatch => "awaiting_batch",
            RoundState::HasPieces => "has_pieces",
            RoundState::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    /// Pieces per batch (spawn points)
    pub batch_size: usize,
    /// Retry bound for the default generator
    pub max_try: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            max_try: DEFAULT_MAX_TRY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// The action is not allowed in the current round state
    State(RoundState),
    InvalidSlot(usize),
    EmptySlot(usize),
    Place(PlaceError),
    Generate(GenerateError),
}

impl LevelError {
    pub fn code(self) -> &'static str {
        match self {
            LevelError::State(_) => "invalid_state",
            LevelError::InvalidSlot(_) => "invalid_slot",
            LevelError::EmptySlot(_) => "empty_slot",
            LevelError::Place(e) => e.code(),
            LevelError::Generate(e) => e.code(),
        }
    }
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::State(state) => {
                write!(f, "action not allowed while {}", state.as_str())
            }
            LevelError::InvalidSlot(slot) => write!(f, "no spawn slot {}", slot),
            LevelError::EmptySlot(slot) => write!(f, "spawn slot {} is empty", slot),
            LevelError::Place(e) => e.fmt(f),
            LevelError::Generate(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Place(e) => Some(e),
            LevelError::Generate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlaceError> for LevelError {
    fn from(e: PlaceError) -> Self {
        LevelError::Place(e)
    }
}

impl From<GenerateError> for LevelError {
    fn from(e: GenerateError) -> Self {
        LevelError::Generate(e)
    }
}

/// How a fresh batch came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// 1-based count of batches generated this round
    pub batch_id: u32,
    pub attempts: u32,
    pub outcome: GenerationOutcome,
}

/// Everything the presentation layer needs after a successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub slot: usize,
    pub piece: Piece,
    pub placement: Placement,
    /// Set when this commit emptied the batch; holds the generation result
    pub refill: Option<Result<BatchReport, LevelError>>,
    pub state: RoundState,
}

pub struct Level<R: RandomSource = SimpleRng> {
    grid: OccupancyGrid,
    batch: Batch,
    shapes: ShapeCatalog,
    themes: ThemeCatalog,
    generator: Box<dyn BatchGenerator>,
    rng: R,
    config: LevelConfig,
    state: RoundState,
    /// Next owner token to hand out (monotonic within a round)
    next_owner: u32,
    batches: u32,
    placements: u32,
    lines_cleared: u32,
}

impl Level<SimpleRng> {
    /// Level with default config, the bounded-retry generator and a seeded LCG
    pub fn new(shapes: ShapeCatalog, themes: ThemeCatalog, seed: u32) -> Self {
        let config = LevelConfig::default();
        Self::with_generator(
            shapes,
            themes,
            config,
            Box::new(SolvableGenerator::new(config.max_try)),
            SimpleRng::new(seed),
        )
    }
}

impl<R: RandomSource> Level<R> {
    pub fn with_generator(
        shapes: ShapeCatalog,
        themes: ThemeCatalog,
        config: LevelConfig,
        generator: Box<dyn BatchGenerator>,
        rng: R,
    ) -> Self {
        Self {
            grid: OccupancyGrid::new(),
            batch: Batch::default(),
            shapes,
            themes,
            generator,
            rng,
            config,
            state: RoundState::AwaitingBatch,
            next_owner: 0,
            batches: 0,
            placements: 0,
            lines_cleared: 0,
        }
    }

    /// Generate a batch for a level awaiting one: the first batch, or a
    /// retry after a failed refill
    pub fn start(&mut self) -> Result<BatchReport, LevelError> {
        if self.state != RoundState::AwaitingBatch {
            return Err(LevelError::State(self.state));
        }
        self.refill()
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_lost(&self) -> bool {
        self.state == RoundState::Lost
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Successful commits this round
    pub fn placements(&self) -> u32 {
        self.placements
    }

    /// Rows plus columns cleared this round
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Batches generated this round
    pub fn batches(&self) -> u32 {
        self.batches
    }

    /// Ghost projection for the piece in `slot`
    pub fn preview(&self, slot: usize, anchor: Cell) -> Result<Preview, LevelError> {
        let piece = self.piece(slot)?;
        Ok(preview(&self.grid, &piece.shape, anchor)?)
    }

    /// True iff the piece in `slot` would fit at `anchor`
    pub fn can_place(&self, slot: usize, anchor: Cell) -> bool {
        self.piece(slot)
            .map(|piece| can_place(&self.grid, &piece.shape, anchor))
            .unwrap_or(false)
    }

    /// Commit the piece in `slot` at `anchor`
    ///
    /// On error nothing changes: the grid, the batch and the state stay as
    /// they were. Once the commit succeeds it stands even if the refill that
    /// follows fails; that failure comes back in [`PlaceOutcome::refill`]
    /// with the level left in `AwaitingBatch`, and [`Level::start`] retries.
    pub fn place(&mut self, slot: usize, anchor: Cell) -> Result<PlaceOutcome, LevelError> {
        if self.state != RoundState::HasPieces {
            return Err(LevelError::State(self.state));
        }

        let owner = OwnerToken(self.next_owner);
        let placement = {
            let piece = slot_piece(&self.batch, slot)?;
            try_place(&mut self.grid, &piece.shape, anchor, owner)?
        };
        let Some(piece) = self.batch.take(slot) else {
            return Err(LevelError::EmptySlot(slot));
        };

        self.next_owner = self.next_owner.wrapping_add(1);
        self.placements += 1;
        self.lines_cleared += placement.cleared.line_count() as u32;

        let refill = if self.batch.is_exhausted() {
            self.state = RoundState::AwaitingBatch;
            let refill = self.refill();
            if let Err(e) = &refill {
                log::warn!(target: "level", "refill failed after commit: {}", e);
            }
            Some(refill)
        } else {
            self.check_loss();
            None
        };

        Ok(PlaceOutcome {
            slot,
            piece,
            placement,
            refill,
            state: self.state,
        })
    }

    /// Clear the board and start over with a fresh batch
    pub fn replay(&mut self) -> Result<BatchReport, LevelError> {
        self.grid.clear_all();
        self.batch = Batch::default();
        self.state = RoundState::AwaitingBatch;
        self.next_owner = 0;
        self.batches = 0;
        self.placements = 0;
        self.lines_cleared = 0;
        log::info!(target: "level", "replay");
        self.refill()
    }

    fn piece(&self, slot: usize) -> Result<&Piece, LevelError> {
        slot_piece(&self.batch, slot)
    }

    fn refill(&mut self) -> Result<BatchReport, LevelError> {
        let generated = self.generator.generate(
            self.config.batch_size,
            &self.shapes,
            &self.themes,
            &self.grid,
            &mut self.rng,
        )?;

        self.batches += 1;
        self.batch = generated.batch;
        self.state = RoundState::HasPieces;
        self.check_loss();

        Ok(BatchReport {
            batch_id: self.batches,
            attempts: generated.attempts,
            outcome: generated.outcome,
        })
    }

    fn check_loss(&mut self) {
        if is_board_lost(&self.grid, &self.batch) {
            log::info!(
                target: "level",
                "lost after {} placement(s), {} line(s) cleared",
                self.placements,
                self.lines_cleared
            );
            self.state = RoundState::Lost;
        }
    }
}

fn slot_piece(batch: &Batch, slot: usize) -> Result<&Piece, LevelError> {
    if slot >= batch.capacity() {
        return Err(LevelError::InvalidSlot(slot));
    }
    batch.get(slot).ok_or(LevelError::EmptySlot(slot))
}
