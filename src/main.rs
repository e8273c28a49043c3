//! Headless block grid runner (default binary).
//!
//! Plays rounds with a greedy bot and reports how the generator held up.
//! There is no interactive UI; this drives the same `Level` API a
//! presentation layer would, and is mainly useful for soak testing
//! generation against real boards.

use anyhow::{Context, Result};

use block_grid::config::{GameConfig, DEFAULT_THEME_COUNT};
use block_grid::core::{
    placements, BatchReport, Level, LevelConfig, RoundState, ShapeCatalog, SimpleRng,
    SolvableGenerator, ThemeCatalog,
};
use block_grid::data::{default_shapes, load_shapes, load_themes, shapes_to_json};
use block_grid::event_log::{Event, EventLog};
use block_grid::logging;
use block_grid::types::Cell;

fn main() -> Result<()> {
    let mut config = GameConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args)?;

    logging::init(config.log_level)?;

    let shapes = load_shape_catalog(&config)?;
    if config.export_shapes {
        println!("{}", shapes_to_json(&shapes)?);
        return Ok(());
    }
    let themes = load_theme_catalog(&config)?;

    run(&config, shapes, themes)
}

fn load_shape_catalog(config: &GameConfig) -> Result<ShapeCatalog> {
    match config.shapes_path.as_deref() {
        Some(path) => load_shapes(path),
        None => default_shapes(),
    }
}

fn load_theme_catalog(config: &GameConfig) -> Result<ThemeCatalog> {
    match config.themes_path.as_deref() {
        Some(path) => Ok(load_themes(path)?.catalog().clone()),
        None => Ok(ThemeCatalog::sequential(DEFAULT_THEME_COUNT)),
    }
}

fn run(config: &GameConfig, shapes: ShapeCatalog, themes: ThemeCatalog) -> Result<()> {
    let level_config = LevelConfig {
        max_try: config.max_try,
        ..LevelConfig::default()
    };
    let mut level = Level::with_generator(
        shapes,
        themes,
        level_config,
        Box::new(SolvableGenerator::new(config.max_try)),
        SimpleRng::new(config.seed),
    );
    let mut events = match config.log_path.as_deref() {
        Some(path) => EventLog::open(Some(path)),
        None => EventLog::disabled(),
    };

    let mut total_placements = 0u32;
    let mut total_lines = 0u32;
    let mut rounds_lost = 0u32;

    for round in 1..=config.rounds.max(1) {
        let report = if round == 1 {
            level.start().context("starting first round")?
        } else {
            events.record(&Event::Replay {
                seed: config.seed,
                round,
            });
            level.replay().context("replaying round")?
        };
        record_batch(&mut events, config.seed, round, &report, &level);

        play_round(config, round, &mut level, &mut events)?;

        if level.is_lost() {
            rounds_lost += 1;
            events.record(&Event::Lost {
                seed: config.seed,
                round,
                placements: level.placements(),
                lines_cleared: level.lines_cleared(),
            });
        }

        println!(
            "[Runner] round {}: {} placement(s), {} line(s), {} batch(es), {}",
            round,
            level.placements(),
            level.lines_cleared(),
            level.batches(),
            level.state().as_str()
        );
        total_placements += level.placements();
        total_lines += level.lines_cleared();
    }

    events.flush();

    println!("{}", level.grid());
    println!(
        "[Runner] seed {} generator {}: {} round(s), {} lost, {} placement(s), {} line(s)",
        config.seed,
        level.generator_name(),
        config.rounds.max(1),
        rounds_lost,
        total_placements,
        total_lines
    );
    Ok(())
}

fn play_round(
    config: &GameConfig,
    round: u32,
    level: &mut Level,
    events: &mut EventLog,
) -> Result<()> {
    while level.state() == RoundState::HasPieces && level.placements() < config.max_placements {
        let Some((slot, anchor)) = choose_move(level) else {
            break;
        };

        let outcome = level.place(slot, anchor)?;
        events.record(&Event::Place {
            seed: config.seed,
            round,
            placement: level.placements(),
            slot,
            shape: outcome.piece.shape.id().0,
            x: anchor.x,
            y: anchor.y,
            lines_cleared: outcome.placement.cleared.line_count(),
        });

        if let Some(refill) = outcome.refill {
            let report = refill.context("refilling batch")?;
            record_batch(events, config.seed, round, &report, level);
        }
    }
    Ok(())
}

/// Greedy pick: most lines cleared, then most contact with walls and blocks
fn choose_move(level: &Level) -> Option<(usize, Cell)> {
    let grid = level.grid();
    let mut best: Option<(usize, Cell)> = None;
    let mut best_score = 0usize;

    for (slot, piece) in level.batch().pieces() {
        for anchor in placements(grid, &piece.shape) {
            let Ok(ghost) = level.preview(slot, anchor) else {
                continue;
            };

            let contact: usize = ghost
                .cells
                .iter()
                .map(|&cell| {
                    [(1, 0), (-1, 0), (0, 1), (0, -1)]
                        .into_iter()
                        .map(|d| cell + Cell::from(d))
                        .filter(|&n| !grid.is_free(n))
                        .count()
                })
                .sum();
            let score = ghost.would_clear.line_count() * 64 + contact;

            if best.is_none() || score > best_score {
                best = Some((slot, anchor));
                best_score = score;
            }
        }
    }

    best
}

fn record_batch(events: &mut EventLog, seed: u32, round: u32, report: &BatchReport, level: &Level) {
    events.record(&Event::Batch {
        seed,
        round,
        batch_id: report.batch_id,
        attempts: report.attempts,
        outcome: report.outcome.as_str(),
        shapes: level
            .batch()
            .pieces()
            .map(|(_, p)| p.shape.id().0)
            .collect(),
        themes: level.batch().pieces().map(|(_, p)| p.theme.0).collect(),
    });
}
