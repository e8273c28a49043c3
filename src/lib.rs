//! Block grid puzzle (workspace facade crate).
//!
//! The rules live in dedicated crates under `crates/` and are re-exported
//! here as `block_grid::{core, data, types}`. This package adds the pieces
//! the headless runner needs: environment/flag configuration, the stderr
//! logger and the JSONL event log.

pub use block_grid_core as core;
pub use block_grid_data as data;
pub use block_grid_types as types;

pub mod config;
pub mod event_log;
pub mod logging;
