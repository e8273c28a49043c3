//! Runner configuration
//!
//! Values come from `BLOCK_GRID_*` environment variables first, then
//! command-line flags override them. Unset or unparsable environment
//! values fall back to the defaults; bad flags are an error.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::types::DEFAULT_MAX_TRY;

/// Theme count used when no theme file is given
pub const DEFAULT_THEME_COUNT: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub max_try: u32,
    pub shapes_path: Option<String>,
    pub themes_path: Option<String>,
    pub rounds: u32,
    /// Per-round cap so a lucky seed cannot run forever
    pub max_placements: u32,
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    /// Print the shape table as JSON instead of playing
    pub export_shapes: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_try: DEFAULT_MAX_TRY,
            shapes_path: None,
            themes_path: None,
            rounds: 1,
            max_placements: 500,
            log_path: None,
            log_level: LevelFilter::Info,
            export_shapes: false,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            seed: parsed(&lookup, "BLOCK_GRID_SEED").unwrap_or(defaults.seed),
            max_try: parsed(&lookup, "BLOCK_GRID_MAX_TRY").unwrap_or(defaults.max_try),
            shapes_path: non_empty(lookup("BLOCK_GRID_SHAPES_PATH")),
            themes_path: non_empty(lookup("BLOCK_GRID_THEMES_PATH")),
            rounds: parsed(&lookup, "BLOCK_GRID_ROUNDS").unwrap_or(defaults.rounds),
            max_placements: parsed(&lookup, "BLOCK_GRID_MAX_PLACEMENTS")
                .unwrap_or(defaults.max_placements),
            log_path: non_empty(lookup("BLOCK_GRID_LOG_PATH")),
            log_level: parsed(&lookup, "BLOCK_GRID_LOG_LEVEL").unwrap_or(defaults.log_level),
            export_shapes: false,
        }
    }

    /// Apply command-line flags on top of this config
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => self.seed = flag_value(args, &mut i)?,
                "--max-try" => self.max_try = flag_value(args, &mut i)?,
                "--rounds" => self.rounds = flag_value(args, &mut i)?,
                "--max-placements" => self.max_placements = flag_value(args, &mut i)?,
                "--log-level" => self.log_level = flag_value(args, &mut i)?,
                "--shapes" => self.shapes_path = Some(flag_value(args, &mut i)?),
                "--themes" => self.themes_path = Some(flag_value(args, &mut i)?),
                "--log-path" => self.log_path = Some(flag_value(args, &mut i)?),
                "--export-shapes" => self.export_shapes = true,
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(())
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

/// Parse the value following the flag at `args[*i]`, advancing `i` past it
fn flag_value<T: FromStr>(args: &[String], i: &mut usize) -> Result<T> {
    let flag = &args[*i];
    *i += 1;
    let v = args
        .get(*i)
        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}
