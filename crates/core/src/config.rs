//! Engine configuration.
//!
//! Defaults come from the shared constants. `from_env()` overlays environment
//! variables; unset or unparsable values keep the default. Both structs also
//! deserialize from JSON with missing fields defaulted.

use std::env;
use std::str::FromStr;

use serde::Deserialize;

use crate::types::{
    BASE_GRAVITY_MS, FOUR_TILE_PROBABILITY, GRAVITY_STEP_MS, LINE_CLEAR_DELAY_MS, MIN_GRAVITY_MS,
    WIN_TILE,
};

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Merge-grid engine settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Tile value that wins the game
    pub win_value: u32,
    /// Chance that a spawned tile is a 4
    pub four_probability: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            win_value: WIN_TILE,
            four_probability: FOUR_TILE_PROBABILITY,
        }
    }
}

impl MergeConfig {
    /// Read overrides from `PUZZLE_2048_WIN_VALUE` and `PUZZLE_2048_FOUR_PROBABILITY`.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            win_value: env_or("PUZZLE_2048_WIN_VALUE", d.win_value),
            four_probability: env_or("PUZZLE_2048_FOUR_PROBABILITY", d.four_probability)
                .clamp(0.0, 1.0),
        }
    }
}

/// Board engine and gravity settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    /// Delay between scoring a clear and compacting the board
    pub line_clear_delay_ms: u32,
    /// Gravity interval at level 1
    pub base_interval_ms: u32,
    /// Interval reduction per level
    pub interval_step_ms: u32,
    /// Interval floor
    pub min_interval_ms: u32,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            line_clear_delay_ms: LINE_CLEAR_DELAY_MS,
            base_interval_ms: BASE_GRAVITY_MS,
            interval_step_ms: GRAVITY_STEP_MS,
            min_interval_ms: MIN_GRAVITY_MS,
        }
    }
}

impl TetrisConfig {
    /// Read overrides from the `PUZZLE_TETRIS_*` variables.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            line_clear_delay_ms: env_or("PUZZLE_TETRIS_CLEAR_DELAY_MS", d.line_clear_delay_ms),
            base_interval_ms: env_or("PUZZLE_TETRIS_BASE_INTERVAL_MS", d.base_interval_ms),
            interval_step_ms: env_or("PUZZLE_TETRIS_INTERVAL_STEP_MS", d.interval_step_ms),
            min_interval_ms: env_or("PUZZLE_TETRIS_MIN_INTERVAL_MS", d.min_interval_ms),
        }
    }
}
