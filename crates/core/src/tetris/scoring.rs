//! Scoring module - line clear points, level curve, and gravity speed
//!
//! Classic rules: a clear of `k` rows is worth `[0, 100, 300, 500, 800][k]`
//! times the current level, the level rises every ten lines starting from 1,
//! and gravity speeds up 100ms per level down to a 100ms floor.

use crate::config::TetrisConfig;
use crate::types::{LINES_PER_LEVEL, LINE_CLEAR_POINTS};

/// Points for clearing `rows` rows at `level` (the level before the clear)
///
/// More than four rows scores as four.
pub fn line_clear_points(rows: usize, level: u32) -> u32 {
    let base = LINE_CLEAR_POINTS[rows.min(LINE_CLEAR_POINTS.len() - 1)];
    base.saturating_mul(level)
}

/// Level for a total line count: `floor(lines / 10) + 1`
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level: `max(min, base - (level - 1) * step)`
pub fn gravity_interval_ms(level: u32, config: &TetrisConfig) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(config.interval_step_ms);
    config
        .base_interval_ms
        .saturating_sub(speedup)
        .max(config.min_interval_ms)
        .max(1)
}
