//! Read-only views handed to the render layer after every command.

use serde::Serialize;

use crate::merge::Grid;
use crate::tetris::{BoardRows, Piece, RowSet};
use crate::types::{MergeStatus, TetrisStatus};

/// Merge game view: grid (with one-move tile hints), scores, status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSnapshot {
    pub grid: Grid,
    pub score: u32,
    pub best_score: u32,
    pub status: MergeStatus,
    pub has_won: bool,
}

impl MergeSnapshot {
    pub fn playable(&self) -> bool {
        self.status == MergeStatus::Playing
    }
}

/// Falling-block game view
///
/// `clearing_rows` is non-empty between the two phases of a line clear;
/// `active` is None during that window and after game over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TetrisSnapshot {
    pub board: BoardRows,
    pub active: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: Piece,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub status: TetrisStatus,
    pub clearing_rows: RowSet,
}

impl TetrisSnapshot {
    pub fn playable(&self) -> bool {
        self.status == TetrisStatus::Playing && self.active.is_some()
    }

    /// JSON form for hosts that render outside Rust
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
