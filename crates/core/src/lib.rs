//! Core engine module - pure, deterministic, and testable
//!
//! Two self-contained puzzle engines. Each owns its whole state, accepts
//! discrete commands, and hands out read-only snapshots. Neither touches a
//! clock, a terminal, or storage on its own.
//!
//! - **Merge-grid engine** ([`merge`]): 4x4 sliding-tile game (2048)
//! - **Board engine** ([`tetris`]): 10x20 falling-block game
//!
//! # Module Structure
//!
//! - [`rng`]: seeded random source, spawn rolls, engine-local ids
//! - [`merge`]: tiles, grid, and the merge state machine
//! - [`tetris`]: board, pieces, scoring, and the block state machine
//! - [`snapshot`]: render-facing views of both engines
//! - [`config`]: tunables with env and JSON overrides
//! - [`store`]: best-score persistence contract
//!
//! # Example
//!
//! ```
//! use puzzle_engines_core::{MergeGame, TetrisGame};
//! use puzzle_engines_types::{Direction, TetrisCommand, TetrisStatus};
//!
//! let mut merge = MergeGame::new(42, 0);
//! let outcome = merge.apply(Direction::Left);
//! assert!(merge.score() >= outcome.score_added);
//!
//! let mut tetris = TetrisGame::new(42);
//! tetris.apply(TetrisCommand::MoveLeft);
//! tetris.apply(TetrisCommand::HardDrop);
//! assert_eq!(tetris.status(), TetrisStatus::Playing);
//! ```
//!
//! # Timing
//!
//! The board engine has no clock. Gravity is a `SoftDrop` command and the
//! second phase of a line clear is a `CompleteClear` command; the
//! `puzzle-engines-scheduler` crate delivers both on a virtual timeline.

pub mod config;
pub mod merge;
pub mod rng;
pub mod snapshot;
pub mod store;
pub mod tetris;

pub use puzzle_engines_types as types;

// Re-export commonly used types for convenience
pub use config::{MergeConfig, TetrisConfig};
pub use merge::{Grid, MergeGame, MoveOutcome, Tile};
pub use snapshot::{MergeSnapshot, TetrisSnapshot};
pub use store::{BestScoreStore, JsonFileStore, MemoryStore};
pub use tetris::{Board, PendingClear, Piece, TetrisGame};
