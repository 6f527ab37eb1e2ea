//! Merge-grid (2048) engine.

pub mod game;
pub mod grid;
pub mod tile;

pub use game::{MergeGame, MoveOutcome};
pub use grid::Grid;
pub use tile::{Tile, TileId};
