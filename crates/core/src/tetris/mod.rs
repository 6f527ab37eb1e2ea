//! Falling-block (Tetris-style) engine.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod scoring;

pub use board::{Board, BoardRows, RowSet};
pub use game_state::{PendingClear, TetrisGame};
pub use pieces::{shape_of, Piece, Shape};
