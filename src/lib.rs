//! Puzzle engines (workspace facade crate).
//!
//! Exposes `puzzle_engines::{core,scheduler,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use puzzle_engines_core as core;
pub use puzzle_engines_scheduler as scheduler;
pub use puzzle_engines_types as types;
