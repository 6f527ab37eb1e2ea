//! Scheduler crate - virtual-clock timers for the board engine
//!
//! The engines never read a clock. This crate owns the two timers the board
//! engine needs (periodic gravity and the one-shot line-clear delay) on a
//! timeline the caller advances explicitly, and a [`TetrisSession`] that
//! keeps those timers consistent with the game lifecycle.
//!
//! ```
//! use puzzle_engines_scheduler::TetrisSession;
//! use puzzle_engines_types::TetrisCommand;
//!
//! let mut session = TetrisSession::new(7);
//! session.command(TetrisCommand::MoveRight);
//! assert_eq!(session.advance(2500), 2);
//! ```

pub mod session;
pub mod timer;

pub use session::TetrisSession;
pub use timer::{IntervalProvider, LevelCurve, TickScheduler, TimerEvent};
