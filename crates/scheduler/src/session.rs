//! Session module - a board engine driven by its scheduler
//!
//! [`TetrisSession`] keeps the timers in step with the engine after every
//! command and every delivered event:
//!
//! - gravity runs only while `Playing`, re-armed on resume and level change
//! - a pending clear is scheduled exactly once, under its own token
//! - game over or reset disarms everything

use rand::rngs::StdRng;
use rand::Rng;

use puzzle_engines_core::rng;
use puzzle_engines_core::{TetrisConfig, TetrisGame, TetrisSnapshot};
use puzzle_engines_types::{TetrisCommand, TetrisStatus};

use crate::timer::{IntervalProvider, LevelCurve, TickScheduler, TimerEvent};

#[derive(Debug, Clone)]
pub struct TetrisSession<R = StdRng, P = LevelCurve> {
    game: TetrisGame<R>,
    scheduler: TickScheduler<P>,
}

impl TetrisSession<StdRng, LevelCurve> {
    /// Seeded session with default timing
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, TetrisConfig::default())
    }

    pub fn with_config(seed: u64, config: TetrisConfig) -> Self {
        let game = TetrisGame::with_rng(rng::seeded(seed), config);
        Self::from_parts(game, TickScheduler::new(LevelCurve::new(config)))
    }
}

impl<R: Rng, P: IntervalProvider> TetrisSession<R, P> {
    /// Wrap an existing game; the scheduler is reset and re-armed from it
    pub fn from_parts(game: TetrisGame<R>, mut scheduler: TickScheduler<P>) -> Self {
        scheduler.reset();
        let mut session = Self { game, scheduler };
        session.sync(TetrisStatus::Paused);
        session
    }

    /// Apply a player command; returns true if the engine state changed
    pub fn command(&mut self, command: TetrisCommand) -> bool {
        let status = self.game.status();
        let changed = self.game.apply(command);
        if !changed && command.targets_piece() {
            log::trace!("{} ignored while {:?}", command.as_str(), status);
        }
        self.sync(status);
        changed
    }

    /// Fresh game with every timer cancelled and gravity re-armed
    pub fn reset(&mut self) {
        self.scheduler.reset();
        self.game.reset();
        self.scheduler.start(self.game.level());
    }

    /// Let `elapsed_ms` of virtual time pass, delivering due events in order
    ///
    /// Returns the number of events that reached the engine.
    pub fn advance(&mut self, elapsed_ms: u32) -> usize {
        let mut budget = elapsed_ms;
        let mut delivered = 0;
        while let Some((spent, event)) = self.scheduler.poll(budget) {
            budget -= spent;
            if self.deliver(event) {
                delivered += 1;
            }
        }
        delivered
    }

    fn deliver(&mut self, event: TimerEvent) -> bool {
        let status = self.game.status();
        let accepted = match event {
            TimerEvent::Gravity => {
                self.game.apply(TetrisCommand::SoftDrop);
                true
            }
            TimerEvent::ClearDue { seq } => {
                if self.game.pending_clear().map(|p| p.seq) == Some(seq) {
                    self.game.apply(TetrisCommand::CompleteClear);
                    true
                } else {
                    log::debug!("discarding stale clear #{}", seq);
                    false
                }
            }
        };
        self.sync(status);
        accepted
    }

    /// Bring the timers in line with the engine after a state change
    fn sync(&mut self, prev_status: TetrisStatus) {
        match self.game.status() {
            TetrisStatus::Over => {
                if self.scheduler.next_deadline_ms().is_some() {
                    log::debug!("game over, timers disarmed");
                }
                self.scheduler.reset();
                return;
            }
            TetrisStatus::Paused => self.scheduler.stop(),
            TetrisStatus::Playing => {
                let level = self.game.level();
                if prev_status != TetrisStatus::Playing
                    || self.scheduler.armed_level() != Some(level)
                {
                    self.scheduler.start(level);
                }
            }
        }

        match self.game.pending_clear() {
            Some(pending) if self.scheduler.clear_seq() != Some(pending.seq) => {
                self.scheduler.schedule_clear(pending.seq, pending.delay_ms);
            }
            Some(_) => {}
            None => self.scheduler.cancel_clear(),
        }
    }

    pub fn game(&self) -> &TetrisGame<R> {
        &self.game
    }

    pub fn scheduler(&self) -> &TickScheduler<P> {
        &self.scheduler
    }

    pub fn snapshot(&self) -> TetrisSnapshot {
        self.game.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_engines_core::tetris::{Board, Piece};
    use rand::rngs::mock::StepRng;
    use puzzle_engines_types::{Color, TetrominoKind};

    fn near_clear() -> TetrisSession {
        let mut board = Board::new();
        for x in 0..9 {
            board.set(x, 19, Some(Color::Red));
        }
        let active = Piece::at(TetrominoKind::I, 9, 10).rotated();
        let next = Piece::spawn(TetrominoKind::O);
        let config = TetrisConfig::default();
        let game = TetrisGame::from_board(board, active, next, rng::seeded(3), config);
        TetrisSession::from_parts(game, TickScheduler::new(LevelCurve::new(config)))
    }

    #[test]
    fn test_new_session_runs_gravity() {
        let session = TetrisSession::new(1);
        assert!(session.scheduler().is_running());
        assert_eq!(session.scheduler().interval_ms(), Some(1000));
    }

    #[test]
    fn test_gravity_moves_piece_down() {
        let mut session = TetrisSession::new(1);
        let y = session.game().active().map(|p| p.y);
        assert_eq!(session.advance(1000), 1);
        assert_eq!(session.game().active().map(|p| p.y), y.map(|y| y + 1));
    }

    #[test]
    fn test_pause_stops_gravity() {
        let mut session = TetrisSession::new(1);
        session.command(TetrisCommand::TogglePause);
        assert!(!session.scheduler().is_running());
        assert_eq!(session.advance(5000), 0);

        session.command(TetrisCommand::TogglePause);
        assert!(session.scheduler().is_running());
        assert_eq!(session.scheduler().next_deadline_ms(), Some(1000));
    }

    #[test]
    fn test_clear_scheduled_once_and_completed() {
        let mut session = near_clear();
        session.command(TetrisCommand::HardDrop);
        let seq = session.game().pending_clear().map(|p| p.seq);
        assert!(seq.is_some());
        assert_eq!(session.scheduler().clear_seq(), seq);

        // Player input during the delay does not re-arm the clear
        session.command(TetrisCommand::MoveLeft);
        assert_eq!(session.scheduler().next_deadline_ms(), Some(300));

        session.advance(300);
        assert!(session.game().pending_clear().is_none());
        assert_eq!(session.scheduler().clear_seq(), None);
        assert_eq!(session.game().board().filled_count(), 3);
        assert_eq!(session.game().active().map(|p| p.kind), Some(TetrominoKind::O));
    }

    #[test]
    fn test_clear_completes_while_paused() {
        let mut session = near_clear();
        session.command(TetrisCommand::HardDrop);
        session.command(TetrisCommand::TogglePause);
        assert_eq!(session.advance(300), 1);
        assert!(session.game().pending_clear().is_none());
        assert_eq!(session.game().status(), TetrisStatus::Paused);
    }

    #[test]
    fn test_reset_cancels_pending_clear() {
        let mut session = near_clear();
        session.command(TetrisCommand::HardDrop);
        session.reset();
        assert_eq!(session.scheduler().clear_seq(), None);
        assert!(session.game().pending_clear().is_none());
        assert_eq!(session.game().score(), 0);
        assert!(session.scheduler().is_running());
    }

    #[test]
    fn test_level_up_rearms_gravity_at_new_speed() {
        // A zero-output generator deals nothing but I pieces.
        let mut board = Board::new();
        for y in 8..20 {
            for x in 0..9 {
                board.set(x, y, Some(Color::Red));
            }
        }
        let active = Piece::at(TetrominoKind::I, 9, 0).rotated();
        let game = TetrisGame::from_board(
            board,
            active,
            Piece::spawn(TetrominoKind::I),
            StepRng::new(0, 0),
            TetrisConfig::default(),
        );
        let mut session = TetrisSession::from_parts(game, TickScheduler::default());

        for _ in 0..2 {
            session.command(TetrisCommand::HardDrop);
            assert_eq!(session.scheduler().armed_level(), Some(1));
            session.advance(300);

            // Stand the fresh I upright and walk it into the gap
            assert!(session.command(TetrisCommand::Rotate));
            for _ in 0..6 {
                assert!(session.command(TetrisCommand::MoveRight));
            }
        }
        assert_eq!(session.game().lines(), 8);

        session.command(TetrisCommand::HardDrop);
        assert_eq!(session.game().lines(), 12);
        assert_eq!(session.game().level(), 2);
        assert_eq!(session.scheduler().armed_level(), Some(2));
        assert_eq!(session.scheduler().interval_ms(), Some(900));

        // The clear is still due first; gravity restarted at the commit
        assert_eq!(session.scheduler().next_deadline_ms(), Some(300));
        assert_eq!(session.advance(300), 1);
        assert_eq!(session.scheduler().next_deadline_ms(), Some(600));
    }
}
