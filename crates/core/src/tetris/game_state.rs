//! Game state module - the falling-block state machine
//!
//! Ties together the board, the active and lookahead pieces, scoring, and the
//! game lifecycle. The engine is timer-agnostic: gravity arrives as
//! `SoftDrop` commands and the second half of a line clear arrives as
//! `CompleteClear`, both injected by a scheduler.
//!
//! # Line clears
//!
//! Locking a piece that fills rows is a two-phase commit:
//!
//! 1. Immediately: the merged board (full rows still visible) is kept, the
//!    score, lines, and level are updated, the active piece is hidden, and a
//!    [`PendingClear`] records which rows go and after what delay.
//! 2. On `CompleteClear`: exactly those rows are removed, empty rows are
//!    prepended, and the lookahead piece is spawned (or the game ends).

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use super::board::{Board, RowSet};
use super::pieces::Piece;
use super::scoring::{gravity_interval_ms, level_for_lines, line_clear_points};
use crate::config::TetrisConfig;
use crate::rng;
use crate::snapshot::TetrisSnapshot;
use crate::types::{TetrisCommand, TetrisStatus, TetrominoKind, WALL_KICKS};

/// A scored line clear waiting for its compaction phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingClear {
    /// Engine-local token; a scheduler holding an older token is stale
    pub seq: u32,
    /// Full rows to remove, top to bottom
    pub rows: RowSet,
    /// Delay before the compaction phase
    pub delay_ms: u32,
}

/// Complete falling-block game state
#[derive(Debug, Clone)]
pub struct TetrisGame<R = StdRng> {
    board: Board,
    /// None while a clear is pending and after game over
    active: Option<Piece>,
    next: Piece,
    score: u32,
    lines: u32,
    level: u32,
    status: TetrisStatus,
    pending: Option<PendingClear>,
    clear_seq: u32,
    rng: R,
    config: TetrisConfig,
}

impl TetrisGame<StdRng> {
    /// Seeded game with default timing
    pub fn new(seed: u64) -> Self {
        Self::with_rng(rng::seeded(seed), TetrisConfig::default())
    }
}

impl<R: Rng> TetrisGame<R> {
    /// Create a game and run the initial reset
    pub fn with_rng(rng: R, config: TetrisConfig) -> Self {
        let mut game = Self {
            board: Board::new(),
            active: None,
            next: Piece::spawn(TetrominoKind::I),
            score: 0,
            lines: 0,
            level: 1,
            status: TetrisStatus::Playing,
            pending: None,
            clear_seq: 0,
            rng,
            config,
        };
        game.reset();
        game
    }

    /// Create a game from a prepared position
    ///
    /// Score and lines start at 0, level at 1, status `Playing`. The caller
    /// is responsible for `active` not overlapping the board.
    pub fn from_board(board: Board, active: Piece, next: Piece, rng: R, config: TetrisConfig) -> Self {
        Self {
            board,
            active: Some(active),
            next,
            score: 0,
            lines: 0,
            level: 1,
            status: TetrisStatus::Playing,
            pending: None,
            clear_seq: 0,
            rng,
            config,
        }
    }

    /// Empty board, zeroed counters, fresh active and lookahead pieces
    ///
    /// Any pending clear is dropped. `clear_seq` keeps counting so a timer
    /// armed before the reset can never match a later clear.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.pending = None;
        self.active = Some(self.draw_piece());
        self.next = self.draw_piece();
        self.status = TetrisStatus::Playing;
        log::debug!("tetris reset, first piece {:?}", self.active.map(|p| p.kind));
    }

    fn draw_piece(&mut self) -> Piece {
        Piece::spawn(rng::random_kind(&mut self.rng))
    }

    /// True if `piece` would leave the board or overlap a filled cell
    pub fn collision(&self, piece: &Piece) -> bool {
        self.board.collides(piece)
    }

    /// Active piece, but only while input may move it
    fn controllable(&self) -> Option<Piece> {
        if self.status != TetrisStatus::Playing {
            return None;
        }
        self.active
    }

    /// Shift the active piece one column (`dx` is -1 or +1)
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let moved = piece.translated(dx, 0);
        if self.collision(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Turn the active piece clockwise, kicking sideways if needed
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let turned = piece.rotated();
        let candidate = std::iter::once(0)
            .chain(WALL_KICKS)
            .map(|dx| turned.translated(dx, 0))
            .find(|p| !self.collision(p));

        match candidate {
            Some(p) => {
                self.active = Some(p);
                true
            }
            None => false,
        }
    }

    /// Move down one row, locking in place if that would collide
    ///
    /// This is also the gravity tick.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let lowered = piece.translated(0, 1);
        if self.collision(&lowered) {
            self.lock(piece);
        } else {
            self.active = Some(lowered);
        }
        true
    }

    /// Drop to the lowest legal row and lock
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let landed = self.drop_target(&piece);
        self.lock(landed);
        true
    }

    /// Toggle playing/paused; no effect once the game is over
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            TetrisStatus::Playing => TetrisStatus::Paused,
            TetrisStatus::Paused => TetrisStatus::Playing,
            TetrisStatus::Over => return false,
        };
        log::debug!("tetris {:?}", self.status);
        true
    }

    /// Phase 2 of a line clear: compact the board and spawn
    ///
    /// Honored while paused; a no-op when nothing is pending.
    pub fn complete_clear(&mut self) -> bool {
        if self.status == TetrisStatus::Over {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.board.remove_rows(&pending.rows);
        log::debug!("tetris cleared rows {:?}", pending.rows);
        self.spawn_next();
        true
    }

    /// Apply a command; returns true if the state changed
    pub fn apply(&mut self, command: TetrisCommand) -> bool {
        match command {
            TetrisCommand::MoveLeft => self.move_horizontal(-1),
            TetrisCommand::MoveRight => self.move_horizontal(1),
            TetrisCommand::SoftDrop => self.soft_drop(),
            TetrisCommand::Rotate => self.rotate(),
            TetrisCommand::HardDrop => self.hard_drop(),
            TetrisCommand::TogglePause => self.toggle_pause(),
            TetrisCommand::CompleteClear => self.complete_clear(),
        }
    }

    /// Pure form of [`apply`](Self::apply): the receiver is left untouched
    pub fn transition(&self, command: TetrisCommand) -> Self
    where
        R: Clone,
    {
        let mut next = self.clone();
        next.apply(command);
        next
    }

    /// Lowest legal position of `piece` straight down
    fn drop_target(&self, piece: &Piece) -> Piece {
        let mut landed = *piece;
        loop {
            let lower = landed.translated(0, 1);
            if self.collision(&lower) {
                return landed;
            }
            landed = lower;
        }
    }

    /// Lock `piece` into the board and evaluate full rows
    fn lock(&mut self, piece: Piece) {
        if self.pending.is_some() {
            log::warn!("lock requested while a clear is pending; ignoring");
            return;
        }
        self.board.merge_piece(&piece);
        self.active = None;

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_next();
            return;
        }

        let cleared = rows.len();
        self.score = self
            .score
            .saturating_add(line_clear_points(cleared, self.level));
        self.lines += cleared as u32;
        self.level = level_for_lines(self.lines);
        self.clear_seq = self.clear_seq.wrapping_add(1);
        log::debug!(
            "tetris locked {}, {} row(s) pending clear #{}",
            piece.kind.as_str(),
            cleared,
            self.clear_seq
        );
        self.pending = Some(PendingClear {
            seq: self.clear_seq,
            rows,
            delay_ms: self.config.line_clear_delay_ms,
        });
    }

    /// Promote the lookahead piece, or end the game if it cannot enter
    fn spawn_next(&mut self) {
        let candidate = self.next;
        if self.collision(&candidate) {
            self.active = None;
            self.status = TetrisStatus::Over;
            log::debug!("tetris over: {:?} blocked at spawn, score {}", candidate.kind, self.score);
            return;
        }
        self.active = Some(candidate);
        self.next = self.draw_piece();
    }

    /// Landing preview of the active piece
    ///
    /// None when there is no active piece or it is already resting.
    pub fn ghost(&self) -> Option<Piece> {
        let piece = self.active?;
        let landed = self.drop_target(&piece);
        if landed.y == piece.y {
            return None;
        }
        Some(landed)
    }

    /// Gravity interval for the current level
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level, &self.config)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> TetrisStatus {
        self.status
    }

    pub fn pending_clear(&self) -> Option<&PendingClear> {
        self.pending.as_ref()
    }

    pub fn snapshot(&self) -> TetrisSnapshot {
        TetrisSnapshot {
            board: self.board.to_rows(),
            active: self.active,
            ghost: self.ghost(),
            next: self.next,
            score: self.score,
            lines: self.lines,
            level: self.level,
            status: self.status,
            clearing_rows: self
                .pending
                .as_ref()
                .map(|p| p.rows.clone())
                .unwrap_or_else(ArrayVec::new),
        }
    }
}
