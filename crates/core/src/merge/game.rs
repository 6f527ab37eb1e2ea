//! Merge game module - the 2048 state machine
//!
//! Owns the grid, score, best score, and lifecycle. Every accepted move is
//! computed on a copy of the grid and committed in one assignment, so a
//! rejected move leaves the previous state untouched.

use rand::rngs::StdRng;
use rand::Rng;

use super::grid::Grid;
use super::tile::{Tile, TileId};
use crate::config::MergeConfig;
use crate::rng::{self, IdSequence};
use crate::snapshot::MergeSnapshot;
use crate::store::BestScoreStore;
use crate::types::{Direction, MergeStatus, GRID_SIZE, START_TILES};

/// Result of applying one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Some tile changed cell or merged (a tile was spawned)
    pub moved: bool,
    /// Sum of the values created by merges in this move
    pub score_added: u32,
    pub status: MergeStatus,
    /// New best score to persist, if this move raised it
    pub new_best: Option<u32>,
}

/// Complete merge game state
#[derive(Debug, Clone)]
pub struct MergeGame<R = StdRng> {
    grid: Grid,
    score: u32,
    best_score: u32,
    status: MergeStatus,
    /// Set once the win tile has been reached in this game
    has_won: bool,
    ids: IdSequence,
    rng: R,
    config: MergeConfig,
}

impl MergeGame<StdRng> {
    /// Seeded game with default rules
    ///
    /// `best_score` is the value read from the persisted store.
    pub fn new(seed: u64, best_score: u32) -> Self {
        Self::with_rng(rng::seeded(seed), MergeConfig::default(), best_score)
    }
}

impl<R: Rng> MergeGame<R> {
    /// Create a game and run the initial reset
    pub fn with_rng(rng: R, config: MergeConfig, best_score: u32) -> Self {
        let mut game = Self {
            grid: Grid::new(),
            score: 0,
            best_score,
            status: MergeStatus::Playing,
            has_won: false,
            ids: IdSequence::new(),
            rng,
            config,
        };
        game.reset();
        game
    }

    /// Create a game from a prepared value matrix (0 = empty)
    ///
    /// No tiles are spawned; the game starts `Playing` with score 0.
    pub fn from_values(
        values: [[u32; GRID_SIZE]; GRID_SIZE],
        rng: R,
        config: MergeConfig,
        best_score: u32,
    ) -> Self {
        let mut ids = IdSequence::new();
        let grid = Grid::from_values(values, &mut ids);
        Self {
            grid,
            score: 0,
            best_score,
            status: MergeStatus::Playing,
            has_won: false,
            ids,
            rng,
            config,
        }
    }

    /// Start a fresh game: empty grid plus two random tiles
    ///
    /// The best score survives; the id sequence keeps counting.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        for _ in 0..START_TILES {
            self.spawn_random_tile();
        }
        self.score = 0;
        self.status = MergeStatus::Playing;
        self.has_won = false;
        log::debug!("merge game reset, best score {}", self.best_score);
    }

    /// Place a 2 (or, rarely, a 4) in a uniformly chosen empty cell
    ///
    /// A full grid silently receives nothing.
    pub fn spawn_random_tile(&mut self) -> Option<TileId> {
        spawn_into(&mut self.grid, &mut self.rng, &mut self.ids, &self.config)
    }

    /// Slide every tile toward `direction`, merging equal pairs once
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        if self.status != MergeStatus::Playing {
            return self.outcome(false, 0, None);
        }

        let mut grid = self.grid.clone();
        grid.clear_flags();

        let shift = slide(&mut grid, direction, self.config.win_value, &mut self.ids);
        if !shift.moved {
            // A rejected move still confirms a dead position.
            if !self.grid.moves_available() {
                log::debug!("merge game over after rejected {}", direction.as_str());
                self.status = MergeStatus::Over;
            }
            return self.outcome(false, 0, None);
        }

        spawn_into(&mut grid, &mut self.rng, &mut self.ids, &self.config);
        self.grid = grid;
        self.score += shift.score_added;

        if shift.reached_win && !self.has_won {
            self.has_won = true;
            self.status = MergeStatus::Won;
            log::debug!("merge game won with score {}", self.score);
        } else if !self.grid.moves_available() {
            self.status = MergeStatus::Over;
            log::debug!("merge game over with score {}", self.score);
        }

        let new_best = if self.score > self.best_score {
            self.best_score = self.score;
            Some(self.best_score)
        } else {
            None
        };

        self.outcome(true, shift.score_added, new_best)
    }

    /// Pure form of [`apply`](Self::apply): the receiver is left untouched
    pub fn transition(&self, direction: Direction) -> Self
    where
        R: Clone,
    {
        let mut next = self.clone();
        next.apply(direction);
        next
    }

    /// Write the best score to `store` if it beats the stored value
    pub fn persist_best<S: BestScoreStore + ?Sized>(&self, store: &mut S) -> anyhow::Result<bool> {
        if self.best_score > store.load()? {
            store.save(self.best_score)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn outcome(&self, moved: bool, score_added: u32, new_best: Option<u32>) -> MoveOutcome {
        MoveOutcome {
            moved,
            score_added,
            status: self.status,
            new_best,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn status(&self) -> MergeStatus {
        self.status
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn snapshot(&self) -> MergeSnapshot {
        MergeSnapshot {
            grid: self.grid.clone(),
            score: self.score,
            best_score: self.best_score,
            status: self.status,
            has_won: self.has_won,
        }
    }
}

fn spawn_into<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    ids: &mut IdSequence,
    config: &MergeConfig,
) -> Option<TileId> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = rng::roll_tile_value(rng, config.four_probability);
    let id = ids.next_id();
    grid.place(Tile::spawned(id, value, row, col));
    Some(id)
}

struct Shift {
    moved: bool,
    score_added: u32,
    reached_win: bool,
}

/// Row and column visit order: tiles farthest along the vector go first
fn traversal(direction: Direction) -> ([i8; GRID_SIZE], [i8; GRID_SIZE]) {
    let (dr, dc) = direction.vector();
    let mut rows = [0, 1, 2, 3];
    let mut cols = [0, 1, 2, 3];
    if dr == 1 {
        rows.reverse();
    }
    if dc == 1 {
        cols.reverse();
    }
    (rows, cols)
}

fn slide(grid: &mut Grid, direction: Direction, win_value: u32, ids: &mut IdSequence) -> Shift {
    let (dr, dc) = direction.vector();
    let (rows, cols) = traversal(direction);
    let mut shift = Shift {
        moved: false,
        score_added: 0,
        reached_win: false,
    };

    for &row in &rows {
        for &col in &cols {
            let Some(mut tile) = grid.take(row, col) else {
                continue;
            };

            let (mut far_r, mut far_c) = (row, col);
            while grid.is_vacant(far_r + dr, far_c + dc) {
                far_r += dr;
                far_c += dc;
            }
            let (next_r, next_c) = (far_r + dr, far_c + dc);

            // A tile produced earlier in this move cannot merge again.
            let target = match grid.tile(next_r, next_c) {
                Some(t) if t.value == tile.value && !t.is_merge_result() => {
                    grid.take(next_r, next_c)
                }
                _ => None,
            };

            match target {
                Some(target) => {
                    // Sources report the merge cell so a renderer can slide them in.
                    tile.row = target.row;
                    tile.col = target.col;
                    let merged = Tile::merged(ids.next_id(), tile, target);
                    shift.score_added += merged.value;
                    shift.reached_win |= merged.value == win_value;
                    grid.place(merged);
                    shift.moved = true;
                }
                None => {
                    if (far_r, far_c) != (row, col) {
                        shift.moved = true;
                    }
                    tile.row = far_r as u8;
                    tile.col = far_c as u8;
                    grid.place(tile);
                }
            }
        }
    }

    shift
}
