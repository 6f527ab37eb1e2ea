//! Shared types module - data structures and constants for both engines
//!
//! Everything here is plain data: dimensions, timing constants, the scoring
//! table, and the command/status enums that cross the engine boundary. The
//! render/input layer only ever sees these types plus engine snapshots.
//!
//! # Dimensions
//!
//! - **Merge grid**: 4x4, indexed `(row, col)` with row 0 at the top
//! - **Board**: 10 columns x 20 rows, indexed `(x, y)` with y 0 at the top
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `GRAVITY_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_GRAVITY_MS` | 100 | Fastest gravity interval |
//! | `LINE_CLEAR_DELAY_MS` | 300 | Delay between the two line-clear phases |
//!
//! # Examples
//!
//! ```
//! use puzzle_engines_types::{Direction, TetrisCommand, TetrominoKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Direction::from_str("Left"), Some(Direction::Left));
//! assert_eq!(TetrisCommand::from_str("hardDrop"), Some(TetrisCommand::HardDrop));
//! assert_eq!(TetrominoKind::from_str("t"), Some(TetrominoKind::T));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Merge grid side length (4x4)
pub const GRID_SIZE: usize = 4;

/// Number of cells in the merge grid
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Tile value that wins the merge game
pub const WIN_TILE: u32 = 2048;

/// Probability that a spawned tile is a 4 instead of a 2
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// Number of tiles placed by a reset
pub const START_TILES: usize = 2;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 1
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Gravity speed-up per level
pub const GRAVITY_STEP_MS: u32 = 100;

/// Gravity interval floor
pub const MIN_GRAVITY_MS: u32 = 100;

/// Delay between phase 1 (score) and phase 2 (compaction) of a line clear
pub const LINE_CLEAR_DELAY_MS: u32 = 300;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear points, indexed by rows cleared (multiplied by level)
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Wall kick column offsets tried in order when a rotation collides
pub const WALL_KICKS: [i8; 4] = [-1, 1, -2, 2];


/// Slide direction for the merge grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector as `(d_row, d_col)`
    pub fn vector(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// ```
    /// use puzzle_engines_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("RIGHT"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Merge game lifecycle
///
/// `Won` and `Over` are terminal until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStatus {
    Playing,
    Won,
    Over,
}

/// Falling-block game lifecycle
///
/// `Paused` and `Playing` toggle freely; `Over` is terminal until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TetrisStatus {
    Playing,
    Paused,
    Over,
}

/// Commands accepted by the board engine
///
/// These are produced by human input, by the gravity timer (`SoftDrop`) and
/// by the clear timer (`CompleteClear`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TetrisCommand {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Drop one row, locking on collision (also the gravity tick)
    SoftDrop,
    /// Rotate 90° clockwise with simple wall kicks
    Rotate,
    /// Drop to the lowest legal row and lock
    HardDrop,
    /// Toggle between playing and paused
    TogglePause,
    /// Finish a pending line clear (delivered by the clear timer)
    CompleteClear,
}

impl TetrisCommand {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use puzzle_engines_types::TetrisCommand;
    ///
    /// assert_eq!(TetrisCommand::from_str("moveLeft"), Some(TetrisCommand::MoveLeft));
    /// assert_eq!(TetrisCommand::from_str("togglepause"), Some(TetrisCommand::TogglePause));
    /// assert_eq!(TetrisCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(TetrisCommand::MoveLeft),
            "moveright" => Some(TetrisCommand::MoveRight),
            "softdrop" => Some(TetrisCommand::SoftDrop),
            "rotate" => Some(TetrisCommand::Rotate),
            "harddrop" => Some(TetrisCommand::HardDrop),
            "togglepause" => Some(TetrisCommand::TogglePause),
            "completeclear" => Some(TetrisCommand::CompleteClear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TetrisCommand::MoveLeft => "moveLeft",
            TetrisCommand::MoveRight => "moveRight",
            TetrisCommand::SoftDrop => "softDrop",
            TetrisCommand::Rotate => "rotate",
            TetrisCommand::HardDrop => "hardDrop",
            TetrisCommand::TogglePause => "togglePause",
            TetrisCommand::CompleteClear => "completeClear",
        }
    }

    /// Commands that move or lock the active piece
    pub fn targets_piece(&self) -> bool {
        matches!(
            self,
            TetrisCommand::MoveLeft
                | TetrisCommand::MoveRight
                | TetrisCommand::SoftDrop
                | TetrisCommand::Rotate
                | TetrisCommand::HardDrop
        )
    }
}

/// Color tag carried by a piece and by the board cells it locks into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// The seven tetromino kinds
///
/// - **I**: cyan bar
/// - **O**: yellow square
/// - **T**: purple tee
/// - **S**: green, S-shaped
/// - **Z**: red, mirror of S
/// - **J**: blue, J-shaped
/// - **L**: orange, mirror of J
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];

    pub fn color(&self) -> Color {
        match self {
            TetrominoKind::I => Color::Cyan,
            TetrominoKind::O => Color::Yellow,
            TetrominoKind::T => Color::Purple,
            TetrominoKind::S => Color::Green,
            TetrominoKind::Z => Color::Red,
            TetrominoKind::J => Color::Blue,
            TetrominoKind::L => Color::Orange,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use puzzle_engines_types::TetrominoKind;
    ///
    /// assert_eq!(TetrominoKind::from_str("L"), Some(TetrominoKind::L));
    /// assert_eq!(TetrominoKind::from_str("z"), Some(TetrominoKind::Z));
    /// assert_eq!(TetrominoKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoKind::I),
            "o" => Some(TetrominoKind::O),
            "t" => Some(TetrominoKind::T),
            "s" => Some(TetrominoKind::S),
            "z" => Some(TetrominoKind::Z),
            "j" => Some(TetrominoKind::J),
            "l" => Some(TetrominoKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoKind::I => "i",
            TetrominoKind::O => "o",
            TetrominoKind::T => "t",
            TetrominoKind::S => "s",
            TetrominoKind::Z => "z",
            TetrominoKind::J => "j",
            TetrominoKind::L => "l",
        }
    }
}

/// A cell on the board
///
/// - `None`: empty
/// - `Some(Color)`: filled by a locked piece of that color
pub type Cell = Option<Color>;
