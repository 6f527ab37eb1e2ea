//! Pieces module - tetromino shape matrices and rotation
//!
//! Shapes are small occupancy matrices anchored at their bounding box's
//! top-left corner. Rotation is a plain clockwise transpose-and-reverse; there
//! is no per-kind kick table, the board engine tries column offsets instead.

use serde::Serialize;

use crate::types::{Color, TetrominoKind, BOARD_WIDTH};

/// Largest bounding box side of any tetromino
pub const MAX_SHAPE: usize = 4;

/// Occupancy matrix of a piece, `rows x cols` used out of 4x4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    /// Build from 0/1 rows; every row must have the same length
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut bits = [[false; MAX_SHAPE]; MAX_SHAPE];
        let height = rows.len().min(MAX_SHAPE);
        let width = rows.first().map_or(0, |r| r.len()).min(MAX_SHAPE);
        for (r, line) in rows.iter().take(height).enumerate() {
            for (c, &v) in line.iter().take(width).enumerate() {
                bits[r][c] = v != 0;
            }
        }
        Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Quarter turn clockwise: column `c` read bottom-up becomes row `c`
    pub fn rotated(&self) -> Self {
        let mut bits = [[false; MAX_SHAPE]; MAX_SHAPE];
        let (rows, cols) = (self.rows as usize, self.cols as usize);
        for (c, out_row) in bits.iter_mut().enumerate().take(cols) {
            for (i, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.bits[rows - 1 - i][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Occupied cells as `(dx, dy)` offsets from the anchor
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.bits[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }
}

/// Spawn shape for a piece kind
pub fn shape_of(kind: TetrominoKind) -> Shape {
    match kind {
        TetrominoKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        TetrominoKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        TetrominoKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        TetrominoKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        TetrominoKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        TetrominoKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        TetrominoKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
    }
}

/// A piece: kind, current shape, color, and top-left anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: TetrominoKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// New piece centered at the top of the board
    pub fn spawn(kind: TetrominoKind) -> Self {
        let shape = shape_of(kind);
        Self {
            kind,
            shape,
            color: kind.color(),
            x: (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8,
            y: 0,
        }
    }

    /// Same shape at an explicit anchor
    pub fn at(kind: TetrominoKind, x: i8, y: i8) -> Self {
        Self {
            x,
            y,
            ..Self::spawn(kind)
        }
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same anchor, shape turned clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Occupied board coordinates `(x, y)`
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
