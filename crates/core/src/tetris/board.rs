//! Board module - manages the block grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with a color.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use super::pieces::Piece;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices, top to bottom
pub type RowSet = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Board contents as a row matrix, row 0 on top
pub type BoardRows = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Fill every cell of row `y` (test and setup helper)
    pub fn fill_row(&mut self, y: usize, color: Color) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }
        let start = y * BOARD_WIDTH as usize;
        for cell in &mut self.cells[start..start + BOARD_WIDTH as usize] {
            *cell = Some(color);
        }
    }

    /// True if any occupied cell of `piece` leaves the board sideways, falls
    /// below the floor, or overlaps a filled cell
    ///
    /// Rows above the board (y < 0) never collide, so pieces may spawn
    /// partially off the top.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i8
                || y >= BOARD_HEIGHT as i8
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Write a piece's in-bounds cells into the board with its color
    pub fn merge_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    /// All full rows, top to bottom
    pub fn full_rows(&self) -> RowSet {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as u8)
            .collect()
    }

    /// Remove the listed rows and drop everything above them
    ///
    /// The same number of empty rows appears at the top, so the board keeps
    /// its 20 rows. Uses a two-pointer pass with zero allocation.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&(read_y as u8)) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        write_y
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a row matrix (for snapshots)
    pub fn to_rows(&self) -> BoardRows {
        let width = BOARD_WIDTH as usize;
        let mut out = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
