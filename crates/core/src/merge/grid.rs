//! Grid module - the 4x4 merge grid
//!
//! Flat row-major storage like the block board, `(row, col)` coordinates with
//! row 0 at the top. A cell holds at most one tile and a tile's own
//! `row`/`col` always match the cell it sits in.

use arrayvec::ArrayVec;
use serde::Serialize;

use super::tile::Tile;
use crate::rng::IdSequence;
use crate::types::{GRID_CELLS, GRID_SIZE};

/// The merge grid - 4x4 cells of optional tiles
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Grid {
    cells: [Option<Tile>; GRID_CELLS],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
            return None;
        }
        Some(row as usize * GRID_SIZE + col as usize)
    }

    /// Tile at `(row, col)`, None if empty or out of bounds
    pub fn tile(&self, row: i8, col: i8) -> Option<&Tile> {
        Self::index(row, col).and_then(|idx| self.cells[idx].as_ref())
    }

    /// True if `(row, col)` is on the grid and holds no tile
    pub fn is_vacant(&self, row: i8, col: i8) -> bool {
        matches!(Self::index(row, col), Some(idx) if self.cells[idx].is_none())
    }

    /// Put a tile into the cell named by its own coordinates
    ///
    /// Returns false (and drops nothing) if that cell is off-grid or occupied.
    pub fn place(&mut self, tile: Tile) -> bool {
        match Self::index(tile.row as i8, tile.col as i8) {
            Some(idx) if self.cells[idx].is_none() => {
                self.cells[idx] = Some(tile);
                true
            }
            _ => false,
        }
    }

    /// Remove and return the tile at `(row, col)`
    pub fn take(&mut self, row: i8, col: i8) -> Option<Tile> {
        Self::index(row, col).and_then(|idx| self.cells[idx].take())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> ArrayVec<(u8, u8), GRID_CELLS> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| ((idx / GRID_SIZE) as u8, (idx % GRID_SIZE) as u8))
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn value_sum(&self) -> u64 {
        self.tiles().map(|t| t.value as u64).sum()
    }

    pub fn max_value(&self) -> u32 {
        self.tiles().map(|t| t.value).max().unwrap_or(0)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// True if two orthogonally adjacent tiles share a value
    pub fn has_adjacent_equal(&self) -> bool {
        for row in 0..GRID_SIZE as i8 {
            for col in 0..GRID_SIZE as i8 {
                let Some(tile) = self.tile(row, col) else {
                    continue;
                };
                // Right and down neighbours cover every pair once.
                for (dr, dc) in [(0, 1), (1, 0)] {
                    if let Some(other) = self.tile(row + dr, col + dc) {
                        if other.value == tile.value {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// True if some direction would shift or merge a tile
    pub fn moves_available(&self) -> bool {
        !self.is_full() || self.has_adjacent_equal()
    }

    /// Drop the one-move presentation hints from every tile
    pub fn clear_flags(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.clear_flags();
        }
    }

    /// Tile values as a matrix, 0 for empty cells
    pub fn values(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        let mut out = [[0u32; GRID_SIZE]; GRID_SIZE];
        for tile in self.tiles() {
            out[tile.row as usize][tile.col as usize] = tile.value;
        }
        out
    }

    /// Build a grid from a value matrix (0 = empty), assigning fresh ids
    pub fn from_values(values: [[u32; GRID_SIZE]; GRID_SIZE], ids: &mut IdSequence) -> Self {
        let mut grid = Self::new();
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    grid.place(Tile::placed(ids.next_id(), value, row as u8, col as u8));
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(0, 3), Some(3));
        assert_eq!(Grid::index(1, 0), Some(4));
        assert_eq!(Grid::index(3, 3), Some(15));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(0, 4), None);
        assert_eq!(Grid::index(4, 0), None);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut grid = Grid::new();
        assert!(grid.place(Tile::placed(1, 2, 1, 1)));
        assert!(!grid.place(Tile::placed(2, 4, 1, 1)));
        assert_eq!(grid.tile(1, 1).map(|t| t.id), Some(1));
        assert_eq!(grid.tile_count(), 1);
    }

    #[test]
    fn test_values_roundtrip() {
        let mut ids = IdSequence::new();
        let values = [[2, 0, 0, 4], [0, 8, 0, 0], [0, 0, 0, 0], [16, 0, 0, 2]];
        let grid = Grid::from_values(values, &mut ids);
        assert_eq!(grid.values(), values);
        assert_eq!(grid.tile_count(), 5);
        assert_eq!(grid.value_sum(), 32);
        assert_eq!(grid.max_value(), 16);
    }

    #[test]
    fn test_adjacency_is_orthogonal_only() {
        let mut ids = IdSequence::new();
        // Diagonal equal values do not count.
        let grid = Grid::from_values(
            [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
            &mut ids,
        );
        assert!(grid.is_full());
        assert!(!grid.has_adjacent_equal());
        assert!(!grid.moves_available());
    }
}
