use serde::Serialize;

/// Engine-local tile identity
pub type TileId = u64;

/// A numbered tile on the merge grid
///
/// A merge never mutates its sources: it creates a new tile with a fresh id
/// whose `merged_from` holds the two consumed tiles. `merged_from` and
/// `is_new` are presentation hints that live for one move only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: u8,
    pub col: u8,
    pub merged_from: Option<Box<(Tile, Tile)>>,
    pub is_new: bool,
}

impl Tile {
    /// A freshly spawned tile
    pub fn spawned(id: TileId, value: u32, row: u8, col: u8) -> Self {
        Self {
            id,
            value,
            row,
            col,
            merged_from: None,
            is_new: true,
        }
    }

    /// A plain tile with no presentation flags (for prepared grids)
    pub fn placed(id: TileId, value: u32, row: u8, col: u8) -> Self {
        Self {
            is_new: false,
            ..Self::spawned(id, value, row, col)
        }
    }

    /// Combine `moving` into `target`, producing a new tile at the target's cell
    pub fn merged(id: TileId, moving: Tile, target: Tile) -> Self {
        Self {
            id,
            value: target.value * 2,
            row: target.row,
            col: target.col,
            merged_from: Some(Box::new((moving, target))),
            is_new: false,
        }
    }

    /// True if this tile was produced by a merge during the current move
    pub fn is_merge_result(&self) -> bool {
        self.merged_from.is_some()
    }

    pub fn clear_flags(&mut self) {
        self.merged_from = None;
        self.is_new = false;
    }
}
