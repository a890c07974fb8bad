//! Static labyrinth tiles

use glam::UVec2;
use serde::{Deserialize, Serialize};

use super::rect::Aabb;

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Ball falls in, level failed
    Hole,
    /// Spawn point, exactly one per level
    Start,
    /// Goal, level succeeded
    End,
}

/// A single grid cell of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Grid coordinates (col, row)
    pub cell: UVec2,
    /// Surface-space rectangle covered by the tile
    pub rect: Aabb,
}

impl Tile {
    /// Build a tile at grid cell (col, row). `tile_size` is twice the ball radius.
    pub fn new(kind: TileKind, col: u32, row: u32, tile_size: f32) -> Self {
        Self {
            kind,
            cell: UVec2::new(col, row),
            rect: Aabb::cell(col, row, tile_size),
        }
    }
}
