//! Ball vs tile collision scan
//!
//! Brute-force over the level's tiles in insertion order. Levels hold at most a
//! few hundred tiles and a scan runs once per sensor sample, so no spatial index.

use super::rect::Aabb;
use super::tile::{Tile, TileKind};

/// Result of a single tick, as seen by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened, keep feeding samples
    Continue,
    /// Ball touched a hole
    Failed,
    /// Ball reached an end tile
    Succeeded,
}

impl Outcome {
    /// Failed or Succeeded
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// Index of the first tile (in slice order) the box overlaps
pub fn first_hit(tiles: &[Tile], bbox: &Aabb) -> Option<usize> {
    tiles.iter().position(|tile| tile.rect.intersects(bbox))
}

/// Outcome for a ball bounding box against a level's tiles
///
/// Only the first overlapping tile counts. A START tile yields `Continue` but
/// still ends the scan, so it masks any later tile overlapped in the same tick.
pub fn scan_tiles(tiles: &[Tile], bbox: &Aabb) -> Outcome {
    match first_hit(tiles, bbox).map(|i| tiles[i].kind) {
        Some(TileKind::Hole) => Outcome::Failed,
        Some(TileKind::End) => Outcome::Succeeded,
        Some(TileKind::Start) | None => Outcome::Continue,
    }
}
