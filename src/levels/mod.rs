//! Declarative level data
//!
//! A level is an ordered list of `(kind, col, row)` entries. Order matters: the
//! collision scan stops at the first overlapping tile, so earlier entries win.
//! The original labyrinths are embedded from `levels/*.json`.

use serde::{Deserialize, Serialize};

use crate::LevelError;
use crate::sim::{Tile, TileKind};

/// One tile entry of a level file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub kind: TileKind,
    pub col: u32,
    pub row: u32,
}

impl TileSpec {
    pub fn new(kind: TileKind, col: u32, row: u32) -> Self {
        Self { kind, col, row }
    }
}

/// A level as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    pub tiles: Vec<TileSpec>,
}

/// A level built for a given tile size
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    /// Tiles in authoring order
    tiles: Vec<Tile>,
    /// Index of the START tile in `tiles`, always in range
    start: usize,
}

impl Level {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn start_index(&self) -> usize {
        self.start
    }

    pub fn start_tile(&self) -> &Tile {
        &self.tiles[self.start]
    }
}

impl LevelSpec {
    pub fn new(name: impl Into<String>, tiles: Vec<TileSpec>) -> Self {
        Self {
            name: name.into(),
            tiles,
        }
    }

    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let spec: LevelSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check for exactly one START tile and at least one END tile
    pub fn validate(&self) -> Result<(), LevelError> {
        let starts = self.count(TileKind::Start);
        let ends = self.count(TileKind::End);
        if starts != 1 || ends == 0 {
            return Err(LevelError::InvalidLevelSpec { starts, ends });
        }
        Ok(())
    }

    fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    /// Validate and build the tile collection
    pub fn build(&self, tile_size: f32) -> Result<Level, LevelError> {
        self.validate()?;

        let tiles: Vec<Tile> = self
            .tiles
            .iter()
            .map(|t| Tile::new(t.kind, t.col, t.row, tile_size))
            .collect();
        let start = tiles
            .iter()
            .position(|t| t.kind == TileKind::Start)
            .ok_or(LevelError::InvalidLevelSpec { starts: 0, ends: 0 })?;

        Ok(Level {
            name: self.name.clone(),
            tiles,
            start,
        })
    }

    /// Grid size (cols, rows) needed to hold every tile
    pub fn grid_size(&self) -> (u32, u32) {
        self.tiles.iter().fold((0, 0), |(cols, rows), t| {
            (
                cols.max(t.col.saturating_add(1)),
                rows.max(t.row.saturating_add(1)),
            )
        })
    }
}

const BUILTIN: [&str; 4] = [
    include_str!("../../levels/level0.json"),
    include_str!("../../levels/level1.json"),
    include_str!("../../levels/level2.json"),
    include_str!("../../levels/level3.json"),
];

/// Number of embedded levels
pub fn builtin_count() -> usize {
    BUILTIN.len()
}

/// Load an embedded level by index
pub fn builtin(index: usize) -> Result<LevelSpec, LevelError> {
    let json = BUILTIN.get(index).ok_or(LevelError::UnknownLevel(index))?;
    LevelSpec::from_json(json)
}
