//! Tileset document model

use crate::marker::MarkerObject;
use crate::value::Properties;
use crate::wang::WangSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Index of a tile within the tileset's atlas image
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl TileId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// The atlas image backing a tileset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Path to the image file, relative to the tileset document
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Per-tile metadata. Tiles without an entry in [`Tileset::tiles`] are plain
/// atlas tiles with default metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Relative selection weight; only present in newer document revisions
    #[serde(default = "default_probability")]
    pub probability: f32,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    /// Collision/marker shapes, local to the tile in pixels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<MarkerObject>,
}

fn default_probability() -> f32 {
    1.0
}

impl Tile {
    pub fn new(id: TileId) -> Self {
        Self {
            id,
            probability: 1.0,
            properties: Properties::new(),
            markers: Vec::new(),
        }
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }
}

/// A parsed tileset document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    pub name: String,
    /// Format version of the source document (e.g. "1.10")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Version of the editor that wrote the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiled_version: Option<String>,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    /// Render-size hint carried by some documents (e.g. "grid")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Sparse per-tile metadata, keyed by id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tiles: BTreeMap<TileId, Tile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wang_sets: Vec<WangSet>,
}

impl Tileset {
    pub fn new(
        name: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
        tile_count: u32,
        columns: u32,
    ) -> Self {
        Self {
            name: name.into(),
            version: None,
            tiled_version: None,
            tile_width,
            tile_height,
            tile_count,
            columns,
            render_size: None,
            image: None,
            tiles: BTreeMap::new(),
            wang_sets: Vec::new(),
        }
    }

    /// Whether `id` addresses a tile inside the atlas
    pub fn contains(&self, id: TileId) -> bool {
        id.0 < self.tile_count
    }

    /// Metadata for a tile, if any was defined
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// All tiles carrying metadata, in id order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Selection weight for a tile (1.0 when no metadata overrides it)
    pub fn tile_probability(&self, id: TileId) -> f32 {
        self.tile(id).map(Tile::probability).unwrap_or(1.0)
    }

    /// Number of atlas rows implied by the tile count and column count
    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            0
        } else {
            self.tile_count.div_ceil(self.columns)
        }
    }

    /// Convert a tile id to its (column, row) atlas cell
    pub fn grid_of(&self, id: TileId) -> Option<(u32, u32)> {
        if !self.contains(id) || self.columns == 0 {
            return None;
        }
        Some((id.0 % self.columns, id.0 / self.columns))
    }

    /// Convert an atlas cell back to a tile id
    pub fn id_at(&self, column: u32, row: u32) -> Option<TileId> {
        if self.columns == 0 || column >= self.columns {
            return None;
        }
        let id = TileId(row * self.columns + column);
        self.contains(id).then_some(id)
    }

    pub fn wang_set(&self, name: &str) -> Option<&WangSet> {
        self.wang_sets.iter().find(|set| set.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_math() {
        let tileset = Tileset::new("shape", 16, 16, 1024, 32);
        assert_eq!(tileset.rows(), 32);
        assert_eq!(tileset.grid_of(TileId(66)), Some((2, 2)));
        assert_eq!(tileset.id_at(2, 2), Some(TileId(66)));
        assert_eq!(tileset.grid_of(TileId(1024)), None);
        assert_eq!(tileset.id_at(32, 0), None);
    }

    #[test]
    fn test_partial_last_row() {
        // 672 tiles over 32 columns: 21 full rows
        let tileset = Tileset::new("spring_forest", 16, 16, 672, 32);
        assert_eq!(tileset.rows(), 21);
        assert!(tileset.contains(TileId(671)));
        assert!(!tileset.contains(TileId(672)));
    }

    #[test]
    fn test_sparse_tiles_default_metadata() {
        let mut tileset = Tileset::new("shape", 16, 16, 1024, 32);
        tileset.tiles.insert(TileId(5), Tile::new(TileId(5)));
        assert!(tileset.tile(TileId(5)).is_some());
        assert!(tileset.tile(TileId(6)).is_none());
        assert_eq!(tileset.tile_probability(TileId(6)), 1.0);
    }

    #[test]
    fn test_tiles_iterate_in_id_order() {
        let mut tileset = Tileset::new("t", 16, 16, 100, 10);
        for id in [9u32, 3, 41] {
            tileset.tiles.insert(TileId(id), Tile::new(TileId(id)));
        }
        let ids: Vec<u32> = tileset.tiles().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![3, 9, 41]);
    }
}
