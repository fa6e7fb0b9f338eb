//! Internal-consistency validation for tilesets
//!
//! The reader accepts anything structurally well-formed; this crate checks
//! that a parsed tileset makes sense as a whole: every tile reference stays
//! inside the atlas, wang signatures only use declared colors, probabilities
//! are sane, and the terrain properties decode.
//!
//! # Example
//!
//! ```rust,ignore
//! let tileset = tiledef_tsx::load_tileset("spring_forest.tsx")?;
//! tiledef_schema::validate_tileset(&tileset)?;
//! ```

mod validate;

pub use validate::{validate_tileset, validate_tileset_all};

use thiserror::Error;
use tiledef_core::{TerrainError, TileId};

/// A consistency violation found in a parsed tileset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidateError {
    #[error("tileset `{0}` declares zero columns")]
    NoColumns(String),
    #[error("tileset `{name}`: {columns} columns exceed the tile count {tile_count}")]
    TooManyColumns {
        name: String,
        columns: u32,
        tile_count: u32,
    },
    #[error(
        "tileset `{name}`: image `{image_source}` holds {available} tiles of \
         {tile_width}x{tile_height} but {tile_count} are declared"
    )]
    ImageTooSmall {
        name: String,
        image_source: String,
        available: u32,
        tile_width: u32,
        tile_height: u32,
        tile_count: u32,
    },
    #[error("tile {tile} is out of bounds for tile count {tile_count}")]
    TileOutOfBounds { tile: TileId, tile_count: u32 },
    #[error("wang set `{set}`: tile {tile} is out of bounds for tile count {tile_count}")]
    WangTileOutOfBounds {
        set: String,
        tile: TileId,
        tile_count: u32,
    },
    #[error("wang set `{set}`: tile {tile} uses color {color} but only {count} colors are defined")]
    WangColorOutOfRange {
        set: String,
        tile: TileId,
        color: u8,
        count: usize,
    },
    #[error("wang set `{set}` is corner-typed but tile {tile} carries edge colors")]
    CornerSetEdgeColor { set: String, tile: TileId },
    #[error("tile {tile}: probability {value} is not a finite non-negative number")]
    BadTileProbability { tile: TileId, value: f32 },
    #[error("wang set `{set}` color `{color}`: probability {value} is not a finite non-negative number")]
    BadColorProbability {
        set: String,
        color: String,
        value: f32,
    },
    #[error("tile {tile}: {source}")]
    Terrain {
        tile: TileId,
        #[source]
        source: TerrainError,
    },
    #[error(
        "tile {tile}: marker {marker} lies outside the {tile_width}x{tile_height} tile bounds"
    )]
    MarkerOutOfBounds {
        tile: TileId,
        marker: u32,
        tile_width: u32,
        tile_height: u32,
    },
}
