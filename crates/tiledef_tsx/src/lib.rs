//! Reader for terrain tileset documents
//!
//! Parses the tileset dialect
//! `tileset → image / tile → (properties / objectgroup) / wangsets` into the
//! [`tiledef_core`] model. The reader accepts both document revisions in
//! circulation: the `probability` attribute on `<tile>` and the wang color
//! roster may differ between revisions, and unknown elements or attributes
//! are skipped with a log message rather than rejected.
//!
//! # Example
//!
//! ```rust,ignore
//! let tileset = tiledef_tsx::load_tileset("assets/maps/tilesets/shape.tsx")?;
//! for tile in tileset.tiles() {
//!     println!("{}: {:?}", tile.id, tile.properties);
//! }
//! ```

mod reader;

pub use reader::parse_tileset;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tiledef_core::{TileId, Tileset, ValueParseError, WangParseError};

/// Errors raised while reading a tileset document
#[derive(Debug, Error)]
pub enum TsxError {
    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tileset document is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
    #[error("unexpected root element <{0}>, expected <tileset>")]
    UnexpectedRoot(String),
    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("<{element}> attribute `{attribute}` has invalid value `{value}`")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    #[error("tile {tile}: {source}")]
    Property {
        tile: TileId,
        #[source]
        source: ValueParseError,
    },
    #[error("wang set `{set}`: {source}")]
    WangSet {
        set: String,
        #[source]
        source: WangParseError,
    },
    #[error("wangtile {tile}: {source}")]
    WangTile {
        tile: TileId,
        #[source]
        source: WangParseError,
    },
}

/// Parse a tileset document from raw bytes
pub fn parse_tileset_bytes(bytes: &[u8]) -> Result<Tileset, TsxError> {
    parse_tileset(std::str::from_utf8(bytes)?)
}

/// Read and parse a tileset document from disk
pub fn load_tileset(path: impl AsRef<Path>) -> Result<Tileset, TsxError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| TsxError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tileset(&text)
}
