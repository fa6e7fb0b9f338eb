//! Terrain tileset definitions
//!
//! `tiledef` bundles the workspace crates behind one dependency:
//! - [`tiledef_core`] - the data model
//! - [`tiledef_tsx`] - the document reader
//! - [`tiledef_schema`] - internal-consistency validation
//! - [`tiledef_autotile`] - wang rule-table queries
//!
//! # Example
//!
//! ```rust,ignore
//! use tiledef::{load_tileset, validate_tileset, TerrainTags};
//!
//! let tileset = load_tileset("assets/maps/tilesets/shape.tsx")?;
//! validate_tileset(&tileset)?;
//! for tile in tileset.tiles() {
//!     let tags = TerrainTags::from_properties(&tile.properties)?;
//!     println!("{}: {} cliff={}", tile.id, tags.shape, tags.cliff);
//! }
//! ```

pub use tiledef_core::*;

pub use tiledef_tsx::{load_tileset, parse_tileset, parse_tileset_bytes, TsxError};

pub use tiledef_schema::{validate_tileset, validate_tileset_all, ValidateError};

pub use tiledef_autotile::{best_match, choose_weighted, matches, CornerSignature, WangMatch};
