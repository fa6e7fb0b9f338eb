//! Core data structures for tiledef
//!
//! This crate provides the fundamental types for representing terrain tileset
//! definitions:
//! - `Tileset` / `Tile` - A parsed tileset document and its per-tile metadata
//! - `PropertyValue` / `Properties` - Typed custom properties
//! - `MarkerObject` - Collision/marker shapes local to a tile
//! - `TerrainTags` - The decoded terrain view (`shape`, `cliff`, `reset`, `is_grass`)
//! - `WangSet` - Corner/edge auto-tile rule tables

mod marker;
mod terrain;
mod tileset;
mod value;
mod wang;

pub use marker::{MarkerObject, MarkerShape};
pub use terrain::{Cliff, CornerCut, SurfaceKind, TerrainError, TerrainTags, TileShape};
pub use tileset::{Image, Tile, TileId, Tileset};
pub use value::{ColorRgba, Properties, PropertyValue, ValueParseError};
pub use wang::{Corner, Edge, WangColor, WangId, WangParseError, WangSet, WangSetKind};
