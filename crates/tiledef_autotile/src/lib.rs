//! Wang rule-table queries
//!
//! This crate is the consumption side of a tileset's wang sets: given the
//! terrain colors an auto-tiler wants at a tile's corners, find the tiles
//! whose adjacency signatures fit, score near misses, and sample among
//! equally good candidates by the probabilities the document declares.
//!
//! Filling an actual map grid is the caller's job; everything here operates
//! on a single cell's constraints.
//!
//! # Example
//!
//! ```rust,ignore
//! use tiledef_autotile::{best_match, CornerSignature};
//!
//! let set = tileset.wang_set("grass_set").unwrap();
//! let (grass, _) = set.color_named("grass").unwrap();
//! let signature = CornerSignature::filled(grass);
//! let tile = best_match(set, &signature);
//! ```

mod select;
mod signature;

pub use select::{best_match, choose_weighted, matches, WangMatch};
pub use signature::CornerSignature;
