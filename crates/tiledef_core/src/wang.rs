//! Wang set (auto-tile rule table) model
//!
//! A wang set names a group of terrain colors and assigns each participating
//! tile an 8-value adjacency signature. Positions use Tiled's clockwise
//! indexing:
//!
//! ```text
//!   7|0|1
//!   6|X|2
//!   5|4|3
//! ```
//!
//! Even indices are edges (Top, Right, Bottom, Left), odd indices are corners
//! (TopRight, BottomRight, BottomLeft, TopLeft). A stored value of 0 means
//! "unset"; value `n` is the 1-based index into the set's color list.

use crate::tileset::TileId;
use crate::value::ColorRgba;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a wang set matches tiles to their neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WangSetKind {
    /// 4 corners per tile; the evidenced documents use this
    #[default]
    Corner,
    /// 4 edges per tile
    Edge,
    /// 4 corners + 4 edges
    Mixed,
}

impl WangSetKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Corner => "corner",
            Self::Edge => "edge",
            Self::Mixed => "mixed",
        }
    }
}

impl FromStr for WangSetKind {
    type Err = WangParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corner" => Ok(Self::Corner),
            "edge" => Ok(Self::Edge),
            "mixed" => Ok(Self::Mixed),
            _ => Err(WangParseError::UnknownKind(s.to_string())),
        }
    }
}

/// Errors raised while decoding wang data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WangParseError {
    #[error("unknown wang set type `{0}`")]
    UnknownKind(String),
    #[error("wang id has {0} entries, expected 8")]
    Arity(usize),
    #[error("`{0}` is not a wang color index")]
    InvalidEntry(String),
}

/// Corner positions of a tile, clockwise from top-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
        Self::TopLeft,
    ];

    /// Position of this corner in a [`WangId`]
    pub fn position(self) -> usize {
        match self {
            Self::TopRight => 1,
            Self::BottomRight => 3,
            Self::BottomLeft => 5,
            Self::TopLeft => 7,
        }
    }
}

/// Edge positions of a tile, clockwise from the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position of this edge in a [`WangId`]
    pub fn position(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 2,
            Self::Bottom => 4,
            Self::Left => 6,
        }
    }
}

/// The 8-position adjacency signature of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WangId(pub [u8; 8]);

impl WangId {
    pub const UNSET: u8 = 0;

    /// Parse the comma-separated list form (`"0,0,0,1,0,0,0,0"`)
    pub fn from_list(s: &str) -> Result<Self, WangParseError> {
        let mut values = [0u8; 8];
        let mut count = 0;
        for entry in s.split(',') {
            let entry = entry.trim();
            if count < 8 {
                values[count] = entry
                    .parse()
                    .map_err(|_| WangParseError::InvalidEntry(entry.to_string()))?;
            }
            count += 1;
        }
        if count != 8 {
            return Err(WangParseError::Arity(count));
        }
        Ok(Self(values))
    }

    pub fn corner(self, corner: Corner) -> u8 {
        self.0[corner.position()]
    }

    pub fn edge(self, edge: Edge) -> u8 {
        self.0[edge.position()]
    }

    /// Corner colors in [`Corner::ALL`] order
    pub fn corners(self) -> [u8; 4] {
        Corner::ALL.map(|c| self.corner(c))
    }

    /// Whether only corner positions carry colors
    pub fn is_corner_only(self) -> bool {
        Edge::ALL.iter().all(|&e| self.edge(e) == Self::UNSET)
    }

    /// Largest color index used at any position
    pub fn max_color(self) -> u8 {
        self.0.into_iter().max().unwrap_or(Self::UNSET)
    }

    /// The single color covering all four corners, if uniform and set
    pub fn uniform_corner(self) -> Option<u8> {
        let [a, b, c, d] = self.corners();
        (a != Self::UNSET && a == b && b == c && c == d).then_some(a)
    }
}

impl fmt::Display for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            value.fmt(f)?;
        }
        Ok(())
    }
}

/// One terrain color within a wang set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangColor {
    pub name: String,
    pub color: ColorRgba,
    /// Representative tile shown by editors, if any
    pub tile: Option<TileId>,
    /// Relative selection weight
    pub probability: f32,
}

impl WangColor {
    pub fn new(name: impl Into<String>, color: ColorRgba) -> Self {
        Self {
            name: name.into(),
            color,
            tile: None,
            probability: 1.0,
        }
    }
}

/// A named auto-tile rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangSet {
    pub name: String,
    pub kind: WangSetKind,
    /// Representative tile for the whole set, if any
    pub tile: Option<TileId>,
    pub colors: Vec<WangColor>,
    /// Adjacency signatures, keyed by tile id
    pub tiles: BTreeMap<TileId, WangId>,
}

impl WangSet {
    pub fn new(name: impl Into<String>, kind: WangSetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tile: None,
            colors: Vec::new(),
            tiles: BTreeMap::new(),
        }
    }

    pub fn wang_id_of(&self, tile: TileId) -> Option<WangId> {
        self.tiles.get(&tile).copied()
    }

    /// Color by 1-based index, as stored in wang ids
    pub fn color(&self, index: u8) -> Option<&WangColor> {
        if index == WangId::UNSET {
            return None;
        }
        self.colors.get(usize::from(index) - 1)
    }

    /// Find a color and its 1-based index by name
    pub fn color_named(&self, name: &str) -> Option<(u8, &WangColor)> {
        self.colors
            .iter()
            .position(|c| c.name == name)
            .map(|i| ((i + 1) as u8, &self.colors[i]))
    }

    /// Tiles whose signature uses `color` at any position, in id order
    pub fn tiles_of_color(&self, color: u8) -> Vec<TileId> {
        self.tiles
            .iter()
            .filter(|(_, id)| id.0.contains(&color))
            .map(|(&tile, _)| tile)
            .collect()
    }

    /// Tiles covered entirely by `color` on all four corners, in id order
    pub fn uniform_tiles(&self, color: u8) -> Vec<TileId> {
        self.tiles
            .iter()
            .filter(|(_, id)| id.uniform_corner() == Some(color))
            .map(|(&tile, _)| tile)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
