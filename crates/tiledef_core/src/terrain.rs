//! Typed view of the terrain properties (`shape`, `cliff`, `reset`,
//! `is_grass`) carried by tiles.
//!
//! A shape tag names the 3D surface a tile stands for: a base surface on its
//! northern side, an optional different surface it transitions into on the
//! south (`floor-wall-se` starts as floor and drops into a wall on the
//! south-east), and an optional trimmed northern corner (`floor-nw`).

use crate::value::{Properties, PropertyValue};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while decoding terrain properties
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    #[error("unknown tile shape `{0}`")]
    UnknownShape(String),
    #[error("unknown cliff direction `{0}` (expected letters n, e, w)")]
    UnknownCliff(char),
    #[error("property `{name}` is not a {expected}")]
    PropertyType {
        name: &'static str,
        expected: &'static str,
    },
}

/// Base surface category of a tile face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceKind {
    #[default]
    Floor,
    Wall,
    Slope,
}

/// Which northern corner a shape trims to a triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CornerCut {
    #[default]
    None,
    NorthEast,
    NorthWest,
}

/// Geometric category of a tile, as written in the `shape` property.
///
/// The vocabulary is the full {wall, floor, slope} family: uniform shapes,
/// their corner-trimmed variants, and south-edge transitions between any two
/// distinct surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileShape {
    Wall,
    WallNE,
    WallNW,
    WallFloorSE,
    WallFloorSW,
    WallSlopeSE,
    WallSlopeSW,
    #[default]
    Floor,
    FloorNE,
    FloorNW,
    FloorWallSE,
    FloorWallSW,
    FloorSlopeSE,
    FloorSlopeSW,
    Slope,
    SlopeNE,
    SlopeNW,
    SlopeFloorSE,
    SlopeFloorSW,
    SlopeWallSE,
    SlopeWallSW,
}

impl TileShape {
    pub const ALL: [TileShape; 21] = [
        Self::Wall,
        Self::WallNE,
        Self::WallNW,
        Self::WallFloorSE,
        Self::WallFloorSW,
        Self::WallSlopeSE,
        Self::WallSlopeSW,
        Self::Floor,
        Self::FloorNE,
        Self::FloorNW,
        Self::FloorWallSE,
        Self::FloorWallSW,
        Self::FloorSlopeSE,
        Self::FloorSlopeSW,
        Self::Slope,
        Self::SlopeNE,
        Self::SlopeNW,
        Self::SlopeFloorSE,
        Self::SlopeFloorSW,
        Self::SlopeWallSE,
        Self::SlopeWallSW,
    ];

    /// Surface on the northern side of the tile
    pub fn kind(self) -> SurfaceKind {
        match self {
            Self::Wall
            | Self::WallNE
            | Self::WallNW
            | Self::WallFloorSE
            | Self::WallFloorSW
            | Self::WallSlopeSE
            | Self::WallSlopeSW => SurfaceKind::Wall,
            Self::Floor
            | Self::FloorNE
            | Self::FloorNW
            | Self::FloorWallSE
            | Self::FloorWallSW
            | Self::FloorSlopeSE
            | Self::FloorSlopeSW => SurfaceKind::Floor,
            Self::Slope
            | Self::SlopeNE
            | Self::SlopeNW
            | Self::SlopeFloorSE
            | Self::SlopeFloorSW
            | Self::SlopeWallSE
            | Self::SlopeWallSW => SurfaceKind::Slope,
        }
    }

    /// Surface the tile transitions into on its southern edge
    pub fn south_kind(self) -> SurfaceKind {
        match self {
            Self::WallFloorSE | Self::WallFloorSW | Self::SlopeFloorSE | Self::SlopeFloorSW => {
                SurfaceKind::Floor
            }
            Self::FloorWallSE | Self::FloorWallSW | Self::SlopeWallSE | Self::SlopeWallSW => {
                SurfaceKind::Wall
            }
            Self::FloorSlopeSE | Self::FloorSlopeSW | Self::WallSlopeSE | Self::WallSlopeSW => {
                SurfaceKind::Slope
            }
            _ => self.kind(),
        }
    }

    /// Whether the north and south surfaces differ
    pub fn is_transition(self) -> bool {
        self.kind() != self.south_kind()
    }

    pub fn corner_cut(self) -> CornerCut {
        match self {
            Self::WallNE | Self::FloorNE | Self::SlopeNE => CornerCut::NorthEast,
            Self::WallNW | Self::FloorNW | Self::SlopeNW => CornerCut::NorthWest,
            _ => CornerCut::None,
        }
    }
}

impl FromStr for TileShape {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wall" => Ok(Self::Wall),
            "wall-ne" => Ok(Self::WallNE),
            "wall-nw" => Ok(Self::WallNW),
            "wall-floor-se" => Ok(Self::WallFloorSE),
            "wall-floor-sw" => Ok(Self::WallFloorSW),
            "wall-slope-se" => Ok(Self::WallSlopeSE),
            "wall-slope-sw" => Ok(Self::WallSlopeSW),
            "floor" => Ok(Self::Floor),
            "floor-ne" => Ok(Self::FloorNE),
            "floor-nw" => Ok(Self::FloorNW),
            "floor-wall-se" => Ok(Self::FloorWallSE),
            "floor-wall-sw" => Ok(Self::FloorWallSW),
            "floor-slope-se" => Ok(Self::FloorSlopeSE),
            "floor-slope-sw" => Ok(Self::FloorSlopeSW),
            "slope" => Ok(Self::Slope),
            "slope-ne" => Ok(Self::SlopeNE),
            "slope-nw" => Ok(Self::SlopeNW),
            "slope-floor-se" => Ok(Self::SlopeFloorSE),
            "slope-floor-sw" => Ok(Self::SlopeFloorSW),
            "slope-wall-se" => Ok(Self::SlopeWallSE),
            "slope-wall-sw" => Ok(Self::SlopeWallSW),
            _ => Err(TerrainError::UnknownShape(s.to_string())),
        }
    }
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Wall => "wall",
            Self::WallNE => "wall-ne",
            Self::WallNW => "wall-nw",
            Self::WallFloorSE => "wall-floor-se",
            Self::WallFloorSW => "wall-floor-sw",
            Self::WallSlopeSE => "wall-slope-se",
            Self::WallSlopeSW => "wall-slope-sw",
            Self::Floor => "floor",
            Self::FloorNE => "floor-ne",
            Self::FloorNW => "floor-nw",
            Self::FloorWallSE => "floor-wall-se",
            Self::FloorWallSW => "floor-wall-sw",
            Self::FloorSlopeSE => "floor-slope-se",
            Self::FloorSlopeSW => "floor-slope-sw",
            Self::Slope => "slope",
            Self::SlopeNE => "slope-ne",
            Self::SlopeNW => "slope-nw",
            Self::SlopeFloorSE => "slope-floor-se",
            Self::SlopeFloorSW => "slope-floor-sw",
            Self::SlopeWallSE => "slope-wall-se",
            Self::SlopeWallSW => "slope-wall-sw",
        };
        f.write_str(tag)
    }
}

bitflags! {
    /// Which sides of a tile drop off as a cliff edge
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Cliff: u8 {
        const NORTH = 1;
        const EAST = 1 << 1;
        const WEST = 1 << 2;
    }
}

impl Cliff {
    /// Parse the `cliff` property's letter form. Letters may be run together
    /// or separated by commas/spaces (`"ne"`, `"new"`, `"n,w"`).
    pub fn parse(s: &str) -> Result<Self, TerrainError> {
        let mut result = Self::empty();
        for c in s.chars() {
            match c {
                'n' => result |= Self::NORTH,
                'e' => result |= Self::EAST,
                'w' => result |= Self::WEST,
                ',' | ' ' => {}
                other => return Err(TerrainError::UnknownCliff(other)),
            }
        }
        Ok(result)
    }
}

impl fmt::Display for Cliff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Self::NORTH) {
            f.write_str("n")?;
        }
        if self.contains(Self::EAST) {
            f.write_str("e")?;
        }
        if self.contains(Self::WEST) {
            f.write_str("w")?;
        }
        Ok(())
    }
}

/// The decoded terrain view of one tile's properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerrainTags {
    pub shape: TileShape,
    pub cliff: Cliff,
    /// Resets the consumer's elevation strip to ground level, typically where
    /// the north side is a cliff
    pub reset: bool,
    pub is_grass: bool,
}

impl TerrainTags {
    /// Decode the terrain properties of a tile. Absent properties take their
    /// defaults; present properties must carry the right type.
    pub fn from_properties(properties: &Properties) -> Result<Self, TerrainError> {
        let mut tags = Self::default();
        if let Some(value) = properties.get("shape") {
            let raw = expect_string("shape", value)?;
            tags.shape = raw.parse()?;
        }
        if let Some(value) = properties.get("cliff") {
            let raw = expect_string("cliff", value)?;
            tags.cliff = Cliff::parse(raw)?;
        }
        if let Some(value) = properties.get("reset") {
            tags.reset = expect_bool("reset", value)?;
        }
        if let Some(value) = properties.get("is_grass") {
            tags.is_grass = expect_bool("is_grass", value)?;
        }
        Ok(tags)
    }

    /// Property names this view decodes
    pub const PROPERTY_NAMES: [&'static str; 4] = ["shape", "cliff", "reset", "is_grass"];

    /// Whether any terrain property is present on `properties`
    pub fn present_in(properties: &Properties) -> bool {
        Self::PROPERTY_NAMES
            .iter()
            .any(|name| properties.contains(name))
    }
}

fn expect_string<'a>(
    name: &'static str,
    value: &'a PropertyValue,
) -> Result<&'a str, TerrainError> {
    value.as_str().ok_or(TerrainError::PropertyType {
        name,
        expected: "string",
    })
}

fn expect_bool(name: &'static str, value: &PropertyValue) -> Result<bool, TerrainError> {
    value.as_bool().ok_or(TerrainError::PropertyType {
        name,
        expected: "bool",
    })
}
