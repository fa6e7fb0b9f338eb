//! Typed custom property values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while decoding a raw property value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueParseError {
    #[error("`{0}` is not a boolean (expected `true` or `false`)")]
    InvalidBool(String),
    #[error("`{0}` is not an integer")]
    InvalidInt(String),
    #[error("`{0}` is not a number")]
    InvalidFloat(String),
    #[error("`{0}` is not a color (expected `#rrggbb` or `#aarrggbb`)")]
    InvalidColor(String),
    #[error("`{0}` is not an object reference")]
    InvalidObject(String),
    #[error("unknown property type `{0}`")]
    UnknownType(String),
}

/// An RGBA color as stored in tileset documents (`#rrggbb` / `#aarrggbb`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorRgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for ColorRgba {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let invalid = || ValueParseError::InvalidColor(s.to_string());
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |range: &str| u8::from_str_radix(range, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Ok(Self::rgba(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ColorRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }
}

/// A single custom property value, mirroring the document's `type` attribute
/// vocabulary (`string` when no type is declared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Color(ColorRgba),
    File(String),
    Object(u32),
}

impl PropertyValue {
    /// Decode a raw attribute value according to its declared type.
    ///
    /// `type_attr` is the optional `type` attribute; absent means string.
    pub fn from_typed(type_attr: Option<&str>, raw: &str) -> Result<Self, ValueParseError> {
        match type_attr.unwrap_or("string") {
            "string" => Ok(Self::String(raw.to_string())),
            "bool" => match raw {
                "true" => Ok(Self::Bool(true)),
                "false" => Ok(Self::Bool(false)),
                _ => Err(ValueParseError::InvalidBool(raw.to_string())),
            },
            "int" => raw
                .parse()
                .map(Self::Int)
                .map_err(|_| ValueParseError::InvalidInt(raw.to_string())),
            "float" => raw
                .parse()
                .map(Self::Float)
                .map_err(|_| ValueParseError::InvalidFloat(raw.to_string())),
            "color" => raw.parse().map(Self::Color),
            "file" => Ok(Self::File(raw.to_string())),
            "object" => raw
                .parse()
                .map(Self::Object)
                .map_err(|_| ValueParseError::InvalidObject(raw.to_string())),
            other => Err(ValueParseError::UnknownType(other.to_string())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The document-level name of this value's type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Color(_) => "color",
            Self::File(_) => "file",
            Self::Object(_) => "object",
        }
    }
}

/// Named custom properties attached to a tile, kept in name order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, PropertyValue>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropertyValue::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(PropertyValue::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(PropertyValue::as_float)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PropertyValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
