//! Collision/marker shapes attached to tiles

use serde::{Deserialize, Serialize};

/// Geometry of a marker object. An object without an explicit shape child in
/// the document is a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MarkerShape {
    Point,
    Ellipse { width: f32, height: f32 },
    Rect { width: f32, height: f32 },
}

impl MarkerShape {
    /// Display name of this shape kind
    pub fn name(&self) -> &'static str {
        match self {
            MarkerShape::Point => "Point",
            MarkerShape::Ellipse { .. } => "Ellipse",
            MarkerShape::Rect { .. } => "Rect",
        }
    }

    pub fn size(&self) -> (f32, f32) {
        match self {
            MarkerShape::Point => (0.0, 0.0),
            MarkerShape::Ellipse { width, height } | MarkerShape::Rect { width, height } => {
                (*width, *height)
            }
        }
    }
}

/// A geometric annotation on a tile. Coordinates are local to the tile, in
/// pixels; `(x, y)` is the shape's top-left anchor (the position itself for
/// points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerObject {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub shape: MarkerShape,
}

impl MarkerObject {
    pub fn point(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            shape: MarkerShape::Point,
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self.shape, MarkerShape::Point)
    }

    /// Center of the shape in tile-local pixels
    pub fn center(&self) -> (f32, f32) {
        let (width, height) = self.shape.size();
        (self.x + width / 2.0, self.y + height / 2.0)
    }

    /// Smallest axis-aligned box containing the shape, as (min, max) corners
    pub fn bounds(&self) -> ((f32, f32), (f32, f32)) {
        let (width, height) = self.shape.size();
        ((self.x, self.y), (self.x + width, self.y + height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_center() {
        let marker = MarkerObject::point(2, 6.28437, 4.27337);
        assert!(marker.is_point());
        assert_eq!(marker.center(), (6.28437, 4.27337));
    }

    #[test]
    fn test_ellipse_center_and_bounds() {
        let marker = MarkerObject {
            id: 3,
            x: 4.0,
            y: 8.0,
            shape: MarkerShape::Ellipse {
                width: 8.0,
                height: 4.0,
            },
        };
        assert_eq!(marker.center(), (8.0, 10.0));
        assert_eq!(marker.bounds(), ((4.0, 8.0), (12.0, 12.0)));
    }

    #[test]
    fn test_zero_size_shapes_degenerate_to_origin() {
        let marker = MarkerObject {
            id: 1,
            x: 3.0,
            y: 5.0,
            shape: MarkerShape::Rect {
                width: 0.0,
                height: 0.0,
            },
        };
        assert_eq!(marker.center(), (3.0, 5.0));
    }
}
