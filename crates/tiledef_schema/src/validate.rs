//! Validation logic

use crate::ValidateError;
use tiledef_core::{Edge, TerrainTags, Tileset, WangId, WangSetKind};

/// Validate a parsed tileset, returning the first violation found.
pub fn validate_tileset(tileset: &Tileset) -> Result<(), ValidateError> {
    match validate_tileset_all(tileset).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Validate a parsed tileset, collecting every violation. Useful for tooling
/// that reports all problems at once.
pub fn validate_tileset_all(tileset: &Tileset) -> Vec<ValidateError> {
    let mut errors = Vec::new();
    check_geometry(tileset, &mut errors);
    check_tiles(tileset, &mut errors);
    check_wang_sets(tileset, &mut errors);
    errors
}

fn check_geometry(tileset: &Tileset, errors: &mut Vec<ValidateError>) {
    if tileset.columns == 0 {
        errors.push(ValidateError::NoColumns(tileset.name.clone()));
        return;
    }
    if tileset.columns > tileset.tile_count {
        errors.push(ValidateError::TooManyColumns {
            name: tileset.name.clone(),
            columns: tileset.columns,
            tile_count: tileset.tile_count,
        });
    }
    if let Some(image) = &tileset.image {
        if tileset.tile_width == 0 || tileset.tile_height == 0 {
            return;
        }
        let available = (image.width / tileset.tile_width) * (image.height / tileset.tile_height);
        if available < tileset.tile_count {
            errors.push(ValidateError::ImageTooSmall {
                name: tileset.name.clone(),
                image_source: image.source.clone(),
                available,
                tile_width: tileset.tile_width,
                tile_height: tileset.tile_height,
                tile_count: tileset.tile_count,
            });
        }
    }
}

fn check_tiles(tileset: &Tileset, errors: &mut Vec<ValidateError>) {
    let tile_width = tileset.tile_width;
    let tile_height = tileset.tile_height;

    for tile in tileset.tiles() {
        if !tileset.contains(tile.id) {
            errors.push(ValidateError::TileOutOfBounds {
                tile: tile.id,
                tile_count: tileset.tile_count,
            });
        }
        if !tile.probability.is_finite() || tile.probability < 0.0 {
            errors.push(ValidateError::BadTileProbability {
                tile: tile.id,
                value: tile.probability,
            });
        }
        if TerrainTags::present_in(&tile.properties) {
            if let Err(source) = TerrainTags::from_properties(&tile.properties) {
                errors.push(ValidateError::Terrain {
                    tile: tile.id,
                    source,
                });
            }
        }
        for marker in &tile.markers {
            let ((min_x, min_y), (max_x, max_y)) = marker.bounds();
            if min_x < 0.0
                || min_y < 0.0
                || max_x > tile_width as f32
                || max_y > tile_height as f32
            {
                errors.push(ValidateError::MarkerOutOfBounds {
                    tile: tile.id,
                    marker: marker.id,
                    tile_width,
                    tile_height,
                });
            }
        }
    }
}

fn check_wang_sets(tileset: &Tileset, errors: &mut Vec<ValidateError>) {
    for set in &tileset.wang_sets {
        let color_count = set.colors.len();

        for color in &set.colors {
            if !color.probability.is_finite() || color.probability < 0.0 {
                errors.push(ValidateError::BadColorProbability {
                    set: set.name.clone(),
                    color: color.name.clone(),
                    value: color.probability,
                });
            }
        }

        // Representative tiles of the set and its colors
        let representatives = set
            .tile
            .into_iter()
            .chain(set.colors.iter().filter_map(|c| c.tile));
        for tile in representatives {
            if !tileset.contains(tile) {
                errors.push(ValidateError::WangTileOutOfBounds {
                    set: set.name.clone(),
                    tile,
                    tile_count: tileset.tile_count,
                });
            }
        }

        for (&tile, wang_id) in &set.tiles {
            if !tileset.contains(tile) {
                errors.push(ValidateError::WangTileOutOfBounds {
                    set: set.name.clone(),
                    tile,
                    tile_count: tileset.tile_count,
                });
            }
            let max_color = wang_id.max_color();
            if usize::from(max_color) > color_count {
                errors.push(ValidateError::WangColorOutOfRange {
                    set: set.name.clone(),
                    tile,
                    color: max_color,
                    count: color_count,
                });
            }
            if set.kind == WangSetKind::Corner
                && Edge::ALL.iter().any(|&e| wang_id.edge(e) != WangId::UNSET)
            {
                errors.push(ValidateError::CornerSetEdgeColor {
                    set: set.name.clone(),
                    tile,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiledef_core::{
        ColorRgba, MarkerObject, PropertyValue, Tile, TileId, WangColor, WangSet,
    };

    fn tileset_with_wang() -> Tileset {
        let mut tileset = Tileset::new("spring_forest", 16, 16, 672, 32);
        tileset.image = Some(tiledef_core::Image {
            source: "spring_forest.png".to_string(),
            width: 512,
            height: 336,
        });

        let mut set = WangSet::new("grass_set", WangSetKind::Corner);
        set.colors.push(WangColor::new("path", ColorRgba::rgb(0xff, 0, 0)));
        set.colors.push(WangColor::new("grass", ColorRgba::rgb(0xff, 0x77, 0)));
        set.tiles
            .insert(TileId(1), WangId([0, 0, 0, 1, 0, 0, 0, 0]));
        set.tiles
            .insert(TileId(32), WangId([0, 2, 0, 2, 0, 2, 0, 2]));
        tileset.wang_sets.push(set);
        tileset
    }

    #[test]
    fn test_consistent_tileset_passes() {
        let tileset = tileset_with_wang();
        assert!(validate_tileset(&tileset).is_ok());
        assert!(validate_tileset_all(&tileset).is_empty());
    }

    #[test]
    fn test_wangtile_out_of_bounds() {
        let mut tileset = tileset_with_wang();
        tileset.wang_sets[0]
            .tiles
            .insert(TileId(672), WangId([0, 1, 0, 1, 0, 1, 0, 1]));
        let err = validate_tileset(&tileset).unwrap_err();
        assert_eq!(
            err,
            ValidateError::WangTileOutOfBounds {
                set: "grass_set".to_string(),
                tile: TileId(672),
                tile_count: 672,
            }
        );
    }

    #[test]
    fn test_wang_color_out_of_range() {
        let mut tileset = tileset_with_wang();
        tileset.wang_sets[0]
            .tiles
            .insert(TileId(2), WangId([0, 3, 0, 0, 0, 0, 0, 0]));
        let errors = validate_tileset_all(&tileset);
        assert!(errors.contains(&ValidateError::WangColorOutOfRange {
            set: "grass_set".to_string(),
            tile: TileId(2),
            color: 3,
            count: 2,
        }));
    }

    #[test]
    fn test_corner_set_rejects_edge_colors() {
        let mut tileset = tileset_with_wang();
        tileset.wang_sets[0]
            .tiles
            .insert(TileId(3), WangId([1, 0, 0, 0, 0, 0, 0, 0]));
        let errors = validate_tileset_all(&tileset);
        assert!(errors.contains(&ValidateError::CornerSetEdgeColor {
            set: "grass_set".to_string(),
            tile: TileId(3),
        }));
    }

    #[test]
    fn test_marker_out_of_bounds() {
        let mut tileset = Tileset::new("shape", 16, 16, 1024, 32);
        let mut tile = Tile::new(TileId(72));
        tile.markers.push(MarkerObject::point(2, 6.3, 4.2));
        tile.markers.push(MarkerObject::point(3, 20.0, 4.0));
        tileset.tiles.insert(tile.id, tile);

        let errors = validate_tileset_all(&tileset);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidateError::MarkerOutOfBounds {
                tile: TileId(72),
                marker: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_terrain_property_type() {
        let mut tileset = Tileset::new("shape", 16, 16, 1024, 32);
        let mut tile = Tile::new(TileId(5));
        tile.properties
            .insert("shape", PropertyValue::Bool(true));
        tileset.tiles.insert(tile.id, tile);

        let err = validate_tileset(&tileset).unwrap_err();
        assert!(matches!(err, ValidateError::Terrain { tile: TileId(5), .. }));
    }

    #[test]
    fn test_bad_probability() {
        let mut tileset = Tileset::new("t", 16, 16, 4, 2);
        let mut tile = Tile::new(TileId(0));
        tile.probability = -1.0;
        tileset.tiles.insert(tile.id, tile);
        let err = validate_tileset(&tileset).unwrap_err();
        assert_eq!(
            err,
            ValidateError::BadTileProbability {
                tile: TileId(0),
                value: -1.0,
            }
        );
    }

    #[test]
    fn test_image_too_small() {
        let mut tileset = Tileset::new("t", 16, 16, 1024, 32);
        tileset.image = Some(tiledef_core::Image {
            source: "t.png".to_string(),
            width: 512,
            height: 256,
        });
        let err = validate_tileset(&tileset).unwrap_err();
        assert!(matches!(err, ValidateError::ImageTooSmall { available: 512, .. }));
    }

    #[test]
    fn test_parsed_document_validates() {
        let doc = r##"<tileset name="t" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <wangsets>
  <wangset name="w" type="corner" tile="-1">
   <wangcolor name="a" color="#ff0000" tile="-1" probability="1"/>
   <wangtile tileid="9" wangid="0,1,0,1,0,1,0,1"/>
  </wangset>
 </wangsets>
</tileset>"##;
        let tileset = tiledef_tsx::parse_tileset(doc).unwrap();
        let err = validate_tileset(&tileset).unwrap_err();
        assert_eq!(
            err,
            ValidateError::WangTileOutOfBounds {
                set: "w".to_string(),
                tile: TileId(9),
                tile_count: 4,
            }
        );
    }
}
