//! Element-by-element mapping of the document dialect into the core model

use crate::TsxError;
use roxmltree::{Document, Node};
use std::str::FromStr;
use tiledef_core::{
    Image, MarkerObject, MarkerShape, Properties, PropertyValue, Tile, TileId, Tileset, WangColor,
    WangId, WangSet, WangSetKind,
};

/// Parse a tileset document from its text form
pub fn parse_tileset(text: &str) -> Result<Tileset, TsxError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if !root.has_tag_name("tileset") {
        return Err(TsxError::UnexpectedRoot(root.tag_name().name().to_string()));
    }
    read_tileset(root)
}

fn read_tileset(node: Node) -> Result<Tileset, TsxError> {
    let name = require_attr(node, "tileset", "name")?.to_string();
    let tile_width = parse_attr(node, "tileset", "tilewidth")?;
    let tile_height = parse_attr(node, "tileset", "tileheight")?;
    let tile_count = parse_attr(node, "tileset", "tilecount")?;
    let columns = parse_attr(node, "tileset", "columns")?;

    let mut tileset = Tileset::new(name, tile_width, tile_height, tile_count, columns);
    tileset.version = node.attribute("version").map(str::to_string);
    tileset.tiled_version = node.attribute("tiledversion").map(str::to_string);
    tileset.render_size = node.attribute("tilerendersize").map(str::to_string);

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "image" => tileset.image = Some(read_image(child)?),
            "tile" => {
                let tile = read_tile(child)?;
                let id = tile.id;
                if tileset.tiles.insert(id, tile).is_some() {
                    log::warn!(
                        "tileset `{}`: tile {id} defined more than once, keeping the later definition",
                        tileset.name
                    );
                }
            }
            "wangsets" => {
                for set_node in child.children().filter(Node::is_element) {
                    if set_node.has_tag_name("wangset") {
                        tileset.wang_sets.push(read_wang_set(set_node)?);
                    } else {
                        log::debug!(
                            "skipping unknown element <{}> in <wangsets>",
                            set_node.tag_name().name()
                        );
                    }
                }
            }
            other => log::debug!("skipping unknown element <{other}> in <tileset>"),
        }
    }
    Ok(tileset)
}

fn read_image(node: Node) -> Result<Image, TsxError> {
    Ok(Image {
        source: require_attr(node, "image", "source")?.to_string(),
        width: parse_attr(node, "image", "width")?,
        height: parse_attr(node, "image", "height")?,
    })
}

fn read_tile(node: Node) -> Result<Tile, TsxError> {
    let id = TileId(parse_attr(node, "tile", "id")?);
    let mut tile = Tile::new(id);
    // Only present in newer document revisions
    if node.attribute("probability").is_some() {
        tile.probability = parse_attr(node, "tile", "probability")?;
    }

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "properties" => read_properties(child, id, &mut tile.properties)?,
            "objectgroup" => read_object_group(child, &mut tile.markers)?,
            other => log::debug!("tile {id}: skipping unknown element <{other}>"),
        }
    }
    Ok(tile)
}

fn read_properties(node: Node, tile: TileId, properties: &mut Properties) -> Result<(), TsxError> {
    for child in node.children().filter(Node::is_element) {
        if !child.has_tag_name("property") {
            log::debug!(
                "tile {tile}: skipping unknown element <{}> in <properties>",
                child.tag_name().name()
            );
            continue;
        }
        let name = require_attr(child, "property", "name")?;
        // Multiline string values are stored as element text instead of the
        // `value` attribute
        let raw = child.attribute("value").or_else(|| child.text()).unwrap_or("");
        let value = PropertyValue::from_typed(child.attribute("type"), raw)
            .map_err(|source| TsxError::Property { tile, source })?;
        properties.insert(name, value);
    }
    Ok(())
}

fn read_object_group(node: Node, markers: &mut Vec<MarkerObject>) -> Result<(), TsxError> {
    for child in node.children().filter(Node::is_element) {
        if !child.has_tag_name("object") {
            log::debug!(
                "skipping unknown element <{}> in <objectgroup>",
                child.tag_name().name()
            );
            continue;
        }
        let id = parse_attr(child, "object", "id")?;
        let x = parse_attr(child, "object", "x")?;
        let y = parse_attr(child, "object", "y")?;
        let width = parse_attr_or(child, "object", "width", 0.0)?;
        let height = parse_attr_or(child, "object", "height", 0.0)?;

        // An object with no shape child is a plain rectangle
        let mut shape = MarkerShape::Rect { width, height };
        for shape_node in child.children().filter(Node::is_element) {
            match shape_node.tag_name().name() {
                "point" => shape = MarkerShape::Point,
                "ellipse" => shape = MarkerShape::Ellipse { width, height },
                other => log::debug!("object {id}: skipping unknown element <{other}>"),
            }
        }
        markers.push(MarkerObject { id, x, y, shape });
    }
    Ok(())
}

fn read_wang_set(node: Node) -> Result<WangSet, TsxError> {
    let name = require_attr(node, "wangset", "name")?.to_string();
    let kind = WangSetKind::from_str(require_attr(node, "wangset", "type")?).map_err(|source| {
        TsxError::WangSet {
            set: name.clone(),
            source,
        }
    })?;

    let mut set = WangSet::new(name, kind);
    set.tile = tile_ref(node, "wangset")?;

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "wangcolor" => {
                let color_name = require_attr(child, "wangcolor", "name")?;
                let raw_color = require_attr(child, "wangcolor", "color")?;
                let color = raw_color.parse().map_err(|_| TsxError::InvalidAttribute {
                    element: "wangcolor",
                    attribute: "color",
                    value: raw_color.to_string(),
                })?;
                let mut wang_color = WangColor::new(color_name, color);
                wang_color.tile = tile_ref(child, "wangcolor")?;
                wang_color.probability = parse_attr_or(child, "wangcolor", "probability", 1.0)?;
                set.colors.push(wang_color);
            }
            "wangtile" => {
                let tile = TileId(parse_attr(child, "wangtile", "tileid")?);
                let raw = require_attr(child, "wangtile", "wangid")?;
                let wang_id = WangId::from_list(raw)
                    .map_err(|source| TsxError::WangTile { tile, source })?;
                if set.tiles.insert(tile, wang_id).is_some() {
                    log::warn!(
                        "wang set `{}`: tile {tile} assigned more than once, keeping the later signature",
                        set.name
                    );
                }
            }
            other => log::debug!(
                "wang set `{}`: skipping unknown element <{other}>",
                set.name
            ),
        }
    }
    Ok(set)
}

/// The `tile` attribute of wang elements holds `-1` for "no representative"
fn tile_ref(node: Node, element: &'static str) -> Result<Option<TileId>, TsxError> {
    match node.attribute("tile") {
        None => Ok(None),
        Some(raw) => {
            let value: i64 = raw.parse().map_err(|_| TsxError::InvalidAttribute {
                element,
                attribute: "tile",
                value: raw.to_string(),
            })?;
            Ok(u32::try_from(value).ok().map(TileId))
        }
    }
}

fn require_attr<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, TsxError> {
    node.attribute(attribute)
        .ok_or(TsxError::MissingAttribute { element, attribute })
}

fn parse_attr<T: FromStr>(
    node: Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<T, TsxError> {
    let raw = require_attr(node, element, attribute)?;
    raw.parse().map_err(|_| TsxError::InvalidAttribute {
        element,
        attribute,
        value: raw.to_string(),
    })
}

fn parse_attr_or<T: FromStr>(
    node: Node,
    element: &'static str,
    attribute: &'static str,
    default: T,
) -> Result<T, TsxError> {
    match node.attribute(attribute) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| TsxError::InvalidAttribute {
            element,
            attribute,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiledef_core::{Corner, TerrainTags, TileShape, WangParseError};

    const SHAPE_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.10.1" name="shape" tilewidth="16" tileheight="16" tilecount="1024" columns="32" tilerendersize="grid">
 <image source="shape.png" width="512" height="512"/>
 <tile id="66">
  <properties>
   <property name="cliff" value="n"/>
   <property name="reset" type="bool" value="true"/>
   <property name="shape" value="floor-nw"/>
  </properties>
 </tile>
 <tile id="72">
  <properties>
   <property name="cliff" value="new"/>
   <property name="reset" type="bool" value="true"/>
   <property name="shape" value="floor"/>
  </properties>
  <objectgroup draworder="index" id="3">
   <object id="2" x="6.28437" y="4.27337">
    <point/>
   </object>
   <object id="3" x="8.37916" y="12.3174">
    <ellipse/>
   </object>
  </objectgroup>
 </tile>
</tileset>
"#;

    const FOREST_DOC: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.10.1" name="spring_forest" tilewidth="16" tileheight="16" tilecount="672" columns="32">
 <image source="spring_forest.png" width="512" height="336"/>
 <tile id="33">
  <properties>
   <property name="is_grass" type="bool" value="true"/>
  </properties>
 </tile>
 <wangsets>
  <wangset name="grass_set" type="corner" tile="-1">
   <wangcolor name="dark_path" color="#ff0000" tile="-1" probability="1"/>
   <wangcolor name="dirt_path" color="#00ff00" tile="-1" probability="1"/>
   <wangcolor name="cobble_path" color="#0000ff" tile="-1" probability="1"/>
   <wangcolor name="grass" color="#ff7700" tile="-1" probability="1"/>
   <wangcolor name="flowers" color="#00e9ff" tile="-1" probability="1"/>
   <wangtile tileid="1" wangid="0,0,0,1,0,0,0,0"/>
   <wangtile tileid="32" wangid="0,4,0,4,0,4,0,4"/>
   <wangtile tileid="197" wangid="0,5,0,5,0,5,0,5"/>
  </wangset>
 </wangsets>
</tileset>
"##;

    // Second revision drift: probability attributes on tiles, a different
    // wang color roster
    const FOREST_DOC_REV2: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.10.2" name="spring_forest" tilewidth="16" tileheight="16" tilecount="672" columns="32">
 <image source="spring_forest.png" width="512" height="336"/>
 <tile id="33" probability="0.5">
  <properties>
   <property name="is_grass" type="bool" value="true"/>
  </properties>
 </tile>
 <wangsets>
  <wangset name="grass_set" type="corner" tile="-1">
   <wangcolor name="path" color="#ff0000" tile="-1" probability="1"/>
   <wangcolor name="grass" color="#ff7700" tile="4" probability="0.2"/>
   <wangtile tileid="1" wangid="0,0,0,1,0,0,0,0"/>
   <wangtile tileid="32" wangid="0,2,0,2,0,2,0,2"/>
  </wangset>
 </wangsets>
</tileset>
"##;

    #[test]
    fn test_parse_shape_document() {
        let tileset = parse_tileset(SHAPE_DOC).unwrap();
        assert_eq!(tileset.name, "shape");
        assert_eq!(tileset.version.as_deref(), Some("1.10"));
        assert_eq!(tileset.tile_count, 1024);
        assert_eq!(tileset.columns, 32);
        assert_eq!(tileset.render_size.as_deref(), Some("grid"));

        let image = tileset.image.as_ref().unwrap();
        assert_eq!(image.source, "shape.png");
        assert_eq!((image.width, image.height), (512, 512));

        let tile = tileset.tile(TileId(66)).unwrap();
        let tags = TerrainTags::from_properties(&tile.properties).unwrap();
        assert_eq!(tags.shape, TileShape::FloorNW);
        assert!(tags.reset);
        assert!(tile.markers.is_empty());
    }

    #[test]
    fn test_parse_markers() {
        let tileset = parse_tileset(SHAPE_DOC).unwrap();
        let markers = &tileset.tile(TileId(72)).unwrap().markers;
        assert_eq!(markers.len(), 2);
        assert!(markers[0].is_point());
        assert_eq!(markers[0].x, 6.28437);
        assert!(matches!(markers[1].shape, MarkerShape::Ellipse { .. }));
    }

    #[test]
    fn test_parse_wang_sets() {
        let tileset = parse_tileset(FOREST_DOC).unwrap();
        let set = tileset.wang_set("grass_set").unwrap();
        assert_eq!(set.kind, WangSetKind::Corner);
        assert_eq!(set.tile, None);
        assert_eq!(set.colors.len(), 5);
        assert_eq!(set.colors[3].name, "grass");

        let id = set.wang_id_of(TileId(1)).unwrap();
        assert_eq!(id.corner(Corner::BottomRight), 1);
        assert_eq!(set.uniform_tiles(4), vec![TileId(32)]);
    }

    #[test]
    fn test_both_revisions_are_accepted() {
        let rev1 = parse_tileset(FOREST_DOC).unwrap();
        let rev2 = parse_tileset(FOREST_DOC_REV2).unwrap();

        assert_eq!(rev1.tile(TileId(33)).unwrap().probability(), 1.0);
        assert_eq!(rev2.tile(TileId(33)).unwrap().probability(), 0.5);

        let set = rev2.wang_set("grass_set").unwrap();
        assert_eq!(set.colors.len(), 2);
        assert_eq!(set.colors[1].probability, 0.2);
        assert_eq!(set.colors[1].tile, Some(TileId(4)));
    }

    #[test]
    fn test_unexpected_root_is_rejected() {
        let err = parse_tileset("<map version=\"1.10\"/>").unwrap_err();
        assert!(matches!(err, TsxError::UnexpectedRoot(name) if name == "map"));
    }

    #[test]
    fn test_missing_attribute() {
        let err = parse_tileset(
            "<tileset name=\"t\" tilewidth=\"16\" tileheight=\"16\" columns=\"4\"/>",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TsxError::MissingAttribute {
                element: "tileset",
                attribute: "tilecount",
            }
        ));
    }

    #[test]
    fn test_bad_wangid_is_rejected() {
        let doc = r##"<tileset name="t" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <wangsets>
  <wangset name="w" type="corner" tile="-1">
   <wangcolor name="a" color="#ff0000" tile="-1" probability="1"/>
   <wangtile tileid="1" wangid="0,0,0,1"/>
  </wangset>
 </wangsets>
</tileset>"##;
        let err = parse_tileset(doc).unwrap_err();
        assert!(matches!(
            err,
            TsxError::WangTile {
                tile: TileId(1),
                source: WangParseError::Arity(4),
            }
        ));
    }

    #[test]
    fn test_duplicate_tile_keeps_later_definition() {
        let doc = r#"<tileset name="t" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <tile id="1">
  <properties><property name="shape" value="floor"/></properties>
 </tile>
 <tile id="1">
  <properties><property name="shape" value="wall"/></properties>
 </tile>
</tileset>"#;
        let tileset = parse_tileset(doc).unwrap();
        assert_eq!(tileset.tiles.len(), 1);
        let tile = tileset.tile(TileId(1)).unwrap();
        assert_eq!(tile.properties.get_str("shape"), Some("wall"));
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let doc = r#"<tileset name="t" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <grid orientation="orthogonal" width="1" height="1"/>
 <tile id="0">
  <animation><frame tileid="1" duration="100"/></animation>
 </tile>
</tileset>"#;
        let tileset = parse_tileset(doc).unwrap();
        assert!(tileset.tile(TileId(0)).unwrap().properties.is_empty());
    }
}
