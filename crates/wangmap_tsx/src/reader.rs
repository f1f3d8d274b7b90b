//! Event-driven `.tsx` parsing.
//!
//! The document is read in a single pass with quick-xml. A stack of open
//! element names decides which handler an element belongs to, so unknown
//! elements (and everything nested inside them) are skipped.

use crate::TsxError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use wangmap_core::{
    Color, InvalidAssetData, TileType, Tileset, TilesetImage, WangColor, WangId, WangSet,
    WangSetType,
};

/// Load a tileset from a `.tsx` file.
pub fn load_tileset(path: &Path) -> Result<Tileset, TsxError> {
    let bytes = std::fs::read(path)?;
    let tileset = load_tileset_from_bytes(&bytes)?;
    info!(
        path = %path.display(),
        tileset = %tileset.name,
        "loaded tileset file"
    );
    Ok(tileset)
}

/// Load a tileset from the raw bytes of a `.tsx` document.
pub fn load_tileset_from_bytes(bytes: &[u8]) -> Result<Tileset, TsxError> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| TsxError::Xml(format!("invalid UTF-8: {}", e)))?;
    parse_tileset(xml)
}

/// Parse and validate a tileset from a `.tsx` document.
pub fn parse_tileset(xml: &str) -> Result<Tileset, TsxError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut state = ParseState::default();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let element = Element::parse(e)?;
                state.open(&element, stack.last().map(String::as_str))?;
                stack.push(element.name);
            }
            Ok(Event::Empty(ref e)) => {
                let element = Element::parse(e)?;
                state.open(&element, stack.last().map(String::as_str))?;
                state.close(&element.name);
            }
            Ok(Event::End(_)) => {
                if let Some(name) = stack.pop() {
                    state.close(&name);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TsxError::Xml(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    let tileset = state
        .tileset
        .ok_or_else(|| TsxError::MissingElement("tileset".to_string()))?;
    tileset.validate()?;

    info!(
        tileset = %tileset.name,
        tile_count = tileset.tile_count,
        wang_sets = tileset.wang_sets.len(),
        "parsed tileset"
    );
    Ok(tileset)
}

/// Accumulates the tileset while the document is walked.
#[derive(Default)]
struct ParseState {
    tileset: Option<Tileset>,
    wang_set: Option<WangSet>,
}

impl ParseState {
    fn open(&mut self, element: &Element, parent: Option<&str>) -> Result<(), TsxError> {
        match (parent, element.name.as_str()) {
            (None, "tileset") => {
                self.tileset = Some(parse_tileset_element(element)?);
            }
            (Some("tileset"), "image") => {
                let image = TilesetImage {
                    source: element.required("source")?,
                    width: element.optional("width")?.unwrap_or(0),
                    height: element.optional("height")?.unwrap_or(0),
                };
                self.tileset_mut()?.image = Some(image);
            }
            (Some("tileset"), "tile") => {
                let id: u32 = element.required("id")?;
                // Tiled 1.9+ writes `class`, older versions write `type`
                let tile_type = match element.attr("type").or_else(|| element.attr("class")) {
                    Some("") | None => TileType::Empty,
                    Some(name) => name.parse::<TileType>()?,
                };
                let probability: Option<f32> = element.optional("probability")?;

                let tileset = self.tileset_mut()?;
                tileset.set_tile_type(id, tile_type)?;
                if let Some(p) = probability {
                    tileset.set_tile_probability(id, p)?;
                }
            }
            (Some("wangsets"), "wangset") => {
                let set_type: WangSetType = element.required_with("type", str::parse)?;
                let mut wang_set = WangSet::new(element.attr("name").unwrap_or("").to_string(), set_type);
                wang_set.tile = element.optional_tile("tile")?;
                self.wang_set = Some(wang_set);
            }
            (Some("wangset"), "wangcolor") => {
                let color = WangColor {
                    name: element.attr("name").unwrap_or("").to_string(),
                    color: element.required_with("color", Color::from_hex)?,
                    tile: element.optional_tile("tile")?,
                    probability: element.optional("probability")?.unwrap_or(1.0),
                };
                self.wang_set_mut()?.add_color(color);
            }
            (Some("wangset"), "wangtile") => {
                let tile_id: u32 = element.required("tileid")?;
                let wang_id: WangId = element.required_with("wangid", str::parse)?;
                self.wang_set_mut()?.add_tile(tile_id, wang_id);
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &str) {
        if name != "wangset" {
            return;
        }
        if let (Some(wang_set), Some(tileset)) = (self.wang_set.take(), self.tileset.as_mut()) {
            debug!(
                wang_set = %wang_set.name,
                colors = wang_set.colors.len(),
                tiles = wang_set.tiles.len(),
                "parsed wangset"
            );
            tileset.add_wang_set(wang_set);
        }
    }

    fn tileset_mut(&mut self) -> Result<&mut Tileset, TsxError> {
        self.tileset
            .as_mut()
            .ok_or_else(|| TsxError::MissingElement("tileset".to_string()))
    }

    fn wang_set_mut(&mut self) -> Result<&mut WangSet, TsxError> {
        self.wang_set
            .as_mut()
            .ok_or_else(|| TsxError::MissingElement("wangset".to_string()))
    }
}

fn parse_tileset_element(element: &Element) -> Result<Tileset, TsxError> {
    let tile_count: u32 = element.required("tilecount")?;
    let columns: u32 = element.optional("columns")?.unwrap_or(0);
    Ok(Tileset::new(
        element.attr("name").unwrap_or("").to_string(),
        element.required("tilewidth")?,
        element.required("tileheight")?,
        tile_count,
        columns,
    ))
}

/// An element name with its unescaped attributes.
struct Element {
    name: String,
    attrs: HashMap<String, String>,
}

impl Element {
    fn parse(e: &BytesStart) -> Result<Self, TsxError> {
        let name = std::str::from_utf8(e.name().as_ref())
            .map_err(|err| TsxError::Xml(format!("invalid UTF-8: {}", err)))?
            .to_string();

        let mut attrs = HashMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| TsxError::Xml(format!("attribute error: {}", err)))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|err| TsxError::Xml(format!("invalid UTF-8 in attribute key: {}", err)))?
                .to_string();
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|err| TsxError::Xml(format!("invalid UTF-8 in attribute value: {}", err)))?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(|err| TsxError::Xml(format!("attribute '{}': {}", key, err)))?;
            attrs.insert(key, value.into_owned());
        }

        Ok(Self { name, attrs })
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn invalid(&self, attribute: &str, value: &str) -> TsxError {
        TsxError::InvalidAttribute {
            element: self.name.clone(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    fn required<T: FromStr>(&self, attribute: &str) -> Result<T, TsxError> {
        self.optional(attribute)?
            .ok_or_else(|| TsxError::MissingAttribute {
                element: self.name.clone(),
                attribute: attribute.to_string(),
            })
    }

    fn optional<T: FromStr>(&self, attribute: &str) -> Result<Option<T>, TsxError> {
        self.attr(attribute)
            .map(|value| value.trim().parse().map_err(|_| self.invalid(attribute, value)))
            .transpose()
    }

    /// Required attribute whose parser reports asset-level errors
    fn required_with<T>(
        &self,
        attribute: &str,
        parse: impl FnOnce(&str) -> Result<T, InvalidAssetData>,
    ) -> Result<T, TsxError> {
        let value = self.attr(attribute).ok_or_else(|| TsxError::MissingAttribute {
            element: self.name.clone(),
            attribute: attribute.to_string(),
        })?;
        Ok(parse(value)?)
    }

    /// Tile reference where `-1` means "no tile"
    fn optional_tile(&self, attribute: &str) -> Result<Option<u32>, TsxError> {
        match self.optional::<i64>(attribute)? {
            None | Some(-1) => Ok(None),
            Some(id) => u32::try_from(id).map(Some).map_err(|_| {
                InvalidAssetData::TileOutOfRange {
                    context: format!("<{}> attribute '{}'", self.name, attribute),
                    id,
                    tile_count: 0,
                }
                .into()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.11.0" name="Small" tilewidth="12" tileheight="12" tilecount="8" columns="4">
 <image source="../graphics/small.png" width="48" height="24"/>
 <tile id="0" type="Wall"/>
 <tile id="1" class="Ledge" probability="0.5">
  <properties>
   <property name="type" value="Water"/>
  </properties>
 </tile>
 <tile id="2" type=""/>
 <wangsets>
  <wangset name="Walls" type="edge" tile="-1">
   <wangcolor name="Wall" color="#ff0000" tile="0" probability="1"/>
   <wangcolor name="Ledge" color="#00ff00" tile="-1" probability="2.5"/>
   <wangtile tileid="0" wangid="0,0,1,0,1,0,0,0"/>
   <wangtile tileid="1" wangid="0,0,2,0,0,0,2,0"/>
  </wangset>
 </wangsets>
</tileset>
"##;

    #[test]
    fn test_parse_small_tileset() {
        let tileset = parse_tileset(SMALL).unwrap();

        assert_eq!(tileset.name, "Small");
        assert_eq!(tileset.tile_count, 8);
        assert_eq!(tileset.columns, 4);
        assert_eq!(tileset.image.as_ref().map(|i| i.width), Some(48));
        assert_eq!(tileset.tile_type(0), TileType::Wall);
        assert_eq!(tileset.tile_type(1), TileType::Ledge);
        assert_eq!(tileset.tile_type(2), TileType::Empty);
        assert_eq!(tileset.tile_type(3), TileType::Empty);
        assert_eq!(tileset.tile_probability(1), 0.5);
    }

    #[test]
    fn test_parse_wangset() {
        let tileset = parse_tileset(SMALL).unwrap();
        let set = tileset.wang_set("Walls").unwrap();

        assert_eq!(set.set_type, WangSetType::Edge);
        assert_eq!(set.tile, None);
        assert_eq!(set.colors.len(), 2);
        assert_eq!(set.colors[0].tile, Some(0));
        assert_eq!(set.colors[1].tile, None);
        assert_eq!(set.colors[1].probability, 2.5);
        assert_eq!(set.colors[0].color, Color::RED);
        assert_eq!(
            set.wang_id_of(1),
            Some(WangId::new([0, 0, 2, 0, 0, 0, 2, 0]))
        );
    }

    #[test]
    fn test_unknown_tile_type_rejected() {
        let xml = r#"<tileset name="T" tilewidth="8" tileheight="8" tilecount="2" columns="2">
 <tile id="0" type="Lava"/>
</tileset>"#;

        assert!(matches!(
            parse_tileset(xml),
            Err(TsxError::Asset(InvalidAssetData::UnknownTileType(ref t))) if t == "Lava"
        ));
    }

    #[test]
    fn test_short_wangid_rejected() {
        let xml = r##"<tileset name="T" tilewidth="8" tileheight="8" tilecount="2" columns="2">
 <wangsets>
  <wangset name="W" type="edge" tile="0">
   <wangcolor name="A" color="#ff0000" tile="0" probability="1"/>
   <wangtile tileid="0" wangid="0,0,1,0"/>
  </wangset>
 </wangsets>
</tileset>"##;

        assert!(matches!(
            parse_tileset(xml),
            Err(TsxError::Asset(InvalidAssetData::WangIdLength(4)))
        ));
    }

    #[test]
    fn test_wangtile_out_of_range_rejected() {
        let xml = r##"<tileset name="T" tilewidth="8" tileheight="8" tilecount="2" columns="2">
 <wangsets>
  <wangset name="W" type="edge" tile="0">
   <wangcolor name="A" color="#ff0000" tile="0" probability="1"/>
   <wangtile tileid="2" wangid="0,0,1,0,0,0,0,0"/>
  </wangset>
 </wangsets>
</tileset>"##;

        assert!(matches!(
            parse_tileset(xml),
            Err(TsxError::Asset(InvalidAssetData::TileOutOfRange { id: 2, .. }))
        ));
    }

    #[test]
    fn test_dangling_color_rejected() {
        let xml = r##"<tileset name="T" tilewidth="8" tileheight="8" tilecount="2" columns="2">
 <wangsets>
  <wangset name="W" type="edge" tile="0">
   <wangcolor name="A" color="#ff0000" tile="0" probability="1"/>
   <wangtile tileid="1" wangid="0,0,2,0,0,0,0,0"/>
  </wangset>
 </wangsets>
</tileset>"##;

        assert!(matches!(
            parse_tileset(xml),
            Err(TsxError::Asset(InvalidAssetData::DanglingColor { color: 2, .. }))
        ));
    }

    #[test]
    fn test_missing_tilecount() {
        let xml = r#"<tileset name="T" tilewidth="8" tileheight="8" columns="2"/>"#;

        assert!(matches!(
            parse_tileset(xml),
            Err(TsxError::MissingAttribute { ref attribute, .. }) if attribute == "tilecount"
        ));
    }

    #[test]
    fn test_invalid_number() {
        let xml = r#"<tileset name="T" tilewidth="wide" tileheight="8" tilecount="2" columns="2"/>"#;

        assert!(matches!(
            parse_tileset(xml),
            Err(TsxError::InvalidAttribute { ref attribute, ref value, .. })
                if attribute == "tilewidth" && value == "wide"
        ));
    }

    #[test]
    fn test_not_a_tileset() {
        assert!(matches!(
            parse_tileset("<map/>"),
            Err(TsxError::MissingElement(ref e)) if e == "tileset"
        ));
    }

    #[test]
    fn test_malformed_xml() {
        let xml = r#"<tileset name="T" tilewidth="8" tileheight="8" tilecount="2"><tile id="0"></tileset>"#;
        assert!(matches!(parse_tileset(xml), Err(TsxError::Xml(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_tileset(&dir.path().join("Missing.tsx"));
        assert!(matches!(result, Err(TsxError::Io(_))));
    }

    #[test]
    fn test_escaped_names() {
        let xml = r#"<tileset name="Rock &amp; Roll" tilewidth="8" tileheight="8" tilecount="1" columns="1"/>"#;
        assert_eq!(parse_tileset(xml).unwrap().name, "Rock & Roll");
    }
}
