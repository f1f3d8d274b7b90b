//! Tileset configuration with per-tile definitions and Wang sets

use crate::{InvalidAssetData, WangSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gameplay class of a tile, taken from the `type` (or `class`) attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileType {
    Wall,
    Ledge,
    Water,
    Grass,
    Rock,
    Cloud,
    Border,
    /// Tiles without a declared type
    #[default]
    Empty,
}

impl TileType {
    pub const ALL: [TileType; 8] = [
        TileType::Wall,
        TileType::Ledge,
        TileType::Water,
        TileType::Grass,
        TileType::Rock,
        TileType::Cloud,
        TileType::Border,
        TileType::Empty,
    ];

    /// Name as written in the tileset file
    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Wall => "Wall",
            TileType::Ledge => "Ledge",
            TileType::Water => "Water",
            TileType::Grass => "Grass",
            TileType::Rock => "Rock",
            TileType::Cloud => "Cloud",
            TileType::Border => "Border",
            TileType::Empty => "Empty",
        }
    }
}

impl FromStr for TileType {
    type Err = InvalidAssetData;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidAssetData::UnknownTileType(s.to_string()))
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tile of a tileset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub id: u32,
    #[serde(default)]
    pub tile_type: TileType,
    /// Relative weight when this tile competes with variants of the same signature
    #[serde(default = "default_probability")]
    pub probability: f32,
}

fn default_probability() -> f32 {
    1.0
}

impl TileDefinition {
    pub fn new(id: u32, tile_type: TileType) -> Self {
        Self {
            id,
            tile_type,
            probability: 1.0,
        }
    }
}

/// The atlas image a tileset slices its tiles from (never decoded here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetImage {
    /// Path to the image file, relative to the tileset file
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Tileset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TilesetImage>,
    /// One definition per tile; `tiles[i].id == i`
    pub tiles: Vec<TileDefinition>,
    #[serde(default)]
    pub wang_sets: Vec<WangSet>,
}

impl Tileset {
    /// Create a tileset whose tiles are all `Empty`
    pub fn new(name: String, tile_width: u32, tile_height: u32, tile_count: u32, columns: u32) -> Self {
        Self {
            name,
            tile_width,
            tile_height,
            tile_count,
            columns,
            image: None,
            tiles: (0..tile_count)
                .map(|id| TileDefinition::new(id, TileType::Empty))
                .collect(),
            wang_sets: Vec::new(),
        }
    }

    pub fn contains_tile(&self, id: u32) -> bool {
        id < self.tile_count
    }

    pub fn tile(&self, id: u32) -> Option<&TileDefinition> {
        self.tiles.get(id as usize)
    }

    /// Type of a tile (`Empty` for ids outside the tileset)
    pub fn tile_type(&self, id: u32) -> TileType {
        self.tile(id).map(|t| t.tile_type).unwrap_or_default()
    }

    /// Selection weight of a tile (1.0 for ids outside the tileset)
    pub fn tile_probability(&self, id: u32) -> f32 {
        self.tile(id).map(|t| t.probability).unwrap_or(1.0)
    }

    pub fn set_tile_type(&mut self, id: u32, tile_type: TileType) -> Result<(), InvalidAssetData> {
        let tile = self.tile_mut(id, "tile")?;
        tile.tile_type = tile_type;
        Ok(())
    }

    pub fn set_tile_probability(&mut self, id: u32, probability: f32) -> Result<(), InvalidAssetData> {
        let tile = self.tile_mut(id, "tile")?;
        tile.probability = probability;
        Ok(())
    }

    fn tile_mut(&mut self, id: u32, context: &str) -> Result<&mut TileDefinition, InvalidAssetData> {
        let tile_count = self.tile_count;
        self.tiles
            .get_mut(id as usize)
            .ok_or_else(|| InvalidAssetData::TileOutOfRange {
                context: context.to_string(),
                id: id as i64,
                tile_count,
            })
    }

    /// Number of atlas rows
    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            0
        } else {
            self.tile_count.div_ceil(self.columns)
        }
    }

    /// Convert a tile id to (column, row) within the atlas
    pub fn tile_to_grid(&self, id: u32) -> Option<(u32, u32)> {
        if !self.contains_tile(id) || self.columns == 0 {
            return None;
        }
        Some((id % self.columns, id / self.columns))
    }

    pub fn add_wang_set(&mut self, wang_set: WangSet) {
        self.wang_sets.push(wang_set);
    }

    /// Get a Wang set by name
    pub fn wang_set(&self, name: &str) -> Option<&WangSet> {
        self.wang_sets.iter().find(|ws| ws.name == name)
    }

    /// Check every tile reference and Wang set in this tileset
    pub fn validate(&self) -> Result<(), InvalidAssetData> {
        crate::validate_tileset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, WangColor, WangId, WangSetType};

    #[test]
    fn test_tile_type_parse() {
        assert_eq!("Wall".parse::<TileType>(), Ok(TileType::Wall));
        assert_eq!("Water".parse::<TileType>(), Ok(TileType::Water));
        assert_eq!(
            "Lava".parse::<TileType>(),
            Err(InvalidAssetData::UnknownTileType("Lava".to_string()))
        );
        // Names are case-sensitive, as written by the editor
        assert!("wall".parse::<TileType>().is_err());
    }

    #[test]
    fn test_new_tileset_is_empty() {
        let tileset = Tileset::new("Walls".to_string(), 12, 12, 120, 12);

        assert_eq!(tileset.tiles.len(), 120);
        assert_eq!(tileset.tile_type(5), TileType::Empty);
        assert_eq!(tileset.tile_type(500), TileType::Empty);
        assert_eq!(tileset.rows(), 10);
    }

    #[test]
    fn test_set_tile_type() {
        let mut tileset = Tileset::new("Walls".to_string(), 12, 12, 16, 4);
        tileset.set_tile_type(4, TileType::Ledge).unwrap();
        tileset.set_tile_probability(4, 0.25).unwrap();

        assert_eq!(tileset.tile_type(4), TileType::Ledge);
        assert_eq!(tileset.tile_probability(4), 0.25);
        assert!(matches!(
            tileset.set_tile_type(16, TileType::Wall),
            Err(InvalidAssetData::TileOutOfRange { id: 16, tile_count: 16, .. })
        ));
    }

    #[test]
    fn test_tile_to_grid() {
        let tileset = Tileset::new("Walls".to_string(), 12, 12, 120, 12);

        assert_eq!(tileset.tile_to_grid(0), Some((0, 0)));
        assert_eq!(tileset.tile_to_grid(13), Some((1, 1)));
        assert_eq!(tileset.tile_to_grid(119), Some((11, 9)));
        assert_eq!(tileset.tile_to_grid(120), None);
    }

    fn sample_tileset() -> Tileset {
        let mut tileset = Tileset::new("Walls".to_string(), 12, 12, 4, 2);
        tileset.set_tile_type(1, TileType::Ledge).unwrap();
        tileset.set_tile_probability(1, 0.5).unwrap();

        let mut set = WangSet::new("Walls".to_string(), WangSetType::Edge);
        set.add_color(WangColor::new("Wall".to_string(), Color::RED).with_tile(0));
        set.add_color(WangColor::new("Ledge".to_string(), Color::GREEN).with_probability(2.5));
        set.add_tile(0, WangId::new([0, 0, 1, 0, 1, 0, 0, 0]));
        set.add_tile(1, WangId::new([0, 0, 2, 0, 0, 0, 2, 0]));
        tileset.add_wang_set(set);
        tileset
    }

    #[test]
    fn test_json_round_trip() {
        let tileset = sample_tileset();

        let json = serde_json::to_string(&tileset).unwrap();
        let restored: Tileset = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tileset);
        assert_eq!(restored.tile_probability(1), 0.5);
    }

    #[test]
    fn test_json_skips_missing_tiles() {
        let value = serde_json::to_value(sample_tileset()).unwrap();

        assert!(value.get("image").is_none());
        let set = &value["wang_sets"][0];
        assert!(set.get("tile").is_none());
        assert_eq!(set["colors"][0]["tile"], 0);
        assert!(set["colors"][1].get("tile").is_none());
    }

    #[test]
    fn test_json_defaults() {
        let tile: TileDefinition = serde_json::from_str(r#"{ "id": 3 }"#).unwrap();
        assert_eq!(tile, TileDefinition::new(3, TileType::Empty));

        let mut color = serde_json::to_value(WangColor::new("Wall".to_string(), Color::RED)).unwrap();
        color.as_object_mut().unwrap().remove("probability");
        let color: WangColor = serde_json::from_value(color).unwrap();
        assert_eq!(color.probability, 1.0);
        assert_eq!(color.tile, None);

        let tileset: Tileset = serde_json::from_str(
            r#"{ "name": "T", "tile_width": 8, "tile_height": 8, "tile_count": 0, "columns": 0, "tiles": [] }"#,
        )
        .unwrap();
        assert!(tileset.wang_sets.is_empty());
        assert_eq!(tileset.image, None);
    }
}
