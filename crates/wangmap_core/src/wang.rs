//! Wang set types
//!
//! A Wang set assigns each tile an 8-position signature describing which
//! terrain class touches each of its edges and corners. Positions follow
//! Tiled's indexing, clockwise from the top edge:
//!
//! ```text
//!   7|0|1
//!   6|X|2
//!   5|4|3
//! ```
//!
//! Even indices (0,2,4,6) are edges (Top, Right, Bottom, Left), odd indices
//! (1,3,5,7) are corners (TopRight, BottomRight, BottomLeft, TopLeft).

use crate::{Color, InvalidAssetData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Terrain color index within a Wang set (0 = unassigned, 1+ = color number)
pub type ColorIndex = u8;

/// One of the 8 positions around a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WangPosition {
    Top = 0,
    TopRight = 1,
    Right = 2,
    BottomRight = 3,
    Bottom = 4,
    BottomLeft = 5,
    Left = 6,
    TopLeft = 7,
}

impl WangPosition {
    /// All positions in signature order
    pub const ALL: [WangPosition; 8] = [
        WangPosition::Top,
        WangPosition::TopRight,
        WangPosition::Right,
        WangPosition::BottomRight,
        WangPosition::Bottom,
        WangPosition::BottomLeft,
        WangPosition::Left,
        WangPosition::TopLeft,
    ];

    /// Create from index (wraps modulo 8)
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 8]
    }

    /// Index into a [`WangId`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position on the neighbor that faces this one
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// Odd positions are corners
    pub fn is_corner(self) -> bool {
        self.index() % 2 == 1
    }

    /// Next position clockwise
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous position counter-clockwise
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + 7)
    }

    /// Grid offset of the neighbor in this direction (y-down, row 0 at the top)
    pub fn offset(self) -> (i32, i32) {
        match self {
            WangPosition::Top => (0, -1),
            WangPosition::TopRight => (1, -1),
            WangPosition::Right => (1, 0),
            WangPosition::BottomRight => (1, 1),
            WangPosition::Bottom => (0, 1),
            WangPosition::BottomLeft => (-1, 1),
            WangPosition::Left => (-1, 0),
            WangPosition::TopLeft => (-1, -1),
        }
    }
}

/// The terrain signature of a tile: one color per position
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WangId(pub [ColorIndex; 8]);

impl WangId {
    /// All positions unassigned
    pub const WILDCARD: Self = WangId([0; 8]);

    pub const fn new(colors: [ColorIndex; 8]) -> Self {
        WangId(colors)
    }

    /// Create a WangId with all positions set to one color
    pub const fn filled(color: ColorIndex) -> Self {
        WangId([color; 8])
    }

    pub fn color(&self, position: WangPosition) -> ColorIndex {
        self.0[position.index()]
    }

    pub fn set(&mut self, position: WangPosition, color: ColorIndex) {
        self.0[position.index()] = color;
    }

    pub fn colors(&self) -> &[ColorIndex; 8] {
        &self.0
    }

    /// True when no position carries a color
    pub fn is_wildcard(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Highest color index referenced
    pub fn max_color(&self) -> ColorIndex {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Clear every position the given set type does not use
    pub fn masked(&self, set_type: WangSetType) -> Self {
        let mut out = *self;
        for position in WangPosition::ALL {
            if !set_type.is_active(position) {
                out.set(position, 0);
            }
        }
        out
    }
}

impl FromStr for WangId {
    type Err = InvalidAssetData;

    /// Parse Tiled's `wangid` attribute: exactly 8 comma-separated integers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 8 {
            return Err(InvalidAssetData::WangIdLength(parts.len()));
        }

        let mut colors = [0u8; 8];
        for (slot, part) in colors.iter_mut().zip(parts) {
            *slot = part
                .parse()
                .map_err(|_| InvalidAssetData::WangIdEntry(part.to_string()))?;
        }
        Ok(WangId(colors))
    }
}

impl fmt::Display for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Type of Wang set - determines which positions take part in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WangSetType {
    /// 4 corners per tile. Good for basic terrain transitions
    #[default]
    Corner,
    /// 4 edges per tile. Good for walls, roads, platforms
    Edge,
    /// 4 corners + 4 edges per tile
    Mixed,
}

impl WangSetType {
    /// Whether this set type uses the given position
    pub fn is_active(&self, position: WangPosition) -> bool {
        match self {
            WangSetType::Corner => position.is_corner(),
            WangSetType::Edge => !position.is_corner(),
            WangSetType::Mixed => true,
        }
    }

    /// Positions used by this set type, in signature order
    pub fn active_positions(&self) -> impl Iterator<Item = WangPosition> + '_ {
        WangPosition::ALL
            .into_iter()
            .filter(move |p| self.is_active(*p))
    }

    /// Name as written in the `type` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            WangSetType::Corner => "corner",
            WangSetType::Edge => "edge",
            WangSetType::Mixed => "mixed",
        }
    }
}

impl FromStr for WangSetType {
    type Err = InvalidAssetData;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corner" => Ok(WangSetType::Corner),
            "edge" => Ok(WangSetType::Edge),
            "mixed" => Ok(WangSetType::Mixed),
            other => Err(InvalidAssetData::UnknownWangSetType(other.to_string())),
        }
    }
}

/// A terrain class within a set (e.g., "Wall", "Ledge", "Grass")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangColor {
    pub name: String,
    /// Display color for UI visualization
    pub color: Color,
    /// Representative tile for this color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<u32>,
    /// Relative weight when picking between variant tiles
    #[serde(default = "default_probability")]
    pub probability: f32,
}

fn default_probability() -> f32 {
    1.0
}

impl WangColor {
    pub fn new(name: String, color: Color) -> Self {
        Self {
            name,
            color,
            tile: None,
            probability: 1.0,
        }
    }

    pub fn with_tile(mut self, tile: u32) -> Self {
        self.tile = Some(tile);
        self
    }

    pub fn with_probability(mut self, probability: f32) -> Self {
        self.probability = probability;
        self
    }
}

/// Signature assignment for a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WangTile {
    pub tile_id: u32,
    pub wang_id: WangId,
}

/// A named Wang set attached to a tileset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangSet {
    pub name: String,
    pub set_type: WangSetType,
    /// Representative tile for the whole set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<u32>,
    /// Colors in file order; color index `n` refers to `colors[n - 1]`
    pub colors: Vec<WangColor>,
    /// Tile signatures in file order
    pub tiles: Vec<WangTile>,
}

impl WangSet {
    pub fn new(name: String, set_type: WangSetType) -> Self {
        Self {
            name,
            set_type,
            tile: None,
            colors: Vec::new(),
            tiles: Vec::new(),
        }
    }

    /// Add a color, returning its (1-based) color index
    pub fn add_color(&mut self, color: WangColor) -> ColorIndex {
        self.colors.push(color);
        self.colors.len() as ColorIndex
    }

    /// Assign a signature to a tile
    pub fn add_tile(&mut self, tile_id: u32, wang_id: WangId) {
        self.tiles.push(WangTile { tile_id, wang_id });
    }

    /// Get a color by its 1-based index
    pub fn color(&self, index: ColorIndex) -> Option<&WangColor> {
        if index == 0 {
            return None;
        }
        self.colors.get(index as usize - 1)
    }

    /// Get the 1-based color index by name
    pub fn color_index(&self, name: &str) -> Option<ColorIndex> {
        self.colors
            .iter()
            .position(|c| c.name == name)
            .map(|i| (i + 1) as ColorIndex)
    }

    /// Get the signature assigned to a tile
    pub fn wang_id_of(&self, tile_id: u32) -> Option<WangId> {
        self.tiles
            .iter()
            .find(|t| t.tile_id == tile_id)
            .map(|t| t.wang_id)
    }

    /// Tile id → signature mapping, ordered by tile id
    pub fn signature_table(&self) -> BTreeMap<u32, WangId> {
        self.tiles.iter().map(|t| (t.tile_id, t.wang_id)).collect()
    }

    /// Probability of a color; unassigned and unknown colors weigh 1.0
    pub fn color_probability(&self, index: ColorIndex) -> f32 {
        self.color(index).map(|c| c.probability).unwrap_or(1.0)
    }

    /// Product of the color probability at every assigned position, as Tiled
    /// computes it. A color touching two positions counts twice.
    pub fn wang_id_probability(&self, wang_id: &WangId) -> f64 {
        wang_id
            .colors()
            .iter()
            .filter(|&&c| c != 0)
            .map(|&c| self.color_probability(c) as f64)
            .product()
    }

    /// Validate this set against the owning tileset's tile count
    pub fn validate(&self, tile_count: u32) -> Result<(), InvalidAssetData> {
        crate::validate_wang_set(self, tile_count)
    }
}
