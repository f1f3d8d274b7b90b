use thiserror::Error;

/// Malformed tileset data detected while loading or validating.
///
/// Any of these is fatal for the tileset it was found in: terrain rendering
/// depends on the integrity of the Wang tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidAssetData {
    #[error("{context}: tile id {id} is outside [0, {tile_count})")]
    TileOutOfRange {
        context: String,
        id: i64,
        tile_count: u32,
    },
    #[error("wangid has {0} entries, expected 8")]
    WangIdLength(usize),
    #[error("invalid wangid entry '{0}'")]
    WangIdEntry(String),
    #[error("wangset '{wang_set}': tile {tile_id} references color {color}, but only {color_count} colors are defined")]
    DanglingColor {
        wang_set: String,
        tile_id: u32,
        color: u8,
        color_count: usize,
    },
    #[error("unknown tile type '{0}'")]
    UnknownTileType(String),
    #[error("unknown wangset type '{0}'")]
    UnknownWangSetType(String),
    #[error("wangset '{wang_set}': tile {tile_id} is listed more than once")]
    DuplicateWangTile { wang_set: String, tile_id: u32 },
    #[error("wangset '{wang_set}': tile {tile_id} sets position {position}, which a {set_type} set does not use")]
    InactivePosition {
        wang_set: String,
        tile_id: u32,
        position: usize,
        set_type: &'static str,
    },
    #[error("{context}: probability {value} must be finite and non-negative")]
    InvalidProbability { context: String, value: f32 },
    #[error("invalid color '{0}'")]
    InvalidColor(String),
}
