//! Core data structures for wangmap
//!
//! This crate provides the read-only asset model behind autotiling:
//! - `Tileset` - Tile atlas configuration with per-tile definitions
//! - `TileDefinition` / `TileType` - Per-tile type and selection weight
//! - `WangSet` - Terrain colors plus the tile → signature mapping
//! - `WangId` - The 8-position edge/corner signature of a tile
//! - `InvalidAssetData` - Load-time validation failures
//!
//! Everything here is built once by the asset pipeline and never mutated
//! while maps are being resolved.

mod color;
mod error;
mod tileset;
mod validate;
mod wang;

pub use color::Color;
pub use error::InvalidAssetData;
pub use tileset::{TileDefinition, TileType, Tileset, TilesetImage};
pub use validate::{validate_tileset, validate_wang_set};
pub use wang::{ColorIndex, WangColor, WangId, WangPosition, WangSet, WangSetType, WangTile};
