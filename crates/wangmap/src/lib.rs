//! Load Tiled tilesets and autotile maps with their Wang sets
//!
//! This crate re-exports the workspace crates behind a single dependency:
//!
//! - [`model`]: tileset, tile type and Wang set data model
//! - [`tsx`]: `.tsx` loader (feature `tsx`, on by default)
//! - [`autotile`]: signature lookup and tile resolution
//!
//! # Quick Start
//!
//! ```ignore
//! use wangmap::prelude::*;
//!
//! let tileset = load_tileset(Path::new("assets/maps/Walls.tsx"))?;
//! let resolver = Resolver::for_tileset(&tileset, "Walls", ResolverConfig::default())?;
//!
//! let mut map = CellTerrainMap::new(16, 9);
//! map.fill_rect(2, 2, 6, 4, tileset.wang_set("Walls").and_then(|s| s.color_index("Wall")).unwrap_or(1));
//!
//! for row in resolver.resolve_map(&map).rows() {
//!     // draw row
//! }
//! ```
//!
//! # Features
//!
//! - `tsx` (default): Tiled `.tsx` loading
//! - `parallel`: resolve map rows on the rayon thread pool

pub use wangmap_autotile as autotile;
pub use wangmap_core as model;
#[cfg(feature = "tsx")]
pub use wangmap_tsx as tsx;

pub use wangmap_autotile::{
    BorderMode, CellTerrainMap, FnTerrainSource, ResolveError, ResolvedMap, Resolver,
    ResolverConfig, TerrainSource, VertexTerrainMap,
};
pub use wangmap_core::{
    InvalidAssetData, TileType, Tileset, WangColor, WangId, WangPosition, WangSet, WangSetType,
};
#[cfg(feature = "tsx")]
pub use wangmap_tsx::{load_tileset, parse_tileset, TilesetLoader, TsxError};

/// Prelude for convenient imports
pub mod prelude {
    pub use wangmap_autotile::{
        BorderMode, CellTerrainMap, FallbackPolicy, FnTerrainSource, ResolveError, ResolvedMap,
        Resolver, ResolverConfig, SelectionPolicy, TerrainSource, VertexTerrainMap,
    };
    pub use wangmap_core::{
        ColorIndex, TileType, Tileset, WangColor, WangId, WangPosition, WangSet, WangSetType,
    };
    #[cfg(feature = "tsx")]
    pub use wangmap_tsx::{load_tileset, TilesetLoader};
}
