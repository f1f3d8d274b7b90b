//! Wang tile resolution for Tiled tilesets
//!
//! Given the terrain on the eight edges and corners around a cell, pick the
//! tile of a [`WangSet`](wangmap_core::WangSet) whose signature matches.
//!
//! # Example
//!
//! ```ignore
//! use wangmap_autotile::{CellTerrainMap, Resolver, ResolverConfig};
//!
//! let resolver = Resolver::for_tileset(&tileset, "Walls", ResolverConfig::default())?;
//!
//! let mut map = CellTerrainMap::new(8, 8);
//! map.fill_rect(2, 2, 4, 3, 1);
//! let tiles = resolver.resolve_map(&map);
//! ```
//!
//! Enable the `parallel` feature to resolve map rows on the rayon thread pool.
//! Per-cell seeds make the output identical either way.

pub mod config;
pub mod context;
pub mod error;
pub mod resolver;
pub mod table;

pub use config::{FallbackPolicy, ResolverConfig, SelectionPolicy};
pub use context::{BorderMode, CellTerrainMap, FnTerrainSource, TerrainSource, VertexTerrainMap};
pub use error::{ConfigError, ResolveError};
pub use resolver::{cell_seed, ResolvedMap, Resolver};
pub use table::{Candidate, WangTable};
