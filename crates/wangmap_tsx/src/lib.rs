//! Tiled `.tsx` tileset loader
//!
//! Parses tileset documents written by the Tiled map editor into
//! [`wangmap_core::Tileset`] values. The loader only reads: it never writes
//! `.tsx` files back.
//!
//! Supported content:
//! - `<tileset>` size attributes and the optional `<image>`
//! - `<tile id type|class probability>` (nested `<properties>`, `<animation>`,
//!   `<objectgroup>` are skipped)
//! - `<wangsets>` with `<wangcolor>` and `<wangtile>` children
//!
//! Every tileset is validated before it is returned, so a successfully loaded
//! tileset is safe to build lookup tables from.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use wangmap_tsx::load_tileset;
//!
//! let tileset = load_tileset(Path::new("assets/maps/Walls.tsx"))?;
//! let walls = tileset.wang_set("Walls").expect("Walls wangset");
//! println!("{} signatures", walls.tiles.len());
//! ```

mod error;
mod reader;

pub use error::TsxError;
pub use reader::{load_tileset, load_tileset_from_bytes, parse_tileset};

use std::io::Read;
use wangmap_core::Tileset;

/// Loader for `.tsx` tileset assets
///
/// Mirrors the shape of an engine asset loader: a list of handled extensions
/// and a `load` entry point taking a byte reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct TilesetLoader;

impl TilesetLoader {
    /// Read the whole stream and parse it as a tileset
    pub fn load<R: Read>(&self, mut reader: R) -> Result<Tileset, TsxError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        load_tileset_from_bytes(&bytes)
    }

    pub fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}
