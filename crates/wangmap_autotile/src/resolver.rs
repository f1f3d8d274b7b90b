//! Tile resolution
//!
//! A [`Resolver`] is built once per Wang set and is immutable afterwards, so
//! one instance can serve any number of threads.

use crate::config::{FallbackPolicy, ResolverConfig, SelectionPolicy};
use crate::context::TerrainSource;
use crate::table::{Candidate, WangTable};
use crate::ResolveError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};
use wangmap_core::{Tileset, WangId, WangSet};

/// Selects tile ids for terrain signatures of one Wang set
#[derive(Debug, Clone)]
pub struct Resolver {
    table: WangTable,
    config: ResolverConfig,
    default_tile: u32,
}

impl Resolver {
    /// Build a resolver where every tile has probability 1.0
    pub fn new(wang_set: &WangSet, config: ResolverConfig) -> Self {
        Self::from_table(WangTable::new(wang_set), wang_set, config)
    }

    /// Build a resolver for a named Wang set, weighting variants with the
    /// tileset's per-tile probabilities
    pub fn for_tileset(
        tileset: &Tileset,
        set_name: &str,
        config: ResolverConfig,
    ) -> Result<Self, ResolveError> {
        let Some(wang_set) = tileset.wang_set(set_name) else {
            warn!(tileset = %tileset.name, set_name, "unknown wangset");
            return Err(ResolveError::UnknownWangSet(set_name.to_string()));
        };
        let table = WangTable::with_tileset(tileset, wang_set);
        Ok(Self::from_table(table, wang_set, config))
    }

    fn from_table(table: WangTable, wang_set: &WangSet, config: ResolverConfig) -> Self {
        let default_tile = config.default_tile.or(wang_set.tile).unwrap_or(0);
        debug!(
            wang_set = %wang_set.name,
            default_tile,
            selection = ?config.selection,
            fallback = ?config.fallback,
            "created resolver"
        );
        Self {
            table,
            config,
            default_tile,
        }
    }

    /// Tile drawn for unassigned contexts and failed lookups
    pub fn default_tile(&self) -> u32 {
        self.default_tile
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn table(&self) -> &WangTable {
        &self.table
    }

    /// Pick a tile for `wang_id`, drawing tie-breaks from `rng`.
    ///
    /// An all-wildcard signature never fails and never draws from `rng`: it
    /// yields the lowest all-zero entry when the set has one, the default tile
    /// otherwise.
    pub fn resolve(&self, wang_id: &WangId, rng: &mut impl Rng) -> Result<u32, ResolveError> {
        let signature = wang_id.masked(self.table.set_type());

        let exact = self.table.lookup(&signature);

        if signature.is_wildcard() {
            return Ok(exact.first().map_or(self.default_tile, |c| c.tile_id));
        }

        if !exact.is_empty() {
            return Ok(self.select(exact, rng));
        }

        if self.config.fallback == FallbackPolicy::NearestMatch {
            let nearest = self.table.nearest(&signature);
            if !nearest.is_empty() {
                trace!(%signature, "no exact match, using nearest");
                return Ok(self.select(&nearest, rng));
            }
        }

        Err(ResolveError::NoMatchingTile { signature })
    }

    /// [`resolve`](Self::resolve) with a fresh RNG seeded from `seed`
    pub fn resolve_seeded(&self, wang_id: &WangId, seed: u64) -> Result<u32, ResolveError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.resolve(wang_id, &mut rng)
    }

    /// Never fails; unmatched signatures draw the default tile
    pub fn resolve_or_default(&self, wang_id: &WangId, seed: u64) -> u32 {
        match self.resolve_seeded(wang_id, seed) {
            Ok(tile) => tile,
            Err(err) => {
                trace!(%err, default_tile = self.default_tile, "falling back to default tile");
                self.default_tile
            }
        }
    }

    /// Resolve one cell of a terrain source.
    ///
    /// The RNG is seeded from `(seed, x, y)`, so the result does not depend
    /// on the order cells are visited in. `Ok(None)` means nothing is drawn.
    pub fn resolve_cell<S: TerrainSource + ?Sized>(
        &self,
        x: u32,
        y: u32,
        source: &S,
        seed: u64,
    ) -> Result<Option<u32>, ResolveError> {
        match source.wang_id_at(x, y) {
            Some(wang_id) => self.resolve_seeded(&wang_id, cell_seed(seed, x, y)).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve every cell of `source` with the configured seed
    pub fn resolve_map<S: TerrainSource + Sync + ?Sized>(&self, source: &S) -> ResolvedMap {
        let width = source.width();
        let height = source.height();
        let mut tiles = vec![None; width as usize * height as usize];

        if width > 0 {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                tiles
                    .par_chunks_mut(width as usize)
                    .enumerate()
                    .for_each(|(y, row)| self.resolve_row(source, y as u32, row));
            }

            #[cfg(not(feature = "parallel"))]
            for (y, row) in tiles.chunks_mut(width as usize).enumerate() {
                self.resolve_row(source, y as u32, row);
            }
        }

        ResolvedMap {
            width,
            height,
            tiles,
        }
    }

    fn resolve_row<S: TerrainSource + ?Sized>(&self, source: &S, y: u32, row: &mut [Option<u32>]) {
        for (x, slot) in row.iter_mut().enumerate() {
            let x = x as u32;
            *slot = source
                .wang_id_at(x, y)
                .map(|wang_id| self.resolve_or_default(&wang_id, cell_seed(self.config.seed, x, y)));
        }
    }

    fn select(&self, candidates: &[Candidate], rng: &mut impl Rng) -> u32 {
        if candidates.len() == 1 {
            return candidates[0].tile_id;
        }

        match self.config.selection {
            SelectionPolicy::LowestId => candidates[0].tile_id,
            SelectionPolicy::Uniform => candidates[rng.gen_range(0..candidates.len())].tile_id,
            SelectionPolicy::Weighted => weighted_pick(candidates, rng),
        }
    }
}

/// Negative and NaN weights count as zero
fn clamped_weight(candidate: &Candidate) -> f64 {
    candidate.weight.max(0.0)
}

fn weighted_pick(candidates: &[Candidate], rng: &mut impl Rng) -> u32 {
    let largest = candidates.iter().map(clamped_weight).fold(0.0, f64::max);
    if largest <= 0.0 {
        return candidates[0].tile_id;
    }
    if largest.is_infinite() {
        return candidates
            .iter()
            .find(|c| clamped_weight(c).is_infinite())
            .map_or(candidates[0].tile_id, |c| c.tile_id);
    }

    // Relative to the largest weight the total stays within [1, len]
    let total: f64 = candidates.iter().map(|c| clamped_weight(c) / largest).sum();

    let mut pick = rng.gen_range(0.0..total);
    for candidate in candidates {
        let weight = clamped_weight(candidate) / largest;
        if pick < weight {
            return candidate.tile_id;
        }
        pick -= weight;
    }

    // Float rounding can leave a sliver past the last weight
    candidates[candidates.len() - 1].tile_id
}

/// Mix the base seed with a cell position
pub fn cell_seed(seed: u64, x: u32, y: u32) -> u64 {
    let position = ((y as u64) << 32) | x as u64;
    seed ^ position.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Output of [`Resolver::resolve_map`], row-major with row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMap {
    pub width: u32,
    pub height: u32,
    /// `None` where nothing is drawn
    pub tiles: Vec<Option<u32>>,
}

impl ResolvedMap {
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[y as usize * self.width as usize + x as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }
}
