//! Signature lookup table
//!
//! Built once per Wang set at load time. Exact lookups are a single hash
//! probe; the penalty-scored [`WangTable::nearest`] scan is only used by the
//! `NearestMatch` fallback.

use std::collections::HashMap;
use tracing::debug;
use wangmap_core::{Tileset, WangId, WangPosition, WangSet, WangSetType};

/// A tile that carries a given signature, with its selection weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub tile_id: u32,
    /// Tile probability × color probability at each assigned position
    pub weight: f64,
}

/// Index from signature to the tiles that carry it
#[derive(Debug, Clone)]
pub struct WangTable {
    set_type: WangSetType,
    /// Candidate lists are sorted by ascending tile id
    by_signature: HashMap<WangId, Vec<Candidate>>,
    /// Every (signature, candidate) pair, sorted by ascending tile id
    entries: Vec<(WangId, Candidate)>,
}

impl WangTable {
    /// Build a table where every tile has probability 1.0
    pub fn new(wang_set: &WangSet) -> Self {
        Self::build(wang_set, |_| 1.0)
    }

    /// Build a table using the per-tile probabilities of the owning tileset
    pub fn with_tileset(tileset: &Tileset, wang_set: &WangSet) -> Self {
        Self::build(wang_set, |id| tileset.tile_probability(id))
    }

    fn build(wang_set: &WangSet, tile_probability: impl Fn(u32) -> f32) -> Self {
        let set_type = wang_set.set_type;

        let mut entries: Vec<(WangId, Candidate)> = wang_set
            .tiles
            .iter()
            .map(|wang_tile| {
                let signature = wang_tile.wang_id.masked(set_type);
                let weight = tile_probability(wang_tile.tile_id) as f64
                    * wang_set.wang_id_probability(&signature);
                (
                    signature,
                    Candidate {
                        tile_id: wang_tile.tile_id,
                        weight,
                    },
                )
            })
            .collect();
        entries.sort_by_key(|(_, candidate)| candidate.tile_id);

        let mut by_signature: HashMap<WangId, Vec<Candidate>> = HashMap::new();
        for (signature, candidate) in &entries {
            by_signature.entry(*signature).or_default().push(*candidate);
        }

        debug!(
            wang_set = %wang_set.name,
            tiles = entries.len(),
            signatures = by_signature.len(),
            "built wang table"
        );

        Self {
            set_type,
            by_signature,
            entries,
        }
    }

    pub fn set_type(&self) -> WangSetType {
        self.set_type
    }

    /// Number of tiles in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct signatures
    pub fn signature_count(&self) -> usize {
        self.by_signature.len()
    }

    /// Tiles whose signature equals `signature` on every position the set uses.
    /// Unassigned (0) input positions only match unassigned table positions.
    pub fn lookup(&self, signature: &WangId) -> &[Candidate] {
        self.by_signature
            .get(&signature.masked(self.set_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, signature: &WangId) -> bool {
        !self.lookup(signature).is_empty()
    }

    /// Closest tiles when unassigned input positions may carry any terrain.
    ///
    /// Every assigned input position must match exactly. The penalty of a
    /// tile is the number of unassigned input positions where it has
    /// terrain; all tiles sharing the lowest penalty are returned.
    pub fn nearest(&self, signature: &WangId) -> Vec<Candidate> {
        let wanted = signature.masked(self.set_type);
        let mut best: Vec<Candidate> = Vec::new();
        let mut lowest_penalty = usize::MAX;

        for (tile_signature, candidate) in &self.entries {
            let mut penalty = 0;
            let mut impossible = false;

            for position in WangPosition::ALL {
                match (wanted.color(position), tile_signature.color(position)) {
                    (0, 0) => {}
                    (0, _) => penalty += 1,
                    (want, have) if want != have => {
                        impossible = true;
                        break;
                    }
                    _ => {}
                }
            }

            if impossible {
                continue;
            }

            if penalty < lowest_penalty {
                lowest_penalty = penalty;
                best.clear();
            }
            if penalty == lowest_penalty {
                best.push(*candidate);
            }
        }

        best
    }

    /// Distinct signatures in the table
    pub fn signatures(&self) -> impl Iterator<Item = &WangId> {
        self.by_signature.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wangmap_core::{Color, WangColor};

    fn border_set() -> WangSet {
        let mut set = WangSet::new("Border".to_string(), WangSetType::Edge);
        set.add_color(WangColor::new("Border".to_string(), Color::RED).with_tile(54));
        set.add_tile(67, "1,0,0,0,1,0,0,0".parse().unwrap());
        set.add_tile(53, "0,0,1,0,1,0,0,0".parse().unwrap());
        set.add_tile(65, "1,0,0,0,1,0,0,0".parse().unwrap());
        set
    }

    #[test]
    fn test_lookup_groups_variants_by_ascending_id() {
        let table = WangTable::new(&border_set());

        let ids: Vec<u32> = table
            .lookup(&WangId::new([1, 0, 0, 0, 1, 0, 0, 0]))
            .iter()
            .map(|c| c.tile_id)
            .collect();
        assert_eq!(ids, vec![65, 67]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.signature_count(), 2);
    }

    #[test]
    fn test_lookup_ignores_inactive_positions() {
        let table = WangTable::new(&border_set());

        // Corner noise is irrelevant for an edge set
        let noisy = WangId::new([1, 1, 0, 1, 1, 1, 0, 1]);
        assert_eq!(table.lookup(&noisy).len(), 2);
    }

    #[test]
    fn test_lookup_miss() {
        let table = WangTable::new(&border_set());
        assert!(table.lookup(&WangId::filled(1)).is_empty());
        assert!(!table.contains(&WangId::WILDCARD));
    }

    #[test]
    fn test_weights_use_tile_probability() {
        let mut tileset = Tileset::new("Walls".to_string(), 12, 12, 120, 12);
        tileset.set_tile_probability(67, 3.0).unwrap();
        let mut set = border_set();
        set.colors[0].probability = 0.5;

        let table = WangTable::with_tileset(&tileset, &set);
        let weights: Vec<f64> = table
            .lookup(&WangId::new([1, 0, 0, 0, 1, 0, 0, 0]))
            .iter()
            .map(|c| c.weight)
            .collect();
        // Color probability 0.5 counts once per edge
        assert_eq!(weights, vec![0.25, 0.75]);
    }

    #[test]
    fn test_nearest_prefers_fewest_extra_terrain() {
        let table = WangTable::new(&border_set());

        // Only the bottom edge is known: 53 (right+bottom) and 65/67
        // (top+bottom) both add one extra edge
        let nearest: Vec<u32> = table
            .nearest(&WangId::new([0, 0, 0, 0, 1, 0, 0, 0]))
            .iter()
            .map(|c| c.tile_id)
            .collect();
        assert_eq!(nearest, vec![53, 65, 67]);
    }

    #[test]
    fn test_nearest_respects_assigned_positions() {
        let table = WangTable::new(&border_set());

        let nearest = table.nearest(&WangId::new([0, 0, 0, 0, 0, 0, 1, 0]));
        assert!(nearest.is_empty());
    }
}
