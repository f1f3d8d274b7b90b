//! Resolver configuration
//!
//! Stored alongside a project as JSON. Every field has a default so partial
//! files are accepted.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How one tile is chosen when several share the required signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Weighted random: tile probability × product of its color probabilities
    #[default]
    Weighted,
    /// Every variant equally likely
    Uniform,
    /// Always the variant with the lowest tile id
    LowestId,
}

/// What to do when no tile carries the exact signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Report `NoMatchingTile`; `resolve_or_default` then draws the default tile
    #[default]
    DefaultTile,
    /// Treat unassigned input positions as free and take the closest tile
    /// before reporting `NoMatchingTile`
    NearestMatch,
}

/// Configuration for a [`Resolver`](crate::Resolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Tile drawn when nothing matches. Falls back to the Wang set's own
    /// representative tile, then to tile 0.
    pub default_tile: Option<u32>,
    pub selection: SelectionPolicy,
    pub fallback: FallbackPolicy,
    /// Base seed for per-cell variant selection
    pub seed: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_tile: None,
            selection: SelectionPolicy::Weighted,
            fallback: FallbackPolicy::DefaultTile,
            seed: 0,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_tile(mut self, tile: u32) -> Self {
        self.default_tile = Some(tile);
        self
    }

    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save this configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
