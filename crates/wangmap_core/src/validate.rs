//! Load-time integrity checks for tilesets and Wang sets

use crate::{InvalidAssetData, Tileset, WangPosition, WangSet};
use std::collections::HashSet;

/// Validate that the tileset is internally consistent
pub fn validate_tileset(tileset: &Tileset) -> Result<(), InvalidAssetData> {
    for (index, tile) in tileset.tiles.iter().enumerate() {
        if !tileset.contains_tile(tile.id) || tile.id as usize != index {
            return Err(InvalidAssetData::TileOutOfRange {
                context: format!("tileset '{}' tile definition", tileset.name),
                id: tile.id as i64,
                tile_count: tileset.tile_count,
            });
        }
        check_probability(
            &format!("tileset '{}' tile {}", tileset.name, tile.id),
            tile.probability,
        )?;
    }

    for wang_set in &tileset.wang_sets {
        validate_wang_set(wang_set, tileset.tile_count)?;
    }

    Ok(())
}

/// Validate a Wang set against the tile count of its tileset
pub fn validate_wang_set(wang_set: &WangSet, tile_count: u32) -> Result<(), InvalidAssetData> {
    let in_range = |context: String, id: u32| {
        if id < tile_count {
            Ok(())
        } else {
            Err(InvalidAssetData::TileOutOfRange {
                context,
                id: id as i64,
                tile_count,
            })
        }
    };

    if let Some(tile) = wang_set.tile {
        in_range(format!("wangset '{}'", wang_set.name), tile)?;
    }

    for color in &wang_set.colors {
        if let Some(tile) = color.tile {
            in_range(
                format!("wangset '{}' color '{}'", wang_set.name, color.name),
                tile,
            )?;
        }
        check_probability(
            &format!("wangset '{}' color '{}'", wang_set.name, color.name),
            color.probability,
        )?;
    }

    let color_count = wang_set.colors.len();
    let mut seen = HashSet::new();

    for wang_tile in &wang_set.tiles {
        in_range(
            format!("wangset '{}' wangtile", wang_set.name),
            wang_tile.tile_id,
        )?;

        if !seen.insert(wang_tile.tile_id) {
            return Err(InvalidAssetData::DuplicateWangTile {
                wang_set: wang_set.name.clone(),
                tile_id: wang_tile.tile_id,
            });
        }

        for position in WangPosition::ALL {
            let color = wang_tile.wang_id.color(position);
            if color == 0 {
                continue;
            }
            if color as usize > color_count {
                return Err(InvalidAssetData::DanglingColor {
                    wang_set: wang_set.name.clone(),
                    tile_id: wang_tile.tile_id,
                    color,
                    color_count,
                });
            }
            if !wang_set.set_type.is_active(position) {
                return Err(InvalidAssetData::InactivePosition {
                    wang_set: wang_set.name.clone(),
                    tile_id: wang_tile.tile_id,
                    position: position.index(),
                    set_type: wang_set.set_type.as_str(),
                });
            }
        }
    }

    Ok(())
}

fn check_probability(context: &str, value: f32) -> Result<(), InvalidAssetData> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidAssetData::InvalidProbability {
            context: context.to_string(),
            value,
        })
    }
}
