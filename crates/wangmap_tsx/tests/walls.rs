//! Loads the shipped Walls tileset and checks its integrity guarantees.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use wangmap_core::{InvalidAssetData, TileType, WangId, WangSet, WangSetType};
use wangmap_tsx::{load_tileset, TilesetLoader, TsxError};

fn walls_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../assets/maps/Walls.tsx")
}

#[test]
fn loads_walls_tileset() {
    let tileset = load_tileset(&walls_path()).unwrap();

    assert_eq!(tileset.name, "Walls");
    assert_eq!(tileset.tile_width, 12);
    assert_eq!(tileset.tile_height, 12);
    assert_eq!(tileset.tile_count, 120);
    assert_eq!(tileset.columns, 12);
    assert_eq!(tileset.tiles.len(), 120);
    assert_eq!(tileset.tile_type(0), TileType::Wall);
    assert_eq!(tileset.tile_type(4), TileType::Ledge);
    assert_eq!(tileset.tile_type(64), TileType::Water);
    assert_eq!(tileset.tile_type(16), TileType::Empty);

    let walls = tileset.wang_set("Walls").unwrap();
    assert_eq!(walls.set_type, WangSetType::Edge);
    assert_eq!(walls.tile, Some(47));
    assert_eq!(walls.colors.len(), 5);
    assert_eq!(walls.tiles.len(), 51);
    assert_eq!(walls.color_index("Cloud"), Some(5));

    let border = tileset.wang_set("Border").unwrap();
    assert_eq!(border.colors.len(), 1);
    assert_eq!(border.tiles.len(), 8);
}

#[test]
fn every_signature_references_a_defined_color() {
    let tileset = load_tileset(&walls_path()).unwrap();

    for wang_set in &tileset.wang_sets {
        for wang_tile in &wang_set.tiles {
            for &color in wang_tile.wang_id.colors() {
                assert!(
                    color == 0 || wang_set.color(color).is_some(),
                    "{}: tile {} references color {}",
                    wang_set.name,
                    wang_tile.tile_id,
                    color
                );
            }
        }
    }
}

#[test]
fn every_referenced_tile_is_in_range() {
    let tileset = load_tileset(&walls_path()).unwrap();

    for wang_set in &tileset.wang_sets {
        let referenced = wang_set
            .tiles
            .iter()
            .map(|t| t.tile_id)
            .chain(wang_set.colors.iter().filter_map(|c| c.tile))
            .chain(wang_set.tile);
        for id in referenced {
            assert!(id < tileset.tile_count, "{} references tile {}", wang_set.name, id);
        }
    }
}

#[test]
fn signature_table_survives_json_round_trip() {
    let tileset = load_tileset(&walls_path()).unwrap();

    let before: Vec<(String, BTreeMap<u32, WangId>)> = tileset
        .wang_sets
        .iter()
        .map(|ws| (ws.name.clone(), ws.signature_table()))
        .collect();

    let json = serde_json::to_string_pretty(&tileset.wang_sets).unwrap();
    let restored: Vec<WangSet> = serde_json::from_str(&json).unwrap();

    let after: Vec<(String, BTreeMap<u32, WangId>)> = restored
        .iter()
        .map(|ws| (ws.name.clone(), ws.signature_table()))
        .collect();

    assert_eq!(before, after);
    assert_eq!(
        after[0].1.get(&0),
        Some(&WangId::new([0, 0, 1, 0, 1, 0, 0, 0]))
    );
    for wang_set in &restored {
        wang_set.validate(tileset.tile_count).unwrap();
    }
}

#[test]
fn loader_reads_from_any_stream() {
    let loader = TilesetLoader;
    assert_eq!(loader.extensions(), &["tsx"]);

    let tileset = loader.load(File::open(walls_path()).unwrap()).unwrap();
    assert_eq!(tileset.wang_sets.len(), 2);
}

#[test]
fn corrupted_copy_fails_fast() {
    let original = std::fs::read_to_string(walls_path()).unwrap();
    let corrupted = original.replace(
        r#"<wangtile tileid="13" wangid="1,0,1,0,1,0,1,0"/>"#,
        r#"<wangtile tileid="13" wangid="1,0,1,0,1,0,1"/>"#,
    );
    assert_ne!(original, corrupted);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(corrupted.as_bytes()).unwrap();

    let result = load_tileset(file.path());
    assert!(matches!(
        result,
        Err(TsxError::Asset(InvalidAssetData::WangIdLength(7)))
    ));
}
