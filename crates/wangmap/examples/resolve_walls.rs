//! Autotile a small room with the shipped Walls tileset and print the tile ids.
//!
//! Run with `RUST_LOG=debug cargo run -p wangmap --example resolve_walls` to see
//! the loader and resolver logs.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use wangmap::prelude::*;

const ROOM: &[&str] = &[
    "................",
    ".##########.....",
    ".#........#.....",
    ".#........####..",
    ".#...~~......#..",
    ".#...~~......#..",
    ".##########..#..",
    "..........####..",
    "................",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/maps/Walls.tsx");
    let tileset = load_tileset(&path)?;

    let walls = tileset
        .wang_set("Walls")
        .ok_or("Walls tileset has no Walls wangset")?;
    let wall = walls.color_index("Wall").ok_or("missing Wall color")?;
    let ledge = walls.color_index("Ledge").ok_or("missing Ledge color")?;

    let width = ROOM[0].len() as u32;
    let height = ROOM.len() as u32;
    let mut map = CellTerrainMap::new(width, height);
    for (y, row) in ROOM.iter().enumerate() {
        for (x, cell) in row.chars().enumerate() {
            let color = match cell {
                '#' => wall,
                '~' => ledge,
                _ => 0,
            };
            map.set(x as u32, y as u32, color);
        }
    }

    let config = ResolverConfig::new().with_seed(2024);
    let resolver = Resolver::for_tileset(&tileset, "Walls", config)?;
    let resolved = resolver.resolve_map(&map);

    for row in resolved.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|tile| match tile {
                Some(id) => format!("{id:>3}"),
                None => "  .".to_string(),
            })
            .collect();
        println!("{}", line.join(""));
    }

    Ok(())
}
