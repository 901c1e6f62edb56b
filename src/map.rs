//! ASCII level maps
//!
//! One character per cell, one line per row: `#` wall, `S` start, `E` end,
//! anything else is floor. Cells are `CELL_SIZE` units square; start and end
//! resolve to cell centres, walls to full-cell rectangles.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::consts::CELL_SIZE;
use crate::error::{GameError, Result};
use crate::sim::{Aabb, LevelLayout};

/// File holding `level` inside `maps_dir`
pub fn map_path(maps_dir: &Path, level: u32) -> PathBuf {
    maps_dir.join(format!("example_map{level}.txt"))
}

/// Read and parse a map file
pub fn load_map(path: &Path) -> Result<LevelLayout> {
    let text = fs::read_to_string(path).map_err(|source| GameError::MapRead {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse_map(&text);
    log::debug!(
        "Loaded map {}: {} walls, start {:?}, end {:?}",
        path.display(),
        layout.walls.len(),
        layout.start,
        layout.end
    );
    Ok(layout)
}

/// Parse map text; a later `S` or `E` overrides an earlier one
pub fn parse_map(text: &str) -> LevelLayout {
    let mut layout = LevelLayout::default();
    for (row, line) in text.lines().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let x1 = col as f32 * CELL_SIZE;
            let y1 = row as f32 * CELL_SIZE;
            let center = Vec2::new(x1 + CELL_SIZE / 2.0, y1 + CELL_SIZE / 2.0);
            match ch {
                '#' => layout
                    .walls
                    .push(Aabb::new(x1, y1, x1 + CELL_SIZE, y1 + CELL_SIZE)),
                'S' => layout.start = Some(center),
                'E' => layout.end = Some(center),
                _ => {}
            }
        }
    }
    layout
}
