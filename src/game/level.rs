//! Procedural terrain generation
//!
//! The world is built from horizontal chunks. Each chunk walks a cursor
//! across its width, dropping base platforms at a randomly perturbed height,
//! with optional floating platforms and stair runs branching off the same
//! anchor. All placements share one occupied-cell set, so no two cells in a
//! chunk ever coincide.

use std::collections::HashSet;

use anyhow::{Result, ensure};
use rand::Rng;

use super::config::GameConfig;
use super::entities::{Obstacle, Tile};

/// One generated strip of terrain
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub tiles: Vec<Tile>,
    pub obstacles: Vec<Obstacle>,
}

/// Cursor advance range; smaller steps mean denser terrain
fn step_range(difficulty: f32) -> i32 {
    ((5.0 - difficulty) as i32).max(2)
}

/// Magnitude of the per-anchor vertical perturbation
fn height_variation(difficulty: f32) -> i32 {
    ((difficulty * 2.0) as i32).min(3)
}

/// Generate one chunk of terrain
///
/// `start_col` offsets all tile columns, so consecutive chunks line up into
/// a continuous strip. `width` and `height` are in cells; the anchor height
/// stays clamped to `[2, height - 2]`, which is why a height of 2 or less is
/// rejected outright.
pub fn generate_chunk<R: Rng>(
    rng: &mut R,
    start_col: i32,
    height: i32,
    width: i32,
    difficulty: f32,
    tile_size: i32,
) -> Result<Chunk> {
    ensure!(width > 0, "chunk width must be positive, got {width}");
    ensure!(height > 2, "chunk height must exceed 2, got {height}");

    let mut chunk = Chunk::default();
    let mut occupied: HashSet<(i32, i32)> = HashSet::new();

    let mut x = 0;
    let mut y = height - 3;
    let step = step_range(difficulty);
    let variation = height_variation(difficulty);

    // One platform width per chunk; harder terrain gets narrower footing
    let platform_width = if difficulty < 2.0 {
        rng.gen_range(2..=5)
    } else {
        rng.gen_range(1..=3)
    };

    while x < width {
        y += match rng.gen_range(0..3) {
            0 => -variation,
            1 => 0,
            _ => variation,
        };
        y = y.clamp(2, height - 2);

        add_base_platform(
            rng, &mut chunk, &mut occupied, x, y, platform_width, width, start_col, difficulty,
            tile_size,
        );
        add_floating_platforms(rng, &mut chunk, &mut occupied, x, y, width, start_col, tile_size);
        add_stairs(rng, &mut chunk, &mut occupied, x, y, width, start_col, tile_size);

        x += rng.gen_range(step..=step + 2);
    }

    Ok(chunk)
}

/// Place a horizontal run of tiles at the anchor, rolling for an obstacle
/// above each one
#[allow(clippy::too_many_arguments)]
fn add_base_platform<R: Rng>(
    rng: &mut R,
    chunk: &mut Chunk,
    occupied: &mut HashSet<(i32, i32)>,
    x: i32,
    y: i32,
    platform_width: i32,
    width: i32,
    start_col: i32,
    difficulty: f32,
    tile_size: i32,
) {
    for i in 0..platform_width {
        if x + i >= width {
            continue;
        }
        let col = start_col + x + i;
        let cell = (col, y);
        if occupied.contains(&cell) {
            continue;
        }
        chunk.tiles.push(Tile::at_cell(col, y, tile_size));
        occupied.insert(cell);

        // Obstacles never spawn over the first five world columns, so the
        // spawn run stays safe
        if col >= 5 && rng.r#gen::<f32>() < 0.3 * difficulty {
            let above = (col, y - 1);
            if !occupied.contains(&above) {
                chunk.obstacles.push(Obstacle::at_cell(col, y - 1, tile_size));
                occupied.insert(above);
            }
        }
    }
}

/// Sometimes scatter a few tiles well above the anchor
#[allow(clippy::too_many_arguments)]
fn add_floating_platforms<R: Rng>(
    rng: &mut R,
    chunk: &mut Chunk,
    occupied: &mut HashSet<(i32, i32)>,
    x: i32,
    y: i32,
    width: i32,
    start_col: i32,
    tile_size: i32,
) {
    if rng.r#gen::<f32>() >= 0.2 {
        return;
    }
    let count = rng.gen_range(1..=3);
    for i in 0..count {
        let fy = (y - rng.gen_range(2..=4)).max(2);
        let fx = x + i * rng.gen_range(2..=4);
        if fx >= width {
            continue;
        }
        let cell = (start_col + fx, fy);
        if occupied.contains(&cell) {
            continue;
        }
        chunk.tiles.push(Tile::at_cell(start_col + fx, fy, tile_size));
        occupied.insert(cell);
    }
}

/// Sometimes build a short up-right stair run from the anchor
#[allow(clippy::too_many_arguments)]
fn add_stairs<R: Rng>(
    rng: &mut R,
    chunk: &mut Chunk,
    occupied: &mut HashSet<(i32, i32)>,
    x: i32,
    y: i32,
    width: i32,
    start_col: i32,
    tile_size: i32,
) {
    if rng.r#gen::<f32>() >= 0.3 {
        return;
    }
    for step in 0..3 {
        let sy = (y - step).max(2);
        if x + step >= width {
            continue;
        }
        let cell = (start_col + x + step, sy);
        if occupied.contains(&cell) {
            continue;
        }
        chunk
            .tiles
            .push(Tile::at_cell(start_col + x + step, sy, tile_size));
        occupied.insert(cell);
    }
}

/// Guarantee a flat five-tile run under the spawn point
///
/// Cells the generator already filled are left alone, so tile coordinates
/// stay unique across the whole world.
pub fn ensure_starting_platforms(tiles: &mut Vec<Tile>, config: &GameConfig) {
    let row = config.spawn_row();
    let existing: HashSet<(i32, i32)> = tiles.iter().map(|t| t.cell(config.tile_size)).collect();
    for col in 0..5 {
        if !existing.contains(&(col, row)) {
            tiles.push(Tile::at_cell(col, row, config.tile_size));
        }
    }
}
