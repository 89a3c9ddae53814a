//! Seeded terrain generation.
//!
//! The noise is a smooth trigonometric surface folded into `[0, 1)`, so
//! neighbouring tiles are strongly correlated and the map shows banding.
//! Expect roughly 30% water, 60% grass and 10% mountain, with no
//! statistical guarantee for any single seed.

use serde::{Deserialize, Serialize};

use crate::world::{Grid, Terrain};

pub const WATER_BELOW: f64 = 0.3;
pub const MOUNTAIN_FROM: f64 = 0.9;

/// How the session's terrain is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainMode {
    /// Noise map derived from the seed.
    #[default]
    Generated,
    /// Every tile is grass and the seed is unused.
    Flat,
}

/// Pseudo-noise value for tile `(row, col)`, always in `[0, 1)`.
///
/// `seed` must be finite; NaN or infinity makes every value NaN.
pub fn noise_value(row: usize, col: usize, seed: f64) -> f64 {
    debug_assert!(seed.is_finite(), "noise seed must be finite, got {seed}");
    let mixed = (row as f64 + seed) * 1_000.0 + (col as f64 + seed) * 10_000.0;
    ((mixed.sin() * 10_000.0) % 1.0).abs()
}

pub fn classify(value: f64) -> Terrain {
    if value < WATER_BELOW {
        Terrain::Water
    } else if value < MOUNTAIN_FROM {
        Terrain::Grass
    } else {
        Terrain::Mountain
    }
}

/// Builds a `size x size` grid from the noise surface. Identical seeds give
/// identical grids. Every tile starts with no unit and no city. `seed` must
/// be finite and `size * size` must fit in memory; [`crate::game::GameBuilder`]
/// checks both.
pub fn generate_noise_map(seed: f64, size: usize) -> Grid {
    Grid::from_fn(size, |coord| classify(noise_value(coord.row, coord.col, seed)))
}

pub fn build_grid(mode: TerrainMode, seed: f64, size: usize) -> Grid {
    match mode {
        TerrainMode::Generated => generate_noise_map(seed, size),
        TerrainMode::Flat => Grid::filled(size, Terrain::Grass),
    }
}
