//! Static base pressure field synthesis.
//!
//! Builds the bounded 2D distribution every step relaxes toward:
//! longitudinal heel-to-toe decay, arch bias on the midfoot band,
//! three-zone lateral weighting, contact-capacity shaping, and bounded
//! zero-flux smoothing. The output grid is immutable for the run.

use crate::config::ModelConfig;
use crate::grid::Grid;
use crate::params::SimulationParameters;

/// Heel-to-toe base profile. Heel > forefoot > toe.
fn longitudinal_profile(rows: usize) -> Vec<f64> {
    (0..rows)
        .map(|i| {
            let x = i as f64 / (rows - 1) as f64;
            1.4 * (-3.5 * x).exp() + 0.35
        })
        .collect()
}

/// Reduce midfoot pressure for higher arches. The band covers
/// [0.35·rows, 0.65·rows).
fn apply_arch_bias(profile: &mut [f64], arch_bias: f64) {
    let rows = profile.len();
    let mid_start = (0.35 * rows as f64) as usize;
    let mid_end = (0.65 * rows as f64) as usize;

    for value in &mut profile[mid_start..mid_end] {
        *value *= 1.0 - arch_bias;
    }
}

/// Medial-lateral weight vector for one row.
/// Heel: center-biased. Midfoot: narrow contact. Forefoot: dual lobes.
fn lateral_weights(row: usize, rows: usize, cols: usize) -> Vec<f64> {
    let row_ratio = row as f64 / rows as f64;

    (0..cols)
        .map(|j| {
            let x = -1.0 + 2.0 * j as f64 / (cols - 1) as f64;

            if row_ratio < 0.35 {
                let sigma = 0.35f64;
                (-(x * x) / (2.0 * sigma * sigma)).exp()
            } else if row_ratio < 0.6 {
                let sigma = 0.18f64;
                (-(x * x) / (2.0 * sigma * sigma)).exp() * 0.6
            } else {
                let left = (-((x + 0.35) * (x + 0.35)) / 0.08).exp();
                let right = (-((x - 0.35) * (x - 0.35)) / 0.08).exp();
                left + right
            }
        })
        .collect()
}

/// Expand the 1D longitudinal profile into the full 2D field.
fn expand_to_grid(profile: &[f64], rows: usize, cols: usize) -> Grid {
    let lateral: Vec<Vec<f64>> = (0..rows).map(|i| lateral_weights(i, rows, cols)).collect();
    Grid::from_fn(rows, cols, |i, j| profile[i] * lateral[i][j])
}

/// Shape pressure concentration: low capacity sharpens peaks, high
/// capacity flattens them.
fn apply_contact_capacity(grid: &Grid, capacity: f64) -> Grid {
    let exponent = (1.4 - capacity).max(0.6);
    grid.map(|v| v.powf(exponent))
}

/// Jacobi neighbor averaging with zero-flux edges: a boundary cell
/// averages only over existing neighbors plus itself. Stiffer soles
/// smooth less.
fn smooth_grid_bounded(grid: &Grid, stiffness_factor: f64) -> Grid {
    const BASE_ITERATIONS: f64 = 4.0;
    let steps = ((1.0 - stiffness_factor) * BASE_ITERATIONS).round() as usize;

    let rows = grid.rows();
    let cols = grid.cols();
    let mut current = grid.clone();

    for _ in 0..steps {
        current = Grid::from_fn(rows, cols, |i, j| {
            let mut total = current.get(i, j);
            let mut count = 1usize;

            if i > 0 {
                total += current.get(i - 1, j);
                count += 1;
            }
            if i < rows - 1 {
                total += current.get(i + 1, j);
                count += 1;
            }
            if j > 0 {
                total += current.get(i, j - 1);
                count += 1;
            }
            if j < cols - 1 {
                total += current.get(i, j + 1);
                count += 1;
            }

            total / count as f64
        });
    }

    current
}

/// Generate the static base pressure field for a run.
pub fn generate_base_field(params: &SimulationParameters, config: &ModelConfig) -> Grid {
    let rows = config.grid_rows;
    let cols = config.grid_cols;

    let mut profile = longitudinal_profile(rows);
    apply_arch_bias(&mut profile, params.arch_bias);

    let grid = expand_to_grid(&profile, rows, cols);
    let grid = apply_contact_capacity(&grid, params.contact_capacity);

    smooth_grid_bounded(&grid, params.stiffness_factor)
}
