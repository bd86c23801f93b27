//! Constraint enforcement — restores the hard invariants on any grid.
//!
//! RULES (fixed order, never reordered):
//!   1. Non-finite values become zero.
//!   2. Clip to [MIN_CELL_PRESSURE, MAX_CELL_PRESSURE].
//!   3. Enforce the total-force target with capacity awareness.
//!   4. Re-clip.
//!
//! Force is conserved exactly when representable, otherwise saturated
//! to the representable maximum. Degenerate sums fall back to a uniform
//! grid. This stage is total: it never raises.

use crate::config::ModelConfig;
use crate::grid::Grid;

const EPSILON: f64 = 1e-8;

fn max_representable_force(config: &ModelConfig) -> f64 {
    config.max_cell_pressure * config.cell_count() as f64
}

/// Uniform fallback that always respects bounds.
fn safe_uniform(target_force: f64, config: &ModelConfig) -> Grid {
    let max_force = max_representable_force(config);
    let effective = target_force.min(max_force);

    let value = (effective / config.cell_count() as f64).min(config.max_cell_pressure);
    Grid::uniform(config.grid_rows, config.grid_cols, value)
}

pub fn enforce_finite(grid: &Grid) -> Grid {
    grid.map(|v| if v.is_finite() { v } else { 0.0 })
}

pub fn enforce_bounds(grid: &Grid, config: &ModelConfig) -> Grid {
    grid.map(|v| v.clamp(config.min_cell_pressure, config.max_cell_pressure))
}

/// Conserve force only if representable; otherwise saturate safely.
pub fn enforce_force_with_capacity(grid: &Grid, target_force: f64, config: &ModelConfig) -> Grid {
    let max_force = max_representable_force(config);

    if target_force > max_force {
        log::warn!(
            "force target {target_force:.4} exceeds representable max {max_force:.4}, saturating"
        );
        return safe_uniform(target_force, config);
    }

    let current_force = grid.sum();
    if current_force < EPSILON {
        log::warn!("near-zero force sum {current_force:.2e}, falling back to uniform grid");
        return safe_uniform(target_force, config);
    }

    let scaled = grid.scale(target_force / current_force);

    let clipped = enforce_bounds(&scaled, config);
    let clipped_force = clipped.sum();
    if clipped_force < EPSILON {
        return safe_uniform(target_force, config);
    }

    // Clipping may have shed force; one corrective rescale restores it.
    clipped.scale(target_force / clipped_force)
}

/// Apply all constraints in priority order.
pub fn apply_constraints(grid: &Grid, target_total_force: f64, config: &ModelConfig) -> Grid {
    let grid = enforce_finite(grid);
    let grid = enforce_bounds(&grid, config);
    let grid = enforce_force_with_capacity(&grid, target_total_force, config);
    enforce_bounds(&grid, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig::builtin()
    }

    #[test]
    fn non_finite_cells_become_zero() {
        let config = config();
        let mut grid = Grid::uniform(config.grid_rows, config.grid_cols, 0.01);
        grid.set(0, 0, f64::NAN);
        grid.set(1, 1, f64::INFINITY);
        grid.set(2, 2, f64::NEG_INFINITY);

        let out = apply_constraints(&grid, 0.5, &config);
        assert!(out.cells().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn representable_force_is_conserved() {
        let config = config();
        let grid = Grid::uniform(config.grid_rows, config.grid_cols, 0.01);
        let target = 0.4125;

        let out = apply_constraints(&grid, target, &config);
        assert!((out.sum() - target).abs() < 1e-6, "sum {} vs target {target}", out.sum());
    }

    #[test]
    fn unrepresentable_force_saturates_uniformly() {
        let config = config();
        let grid = Grid::uniform(config.grid_rows, config.grid_cols, 0.01);
        let target = max_representable_force(&config) * 10.0;

        let out = apply_constraints(&grid, target, &config);
        for &v in out.cells() {
            assert!((v - config.max_cell_pressure).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_grid_falls_back_to_uniform() {
        let config = config();
        let grid = Grid::zeros(config.grid_rows, config.grid_cols);
        let target = 0.4125;

        let out = apply_constraints(&grid, target, &config);
        let expected = target / config.cell_count() as f64;
        for &v in out.cells() {
            assert!((v - expected).abs() < 1e-12);
        }
        assert!((out.sum() - target).abs() < 1e-9);
    }

    #[test]
    fn output_is_always_bounded() {
        let config = config();
        let grid = Grid::uniform(config.grid_rows, config.grid_cols, 10.0);
        let out = apply_constraints(&grid, 5.0, &config);
        for &v in out.cells() {
            assert!(v >= config.min_cell_pressure && v <= config.max_cell_pressure);
        }
    }
}
