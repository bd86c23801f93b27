//! Wear accumulation — deterministic, bias-aware material degradation.
//!
//! The increment is nonlinear in pressure (peak-sensitive) and scaled
//! by material response, spatial extent, temporal persistence, and a
//! per-zone modifier. Wear never heals: increments are non-negative and
//! the result is clamped to [0, MAX_WEAR].

use crate::config::ModelConfig;
use crate::grid::Grid;

/// Accumulate one step of wear on top of `previous_wear`.
pub fn accumulate_wear(
    previous_wear: &Grid,
    pressure: &Grid,
    previous_pressure: Option<&Grid>,
    durability_factor: f64,
    activity_wear_rate: f64,
    config: &ModelConfig,
) -> Grid {
    let rows = pressure.rows();
    let max_pressure = config.max_cell_pressure;
    let dt = config.time_step as f64;

    // Material response: durable materials wear quadratically less.
    let durability = durability_factor.clamp(0.0, 1.0);
    let material_response = (1.0 - durability) * (1.0 - durability);

    // Area modifier: widespread high pressure accelerates wear.
    let high_pressure_fraction = pressure.fraction_above(0.6 * max_pressure);
    let area_modifier = 1.0 + high_pressure_fraction;

    // Persistence modifier: less change means the same cells keep
    // taking load, which wears them faster.
    let persistence_modifier = match previous_pressure {
        None => 1.0,
        Some(prev) => {
            let delta = pressure.mean_abs_diff(prev);
            let persistence = 1.0 - (delta / max_pressure).min(1.0);
            1.0 + 0.5 * persistence
        }
    };

    // Zone modifier: forefoot and heel bands wear faster than midfoot.
    let forefoot_end = (0.3 * rows as f64) as usize;
    let heel_start = (0.7 * rows as f64) as usize;
    let zone_modifier = |row: usize| -> f64 {
        if row < forefoot_end || row >= heel_start {
            1.1
        } else {
            0.9
        }
    };

    pressure.map_indexed(|i, j, p| {
        let increment = (p / max_pressure).powf(config.wear_nonlinearity)
            * config.wear_rate
            * dt
            * activity_wear_rate
            * material_response
            * area_modifier
            * persistence_modifier
            * zone_modifier(i);

        (previous_wear.get(i, j) + increment).clamp(0.0, config.max_wear)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig::builtin()
    }

    #[test]
    fn wear_never_decreases() {
        let config = config();
        let pressure = Grid::uniform(config.grid_rows, config.grid_cols, 0.05);
        let mut wear = Grid::zeros(config.grid_rows, config.grid_cols);

        for _ in 0..20 {
            let next = accumulate_wear(&wear, &pressure, Some(&pressure), 0.5, 1.0, &config);
            for (before, after) in wear.cells().iter().zip(next.cells()) {
                assert!(after >= before);
                assert!(*after <= config.max_wear);
            }
            wear = next;
        }
    }

    #[test]
    fn perfect_durability_stops_wear() {
        let config = config();
        let pressure = Grid::uniform(config.grid_rows, config.grid_cols, 0.10);
        let wear = Grid::zeros(config.grid_rows, config.grid_cols);

        let next = accumulate_wear(&wear, &pressure, None, 1.0, 2.2, &config);
        assert!(next.cells().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn heel_and_forefoot_wear_faster_than_midfoot() {
        let config = config();
        let pressure = Grid::uniform(config.grid_rows, config.grid_cols, 0.05);
        let wear = Grid::zeros(config.grid_rows, config.grid_cols);

        let next = accumulate_wear(&wear, &pressure, None, 0.0, 1.0, &config);
        let forefoot = next.get(0, 0);
        let midfoot = next.get(config.grid_rows / 2, 0);
        let heel = next.get(config.grid_rows - 1, 0);

        assert!(forefoot > midfoot);
        assert!(heel > midfoot);
        assert!((forefoot - heel).abs() < 1e-15);
    }

    #[test]
    fn static_pressure_wears_faster_than_shifting_pressure() {
        let config = config();
        let pressure = Grid::uniform(config.grid_rows, config.grid_cols, 0.05);
        let shifted = Grid::uniform(config.grid_rows, config.grid_cols, 0.12);
        let wear = Grid::zeros(config.grid_rows, config.grid_cols);

        let static_wear = accumulate_wear(&wear, &pressure, Some(&pressure), 0.0, 1.0, &config);
        let moving_wear = accumulate_wear(&wear, &pressure, Some(&shifted), 0.0, 1.0, &config);

        assert!(static_wear.get(0, 0) > moving_wear.get(0, 0));
    }
}
