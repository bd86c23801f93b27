//! Comfort scoring — penalty-based, zone-aware, temporally sensitive.
//!
//! Six penalties, each clamped to [0, 1], combined by fixed weights
//! summing to 1.0. The resulting comfort index is an integer in
//! [0, 100]; higher means more comfortable. Side-effect free.

use crate::config::ModelConfig;
use crate::grid::{round_dp, Grid};
use serde::{Deserialize, Serialize};

/// Stable names for the six penalty factors. Ordering matches the
/// weight table and is the tie-break order for dominant-factor ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyKind {
    PressurePeak,
    HighPressureArea,
    ZoneBias,
    Asymmetry,
    TemporalVariation,
    PressurePersistence,
}

impl PenaltyKind {
    pub const ALL: [PenaltyKind; 6] = [
        PenaltyKind::PressurePeak,
        PenaltyKind::HighPressureArea,
        PenaltyKind::ZoneBias,
        PenaltyKind::Asymmetry,
        PenaltyKind::TemporalVariation,
        PenaltyKind::PressurePersistence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PenaltyKind::PressurePeak        => "pressure_peak",
            PenaltyKind::HighPressureArea    => "high_pressure_area",
            PenaltyKind::ZoneBias            => "zone_bias",
            PenaltyKind::Asymmetry           => "asymmetry",
            PenaltyKind::TemporalVariation   => "temporal_variation",
            PenaltyKind::PressurePersistence => "pressure_persistence",
        }
    }
}

/// The six penalty contributions, rounded to 3 decimals for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    pub pressure_peak:        f64,
    pub high_pressure_area:   f64,
    pub zone_bias:            f64,
    pub asymmetry:            f64,
    pub temporal_variation:   f64,
    pub pressure_persistence: f64,
}

impl PenaltyBreakdown {
    pub fn get(&self, kind: PenaltyKind) -> f64 {
        match kind {
            PenaltyKind::PressurePeak        => self.pressure_peak,
            PenaltyKind::HighPressureArea    => self.high_pressure_area,
            PenaltyKind::ZoneBias            => self.zone_bias,
            PenaltyKind::Asymmetry           => self.asymmetry,
            PenaltyKind::TemporalVariation   => self.temporal_variation,
            PenaltyKind::PressurePersistence => self.pressure_persistence,
        }
    }
}

/// One step's comfort outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortRecord {
    pub comfort_index: i64,
    pub penalties:     PenaltyBreakdown,
}

fn clip01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Score one pressure grid. `previous` is the prior step's grid; None
/// on the first step, which zeroes the temporal penalty.
pub fn compute_comfort(
    grid: &Grid,
    previous: Option<&Grid>,
    config: &ModelConfig,
) -> ComfortRecord {
    let rows = grid.rows();
    let cols = grid.cols();
    let max_pressure = config.max_cell_pressure;
    let mean_p = grid.mean().max(1e-8);

    // 1. Peak pressure.
    let peak_penalty = clip01(grid.max() / max_pressure);

    // 2. High-pressure area.
    let area_penalty = clip01(grid.fraction_above(0.7 * max_pressure));

    // 3. Zone bias: heel (last 30% of rows) vs forefoot (first 30%).
    let heel_start = (0.7 * rows as f64) as usize;
    let forefoot_end = (0.3 * rows as f64) as usize;
    let heel_mean = grid.row_band_mean(heel_start, rows);
    let forefoot_mean = grid.row_band_mean(0, forefoot_end);
    let zone_penalty = clip01((heel_mean - forefoot_mean).abs() / mean_p);

    // 4. Left-right asymmetry.
    let left_mean = grid.col_band_mean(0, cols / 2);
    let right_mean = grid.col_band_mean(cols / 2, cols);
    let asymmetry_penalty = clip01((left_mean - right_mean).abs() / mean_p);

    // 5. Temporal volatility.
    let temporal_penalty = match previous {
        None => 0.0,
        Some(prev) => clip01(grid.mean_abs_diff(prev) / mean_p),
    };

    // 6. Pressure persistence: penalized only when pressure is "stuck".
    let persistence_penalty = if temporal_penalty < 0.2 {
        clip01(mean_p / max_pressure)
    } else {
        0.0
    };

    let w = &config.comfort_weights;
    let total_penalty = w.pressure_peak * peak_penalty
        + w.high_pressure_area * area_penalty
        + w.zone_bias * zone_penalty
        + w.asymmetry * asymmetry_penalty
        + w.temporal_variation * temporal_penalty
        + w.pressure_persistence * persistence_penalty;

    let comfort_index = (100.0 * (1.0 - clip01(total_penalty))).round() as i64;

    ComfortRecord {
        comfort_index,
        penalties: PenaltyBreakdown {
            pressure_peak:        round_dp(peak_penalty, 3),
            high_pressure_area:   round_dp(area_penalty, 3),
            zone_bias:            round_dp(zone_penalty, 3),
            asymmetry:            round_dp(asymmetry_penalty, 3),
            temporal_variation:   round_dp(temporal_penalty, 3),
            pressure_persistence: round_dp(persistence_penalty, 3),
        },
    }
}
