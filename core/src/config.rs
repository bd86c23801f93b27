//! Model configuration — every fixed table the simulation reads.
//!
//! RULES:
//!   - The config is immutable once constructed. Nothing mutates it at
//!     runtime; components receive it by shared reference.
//!   - Tables are ordered Vecs, not HashMaps, so iteration order is
//!     deterministic everywhere it is observable.
//!   - All values are abstract and dimensionless. No biomechanical
//!     meaning is implied.

use crate::input::{ActivityMode, ArchType};
use serde::{Deserialize, Serialize};

/// Per-activity dynamics triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfile {
    pub load_multiplier: f64,
    pub variation:       f64,
    pub wear_rate:       f64,
}

/// Comfort penalty weights. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortWeights {
    pub pressure_peak:        f64,
    pub high_pressure_area:   f64,
    pub zone_bias:            f64,
    pub asymmetry:            f64,
    pub temporal_variation:   f64,
    pub pressure_persistence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    // Grid shape: rows run heel → toe, columns medial → lateral.
    pub grid_rows: usize,
    pub grid_cols: usize,

    // Per-cell pressure limits.
    pub max_cell_pressure: f64,
    pub min_cell_pressure: f64,

    // Time configuration.
    pub time_step:     u32,
    pub default_steps: usize,

    // Activity dynamics, ordered. Lookup misses fall back to walking.
    pub activity_profiles: Vec<(ActivityMode, ActivityProfile)>,

    // Midfoot redistribution bias per arch shape.
    pub arch_bias: Vec<(ArchType, f64)>,

    pub comfort_weights: ComfortWeights,

    // Wear accumulation.
    pub wear_rate:        f64,
    pub max_wear:         f64,
    pub wear_nonlinearity: f64,
    /// Presentation-only scaling for human interpretability. Never feeds
    /// back into comfort, pressure, or scenario classification.
    pub wear_visibility_gain: f64,
}

impl ModelConfig {
    /// The canonical built-in table set.
    pub fn builtin() -> Self {
        Self {
            grid_rows: 20,
            grid_cols: 10,

            max_cell_pressure: 0.15,
            min_cell_pressure: 0.0,

            time_step:     1,
            default_steps: 10_000,

            activity_profiles: vec![
                (ActivityMode::Standing, ActivityProfile {
                    load_multiplier: 1.0,
                    variation:       0.05,
                    wear_rate:       0.6,
                }),
                (ActivityMode::Walking, ActivityProfile {
                    load_multiplier: 1.1,
                    variation:       0.15,
                    wear_rate:       1.0,
                }),
                (ActivityMode::Running, ActivityProfile {
                    load_multiplier: 1.35,
                    variation:       0.35,
                    wear_rate:       1.8,
                }),
                (ActivityMode::Stairs, ActivityProfile {
                    load_multiplier: 1.25,
                    variation:       0.25,
                    wear_rate:       1.5,
                }),
                (ActivityMode::Jumping, ActivityProfile {
                    load_multiplier: 1.6,
                    variation:       0.5,
                    wear_rate:       2.2,
                }),
            ],

            arch_bias: vec![
                (ArchType::Flat,   0.15),
                (ArchType::Normal, 0.0),
                (ArchType::High,  -0.15),
            ],

            comfort_weights: ComfortWeights {
                pressure_peak:        0.20,
                high_pressure_area:   0.20,
                zone_bias:            0.15,
                asymmetry:            0.15,
                temporal_variation:   0.15,
                pressure_persistence: 0.15,
            },

            wear_rate:            0.00001,
            max_wear:             1.0,
            wear_nonlinearity:    1.3,
            wear_visibility_gain: 50.0,
        }
    }

    /// Load an override config from a JSON file.
    /// In tests and embedded use, prefer ModelConfig::builtin().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ModelConfig = serde_json::from_str(&content)?;

        if config.grid_rows < 2 || config.grid_cols < 2 {
            anyhow::bail!("grid must be at least 2x2, got {}x{}", config.grid_rows, config.grid_cols);
        }
        if config.activity_profiles.is_empty() {
            anyhow::bail!("activity_profiles table must not be empty");
        }
        if config.max_cell_pressure <= config.min_cell_pressure {
            anyhow::bail!("max_cell_pressure must exceed min_cell_pressure");
        }

        Ok(config)
    }

    /// Look up the dynamics triple for an activity mode.
    /// Falls back to walking, then to the first entry.
    pub fn activity_profile(&self, mode: ActivityMode) -> &ActivityProfile {
        self.activity_profiles
            .iter()
            .find(|(m, _)| *m == mode)
            .or_else(|| {
                self.activity_profiles
                    .iter()
                    .find(|(m, _)| *m == ActivityMode::Walking)
            })
            .map(|(_, p)| p)
            .unwrap_or(&self.activity_profiles[0].1)
    }

    /// Look up the midfoot bias for an arch shape. Unknown shapes bias 0.
    pub fn arch_bias_for(&self, arch: ArchType) -> f64 {
        self.arch_bias
            .iter()
            .find(|(a, _)| *a == arch)
            .map(|(_, b)| *b)
            .unwrap_or(0.0)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_rows * self.grid_cols
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
