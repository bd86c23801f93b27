//! Input normalization — maps bounded raw inputs into bounded,
//! dimensionless simulation control parameters.
//!
//! No physics. No inference. Pure function; the only "failure mode"
//! is clamping.

use crate::config::ModelConfig;
use crate::input::SimulationInputs;
use serde::{Deserialize, Serialize};

/// Normalized control parameters, owned by exactly one run and
/// immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Total injected load control, [0, 1].
    pub load_factor: f64,
    /// Spatial spread capacity, [0, 1].
    pub contact_capacity: f64,
    /// Midfoot redistribution bias.
    pub arch_bias: f64,

    // Activity dynamics, decomposed.
    pub activity_load:      f64,
    pub activity_variation: f64,
    pub activity_wear_rate: f64,

    // Material response, both [0, 1].
    pub stiffness_factor:  f64,
    pub durability_factor: f64,
}

/// Clamp `value` into [min, max], then map linearly onto [0, 1].
fn normalize_range(value: f64, min: f64, max: f64) -> f64 {
    let clamped = value.clamp(min, max);
    (clamped - min) / (max - min)
}

pub fn normalize_inputs(inputs: &SimulationInputs, config: &ModelConfig) -> SimulationParameters {
    let load_factor = normalize_range(inputs.body_weight, 40.0, 120.0);
    let contact_capacity = normalize_range(inputs.foot_size, 36.0, 48.0);

    let arch_bias = config.arch_bias_for(inputs.arch_type);
    let activity = config.activity_profile(inputs.activity_mode);

    SimulationParameters {
        load_factor,
        contact_capacity,
        arch_bias,
        activity_load:      activity.load_multiplier,
        activity_variation: activity.variation,
        activity_wear_rate: activity.wear_rate,
        stiffness_factor:   inputs.sole_stiffness.clamp(0.0, 1.0),
        durability_factor:  inputs.material_durability.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ActivityMode, ArchType};

    fn inputs() -> SimulationInputs {
        SimulationInputs {
            body_weight:         70.0,
            foot_size:           42.0,
            arch_type:           ArchType::Normal,
            activity_mode:       ActivityMode::Walking,
            sole_stiffness:      0.5,
            material_durability: 0.5,
        }
    }

    #[test]
    fn maps_midrange_inputs_linearly() {
        let params = normalize_inputs(&inputs(), &ModelConfig::builtin());
        assert!((params.load_factor - 0.375).abs() < 1e-12);
        assert!((params.contact_capacity - 0.5).abs() < 1e-12);
        assert_eq!(params.arch_bias, 0.0);
        assert_eq!(params.activity_load, 1.1);
        assert_eq!(params.activity_variation, 0.15);
        assert_eq!(params.activity_wear_rate, 1.0);
    }

    #[test]
    fn clamps_out_of_range_weight_to_one() {
        let mut raw = inputs();
        raw.body_weight = 1000.0;
        let params = normalize_inputs(&raw, &ModelConfig::builtin());
        assert_eq!(params.load_factor, 1.0);

        raw.body_weight = 5.0;
        let params = normalize_inputs(&raw, &ModelConfig::builtin());
        assert_eq!(params.load_factor, 0.0);
    }

    #[test]
    fn arch_bias_follows_the_table() {
        let config = ModelConfig::builtin();
        let mut raw = inputs();

        raw.arch_type = ArchType::Flat;
        assert_eq!(normalize_inputs(&raw, &config).arch_bias, 0.15);

        raw.arch_type = ArchType::High;
        assert_eq!(normalize_inputs(&raw, &config).arch_bias, -0.15);
    }

    #[test]
    fn material_controls_are_clamped() {
        let mut raw = inputs();
        raw.sole_stiffness = 3.0;
        raw.material_durability = -2.0;
        let params = normalize_inputs(&raw, &ModelConfig::builtin());
        assert_eq!(params.stiffness_factor, 1.0);
        assert_eq!(params.durability_factor, 0.0);
    }
}
