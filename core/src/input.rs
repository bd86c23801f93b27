//! Raw simulation inputs and boundary validation.
//!
//! RULES:
//!   - Validation happens once, at the boundary, before a run starts.
//!     The core performs no revalidation.
//!   - No defaults. No inference. Fail fast with a per-field message.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchType {
    Flat,
    Normal,
    High,
}

impl ArchType {
    pub fn label(self) -> &'static str {
        match self {
            ArchType::Flat   => "flat",
            ArchType::Normal => "normal",
            ArchType::High   => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityMode {
    Standing,
    Walking,
    Running,
    Stairs,
    Jumping,
}

impl ActivityMode {
    pub fn label(self) -> &'static str {
        match self {
            ActivityMode::Standing => "standing",
            ActivityMode::Walking  => "walking",
            ActivityMode::Running  => "running",
            ActivityMode::Stairs   => "stairs",
            ActivityMode::Jumping  => "jumping",
        }
    }
}

/// The six raw user-facing fields, already typed. Enum fields make the
/// membership checks total; the numeric ranges still need validate().
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    pub body_weight:         f64,
    pub foot_size:           f64,
    pub arch_type:           ArchType,
    pub activity_mode:       ActivityMode,
    pub sole_stiffness:      f64,
    pub material_durability: f64,
}

impl SimulationInputs {
    /// Range-check every numeric field. Called by the boundary layer
    /// before the engine runs.
    pub fn validate(&self) -> SimResult<()> {
        validate_numeric("body_weight", self.body_weight, 20.0, 300.0)?;
        validate_numeric("foot_size", self.foot_size, 30.0, 50.0)?;
        validate_numeric("sole_stiffness", self.sole_stiffness, 0.0, 1.0)?;
        validate_numeric("material_durability", self.material_durability, 0.0, 1.0)?;
        Ok(())
    }
}

fn validate_numeric(field: &str, value: f64, min: f64, max: f64) -> SimResult<()> {
    if !value.is_finite() {
        return Err(SimError::invalid_input(field, "must be a finite number"));
    }
    if value < min {
        return Err(SimError::invalid_input(field, format!("must be >= {min}")));
    }
    if value > max {
        return Err(SimError::invalid_input(field, format!("must be <= {max}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SimulationInputs {
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
    fn accepts_in_range_inputs() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let mut inputs = valid();
        inputs.body_weight = 1000.0;
        let err = inputs.validate().unwrap_err();
        assert!(err.to_string().contains("body_weight"), "got: {err}");
    }

    #[test]
    fn rejects_nan() {
        let mut inputs = valid();
        inputs.sole_stiffness = f64::NAN;
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn rejects_unknown_enum_value() {
        let json = r#"{
            "body_weight": 70, "foot_size": 42,
            "arch_type": "sideways", "activity_mode": "walking",
            "sole_stiffness": 0.5, "material_durability": 0.5
        }"#;
        assert!(serde_json::from_str::<SimulationInputs>(json).is_err());
    }

    #[test]
    fn rejects_missing_field() {
        let json = r#"{
            "body_weight": 70, "foot_size": 42,
            "arch_type": "normal", "sole_stiffness": 0.5,
            "material_durability": 0.5
        }"#;
        assert!(serde_json::from_str::<SimulationInputs>(json).is_err());
    }
}
