//! Model-assumption metadata attached to every result.
//!
//! A fixed, static description of what the model does and does not
//! claim. Product tooling surfaces this next to any number it shows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionScope {
    pub modeled:     Vec<String>,
    pub not_modeled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterminismAssumptions {
    pub randomness:             bool,
    pub repeatable:             bool,
    pub same_input_same_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationLimits {
    pub comfort_index: String,
    pub wear:          String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAssumptions {
    pub scope:                 AssumptionScope,
    pub determinism:           DeterminismAssumptions,
    pub interpretation_limits: InterpretationLimits,
    pub simplifications:       Vec<String>,
}

impl ModelAssumptions {
    pub fn canonical() -> Self {
        Self {
            scope: AssumptionScope {
                modeled: vec![
                    "relative pressure distribution".into(),
                    "deterministic temporal evolution".into(),
                    "penalty-based comfort inference".into(),
                    "pressure-driven material wear".into(),
                ],
                not_modeled: vec![
                    "human biomechanics".into(),
                    "medical conditions".into(),
                    "real gait cycles".into(),
                    "material fatigue physics".into(),
                ],
            },
            determinism: DeterminismAssumptions {
                randomness:             false,
                repeatable:             true,
                same_input_same_output: true,
            },
            interpretation_limits: InterpretationLimits {
                comfort_index: "comparative comfort indicator, not a diagnosis".into(),
                wear:          "relative material degradation, not lifespan prediction".into(),
            },
            simplifications: vec![
                "2D discretized sole grid".into(),
                "abstract force units".into(),
                "bounded nonlinear wear accumulation".into(),
                "zone-based heuristics instead of anatomy".into(),
            ],
        }
    }
}
