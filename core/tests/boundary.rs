//! The validation boundary: everything user-facing fails fast here,
//! and nothing past it revalidates.

use solesense_core::{
    normalize_inputs, ActivityMode, ArchType, ModelConfig, SimError, SimulationInputs,
};

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
fn out_of_range_weight_is_rejected_with_field_name() {
    let mut raw = inputs();
    raw.body_weight = 1000.0;

    match raw.validate() {
        Err(SimError::InvalidInput { field, reason }) => {
            assert_eq!(field, "body_weight");
            assert!(reason.contains("<= 300"), "got reason: {reason}");
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn core_normalization_clamps_instead_of_rejecting() {
    // If an unvalidated value reaches the core anyway, normalization
    // clamps: load_factor saturates at 1.0, never above.
    let config = ModelConfig::builtin();
    let mut raw = inputs();
    raw.body_weight = 1000.0;

    let params = normalize_inputs(&raw, &config);
    assert_eq!(params.load_factor, 1.0);
}

#[test]
fn every_numeric_field_is_range_checked() {
    let cases: Vec<(&str, fn(&mut SimulationInputs))> = vec![
        ("body_weight", |i| i.body_weight = 10.0),
        ("foot_size", |i| i.foot_size = 99.0),
        ("sole_stiffness", |i| i.sole_stiffness = 1.5),
        ("material_durability", |i| i.material_durability = -0.1),
    ];

    for (expected_field, mutate) in cases {
        let mut raw = inputs();
        mutate(&mut raw);
        match raw.validate() {
            Err(SimError::InvalidInput { field, .. }) => {
                assert_eq!(field, expected_field);
            }
            other => panic!("{expected_field}: expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn inputs_parse_from_snake_case_json() {
    let json = r#"{
        "body_weight": 70.0,
        "foot_size": 42.0,
        "arch_type": "normal",
        "activity_mode": "walking",
        "sole_stiffness": 0.5,
        "material_durability": 0.5
    }"#;

    let parsed: SimulationInputs = serde_json::from_str(json).expect("parse");
    assert_eq!(parsed, inputs());
}
