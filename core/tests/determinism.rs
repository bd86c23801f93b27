//! THE MOST IMPORTANT TEST IN THE PROJECT.
//!
//! Two runs, same inputs, same step count. They must produce exactly
//! identical histories and summaries — no tolerance, no "close enough".
//! Any divergence is a blocker.

use solesense_core::{
    ActivityMode, ArchType, ModelConfig, SimEngine, SimulationInputs,
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
fn identical_inputs_produce_identical_results() {
    let engine = SimEngine::new(ModelConfig::builtin());

    let a = engine.run_simulation(&inputs(), Some(60)).expect("run a");
    let b = engine.run_simulation(&inputs(), Some(60)).expect("run b");

    assert_eq!(a.comfort_history, b.comfort_history, "comfort histories diverged");
    assert_eq!(a.pressure_history, b.pressure_history, "pressure histories diverged");
    assert_eq!(a.wear_history, b.wear_history, "wear histories diverged");
    assert_eq!(a.scenario_summary, b.scenario_summary, "scenario summaries diverged");
    assert_eq!(a.alignment_summary, b.alignment_summary, "alignment summaries diverged");
    assert_eq!(a, b, "full results diverged");
}

#[test]
fn identical_results_survive_serialization() {
    let engine = SimEngine::new(ModelConfig::builtin());

    let a = engine.run_simulation(&inputs(), Some(20)).expect("run a");
    let b = engine.run_simulation(&inputs(), Some(20)).expect("run b");

    let json_a = serde_json::to_string(&a).expect("serialize a");
    let json_b = serde_json::to_string(&b).expect("serialize b");
    assert_eq!(json_a, json_b, "serialized results diverged");
}

#[test]
fn different_inputs_produce_different_results() {
    let engine = SimEngine::new(ModelConfig::builtin());

    let mut heavier = inputs();
    heavier.body_weight = 110.0;

    let a = engine.run_simulation(&inputs(), Some(30)).expect("run a");
    let b = engine.run_simulation(&heavier, Some(30)).expect("run b");

    assert_ne!(
        a.final_pressure, b.final_pressure,
        "input differences must be observable in the pressure field"
    );
}
