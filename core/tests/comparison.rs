//! Scenario comparison behavior: self-comparison, dominance, and the
//! report shape handed to the boundary layer.

use solesense_core::{
    compare_scenarios, ActivityMode, ArchType, ModelConfig, SimEngine, SimulationInputs, Verdict,
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
fn self_comparison_has_zero_deltas() {
    let engine = SimEngine::new(ModelConfig::builtin());
    let result = engine.run_simulation(&inputs(), Some(50)).expect("run");

    let comparison = compare_scenarios(&result, &result);
    let deltas = &comparison.outcome_deltas;

    assert_eq!(deltas.comfort_delta, 0);
    assert_eq!(deltas.mean_wear_delta, 0.0);
    assert_eq!(deltas.max_wear_delta, 0.0);
    assert_eq!(deltas.alignment_change.from, deltas.alignment_change.to);

    let shift = &comparison.mechanism_attribution.dominant_factor_shift;
    assert!(shift.reduced.is_empty());
    assert!(shift.introduced.is_empty());

    // Zero deltas satisfy "comfort >= 0 and wear <= 0".
    assert_eq!(comparison.verdict.classification, Verdict::StrictlyBetter);
}

#[test]
fn more_durable_variant_is_strictly_better() {
    // Durability changes wear only, so the variant preserves comfort
    // exactly while reducing wear: a dominance case.
    let engine = SimEngine::new(ModelConfig::builtin());

    let mut variant_inputs = inputs();
    variant_inputs.material_durability = 0.9;

    let report = engine
        .run_scenario_comparison(&inputs(), &variant_inputs, Some(60))
        .expect("comparison");

    assert_eq!(report.what_if_analysis.outcome_deltas.comfort_delta, 0);
    assert!(report.baseline.mean_wear > report.variant.mean_wear);
    assert_eq!(
        report.what_if_analysis.verdict.classification,
        Verdict::StrictlyBetter
    );
}

#[test]
fn comparison_report_carries_both_digests() {
    let engine = SimEngine::new(ModelConfig::builtin());

    let mut variant_inputs = inputs();
    variant_inputs.activity_mode = ActivityMode::Running;

    let report = engine
        .run_scenario_comparison(&inputs(), &variant_inputs, Some(40))
        .expect("comparison");

    assert!(report.baseline.final_comfort >= 0);
    assert!(report.variant.final_comfort >= 0);
    assert!(report.variant.mean_wear > report.baseline.mean_wear);
    assert!(report.variant.max_wear >= report.variant.mean_wear);

    // The report must serialize into plain nested maps and sequences.
    let json = serde_json::to_value(&report).expect("serialize");
    assert!(json.get("baseline").is_some());
    assert!(json.get("variant").is_some());
    assert!(json.get("what_if_analysis").is_some());
    assert!(json.get("model_assumptions").is_some());
}

#[test]
fn wear_reduction_is_attributed_in_the_notes() {
    let engine = SimEngine::new(ModelConfig::builtin());

    let mut variant_inputs = inputs();
    variant_inputs.material_durability = 0.95;

    let report = engine
        .run_scenario_comparison(&inputs(), &variant_inputs, Some(40))
        .expect("comparison");

    let notes = &report.what_if_analysis.mechanism_attribution.notes;
    assert!(
        notes.iter().any(|n| n.contains("Wear reduction")),
        "expected a wear-reduction note, got {notes:?}"
    );
}
