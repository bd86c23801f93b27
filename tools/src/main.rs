//! sole-runner: headless simulation runner for SoleSense.
//!
//! Usage:
//!   sole-runner --weight 70 --size 42 --arch normal --activity walking
//!   sole-runner --activity running --steps 200 --json
//!   sole-runner --activity walking --compare-activity jumping

use anyhow::{bail, Result};
use solesense_core::{
    ActivityMode, ArchType, HistoryRetention, ModelConfig, SimEngine, SimulationInputs,
    SimulationResult,
};
use std::env;

/// Boundary-layer default. The core's own default (used when steps are
/// omitted entirely) is much larger.
const DEFAULT_STEPS: usize = 50;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let steps = parse_arg(&args, "--steps", DEFAULT_STEPS);
    let body_weight = parse_arg(&args, "--weight", 70.0);
    let foot_size = parse_arg(&args, "--size", 42.0);
    let sole_stiffness = parse_arg(&args, "--stiffness", 0.5);
    let material_durability = parse_arg(&args, "--durability", 0.5);
    let arch = str_arg(&args, "--arch").unwrap_or("normal");
    let activity = str_arg(&args, "--activity").unwrap_or("walking");
    let compare_activity = str_arg(&args, "--compare-activity");
    let json_output = args.iter().any(|a| a == "--json");
    let summary_only = args.iter().any(|a| a == "--summary-only");
    let config_path = str_arg(&args, "--config");

    let config = match config_path {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::builtin(),
    };

    let inputs = SimulationInputs {
        body_weight,
        foot_size,
        arch_type: parse_arch(arch)?,
        activity_mode: parse_activity(activity)?,
        sole_stiffness,
        material_durability,
    };
    inputs.validate()?;

    let run_id = format!("run-{}", chrono::Utc::now().format("%Y%m%dT%H%M%SZ"));
    log::info!(
        "{run_id}: steps={steps} arch={} activity={}",
        inputs.arch_type.label(),
        inputs.activity_mode.label()
    );

    let retention = if summary_only {
        HistoryRetention::SummaryOnly
    } else {
        HistoryRetention::Full
    };
    let engine = SimEngine::new(config).with_retention(retention);

    match compare_activity {
        Some(variant_activity) => {
            let mut variant_inputs = inputs.clone();
            variant_inputs.activity_mode = parse_activity(variant_activity)?;
            variant_inputs.validate()?;

            let report = engine.run_scenario_comparison(&inputs, &variant_inputs, Some(steps))?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_comparison(&run_id, activity, variant_activity, &report);
            }
        }
        None => {
            let result = engine.run_simulation(&inputs, Some(steps))?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_summary(&run_id, steps, &result);
            }
        }
    }

    Ok(())
}

/// Parse "--flag value" with a typed default.
fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arch(value: &str) -> Result<ArchType> {
    match value.to_ascii_lowercase().as_str() {
        "flat"   => Ok(ArchType::Flat),
        "normal" => Ok(ArchType::Normal),
        "high"   => Ok(ArchType::High),
        other    => bail!("unknown arch type '{other}' (expected flat|normal|high)"),
    }
}

fn parse_activity(value: &str) -> Result<ActivityMode> {
    match value.to_ascii_lowercase().as_str() {
        "standing" => Ok(ActivityMode::Standing),
        "walking"  => Ok(ActivityMode::Walking),
        "running"  => Ok(ActivityMode::Running),
        "stairs"   => Ok(ActivityMode::Stairs),
        "jumping"  => Ok(ActivityMode::Jumping),
        other => bail!(
            "unknown activity mode '{other}' (expected standing|walking|running|stairs|jumping)"
        ),
    }
}

fn print_summary(run_id: &str, steps: usize, result: &SimulationResult) {
    let comfort_start = result.comfort_history[0].comfort_index;
    let comfort_end = result.final_comfort();

    println!("SoleSense — {run_id}");
    println!("  steps:            {steps}");
    println!("  scenario type:    {}", result.scenario_summary.scenario_type.label());
    println!("  stability:        {}", result.scenario_summary.stability.label());
    println!("  alignment regime: {}", result.alignment_summary.alignment_regime.label());
    println!("  comfort:          {comfort_start} -> {comfort_end}");
    println!("  mean wear:        {:.6}", result.final_wear.mean());
    println!("  max wear:         {:.6}", result.final_wear.max());

    let factors: Vec<&str> = result
        .scenario_summary
        .dominant_factors
        .iter()
        .map(|f| f.name())
        .collect();
    println!("  dominant factors: {}", factors.join(", "));
    println!();
    println!("  {}", result.scenario_summary.explanation);
    println!("  {}", result.alignment_summary.interpretation);
}

fn print_comparison(
    run_id: &str,
    baseline_activity: &str,
    variant_activity: &str,
    report: &solesense_core::ComparisonReport,
) {
    let analysis = &report.what_if_analysis;

    println!("SoleSense what-if — {run_id}");
    println!("  baseline: {baseline_activity}  comfort={} mean_wear={:.6}",
        report.baseline.final_comfort, report.baseline.mean_wear);
    println!("  variant:  {variant_activity}  comfort={} mean_wear={:.6}",
        report.variant.final_comfort, report.variant.mean_wear);
    println!();
    println!("  comfort delta:    {:+}", analysis.outcome_deltas.comfort_delta);
    println!("  mean wear delta:  {:+.4}", analysis.outcome_deltas.mean_wear_delta);
    println!("  max wear delta:   {:+.4}", analysis.outcome_deltas.max_wear_delta);
    println!("  tradeoff:         {}", analysis.tradeoff_analysis.summary);
    println!("  verdict:          {}", analysis.verdict.rationale);

    for note in &analysis.mechanism_attribution.notes {
        println!("  note: {note}");
    }
}
