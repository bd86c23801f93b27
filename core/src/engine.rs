//! The simulation engine — drives the per-step pipeline and the
//! post-run analysis.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Temporal evolution
//!   2. Constraint enforcement
//!   3. Comfort scoring
//!   4. Wear accumulation
//!
//! RULES:
//!   - Each step reads only the previous step's grids.
//!   - No randomness anywhere. Identical inputs and step counts produce
//!     identical results, exactly.
//!   - History entries are distinct snapshots, never mutated after
//!     being appended.
//!   - Once inputs pass boundary validation the loop is total: numeric
//!     degeneracy resolves to deterministic fallbacks, never an error.

use crate::{
    analysis::{
        align_comfort_and_wear, analyze_trends, classify_scenario, AlignmentSummary,
        ScenarioSummary,
    },
    comfort::{compute_comfort, ComfortRecord},
    compare::{compare_scenarios, ComparisonResult},
    config::ModelConfig,
    constraints::apply_constraints,
    error::{SimError, SimResult},
    evolve::evolve_pressure,
    field::generate_base_field,
    grid::Grid,
    input::SimulationInputs,
    meta::ModelAssumptions,
    params::{normalize_inputs, SimulationParameters},
    types::Step,
    wear::accumulate_wear,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Run lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Initialized,
    Running,
    Analyzed,
    Done,
}

/// What the run keeps in memory besides the scalar series the analysis
/// needs. Full retention is the default; SummaryOnly drops the per-step
/// grid snapshots for very large step counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRetention {
    Full,
    SummaryOnly,
}

/// A completed run. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub parameters:     SimulationParameters,
    pub final_pressure: Grid,
    pub final_wear:     Grid,

    pub comfort_history: Vec<ComfortRecord>,
    /// Empty under SummaryOnly retention.
    pub pressure_history: Vec<Grid>,
    /// Empty under SummaryOnly retention.
    pub wear_history: Vec<Grid>,
    /// Wear history scaled by the visibility gain, for display only.
    /// Empty under SummaryOnly retention.
    pub wear_history_visible: Vec<Grid>,

    pub scenario_summary:  ScenarioSummary,
    pub alignment_summary: AlignmentSummary,
    pub model_assumptions: ModelAssumptions,
}

impl SimulationResult {
    pub fn final_comfort(&self) -> i64 {
        self.comfort_history
            .last()
            .map(|c| c.comfort_index)
            .unwrap_or(0)
    }
}

/// Per-side digest used in comparison reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDigest {
    pub scenario_summary:  ScenarioSummary,
    pub alignment_summary: AlignmentSummary,
    pub final_comfort:     i64,
    pub mean_wear:         f64,
    pub max_wear:          f64,
}

impl ScenarioDigest {
    fn of(result: &SimulationResult) -> Self {
        Self {
            scenario_summary:  result.scenario_summary.clone(),
            alignment_summary: result.alignment_summary.clone(),
            final_comfort:     result.final_comfort(),
            mean_wear:         result.final_wear.mean(),
            max_wear:          result.final_wear.max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub baseline:          ScenarioDigest,
    pub variant:           ScenarioDigest,
    pub what_if_analysis:  ComparisonResult,
    pub model_assumptions: ModelAssumptions,
}

/// One in-flight simulation run. Owns all of its grids and histories
/// exclusively; two runs never share state.
pub struct SimulationRun {
    config:    ModelConfig,
    retention: HistoryRetention,
    state:     RunState,
    step:      Step,

    parameters:   SimulationParameters,
    target_force: f64,
    base_grid:    Grid,

    pressure:          Grid,
    previous_pressure: Option<Grid>,
    wear:              Grid,

    comfort_history:      Vec<ComfortRecord>,
    pressure_history:     Vec<Grid>,
    wear_history:         Vec<Grid>,
    wear_history_visible: Vec<Grid>,

    // Scalar series collected online so analysis is identical under
    // both retention policies.
    wear_mean_series:     Vec<f64>,
    pressure_delta_series: Vec<f64>,

    scenario_summary:  Option<ScenarioSummary>,
    alignment_summary: Option<AlignmentSummary>,
}

impl SimulationRun {
    pub fn new(
        inputs: &SimulationInputs,
        config: &ModelConfig,
        retention: HistoryRetention,
    ) -> Self {
        let parameters = normalize_inputs(inputs, config);
        let base_grid = generate_base_field(&parameters, config);
        let target_force = parameters.load_factor * parameters.activity_load;

        Self {
            config: config.clone(),
            retention,
            state: RunState::Initialized,
            step: 0,
            pressure: base_grid.clone(),
            previous_pressure: None,
            wear: Grid::zeros(config.grid_rows, config.grid_cols),
            base_grid,
            parameters,
            target_force,
            comfort_history: Vec::new(),
            pressure_history: Vec::new(),
            wear_history: Vec::new(),
            wear_history_visible: Vec::new(),
            wear_mean_series: Vec::new(),
            pressure_delta_series: Vec::new(),
            scenario_summary: None,
            alignment_summary: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Advance one step. This is the core simulation step.
    fn advance(&mut self) {
        assert_eq!(self.state, RunState::Running, "advance() outside Running state");

        let evolved = evolve_pressure(
            &self.pressure,
            &self.base_grid,
            self.step,
            self.parameters.activity_variation,
        );

        let constrained = apply_constraints(&evolved, self.target_force, &self.config);

        let comfort = compute_comfort(&constrained, self.previous_pressure.as_ref(), &self.config);

        let wear = accumulate_wear(
            &self.wear,
            &constrained,
            self.previous_pressure.as_ref(),
            self.parameters.durability_factor,
            self.parameters.activity_wear_rate,
            &self.config,
        );

        if let Some(prev) = &self.previous_pressure {
            self.pressure_delta_series.push(constrained.mean_abs_diff(prev));
        }
        self.wear_mean_series.push(wear.mean());
        self.comfort_history.push(comfort);

        if self.retention == HistoryRetention::Full {
            self.pressure_history.push(constrained.clone());
            self.wear_history.push(wear.clone());
            self.wear_history_visible
                .push(wear.scale(self.config.wear_visibility_gain));
        }

        self.previous_pressure = Some(constrained.clone());
        self.pressure = constrained;
        self.wear = wear;
        self.step += 1;
    }

    /// Run `steps` iterations. The cancellation flag, when present, is
    /// checked once per iteration, never mid-iteration.
    pub fn run(&mut self, steps: usize, cancel: Option<&AtomicBool>) -> SimResult<()> {
        assert_eq!(self.state, RunState::Initialized, "run() called twice");
        self.state = RunState::Running;

        for step in 0..steps {
            if let Some(flag) = cancel {
                if flag.load(Ordering::SeqCst) {
                    return Err(SimError::Cancelled { step });
                }
            }
            self.advance();

            if step > 0 && step % 1000 == 0 {
                log::debug!("step {step}/{steps}");
            }
        }

        Ok(())
    }

    /// Post-run analysis: trend extraction, scenario classification,
    /// and comfort/wear alignment.
    pub fn analyze(&mut self) {
        assert_eq!(self.state, RunState::Running, "analyze() before run()");
        assert!(!self.comfort_history.is_empty(), "analyze() on empty history");

        let trend = analyze_trends(
            &self.comfort_history,
            &self.wear_mean_series,
            &self.pressure_delta_series,
        );
        self.scenario_summary = Some(classify_scenario(&trend));
        self.alignment_summary = Some(align_comfort_and_wear(
            &self.comfort_history,
            &self.wear_mean_series,
        ));
        self.state = RunState::Analyzed;
    }

    /// Consume the run into its immutable result.
    pub fn finish(mut self) -> SimulationResult {
        assert_eq!(self.state, RunState::Analyzed, "finish() before analyze()");
        self.state = RunState::Done;

        SimulationResult {
            parameters:           self.parameters,
            final_pressure:       self.pressure,
            final_wear:           self.wear,
            comfort_history:      self.comfort_history,
            pressure_history:     self.pressure_history,
            wear_history:         self.wear_history,
            wear_history_visible: self.wear_history_visible,
            scenario_summary:     self.scenario_summary.expect("analyzed"),
            alignment_summary:    self.alignment_summary.expect("analyzed"),
            model_assumptions:    ModelAssumptions::canonical(),
        }
    }
}

/// Engine facade: configuration plus run options.
pub struct SimEngine {
    config:    ModelConfig,
    retention: HistoryRetention,
}

impl SimEngine {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            retention: HistoryRetention::Full,
        }
    }

    pub fn with_retention(mut self, retention: HistoryRetention) -> Self {
        self.retention = retention;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Run one simulation. `steps` of None uses the config default.
    pub fn run_simulation(
        &self,
        inputs: &SimulationInputs,
        steps: Option<usize>,
    ) -> SimResult<SimulationResult> {
        self.run_with_cancel(inputs, steps, None)
    }

    /// Run one simulation with a cooperative cancellation flag.
    pub fn run_simulation_with_cancel(
        &self,
        inputs: &SimulationInputs,
        steps: Option<usize>,
        cancel: &AtomicBool,
    ) -> SimResult<SimulationResult> {
        self.run_with_cancel(inputs, steps, Some(cancel))
    }

    fn run_with_cancel(
        &self,
        inputs: &SimulationInputs,
        steps: Option<usize>,
        cancel: Option<&AtomicBool>,
    ) -> SimResult<SimulationResult> {
        let steps = steps.unwrap_or(self.config.default_steps);
        if steps == 0 {
            return Err(SimError::invalid_input("steps", "must be a positive integer"));
        }

        log::info!(
            "simulation start: activity={} steps={steps}",
            inputs.activity_mode.label()
        );

        let mut run = SimulationRun::new(inputs, &self.config, self.retention);
        run.run(steps, cancel)?;
        run.analyze();
        let result = run.finish();

        log::info!(
            "simulation done: comfort={} stability={} regime={}",
            result.final_comfort(),
            result.scenario_summary.stability.label(),
            result.alignment_summary.alignment_regime.label()
        );

        Ok(result)
    }

    /// Run baseline and variant independently, then compare.
    pub fn run_scenario_comparison(
        &self,
        baseline_inputs: &SimulationInputs,
        variant_inputs: &SimulationInputs,
        steps: Option<usize>,
    ) -> SimResult<ComparisonReport> {
        let baseline = self.run_simulation(baseline_inputs, steps)?;
        let variant = self.run_simulation(variant_inputs, steps)?;

        let what_if_analysis = compare_scenarios(&baseline, &variant);

        Ok(ComparisonReport {
            baseline: ScenarioDigest::of(&baseline),
            variant:  ScenarioDigest::of(&variant),
            what_if_analysis,
            model_assumptions: baseline.model_assumptions,
        })
    }
}

impl Default for SimEngine {
    fn default() -> Self {
        SimEngine::new(ModelConfig::builtin())
    }
}
