//! Scenario comparison — causal, tradeoff-aware comparison between two
//! completed simulation runs.
//!
//! RULES:
//!   - The comparison only reads the two results; it owns neither.
//!   - Tradeoff and verdict classifications are ordered rule chains.
//!     First match wins.
//!   - Factor-shift lists preserve source order (baseline order for
//!     reduced, variant order for introduced) so output is
//!     deterministic.

use crate::comfort::PenaltyKind;
use crate::engine::SimulationResult;
use crate::grid::round_dp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeoffType {
    NoTradeoff,
    DurabilityTradeoff,
    ComfortTradeoff,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    StrictlyBetter,
    Tradeoff,
    Equivalent,
    Worse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentChange {
    pub from: crate::analysis::AlignmentRegime,
    pub to:   crate::analysis::AlignmentRegime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDeltas {
    pub comfort_delta:    i64,
    pub mean_wear_delta:  f64,
    pub max_wear_delta:   f64,
    pub alignment_change: AlignmentChange,
}

/// Dominant-factor membership changes between the two runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorShift {
    pub reduced:    Vec<PenaltyKind>,
    pub introduced: Vec<PenaltyKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanismAttribution {
    pub dominant_factor_shift: FactorShift,
    pub notes:                 Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffAnalysis {
    #[serde(rename = "type")]
    pub kind:    TradeoffType,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub classification: Verdict,
    pub rationale:      String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub outcome_deltas:        OutcomeDeltas,
    pub mechanism_attribution: MechanismAttribution,
    pub tradeoff_analysis:     TradeoffAnalysis,
    pub verdict:               VerdictSummary,
}

/// Compare a variant run against a baseline run.
pub fn compare_scenarios(baseline: &SimulationResult, variant: &SimulationResult) -> ComparisonResult {
    // 1. Raw outcome deltas.
    let base_comfort_end = baseline.final_comfort();
    let var_comfort_end = variant.final_comfort();
    let comfort_delta = var_comfort_end - base_comfort_end;

    let mean_wear_delta = variant.final_wear.mean() - baseline.final_wear.mean();
    let max_wear_delta = variant.final_wear.max() - baseline.final_wear.max();

    let base_alignment = baseline.alignment_summary.alignment_regime;
    let var_alignment = variant.alignment_summary.alignment_regime;

    // 2. Mechanism attribution.
    let base_factors = &baseline.scenario_summary.dominant_factors;
    let var_factors = &variant.scenario_summary.dominant_factors;

    let reduced: Vec<PenaltyKind> = base_factors
        .iter()
        .filter(|f| !var_factors.contains(f))
        .copied()
        .collect();
    let introduced: Vec<PenaltyKind> = var_factors
        .iter()
        .filter(|f| !base_factors.contains(f))
        .copied()
        .collect();

    let mut notes = Vec::new();
    if mean_wear_delta < 0.0 {
        notes.push("Wear reduction driven by material or pressure persistence effects.".to_string());
    }
    if comfort_delta > 0 {
        notes.push("Comfort improvement linked to reduced dominant pressure penalties.".to_string());
    }
    if base_alignment != var_alignment {
        notes.push(format!(
            "Alignment regime changed from {} to {}.",
            base_alignment.label(),
            var_alignment.label()
        ));
    }

    // 3. Tradeoff analysis.
    let (tradeoff_kind, tradeoff_summary) = if comfort_delta >= 0 && mean_wear_delta <= 0.0 {
        (
            TradeoffType::NoTradeoff,
            "Variant improves or preserves comfort while reducing wear.",
        )
    } else if comfort_delta < 0 && mean_wear_delta < 0.0 {
        (
            TradeoffType::DurabilityTradeoff,
            "Variant reduces wear at the cost of comfort.",
        )
    } else if comfort_delta > 0 && mean_wear_delta > 0.0 {
        (
            TradeoffType::ComfortTradeoff,
            "Variant improves comfort but increases wear.",
        )
    } else {
        (
            TradeoffType::Neutral,
            "Variant does not materially change comfort or wear.",
        )
    };

    // 4. Verdict.
    let (verdict, rationale) = match tradeoff_kind {
        TradeoffType::NoTradeoff => (
            Verdict::StrictlyBetter,
            "Variant dominates baseline on both experience and durability.".to_string(),
        ),
        TradeoffType::DurabilityTradeoff | TradeoffType::ComfortTradeoff => {
            (Verdict::Tradeoff, tradeoff_summary.to_string())
        }
        TradeoffType::Neutral => {
            if comfort_delta.abs() < 5 && mean_wear_delta.abs() < 0.01 {
                (
                    Verdict::Equivalent,
                    "Variant behaves similarly to baseline within tolerance.".to_string(),
                )
            } else {
                (
                    Verdict::Worse,
                    "Variant degrades outcomes without compensating benefits.".to_string(),
                )
            }
        }
    };

    ComparisonResult {
        outcome_deltas: OutcomeDeltas {
            comfort_delta,
            mean_wear_delta: round_dp(mean_wear_delta, 4),
            max_wear_delta:  round_dp(max_wear_delta, 4),
            alignment_change: AlignmentChange {
                from: base_alignment,
                to:   var_alignment,
            },
        },
        mechanism_attribution: MechanismAttribution {
            dominant_factor_shift: FactorShift { reduced, introduced },
            notes,
        },
        tradeoff_analysis: TradeoffAnalysis {
            kind:    tradeoff_kind,
            summary: tradeoff_summary.to_string(),
        },
        verdict: VerdictSummary {
            classification: verdict,
            rationale,
        },
    }
}
