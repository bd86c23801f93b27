//! Post-run analysis — trend extraction, scenario classification, and
//! comfort/wear alignment.
//!
//! RULES:
//!   - Analysis only reads collected histories; it never mutates them.
//!   - Every classification is an ordered rule chain. First match wins;
//!     reordering the rules changes tie-break behavior and is a bug.

use crate::comfort::{ComfortRecord, PenaltyKind};
use crate::grid::round_dp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How many trailing inter-step transitions feed the pressure-delta
/// stability signal.
const PRESSURE_DELTA_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Degrading,
    Stable,
    Saturated,
}

impl Stability {
    pub fn label(self) -> &'static str {
        match self {
            Stability::Degrading => "degrading",
            Stability::Stable    => "stable",
            Stability::Saturated => "saturated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioType {
    #[serde(rename = "imbalance-driven")]
    ImbalanceDriven,
    #[serde(rename = "fatigue-driven")]
    FatigueDriven,
    #[serde(rename = "overload-driven")]
    OverloadDriven,
    #[serde(rename = "stable")]
    Stable,
}

impl ScenarioType {
    pub fn label(self) -> &'static str {
        match self {
            ScenarioType::ImbalanceDriven => "imbalance-driven",
            ScenarioType::FatigueDriven   => "fatigue-driven",
            ScenarioType::OverloadDriven  => "overload-driven",
            ScenarioType::Stable          => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentRegime {
    TransientDiscomfort,
    FatigueDrivenDegradation,
    HiddenWearRisk,
    Balanced,
}

impl AlignmentRegime {
    pub fn label(self) -> &'static str {
        match self {
            AlignmentRegime::TransientDiscomfort      => "transient_discomfort",
            AlignmentRegime::FatigueDrivenDegradation => "fatigue_driven_degradation",
            AlignmentRegime::HiddenWearRisk           => "hidden_wear_risk",
            AlignmentRegime::Balanced                 => "balanced",
        }
    }
}

/// Raw trend signals extracted from the run histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub comfort_slope:     i64,
    pub wear_accelerating: bool,
    pub pressure_delta:    f64,
    /// Up to two penalty factors with the largest summed contribution.
    pub dominant_factors:  Vec<PenaltyKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario_type:    ScenarioType,
    pub stability:        Stability,
    pub dominant_factors: Vec<PenaltyKind>,
    pub explanation:      String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSummary {
    pub alignment_regime:        AlignmentRegime,
    pub comfort_drop_normalized: f64,
    pub wear_growth_normalized:  f64,
    pub interpretation:          String,
}

/// Extract trend signals from the per-step scalar series.
///
/// `wear_means` holds the mean of the wear grid after each step;
/// `pressure_deltas` holds the mean absolute difference between each
/// consecutive pair of constrained pressure grids (one entry per
/// transition, so one fewer than the step count).
pub fn analyze_trends(
    comfort_history: &[ComfortRecord],
    wear_means: &[f64],
    pressure_deltas: &[f64],
) -> TrendAnalysis {
    assert!(!comfort_history.is_empty() && !wear_means.is_empty());

    let comfort_slope = comfort_history[comfort_history.len() - 1].comfort_index
        - comfort_history[0].comfort_index;

    let mid = wear_means.len() / 2;
    let early_wear_rate = wear_means[mid] - wear_means[0];
    let late_wear_rate = wear_means[wear_means.len() - 1] - wear_means[mid];
    let wear_accelerating = late_wear_rate > early_wear_rate * 1.2;

    let pressure_delta = if pressure_deltas.is_empty() {
        0.0
    } else {
        let tail = &pressure_deltas[pressure_deltas.len().saturating_sub(PRESSURE_DELTA_WINDOW)..];
        tail.iter().sum::<f64>() / tail.len() as f64
    };

    let mut totals: Vec<(PenaltyKind, f64)> =
        PenaltyKind::ALL.iter().map(|&k| (k, 0.0)).collect();
    for record in comfort_history {
        for (kind, total) in &mut totals {
            *total += record.penalties.get(*kind);
        }
    }
    // Stable sort: ties keep the weight-table order.
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    TrendAnalysis {
        comfort_slope,
        wear_accelerating,
        pressure_delta,
        dominant_factors: totals.iter().take(2).map(|(k, _)| *k).collect(),
    }
}

/// Ordered stability/type rules. First match wins.
pub fn classify_scenario(analysis: &TrendAnalysis) -> ScenarioSummary {
    let stability = if analysis.comfort_slope < -20 {
        Stability::Degrading
    } else if analysis.pressure_delta < 1e-3 {
        Stability::Stable
    } else {
        Stability::Saturated
    };

    let dominant = &analysis.dominant_factors;
    let scenario_type = if dominant.contains(&PenaltyKind::Asymmetry) {
        ScenarioType::ImbalanceDriven
    } else if dominant.contains(&PenaltyKind::HighPressureArea) {
        ScenarioType::FatigueDriven
    } else if dominant.contains(&PenaltyKind::PressurePeak) {
        ScenarioType::OverloadDriven
    } else {
        ScenarioType::Stable
    };

    let explanation = format!(
        "This scenario is {}, with system behavior classified as {}.",
        scenario_type.label().replace('-', " "),
        stability.label()
    );

    ScenarioSummary {
        scenario_type,
        stability,
        dominant_factors: dominant.clone(),
        explanation,
    }
}

/// Classify the relationship between comfort decline and wear growth.
pub fn align_comfort_and_wear(
    comfort_history: &[ComfortRecord],
    wear_means: &[f64],
) -> AlignmentSummary {
    assert!(!comfort_history.is_empty() && !wear_means.is_empty());

    let first_comfort = comfort_history[0].comfort_index;
    let last_comfort = comfort_history[comfort_history.len() - 1].comfort_index;
    let comfort_drop = (first_comfort - last_comfort) as f64;
    let wear_growth = wear_means[wear_means.len() - 1] - wear_means[0];

    let comfort_drop_norm = comfort_drop / (first_comfort as f64).max(1.0);
    let wear_growth_norm = wear_growth / wear_means[wear_means.len() - 1].max(1e-6);

    let (regime, interpretation) = if comfort_drop_norm > 0.3 && wear_growth_norm < 0.2 {
        (
            AlignmentRegime::TransientDiscomfort,
            "Comfort decreases without significant material wear. \
             Discomfort is likely due to pressure distribution rather than degradation.",
        )
    } else if comfort_drop_norm > 0.2 && wear_growth_norm > 0.3 {
        (
            AlignmentRegime::FatigueDrivenDegradation,
            "Comfort declines alongside accelerating wear. \
             Sustained pressure is degrading the sole material over time.",
        )
    } else if comfort_drop_norm < 0.1 && wear_growth_norm > 0.3 {
        (
            AlignmentRegime::HiddenWearRisk,
            "Material wear accumulates despite acceptable comfort levels. \
             Potential long-term degradation without immediate discomfort.",
        )
    } else {
        (
            AlignmentRegime::Balanced,
            "Comfort and wear evolve proportionally with no dominant risk pattern.",
        )
    };

    AlignmentSummary {
        alignment_regime:        regime,
        comfort_drop_normalized: round_dp(comfort_drop_norm, 3),
        wear_growth_normalized:  round_dp(wear_growth_norm, 3),
        interpretation:          interpretation.to_string(),
    }
}
