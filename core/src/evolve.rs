//! Temporal evolution — one deterministic step transform.
//!
//! A heel-to-toe sinusoidal load shift whose phase advances with the
//! step index modulates the base field, then the previous grid relaxes
//! exponentially toward that target. No randomness, no internal state:
//! pure function of (previous, base, step, variation).

use crate::grid::Grid;
use crate::types::Step;
use std::f64::consts::PI;

/// Relaxation rate toward the modulated target. Controls inertia.
pub const RELAXATION_RATE: f64 = 0.15;

/// Phase advance per step of the longitudinal load shift.
const PHASE_RATE: f64 = 0.1;

/// Deterministic heel-to-toe shift profile for one step.
fn longitudinal_load_shift(step: Step, variation: f64, rows: usize) -> Vec<f64> {
    let phase = step as f64 * PHASE_RATE;
    (0..rows)
        .map(|i| {
            let x = PI * i as f64 / (rows - 1) as f64;
            variation * (x + phase).sin()
        })
        .collect()
}

/// Evolve a pressure field by one step with temporal memory.
pub fn evolve_pressure(
    previous: &Grid,
    base: &Grid,
    step: Step,
    activity_variation: f64,
) -> Grid {
    let shift = longitudinal_load_shift(step, activity_variation, base.rows());
    let alpha = RELAXATION_RATE.clamp(0.0, 1.0);

    base.map_indexed(|i, j, base_value| {
        let target = base_value * (1.0 + shift[i]);
        (1.0 - alpha) * previous.get(i, j) + alpha * target
    })
}
