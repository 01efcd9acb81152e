//! Parameter grid generation.
//!
//! Every fit is a deterministic brute-force walk over a small grid. Grids are
//! inclusive of both ends and ordered ascending, so "first seen wins" tie
//! breaking in the search means "smallest parameter wins".

use crate::domain::GridRange;
use crate::error::AppError;

/// Slack when deciding whether `max` is reached by a whole number of steps.
const STEP_EPS: f64 = 1e-9;

/// Largest grid a single search may walk.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Inclusive linear grid from `min` to `max` with spacing `step`.
///
/// When `1/step` is a whole number the values are built as `k / (1/step)`, so a
/// 0.01 grid lands on exactly the same doubles as `k / 100.0`.
pub fn linear_grid(min: f64, max: f64, step: f64) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && max >= min) {
        return Err(AppError::invalid_input(format!(
            "Invalid grid range: min={min}, max={max} (must be finite and max>=min)."
        )));
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(AppError::invalid_input(format!("Grid step must be finite and > 0, got {step}.")));
    }

    // Counted in f64 first: a tiny step would saturate the integer cast.
    let intervals = ((max - min) / step + STEP_EPS).floor();
    if !(intervals < MAX_GRID_POINTS as f64) {
        return Err(AppError::invalid_input(format!(
            "Grid [{min}, {max}] with step {step} exceeds {MAX_GRID_POINTS} points; use a coarser step."
        )));
    }
    let count = intervals as usize + 1;

    let inv = 1.0 / step;
    if (inv - inv.round()).abs() < STEP_EPS * inv.max(1.0) {
        let denom = inv.round();
        let k0 = (min * denom).round();
        if (k0 / denom - min).abs() < STEP_EPS {
            return Ok((0..count).map(|i| (k0 + i as f64) / denom).collect());
        }
    }

    Ok((0..count).map(|i| min + step * i as f64).collect())
}

/// Grid for a [`GridRange`].
pub fn range_grid(range: &GridRange) -> Result<Vec<f64>, AppError> {
    linear_grid(range.min, range.max, range.step)
}
