//! Generic brute-force grid search.
//!
//! Given:
//! - an observed value `y_obs > 0`
//! - a finite grid of candidate parameters
//! - a forward model returning `Option<output>` per candidate
//!
//! we evaluate every candidate in grid order, score it by relative error
//! `|y_obs - y_pred| / y_obs`, and keep the best one. Only strict improvements
//! replace the incumbent, so the first candidate wins ties.

use log::debug;

use crate::domain::SearchStats;
use crate::error::AppError;

/// Best candidate of a grid search.
#[derive(Debug, Clone)]
pub struct GridFit<P, O> {
    pub param: P,
    /// Model output at `param`.
    pub output: O,
    /// The scalar compared against the observation.
    pub predicted: f64,
    pub relative_error: f64,
    pub accuracy_percent: f64,
    /// Grid index of `param`.
    pub index: usize,
    pub stats: SearchStats,
    /// Every time the incumbent changed: `(grid index, new best error)`.
    pub improvements: Vec<(usize, f64)>,
}

/// `|observed - predicted| / observed`.
pub fn relative_error(observed: f64, predicted: f64) -> f64 {
    (observed - predicted).abs() / observed
}

/// `max(0, 100 - 100 · error)`.
pub fn accuracy_percent(relative_error: f64) -> f64 {
    (100.0 - relative_error * 100.0).max(0.0)
}

/// Reject observations that cannot anchor a relative error.
pub fn check_observed(what: &str, observed: f64) -> Result<(), AppError> {
    if observed.is_finite() && observed > 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_observation(what, observed))
    }
}

struct Incumbent<P, O> {
    param: P,
    output: O,
    predicted: f64,
    error: f64,
    index: usize,
}

struct Walk<P, O> {
    best: Option<Incumbent<P, O>>,
    stats: SearchStats,
    improvements: Vec<(usize, f64)>,
}

/// Walk `grid` and return the candidate with the lowest relative error.
///
/// `predict` returns `None` for non-physical candidates; those (and candidates
/// whose `value` is not finite) are skipped. Fails with an invalid-observation
/// error if `observed` is not finite and positive, and with a fit-failed error if
/// no candidate survives.
pub fn grid_search<P, O, F, V>(
    grid: &[P],
    observed: f64,
    mut predict: F,
    value: V,
) -> Result<GridFit<P, O>, AppError>
where
    P: Copy,
    F: FnMut(P) -> Option<O>,
    V: Fn(&O) -> f64,
{
    check_observed("observed value", observed)?;
    if grid.is_empty() {
        return Err(AppError::invalid_input("Parameter grid is empty."));
    }

    let start = Walk {
        best: None,
        stats: SearchStats {
            grid_points: grid.len(),
            ..SearchStats::default()
        },
        improvements: Vec::new(),
    };

    let walk = grid.iter().enumerate().fold(start, |mut walk, (index, &param)| {
        let Some(output) = predict(param) else {
            walk.stats.skipped += 1;
            return walk;
        };
        let predicted = value(&output);
        if !predicted.is_finite() {
            walk.stats.skipped += 1;
            return walk;
        }
        walk.stats.evaluated += 1;

        let error = relative_error(observed, predicted);
        let improves = walk.best.as_ref().is_none_or(|b| error < b.error);
        if improves {
            walk.improvements.push((index, error));
            walk.best = Some(Incumbent {
                param,
                output,
                predicted,
                error,
                index,
            });
        }
        walk
    });

    debug!(
        "grid search: {} points, {} evaluated, {} skipped, {} improvements",
        walk.stats.grid_points,
        walk.stats.evaluated,
        walk.stats.skipped,
        walk.improvements.len()
    );

    let Some(best) = walk.best else {
        return Err(AppError::fit_failed(format!(
            "no valid candidate among {} grid points.",
            grid.len()
        )));
    };

    Ok(GridFit {
        param: best.param,
        output: best.output,
        predicted: best.predicted,
        relative_error: best.error,
        accuracy_percent: accuracy_percent(best.error),
        index: best.index,
        stats: walk.stats,
        improvements: walk.improvements,
    })
}
