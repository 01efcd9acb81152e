//! Phase interpolation between the Newtonian and boosted regimes.
//!
//! With `x = g_bar / a0`:
//!
//! - `boost(x) = 1 / (1 - exp(-sqrt(x)))`
//! - `g_phase = g_bar · boost(x)`
//!
//! For `x ≫ 1` the boost tends to 1 (Newtonian limit). For `x → 0` it grows like
//! `1/sqrt(x)`, so `g_phase → sqrt(g_bar · a0)`.
//!
//! The boost is evaluated literally (no `expm1`). Cancellation costs about
//! `1e-16 / sqrt(x)` relative precision.

/// Phase boost factor for a dimensionless acceleration `x = g_bar / a0`.
///
/// Non-positive `x` has no finite boost; callers go through
/// [`phase_acceleration`], which handles `g_bar = 0` by its limit.
pub fn phase_boost(x: f64) -> f64 {
    1.0 / (1.0 - (-x.sqrt()).exp())
}

/// Phase-interpolated acceleration `g_bar · boost(g_bar / a0)`.
pub fn phase_acceleration(g_bar: f64, a0: f64) -> f64 {
    if g_bar <= 0.0 {
        return 0.0;
    }
    g_bar * phase_boost(g_bar / a0)
}

/// TRR excess over Newtonian gravity: `g_phase - g_bar`.
pub fn viscous_drag(g_bar: f64, a0: f64) -> f64 {
    phase_acceleration(g_bar, a0) - g_bar.max(0.0)
}
