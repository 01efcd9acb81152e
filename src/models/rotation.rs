//! Rotation-curve model.
//!
//! Given baryonic velocity components at one radius and a trial disk
//! mass-to-light ratio, predict the TRR circular velocity:
//!
//! ```text
//! v_bar² = v_gas² + Υ_disk v_disk² + Υ_bulge v_bulge²      (Υ_bulge = Υ_disk + 0.2)
//! g_bar  = v_bar² / r
//! g_trr  = g_bar · boost(g_bar / a0) · (1 + β f)
//! v_trr  = sqrt(g_trr · r)
//! ```
//!
//! The impact factor is the bulge-to-rest velocity ratio
//! `f = v_bulge / (v_disk + |v_gas| + 0.1)`.

use crate::constants::{KM2_TO_M2, ML_BULGE_OFFSET, PhysicalConstants};
use crate::domain::RotationInput;
use crate::math::phase_acceleration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPrediction {
    /// TRR circular velocity [km/s].
    pub v_trr: f64,
    /// Pure-baryonic circular velocity [km/s].
    pub v_baryonic: f64,
    /// Baryonic acceleration [m/s²].
    pub g_bar: f64,
    /// TRR acceleration [m/s²].
    pub g_trr: f64,
    pub impact_factor: f64,
}

/// Morphology-dependent weight of the viscosity term.
pub fn impact_factor(v_gas: f64, v_disk: f64, v_bulge: f64) -> f64 {
    v_bulge / (v_disk + v_gas.abs() + 0.1)
}

/// Centripetal acceleration [m/s²] for a velocity² in km²/s² at `radius_kpc`.
pub fn centripetal_acceleration(consts: &PhysicalConstants, v_sq_km: f64, radius_kpc: f64) -> f64 {
    (v_sq_km * KM2_TO_M2) / (radius_kpc * consts.kpc_to_m)
}

/// Predict the TRR rotation velocity for a disk mass-to-light ratio.
///
/// Returns `None` when the baryonic velocity² is negative or the result is not
/// finite; grid searches skip such candidates.
pub fn rotation_prediction(
    consts: &PhysicalConstants,
    input: &RotationInput,
    ml_disk: f64,
) -> Option<RotationPrediction> {
    let ml_bulge = ml_disk + ML_BULGE_OFFSET;
    let v_bar_sq = input.v_gas * input.v_gas
        + ml_disk * input.v_disk * input.v_disk
        + ml_bulge * input.v_bulge * input.v_bulge;
    if !(v_bar_sq.is_finite() && v_bar_sq >= 0.0) {
        return None;
    }

    let radius_m = input.radius_kpc * consts.kpc_to_m;
    let g_bar = centripetal_acceleration(consts, v_bar_sq, input.radius_kpc);
    let f = impact_factor(input.v_gas, input.v_disk, input.v_bulge);
    let g_trr = phase_acceleration(g_bar, consts.a0) * (1.0 + consts.beta * f);
    let v_trr = (g_trr * radius_m / KM2_TO_M2).sqrt();

    if !(g_trr.is_finite() && v_trr.is_finite()) {
        return None;
    }

    Some(RotationPrediction {
        v_trr,
        v_baryonic: v_bar_sq.sqrt(),
        g_bar,
        g_trr,
        impact_factor: f,
    })
}
