//! Lensing-deflection model.
//!
//! A point-mass lens gives the baryonic Einstein angle
//!
//! ```text
//! θ_bar = sqrt( 4 G M / c² · D_LS / (D_L D_S) )
//! ```
//!
//! The baryonic acceleration at the Einstein radius `g_bar = G M / (θ_bar D_L)²`
//! sets the phase boost, and the lens redshift sets a refraction index
//! `η_C = 1 + β ln(1 + z_L)`:
//!
//! ```text
//! θ_trr = θ_bar · sqrt(boost(g_bar / a0)) · η_C
//! ```
//!
//! Note that `θ_bar² ∝ M`, so `g_bar` (and therefore the boost) does not depend on
//! the trial mass at fixed distances.

use crate::constants::{CLUSTER_GAS_MULTIPLIER, PhysicalConstants, STELLAR_MASS_UNIT};
use crate::math::{LensDistances, phase_boost};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensingPrediction {
    /// TRR Einstein angle [arcsec].
    pub theta_trr: f64,
    /// Point-mass baryonic Einstein angle [arcsec].
    pub theta_baryonic: f64,
    /// Refraction index η_C.
    pub eta_c: f64,
    /// Baryonic acceleration at the Einstein radius [m/s²].
    pub g_bar: f64,
    pub phase_boost: f64,
    /// Baryonic lens mass [kg].
    pub mass_kg: f64,
}

/// Baryonic lens mass [kg] for a stellar mass in 10¹¹ M_sun.
pub fn baryonic_mass_kg(consts: &PhysicalConstants, stellar_mass: f64, ml_factor: f64, is_cluster: bool) -> f64 {
    let gas = if is_cluster { CLUSTER_GAS_MULTIPLIER } else { 1.0 };
    (stellar_mass * ml_factor * gas) * STELLAR_MASS_UNIT * consts.m_sun
}

/// Point-mass Einstein angle [rad] for a mass in kg.
pub fn point_mass_einstein_angle(consts: &PhysicalConstants, distances: &LensDistances, mass_kg: f64) -> Option<f64> {
    let ratio = distances.lensing_ratio()?;
    let mass_term = (4.0 * consts.g * mass_kg) / (consts.c * consts.c);
    let theta = (mass_term * ratio).sqrt();
    (theta.is_finite() && theta > 0.0).then_some(theta)
}

/// Predict the TRR Einstein angle for a lens of known mass.
pub fn lensing_from_mass(
    consts: &PhysicalConstants,
    distances: &LensDistances,
    z_lens: f64,
    mass_kg: f64,
) -> Option<LensingPrediction> {
    let theta_bar_rad = point_mass_einstein_angle(consts, distances, mass_kg)?;

    let einstein_radius_m = theta_bar_rad * distances.d_l;
    let g_bar = (consts.g * mass_kg) / (einstein_radius_m * einstein_radius_m);
    let boost = phase_boost(g_bar / consts.a0);
    let eta_c = consts.refraction_index(z_lens);

    let theta_trr = theta_bar_rad * boost.sqrt() * eta_c * consts.rad_to_arcsec;
    if !theta_trr.is_finite() {
        return None;
    }

    Some(LensingPrediction {
        theta_trr,
        theta_baryonic: theta_bar_rad * consts.rad_to_arcsec,
        eta_c,
        g_bar,
        phase_boost: boost,
        mass_kg,
    })
}

/// Predict the TRR Einstein angle for a trial mass-to-light factor.
pub fn lensing_prediction(
    consts: &PhysicalConstants,
    distances: &LensDistances,
    z_lens: f64,
    stellar_mass: f64,
    ml_factor: f64,
    is_cluster: bool,
) -> Option<LensingPrediction> {
    let mass_kg = baryonic_mass_kg(consts, stellar_mass, ml_factor, is_cluster);
    lensing_from_mass(consts, distances, z_lens, mass_kg)
}
