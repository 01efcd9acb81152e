//! Angular-diameter distances for a flat ΛCDM-like expansion history.
//!
//! ```text
//! D_A(z1, z2) = (c / H0) / (1 + z2) · ∫_{z1}^{z2} dz / sqrt(Ωm (1+z)^3 + ΩΛ)
//! ```
//!
//! The integral is a left Riemann sum with a fixed step count. The discretization
//! is part of the model: reported accuracies depend on it, so there is no
//! adaptive refinement here.

use crate::constants::PhysicalConstants;

/// Matter density parameter.
pub const OMEGA_M: f64 = 0.3;

/// Dark-energy density parameter.
pub const OMEGA_LAMBDA: f64 = 0.7;

/// Riemann-sum step count, independent of the interval width.
pub const INTEGRATION_STEPS: usize = 500;

/// `1 / E(z)` for the assumed expansion history.
pub fn inverse_hubble_rate(z: f64) -> f64 {
    1.0 / (OMEGA_M * (1.0 + z).powi(3) + OMEGA_LAMBDA).sqrt()
}

/// Angular-diameter distance between `z1` and `z2` in meters.
///
/// Returns `0.0` when `z1 >= z2`. Callers that divide by a distance must check
/// for this sentinel.
pub fn angular_diameter_distance(consts: &PhysicalConstants, z1: f64, z2: f64) -> f64 {
    if z1 >= z2 {
        return 0.0;
    }

    let dz = (z2 - z1) / INTEGRATION_STEPS as f64;
    let mut integral = 0.0;
    for i in 0..INTEGRATION_STEPS {
        integral += inverse_hubble_rate(z1 + i as f64 * dz) * dz;
    }

    (consts.hubble_distance_mpc() * integral / (1.0 + z2)) * consts.mpc_to_m
}

/// The three distances a thin lens needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensDistances {
    /// Observer → lens.
    pub d_l: f64,
    /// Observer → source.
    pub d_s: f64,
    /// Lens → source.
    pub d_ls: f64,
}

impl LensDistances {
    pub fn new(consts: &PhysicalConstants, z_lens: f64, z_source: f64) -> Self {
        Self {
            d_l: angular_diameter_distance(consts, 0.0, z_lens),
            d_s: angular_diameter_distance(consts, 0.0, z_source),
            d_ls: angular_diameter_distance(consts, z_lens, z_source),
        }
    }

    /// Reuse a known observer→lens distance and only integrate the source legs.
    pub fn with_lens_distance(consts: &PhysicalConstants, d_l: f64, z_lens: f64, z_source: f64) -> Self {
        Self {
            d_l,
            d_s: angular_diameter_distance(consts, 0.0, z_source),
            d_ls: angular_diameter_distance(consts, z_lens, z_source),
        }
    }

    /// `D_LS / (D_L D_S)`; `None` if either observer distance is the zero sentinel.
    pub fn lensing_ratio(&self) -> Option<f64> {
        let denom = self.d_l * self.d_s;
        if denom > 0.0 && denom.is_finite() {
            Some(self.d_ls / denom)
        } else {
            None
        }
    }
}
