//! Physical constants of the TRR model.
//!
//! Everything the forward models need lives in one immutable table. Model
//! functions take `&PhysicalConstants` instead of reaching for globals so a test
//! can switch off the viscosity term (`beta = 0`) without touching the code.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Vacuum viscosity coefficient β.
    pub beta: f64,
    /// Acceleration scale a₀ [m/s²].
    pub a0: f64,
    /// Gravitational constant G [m³/(kg·s²)].
    pub g: f64,
    /// Speed of light [m/s].
    pub c: f64,
    /// Solar mass [kg].
    pub m_sun: f64,
    /// Meters per kiloparsec.
    pub kpc_to_m: f64,
    /// Meters per megaparsec.
    pub mpc_to_m: f64,
    /// Hubble constant [km/s/Mpc].
    pub h0_km_s_mpc: f64,
    /// Speed of light [km/s].
    pub c_km_s: f64,
    /// Arcseconds per radian.
    pub rad_to_arcsec: f64,
}

impl PhysicalConstants {
    pub const TRR: PhysicalConstants = PhysicalConstants {
        beta: 0.028006,
        a0: 1.2001e-10,
        g: 6.67430e-11,
        c: 299_792_458.0,
        m_sun: 1.989e30,
        kpc_to_m: 3.086e19,
        mpc_to_m: 3.086e22,
        h0_km_s_mpc: 70.0,
        c_km_s: 299_792.458,
        rad_to_arcsec: 206_264.806,
    };

    /// Hubble distance `c / H0` in Mpc.
    pub fn hubble_distance_mpc(&self) -> f64 {
        self.c_km_s / self.h0_km_s_mpc
    }

    /// Refraction index `η_C = 1 + β ln(1 + z_lens)`.
    pub fn refraction_index(&self, z_lens: f64) -> f64 {
        1.0 + self.beta * (1.0 + z_lens).ln()
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::TRR
    }
}

/// Masses are entered in units of 10¹¹ M_sun.
pub const STELLAR_MASS_UNIT: f64 = 1e11;

/// Gas mass multiplier applied when the lens is a galaxy cluster.
pub const CLUSTER_GAS_MULTIPLIER: f64 = 7.0;

/// Fixed offset between bulge and disk mass-to-light ratios.
pub const ML_BULGE_OFFSET: f64 = 0.2;

/// km²/s² → m²/s².
pub const KM2_TO_M2: f64 = 1e6;
