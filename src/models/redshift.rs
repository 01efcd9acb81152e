//! Source-redshift forward model.
//!
//! The lens redshift, mass, and M/L are fixed; the trial variable is the source
//! redshift, which moves `D_S` and `D_LS` and therefore the Einstein angle.
//!
//! Optionally the lensing mass is restricted to what a Hernquist profile with the
//! given effective radius encloses inside the baryonic Einstein radius:
//!
//! ```text
//! a = R_e / 1.8153,    M(<R_E) = M · (R_E / (R_E + a))²
//! ```
//!
//! `R_E` is taken from the total-mass Einstein angle (a single refinement step).

use crate::constants::PhysicalConstants;
use crate::domain::RedshiftInput;
use crate::math::LensDistances;
use crate::models::lensing::{LensingPrediction, baryonic_mass_kg, lensing_from_mass, point_mass_einstein_angle};

/// Ratio between a Hernquist profile's effective radius and its scale length.
pub const HERNQUIST_RE_TO_A: f64 = 1.8153;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedshiftPrediction {
    pub z_source: f64,
    pub lensing: LensingPrediction,
    /// Fraction of the total mass used for lensing (1.0 without refinement).
    pub enclosed_fraction: f64,
}

/// Hernquist mass fraction enclosed within `radius_kpc`.
pub fn hernquist_enclosed_fraction(radius_kpc: f64, effective_radius_kpc: f64) -> f64 {
    let a = effective_radius_kpc / HERNQUIST_RE_TO_A;
    let u = radius_kpc / (radius_kpc + a);
    u * u
}

/// Predict the Einstein angle for a trial source redshift.
///
/// `d_l` is the observer→lens distance, which is constant across a search.
pub fn source_redshift_prediction(
    consts: &PhysicalConstants,
    input: &RedshiftInput,
    d_l: f64,
    z_source: f64,
) -> Option<RedshiftPrediction> {
    if z_source <= input.z_lens {
        return None;
    }
    let distances = LensDistances::with_lens_distance(consts, d_l, input.z_lens, z_source);
    let total_mass = baryonic_mass_kg(consts, input.stellar_mass, input.ml_factor, input.is_cluster);

    let enclosed_fraction = match input.effective_radius_kpc {
        Some(re) => {
            let theta = point_mass_einstein_angle(consts, &distances, total_mass)?;
            let einstein_radius_kpc = theta * distances.d_l / consts.kpc_to_m;
            hernquist_enclosed_fraction(einstein_radius_kpc, re)
        }
        None => 1.0,
    };

    let lensing = lensing_from_mass(consts, &distances, input.z_lens, total_mass * enclosed_fraction)?;
    Some(RedshiftPrediction {
        z_source,
        lensing,
        enclosed_fraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angular_diameter_distance;

    const C: PhysicalConstants = PhysicalConstants::TRR;

    fn input(effective_radius_kpc: Option<f64>) -> RedshiftInput {
        RedshiftInput {
            z_lens: 0.3,
            stellar_mass: 1.0,
            einstein_angle: 0.9,
            is_cluster: false,
            ml_factor: 1.0,
            effective_radius_kpc,
        }
    }

    #[test]
    fn matches_lensing_model_at_same_redshifts() {
        let d_l = angular_diameter_distance(&C, 0.0, 0.3);
        let p = source_redshift_prediction(&C, &input(None), d_l, 1.0).unwrap();
        let direct = crate::models::lensing_prediction(&C, &LensDistances::new(&C, 0.3, 1.0), 0.3, 1.0, 1.0, false)
            .unwrap();
        assert_eq!(p.lensing, direct);
        assert_eq!(p.enclosed_fraction, 1.0);
    }

    #[test]
    fn angle_grows_with_source_redshift() {
        let d_l = angular_diameter_distance(&C, 0.0, 0.3);
        let near = source_redshift_prediction(&C, &input(None), d_l, 0.5).unwrap();
        let far = source_redshift_prediction(&C, &input(None), d_l, 5.0).unwrap();
        assert!(far.lensing.theta_trr > near.lensing.theta_trr);
    }

    #[test]
    fn source_in_front_of_lens_is_rejected() {
        let d_l = angular_diameter_distance(&C, 0.0, 0.3);
        assert!(source_redshift_prediction(&C, &input(None), d_l, 0.3).is_none());
    }

    #[test]
    fn aperture_mass_reduces_the_angle() {
        let d_l = angular_diameter_distance(&C, 0.0, 0.3);
        let full = source_redshift_prediction(&C, &input(None), d_l, 2.0).unwrap();
        let aperture = source_redshift_prediction(&C, &input(Some(5.0)), d_l, 2.0).unwrap();
        assert!(aperture.enclosed_fraction > 0.0 && aperture.enclosed_fraction < 1.0);
        assert!(aperture.lensing.theta_trr < full.lensing.theta_trr);
    }

    #[test]
    fn hernquist_fraction_limits() {
        assert_eq!(hernquist_enclosed_fraction(0.0, 5.0), 0.0);
        assert!(hernquist_enclosed_fraction(1e6, 5.0) > 0.999);
    }
}
