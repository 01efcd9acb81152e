//! Stellar-stream tidal shear.
//!
//! Along an orbit between pericenter and apocenter, the TRR excess acceleration
//! over Newtonian gravity is the "viscous drag":
//!
//! ```text
//! g_bar = G M / r²
//! drag  = g_bar · boost(g_bar / a0) - g_bar
//! shear = |d drag / d r|, normalized by its maximum over the orbit
//! ```
//!
//! A stream ruptures where the normalized shear reaches the threshold.

use crate::constants::{PhysicalConstants, STELLAR_MASS_UNIT};
use crate::domain::{RuptureZone, ShearProfile, ShearSample, StreamInput};
use crate::math::{gradient, viscous_drag};

pub const DEFAULT_SAMPLES: usize = 500;
pub const DEFAULT_RUPTURE_THRESHOLD: f64 = 0.75;

/// `n` equally spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Compute the drag/shear profile of an orbit.
///
/// The caller enforces `apocenter > pericenter > 0` (see [`StreamInput::validate`]).
/// `samples` below 2 is raised to 2.
pub fn stream_shear_profile(
    consts: &PhysicalConstants,
    input: &StreamInput,
    samples: usize,
    threshold: f64,
) -> ShearProfile {
    let radii_kpc = linspace(input.pericenter_kpc, input.apocenter_kpc, samples.max(2));
    let radii_m: Vec<f64> = radii_kpc.iter().map(|r| r * consts.kpc_to_m).collect();
    let gm = consts.g * input.stellar_mass * STELLAR_MASS_UNIT * consts.m_sun;

    let drag: Vec<f64> = radii_m
        .iter()
        .map(|r| viscous_drag(gm / (r * r), consts.a0))
        .collect();

    let shear: Vec<f64> = gradient(&drag, &radii_m).into_iter().map(f64::abs).collect();
    let peak = shear
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &s)| match best {
            Some((_, b)) if b >= s => best,
            _ if s > 0.0 && s.is_finite() => Some((i, s)),
            _ => best,
        });
    let max_shear = peak.map_or(0.0, |(_, s)| s);
    let normalized: Vec<f64> = if max_shear > 0.0 {
        shear.iter().map(|s| s / max_shear).collect()
    } else {
        vec![0.0; shear.len()]
    };

    let samples: Vec<ShearSample> = radii_kpc
        .iter()
        .zip(drag.iter())
        .zip(normalized.iter())
        .map(|((&radius_kpc, &drag), &normalized_shear)| ShearSample {
            radius_kpc,
            drag,
            normalized_shear,
        })
        .collect();

    let rupture = rupture_zone(&samples, threshold);
    let peak_shear_radius_kpc = peak.map(|(i, _)| radii_kpc[i]);

    ShearProfile {
        samples,
        threshold,
        rupture,
        peak_shear_radius_kpc,
    }
}

/// Radius span of samples whose normalized shear is at least `threshold`.
pub fn rupture_zone(samples: &[ShearSample], threshold: f64) -> Option<RuptureZone> {
    let mut zone: Option<RuptureZone> = None;
    for s in samples.iter().filter(|s| s.normalized_shear >= threshold) {
        zone = Some(match zone {
            None => RuptureZone {
                min_kpc: s.radius_kpc,
                max_kpc: s.radius_kpc,
            },
            Some(z) => RuptureZone {
                min_kpc: z.min_kpc.min(s.radius_kpc),
                max_kpc: z.max_kpc.max(s.radius_kpc),
            },
        });
    }
    zone
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: PhysicalConstants = PhysicalConstants::TRR;

    fn orbit(peri: f64, apo: f64, mass: f64) -> StreamInput {
        StreamInput {
            pericenter_kpc: peri,
            apocenter_kpc: apo,
            stellar_mass: mass,
        }
    }

    #[test]
    fn samples_span_the_orbit() {
        let p = stream_shear_profile(&C, &orbit(10.0, 60.0, 1.0), DEFAULT_SAMPLES, DEFAULT_RUPTURE_THRESHOLD);
        assert_eq!(p.samples.len(), DEFAULT_SAMPLES);
        assert_eq!(p.samples[0].radius_kpc, 10.0);
        assert_eq!(p.samples[DEFAULT_SAMPLES - 1].radius_kpc, 60.0);
        assert!(p.samples.iter().all(|s| (0.0..=1.0).contains(&s.normalized_shear)));
        assert!(p.samples.iter().any(|s| s.normalized_shear == 1.0));
    }

    #[test]
    fn drag_is_positive_excess_over_newtonian() {
        let p = stream_shear_profile(&C, &orbit(5.0, 50.0, 1.0), 100, DEFAULT_RUPTURE_THRESHOLD);
        assert!(p.samples.iter().all(|s| s.drag > 0.0));
    }

    #[test]
    fn rupture_zone_brackets_the_shear_peak() {
        // Drag peaks where g_bar ≈ 4 a0; its gradient is steepest a little inside
        // the transition, around 2-3 kpc for a 10¹¹ M_sun host.
        let p = stream_shear_profile(&C, &orbit(1.0, 50.0, 1.0), DEFAULT_SAMPLES, DEFAULT_RUPTURE_THRESHOLD);
        let zone = p.rupture.expect("rupture expected");
        let peak = p.peak_shear_radius_kpc.unwrap();
        assert!(zone.min_kpc > 1.0 && zone.max_kpc < 5.0, "zone={zone:?}");
        assert!(zone.min_kpc <= peak && peak <= zone.max_kpc);
    }

    #[test]
    fn narrow_orbit_is_fully_inside_the_zone() {
        // Self-normalized shear always reaches 1 somewhere; on a short arc with a
        // smooth gradient every sample clears the threshold.
        let p = stream_shear_profile(&C, &orbit(20.0, 21.0, 1.0), DEFAULT_SAMPLES, DEFAULT_RUPTURE_THRESHOLD);
        assert_eq!(p.rupture, Some(RuptureZone { min_kpc: 20.0, max_kpc: 21.0 }));
    }

    #[test]
    fn massless_host_reports_no_rupture() {
        let p = stream_shear_profile(&C, &orbit(20.0, 21.0, 0.0), DEFAULT_SAMPLES, DEFAULT_RUPTURE_THRESHOLD);
        assert!(p.rupture.is_none());
        assert!(p.peak_shear_radius_kpc.is_none());
        assert!(p.samples.iter().all(|s| s.normalized_shear == 0.0));
    }

    #[test]
    fn threshold_above_one_never_ruptures() {
        let p = stream_shear_profile(&C, &orbit(5.0, 50.0, 1.0), 200, 1.01);
        assert!(p.rupture.is_none());
    }

    #[test]
    fn rupture_zone_covers_non_contiguous_hits() {
        let s = |r: f64, n: f64| ShearSample {
            radius_kpc: r,
            drag: 0.0,
            normalized_shear: n,
        };
        let samples = [s(1.0, 0.8), s(2.0, 0.1), s(3.0, 0.9), s(4.0, 0.2)];
        let zone = rupture_zone(&samples, 0.75).unwrap();
        assert_eq!(zone, RuptureZone { min_kpc: 1.0, max_kpc: 3.0 });
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = stream_shear_profile(&C, &orbit(8.0, 40.0, 2.0), 300, 0.75);
        let b = stream_shear_profile(&C, &orbit(8.0, 40.0, 2.0), 300, 0.75);
        assert_eq!(a, b);
    }
}
