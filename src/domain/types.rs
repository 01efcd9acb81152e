//! Shared domain types.
//!
//! These types are plain values: built from caller input, consumed by exactly one
//! model or fit call, and handed back for display or export. They are
//! serializable so a result can be written to JSON and reloaded for plotting.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{DEFAULT_RUPTURE_THRESHOLD, DEFAULT_SAMPLES};

/// Which forward model produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Rotation-curve dynamics (fit M/L against observed velocity).
    Dynamics,
    /// Lensing optics (fit M/L against an Einstein angle).
    Optics,
    /// Source-redshift inversion (fit z_source against an Einstein angle).
    Redshift,
    /// Stellar-stream tidal shear profile.
    Stream,
}

impl ModelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Dynamics => "Dynamics (rotation curve)",
            ModelKind::Optics => "Optics (lensing deflection)",
            ModelKind::Redshift => "Redshift inversion",
            ModelKind::Stream => "Stream shear",
        }
    }

    /// Unit of the observed/predicted quantity.
    pub fn unit(self) -> &'static str {
        match self {
            ModelKind::Dynamics => "km/s",
            ModelKind::Optics | ModelKind::Redshift => "arcsec",
            ModelKind::Stream => "",
        }
    }
}

/// A named scalar (fit parameter or diagnostic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Bookkeeping from a grid search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total grid points visited (all passes).
    pub grid_points: usize,
    /// Candidates the model produced a finite prediction for.
    pub evaluated: usize,
    /// Candidates skipped as non-physical.
    pub skipped: usize,
}

/// Output of a single calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub model: ModelKind,
    /// Best-fit parameter(s), in search order.
    pub parameters: Vec<NamedValue>,
    /// Observed value in display units (km/s or arcsec).
    pub observed: f64,
    /// TRR prediction at the best-fit parameter(s).
    pub predicted: f64,
    /// Pure-baryonic (Newtonian) prediction at the best-fit parameter(s).
    pub baseline: f64,
    /// Relative error minimized by the search.
    pub relative_error: f64,
    /// `max(0, 100 - 100 · relative_error)`.
    pub accuracy_percent: f64,
    /// Auxiliary model outputs (refraction index, impact factor, ...).
    pub diagnostics: Vec<NamedValue>,
    pub search: SearchStats,
}

impl FitResult {
    pub fn parameter(&self, name: &str) -> Option<f64> {
        lookup(&self.parameters, name)
    }

    pub fn diagnostic(&self, name: &str) -> Option<f64> {
        lookup(&self.diagnostics, name)
    }
}

fn lookup(values: &[NamedValue], name: &str) -> Option<f64> {
    values.iter().find(|v| v.name == name).map(|v| v.value)
}

/// Rotation-curve observation at one radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationInput {
    pub radius_kpc: f64,
    /// Observed circular velocity [km/s].
    pub v_observed: f64,
    /// Gas contribution [km/s]; may be negative by sign convention.
    pub v_gas: f64,
    pub v_disk: f64,
    pub v_bulge: f64,
}

impl RotationInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive("radius", self.radius_kpc)?;
        require_finite("v_gas", self.v_gas)?;
        require_non_negative("v_disk", self.v_disk)?;
        require_non_negative("v_bulge", self.v_bulge)?;
        Ok(())
    }
}

/// Einstein-ring observation with both redshifts known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensingInput {
    pub z_lens: f64,
    pub z_source: f64,
    /// Stellar mass in units of 10¹¹ M_sun.
    pub stellar_mass: f64,
    /// Observed Einstein angle [arcsec].
    pub einstein_angle: f64,
    pub is_cluster: bool,
}

impl LensingInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_redshift_order(self.z_lens, self.z_source)?;
        require_positive("stellar_mass", self.stellar_mass)?;
        Ok(())
    }
}

/// Einstein-ring observation with an unknown source redshift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedshiftInput {
    pub z_lens: f64,
    /// Stellar mass in units of 10¹¹ M_sun.
    pub stellar_mass: f64,
    /// Observed Einstein angle [arcsec].
    pub einstein_angle: f64,
    pub is_cluster: bool,
    /// Mass-to-light factor held fixed during the search.
    pub ml_factor: f64,
    /// Effective (half-light) radius; enables the aperture-mass refinement.
    pub effective_radius_kpc: Option<f64>,
}

impl RedshiftInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive("z_lens", self.z_lens)?;
        require_positive("stellar_mass", self.stellar_mass)?;
        require_positive("ml_factor", self.ml_factor)?;
        if let Some(re) = self.effective_radius_kpc {
            require_positive("effective_radius", re)?;
        }
        Ok(())
    }
}

/// Orbit of a stellar stream around a host of given stellar mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamInput {
    pub pericenter_kpc: f64,
    pub apocenter_kpc: f64,
    /// Host stellar mass in units of 10¹¹ M_sun.
    pub stellar_mass: f64,
}

impl StreamInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive("pericenter", self.pericenter_kpc)?;
        require_finite("apocenter", self.apocenter_kpc)?;
        if self.apocenter_kpc <= self.pericenter_kpc {
            return Err(AppError::invalid_input(format!(
                "Apocenter ({}) must exceed pericenter ({}).",
                self.apocenter_kpc, self.pericenter_kpc
            )));
        }
        require_non_negative("stellar_mass", self.stellar_mass)?;
        Ok(())
    }
}

/// One radius sample of a shear profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearSample {
    pub radius_kpc: f64,
    /// TRR excess acceleration over Newtonian [m/s²].
    pub drag: f64,
    /// |d drag / d r| scaled by its maximum over the profile.
    pub normalized_shear: f64,
}

/// Radius interval where the normalized shear reaches the rupture threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuptureZone {
    pub min_kpc: f64,
    pub max_kpc: f64,
}

/// Sampled drag/shear along an orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearProfile {
    pub samples: Vec<ShearSample>,
    pub threshold: f64,
    pub rupture: Option<RuptureZone>,
    /// Radius of the strongest shear, if any shear is present.
    pub peak_shear_radius_kpc: Option<f64>,
}

/// Inclusive `[min, max]` range walked with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl GridRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

/// Two-pass source-redshift search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedshiftSearch {
    /// Upper end of the coarse scan.
    pub z_max: f64,
    pub coarse_step: f64,
    pub fine_step: f64,
}

impl RedshiftSearch {
    /// The fine pass spans one coarse step either side, so it must not be coarser.
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive("z_max (--z-max)", self.z_max)?;
        require_positive("coarse step (--z-coarse-step)", self.coarse_step)?;
        require_positive("fine step (--z-fine-step)", self.fine_step)?;
        if self.fine_step > self.coarse_step {
            return Err(AppError::invalid_input(format!(
                "Fine step (--z-fine-step={}) must not exceed coarse step (--z-coarse-step={}).",
                self.fine_step, self.coarse_step
            )));
        }
        Ok(())
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Disk M/L grid for the dynamics fit.
    pub dynamics_ml: GridRange,
    /// M/L grid for the optics fit.
    pub optics_ml: GridRange,
    pub redshift: RedshiftSearch,
    /// Radius samples per stream profile.
    pub stream_samples: usize,
    /// Normalized shear at or above which a stream ruptures.
    pub rupture_threshold: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            dynamics_ml: GridRange::new(0.10, 1.00, 0.01),
            optics_ml: GridRange::new(0.50, 2.50, 0.01),
            redshift: RedshiftSearch {
                z_max: 10.0,
                coarse_step: 0.05,
                fine_step: 0.001,
            },
            stream_samples: DEFAULT_SAMPLES,
            rupture_threshold: DEFAULT_RUPTURE_THRESHOLD,
        }
    }
}

/// A saved report file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    /// RFC 3339 timestamp of when the report was written.
    pub generated_at: String,
    pub kind: ModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ShearProfile>,
}

fn require_finite(what: &str, v: f64) -> Result<(), AppError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!("{what} must be finite, got {v}.")))
    }
}

fn require_non_negative(what: &str, v: f64) -> Result<(), AppError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!("{what} must be finite and >= 0, got {v}.")))
    }
}

fn require_positive(what: &str, v: f64) -> Result<(), AppError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!("{what} must be finite and > 0, got {v}.")))
    }
}

fn require_redshift_order(z_lens: f64, z_source: f64) -> Result<(), AppError> {
    require_positive("z_lens", z_lens)?;
    require_finite("z_source", z_source)?;
    if z_source <= z_lens {
        return Err(AppError::invalid_input(format!(
            "Source redshift ({z_source}) must exceed lens redshift ({z_lens})."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lensing_input_requires_source_behind_lens() {
        let mut input = LensingInput {
            z_lens: 0.3,
            z_source: 1.0,
            stellar_mass: 1.0,
            einstein_angle: 1.5,
            is_cluster: false,
        };
        assert!(input.validate().is_ok());

        input.z_source = 0.3;
        assert!(input.validate().is_err());

        input.z_source = 1.0;
        input.z_lens = 0.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn stream_input_requires_ordered_orbit() {
        let input = StreamInput {
            pericenter_kpc: 20.0,
            apocenter_kpc: 10.0,
            stellar_mass: 1.0,
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn rotation_input_allows_negative_gas_velocity() {
        let input = RotationInput {
            radius_kpc: 10.0,
            v_observed: 150.0,
            v_gas: -20.0,
            v_disk: 100.0,
            v_bulge: 0.0,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn redshift_search_rejects_fine_step_above_coarse_step() {
        let mut search = FitConfig::default().redshift;
        assert!(search.validate().is_ok());

        search.fine_step = 0.2;
        let err = search.validate().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.message().contains("--z-fine-step"));
        assert!(err.message().contains("--z-coarse-step"));

        search.fine_step = 0.0;
        assert!(search.validate().is_err());
    }

    #[test]
    fn fit_result_lookups() {
        let fit = FitResult {
            model: ModelKind::Optics,
            parameters: vec![NamedValue::new("ml_factor", 1.2)],
            observed: 1.0,
            predicted: 1.0,
            baseline: 0.9,
            relative_error: 0.0,
            accuracy_percent: 100.0,
            diagnostics: vec![NamedValue::new("eta_c", 1.007)],
            search: SearchStats::default(),
        };
        assert_eq!(fit.parameter("ml_factor"), Some(1.2));
        assert_eq!(fit.diagnostic("eta_c"), Some(1.007));
        assert_eq!(fit.parameter("missing"), None);
    }
}
