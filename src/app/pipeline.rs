//! Shared calculation pipeline.
//!
//! A calculation is a pure function of its request: validate the observation,
//! run the matching calibration, and hand back a value the front-end renders or
//! exports. The front-end keeps any "last result" state itself.

use log::info;

use crate::constants::PhysicalConstants;
use crate::domain::{
    FitConfig, FitResult, LensingInput, ReportFile, RedshiftInput, RotationInput, ShearProfile, StreamInput,
};
use crate::error::AppError;
use crate::fit::{fit_dynamics, fit_optics, fit_redshift, profile_stream};
use crate::io::{fit_report, profile_report};

/// One calculation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Dynamics(RotationInput),
    Optics(LensingInput),
    Redshift(RedshiftInput),
    Stream(StreamInput),
}

/// All computed outputs of a single run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutput {
    Fit(FitResult),
    Profile(ShearProfile),
}

impl RunOutput {
    pub fn to_report(&self) -> ReportFile {
        match self {
            RunOutput::Fit(fit) => fit_report(fit),
            RunOutput::Profile(profile) => profile_report(profile),
        }
    }
}

/// Execute one calculation with the given constants.
pub fn run_request(
    consts: &PhysicalConstants,
    request: &Request,
    config: &FitConfig,
) -> Result<RunOutput, AppError> {
    let output = match request {
        Request::Dynamics(input) => RunOutput::Fit(fit_dynamics(consts, input, config)?),
        Request::Optics(input) => RunOutput::Fit(fit_optics(consts, input, config)?),
        Request::Redshift(input) => RunOutput::Fit(fit_redshift(consts, input, config)?),
        Request::Stream(input) => RunOutput::Profile(profile_stream(consts, input, config)?),
    };

    match &output {
        RunOutput::Fit(fit) => info!(
            "{}: accuracy {:.2}% (predicted {:.4}, observed {:.4})",
            fit.model.display_name(),
            fit.accuracy_percent,
            fit.predicted,
            fit.observed
        ),
        RunOutput::Profile(profile) => info!(
            "stream: {} samples, rupture {:?}",
            profile.samples.len(),
            profile.rupture
        ),
    }

    Ok(output)
}

/// Execute one calculation with the TRR constants.
pub fn run(request: &Request, config: &FitConfig) -> Result<RunOutput, AppError> {
    run_request(&PhysicalConstants::TRR, request, config)
}
