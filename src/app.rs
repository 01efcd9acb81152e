//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - starts logging
//! - turns flags into a calculation request plus `FitConfig`
//! - runs the pipeline
//! - prints text/JSON and writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{Command, DynamicsArgs, OpticsArgs, OutputArgs, PlotArgs, RedshiftArgs, StreamArgs};
use crate::domain::{
    FitConfig, GridRange, LensingInput, RedshiftInput, RedshiftSearch, RotationInput, StreamInput,
};
use crate::error::AppError;

pub mod pipeline;

use pipeline::{Request, RunOutput};

/// Entry point for the `trr` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry TRR_LOG; it must be loaded before clap reads the environment.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    let _logger = crate::logging::setup_logging(&cli.log_level)?;

    match cli.command {
        Command::Plot(args) => handle_plot(&args),
        Command::Stream(args) => {
            let (request, config) = stream_request(&args);
            let output = pipeline::run(&request, &config)?;
            emit(&output, &args.output, &TextOptions::from_stream(&args))?;
            if let (Some(path), RunOutput::Profile(profile)) = (&args.export_csv, &output) {
                crate::io::write_profile_csv(path, profile)?;
                info!("wrote profile CSV to {}", path.display());
            }
            Ok(())
        }
        Command::Dynamics(args) => run_fit(dynamics_request(&args), &args.output),
        Command::Optics(args) => run_fit(optics_request(&args), &args.output),
        Command::Redshift(args) => run_fit(redshift_request(&args), &args.output),
    }
}

fn run_fit((request, config): (Request, FitConfig), output: &OutputArgs) -> Result<(), AppError> {
    let result = pipeline::run(&request, &config)?;
    emit(&result, output, &TextOptions::default())
}

/// Presentation knobs that only matter for text output.
#[derive(Debug, Clone, Copy, Default)]
struct TextOptions {
    table_rows: usize,
    plot: Option<(usize, usize)>,
}

impl TextOptions {
    fn from_stream(args: &StreamArgs) -> Self {
        Self {
            table_rows: args.rows,
            plot: args.plot.then_some((args.width, args.height)),
        }
    }
}

fn emit(output: &RunOutput, opts: &OutputArgs, text: &TextOptions) -> Result<(), AppError> {
    let report = output.to_report();

    if opts.json {
        println!("{}", crate::io::report_to_json(&report)?);
    } else {
        match output {
            RunOutput::Fit(fit) => print!("{}", crate::report::format_fit_summary(fit)),
            RunOutput::Profile(profile) => {
                print!("{}", crate::report::format_shear_summary(profile, text.table_rows));
                if let Some((width, height)) = text.plot {
                    println!();
                    print!("{}", crate::plot::render_shear_plot(profile, width, height));
                }
            }
        }
    }

    if let Some(path) = &opts.export {
        crate::io::write_report_json(path, &report)?;
        info!("wrote report to {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let report = crate::io::read_report_json(&args.report)?;
    let Some(profile) = report.profile else {
        return Err(AppError::invalid_input(format!(
            "Report '{}' is a {:?} fit; only stream reports can be plotted.",
            args.report.display(),
            report.kind
        )));
    };

    print!("{}", crate::plot::render_shear_plot(&profile, args.width, args.height));
    Ok(())
}

pub fn dynamics_request(args: &DynamicsArgs) -> (Request, FitConfig) {
    let request = Request::Dynamics(RotationInput {
        radius_kpc: args.radius,
        v_observed: args.v_obs,
        v_gas: args.v_gas,
        v_disk: args.v_disk,
        v_bulge: args.v_bulge,
    });
    let config = FitConfig {
        dynamics_ml: GridRange::new(args.ml_min, args.ml_max, args.ml_step),
        ..FitConfig::default()
    };
    (request, config)
}

pub fn optics_request(args: &OpticsArgs) -> (Request, FitConfig) {
    let request = Request::Optics(LensingInput {
        z_lens: args.z_lens,
        z_source: args.z_source,
        stellar_mass: args.stellar_mass,
        einstein_angle: args.theta,
        is_cluster: args.cluster,
    });
    let config = FitConfig {
        optics_ml: GridRange::new(args.ml_min, args.ml_max, args.ml_step),
        ..FitConfig::default()
    };
    (request, config)
}

pub fn redshift_request(args: &RedshiftArgs) -> (Request, FitConfig) {
    let request = Request::Redshift(RedshiftInput {
        z_lens: args.z_lens,
        stellar_mass: args.stellar_mass,
        einstein_angle: args.theta,
        is_cluster: args.cluster,
        ml_factor: args.ml_factor,
        effective_radius_kpc: args.effective_radius,
    });
    let config = FitConfig {
        redshift: RedshiftSearch {
            z_max: args.z_max,
            coarse_step: args.z_coarse_step,
            fine_step: args.z_fine_step,
        },
        ..FitConfig::default()
    };
    (request, config)
}

pub fn stream_request(args: &StreamArgs) -> (Request, FitConfig) {
    let request = Request::Stream(StreamInput {
        pericenter_kpc: args.pericenter,
        apocenter_kpc: args.apocenter,
        stellar_mass: args.stellar_mass,
    });
    let config = FitConfig {
        stream_samples: args.samples,
        rupture_threshold: args.threshold,
        ..FitConfig::default()
    };
    (request, config)
}
