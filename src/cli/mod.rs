//! Command-line parsing for the TRR calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "trr",
    version,
    about = "Referential Relativity (TRR) calibrator: fit M/L or redshift to one observation"
)]
pub struct Cli {
    /// Log filter spec (e.g. `info`, `trr_fit=debug`).
    #[arg(long, global = true, env = "TRR_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the disk mass-to-light ratio to an observed rotation velocity.
    Dynamics(DynamicsArgs),
    /// Fit the mass-to-light factor to an observed Einstein angle.
    Optics(OpticsArgs),
    /// Infer the source redshift from an observed Einstein angle.
    Redshift(RedshiftArgs),
    /// Compute the tidal shear profile of a stellar stream.
    Stream(StreamArgs),
    /// Plot a previously exported stream report.
    Plot(PlotArgs),
}

/// Output options shared by every calculation.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write the result to a JSON report file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DynamicsArgs {
    /// Observed radius (kpc).
    #[arg(long)]
    pub radius: f64,

    /// Observed rotation velocity (km/s).
    #[arg(long)]
    pub v_obs: f64,

    /// Gas velocity (km/s); negative values are allowed.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub v_gas: f64,

    /// Disk velocity at M/L = 1 (km/s).
    #[arg(long, default_value_t = 0.0)]
    pub v_disk: f64,

    /// Bulge/bar velocity at M/L = 1 (km/s).
    #[arg(long, default_value_t = 0.0)]
    pub v_bulge: f64,

    /// Lowest disk M/L to try.
    #[arg(long, default_value_t = 0.10)]
    pub ml_min: f64,

    /// Highest disk M/L to try.
    #[arg(long, default_value_t = 1.00)]
    pub ml_max: f64,

    /// M/L grid step.
    #[arg(long, default_value_t = 0.01)]
    pub ml_step: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct OpticsArgs {
    /// Lens redshift.
    #[arg(long)]
    pub z_lens: f64,

    /// Source redshift.
    #[arg(long)]
    pub z_source: f64,

    /// Stellar mass (10^11 M_sun).
    #[arg(long)]
    pub stellar_mass: f64,

    /// Observed Einstein angle (arcsec).
    #[arg(long)]
    pub theta: f64,

    /// Treat the lens as a giant cluster (7x gas mass).
    #[arg(long)]
    pub cluster: bool,

    /// Lowest M/L factor to try.
    #[arg(long, default_value_t = 0.50)]
    pub ml_min: f64,

    /// Highest M/L factor to try.
    #[arg(long, default_value_t = 2.50)]
    pub ml_max: f64,

    /// M/L grid step.
    #[arg(long, default_value_t = 0.01)]
    pub ml_step: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RedshiftArgs {
    /// Lens redshift.
    #[arg(long)]
    pub z_lens: f64,

    /// Stellar mass (10^11 M_sun).
    #[arg(long)]
    pub stellar_mass: f64,

    /// Observed Einstein angle (arcsec).
    #[arg(long)]
    pub theta: f64,

    /// Treat the lens as a giant cluster (7x gas mass).
    #[arg(long)]
    pub cluster: bool,

    /// Mass-to-light factor held fixed during the search.
    #[arg(long, default_value_t = 1.0)]
    pub ml_factor: f64,

    /// Effective radius (kpc); restricts the lensing mass to the Einstein aperture.
    #[arg(long)]
    pub effective_radius: Option<f64>,

    /// Upper end of the source-redshift scan.
    #[arg(long, default_value_t = 10.0)]
    pub z_max: f64,

    /// Coarse scan step.
    #[arg(long, default_value_t = 0.05)]
    pub z_coarse_step: f64,

    /// Fine scan step.
    #[arg(long, default_value_t = 0.001)]
    pub z_fine_step: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct StreamArgs {
    /// Orbit pericenter (kpc).
    #[arg(long)]
    pub pericenter: f64,

    /// Orbit apocenter (kpc).
    #[arg(long)]
    pub apocenter: f64,

    /// Host stellar mass (10^11 M_sun).
    #[arg(long)]
    pub stellar_mass: f64,

    /// Radius samples along the orbit.
    #[arg(long, default_value_t = 500)]
    pub samples: usize,

    /// Normalized shear at which the stream ruptures.
    #[arg(long, default_value_t = 0.75)]
    pub threshold: f64,

    /// Rows of the sampled profile to print.
    #[arg(long, default_value_t = 11)]
    pub rows: usize,

    /// Render an ASCII plot of the profile.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the sampled profile to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for plotting a saved stream report.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Report JSON produced by `trr stream --export`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
