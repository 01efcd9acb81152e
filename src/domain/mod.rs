//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observation inputs per model (`RotationInput`, `LensingInput`, ...)
//! - fit outputs (`FitResult`, `ShearProfile`)
//! - run configuration (`FitConfig`) and the saved report schema (`ReportFile`)

pub mod types;

pub use types::*;
