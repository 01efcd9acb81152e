//! `trr-fit` library crate.
//!
//! Calibrates the Referential Relativity (TRR) model against single
//! observations: rotation velocities, Einstein angles, and stellar-stream orbits.
//!
//! The binary (`trr`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the forward models and fitters are reusable from other front-ends

pub mod app;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
