//! Calibration of model parameters against a single observation.
//!
//! Responsibilities:
//!
//! - generate deterministic parameter grids (`grid`)
//! - walk a grid and keep the lowest relative error (`search`)
//! - specialise the search per forward model (`calibrate`)

pub mod calibrate;
pub mod grid;
pub mod search;

pub use calibrate::*;
pub use grid::*;
pub use search::*;
