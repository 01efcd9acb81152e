//! Numerical building blocks: cosmological distances, the phase
//! interpolation, and a finite-difference gradient.

pub mod cosmology;
pub mod gradient;
pub mod phase;

pub use cosmology::*;
pub use gradient::*;
pub use phase::*;
