//! Reporting utilities: formatted terminal output for fits and shear profiles.

pub mod format;

pub use format::*;
