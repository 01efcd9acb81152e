//! Input/output helpers.
//!
//! - JSON report read/write (`report`)
//! - shear profile CSV export (`export`)

pub mod export;
pub mod report;

pub use export::*;
pub use report::*;
