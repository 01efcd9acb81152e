//! TRR forward models.
//!
//! Models are implemented as small, pure functions so that fitting/search code can
//! stay generic. Each takes the constants table by reference and returns `None`
//! for a non-physical candidate instead of failing.

pub mod lensing;
pub mod redshift;
pub mod rotation;
pub mod stream;

pub use lensing::*;
pub use redshift::*;
pub use rotation::*;
pub use stream::*;
