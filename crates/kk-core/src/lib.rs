//! kk-core: shared foundation for the kinetic-kebab network engine.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + finiteness check)
//! - ids (compact IDs for volumes and restrictions)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{KkError, KkResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
