//! Fluid property errors.

use kk_core::KkError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (non-positive pressure, temperature, density).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Fluid name that is not in the catalog.
    #[error("Unknown fluid '{name}'")]
    UnknownFluid { name: String },
}

impl From<FluidError> for KkError {
    fn from(err: FluidError) -> Self {
        KkError::Invariant {
            what: err.to_string(),
        }
    }
}
