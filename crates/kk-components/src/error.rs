//! Error types for component operations.

use kk_core::error::KkError;
use kk_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    /// A volume would hold zero or negative mass.
    #[error("Non-positive mass in volume '{volume}': {mass} kg")]
    NonPositiveMass { volume: String, mass: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Element count mismatch for {what}: expected {expected}, got {actual}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Fluid model error: {0}")]
    Fluid(#[from] FluidError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for KkError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => KkError::InvalidArg { what },
            ComponentError::InvalidArg { what } => KkError::InvalidArg { what },
            other => KkError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
