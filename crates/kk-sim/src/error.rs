//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during transient simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A trial state is outside the physical domain (e.g. non-positive mass).
    #[error("Non-physical state: {what}")]
    NonPhysical { what: String },

    /// The step size had to shrink below the minimum.
    #[error(
        "Integration failed at t={time} s: step {dt:e} s rejected (error {error:e}), next step would fall below min_dt {min_dt:e} s"
    )]
    IntegrationFailure {
        time: f64,
        dt: f64,
        min_dt: f64,
        error: f64,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<kk_components::ComponentError> for SimError {
    fn from(e: kk_components::ComponentError) -> Self {
        SimError::NonPhysical {
            what: e.to_string(),
        }
    }
}

impl From<kk_fluids::FluidError> for SimError {
    fn from(e: kk_fluids::FluidError) -> Self {
        SimError::NonPhysical {
            what: e.to_string(),
        }
    }
}
