//! Error types for solver operations.

use kk_components::ComponentError;
use kk_core::error::KkError;
use kk_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during network solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Singular Jacobian at iteration {iteration}")]
    SingularJacobian { iteration: usize },

    #[error("Did not converge after {iterations} iterations (residual norm {residual_norm:e})")]
    DidNotConverge {
        iterations: usize,
        residual_norm: f64,
    },

    #[error("Line search found no admissible step at iteration {iteration}")]
    LineSearchFailed { iteration: usize },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for KkError {
    fn from(e: SolverError) -> Self {
        KkError::Invariant {
            what: e.to_string(),
        }
    }
}
