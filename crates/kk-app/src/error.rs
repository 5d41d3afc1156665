//! Error types for the simulation handle.

/// Every failure a client of [`crate::Simulation`] can see.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// Malformed or topologically invalid model. No handle is created.
    #[error("Model error: {0}")]
    Model(String),

    #[error("Unknown quantity: {name}")]
    NotFound { name: String },

    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    #[error(
        "Integration failed at t={time} s: step {dt:e} s (error {error:e}) cannot shrink below min_dt {min_dt:e} s"
    )]
    IntegrationFailure {
        time: f64,
        dt: f64,
        min_dt: f64,
        error: f64,
    },

    #[error("Steady solve did not converge after {iterations} iterations (residual norm {residual_norm:e})")]
    DidNotConverge {
        iterations: usize,
        residual_norm: f64,
    },

    #[error("Singular Jacobian at steady iteration {iteration}")]
    SingularJacobian { iteration: usize },

    #[error("Simulation handle has ended")]
    HandleEnded,

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Solver error: {0}")]
    Solver(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<kk_project::ProjectError> for AppError {
    fn from(err: kk_project::ProjectError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<kk_project::ValidationError> for AppError {
    fn from(err: kk_project::ValidationError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<kk_graph::GraphError> for AppError {
    fn from(err: kk_graph::GraphError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<kk_sim::SimError> for AppError {
    fn from(err: kk_sim::SimError) -> Self {
        use kk_sim::SimError;
        match err {
            SimError::IntegrationFailure {
                time,
                dt,
                min_dt,
                error,
            } => AppError::IntegrationFailure {
                time,
                dt,
                min_dt,
                error,
            },
            SimError::InvalidArg { what } => AppError::InvalidArgument {
                what: what.to_string(),
            },
            other => AppError::Simulation(other.to_string()),
        }
    }
}

impl From<kk_solver::SolverError> for AppError {
    fn from(err: kk_solver::SolverError) -> Self {
        use kk_solver::SolverError;
        match err {
            SolverError::DidNotConverge {
                iterations,
                residual_norm,
            } => AppError::DidNotConverge {
                iterations,
                residual_norm,
            },
            SolverError::SingularJacobian { iteration } => AppError::SingularJacobian { iteration },
            other => AppError::Solver(other.to_string()),
        }
    }
}
