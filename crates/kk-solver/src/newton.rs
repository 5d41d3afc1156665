//! Single Newton step with positivity-preserving line search.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use nalgebra::DVector;
use tracing::debug;

/// Newton step configuration.
#[derive(Debug, Clone)]
pub struct NewtonConfig {
    /// Smallest admissible value of any unknown (pressures and temperatures).
    pub min_value: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Relative perturbation for the finite difference Jacobian
    pub fd_epsilon: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            min_value: 1.0,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
            fd_epsilon: 1e-7,
        }
    }
}

/// Outcome of one Newton step.
#[derive(Debug, Clone)]
pub struct NewtonStep {
    /// Updated unknowns.
    pub x: DVector<f64>,
    /// Residual norm before the step.
    pub residual_norm_before: f64,
    /// Residual norm at the updated unknowns.
    pub residual_norm: f64,
    /// Largest absolute change of any unknown.
    pub max_update: f64,
    /// Line search scale applied to the full Newton update.
    pub alpha: f64,
}

/// Perform one Newton step from `x`.
///
/// Solves `J dx = -r` with LU, then backtracks from the full step until the
/// candidate keeps every unknown above `min_value` and does not increase the
/// residual norm. If no candidate reduces the residual, the last admissible
/// one is taken.
pub fn newton_step<F>(
    x: &DVector<f64>,
    residual_fn: F,
    config: &NewtonConfig,
    iteration: usize,
) -> SolverResult<NewtonStep>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let r = residual_fn(x)?;
    let r_norm = r.norm();
    let jac = finite_difference_jacobian(x, &r, &residual_fn, config.fd_epsilon)?;

    let dx = jac
        .lu()
        .solve(&(-&r))
        .ok_or(SolverError::SingularJacobian { iteration })?;
    if dx.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::SingularJacobian { iteration });
    }

    let mut alpha = 1.0;
    let mut fallback: Option<(DVector<f64>, f64, f64)> = None;
    for _ in 0..=config.max_line_search_iters {
        let candidate = x + alpha * &dx;
        if candidate.iter().all(|&v| v >= config.min_value) {
            let cand_norm = residual_fn(&candidate)?.norm();
            if cand_norm <= r_norm {
                fallback = Some((candidate, cand_norm, alpha));
                break;
            }
            fallback = Some((candidate, cand_norm, alpha));
        }
        alpha *= config.line_search_beta;
    }

    let (x_new, residual_norm, alpha) =
        fallback.ok_or(SolverError::LineSearchFailed { iteration })?;
    let max_update = (&x_new - x).amax();

    debug!(
        iteration,
        residual_before = r_norm,
        residual_after = residual_norm,
        alpha,
        max_update,
        "newton step"
    );

    Ok(NewtonStep {
        x: x_new,
        residual_norm_before: r_norm,
        residual_norm,
        max_update,
        alpha,
    })
}
