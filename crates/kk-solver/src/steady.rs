//! Steady-state iteration over a flow network.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use crate::newton::{NewtonConfig, newton_step};
use crate::problem::{SteadyMode, SteadyProblem};
use kk_components::{FlowNetwork, Volume};
use nalgebra::DMatrix;
use tracing::{debug, info, warn};

/// Steady solve configuration.
#[derive(Debug, Clone)]
pub struct SteadyConfig {
    pub mode: SteadyMode,
    /// Bound on both the residual norm and the largest unknown change.
    pub tolerance: f64,
    pub max_iterations: usize,
    pub newton: NewtonConfig,
}

impl Default for SteadyConfig {
    fn default() -> Self {
        Self {
            mode: SteadyMode::Pressure,
            tolerance: 1e-6,
            max_iterations: 100,
            newton: NewtonConfig::default(),
        }
    }
}

/// Report from one steady iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteadyIteration {
    pub iteration: usize,
    /// Residual norm after the update.
    pub residual_norm: f64,
    /// Largest absolute change of any unknown.
    pub max_update: f64,
    pub still_iterating: bool,
}

/// Summary of a converged steady solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteadySolution {
    pub iterations: usize,
    pub residual_norm: f64,
}

/// Perform one Newton iteration and write the result into the network.
///
/// `iteration` labels the step in errors and logs.
pub fn iterate(
    network: &mut FlowNetwork,
    config: &SteadyConfig,
    iteration: usize,
) -> SolverResult<SteadyIteration> {
    if !network.volumes().iter().any(Volume::is_static) {
        network.refresh()?;
        return Ok(SteadyIteration {
            iteration,
            residual_norm: 0.0,
            max_update: 0.0,
            still_iterating: false,
        });
    }

    let (states, step) = {
        let problem = SteadyProblem::new(network, config.mode)?;
        let x0 = problem.initial_guess();
        let step = newton_step(&x0, |x| problem.residual(x), &config.newton, iteration)?;
        (problem.states_at(&step.x)?, step)
    };
    network.apply_states(&states)?;

    let still_iterating =
        step.residual_norm > config.tolerance || step.max_update > config.tolerance;
    debug!(
        iteration,
        residual_norm = step.residual_norm,
        max_update = step.max_update,
        still_iterating,
        "steady iteration"
    );
    Ok(SteadyIteration {
        iteration,
        residual_norm: step.residual_norm,
        max_update: step.max_update,
        still_iterating,
    })
}

/// Iterate until converged or `max_iterations` is reached, calling
/// `progress` after every iteration with the updated network.
///
/// Iterations are labelled from `first_iteration` onward.
pub fn solve_with_progress<P>(
    network: &mut FlowNetwork,
    config: &SteadyConfig,
    first_iteration: usize,
    mut progress: P,
) -> SolverResult<SteadySolution>
where
    P: FnMut(&SteadyIteration, &FlowNetwork),
{
    let mut last_norm = f64::INFINITY;
    for i in 0..config.max_iterations {
        let report = iterate(network, config, first_iteration + i)?;
        progress(&report, network);
        last_norm = report.residual_norm;
        if !report.still_iterating {
            info!(
                iterations = i + 1,
                residual_norm = report.residual_norm,
                "steady state converged"
            );
            return Ok(SteadySolution {
                iterations: i + 1,
                residual_norm: report.residual_norm,
            });
        }
    }
    warn!(
        iterations = config.max_iterations,
        residual_norm = last_norm,
        "steady state did not converge"
    );
    Err(SolverError::DidNotConverge {
        iterations: config.max_iterations,
        residual_norm: last_norm,
    })
}

/// Iterate to convergence without progress reporting.
pub fn solve(network: &mut FlowNetwork, config: &SteadyConfig) -> SolverResult<SteadySolution> {
    solve_with_progress(network, config, 0, |_, _| {})
}

/// Jacobian of the steady residuals at the network's current state, with
/// the unknown labels for its columns. The network is not modified.
pub fn jacobian_snapshot(
    network: &FlowNetwork,
    config: &SteadyConfig,
) -> SolverResult<(DMatrix<f64>, Vec<String>)> {
    let problem = SteadyProblem::new(network, config.mode)?;
    let x = problem.initial_guess();
    let r = problem.residual(&x)?;
    let jac = finite_difference_jacobian(&x, &r, |x| problem.residual(x), config.newton.fd_epsilon)?;
    Ok((jac, problem.unknown_labels()))
}
