//! Adaptive step-size control by step doubling.
//!
//! Each trial advances the same state once with step `h` and twice with
//! `h/2`. The difference is the local error estimate; the two-half-step
//! result is the candidate. Trials are pure, so a rejected one leaves
//! nothing to undo.

use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::integrator::Integrator;
use crate::model::TransientModel;

/// Step-size bounds and error tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepControl {
    pub min_dt: f64,
    pub max_dt: f64,
    /// Largest accepted local error estimate.
    pub tolerance: f64,
}

impl StepControl {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.min_dt.is_finite() && self.min_dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "min_dt must be positive",
            });
        }
        if !(self.max_dt.is_finite() && self.max_dt >= self.min_dt) {
            return Err(SimError::InvalidArg {
                what: "max_dt must be at least min_dt",
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SimError::InvalidArg {
                what: "tolerance must be positive",
            });
        }
        Ok(())
    }

    /// Clamp a step into `[min_dt, max_dt]`.
    pub fn bound(&self, h: f64) -> f64 {
        h.max(self.min_dt).min(self.max_dt)
    }
}

/// Candidate state and its error estimate.
#[derive(Debug, Clone)]
pub struct Trial<S> {
    pub state: S,
    pub error: f64,
}

/// One step-doubling trial of size `h` from `(t, x)`.
pub fn trial<M, I>(
    integrator: &I,
    model: &mut M,
    t: f64,
    x: &M::State,
    h: f64,
) -> SimResult<Trial<M::State>>
where
    M: TransientModel,
    I: Integrator,
{
    let full = integrator.step(model, t, x, h)?;
    let half = integrator.step(model, t, x, 0.5 * h)?;
    let halves = integrator.step(model, t + 0.5 * h, &half, 0.5 * h)?;
    model.validate(&full)?;
    model.validate(&halves)?;
    let error = model.error_norm(&full, &halves);
    Ok(Trial {
        state: halves,
        error,
    })
}

/// One fixed step of exactly `dt`. A non-physical result is reported as
/// an integration failure at `t`.
pub fn fixed_step<M, I>(
    integrator: &I,
    model: &mut M,
    t: f64,
    x: &M::State,
    dt: f64,
) -> SimResult<M::State>
where
    M: TransientModel,
    I: Integrator,
{
    let failure = |_| SimError::IntegrationFailure {
        time: t,
        dt,
        min_dt: dt,
        error: f64::INFINITY,
    };
    let next = integrator.step(model, t, x, dt).map_err(failure)?;
    model.validate(&next).map_err(failure)?;
    Ok(next)
}

/// Advance from `(t0, x0)` by `total` seconds with adaptive steps.
///
/// `current_dt` is the step to try first; on return it holds the step to
/// try next time. `on_accept` runs after every accepted step with the new
/// time and state. The final step is shortened to land exactly on
/// `t0 + total`. Returns the final state.
#[allow(clippy::too_many_arguments)]
pub fn advance<M, I, F>(
    integrator: &I,
    model: &mut M,
    t0: f64,
    x0: &M::State,
    total: f64,
    control: &StepControl,
    current_dt: &mut f64,
    mut on_accept: F,
) -> SimResult<M::State>
where
    M: TransientModel,
    I: Integrator,
    F: FnMut(&mut M, f64, &M::State) -> SimResult<()>,
{
    control.validate()?;
    if !(total.is_finite() && total >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "duration must be non-negative",
        });
    }

    let t_end = t0 + total;
    if total > 0.0 && t_end <= t0 {
        return Err(SimError::InvalidArg {
            what: "duration too small to advance the clock",
        });
    }
    let time_eps = (1e-12 * t_end.abs().max(1.0)).min(0.5 * total);
    let mut t = t0;
    let mut x = x0.clone();
    let mut h = control.bound(*current_dt);
    let mut accepted = 0_usize;
    let mut rejected = 0_usize;

    while t_end - t > time_eps {
        let remaining = t_end - t;
        let step = h.min(remaining);

        let error = match trial(integrator, model, t, &x, step) {
            Ok(tr) if tr.error <= control.tolerance => {
                let last = remaining - step <= time_eps;
                t = if last { t_end } else { t + step };
                x = tr.state;
                accepted += 1;
                debug!(t, dt = step, error = tr.error, "step accepted");
                on_accept(model, t, &x)?;
                if tr.error < 0.25 * control.tolerance {
                    h = (2.0 * h).min(control.max_dt);
                }
                continue;
            }
            Ok(tr) => tr.error,
            Err(SimError::NonPhysical { what }) => {
                debug!(t, dt = step, %what, "trial non-physical");
                f64::INFINITY
            }
            Err(other) => return Err(other),
        };

        rejected += 1;
        let next = 0.5 * step;
        debug!(t, dt = step, error, next, "step rejected");
        if next < control.min_dt {
            *current_dt = h;
            return Err(SimError::IntegrationFailure {
                time: t,
                dt: step,
                min_dt: control.min_dt,
                error,
            });
        }
        h = next;
    }

    debug!(accepted, rejected, t, "advance finished");
    *current_dt = h;
    Ok(x)
}
