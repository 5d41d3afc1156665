//! The simulation handle.

use std::path::Path;

use kk_components::FlowNetwork;
use kk_project::{ModelDef, ResolvedSimOptions};
use kk_sim::{NetworkModel, RK4, StepControl, TransientModel};
use kk_solver::{NewtonConfig, SteadyConfig, SteadyMode, SteadySolution};
use nalgebra::DMatrix;
use tracing::{debug, info, warn};

use crate::compile::compile_model;
use crate::error::{AppError, AppResult};
use crate::recorder::Recorder;
use crate::registry::{Clock, Registry};

/// Jacobian of the steady residuals with one label per column.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyJacobian {
    pub labels: Vec<String>,
    pub matrix: DMatrix<f64>,
}

#[derive(Debug)]
struct Session {
    network: FlowNetwork,
    registry: Registry,
    recorder: Recorder,
    clock: Clock,
    options: ResolvedSimOptions,
    steady_mode: SteadyMode,
    /// Next adaptive step to try.
    current_dt: f64,
}

impl Session {
    fn steady_config(&self) -> SteadyConfig {
        SteadyConfig {
            mode: self.steady_mode,
            tolerance: self.options.allowable_error,
            max_iterations: self.options.max_steady_iterations,
            newton: NewtonConfig::default(),
        }
    }

    fn record_transient(&mut self) {
        let values = self.registry.values(&self.network, &self.clock);
        self.recorder.record_transient(self.clock.time, values);
    }

    fn record_steady(&mut self) {
        let values = self.registry.values(&self.network, &self.clock);
        self.recorder.record_steady(self.clock.steady_steps, values);
    }
}

/// A loaded model together with its clock and recorded history.
///
/// Every operation fails with [`AppError::HandleEnded`] once [`end`] has
/// been called.
///
/// [`end`]: Simulation::end
#[derive(Debug)]
pub struct Simulation {
    inner: Option<Session>,
}

impl Simulation {
    pub fn from_model(model: &ModelDef) -> AppResult<Self> {
        let compiled = compile_model(model)?;
        let registry = Registry::build(&compiled.objects);
        info!(
            objects = compiled.objects.len(),
            quantities = registry.len(),
            "simulation created"
        );
        Ok(Self {
            inner: Some(Session {
                network: compiled.network,
                registry,
                recorder: Recorder::new(compiled.recorder),
                clock: Clock::default(),
                current_dt: compiled.options.dt,
                options: compiled.options,
                steady_mode: compiled.steady_mode,
            }),
        })
    }

    /// Load a JSON or YAML model file and build a handle from it.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        info!(path = %path.display(), "loading model");
        let model = kk_project::load(path)?;
        Self::from_model(&model)
    }

    fn session(&self) -> AppResult<&Session> {
        self.inner.as_ref().ok_or(AppError::HandleEnded)
    }

    fn session_mut(&mut self) -> AppResult<&mut Session> {
        self.inner.as_mut().ok_or(AppError::HandleEnded)
    }

    /// Advance by exactly `dt` with one RK4 step.
    pub fn step(&mut self) -> AppResult<()> {
        let s = self.session_mut()?;
        let dt = s.options.dt;
        let t0 = s.clock.time;
        {
            let mut model = NetworkModel::new(&mut s.network)?;
            let x0 = model.initial_state()?;
            let x1 = kk_sim::fixed_step(&RK4, &mut model, t0, &x0, dt).inspect_err(|e| {
                warn!(t = t0, dt, error = %e, "fixed step failed");
            })?;
            model.commit(&x1)?;
        }
        s.clock.time = t0 + dt;
        s.record_transient();
        debug!(t = s.clock.time, dt, "fixed step");
        Ok(())
    }

    /// Advance by `duration` seconds with adaptive steps. On failure the
    /// state stays at the last accepted step.
    pub fn step_duration(&mut self, duration: f64) -> AppResult<()> {
        let s = self.session_mut()?;
        let control = StepControl {
            min_dt: s.options.min_dt,
            max_dt: s.options.max_dt,
            tolerance: s.options.allowable_error,
        };
        let Session {
            network,
            registry,
            recorder,
            clock,
            current_dt,
            ..
        } = s;

        let mut model = NetworkModel::new(network)?;
        let x0 = model.initial_state()?;
        let t0 = clock.time;
        kk_sim::advance(
            &RK4,
            &mut model,
            t0,
            &x0,
            duration,
            &control,
            current_dt,
            |m, t, x| {
                m.commit(x)?;
                clock.time = t;
                recorder.record_transient(t, registry.values(m.network(), clock));
                Ok(())
            },
        )
        .inspect_err(|e| warn!(t = clock.time, error = %e, "step_duration failed"))?;

        debug!(t = clock.time, next_dt = *current_dt, "step_duration finished");
        Ok(())
    }

    /// Iterate to steady state, recording after every iteration.
    pub fn solve_steady(&mut self) -> AppResult<SteadySolution> {
        let s = self.session_mut()?;
        let config = s.steady_config();
        let first = s.clock.steady_steps + 1;
        let Session {
            network,
            registry,
            recorder,
            clock,
            ..
        } = s;

        let solution =
            kk_solver::solve_with_progress(network, &config, first, |report, net| {
                clock.steady_steps = report.iteration;
                recorder.record_steady(report.iteration, registry.values(net, clock));
            })?;
        Ok(solution)
    }

    /// One Newton iteration. Returns whether the solve should continue.
    pub fn iter_steady(&mut self) -> AppResult<bool> {
        let s = self.session_mut()?;
        let config = s.steady_config();
        let iteration = s.clock.steady_steps + 1;
        let report = kk_solver::iterate(&mut s.network, &config, iteration)?;
        s.clock.steady_steps = iteration;
        s.record_steady();
        Ok(report.still_iterating)
    }

    /// Jacobian at the current state. Nothing is modified.
    pub fn steady_jacobian(&self) -> AppResult<SteadyJacobian> {
        let s = self.session()?;
        let (matrix, labels) = kk_solver::jacobian_snapshot(&s.network, &s.steady_config())?;
        Ok(SteadyJacobian { labels, matrix })
    }

    pub fn get_value_by_name(&self, name: &str) -> AppResult<f64> {
        let s = self.session()?;
        let index = s.registry.resolve(name)?;
        s.registry.get(index, &s.network, &s.clock)
    }

    /// Overwrite one quantity. Derived quantities are recomputed by the
    /// next advance.
    pub fn set_value_by_name(&mut self, name: &str, value: f64) -> AppResult<()> {
        let s = self.session_mut()?;
        let index = s.registry.resolve(name)?;
        s.registry.set(index, value, &mut s.network, &mut s.clock)?;
        debug!(name, value, "value set");
        Ok(())
    }

    pub fn state_names(&self) -> AppResult<&[String]> {
        Ok(self.session()?.registry.names())
    }

    /// Current values in `state_names()` order.
    pub fn state_vals(&self) -> AppResult<Vec<f64>> {
        let s = self.session()?;
        Ok(s.registry.values(&s.network, &s.clock))
    }

    /// Recorded samples, one row per sample in `state_names()` order.
    pub fn history(&self) -> AppResult<&[Vec<f64>]> {
        Ok(self.session()?.recorder.samples())
    }

    /// Recorded history as one series per quantity.
    pub fn datadict(&self) -> AppResult<Vec<(String, Vec<f64>)>> {
        let s = self.session()?;
        Ok(s.recorder.datadict(s.registry.names()))
    }

    /// Drop the recorded history.
    pub fn clear(&mut self) -> AppResult<()> {
        self.session_mut()?.recorder.clear();
        Ok(())
    }

    pub fn time(&self) -> AppResult<f64> {
        Ok(self.session()?.clock.time)
    }

    pub fn steady_steps(&self) -> AppResult<usize> {
        Ok(self.session()?.clock.steady_steps)
    }

    /// Release everything the handle owns. Calling it again does nothing.
    pub fn end(&mut self) {
        if self.inner.take().is_some() {
            info!("simulation ended");
        }
    }

    pub fn is_ended(&self) -> bool {
        self.inner.is_none()
    }
}
