//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Forward Euler (explicit, 1st order).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// x' = -x, x(0) = 1.
    pub(crate) struct Decay;

    impl TransientModel for Decay {
        type State = f64;

        fn initial_state(&self) -> SimResult<f64> {
            Ok(1.0)
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            Ok(-x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, s: f64) -> f64 {
            a * s
        }

        fn error_norm(&self, a: &f64, b: &f64) -> f64 {
            (a - b).abs() / a.abs().max(b.abs()).max(1e-300)
        }
    }

    #[test]
    fn rk4_accuracy() {
        let mut m = Decay;
        let mut x = 1.0;
        for i in 0..10 {
            x = RK4.step(&mut m, i as f64 * 0.1, &x, 0.1).unwrap();
        }
        assert!((x - (-1.0_f64).exp()).abs() < 1e-6);
    }

    #[test]
    fn euler_first_order() {
        let mut m = Decay;
        let x = ForwardEuler.step(&mut m, 0.0, &1.0, 0.1).unwrap();
        assert!((x - 0.9).abs() < 1e-15);
    }
}
