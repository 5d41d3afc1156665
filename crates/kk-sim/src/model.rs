//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots and trial steps)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Scalar field arithmetic for integration: add states, scale by scalar
/// - An error norm between two candidate states for step control
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// State the model currently holds.
    fn initial_state(&self) -> SimResult<Self::State>;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Fails when `x` is outside the physical domain.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Relative difference between two estimates of the same state.
    fn error_norm(&self, a: &Self::State, b: &Self::State) -> f64;

    /// Check that a state produced by an integrator is admissible.
    fn validate(&self, _x: &Self::State) -> SimResult<()> {
        Ok(())
    }
}
