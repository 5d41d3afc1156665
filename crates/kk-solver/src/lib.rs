//! Steady-state network solver.
//!
//! Newton-Raphson over one mass balance per Static volume, with the Static
//! pressures as unknowns. `SteadyMode::PressureTemperature` adds an energy
//! balance per Static volume with its temperature as a second unknown.
//! Void volumes are boundary conditions and contribute no equations.

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod problem;
pub mod steady;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonStep};
pub use problem::{SteadyMode, SteadyProblem};
pub use steady::{
    SteadyConfig, SteadyIteration, SteadySolution, iterate, jacobian_snapshot, solve,
    solve_with_progress,
};
