//! Transient simulation for kinetic-kebab networks.
//!
//! Provides:
//! - `TransientModel` trait for pluggable dynamic systems
//! - Fixed-step RK4 and forward Euler integrators
//! - Adaptive stepping by step doubling with halve/double control
//! - `NetworkModel`: mass/energy dynamics of Static volumes in a `FlowNetwork`

pub mod adaptive;
pub mod error;
pub mod integrator;
pub mod model;
pub mod network_model;

pub use adaptive::{StepControl, Trial, advance, fixed_step, trial};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use network_model::{NetworkModel, NetworkState, VolumeState};
