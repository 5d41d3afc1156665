//! Simulation handle for kinetic-kebab fluid networks.
//!
//! This crate composes the lower layers into the one object clients use:
//! load a model, drive it transiently or to steady state, and read or
//! write any quantity by its flattened name.
//!
//! ```no_run
//! use kk_app::Simulation;
//! use std::path::Path;
//!
//! let mut sim = Simulation::from_path(Path::new("blowdown.json"))?;
//! sim.step_duration(0.125)?;
//! let p = sim.get_value_by_name("UpstreamVolume.press [Pa]")?;
//! println!("upstream pressure {p} Pa at t = {} s", sim.time()?);
//! sim.end();
//! # Ok::<(), kk_app::AppError>(())
//! ```

pub mod compile;
pub mod error;
pub mod recorder;
pub mod registry;
pub mod simulation;

pub use compile::{CompiledModel, compile_model};
pub use error::{AppError, AppResult};
pub use kk_solver::SteadySolution;
pub use recorder::{Recorder, RecorderConfig};
pub use registry::{Clock, QuantityRef, Registry, SIM_STEADY_STEPS, SIM_TIME};
pub use simulation::{Simulation, SteadyJacobian};
