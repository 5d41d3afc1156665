//! kk-fluids: fluid property calculations for kinetic-kebab.
//!
//! Provides:
//! - Gas species catalog, parsed from names or formulas
//! - Calorically perfect ideal-gas equation of state
//! - Thermodynamic state with all derived properties cached
//!
//! # Example
//!
//! ```
//! use kk_core::units::{k, pa};
//! use kk_fluids::{FluidState, Species};
//!
//! let n2: Species = "Nitrogen".parse().unwrap();
//! let state = FluidState::from_pt(n2, pa(101_325.0), k(300.0)).unwrap();
//! assert!((state.rho() - 1.138).abs() < 1e-3);
//! ```

pub mod error;
pub mod ideal_gas;
pub mod species;
pub mod state;

pub use error::{FluidError, FluidResult};
pub use ideal_gas::IdealGas;
pub use species::Species;
pub use state::{FluidState, SpecEnthalpy, SpecEnergy};
