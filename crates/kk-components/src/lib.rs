//! kk-components: element models for kinetic-kebab networks.
//!
//! Provides:
//! - Volumes: `StaticVolume` (finite capacitance) and `VoidVolume` (fixed boundary)
//! - Restrictions: `Orifice` with selectable flow law
//! - `FlowNetwork`: graph + elements, evaluating flows and per-volume fluxes
//!
//! Flow laws are pure functions of the two port states. Volumes hold the
//! current state and the derived quantities last computed for it.
//!
//! # Example
//!
//! ```
//! use kk_components::{FlowRestriction, MdotMethod, Orifice, PortStates};
//! use kk_core::units::{k, m2, pa};
//! use kk_fluids::{FluidState, Species};
//!
//! let up = FluidState::from_pt(Species::N2, pa(500_000.0), k(300.0)).unwrap();
//! let down = FluidState::from_pt(Species::N2, pa(100_000.0), k(300.0)).unwrap();
//! let orifice = Orifice::new("Orifice", m2(1e-4), MdotMethod::IdealCompressible);
//!
//! let flow = orifice.flow(PortStates { upstream: &up, downstream: &down }).unwrap();
//! assert!(flow.is_choked);
//! assert!(flow.mdot > 0.0);
//! ```

pub mod common;
pub mod conservation;
pub mod error;
pub mod network;
pub mod orifice;
pub mod traits;
pub mod volume;

pub use conservation::MassEnergyFlux;
pub use error::{ComponentError, ComponentResult};
pub use network::{FlowNetwork, NetworkSnapshot, Restriction};
pub use orifice::{MdotMethod, Orifice};
pub use traits::{FlowRestriction, FlowSolution, PortStates};
pub use volume::{StaticVolume, Volume, VoidVolume};
