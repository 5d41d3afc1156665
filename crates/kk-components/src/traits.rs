//! Core traits for restriction models.

use crate::error::ComponentResult;
use kk_fluids::{FluidState, SpecEnthalpy};

/// States at the two ends of a restriction, in its nominal flow direction.
#[derive(Clone, Copy)]
pub struct PortStates<'a> {
    pub upstream: &'a FluidState,
    pub downstream: &'a FluidState,
}

impl PortStates<'_> {
    /// Specific enthalpy carried by a flow of the given sign: the upstream
    /// state's for forward flow, the downstream state's for reverse flow.
    pub fn source_enthalpy(&self, mdot: f64) -> SpecEnthalpy {
        if mdot >= 0.0 {
            self.upstream.h()
        } else {
            self.downstream.h()
        }
    }
}

/// Result of evaluating a flow law.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowSolution {
    /// Mass flow rate [kg/s]; positive runs upstream to downstream.
    pub mdot: f64,
    pub is_choked: bool,
}

/// A two-port flow element between an upstream and a downstream volume.
///
/// Implementations are deterministic functions of the port states and their
/// own parameters.
pub trait FlowRestriction: Send + Sync {
    fn name(&self) -> &str;

    /// Mass flow for the given port states.
    ///
    /// Negative flow is returned when the downstream pressure exceeds the
    /// upstream one.
    fn flow(&self, ports: PortStates<'_>) -> ComponentResult<FlowSolution>;
}
