//! Mass and energy bookkeeping over the network.

use kk_fluids::FluidState;
use kk_graph::Graph;

use crate::error::{ComponentError, ComponentResult};
use crate::traits::{FlowSolution, PortStates};

/// Net mass [kg/s] and energy [J/s] flowing into a volume.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MassEnergyFlux {
    pub mdot: f64,
    pub udot: f64,
}

/// Sum restriction flows into per-volume net fluxes.
///
/// Each flow carries the specific enthalpy of its source volume. `states`
/// and the result are indexed like `graph.volumes()`; `flows` like
/// `graph.restrictions()`.
pub fn accumulate(
    graph: &Graph,
    states: &[FluidState],
    flows: &[FlowSolution],
) -> ComponentResult<Vec<MassEnergyFlux>> {
    if states.len() != graph.volumes().len() {
        return Err(ComponentError::CountMismatch {
            what: "volume states",
            expected: graph.volumes().len(),
            actual: states.len(),
        });
    }
    if flows.len() != graph.restrictions().len() {
        return Err(ComponentError::CountMismatch {
            what: "restriction flows",
            expected: graph.restrictions().len(),
            actual: flows.len(),
        });
    }

    let mut fluxes = vec![MassEnergyFlux::default(); states.len()];
    for (edge, flow) in graph.restrictions().iter().zip(flows) {
        let up = edge.upstream.idx();
        let down = edge.downstream.idx();
        let ports = PortStates {
            upstream: &states[up],
            downstream: &states[down],
        };
        let edot = flow.mdot * ports.source_enthalpy(flow.mdot);

        fluxes[up].mdot -= flow.mdot;
        fluxes[up].udot -= edot;
        fluxes[down].mdot += flow.mdot;
        fluxes[down].udot += edot;
    }
    Ok(fluxes)
}
