//! Flow network: topology plus element models.

use kk_fluids::FluidState;
use kk_graph::Graph;
use tracing::trace;

use crate::conservation::{MassEnergyFlux, accumulate};
use crate::error::{ComponentError, ComponentResult};
use crate::orifice::Orifice;
use crate::traits::{FlowRestriction, FlowSolution, PortStates};
use crate::volume::Volume;

/// Any restriction kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Restriction {
    Orifice(Orifice),
}

impl Restriction {
    pub fn record(&mut self, flow: FlowSolution) {
        match self {
            Restriction::Orifice(o) => o.record(flow),
        }
    }
}

impl FlowRestriction for Restriction {
    fn name(&self) -> &str {
        match self {
            Restriction::Orifice(o) => o.name(),
        }
    }

    fn flow(&self, ports: PortStates<'_>) -> ComponentResult<FlowSolution> {
        match self {
            Restriction::Orifice(o) => o.flow(ports),
        }
    }
}

/// Flows and per-volume fluxes for one set of volume states.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSnapshot {
    pub flows: Vec<FlowSolution>,
    pub fluxes: Vec<MassEnergyFlux>,
}

/// Graph and elements together. Element vectors are indexed like the
/// graph's volumes and restrictions.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    graph: Graph,
    volumes: Vec<Volume>,
    restrictions: Vec<Restriction>,
}

impl FlowNetwork {
    pub fn new(
        graph: Graph,
        volumes: Vec<Volume>,
        restrictions: Vec<Restriction>,
    ) -> ComponentResult<Self> {
        if volumes.len() != graph.volumes().len() {
            return Err(ComponentError::CountMismatch {
                what: "volumes",
                expected: graph.volumes().len(),
                actual: volumes.len(),
            });
        }
        if restrictions.len() != graph.restrictions().len() {
            return Err(ComponentError::CountMismatch {
                what: "restrictions",
                expected: graph.restrictions().len(),
                actual: restrictions.len(),
            });
        }
        let names_match = graph
            .volumes()
            .iter()
            .zip(&volumes)
            .all(|(node, vol)| node.name == vol.name())
            && graph
                .restrictions()
                .iter()
                .zip(&restrictions)
                .all(|(edge, r)| edge.name == r.name());
        if !names_match {
            return Err(ComponentError::InvalidArg {
                what: "elements must be in graph order",
            });
        }
        Ok(Self {
            graph,
            volumes,
            restrictions,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    pub fn volumes_mut(&mut self) -> &mut [Volume] {
        &mut self.volumes
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    pub fn restrictions_mut(&mut self) -> &mut [Restriction] {
        &mut self.restrictions
    }

    /// Current state of every volume from its stored pressure and temperature.
    pub fn volume_states(&self) -> ComponentResult<Vec<FluidState>> {
        self.volumes.iter().map(Volume::state).collect()
    }

    /// Evaluate every flow law and the resulting fluxes for the given states.
    /// Pure: nothing stored in the network changes.
    pub fn evaluate(&self, states: &[FluidState]) -> ComponentResult<NetworkSnapshot> {
        if states.len() != self.volumes.len() {
            return Err(ComponentError::CountMismatch {
                what: "volume states",
                expected: self.volumes.len(),
                actual: states.len(),
            });
        }
        let flows = self
            .graph
            .restrictions()
            .iter()
            .zip(&self.restrictions)
            .map(|(edge, r)| {
                r.flow(PortStates {
                    upstream: &states[edge.upstream.idx()],
                    downstream: &states[edge.downstream.idx()],
                })
            })
            .collect::<ComponentResult<Vec<_>>>()?;
        let fluxes = accumulate(&self.graph, states, &flows)?;
        Ok(NetworkSnapshot { flows, fluxes })
    }

    /// Adopt new Static volume states (Void entries are ignored), then
    /// recompute every derived quantity.
    pub fn apply_states(&mut self, states: &[FluidState]) -> ComponentResult<NetworkSnapshot> {
        if states.len() != self.volumes.len() {
            return Err(ComponentError::CountMismatch {
                what: "volume states",
                expected: self.volumes.len(),
                actual: states.len(),
            });
        }
        for (vol, state) in self.volumes.iter_mut().zip(states) {
            if let Volume::Static(v) = vol {
                v.apply_state(state);
            }
        }
        self.refresh()
    }

    /// Recompute derived quantities (densities, enthalpies, flows, net
    /// fluxes) from the stored pressures and temperatures.
    pub fn refresh(&mut self) -> ComponentResult<NetworkSnapshot> {
        let states = self.volume_states()?;
        let snapshot = self.evaluate(&states)?;

        for ((vol, state), flux) in self.volumes.iter_mut().zip(&states).zip(&snapshot.fluxes) {
            match vol {
                Volume::Static(v) => {
                    v.apply_state(state);
                    v.mdot = flux.mdot;
                    v.udot = flux.udot;
                }
                Volume::Void(v) => v.refresh()?,
            }
        }
        for (r, flow) in self.restrictions.iter_mut().zip(&snapshot.flows) {
            r.record(*flow);
        }
        trace!(restrictions = snapshot.flows.len(), "network refreshed");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orifice::MdotMethod;
    use crate::volume::{StaticVolume, VoidVolume};
    use kk_core::units::{k, m2, m3, pa};
    use kk_fluids::Species;
    use kk_graph::GraphBuilder;

    fn blowdown() -> FlowNetwork {
        let mut b = GraphBuilder::new();
        let tank = b.add_volume("Tank");
        let atm = b.add_volume("Atm");
        let r = b.add_restriction("Orifice");
        b.connect(r, tank, atm);
        let graph = b.build().unwrap();

        let volumes = vec![
            Volume::Static(
                StaticVolume::new("Tank", Species::N2, pa(200_000.0), k(277.0), m3(10.0))
                    .unwrap(),
            ),
            Volume::Void(VoidVolume::new("Atm", Species::N2, pa(100_000.0), k(277.0)).unwrap()),
        ];
        let restrictions = vec![Restriction::Orifice(Orifice::new(
            "Orifice",
            m2(0.075),
            MdotMethod::IdealCompressible,
        ))];
        FlowNetwork::new(graph, volumes, restrictions).unwrap()
    }

    #[test]
    fn refresh_records_outputs() {
        let mut net = blowdown();
        let snap = net.refresh().unwrap();
        let Restriction::Orifice(o) = &net.restrictions()[0];
        assert!(o.mdot > 0.0);
        assert!(o.is_choked);
        assert_eq!(o.mdot, snap.flows[0].mdot);

        let tank = net.volumes()[0].as_static().unwrap();
        assert_eq!(tank.mdot, -o.mdot);
        assert!(tank.udot < 0.0);
    }

    #[test]
    fn evaluate_is_pure() {
        let net = blowdown();
        let before = net.volumes().to_vec();
        let states = net.volume_states().unwrap();
        net.evaluate(&states).unwrap();
        assert_eq!(net.volumes(), before.as_slice());
    }

    #[test]
    fn out_of_order_elements_rejected() {
        let net = blowdown();
        let mut volumes = net.volumes().to_vec();
        volumes.swap(0, 1);
        let err = FlowNetwork::new(net.graph().clone(), volumes, net.restrictions().to_vec());
        assert!(err.is_err());
    }

    #[test]
    fn apply_states_ignores_voids() {
        let mut net = blowdown();
        let mut states = net.volume_states().unwrap();
        states[0] = FluidState::from_pt_raw(Species::N2, 150_000.0, 270.0).unwrap();
        states[1] = FluidState::from_pt_raw(Species::N2, 1.0, 1.0).unwrap();
        net.apply_states(&states).unwrap();
        assert!((net.volumes()[0].as_static().unwrap().press - 150_000.0).abs() < 1e-9);
        let Volume::Void(atm) = &net.volumes()[1] else {
            panic!("expected void");
        };
        assert_eq!(atm.press, 100_000.0);
    }
}
