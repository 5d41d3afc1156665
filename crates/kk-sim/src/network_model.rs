//! Mass and energy dynamics of the Static volumes in a flow network.
//!
//! State per Static volume is (mass, total internal energy). Void volumes
//! stay at their prescribed states. Restriction flows are re-evaluated at
//! every RHS call from the volume states implied by the integrated state.

use kk_components::{FlowNetwork, Volume};
use kk_fluids::FluidState;
use kk_graph::IndexMap;

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;

/// Mass [kg] and total internal energy [J] of one Static volume.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VolumeState {
    pub mass: f64,
    pub energy: f64,
}

/// Integrated state, one entry per Static volume in graph order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetworkState {
    pub volumes: Vec<VolumeState>,
}

impl NetworkState {
    pub fn total_mass(&self) -> f64 {
        self.volumes.iter().map(|v| v.mass).sum()
    }

    pub fn total_energy(&self) -> f64 {
        self.volumes.iter().map(|v| v.energy).sum()
    }
}

/// Transient model over a mutably borrowed network.
///
/// RHS evaluation never writes to the network; `commit` does.
pub struct NetworkModel<'a> {
    network: &'a mut FlowNetwork,
    statics: IndexMap,
    base_states: Vec<FluidState>,
}

impl<'a> NetworkModel<'a> {
    pub fn new(network: &'a mut FlowNetwork) -> SimResult<Self> {
        let volumes = network.volumes();
        let statics = IndexMap::from_volumes(network.graph(), |id| {
            volumes.get(id.idx()).is_some_and(Volume::is_static)
        });
        let base_states = network.volume_states()?;
        Ok(Self {
            network,
            statics,
            base_states,
        })
    }

    pub fn network(&self) -> &FlowNetwork {
        &*self.network
    }

    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    /// Full per-volume fluid states implied by `x`.
    pub fn fluid_states(&self, x: &NetworkState) -> SimResult<Vec<FluidState>> {
        if x.volumes.len() != self.statics.len() {
            return Err(SimError::InvalidArg {
                what: "state length does not match Static volume count",
            });
        }
        let mut states = self.base_states.clone();
        for (vs, &id) in x.volumes.iter().zip(self.statics.volume_ids()) {
            let vol = self.static_volume(id.idx())?;
            states[id.idx()] = vol.state_from_mass_energy(vs.mass, vs.energy)?;
        }
        Ok(states)
    }

    /// Write `x` into the network and refresh every derived quantity.
    pub fn commit(&mut self, x: &NetworkState) -> SimResult<()> {
        let states = self.fluid_states(x)?;
        self.network.apply_states(&states)?;
        self.base_states = states;
        Ok(())
    }

    fn static_volume(&self, idx: usize) -> SimResult<&kk_components::StaticVolume> {
        self.network
            .volumes()
            .get(idx)
            .and_then(Volume::as_static)
            .ok_or(SimError::InvalidArg {
                what: "indexed volume is not Static",
            })
    }
}

impl TransientModel for NetworkModel<'_> {
    type State = NetworkState;

    fn initial_state(&self) -> SimResult<NetworkState> {
        let mut volumes = Vec::with_capacity(self.statics.len());
        for &id in self.statics.volume_ids() {
            let vol = self.static_volume(id.idx())?;
            let state = &self.base_states[id.idx()];
            volumes.push(VolumeState {
                mass: state.rho() * vol.volume,
                energy: vol.internal_energy(state),
            });
        }
        Ok(NetworkState { volumes })
    }

    fn rhs(&mut self, _t: f64, x: &NetworkState) -> SimResult<NetworkState> {
        let states = self.fluid_states(x)?;
        let snapshot = self.network.evaluate(&states)?;
        let volumes = self
            .statics
            .volume_ids()
            .iter()
            .map(|id| {
                let flux = snapshot.fluxes[id.idx()];
                VolumeState {
                    mass: flux.mdot,
                    energy: flux.udot,
                }
            })
            .collect();
        Ok(NetworkState { volumes })
    }

    fn add(&self, a: &NetworkState, b: &NetworkState) -> NetworkState {
        NetworkState {
            volumes: a
                .volumes
                .iter()
                .zip(&b.volumes)
                .map(|(a, b)| VolumeState {
                    mass: a.mass + b.mass,
                    energy: a.energy + b.energy,
                })
                .collect(),
        }
    }

    fn scale(&self, a: &NetworkState, scale: f64) -> NetworkState {
        NetworkState {
            volumes: a
                .volumes
                .iter()
                .map(|v| VolumeState {
                    mass: scale * v.mass,
                    energy: scale * v.energy,
                })
                .collect(),
        }
    }

    fn error_norm(&self, a: &NetworkState, b: &NetworkState) -> f64 {
        fn rel(x: f64, y: f64) -> f64 {
            let scale = x.abs().max(y.abs());
            if scale == 0.0 { 0.0 } else { (x - y).abs() / scale }
        }
        a.volumes
            .iter()
            .zip(&b.volumes)
            .map(|(a, b)| rel(a.mass, b.mass).max(rel(a.energy, b.energy)))
            .fold(0.0, f64::max)
    }

    fn validate(&self, x: &NetworkState) -> SimResult<()> {
        self.fluid_states(x).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_components::{MdotMethod, Orifice, Restriction, StaticVolume, VoidVolume};
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
    fn initial_state_matches_volume() {
        let mut net = blowdown();
        let expected_mass = net.volumes()[0].as_static().unwrap().mass;
        let model = NetworkModel::new(&mut net).unwrap();
        let x = model.initial_state().unwrap();
        assert_eq!(x.volumes.len(), 1);
        assert!((x.volumes[0].mass - expected_mass).abs() < 1e-12);
    }

    #[test]
    fn blowdown_rhs_drains_tank() {
        let mut net = blowdown();
        let mut model = NetworkModel::new(&mut net).unwrap();
        let x = model.initial_state().unwrap();
        let dx = model.rhs(0.0, &x).unwrap();
        assert!(dx.volumes[0].mass < 0.0);
        assert!(dx.volumes[0].energy < 0.0);
    }

    #[test]
    fn non_positive_mass_is_non_physical() {
        let mut net = blowdown();
        let mut model = NetworkModel::new(&mut net).unwrap();
        let x = NetworkState {
            volumes: vec![VolumeState {
                mass: -1.0,
                energy: 1.0,
            }],
        };
        assert!(matches!(model.rhs(0.0, &x), Err(SimError::NonPhysical { .. })));
        assert!(model.validate(&x).is_err());
    }

    #[test]
    fn commit_writes_back() {
        let mut net = blowdown();
        {
            let mut model = NetworkModel::new(&mut net).unwrap();
            let mut x = model.initial_state().unwrap();
            x.volumes[0].mass *= 0.9;
            x.volumes[0].energy *= 0.9;
            model.commit(&x).unwrap();
        }
        let tank = net.volumes()[0].as_static().unwrap();
        // Same specific energy, 90% density: temperature unchanged, pressure scales.
        assert!((tank.temp - 277.0).abs() < 1e-9);
        assert!((tank.press - 180_000.0).abs() < 1e-6);
    }

    #[test]
    fn error_norm_is_relative() {
        let mut net = blowdown();
        let model = NetworkModel::new(&mut net).unwrap();
        let a = NetworkState {
            volumes: vec![VolumeState {
                mass: 100.0,
                energy: 1e7,
            }],
        };
        let mut b = a.clone();
        b.volumes[0].mass = 100.01;
        assert!((model.error_norm(&a, &b) - 1e-4 / 1.0001).abs() < 1e-12);
        assert_eq!(model.error_norm(&a, &a), 0.0);
    }
}
