//! Problem definition for steady-state network solving.

use crate::error::{SolverError, SolverResult};
use kk_components::{FlowNetwork, Volume};
use kk_fluids::FluidState;
use kk_graph::IndexMap;
use nalgebra::DVector;

/// Which balances the steady solver enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteadyMode {
    /// Mass balance only; Static temperatures stay at their current values.
    #[default]
    Pressure,
    /// Mass and energy balance; Static temperatures are unknowns too.
    PressureTemperature,
}

impl SteadyMode {
    pub fn name(&self) -> &'static str {
        match self {
            SteadyMode::Pressure => "Pressure",
            SteadyMode::PressureTemperature => "PressureTemperature",
        }
    }

    /// Unknowns per Static volume.
    pub fn unknowns_per_volume(&self) -> usize {
        match self {
            SteadyMode::Pressure => 1,
            SteadyMode::PressureTemperature => 2,
        }
    }
}

impl std::str::FromStr for SteadyMode {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pressure" => Ok(SteadyMode::Pressure),
            "PressureTemperature" => Ok(SteadyMode::PressureTemperature),
            other => Err(SolverError::ProblemSetup {
                what: format!("unknown steady mode '{other}'"),
            }),
        }
    }
}

/// Steady-state residual equations over a network.
///
/// Unknowns are packed per Static volume in graph order:
/// `[p_0, p_1, ...]` or `[p_0, T_0, p_1, T_1, ...]`.
pub struct SteadyProblem<'a> {
    network: &'a FlowNetwork,
    mode: SteadyMode,
    statics: IndexMap,
    base_states: Vec<FluidState>,
}

impl<'a> SteadyProblem<'a> {
    pub fn new(network: &'a FlowNetwork, mode: SteadyMode) -> SolverResult<Self> {
        let volumes = network.volumes();
        let statics = IndexMap::from_volumes(network.graph(), |id| {
            volumes.get(id.idx()).is_some_and(Volume::is_static)
        });
        let base_states = network.volume_states()?;
        Ok(Self {
            network,
            mode,
            statics,
            base_states,
        })
    }

    pub fn mode(&self) -> SteadyMode {
        self.mode
    }

    pub fn unknown_count(&self) -> usize {
        self.statics.len() * self.mode.unknowns_per_volume()
    }

    /// Registry-style names of the unknowns, in packing order.
    pub fn unknown_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.unknown_count());
        for &id in self.statics.volume_ids() {
            let name = self.network.volumes()[id.idx()].name();
            labels.push(format!("{name}.press [Pa]"));
            if self.mode == SteadyMode::PressureTemperature {
                labels.push(format!("{name}.temp [K]"));
            }
        }
        labels
    }

    /// Unknowns at the network's current state.
    pub fn initial_guess(&self) -> DVector<f64> {
        let per = self.mode.unknowns_per_volume();
        let mut x = DVector::zeros(self.unknown_count());
        for (k, &id) in self.statics.volume_ids().iter().enumerate() {
            let state = &self.base_states[id.idx()];
            x[k * per] = state.p();
            if per == 2 {
                x[k * per + 1] = state.t();
            }
        }
        x
    }

    /// Volume states with the Static entries taken from `x`.
    pub fn states_at(&self, x: &DVector<f64>) -> SolverResult<Vec<FluidState>> {
        if x.len() != self.unknown_count() {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "unknown vector length {} != {}",
                    x.len(),
                    self.unknown_count()
                ),
            });
        }
        let per = self.mode.unknowns_per_volume();
        let mut states = self.base_states.clone();
        for (k, &id) in self.statics.volume_ids().iter().enumerate() {
            let base = &self.base_states[id.idx()];
            let t = if per == 2 { x[k * per + 1] } else { base.t() };
            states[id.idx()] = FluidState::from_pt_raw(base.species(), x[k * per], t)?;
        }
        Ok(states)
    }

    /// Mass (and energy) imbalance of every Static volume at `x`.
    pub fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let states = self.states_at(x)?;
        let snapshot = self.network.evaluate(&states)?;
        let per = self.mode.unknowns_per_volume();
        let mut r = DVector::zeros(self.unknown_count());
        for (k, &id) in self.statics.volume_ids().iter().enumerate() {
            let flux = snapshot.fluxes[id.idx()];
            r[k * per] = flux.mdot;
            if per == 2 {
                r[k * per + 1] = flux.udot;
            }
        }
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_components::{MdotMethod, Orifice, Restriction, StaticVolume, VoidVolume};
    use kk_core::units::{k, m2, m3, pa};
    use kk_fluids::Species;
    use kk_graph::GraphBuilder;

    fn chain() -> FlowNetwork {
        let mut b = GraphBuilder::new();
        let inlet = b.add_volume("Inlet");
        let tank = b.add_volume("Tank");
        let outlet = b.add_volume("Outlet");
        let a = b.add_restriction("A");
        let c = b.add_restriction("B");
        b.connect(a, inlet, tank);
        b.connect(c, tank, outlet);
        let graph = b.build().unwrap();
        let volumes = vec![
            Volume::Void(VoidVolume::new("Inlet", Species::N2, pa(300_000.0), k(300.0)).unwrap()),
            Volume::Static(
                StaticVolume::new("Tank", Species::N2, pa(150_000.0), k(300.0), m3(1.0)).unwrap(),
            ),
            Volume::Void(VoidVolume::new("Outlet", Species::N2, pa(100_000.0), k(300.0)).unwrap()),
        ];
        let restrictions = vec![
            Restriction::Orifice(Orifice::new("A", m2(1e-3), MdotMethod::IdealCompressible)),
            Restriction::Orifice(Orifice::new("B", m2(1e-3), MdotMethod::IdealCompressible)),
        ];
        FlowNetwork::new(graph, volumes, restrictions).unwrap()
    }

    #[test]
    fn labels_follow_mode() {
        let net = chain();
        let p = SteadyProblem::new(&net, SteadyMode::Pressure).unwrap();
        assert_eq!(p.unknown_labels(), vec!["Tank.press [Pa]".to_string()]);
        let pt = SteadyProblem::new(&net, SteadyMode::PressureTemperature).unwrap();
        assert_eq!(
            pt.unknown_labels(),
            vec!["Tank.press [Pa]".to_string(), "Tank.temp [K]".to_string()]
        );
        assert_eq!(pt.initial_guess().as_slice(), &[150_000.0, 300.0]);
    }

    #[test]
    fn residual_sign() {
        let net = chain();
        let problem = SteadyProblem::new(&net, SteadyMode::Pressure).unwrap();
        // Inflow exceeds outflow when the tank sits close to the outlet pressure.
        let r = problem.residual(&DVector::from_element(1, 110_000.0)).unwrap();
        assert!(r[0] > 0.0);
        let r = problem.residual(&DVector::from_element(1, 290_000.0)).unwrap();
        assert!(r[0] < 0.0);
    }

    #[test]
    fn wrong_length_rejected() {
        let net = chain();
        let problem = SteadyProblem::new(&net, SteadyMode::Pressure).unwrap();
        assert!(problem.residual(&DVector::zeros(3)).is_err());
    }

    #[test]
    fn parse_mode() {
        assert_eq!(
            "PressureTemperature".parse::<SteadyMode>().unwrap(),
            SteadyMode::PressureTemperature
        );
        assert!("Enthalpy".parse::<SteadyMode>().is_err());
    }
}
