//! Orifice restriction with compressible and incompressible flow laws.

use crate::common::{EPSILON_PRESSURE, check_finite};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{FlowRestriction, FlowSolution, PortStates};
use kk_core::units::Area;
use kk_fluids::FluidState;

/// Flow law used by an orifice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MdotMethod {
    /// Isentropic ideal-gas nozzle flow with choking.
    #[default]
    IdealCompressible,
    /// Bernoulli flow at upstream density.
    Incompressible,
}

impl MdotMethod {
    pub fn name(&self) -> &'static str {
        match self {
            MdotMethod::IdealCompressible => "IdealCompressible",
            MdotMethod::Incompressible => "Incompressible",
        }
    }
}

impl std::str::FromStr for MdotMethod {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IdealCompressible" => Ok(MdotMethod::IdealCompressible),
            "Incompressible" => Ok(MdotMethod::Incompressible),
            _ => Err(ComponentError::InvalidArg {
                what: "mdot_method must be IdealCompressible or Incompressible",
            }),
        }
    }
}

/// Sharp-edged orifice characterized by its effective flow area (Cd·A).
///
/// `mdot` and `is_choked` hold the result of the last evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Orifice {
    name: String,
    /// Effective flow area [m²].
    pub cda: f64,
    pub method: MdotMethod,
    /// Last computed mass flow [kg/s].
    pub mdot: f64,
    /// Whether the last computed flow was choked.
    pub is_choked: bool,
}

impl Orifice {
    pub fn new(name: impl Into<String>, cda: Area, method: MdotMethod) -> Self {
        Self {
            name: name.into(),
            cda: cda.value,
            method,
            mdot: 0.0,
            is_choked: false,
        }
    }

    /// Store a flow evaluation as the orifice's current outputs.
    pub fn record(&mut self, flow: FlowSolution) {
        self.mdot = flow.mdot;
        self.is_choked = flow.is_choked;
    }

    /// Critical (choking) pressure ratio for a given γ.
    pub fn critical_ratio(gamma: f64) -> f64 {
        (2.0 / (gamma + 1.0)).powf(gamma / (gamma - 1.0))
    }

    fn mdot_compressible(&self, source: &FluidState, p_sink: f64) -> ComponentResult<FlowSolution> {
        let gamma = source.gamma();
        let p0 = source.p();
        let rho0 = source.rho();
        check_finite(rho0, "upstream density")?;
        check_finite(gamma, "gamma")?;

        let r = p_sink / p0;
        let r_crit = Self::critical_ratio(gamma);

        let (mdot, is_choked) = if r <= r_crit {
            let choke = (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (gamma - 1.0));
            (self.cda * (gamma * rho0 * p0 * choke).sqrt(), true)
        } else {
            let expansion = r.powf(2.0 / gamma) - r.powf((gamma + 1.0) / gamma);
            let mdot = self.cda * (2.0 * rho0 * p0 * (gamma / (gamma - 1.0)) * expansion).sqrt();
            (mdot, false)
        };

        check_finite(mdot, "mass flow rate")?;
        Ok(FlowSolution { mdot, is_choked })
    }

    fn mdot_incompressible(&self, source: &FluidState, p_sink: f64) -> ComponentResult<FlowSolution> {
        let rho = source.rho();
        check_finite(rho, "density")?;
        let mdot = self.cda * (2.0 * rho * (source.p() - p_sink)).sqrt();
        check_finite(mdot, "mass flow rate")?;
        Ok(FlowSolution {
            mdot,
            is_choked: false,
        })
    }
}

impl FlowRestriction for Orifice {
    fn name(&self) -> &str {
        &self.name
    }

    fn flow(&self, ports: PortStates<'_>) -> ComponentResult<FlowSolution> {
        let p_up = ports.upstream.p();
        let p_down = ports.downstream.p();

        if (p_up - p_down).abs() < EPSILON_PRESSURE {
            return Ok(FlowSolution::default());
        }

        // Reverse flow: the nominal downstream side is the source.
        let (source, p_sink, sign) = if p_up > p_down {
            (ports.upstream, p_down, 1.0)
        } else {
            (ports.downstream, p_up, -1.0)
        };

        let solution = match self.method {
            MdotMethod::IdealCompressible => self.mdot_compressible(source, p_sink)?,
            MdotMethod::Incompressible => self.mdot_incompressible(source, p_sink)?,
        };

        Ok(FlowSolution {
            mdot: sign * solution.mdot,
            is_choked: solution.is_choked,
        })
    }
}
