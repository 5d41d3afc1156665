//! Pressure volumes: finite-capacitance accumulators and fixed boundaries.

use crate::error::{ComponentError, ComponentResult};
use kk_core::units::{Pressure, Temperature, Volume as VolumeQty};
use kk_fluids::{FluidState, Species};

/// Finite volume accumulating mass and energy from its restrictions.
///
/// `press` and `temp` are the independent state. The remaining fields are
/// derived and refreshed whenever the network is re-evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticVolume {
    name: String,
    pub species: Species,
    /// Pressure [Pa].
    pub press: f64,
    /// Temperature [K].
    pub temp: f64,
    /// Volume [m³].
    pub volume: f64,
    /// Mass [kg].
    pub mass: f64,
    /// Density [kg/m³].
    pub density: f64,
    /// Specific enthalpy [J/kg].
    pub sp_enthalpy: f64,
    /// Net mass inflow [kg/s].
    pub mdot: f64,
    /// Net energy inflow [J/s].
    pub udot: f64,
}

impl StaticVolume {
    pub fn new(
        name: impl Into<String>,
        species: Species,
        press: Pressure,
        temp: Temperature,
        volume: VolumeQty,
    ) -> ComponentResult<Self> {
        let name = name.into();
        if !(volume.value.is_finite() && volume.value > 0.0) {
            return Err(ComponentError::InvalidArg {
                what: "static volume must be positive",
            });
        }
        let state = FluidState::from_pt(species, press, temp)?;
        let mut vol = Self {
            name,
            species,
            press: state.p(),
            temp: state.t(),
            volume: volume.value,
            mass: 0.0,
            density: 0.0,
            sp_enthalpy: 0.0,
            mdot: 0.0,
            udot: 0.0,
        };
        vol.apply_state(&state);
        Ok(vol)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fluid state at the stored pressure and temperature.
    pub fn state(&self) -> ComponentResult<FluidState> {
        Ok(FluidState::from_pt_raw(self.species, self.press, self.temp)?)
    }

    /// Total internal energy [J] of a state filling this volume.
    pub fn internal_energy(&self, state: &FluidState) -> f64 {
        state.rho() * self.volume * state.u()
    }

    /// State holding the given mass [kg] and total internal energy [J].
    pub fn state_from_mass_energy(&self, mass: f64, energy: f64) -> ComponentResult<FluidState> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ComponentError::NonPositiveMass {
                volume: self.name.clone(),
                mass,
            });
        }
        let rho = mass / self.volume;
        let u = energy / mass;
        Ok(FluidState::from_density_energy(self.species, rho, u)?)
    }

    /// Adopt a state and refresh the derived fields that depend only on it.
    pub fn apply_state(&mut self, state: &FluidState) {
        self.press = state.p();
        self.temp = state.t();
        self.density = state.rho();
        self.mass = state.rho() * self.volume;
        self.sp_enthalpy = state.h();
    }
}

/// Infinite-capacitance boundary at a fixed state.
#[derive(Debug, Clone, PartialEq)]
pub struct VoidVolume {
    name: String,
    pub species: Species,
    /// Pressure [Pa].
    pub press: f64,
    /// Temperature [K].
    pub temp: f64,
    /// Density [kg/m³].
    pub density: f64,
    /// Specific enthalpy [J/kg].
    pub sp_enthalpy: f64,
}

impl VoidVolume {
    pub fn new(
        name: impl Into<String>,
        species: Species,
        press: Pressure,
        temp: Temperature,
    ) -> ComponentResult<Self> {
        let state = FluidState::from_pt(species, press, temp)?;
        Ok(Self {
            name: name.into(),
            species,
            press: state.p(),
            temp: state.t(),
            density: state.rho(),
            sp_enthalpy: state.h(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ComponentResult<FluidState> {
        Ok(FluidState::from_pt_raw(self.species, self.press, self.temp)?)
    }

    /// Refresh derived fields after an external write to `press`/`temp`.
    pub fn refresh(&mut self) -> ComponentResult<()> {
        let state = self.state()?;
        self.density = state.rho();
        self.sp_enthalpy = state.h();
        Ok(())
    }
}

/// Any volume kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Volume {
    Static(StaticVolume),
    Void(VoidVolume),
}

impl Volume {
    pub fn name(&self) -> &str {
        match self {
            Volume::Static(v) => v.name(),
            Volume::Void(v) => v.name(),
        }
    }

    pub fn state(&self) -> ComponentResult<FluidState> {
        match self {
            Volume::Static(v) => v.state(),
            Volume::Void(v) => v.state(),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Volume::Static(_))
    }

    pub fn as_static(&self) -> Option<&StaticVolume> {
        match self {
            Volume::Static(v) => Some(v),
            Volume::Void(_) => None,
        }
    }

    pub fn as_static_mut(&mut self) -> Option<&mut StaticVolume> {
        match self {
            Volume::Static(v) => Some(v),
            Volume::Void(_) => None,
        }
    }
}
