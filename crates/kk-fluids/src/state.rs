//! Thermodynamic state definitions.

use kk_core::units::{Pressure, Temperature};

use crate::error::{FluidError, FluidResult};
use crate::ideal_gas::IdealGas;
use crate::species::Species;

/// Specific enthalpy [J/kg].
pub type SpecEnthalpy = f64;

/// Specific internal energy [J/kg].
pub type SpecEnergy = f64;

/// A complete fluid state. Independent properties are validated at
/// construction and every derived property is computed once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidState {
    species: Species,
    gas: IdealGas,
    p: f64,
    t: f64,
    rho: f64,
    u: SpecEnergy,
    h: SpecEnthalpy,
}

impl FluidState {
    /// Create a state from pressure and temperature.
    pub fn from_pt(species: Species, p: Pressure, t: Temperature) -> FluidResult<Self> {
        Self::from_pt_raw(species, p.value, t.value)
    }

    /// As `from_pt`, with plain SI values [Pa], [K].
    pub fn from_pt_raw(species: Species, p: f64, t: f64) -> FluidResult<Self> {
        check_positive("pressure", p)?;
        check_positive("temperature", t)?;
        let gas = species.ideal_gas();
        Ok(Self {
            species,
            gas,
            p,
            t,
            rho: gas.density_pt(p, t),
            u: gas.sp_energy_t(t),
            h: gas.sp_enthalpy_t(t),
        })
    }

    /// Create a state from density [kg/m³] and specific internal energy [J/kg].
    pub fn from_density_energy(species: Species, rho: f64, u: SpecEnergy) -> FluidResult<Self> {
        check_positive("density", rho)?;
        check_positive("specific internal energy", u)?;
        let gas = species.ideal_gas();
        let t = gas.temperature_u(u);
        Ok(Self {
            species,
            gas,
            p: gas.pressure_du(rho, u),
            t,
            rho,
            u,
            h: gas.sp_enthalpy_t(t),
        })
    }

    pub fn species(&self) -> Species {
        self.species
    }

    /// Pressure [Pa].
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Temperature [K].
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Density [kg/m³].
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Specific internal energy [J/kg].
    pub fn u(&self) -> SpecEnergy {
        self.u
    }

    /// Specific enthalpy [J/kg].
    pub fn h(&self) -> SpecEnthalpy {
        self.h
    }

    pub fn gamma(&self) -> f64 {
        self.gas.gamma()
    }

    pub fn cv(&self) -> f64 {
        self.gas.cv()
    }

    /// Speed of sound [m/s].
    pub fn speed_of_sound(&self) -> f64 {
        self.gas.speed_of_sound_pd(self.p, self.rho)
    }

    /// Specific entropy [J/(kg·K)] relative to the standard atmosphere.
    pub fn s(&self) -> f64 {
        self.gas.sp_entropy_pt(self.p, self.t)
    }

    /// Debug summary of the main properties.
    pub fn summary(&self) -> String {
        format!(
            "{}(P={:.0}Pa,T={:.1}K,ρ={:.4}kg/m³,h={:.1}J/kg)",
            self.species, self.p, self.t, self.rho, self.h
        )
    }
}

fn check_positive(what: &'static str, value: f64) -> FluidResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FluidError::NonPhysical { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_core::units::{k, pa};

    #[test]
    fn create_valid_state() {
        let state = FluidState::from_pt(Species::N2, pa(200_000.0), k(277.0)).unwrap();
        assert_eq!(state.p(), 200_000.0);
        assert_eq!(state.t(), 277.0);
        assert!((state.rho() - 2.4326).abs() < 1e-3);
        assert!((state.gamma() - 1.4).abs() < 1e-12);
    }

    #[test]
    fn reject_non_physical_inputs() {
        assert!(FluidState::from_pt(Species::N2, pa(-100.0), k(300.0)).is_err());
        assert!(FluidState::from_pt(Species::N2, pa(101_325.0), k(0.0)).is_err());
        assert!(FluidState::from_pt_raw(Species::N2, f64::NAN, 300.0).is_err());
        assert!(FluidState::from_density_energy(Species::N2, 0.0, 2e5).is_err());
    }

    #[test]
    fn density_energy_matches_pt() {
        let a = FluidState::from_pt_raw(Species::He, 350_000.0, 310.0).unwrap();
        let b = FluidState::from_density_energy(Species::He, a.rho(), a.u()).unwrap();
        assert!((a.p() - b.p()).abs() < 1e-6);
        assert!((a.t() - b.t()).abs() < 1e-9);
        assert!((a.h() - b.h()).abs() < 1e-6);
    }

    #[test]
    fn summary_names_species() {
        let state = FluidState::from_pt_raw(Species::O2, 101_325.0, 300.0).unwrap();
        assert!(state.summary().starts_with("Oxygen"));
    }
}
