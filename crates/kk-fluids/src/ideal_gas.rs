//! Calorically perfect ideal gas.
//!
//! All relations follow from `p = ρ r T`, `u = cv T` and `h = cp T`, with
//! `r = cp - cv` (Mayer's relation).

use kk_core::units::constants::{R_UNIVERSAL, STD_ATM_K, STD_ATM_PA};

/// Ideal gas defined by its specific heats [J/(kg·K)].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    cp: f64,
    cv: f64,
    sp_r: f64,
}

impl IdealGas {
    pub fn new(cp: f64, cv: f64) -> Self {
        Self {
            cp,
            cv,
            sp_r: cp - cv,
        }
    }

    /// Build from molar mass [kg/mol] and ratio of specific heats.
    pub fn from_molar_mass(molar_mass: f64, gamma: f64) -> Self {
        let sp_r = R_UNIVERSAL / molar_mass;
        let cv = sp_r / (gamma - 1.0);
        Self::new(gamma * cv, cv)
    }

    pub fn cp(&self) -> f64 {
        self.cp
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }

    /// Specific gas constant [J/(kg·K)].
    pub fn sp_r(&self) -> f64 {
        self.sp_r
    }

    pub fn gamma(&self) -> f64 {
        self.cp / self.cv
    }

    /// ρ = p / (r T)
    pub fn density_pt(&self, pressure: f64, temperature: f64) -> f64 {
        pressure / (self.sp_r * temperature)
    }

    /// h = cp T
    pub fn sp_enthalpy_t(&self, temperature: f64) -> f64 {
        self.cp * temperature
    }

    /// u = cv T
    pub fn sp_energy_t(&self, temperature: f64) -> f64 {
        self.cv * temperature
    }

    /// s relative to the standard atmosphere.
    pub fn sp_entropy_pt(&self, pressure: f64, temperature: f64) -> f64 {
        self.cp * (temperature / STD_ATM_K).ln() - self.sp_r * (pressure / STD_ATM_PA).ln()
    }

    /// T = u / cv
    pub fn temperature_u(&self, sp_energy: f64) -> f64 {
        sp_energy / self.cv
    }

    /// p = ρ u r / cv
    pub fn pressure_du(&self, density: f64, sp_energy: f64) -> f64 {
        density * self.sp_r * self.temperature_u(sp_energy)
    }

    /// a = sqrt(γ p / ρ)
    pub fn speed_of_sound_pd(&self, pressure: f64, density: f64) -> f64 {
        (self.gamma() * pressure / density).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn air() -> IdealGas {
        IdealGas::from_molar_mass(0.028_964_7, 1.4)
    }

    #[test]
    fn mayer_relation_holds() {
        let gas = air();
        assert!((gas.cp() - gas.cv() - gas.sp_r()).abs() < 1e-9);
        assert!((gas.gamma() - 1.4).abs() < 1e-12);
    }

    #[test]
    fn sea_level_air_density() {
        let rho = air().density_pt(STD_ATM_PA, STD_ATM_K);
        assert!((rho - 1.225).abs() < 1e-3);
    }

    #[test]
    fn energy_inverts() {
        let gas = air();
        let t = 277.0;
        let rho = gas.density_pt(200_000.0, t);
        let u = gas.sp_energy_t(t);
        assert!((gas.temperature_u(u) - t).abs() < 1e-9);
        assert!((gas.pressure_du(rho, u) - 200_000.0).abs() < 1e-6);
    }

    #[test]
    fn entropy_zero_at_reference() {
        assert!(air().sp_entropy_pt(STD_ATM_PA, STD_ATM_K).abs() < 1e-12);
    }

    #[test]
    fn speed_of_sound_air() {
        let gas = air();
        let rho = gas.density_pt(STD_ATM_PA, STD_ATM_K);
        let a = gas.speed_of_sound_pd(STD_ATM_PA, rho);
        assert!((a - 340.3).abs() < 0.5);
    }
}
