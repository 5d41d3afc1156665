//! Gas species catalog.

use crate::error::FluidError;
use crate::ideal_gas::IdealGas;

/// Gases with a calorically perfect ideal-gas model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Nitrogen (N₂)
    N2,
    /// Air (pseudo-pure)
    Air,
    /// Oxygen (O₂)
    O2,
    /// Helium (He)
    He,
    /// Hydrogen (H₂)
    H2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Methane (CH₄)
    CH4,
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::N2,
        Species::Air,
        Species::O2,
        Species::He,
        Species::H2,
        Species::Ar,
        Species::CO2,
        Species::CH4,
    ];

    /// Canonical name, as written in model files.
    pub fn name(&self) -> &'static str {
        match self {
            Species::N2 => "Nitrogen",
            Species::Air => "Air",
            Species::O2 => "Oxygen",
            Species::He => "Helium",
            Species::H2 => "Hydrogen",
            Species::Ar => "Argon",
            Species::CO2 => "CarbonDioxide",
            Species::CH4 => "Methane",
        }
    }

    /// Molar mass [kg/mol].
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::N2 => 0.028_013_4,
            Species::Air => 0.028_964_7,
            Species::O2 => 0.031_998_8,
            Species::He => 0.004_002_6,
            Species::H2 => 0.002_015_88,
            Species::Ar => 0.039_948,
            Species::CO2 => 0.044_01,
            Species::CH4 => 0.016_04,
        }
    }

    /// Ratio of specific heats near room temperature.
    pub fn gamma(&self) -> f64 {
        match self {
            Species::N2 | Species::Air => 1.40,
            Species::O2 => 1.395,
            Species::He | Species::Ar => 5.0 / 3.0,
            Species::H2 => 1.405,
            Species::CO2 => 1.289,
            Species::CH4 => 1.304,
        }
    }

    /// Ideal-gas model for this species.
    pub fn ideal_gas(&self) -> IdealGas {
        IdealGas::from_molar_mass(self.molar_mass(), self.gamma())
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Species {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N2" | "NITROGEN" => Ok(Species::N2),
            "AIR" => Ok(Species::Air),
            "O2" | "OXYGEN" => Ok(Species::O2),
            "HE" | "HELIUM" => Ok(Species::He),
            "H2" | "HYDROGEN" => Ok(Species::H2),
            "AR" | "ARGON" => Ok(Species::Ar),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "CH4" | "METHANE" => Ok(Species::CH4),
            _ => Err(FluidError::UnknownFluid { name: s.to_string() }),
        }
    }
}
