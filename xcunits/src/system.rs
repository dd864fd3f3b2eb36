use crate::consts::*;
use crate::quantity::Dimensions;
use std::fmt;
use std::str::FromStr;

use crate::UnitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyUnit {
    Hartree,
    Rydberg,
    ElectronVolt,
}

impl EnergyUnit {
    /// Size of one unit in Hartree.
    pub fn in_hartree(self) -> f64 {
        match self {
            EnergyUnit::Hartree => 1.0,
            EnergyUnit::Rydberg => RY_TO_HA,
            EnergyUnit::ElectronVolt => EV_TO_HA,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            EnergyUnit::Hartree => "Eₕ",
            EnergyUnit::Rydberg => "Ry",
            EnergyUnit::ElectronVolt => "eV",
        }
    }
}

impl FromStr for EnergyUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hartree" | "ha" => Ok(EnergyUnit::Hartree),
            "rydberg" | "ry" => Ok(EnergyUnit::Rydberg),
            "ev" => Ok(EnergyUnit::ElectronVolt),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Bohr,
    Angstrom,
}

impl LengthUnit {
    /// Size of one unit in bohr.
    pub fn in_bohr(self) -> f64 {
        match self {
            LengthUnit::Bohr => 1.0,
            LengthUnit::Angstrom => ANG_TO_BOHR,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Bohr => "a₀",
            LengthUnit::Angstrom => "Å",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bohr" | "a0" => Ok(LengthUnit::Bohr),
            "angstrom" | "ang" => Ok(LengthUnit::Angstrom),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Pair of base units a buffer is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSystem {
    pub energy: EnergyUnit,
    pub length: LengthUnit,
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::ATOMIC
    }
}

impl UnitSystem {
    /// Hartree atomic units, what the kernel reads and writes.
    pub const ATOMIC: UnitSystem = UnitSystem {
        energy: EnergyUnit::Hartree,
        length: LengthUnit::Bohr,
    };

    pub fn new(energy: EnergyUnit, length: LengthUnit) -> UnitSystem {
        UnitSystem { energy, length }
    }

    pub fn is_atomic(&self) -> bool {
        *self == UnitSystem::ATOMIC
    }

    /// Multiplier taking a value with `dims` from these units to atomic units.
    pub fn factor_to_atomic(&self, dims: Dimensions) -> f64 {
        self.energy.in_hartree().powi(dims.energy) * self.length.in_bohr().powi(dims.length)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.energy.symbol(), self.length.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicalQuantity;

    const TOL: f64 = 1.0E-12;

    #[test]
    fn test_atomic_factor_is_one() {
        for q in PhysicalQuantity::ALL.iter() {
            let f = UnitSystem::ATOMIC.factor_to_atomic(q.dimensions());
            assert!((f - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn test_density_in_angstrom() {
        let units = UnitSystem::new(EnergyUnit::Hartree, LengthUnit::Angstrom);
        let f = units.factor_to_atomic(PhysicalQuantity::Density.dimensions());
        // 1 Å^-3 = bohr_to_ang^3 a₀^-3
        assert!((f - BOHR_TO_ANG.powi(3)).abs() < TOL);
    }

    #[test]
    fn test_energy_in_ev() {
        let units = UnitSystem::new(EnergyUnit::ElectronVolt, LengthUnit::Bohr);
        let f = units.factor_to_atomic(PhysicalQuantity::EnergyDensity.dimensions());
        assert!((f * HA_TO_EV - 1.0).abs() < TOL);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("eV".parse::<EnergyUnit>(), Ok(EnergyUnit::ElectronVolt));
        assert_eq!("Angstrom".parse::<LengthUnit>(), Ok(LengthUnit::Angstrom));
        assert!("furlong".parse::<LengthUnit>().is_err());
    }
}
