//! The closed set of physical quantities crossing the kernel boundary.

use std::fmt;

/// Dimensional exponents of a quantity: `energy^energy * length^length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub energy: i32,
    pub length: i32,
}

impl Dimensions {
    pub const fn new(energy: i32, length: i32) -> Dimensions {
        Dimensions { energy, length }
    }
}

/// Tag carried by every buffer handed to or returned from the kernel.
///
/// The tag is also the buffer's role: it fixes the dimensional exponents
/// used for unit conversion and the row of the shape multiplier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhysicalQuantity {
    /// ρ, electronic density
    Density,
    /// ∇ρ, density gradient magnitude
    DensityGradient,
    /// ϵ, energy per particle
    EnergyDensity,
    /// ∂ϵ/∂ρ
    DEDRho,
    /// ∂ϵ/∂∇ρ
    DEDGrad,
    /// ∂²ϵ/∂ρ²
    D2EDRho2,
    /// ∂²ϵ/∂ρ∂∇ρ
    D2EDRhoDGrad,
    /// ∂²ϵ/∂∇ρ²
    D2EDGrad2,
    /// ∂³ϵ/∂ρ³
    D3EDRho3,
    /// ∂³ϵ/∂ρ²∂∇ρ
    D3EDRho2DGrad,
    /// ∂³ϵ/∂ρ∂∇ρ²
    D3EDRhoDGrad2,
    /// ∂³ϵ/∂∇ρ³
    D3EDGrad3,
}

impl PhysicalQuantity {
    pub const ALL: [PhysicalQuantity; 12] = [
        PhysicalQuantity::Density,
        PhysicalQuantity::DensityGradient,
        PhysicalQuantity::EnergyDensity,
        PhysicalQuantity::DEDRho,
        PhysicalQuantity::DEDGrad,
        PhysicalQuantity::D2EDRho2,
        PhysicalQuantity::D2EDRhoDGrad,
        PhysicalQuantity::D2EDGrad2,
        PhysicalQuantity::D3EDRho3,
        PhysicalQuantity::D3EDRho2DGrad,
        PhysicalQuantity::D3EDRhoDGrad2,
        PhysicalQuantity::D3EDGrad3,
    ];

    pub const COUNT: usize = 12;

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub const fn dimensions(self) -> Dimensions {
        match self {
            PhysicalQuantity::Density => Dimensions::new(0, -3),
            PhysicalQuantity::DensityGradient => Dimensions::new(0, -4),
            PhysicalQuantity::EnergyDensity => Dimensions::new(1, 0),
            PhysicalQuantity::DEDRho => Dimensions::new(1, 3),
            PhysicalQuantity::DEDGrad => Dimensions::new(1, 4),
            PhysicalQuantity::D2EDRho2 => Dimensions::new(1, 6),
            PhysicalQuantity::D2EDRhoDGrad => Dimensions::new(1, 7),
            PhysicalQuantity::D2EDGrad2 => Dimensions::new(1, 8),
            PhysicalQuantity::D3EDRho3 => Dimensions::new(1, 9),
            PhysicalQuantity::D3EDRho2DGrad => Dimensions::new(1, 10),
            PhysicalQuantity::D3EDRhoDGrad2 => Dimensions::new(1, 11),
            PhysicalQuantity::D3EDGrad3 => Dimensions::new(1, 12),
        }
    }

    /// Derivative order of an output quantity, `None` for the two inputs.
    pub const fn order(self) -> Option<usize> {
        match self {
            PhysicalQuantity::Density | PhysicalQuantity::DensityGradient => None,
            PhysicalQuantity::EnergyDensity => Some(0),
            PhysicalQuantity::DEDRho | PhysicalQuantity::DEDGrad => Some(1),
            PhysicalQuantity::D2EDRho2
            | PhysicalQuantity::D2EDRhoDGrad
            | PhysicalQuantity::D2EDGrad2 => Some(2),
            PhysicalQuantity::D3EDRho3
            | PhysicalQuantity::D3EDRho2DGrad
            | PhysicalQuantity::D3EDRhoDGrad2
            | PhysicalQuantity::D3EDGrad3 => Some(3),
        }
    }

    pub const fn is_input(self) -> bool {
        self.order().is_none()
    }

    /// True for quantities that only exist for gradient-dependent functionals.
    pub const fn involves_gradient(self) -> bool {
        matches!(
            self,
            PhysicalQuantity::DensityGradient
                | PhysicalQuantity::DEDGrad
                | PhysicalQuantity::D2EDRhoDGrad
                | PhysicalQuantity::D2EDGrad2
                | PhysicalQuantity::D3EDRho2DGrad
                | PhysicalQuantity::D3EDRhoDGrad2
                | PhysicalQuantity::D3EDGrad3
        )
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            PhysicalQuantity::Density => "ρ",
            PhysicalQuantity::DensityGradient => "∇ρ",
            PhysicalQuantity::EnergyDensity => "ϵ",
            PhysicalQuantity::DEDRho => "∂ϵ_∂ρ",
            PhysicalQuantity::DEDGrad => "∂ϵ_∂∇ρ",
            PhysicalQuantity::D2EDRho2 => "∂²ϵ_∂ρ²",
            PhysicalQuantity::D2EDRhoDGrad => "∂²ϵ_∂ρ∂∇ρ",
            PhysicalQuantity::D2EDGrad2 => "∂²ϵ_∂∇ρ²",
            PhysicalQuantity::D3EDRho3 => "∂³ϵ_∂ρ³",
            PhysicalQuantity::D3EDRho2DGrad => "∂³ϵ_∂ρ²∂∇ρ",
            PhysicalQuantity::D3EDRhoDGrad2 => "∂³ϵ_∂ρ∂∇ρ²",
            PhysicalQuantity::D3EDGrad3 => "∂³ϵ_∂∇ρ³",
        }
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, q) in PhysicalQuantity::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }

    #[test]
    fn test_derivative_dimensions_follow_chain_rule() {
        // each ∂/∂ρ adds a₀^3, each ∂/∂∇ρ adds a₀^4
        assert_eq!(PhysicalQuantity::DEDRho.dimensions(), Dimensions::new(1, 3));
        assert_eq!(
            PhysicalQuantity::D2EDRhoDGrad.dimensions(),
            Dimensions::new(1, 7)
        );
        assert_eq!(
            PhysicalQuantity::D3EDRho2DGrad.dimensions(),
            Dimensions::new(1, 10)
        );
    }

    #[test]
    fn test_inputs_have_no_order() {
        assert!(PhysicalQuantity::Density.is_input());
        assert!(PhysicalQuantity::DensityGradient.is_input());
        assert_eq!(PhysicalQuantity::D2EDGrad2.order(), Some(2));
    }
}
