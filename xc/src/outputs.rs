//! Typed results of the public operations, and the caller-buffer sets of
//! their in-place variants. Members that only exist for gradient-dependent
//! functionals are `Option`s.

use ndarray::ArrayD;
use xcinfo::Family;
use xcunits::{PhysicalQuantity, Quantity};

use crate::error::{Result, XcError};

use PhysicalQuantity::*;

/// Fresh native outputs of one call, keyed by role.
#[derive(Debug, Default)]
pub struct Produced {
    arrays: Vec<(PhysicalQuantity, ArrayD<f64>)>,
}

impl Produced {
    pub(crate) fn push(&mut self, role: PhysicalQuantity, data: ArrayD<f64>) {
        self.arrays.push((role, data));
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = PhysicalQuantity> + '_ {
        self.arrays.iter().map(|(r, _)| *r)
    }

    pub fn take(&mut self, role: PhysicalQuantity) -> Option<Quantity<f64>> {
        let i = self.arrays.iter().position(|(r, _)| *r == role)?;
        let (role, data) = self.arrays.swap_remove(i);
        Some(Quantity::new(role, data))
    }

    pub fn require(&mut self, role: PhysicalQuantity) -> Result<Quantity<f64>> {
        self.take(role).ok_or(XcError::Unbound(role))
    }

    fn gradient(&mut self, family: Family, role: PhysicalQuantity) -> Result<Option<Quantity<f64>>> {
        if family.needs_gradient() {
            self.require(role).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Potential {
    /// ∂ϵ/∂ρ
    pub vrho: Quantity<f64>,
    /// ∂ϵ/∂σ
    pub vsigma: Option<Quantity<f64>>,
}

impl Potential {
    pub(crate) fn take(p: &mut Produced, family: Family) -> Result<Potential> {
        Ok(Potential {
            vrho: p.require(DEDRho)?,
            vsigma: p.gradient(family, DEDGrad)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyAndPotential {
    pub zk: Quantity<f64>,
    pub vrho: Quantity<f64>,
    pub vsigma: Option<Quantity<f64>>,
}

impl EnergyAndPotential {
    pub(crate) fn take(p: &mut Produced, family: Family) -> Result<EnergyAndPotential> {
        let zk = p.require(EnergyDensity)?;
        let Potential { vrho, vsigma } = Potential::take(p, family)?;
        Ok(EnergyAndPotential { zk, vrho, vsigma })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecondDerivative {
    pub v2rho2: Quantity<f64>,
    pub v2rhosigma: Option<Quantity<f64>>,
    pub v2sigma2: Option<Quantity<f64>>,
}

impl SecondDerivative {
    pub(crate) fn take(p: &mut Produced, family: Family) -> Result<SecondDerivative> {
        Ok(SecondDerivative {
            v2rho2: p.require(D2EDRho2)?,
            v2rhosigma: p.gradient(family, D2EDRhoDGrad)?,
            v2sigma2: p.gradient(family, D2EDGrad2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThirdDerivative {
    pub v3rho3: Quantity<f64>,
    pub v3rho2sigma: Option<Quantity<f64>>,
    pub v3rhosigma2: Option<Quantity<f64>>,
    pub v3sigma3: Option<Quantity<f64>>,
}

impl ThirdDerivative {
    pub(crate) fn take(p: &mut Produced, family: Family) -> Result<ThirdDerivative> {
        Ok(ThirdDerivative {
            v3rho3: p.require(D3EDRho3)?,
            v3rho2sigma: p.gradient(family, D3EDRho2DGrad)?,
            v3rhosigma2: p.gradient(family, D3EDRhoDGrad2)?,
            v3sigma3: p.gradient(family, D3EDGrad3)?,
        })
    }
}

/// Energy and every derivative the functional provides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllOutputs {
    pub zk: Option<Quantity<f64>>,
    pub potential: Option<Potential>,
    pub second: Option<SecondDerivative>,
    pub third: Option<ThirdDerivative>,
}

impl AllOutputs {
    pub(crate) fn take(p: &mut Produced, family: Family) -> Result<AllOutputs> {
        let mut all = AllOutputs {
            zk: p.take(EnergyDensity),
            ..AllOutputs::default()
        };

        if p.roles().any(|r| r == DEDRho) {
            all.potential = Some(Potential::take(p, family)?);
        }
        if p.roles().any(|r| r == D2EDRho2) {
            all.second = Some(SecondDerivative::take(p, family)?);
        }
        if p.roles().any(|r| r == D3EDRho3) {
            all.third = Some(ThirdDerivative::take(p, family)?);
        }

        Ok(all)
    }
}

/// Caller buffers, each paired with the role it must carry.
pub(crate) type SuppliedSlots<'a> = Vec<(PhysicalQuantity, Option<&'a mut Quantity<f64>>)>;

pub struct PotentialMut<'a> {
    pub vrho: &'a mut Quantity<f64>,
    pub vsigma: Option<&'a mut Quantity<f64>>,
}

impl<'a> PotentialMut<'a> {
    pub fn lda(vrho: &'a mut Quantity<f64>) -> Self {
        PotentialMut { vrho, vsigma: None }
    }

    pub fn gga(vrho: &'a mut Quantity<f64>, vsigma: &'a mut Quantity<f64>) -> Self {
        PotentialMut {
            vrho,
            vsigma: Some(vsigma),
        }
    }

    pub(crate) fn slots(self) -> SuppliedSlots<'a> {
        vec![(DEDRho, Some(self.vrho)), (DEDGrad, self.vsigma)]
    }
}

pub struct EnergyAndPotentialMut<'a> {
    pub zk: &'a mut Quantity<f64>,
    pub vrho: &'a mut Quantity<f64>,
    pub vsigma: Option<&'a mut Quantity<f64>>,
}

impl<'a> EnergyAndPotentialMut<'a> {
    pub fn lda(zk: &'a mut Quantity<f64>, vrho: &'a mut Quantity<f64>) -> Self {
        EnergyAndPotentialMut {
            zk,
            vrho,
            vsigma: None,
        }
    }

    pub fn gga(zk: &'a mut Quantity<f64>, vrho: &'a mut Quantity<f64>, vsigma: &'a mut Quantity<f64>) -> Self {
        EnergyAndPotentialMut {
            zk,
            vrho,
            vsigma: Some(vsigma),
        }
    }

    pub(crate) fn slots(self) -> SuppliedSlots<'a> {
        vec![
            (EnergyDensity, Some(self.zk)),
            (DEDRho, Some(self.vrho)),
            (DEDGrad, self.vsigma),
        ]
    }
}

pub struct SecondDerivativeMut<'a> {
    pub v2rho2: &'a mut Quantity<f64>,
    pub v2rhosigma: Option<&'a mut Quantity<f64>>,
    pub v2sigma2: Option<&'a mut Quantity<f64>>,
}

impl<'a> SecondDerivativeMut<'a> {
    pub fn lda(v2rho2: &'a mut Quantity<f64>) -> Self {
        SecondDerivativeMut {
            v2rho2,
            v2rhosigma: None,
            v2sigma2: None,
        }
    }

    pub fn gga(
        v2rho2: &'a mut Quantity<f64>,
        v2rhosigma: &'a mut Quantity<f64>,
        v2sigma2: &'a mut Quantity<f64>,
    ) -> Self {
        SecondDerivativeMut {
            v2rho2,
            v2rhosigma: Some(v2rhosigma),
            v2sigma2: Some(v2sigma2),
        }
    }

    pub(crate) fn slots(self) -> SuppliedSlots<'a> {
        vec![
            (D2EDRho2, Some(self.v2rho2)),
            (D2EDRhoDGrad, self.v2rhosigma),
            (D2EDGrad2, self.v2sigma2),
        ]
    }
}

pub struct ThirdDerivativeMut<'a> {
    pub v3rho3: &'a mut Quantity<f64>,
    pub v3rho2sigma: Option<&'a mut Quantity<f64>>,
    pub v3rhosigma2: Option<&'a mut Quantity<f64>>,
    pub v3sigma3: Option<&'a mut Quantity<f64>>,
}

impl<'a> ThirdDerivativeMut<'a> {
    pub fn lda(v3rho3: &'a mut Quantity<f64>) -> Self {
        ThirdDerivativeMut {
            v3rho3,
            v3rho2sigma: None,
            v3rhosigma2: None,
            v3sigma3: None,
        }
    }

    pub fn gga(
        v3rho3: &'a mut Quantity<f64>,
        v3rho2sigma: &'a mut Quantity<f64>,
        v3rhosigma2: &'a mut Quantity<f64>,
        v3sigma3: &'a mut Quantity<f64>,
    ) -> Self {
        ThirdDerivativeMut {
            v3rho3,
            v3rho2sigma: Some(v3rho2sigma),
            v3rhosigma2: Some(v3rhosigma2),
            v3sigma3: Some(v3sigma3),
        }
    }

    pub(crate) fn slots(self) -> SuppliedSlots<'a> {
        vec![
            (D3EDRho3, Some(self.v3rho3)),
            (D3EDRho2DGrad, self.v3rho2sigma),
            (D3EDRhoDGrad2, self.v3rhosigma2),
            (D3EDGrad3, self.v3sigma3),
        ]
    }
}

/// Any subset of outputs for the combined entry point.
#[derive(Default)]
pub struct AllOutputsMut<'a> {
    pub zk: Option<&'a mut Quantity<f64>>,
    pub vrho: Option<&'a mut Quantity<f64>>,
    pub vsigma: Option<&'a mut Quantity<f64>>,
    pub v2rho2: Option<&'a mut Quantity<f64>>,
    pub v2rhosigma: Option<&'a mut Quantity<f64>>,
    pub v2sigma2: Option<&'a mut Quantity<f64>>,
    pub v3rho3: Option<&'a mut Quantity<f64>>,
    pub v3rho2sigma: Option<&'a mut Quantity<f64>>,
    pub v3rhosigma2: Option<&'a mut Quantity<f64>>,
    pub v3sigma3: Option<&'a mut Quantity<f64>>,
}

impl<'a> AllOutputsMut<'a> {
    pub(crate) fn slots(self) -> SuppliedSlots<'a> {
        vec![
            (EnergyDensity, self.zk),
            (DEDRho, self.vrho),
            (DEDGrad, self.vsigma),
            (D2EDRho2, self.v2rho2),
            (D2EDRhoDGrad, self.v2rhosigma),
            (D2EDGrad2, self.v2sigma2),
            (D3EDRho3, self.v3rho3),
            (D3EDRho2DGrad, self.v3rho2sigma),
            (D3EDRhoDGrad2, self.v3rhosigma2),
            (D3EDGrad3, self.v3sigma3),
        ]
    }
}
