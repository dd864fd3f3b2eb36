use tracing::trace;
use xcinfo::{Family, XC_FLAGS_HAVE_EXC, XC_FLAGS_HAVE_FXC, XC_FLAGS_HAVE_KXC, XC_FLAGS_HAVE_VXC};
use xcunits::PhysicalQuantity;

use crate::binder::{BoundBuffers, OutputSlices};
use crate::error::{Result, XcError};
use crate::handle::FunctionalHandle;
use crate::kernel::{GgaOut, Kernel, LdaOut};
use crate::shape::DerivativeOrders;

use PhysicalQuantity::*;

/// Native entry points, per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Exc,
    ExcVxc,
    Vxc,
    Fxc,
    Kxc,
    /// `xc_lda` / `xc_gga`, any subset of orders at once.
    Combined,
}

impl EntryPoint {
    /// Orders the entry point writes when the caller asks for `requested`.
    ///
    /// The combined entry point writes every available order up to the
    /// highest one requested.
    pub fn computes(self, requested: DerivativeOrders, available: DerivativeOrders) -> DerivativeOrders {
        let bits = match self {
            EntryPoint::Exc => XC_FLAGS_HAVE_EXC,
            EntryPoint::ExcVxc => XC_FLAGS_HAVE_EXC | XC_FLAGS_HAVE_VXC,
            EntryPoint::Vxc => XC_FLAGS_HAVE_VXC,
            EntryPoint::Fxc => XC_FLAGS_HAVE_FXC,
            EntryPoint::Kxc => XC_FLAGS_HAVE_KXC,
            EntryPoint::Combined => {
                let up_to = match requested.max() {
                    Some(k) => DerivativeOrders::from_flags((1 << (k + 1)) - 1),
                    None => DerivativeOrders::NONE,
                };
                return up_to.intersection(available).union(requested);
            }
        };
        DerivativeOrders::from_flags(bits)
    }

    pub fn symbol(self, family: Family) -> &'static str {
        match (family, self) {
            (Family::Lda, EntryPoint::Exc) => "xc_lda_exc",
            (Family::Lda, EntryPoint::ExcVxc) => "xc_lda_exc_vxc",
            (Family::Lda, EntryPoint::Vxc) => "xc_lda_vxc",
            (Family::Lda, EntryPoint::Fxc) => "xc_lda_fxc",
            (Family::Lda, EntryPoint::Kxc) => "xc_lda_kxc",
            (Family::Lda, EntryPoint::Combined) => "xc_lda",
            (Family::Gga, EntryPoint::Exc) => "xc_gga_exc",
            (Family::Gga, EntryPoint::ExcVxc) => "xc_gga_exc_vxc",
            (Family::Gga, EntryPoint::Vxc) => "xc_gga_vxc",
            (Family::Gga, EntryPoint::Fxc) => "xc_gga_fxc",
            (Family::Gga, EntryPoint::Kxc) => "xc_gga_kxc",
            (Family::Gga, EntryPoint::Combined) => "xc_gga",
        }
    }
}

/// Fails with `UnsupportedDerivative` for the lowest requested order the
/// live object lacks. Returns the available set.
pub fn check_available<K: Kernel>(
    handle: &FunctionalHandle<'_, K>,
    requested: DerivativeOrders,
) -> Result<DerivativeOrders> {
    let available = handle.available_orders();

    match requested.iter().find(|&k| !available.contains(k)) {
        Some(order) => Err(XcError::UnsupportedDerivative {
            name: handle.name().to_string(),
            order,
        }),
        None => Ok(available),
    }
}

struct Slices<'b> {
    slices: Vec<(PhysicalQuantity, Option<&'b mut [f64]>)>,
}

impl<'b> Slices<'b> {
    fn new(outputs: OutputSlices<'b>) -> Self {
        Slices {
            slices: outputs.into_iter().map(|(r, s)| (r, Some(s))).collect(),
        }
    }

    fn take(&mut self, role: PhysicalQuantity) -> Option<&'b mut [f64]> {
        self.slices
            .iter_mut()
            .find(|(r, _)| *r == role)
            .and_then(|(_, s)| s.take())
    }

    fn need(&mut self, role: PhysicalQuantity) -> Result<&'b mut [f64]> {
        self.take(role).ok_or(XcError::Unbound(role))
    }
}

/// Calls the native entry point with every bound buffer in ABI order.
///
/// Every order the contract binds must be available on the live object,
/// otherwise `UnsupportedDerivative` and the kernel is not called.
pub fn invoke<K: Kernel>(handle: &FunctionalHandle<'_, K>, entry: EntryPoint, bound: &mut BoundBuffers<'_>) -> Result<()> {
    check_available(handle, bound.contract().orders())?;

    let family = handle.family();
    let np = bound.contract().points();

    trace!(
        "{} for {} on {} points",
        entry.symbol(family),
        handle.name(),
        np
    );

    let (rho, sigma, outputs) = bound.split()?;
    let mut out = Slices::new(outputs);

    let kernel = handle.kernel();
    let f = handle.native();

    let status = match family {
        Family::Lda => match entry {
            EntryPoint::Exc => kernel.lda_exc(f, np, rho, out.need(EnergyDensity)?),
            EntryPoint::ExcVxc => kernel.lda_exc_vxc(f, np, rho, out.need(EnergyDensity)?, out.need(DEDRho)?),
            EntryPoint::Vxc => kernel.lda_vxc(f, np, rho, out.need(DEDRho)?),
            EntryPoint::Fxc => kernel.lda_fxc(f, np, rho, out.need(D2EDRho2)?),
            EntryPoint::Kxc => kernel.lda_kxc(f, np, rho, out.need(D3EDRho3)?),
            EntryPoint::Combined => {
                let slots = LdaOut {
                    zk: out.take(EnergyDensity),
                    vrho: out.take(DEDRho),
                    v2rho2: out.take(D2EDRho2),
                    v3rho3: out.take(D3EDRho3),
                };
                kernel.lda(f, np, rho, slots)
            }
        },

        Family::Gga => {
            let sigma = sigma.ok_or(XcError::Unbound(DensityGradient))?;

            match entry {
                EntryPoint::Exc => kernel.gga_exc(f, np, rho, sigma, out.need(EnergyDensity)?),
                EntryPoint::ExcVxc => kernel.gga_exc_vxc(
                    f,
                    np,
                    rho,
                    sigma,
                    out.need(EnergyDensity)?,
                    out.need(DEDRho)?,
                    out.need(DEDGrad)?,
                ),
                EntryPoint::Vxc => kernel.gga_vxc(f, np, rho, sigma, out.need(DEDRho)?, out.need(DEDGrad)?),
                EntryPoint::Fxc => kernel.gga_fxc(
                    f,
                    np,
                    rho,
                    sigma,
                    out.need(D2EDRho2)?,
                    out.need(D2EDRhoDGrad)?,
                    out.need(D2EDGrad2)?,
                ),
                EntryPoint::Kxc => kernel.gga_kxc(
                    f,
                    np,
                    rho,
                    sigma,
                    out.need(D3EDRho3)?,
                    out.need(D3EDRho2DGrad)?,
                    out.need(D3EDRhoDGrad2)?,
                    out.need(D3EDGrad3)?,
                ),
                EntryPoint::Combined => {
                    let slots = GgaOut {
                        zk: out.take(EnergyDensity),
                        vrho: out.take(DEDRho),
                        vsigma: out.take(DEDGrad),
                        v2rho2: out.take(D2EDRho2),
                        v2rhosigma: out.take(D2EDRhoDGrad),
                        v2sigma2: out.take(D2EDGrad2),
                        v3rho3: out.take(D3EDRho3),
                        v3rho2sigma: out.take(D3EDRho2DGrad),
                        v3rhosigma2: out.take(D3EDRhoDGrad2),
                        v3sigma3: out.take(D3EDGrad3),
                    };
                    kernel.gga(f, np, rho, sigma, slots)
                }
            }
        }
    };

    status.map_err(|status| XcError::KernelError {
        name: handle.name().to_string(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(list: &[usize]) -> DerivativeOrders {
        list.iter()
            .try_fold(DerivativeOrders::NONE, |acc, &k| acc.with(k))
            .unwrap()
    }

    #[test]
    fn test_fixed_entry_points() {
        let all = DerivativeOrders::ALL;

        assert_eq!(EntryPoint::Exc.computes(orders(&[0]), all), orders(&[0]));
        assert_eq!(EntryPoint::ExcVxc.computes(orders(&[0, 1]), all), orders(&[0, 1]));
        assert_eq!(EntryPoint::Kxc.computes(orders(&[3]), all), orders(&[3]));
    }

    #[test]
    fn test_combined_binds_lower_orders() {
        let all = DerivativeOrders::ALL;

        assert_eq!(EntryPoint::Combined.computes(orders(&[2]), all), orders(&[0, 1, 2]));
        assert_eq!(
            EntryPoint::Combined.computes(orders(&[1]), orders(&[0, 1])),
            orders(&[0, 1])
        );
        assert_eq!(
            EntryPoint::Combined.computes(DerivativeOrders::NONE, all),
            DerivativeOrders::NONE
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(EntryPoint::ExcVxc.symbol(Family::Gga), "xc_gga_exc_vxc");
        assert_eq!(EntryPoint::Combined.symbol(Family::Lda), "xc_lda");
    }
}
