//! Pure-Rust reference kernel.
//!
//! Knows a handful of library ids and evaluates them point by point with the
//! same argument layout and status convention as libxc, so the rest of the
//! crate cannot tell it from the native table.

use xcinfo::{XC_FLAGS_HAVE_ALL, XC_FLAGS_HAVE_EXC, XC_FLAGS_HAVE_VXC};

use crate::correlation::pz::{pz_polarized, pz_unpolarized};
use crate::exchange::pbe::{pbe_x_channel, pbe_x_unpolarized};
use crate::exchange::slater::{slater_channel, slater_unpolarized};
use crate::kernel::{Backend, GgaOut, Kernel, KernelResult, LdaOut};
use crate::shape::DerivativeOrders;

pub const STATUS_UNKNOWN_ID: i32 = -1;
pub const STATUS_WRONG_FAMILY: i32 = -2;
pub const STATUS_NO_DERIVATIVE: i32 = -3;
pub const STATUS_BAD_LENGTH: i32 = -4;

const LDA_X: i32 = 1;
const LDA_C_PZ: i32 = 9;
const GGA_X_PBE: i32 = 101;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    SlaterExchange,
    PerdewZunger,
    PbeExchange,
}

impl Model {
    fn from_id(library_id: i32) -> Option<Model> {
        match library_id {
            LDA_X => Some(Model::SlaterExchange),
            LDA_C_PZ => Some(Model::PerdewZunger),
            GGA_X_PBE => Some(Model::PbeExchange),
            _ => None,
        }
    }

    fn flags(self) -> u32 {
        match self {
            Model::SlaterExchange => XC_FLAGS_HAVE_ALL,
            Model::PerdewZunger | Model::PbeExchange => XC_FLAGS_HAVE_EXC | XC_FLAGS_HAVE_VXC,
        }
    }

    fn is_gga(self) -> bool {
        self == Model::PbeExchange
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFunctional {
    model: Model,
    polarized: bool,
    dens_threshold: f64,
}

impl BuiltinFunctional {
    pub fn model(&self) -> Model {
        self.model
    }

    pub fn polarized(&self) -> bool {
        self.polarized
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinKernel {
    dens_threshold: f64,
}

impl Default for BuiltinKernel {
    fn default() -> Self {
        BuiltinKernel {
            dens_threshold: 1.0E-15,
        }
    }
}

impl BuiltinKernel {
    pub fn new() -> BuiltinKernel {
        BuiltinKernel::default()
    }

    pub fn dens_threshold(&self) -> f64 {
        self.dens_threshold
    }
}

impl Backend for BuiltinKernel {
    const NAME: &'static str = "builtin";

    fn with_dens_threshold(dens_threshold: f64) -> Self {
        BuiltinKernel { dens_threshold }
    }
}

// per-point values, spin components in libxc order

#[derive(Debug, Default)]
struct LdaPoint {
    zk: f64,
    vrho: [f64; 2],
    v2rho2: [f64; 3],
    v3rho3: [f64; 4],
}

#[derive(Debug, Default)]
struct GgaPoint {
    zk: f64,
    vrho: [f64; 2],
    vsigma: [f64; 3],
}

fn requested_lda(out: &LdaOut<'_>) -> DerivativeOrders {
    let mut bits = 0;
    for (k, present) in [
        out.zk.is_some(),
        out.vrho.is_some(),
        out.v2rho2.is_some(),
        out.v3rho3.is_some(),
    ]
    .iter()
    .enumerate()
    {
        if *present {
            bits |= 1 << k;
        }
    }
    DerivativeOrders::from_flags(bits)
}

fn any(slots: &[bool]) -> bool {
    slots.iter().any(|&s| s)
}

fn requested_gga(out: &GgaOut<'_>) -> DerivativeOrders {
    let mut bits = 0;
    if out.zk.is_some() {
        bits |= 1;
    }
    if any(&[out.vrho.is_some(), out.vsigma.is_some()]) {
        bits |= 2;
    }
    if any(&[
        out.v2rho2.is_some(),
        out.v2rhosigma.is_some(),
        out.v2sigma2.is_some(),
    ]) {
        bits |= 4;
    }
    if any(&[
        out.v3rho3.is_some(),
        out.v3rho2sigma.is_some(),
        out.v3rhosigma2.is_some(),
        out.v3sigma3.is_some(),
    ]) {
        bits |= 8;
    }
    DerivativeOrders::from_flags(bits)
}

fn check_len(buf: &Option<&mut [f64]>, len: usize) -> KernelResult {
    match buf {
        Some(b) if b.len() != len => Err(STATUS_BAD_LENGTH),
        _ => Ok(()),
    }
}

fn store(buf: &mut Option<&mut [f64]>, ip: usize, values: &[f64]) {
    if let Some(b) = buf {
        let n = values.len();
        b[ip * n..(ip + 1) * n].copy_from_slice(values);
    }
}

impl BuiltinFunctional {
    fn check_orders(&self, requested: DerivativeOrders) -> KernelResult {
        let available = DerivativeOrders::from_flags(self.model.flags());
        if requested.intersection(available) == requested {
            Ok(())
        } else {
            Err(STATUS_NO_DERIVATIVE)
        }
    }

    fn lda_point(&self, rho: &[f64]) -> LdaPoint {
        let mut p = LdaPoint::default();

        if !self.polarized {
            let r = rho[0];
            if r < self.dens_threshold {
                return p;
            }

            match self.model {
                Model::SlaterExchange => {
                    let s = slater_unpolarized(r);
                    p.zk = s.ex;
                    p.vrho[0] = s.vx;
                    p.v2rho2[0] = s.fx;
                    p.v3rho3[0] = s.kx;
                }
                Model::PerdewZunger => {
                    let (vc, ec) = pz_unpolarized(r);
                    p.zk = ec;
                    p.vrho[0] = vc;
                }
                Model::PbeExchange => {}
            }

            return p;
        }

        let (up, dn) = (rho[0].max(0.0), rho[1].max(0.0));
        let total = up + dn;
        if total < self.dens_threshold {
            return p;
        }

        match self.model {
            Model::SlaterExchange => {
                let mut e = 0.0;
                for (s, &r) in [up, dn].iter().enumerate() {
                    if r < self.dens_threshold {
                        continue;
                    }
                    let c = slater_channel(r);
                    e += r * c.ex;
                    p.vrho[s] = c.vx;
                    // (↑↑, ↑↓, ↓↓) and (↑↑↑, ↑↑↓, ↑↓↓, ↓↓↓)
                    p.v2rho2[2 * s] = c.fx;
                    p.v3rho3[3 * s] = c.kx;
                }
                p.zk = e / total;
            }
            Model::PerdewZunger => {
                let (vu, vd, ec) = pz_polarized(total, (up - dn) / total);
                p.zk = ec;
                p.vrho = [vu, vd];
            }
            Model::PbeExchange => {}
        }

        p
    }

    fn gga_point(&self, rho: &[f64], sigma: &[f64]) -> GgaPoint {
        let mut p = GgaPoint::default();

        if !self.polarized {
            let r = rho[0];
            if r < self.dens_threshold {
                return p;
            }
            let x = pbe_x_unpolarized(r, sigma[0]);
            p.zk = x.e / r;
            p.vrho[0] = x.dedrho;
            p.vsigma[0] = x.dedsigma;
            return p;
        }

        let (up, dn) = (rho[0].max(0.0), rho[1].max(0.0));
        let total = up + dn;
        if total < self.dens_threshold {
            return p;
        }

        // σ↑↓ does not enter exchange
        let mut e = 0.0;
        for (s, (&r, &sg)) in [up, dn].iter().zip([sigma[0], sigma[2]].iter()).enumerate() {
            if r < self.dens_threshold {
                continue;
            }
            let c = pbe_x_channel(r, sg);
            e += c.e;
            p.vrho[s] = c.dedrho;
            p.vsigma[2 * s] = c.dedsigma;
        }
        p.zk = e / total;

        p
    }
}

impl Kernel for BuiltinKernel {
    type Functional = BuiltinFunctional;

    fn init(&self, library_id: i32, polarized: bool) -> Result<BuiltinFunctional, i32> {
        let model = Model::from_id(library_id).ok_or(STATUS_UNKNOWN_ID)?;

        Ok(BuiltinFunctional {
            model,
            polarized,
            dens_threshold: self.dens_threshold,
        })
    }

    fn end(&self, _functional: &mut BuiltinFunctional) {}

    fn flags(&self, functional: &BuiltinFunctional) -> u32 {
        functional.model.flags()
    }

    fn lda(&self, functional: &BuiltinFunctional, np: usize, rho: &[f64], mut out: LdaOut<'_>) -> KernelResult {
        if functional.model.is_gga() {
            return Err(STATUS_WRONG_FAMILY);
        }
        functional.check_orders(requested_lda(&out))?;

        let ns = if functional.polarized { 2 } else { 1 };
        let (n1, n2, n3) = if functional.polarized { (2, 3, 4) } else { (1, 1, 1) };

        if rho.len() != ns * np {
            return Err(STATUS_BAD_LENGTH);
        }
        check_len(&out.zk, np)?;
        check_len(&out.vrho, n1 * np)?;
        check_len(&out.v2rho2, n2 * np)?;
        check_len(&out.v3rho3, n3 * np)?;

        for ip in 0..np {
            let p = functional.lda_point(&rho[ip * ns..(ip + 1) * ns]);

            store(&mut out.zk, ip, &[p.zk]);
            store(&mut out.vrho, ip, &p.vrho[..n1]);
            store(&mut out.v2rho2, ip, &p.v2rho2[..n2]);
            store(&mut out.v3rho3, ip, &p.v3rho3[..n3]);
        }

        Ok(())
    }

    fn gga(
        &self,
        functional: &BuiltinFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        mut out: GgaOut<'_>,
    ) -> KernelResult {
        if !functional.model.is_gga() {
            return Err(STATUS_WRONG_FAMILY);
        }
        functional.check_orders(requested_gga(&out))?;

        let (ns, nsg) = if functional.polarized { (2, 3) } else { (1, 1) };

        if rho.len() != ns * np || sigma.len() != nsg * np {
            return Err(STATUS_BAD_LENGTH);
        }
        check_len(&out.zk, np)?;
        check_len(&out.vrho, ns * np)?;
        check_len(&out.vsigma, nsg * np)?;

        for ip in 0..np {
            let p = functional.gga_point(&rho[ip * ns..(ip + 1) * ns], &sigma[ip * nsg..(ip + 1) * nsg]);

            store(&mut out.zk, ip, &[p.zk]);
            store(&mut out.vrho, ip, &p.vrho[..ns]);
            store(&mut out.vsigma, ip, &p.vsigma[..nsg]);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1.0E-5;

    #[test]
    fn test_unknown_id() {
        assert_eq!(BuiltinKernel::new().init(131, false), Err(STATUS_UNKNOWN_ID));
    }

    #[test]
    fn test_lda_x_unpolarized() {
        let k = BuiltinKernel::new();
        let f = k.init(LDA_X, false).unwrap();
        let mut zk = [0.0; 3];

        k.lda_exc(&f, 3, &[1.0, 2.0, 3.0], &mut zk).unwrap();

        let expected = [-0.738559, -0.930526, -1.06519];
        for (a, b) in zk.iter().zip(expected.iter()) {
            assert!((a - b).abs() < TOL);
        }
    }

    #[test]
    fn test_lda_x_polarized() {
        let k = BuiltinKernel::new();
        let f = k.init(LDA_X, true).unwrap();
        let mut zk = [0.0; 3];
        let mut v2 = [1.0; 9];

        k.lda_exc(&f, 3, &[1.0, 3.0, 2.0, 2.0, 3.0, 1.0], &mut zk).unwrap();
        k.lda_fxc(&f, 3, &[1.0, 3.0, 2.0, 2.0, 3.0, 1.0], &mut v2).unwrap();

        let expected = [-1.23917, -1.17239, -1.23917];
        for (a, b) in zk.iter().zip(expected.iter()) {
            assert!((a - b).abs() < TOL);
        }
        // exchange does not couple the spin channels
        assert_eq!(v2[1], 0.0);
        assert!(v2[0] < 0.0 && v2[2] < 0.0);
    }

    #[test]
    fn test_below_threshold_is_zero() {
        let k = BuiltinKernel::with_dens_threshold(1.0E-10);
        let f = k.init(LDA_C_PZ, false).unwrap();
        let mut zk = [1.0; 2];
        let mut vrho = [1.0; 2];

        k.lda_exc_vxc(&f, 2, &[1.0E-12, 0.5], &mut zk, &mut vrho).unwrap();

        assert_eq!(zk[0], 0.0);
        assert_eq!(vrho[0], 0.0);
        assert!(zk[1] < 0.0);
    }

    #[test]
    fn test_missing_derivative_status() {
        let k = BuiltinKernel::new();
        let f = k.init(LDA_C_PZ, false).unwrap();
        let mut v3 = [0.0; 1];

        assert_eq!(k.lda_kxc(&f, 1, &[1.0], &mut v3), Err(STATUS_NO_DERIVATIVE));
    }

    #[test]
    fn test_family_status() {
        let k = BuiltinKernel::new();
        let f = k.init(GGA_X_PBE, false).unwrap();
        let mut zk = [0.0; 1];

        assert_eq!(k.lda_exc(&f, 1, &[1.0], &mut zk), Err(STATUS_WRONG_FAMILY));
    }

    #[test]
    fn test_length_status() {
        let k = BuiltinKernel::new();
        let f = k.init(LDA_X, true).unwrap();
        let mut zk = [0.0; 2];

        assert_eq!(k.lda_exc(&f, 2, &[1.0, 1.0, 1.0], &mut zk), Err(STATUS_BAD_LENGTH));
    }
}
