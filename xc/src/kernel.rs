//! The native kernel seam.
//!
//! A kernel is a table of functionals indexed by library id. Buffers cross
//! it as flat `f64` slices in libxc argument order, spin components fastest.
//! Nothing here checks lengths; the binder guarantees them.

/// `Err` carries the kernel's status code.
pub type KernelResult = std::result::Result<(), i32>;

/// Output slots of the combined LDA entry point. `None` is not computed.
#[derive(Debug, Default)]
pub struct LdaOut<'a> {
    pub zk: Option<&'a mut [f64]>,
    pub vrho: Option<&'a mut [f64]>,
    pub v2rho2: Option<&'a mut [f64]>,
    pub v3rho3: Option<&'a mut [f64]>,
}

/// Output slots of the combined GGA entry point. `None` is not computed.
#[derive(Debug, Default)]
pub struct GgaOut<'a> {
    pub zk: Option<&'a mut [f64]>,
    pub vrho: Option<&'a mut [f64]>,
    pub vsigma: Option<&'a mut [f64]>,
    pub v2rho2: Option<&'a mut [f64]>,
    pub v2rhosigma: Option<&'a mut [f64]>,
    pub v2sigma2: Option<&'a mut [f64]>,
    pub v3rho3: Option<&'a mut [f64]>,
    pub v3rho2sigma: Option<&'a mut [f64]>,
    pub v3rhosigma2: Option<&'a mut [f64]>,
    pub v3sigma3: Option<&'a mut [f64]>,
}

pub trait Kernel {
    /// Opaque per-functional native object.
    type Functional;

    fn init(&self, library_id: i32, polarized: bool) -> Result<Self::Functional, i32>;

    /// Releases the native object. Called exactly once per successful `init`.
    fn end(&self, functional: &mut Self::Functional);

    /// `XC_FLAGS_HAVE_*` bits of the live object.
    fn flags(&self, functional: &Self::Functional) -> u32;

    fn lda(&self, functional: &Self::Functional, np: usize, rho: &[f64], out: LdaOut<'_>) -> KernelResult;

    fn gga(
        &self,
        functional: &Self::Functional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        out: GgaOut<'_>,
    ) -> KernelResult;

    fn lda_exc(&self, functional: &Self::Functional, np: usize, rho: &[f64], zk: &mut [f64]) -> KernelResult {
        let out = LdaOut {
            zk: Some(zk),
            ..LdaOut::default()
        };
        self.lda(functional, np, rho, out)
    }

    fn lda_exc_vxc(
        &self,
        functional: &Self::Functional,
        np: usize,
        rho: &[f64],
        zk: &mut [f64],
        vrho: &mut [f64],
    ) -> KernelResult {
        let out = LdaOut {
            zk: Some(zk),
            vrho: Some(vrho),
            ..LdaOut::default()
        };
        self.lda(functional, np, rho, out)
    }

    fn lda_vxc(&self, functional: &Self::Functional, np: usize, rho: &[f64], vrho: &mut [f64]) -> KernelResult {
        let out = LdaOut {
            vrho: Some(vrho),
            ..LdaOut::default()
        };
        self.lda(functional, np, rho, out)
    }

    fn lda_fxc(&self, functional: &Self::Functional, np: usize, rho: &[f64], v2rho2: &mut [f64]) -> KernelResult {
        let out = LdaOut {
            v2rho2: Some(v2rho2),
            ..LdaOut::default()
        };
        self.lda(functional, np, rho, out)
    }

    fn lda_kxc(&self, functional: &Self::Functional, np: usize, rho: &[f64], v3rho3: &mut [f64]) -> KernelResult {
        let out = LdaOut {
            v3rho3: Some(v3rho3),
            ..LdaOut::default()
        };
        self.lda(functional, np, rho, out)
    }

    fn gga_exc(
        &self,
        functional: &Self::Functional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        zk: &mut [f64],
    ) -> KernelResult {
        let out = GgaOut {
            zk: Some(zk),
            ..GgaOut::default()
        };
        self.gga(functional, np, rho, sigma, out)
    }

    #[allow(clippy::too_many_arguments)]
    fn gga_exc_vxc(
        &self,
        functional: &Self::Functional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        zk: &mut [f64],
        vrho: &mut [f64],
        vsigma: &mut [f64],
    ) -> KernelResult {
        let out = GgaOut {
            zk: Some(zk),
            vrho: Some(vrho),
            vsigma: Some(vsigma),
            ..GgaOut::default()
        };
        self.gga(functional, np, rho, sigma, out)
    }

    fn gga_vxc(
        &self,
        functional: &Self::Functional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        vrho: &mut [f64],
        vsigma: &mut [f64],
    ) -> KernelResult {
        let out = GgaOut {
            vrho: Some(vrho),
            vsigma: Some(vsigma),
            ..GgaOut::default()
        };
        self.gga(functional, np, rho, sigma, out)
    }

    #[allow(clippy::too_many_arguments)]
    fn gga_fxc(
        &self,
        functional: &Self::Functional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        v2rho2: &mut [f64],
        v2rhosigma: &mut [f64],
        v2sigma2: &mut [f64],
    ) -> KernelResult {
        let out = GgaOut {
            v2rho2: Some(v2rho2),
            v2rhosigma: Some(v2rhosigma),
            v2sigma2: Some(v2sigma2),
            ..GgaOut::default()
        };
        self.gga(functional, np, rho, sigma, out)
    }

    #[allow(clippy::too_many_arguments)]
    fn gga_kxc(
        &self,
        functional: &Self::Functional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        v3rho3: &mut [f64],
        v3rho2sigma: &mut [f64],
        v3rhosigma2: &mut [f64],
        v3sigma3: &mut [f64],
    ) -> KernelResult {
        let out = GgaOut {
            v3rho3: Some(v3rho3),
            v3rho2sigma: Some(v3rho2sigma),
            v3rhosigma2: Some(v3rhosigma2),
            v3sigma3: Some(v3sigma3),
            ..GgaOut::default()
        };
        self.gga(functional, np, rho, sigma, out)
    }
}

/// A kernel that can be selected by name from the control file.
pub trait Backend: Kernel + Sized {
    const NAME: &'static str;

    fn with_dens_threshold(dens_threshold: f64) -> Self;
}
