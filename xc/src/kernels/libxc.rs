//! The native libxc function table.

use std::os::raw::c_int;
use std::ptr;

use libxc_sys::*;

use crate::kernel::{Backend, GgaOut, Kernel, KernelResult, LdaOut};
use crate::kernels::builtin::STATUS_BAD_LENGTH;
use crate::kernels::libxc_gga_kxc_fits;

/// Owning pointer to one initialized `xc_func_type`. Neither `Send` nor
/// `Sync`: libxc makes no promise about concurrent use of one object.
#[derive(Debug)]
pub struct LibxcFunctional {
    ptr: *mut xc_func_type,
    polarized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibxcKernel {
    dens_threshold: Option<f64>,
}

impl Default for LibxcKernel {
    fn default() -> Self {
        LibxcKernel {
            dens_threshold: None,
        }
    }
}

impl LibxcKernel {
    /// Keeps each functional's own libxc density threshold.
    pub fn new() -> LibxcKernel {
        LibxcKernel::default()
    }
}

impl Backend for LibxcKernel {
    const NAME: &'static str = "libxc";

    fn with_dens_threshold(dens_threshold: f64) -> Self {
        LibxcKernel {
            dens_threshold: Some(dens_threshold),
        }
    }
}

fn out_ptr(buf: Option<&mut [f64]>) -> *mut f64 {
    buf.map_or(ptr::null_mut(), |b| b.as_mut_ptr())
}

fn len_of(buf: &Option<&mut [f64]>) -> usize {
    buf.as_ref().map_or(0, |b| b.len())
}

// libxc writes its own third-order layout, which may differ from the
// shape table; anything else would overrun or leave stale values.
fn check_gga_kxc(functional: &LibxcFunctional, np: usize, lens: [usize; 4]) -> KernelResult {
    if libxc_gga_kxc_fits(functional.polarized, np, lens) {
        Ok(())
    } else {
        Err(STATUS_BAD_LENGTH)
    }
}

impl Kernel for LibxcKernel {
    type Functional = LibxcFunctional;

    fn init(&self, library_id: i32, polarized: bool) -> Result<LibxcFunctional, i32> {
        let nspin = if polarized { XC_POLARIZED } else { XC_UNPOLARIZED };

        unsafe {
            let p = xc_func_alloc();
            if p.is_null() {
                return Err(-1);
            }

            let status = xc_func_init(p, library_id as c_int, nspin);
            if status != 0 {
                xc_func_free(p);
                return Err(status);
            }

            if let Some(t) = self.dens_threshold {
                xc_func_set_dens_threshold(p, t);
            }

            Ok(LibxcFunctional { ptr: p, polarized })
        }
    }

    fn end(&self, functional: &mut LibxcFunctional) {
        if functional.ptr.is_null() {
            return;
        }
        unsafe {
            xc_func_end(functional.ptr);
            xc_func_free(functional.ptr);
        }
        functional.ptr = ptr::null_mut();
    }

    fn flags(&self, functional: &LibxcFunctional) -> u32 {
        unsafe { xc_func_info_get_flags(xc_func_get_info(functional.ptr)) as u32 }
    }

    fn lda(&self, functional: &LibxcFunctional, np: usize, rho: &[f64], out: LdaOut<'_>) -> KernelResult {
        unsafe {
            xc_lda(
                functional.ptr,
                np,
                rho.as_ptr(),
                out_ptr(out.zk),
                out_ptr(out.vrho),
                out_ptr(out.v2rho2),
                out_ptr(out.v3rho3),
                ptr::null_mut(),
            );
        }
        Ok(())
    }

    fn gga(
        &self,
        functional: &LibxcFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        out: GgaOut<'_>,
    ) -> KernelResult {
        if out.v3rho3.is_some() || out.v3rho2sigma.is_some() || out.v3rhosigma2.is_some() || out.v3sigma3.is_some() {
            let lens = [
                len_of(&out.v3rho3),
                len_of(&out.v3rho2sigma),
                len_of(&out.v3rhosigma2),
                len_of(&out.v3sigma3),
            ];
            check_gga_kxc(functional, np, lens)?;
        }

        unsafe {
            xc_gga(
                functional.ptr,
                np,
                rho.as_ptr(),
                sigma.as_ptr(),
                out_ptr(out.zk),
                out_ptr(out.vrho),
                out_ptr(out.vsigma),
                out_ptr(out.v2rho2),
                out_ptr(out.v2rhosigma),
                out_ptr(out.v2sigma2),
                out_ptr(out.v3rho3),
                out_ptr(out.v3rho2sigma),
                out_ptr(out.v3rhosigma2),
                out_ptr(out.v3sigma3),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            );
        }
        Ok(())
    }

    fn lda_exc(&self, functional: &LibxcFunctional, np: usize, rho: &[f64], zk: &mut [f64]) -> KernelResult {
        unsafe { xc_lda_exc(functional.ptr, np, rho.as_ptr(), zk.as_mut_ptr()) };
        Ok(())
    }

    fn lda_exc_vxc(
        &self,
        functional: &LibxcFunctional,
        np: usize,
        rho: &[f64],
        zk: &mut [f64],
        vrho: &mut [f64],
    ) -> KernelResult {
        unsafe { xc_lda_exc_vxc(functional.ptr, np, rho.as_ptr(), zk.as_mut_ptr(), vrho.as_mut_ptr()) };
        Ok(())
    }

    fn lda_vxc(&self, functional: &LibxcFunctional, np: usize, rho: &[f64], vrho: &mut [f64]) -> KernelResult {
        unsafe { xc_lda_vxc(functional.ptr, np, rho.as_ptr(), vrho.as_mut_ptr()) };
        Ok(())
    }

    fn lda_fxc(&self, functional: &LibxcFunctional, np: usize, rho: &[f64], v2rho2: &mut [f64]) -> KernelResult {
        unsafe { xc_lda_fxc(functional.ptr, np, rho.as_ptr(), v2rho2.as_mut_ptr()) };
        Ok(())
    }

    fn lda_kxc(&self, functional: &LibxcFunctional, np: usize, rho: &[f64], v3rho3: &mut [f64]) -> KernelResult {
        unsafe { xc_lda_kxc(functional.ptr, np, rho.as_ptr(), v3rho3.as_mut_ptr()) };
        Ok(())
    }

    fn gga_exc(
        &self,
        functional: &LibxcFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        zk: &mut [f64],
    ) -> KernelResult {
        unsafe { xc_gga_exc(functional.ptr, np, rho.as_ptr(), sigma.as_ptr(), zk.as_mut_ptr()) };
        Ok(())
    }

    fn gga_exc_vxc(
        &self,
        functional: &LibxcFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        zk: &mut [f64],
        vrho: &mut [f64],
        vsigma: &mut [f64],
    ) -> KernelResult {
        unsafe {
            xc_gga_exc_vxc(
                functional.ptr,
                np,
                rho.as_ptr(),
                sigma.as_ptr(),
                zk.as_mut_ptr(),
                vrho.as_mut_ptr(),
                vsigma.as_mut_ptr(),
            )
        };
        Ok(())
    }

    fn gga_vxc(
        &self,
        functional: &LibxcFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        vrho: &mut [f64],
        vsigma: &mut [f64],
    ) -> KernelResult {
        unsafe {
            xc_gga_vxc(
                functional.ptr,
                np,
                rho.as_ptr(),
                sigma.as_ptr(),
                vrho.as_mut_ptr(),
                vsigma.as_mut_ptr(),
            )
        };
        Ok(())
    }

    fn gga_fxc(
        &self,
        functional: &LibxcFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        v2rho2: &mut [f64],
        v2rhosigma: &mut [f64],
        v2sigma2: &mut [f64],
    ) -> KernelResult {
        unsafe {
            xc_gga_fxc(
                functional.ptr,
                np,
                rho.as_ptr(),
                sigma.as_ptr(),
                v2rho2.as_mut_ptr(),
                v2rhosigma.as_mut_ptr(),
                v2sigma2.as_mut_ptr(),
            )
        };
        Ok(())
    }

    fn gga_kxc(
        &self,
        functional: &LibxcFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        v3rho3: &mut [f64],
        v3rho2sigma: &mut [f64],
        v3rhosigma2: &mut [f64],
        v3sigma3: &mut [f64],
    ) -> KernelResult {
        let lens = [v3rho3.len(), v3rho2sigma.len(), v3rhosigma2.len(), v3sigma3.len()];
        check_gga_kxc(functional, np, lens)?;

        unsafe {
            xc_gga_kxc(
                functional.ptr,
                np,
                rho.as_ptr(),
                sigma.as_ptr(),
                v3rho3.as_mut_ptr(),
                v3rho2sigma.as_mut_ptr(),
                v3rhosigma2.as_mut_ptr(),
                v3sigma3.as_mut_ptr(),
            )
        };
        Ok(())
    }
}
