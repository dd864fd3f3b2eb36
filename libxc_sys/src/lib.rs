#![allow(non_camel_case_types)]
use std::os::raw::*;

// libxc 5.x

pub const XC_UNPOLARIZED: c_int = 1;
pub const XC_POLARIZED: c_int = 2;

pub const XC_FAMILY_LDA: c_int = 1;
pub const XC_FAMILY_GGA: c_int = 2;

pub const XC_FLAGS_HAVE_EXC: c_int = 1 << 0;
pub const XC_FLAGS_HAVE_VXC: c_int = 1 << 1;
pub const XC_FLAGS_HAVE_FXC: c_int = 1 << 2;
pub const XC_FLAGS_HAVE_KXC: c_int = 1 << 3;

#[repr(C)]
pub struct xc_func_type {
    _private: [u8; 0],
}

#[repr(C)]
pub struct xc_func_info_type {
    _private: [u8; 0],
}

extern "C" {
    pub fn xc_version_string() -> *const c_char;

    pub fn xc_func_alloc() -> *mut xc_func_type;
    pub fn xc_func_init(p: *mut xc_func_type, functional: c_int, nspin: c_int) -> c_int;
    pub fn xc_func_end(p: *mut xc_func_type);
    pub fn xc_func_free(p: *mut xc_func_type);

    pub fn xc_func_set_dens_threshold(p: *mut xc_func_type, t_dens: c_double);

    pub fn xc_func_get_info(p: *const xc_func_type) -> *const xc_func_info_type;
    pub fn xc_func_info_get_number(info: *const xc_func_info_type) -> c_int;
    pub fn xc_func_info_get_kind(info: *const xc_func_info_type) -> c_int;
    pub fn xc_func_info_get_family(info: *const xc_func_info_type) -> c_int;
    pub fn xc_func_info_get_flags(info: *const xc_func_info_type) -> c_int;

    pub fn xc_lda(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        zk: *mut c_double,
        vrho: *mut c_double,
        v2rho2: *mut c_double,
        v3rho3: *mut c_double,
        v4rho4: *mut c_double,
    );

    pub fn xc_lda_exc(p: *const xc_func_type, np: usize, rho: *const c_double, zk: *mut c_double);

    pub fn xc_lda_exc_vxc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        zk: *mut c_double,
        vrho: *mut c_double,
    );

    pub fn xc_lda_vxc(p: *const xc_func_type, np: usize, rho: *const c_double, vrho: *mut c_double);

    pub fn xc_lda_fxc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        v2rho2: *mut c_double,
    );

    pub fn xc_lda_kxc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        v3rho3: *mut c_double,
    );

    pub fn xc_gga(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        sigma: *const c_double,
        zk: *mut c_double,
        vrho: *mut c_double,
        vsigma: *mut c_double,
        v2rho2: *mut c_double,
        v2rhosigma: *mut c_double,
        v2sigma2: *mut c_double,
        v3rho3: *mut c_double,
        v3rho2sigma: *mut c_double,
        v3rhosigma2: *mut c_double,
        v3sigma3: *mut c_double,
        v4rho4: *mut c_double,
        v4rho3sigma: *mut c_double,
        v4rho2sigma2: *mut c_double,
        v4rhosigma3: *mut c_double,
        v4sigma4: *mut c_double,
    );

    pub fn xc_gga_exc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        sigma: *const c_double,
        zk: *mut c_double,
    );

    pub fn xc_gga_exc_vxc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        sigma: *const c_double,
        zk: *mut c_double,
        vrho: *mut c_double,
        vsigma: *mut c_double,
    );

    pub fn xc_gga_vxc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        sigma: *const c_double,
        vrho: *mut c_double,
        vsigma: *mut c_double,
    );

    pub fn xc_gga_fxc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        sigma: *const c_double,
        v2rho2: *mut c_double,
        v2rhosigma: *mut c_double,
        v2sigma2: *mut c_double,
    );

    pub fn xc_gga_kxc(
        p: *const xc_func_type,
        np: usize,
        rho: *const c_double,
        sigma: *const c_double,
        v3rho3: *mut c_double,
        v3rho2sigma: *mut c_double,
        v3rhosigma2: *mut c_double,
        v3sigma3: *mut c_double,
    );
}
