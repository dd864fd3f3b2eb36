pub mod builtin;

#[cfg(feature = "libxc")]
pub mod libxc;

// the `libxc` feature swaps the default table for the native one

cfg_if::cfg_if! {
    if #[cfg(feature = "libxc")] {
        pub type DefaultKernel = libxc::LibxcKernel;
    } else {
        pub type DefaultKernel = builtin::BuiltinKernel;
    }
}

/// Per-point components libxc 5 writes for `v3rho3`, `v3rho2sigma`,
/// `v3rhosigma2` and `v3sigma3` of a polarized GGA.
///
/// The shape table uses 10 for `v3rhosigma2` and 12 for `v3sigma3`.
pub const LIBXC_POLARIZED_GGA_KXC_DIMS: [usize; 4] = [4, 9, 12, 10];

/// True when every third-order GGA buffer holds exactly what libxc will
/// write for `np` points.
pub fn libxc_gga_kxc_fits(polarized: bool, np: usize, lens: [usize; 4]) -> bool {
    lens.iter()
        .zip(LIBXC_POLARIZED_GGA_KXC_DIMS.iter())
        .all(|(&len, &dim)| len == if polarized { dim * np } else { np })
}
