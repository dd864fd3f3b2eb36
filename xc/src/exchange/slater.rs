//! Slater exchange of the uniform electron gas, with energy derivatives up
//! to third order.

use std::f64::consts::PI;

const T13: f64 = 1.0 / 3.0;

/// cx = -(3/π)^(1/3)
#[inline]
pub fn cx() -> f64 {
    -(3.0 / PI).powf(T13)
}

/// Energy per particle and derivatives of E = ρ ϵ for one density value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlaterPoint {
    /// ϵx
    pub ex: f64,
    /// dE/dρ
    pub vx: f64,
    /// d²E/dρ²
    pub fx: f64,
    /// d³E/dρ³
    pub kx: f64,
}

/// Unpolarized exchange at density `rho`.
///
/// vx = cx ρ^(1/3), ϵx = 3/4 vx
#[inline]
pub fn slater_unpolarized(rho: f64) -> SlaterPoint {
    let vx = cx() * rho.powf(T13);

    SlaterPoint {
        ex: 0.75 * vx,
        vx,
        fx: vx / (3.0 * rho),
        kx: -2.0 * vx / (9.0 * rho * rho),
    }
}

/// One spin channel of the polarized exchange.
///
/// Exchange separates by spin, Ex[ρ↑, ρ↓] = (Ex[2ρ↑] + Ex[2ρ↓]) / 2, so each
/// channel is the unpolarized gas at twice its density. `ex` is the channel's
/// energy per particle of that channel; the cross derivatives vanish.
#[inline]
pub fn slater_channel(rho_s: f64) -> SlaterPoint {
    let vx = cx() * (2.0 * rho_s).powf(T13);

    SlaterPoint {
        ex: 0.75 * vx,
        vx,
        fx: vx / (3.0 * rho_s),
        kx: -2.0 * vx / (9.0 * rho_s * rho_s),
    }
}
