//! PBE exchange enhancement over Slater exchange.
//!
//! Works on the contracted gradient σ = |∇ρ|², as libxc does.

use std::f64::consts::PI;

const KAPPA: f64 = 0.804;
const MU: f64 = 0.219_514_972_764_517_1;

/// Volumetric energy e = ρ ϵx and its first derivatives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PbeXPoint {
    pub e: f64,
    pub dedrho: f64,
    pub dedsigma: f64,
}

/// Unpolarized PBE exchange at `(rho, sigma)`.
#[inline]
pub fn pbe_x_unpolarized(rho: f64, sigma: f64) -> PbeXPoint {
    let sigma = sigma.max(0.0);

    let c = -0.75 * (3.0 / PI).powf(1.0 / 3.0);
    let k = 4.0 * (3.0 * PI * PI).powf(2.0 / 3.0);

    let e0 = c * rho.powf(4.0 / 3.0);
    let rho83 = rho.powf(8.0 / 3.0);
    let s2 = sigma / (k * rho83);

    let denom = 1.0 + MU * s2 / KAPPA;
    let fx = 1.0 + KAPPA - KAPPA / denom;
    let dfx = MU / (denom * denom);

    PbeXPoint {
        e: e0 * fx,
        dedrho: 4.0 / 3.0 * e0 / rho * fx - e0 * dfx * 8.0 / 3.0 * s2 / rho,
        dedsigma: e0 * dfx / (k * rho83),
    }
}

/// One spin channel: Ex[ρ↑, ρ↓, σ↑↑, σ↓↓] = (Ex[2ρ↑, 4σ↑↑] + Ex[2ρ↓, 4σ↓↓]) / 2.
///
/// Returns the channel's share of e, dE/dρσ and dE/dσσσ.
#[inline]
pub fn pbe_x_channel(rho_s: f64, sigma_ss: f64) -> PbeXPoint {
    let p = pbe_x_unpolarized(2.0 * rho_s, 4.0 * sigma_ss);

    PbeXPoint {
        e: 0.5 * p.e,
        dedrho: p.dedrho,
        dedsigma: 2.0 * p.dedsigma,
    }
}
