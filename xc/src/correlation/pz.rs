//! Perdew-Zunger correlation of the uniform electron gas.
//!
//! A Padé form in √rs for rs ≥ 1 and a logarithmic expansion below, with
//! rs = (3/(4πρ))^(1/3). The polarized gas interpolates between the
//! paramagnetic and ferromagnetic fits with the von Barth-Hedin f(ζ).

use std::f64::consts::PI;

const T13: f64 = 1.0 / 3.0;

#[derive(Debug, Clone, Copy)]
pub struct PZParams {
    // rs >= 1
    pub gamma: f64,
    pub beta1: f64,
    pub beta2: f64,
    // rs < 1
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

pub const PZ_PARAMAGNETIC: PZParams = PZParams {
    gamma: -0.1423,
    beta1: 1.0529,
    beta2: 0.3334,
    a: 0.0311,
    b: -0.048,
    c: 0.0020,
    d: -0.0116,
};

pub const PZ_FERROMAGNETIC: PZParams = PZParams {
    gamma: -0.0843,
    beta1: 1.3981,
    beta2: 0.2611,
    a: 0.01555,
    b: -0.0269,
    c: 0.0007,
    d: -0.0048,
};

/// `(vc, ec)` of one parametrization at total density `rho`.
#[inline]
pub fn pz_correlation(rho: f64, p: &PZParams) -> (f64, f64) {
    let rs = (3.0 / (4.0 * PI * rho)).powf(T13);

    if rs >= 1.0 {
        let rroot = rs.sqrt();
        let dt = 1.0 + p.beta1 * rroot + p.beta2 * rs;
        let ec = p.gamma / dt;

        // vc = d(ρ ec)/dρ
        let nt = 1.0 + 7.0 / 6.0 * p.beta1 * rroot + 4.0 / 3.0 * p.beta2 * rs;

        (ec * nt / dt, ec)
    } else {
        let rln = rs.ln();

        let ec = p.a * rln + p.b + p.c * rs * rln + p.d * rs;
        let vc = p.a * rln
            + (p.b - p.a / 3.0)
            + 2.0 / 3.0 * p.c * rs * rln
            + 1.0 / 3.0 * (2.0 * p.d - p.c) * rs;

        (vc, ec)
    }
}

#[inline]
pub fn pz_unpolarized(rho: f64) -> (f64, f64) {
    pz_correlation(rho, &PZ_PARAMAGNETIC)
}

/// `(vc_up, vc_dn, ec)` at total density `rho` and polarization
/// ζ = (ρ↑ - ρ↓)/ρ.
#[inline]
pub fn pz_polarized(rho: f64, zeta: f64) -> (f64, f64, f64) {
    let zeta = zeta.max(-1.0).min(1.0);

    let (vc_u, ec_u) = pz_correlation(rho, &PZ_PARAMAGNETIC);
    let (vc_p, ec_p) = pz_correlation(rho, &PZ_FERROMAGNETIC);

    let denom = 2.0_f64.powf(4.0 / 3.0) - 2.0;

    let f = ((1.0 + zeta).powf(4.0 / 3.0) + (1.0 - zeta).powf(4.0 / 3.0) - 2.0) / denom;
    let df = 4.0 / 3.0 * ((1.0 + zeta).powf(T13) - (1.0 - zeta).powf(T13)) / denom;

    let ec = ec_u + f * (ec_p - ec_u);
    let vc = vc_u + f * (vc_p - vc_u);

    // ∂ζ/∂ρ↑ = (1 - ζ)/ρ, ∂ζ/∂ρ↓ = -(1 + ζ)/ρ
    let vc_up = vc + df * (ec_p - ec_u) * (1.0 - zeta);
    let vc_dn = vc + df * (ec_p - ec_u) * (-1.0 - zeta);

    (vc_up, vc_dn, ec)
}
