#![allow(dead_code)]

use std::cell::Cell;

use xc::kernel::{GgaOut, Kernel, KernelResult, LdaOut};
use xc::kernels::builtin::{BuiltinFunctional, BuiltinKernel};
use xc::xcunits::{PhysicalQuantity, Quantity};

/// Builtin kernel that counts native lifecycle and evaluation calls.
#[derive(Default)]
pub struct CountingKernel {
    inner: BuiltinKernel,
    pub inits: Cell<usize>,
    pub ends: Cell<usize>,
    pub calls: Cell<usize>,
}

impl CountingKernel {
    pub fn new() -> CountingKernel {
        CountingKernel::default()
    }

    pub fn live(&self) -> usize {
        self.inits.get() - self.ends.get()
    }
}

fn bump(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

impl Kernel for CountingKernel {
    type Functional = BuiltinFunctional;

    fn init(&self, library_id: i32, polarized: bool) -> Result<BuiltinFunctional, i32> {
        let f = self.inner.init(library_id, polarized)?;
        bump(&self.inits);
        Ok(f)
    }

    fn end(&self, functional: &mut BuiltinFunctional) {
        bump(&self.ends);
        self.inner.end(functional)
    }

    fn flags(&self, functional: &BuiltinFunctional) -> u32 {
        self.inner.flags(functional)
    }

    fn lda(&self, functional: &BuiltinFunctional, np: usize, rho: &[f64], out: LdaOut<'_>) -> KernelResult {
        bump(&self.calls);
        self.inner.lda(functional, np, rho, out)
    }

    fn gga(
        &self,
        functional: &BuiltinFunctional,
        np: usize,
        rho: &[f64],
        sigma: &[f64],
        out: GgaOut<'_>,
    ) -> KernelResult {
        bump(&self.calls);
        self.inner.gga(functional, np, rho, sigma, out)
    }
}

pub const TOL: f64 = 1.0E-5;

pub fn density(shape: &[usize], values: &[f64]) -> Quantity<f64> {
    Quantity::from_shape_vec(PhysicalQuantity::Density, shape, values.to_vec()).unwrap()
}

pub fn gradient(shape: &[usize], values: &[f64]) -> Quantity<f64> {
    Quantity::from_shape_vec(PhysicalQuantity::DensityGradient, shape, values.to_vec()).unwrap()
}

/// Values in memory order, spin components fastest.
pub fn values(q: &Quantity<f64>) -> Vec<f64> {
    q.as_slice().unwrap().to_vec()
}

pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, b) in actual.iter().zip(expected.iter()) {
        assert!((a - b).abs() < tol, "{} != {}", a, b);
    }
}
