//! Binds caller buffers, or fresh ones, to a shape contract.
//!
//! Everything that can be wrong with a buffer is caught here, before the
//! kernel sees a pointer: tag, shape, layout. Caller outputs already in
//! kernel form are written in place. Caller outputs in other units are
//! computed into a native buffer and converted back in [`BoundBuffers::finish`].

use ndarray::{ArrayD, CowArray, IxDyn, ShapeBuilder};
use tracing::debug;
use xcunits::adapter::check_tag;
use xcunits::{denormalize_into, is_kernel_layout, normalize, Element, PhysicalQuantity, Quantity};

use crate::error::{Result, XcError};
use crate::outputs::Produced;
use crate::shape::{DerivativeOrders, ShapeContract};

use PhysicalQuantity::{Density, DensityGradient};

/// Density and, for GGA functionals, its contracted gradient σ = |∇ρ|².
pub struct Inputs<'a, T> {
    rho: &'a Quantity<T>,
    sigma: Option<&'a Quantity<T>>,
}

impl<'a, T> Clone for Inputs<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Inputs<'a, T> {}

impl<'a, T> Inputs<'a, T> {
    pub fn new(rho: &'a Quantity<T>, sigma: Option<&'a Quantity<T>>) -> Self {
        Inputs { rho, sigma }
    }

    pub fn lda(rho: &'a Quantity<T>) -> Self {
        Inputs { rho, sigma: None }
    }

    pub fn gga(rho: &'a Quantity<T>, sigma: &'a Quantity<T>) -> Self {
        Inputs {
            rho,
            sigma: Some(sigma),
        }
    }

    pub fn rho(&self) -> &'a Quantity<T> {
        self.rho
    }

    pub fn sigma(&self) -> Option<&'a Quantity<T>> {
        self.sigma
    }
}

pub enum Slot<'a> {
    /// Caller buffer in kernel form, written directly.
    Supplied(&'a mut Quantity<f64>),
    /// Caller buffer in other units, filled from `native` after the call.
    Converted {
        target: &'a mut Quantity<f64>,
        native: ArrayD<f64>,
    },
    /// Fresh buffer handed back to the caller.
    Owned(ArrayD<f64>),
    /// Written by the entry point, never seen by the caller.
    Scratch(ArrayD<f64>),
}

impl<'a> Slot<'a> {
    fn as_mut_slice(&mut self) -> Option<&mut [f64]> {
        match self {
            Slot::Supplied(q) => q.data_mut().as_slice_memory_order_mut(),
            Slot::Converted { native, .. } | Slot::Owned(native) | Slot::Scratch(native) => {
                native.as_slice_memory_order_mut()
            }
        }
    }

    pub fn is_caller_buffer(&self) -> bool {
        matches!(self, Slot::Supplied(_) | Slot::Converted { .. })
    }

    pub fn is_scratch(&self) -> bool {
        matches!(self, Slot::Scratch(_))
    }
}

pub struct BoundBuffers<'a> {
    contract: ShapeContract,
    rho: CowArray<'a, f64, IxDyn>,
    sigma: Option<CowArray<'a, f64, IxDyn>>,
    slots: Vec<(PhysicalQuantity, Slot<'a>)>,
}

/// Output slices in contract order.
pub type OutputSlices<'b> = Vec<(PhysicalQuantity, &'b mut [f64])>;

impl<'a> BoundBuffers<'a> {
    pub fn contract(&self) -> &ShapeContract {
        &self.contract
    }

    pub fn slot(&self, role: PhysicalQuantity) -> Option<&Slot<'a>> {
        self.slots.iter().find(|(r, _)| *r == role).map(|(_, s)| s)
    }

    /// True when an input was aliased from the caller without a copy.
    pub fn input_is_alias(&self, role: PhysicalQuantity) -> bool {
        match role {
            Density => self.rho.is_view(),
            DensityGradient => self.sigma.as_ref().map_or(false, |s| s.is_view()),
            _ => false,
        }
    }

    /// Flat kernel views of every bound buffer.
    pub fn split(&mut self) -> Result<(&[f64], Option<&[f64]>, OutputSlices<'_>)> {
        let rho = self
            .rho
            .as_slice_memory_order()
            .ok_or(XcError::NotContiguous(Density))?;

        let sigma = match &self.sigma {
            Some(s) => Some(
                s.as_slice_memory_order()
                    .ok_or(XcError::NotContiguous(DensityGradient))?,
            ),
            None => None,
        };

        let mut outputs = Vec::with_capacity(self.slots.len());
        for (role, slot) in self.slots.iter_mut() {
            let role = *role;
            let data = slot.as_mut_slice().ok_or(XcError::NotContiguous(role))?;
            outputs.push((role, data));
        }

        Ok((rho, sigma, outputs))
    }

    /// Writes converted caller outputs back and returns the fresh ones.
    pub fn finish(self) -> Result<Produced> {
        let mut produced = Produced::default();

        for (role, slot) in self.slots {
            match slot {
                Slot::Supplied(_) | Slot::Scratch(_) => {}
                Slot::Converted { target, native } => denormalize_into(&native, target)?,
                Slot::Owned(native) => produced.push(role, native),
            }
        }

        Ok(produced)
    }
}

fn check_shape(role: PhysicalQuantity, required: &[usize], actual: &[usize]) -> Result<()> {
    if required == actual {
        Ok(())
    } else {
        Err(XcError::DimensionError {
            role,
            expected: required.to_vec(),
            actual: actual.to_vec(),
        })
    }
}

fn bind_input<'a, T: Element>(
    contract: &ShapeContract,
    role: PhysicalQuantity,
    buffer: Option<&'a Quantity<T>>,
) -> Result<Option<CowArray<'a, f64, IxDyn>>> {
    match (contract.required(role), buffer) {
        (Some(required), Some(q)) => {
            check_tag(q.quantity(), role)?;
            check_shape(role, required, q.shape())?;
            let (native, _) = normalize(q, role)?;
            Ok(Some(native))
        }
        (Some(_), None) => Err(XcError::Unbound(role)),
        (None, Some(_)) => Err(XcError::UnexpectedBuffer(role)),
        (None, None) => Ok(None),
    }
}

/// Validates `supplied` and allocates every other output `contract` lists.
///
/// Unsupplied outputs of an order in `wanted` are returned to the caller,
/// the rest are scratch.
pub fn bind<'a, T: Element>(
    contract: ShapeContract,
    inputs: Inputs<'a, T>,
    supplied: Vec<(PhysicalQuantity, &'a mut Quantity<f64>)>,
    wanted: DerivativeOrders,
) -> Result<BoundBuffers<'a>> {
    let rho = bind_input(&contract, Density, Some(inputs.rho))?.ok_or(XcError::Unbound(Density))?;
    let sigma = bind_input(&contract, DensityGradient, inputs.sigma)?;

    let mut by_role: Vec<Option<&'a mut Quantity<f64>>> =
        (0..PhysicalQuantity::COUNT).map(|_| None).collect();

    for (role, q) in supplied {
        check_tag(q.quantity(), role)?;

        let required = match contract.required(role) {
            Some(r) if !role.is_input() => r,
            _ => return Err(XcError::UnexpectedBuffer(role)),
        };
        check_shape(role, required, q.shape())?;

        if !is_kernel_layout(q.data()) {
            return Err(XcError::NotContiguous(role));
        }

        let entry = &mut by_role[role.index()];
        if entry.is_some() {
            return Err(XcError::UnexpectedBuffer(role));
        }
        *entry = Some(q);
    }

    let mut slots = Vec::new();

    for (role, shape) in contract.entries().iter().filter(|(r, _)| !r.is_input()) {
        let slot = match by_role[role.index()].take() {
            Some(q) if q.units().is_atomic() => Slot::Supplied(q),
            Some(q) => {
                debug!("{} is computed natively and converted to ({})", role, q.units());
                Slot::Converted {
                    native: ArrayD::zeros(IxDyn(shape).f()),
                    target: q,
                }
            }
            None => {
                let native = ArrayD::zeros(IxDyn(shape).f());
                match role.order() {
                    Some(k) if wanted.contains(k) => Slot::Owned(native),
                    _ => Slot::Scratch(native),
                }
            }
        };
        slots.push((*role, slot));
    }

    Ok(BoundBuffers {
        contract,
        rho,
        sigma,
        slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use xcinfo::Family;
    use xcunits::{EnergyUnit, LengthUnit, UnitSystem};

    use xcunits::PhysicalQuantity::*;

    fn density(shape: &[usize]) -> Quantity<f64> {
        let n = shape.iter().product();
        Quantity::from_shape_vec(Density, shape, vec![1.0; n]).unwrap()
    }

    fn contract(family: Family, polarized: bool, order: usize, base: &[usize]) -> ShapeContract {
        ShapeContract::resolve(family, polarized, order, base).unwrap()
    }

    #[test]
    fn test_fresh_outputs_are_owned() {
        let rho = density(&[2, 4]);
        let c = contract(Family::Lda, true, 1, &[2, 4]);

        let mut bound = bind(c, Inputs::lda(&rho), vec![], DerivativeOrders::single(1).unwrap()).unwrap();

        assert!(bound.input_is_alias(Density));
        assert!(matches!(bound.slot(DEDRho), Some(Slot::Owned(_))));

        let (r, s, out) = bound.split().unwrap();
        assert_eq!(r.len(), 8);
        assert!(s.is_none());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1.len(), 8);
    }

    #[test]
    fn test_supplied_output_is_aliased() {
        let rho = density(&[5]);
        let mut zk = Quantity::zeros(EnergyDensity, &[5]);
        let ptr = zk.data().as_ptr();
        let c = contract(Family::Lda, false, 0, &[5]);

        let mut bound = bind(c, Inputs::lda(&rho), vec![(EnergyDensity, &mut zk)], DerivativeOrders::NONE).unwrap();

        let (_, _, out) = bound.split().unwrap();
        assert_eq!(out[0].1.as_ptr(), ptr);
    }

    #[test]
    fn test_wrong_tail_reports_shapes() {
        let rho = density(&[2, 4]);
        let mut vrho = Quantity::zeros(DEDRho, &[2, 5]);
        let c = contract(Family::Lda, true, 1, &[2, 4]);

        let err = bind(c, Inputs::lda(&rho), vec![(DEDRho, &mut vrho)], DerivativeOrders::NONE)
            .err()
            .unwrap();

        match err {
            XcError::DimensionError { role, expected, actual } => {
                assert_eq!(role, DEDRho);
                assert_eq!(expected, vec![2, 4]);
                assert_eq!(actual, vec![2, 5]);
            }
            e => panic!("unexpected {:?}", e),
        }
    }

    #[test]
    fn test_wrong_tag() {
        let rho = density(&[3]);
        let mut wrong = Quantity::zeros(D2EDRho2, &[3]);
        let c = contract(Family::Lda, false, 1, &[3]);

        let err = bind(c, Inputs::lda(&rho), vec![(DEDRho, &mut wrong)], DerivativeOrders::NONE)
            .err()
            .unwrap();

        assert!(matches!(
            err,
            XcError::UnitMismatch {
                expected: DEDRho,
                found: D2EDRho2
            }
        ));
    }

    #[test]
    fn test_row_major_output_is_rejected() {
        let rho = density(&[2, 3]);
        let mut vrho = Quantity::new(DEDRho, Array2::<f64>::zeros((2, 3)).into_dyn());
        let c = contract(Family::Lda, true, 1, &[2, 3]);

        let err = bind(c, Inputs::lda(&rho), vec![(DEDRho, &mut vrho)], DerivativeOrders::NONE)
            .err()
            .unwrap();

        assert!(matches!(err, XcError::NotContiguous(DEDRho)));
    }

    #[test]
    fn test_unwanted_lower_orders_are_scratch() {
        let rho = density(&[3]);
        let mut v2 = Quantity::zeros(D2EDRho2, &[3]);
        let orders = DerivativeOrders::up_to(2).unwrap();
        let c = ShapeContract::for_orders(Family::Lda, false, orders, &[3]);

        let bound = bind(c, Inputs::lda(&rho), vec![(D2EDRho2, &mut v2)], DerivativeOrders::NONE).unwrap();

        assert!(bound.slot(EnergyDensity).unwrap().is_scratch());
        assert!(bound.slot(DEDRho).unwrap().is_scratch());
        assert!(bound.slot(D2EDRho2).unwrap().is_caller_buffer());
        assert!(bound.slot(D3EDRho3).is_none());
    }

    #[test]
    fn test_converted_output_is_written_back() {
        let rho = density(&[2]);
        let ev = UnitSystem::new(EnergyUnit::ElectronVolt, LengthUnit::Bohr);
        let mut zk = Quantity::with_units(EnergyDensity, ev, ArrayD::zeros(IxDyn(&[2])));
        let c = contract(Family::Lda, false, 0, &[2]);

        let mut bound = bind(c, Inputs::lda(&rho), vec![(EnergyDensity, &mut zk)], DerivativeOrders::NONE).unwrap();
        {
            let (_, _, mut out) = bound.split().unwrap();
            out[0].1.copy_from_slice(&[-1.0, -2.0]);
        }
        let produced = bound.finish().unwrap();

        assert!(produced.is_empty());
        let f = xcunits::consts::HA_TO_EV;
        assert!((zk.data()[[0]] + f).abs() < 1.0E-9);
        assert!((zk.data()[[1]] + 2.0 * f).abs() < 1.0E-9);
    }

    #[test]
    fn test_gradient_for_lda_is_unexpected() {
        let rho = density(&[3]);
        let sigma = Quantity::from_shape_vec(DensityGradient, &[3], vec![0.0; 3]).unwrap();
        let c = contract(Family::Lda, false, 0, &[3]);

        let err = bind(c, Inputs::gga(&rho, &sigma), vec![], DerivativeOrders::NONE)
            .err()
            .unwrap();

        assert!(matches!(err, XcError::UnexpectedBuffer(DensityGradient)));
    }
}
