//! Public operations on a live handle.

use xcunits::{Element, PhysicalQuantity, Quantity};

use crate::binder::{self, Inputs};
use crate::dispatch::{self, EntryPoint};
use crate::error::{Result, XcError};
use crate::handle::FunctionalHandle;
use crate::kernel::Kernel;
use crate::outputs::*;
use crate::shape::{multiplier, DerivativeOrders, ShapeContract};

use PhysicalQuantity::*;

fn order(k: usize) -> DerivativeOrders {
    DerivativeOrders::from_flags(1 << k)
}

impl<'k, K: Kernel> FunctionalHandle<'k, K> {
    /// Shape contract of order `order` for a density of shape `base`.
    pub fn contract(&self, order: usize, base: &[usize]) -> Result<ShapeContract> {
        ShapeContract::resolve(self.family(), self.polarized(), order, base)
    }

    /// ϵ, energy per particle.
    pub fn energy<T: Element>(&self, inputs: Inputs<'_, T>) -> Result<Quantity<f64>> {
        let mut p = self.evaluate(inputs, EntryPoint::Exc, order(0), vec![], true)?;
        p.require(EnergyDensity)
    }

    pub fn energy_into<'a, T: Element>(&self, inputs: Inputs<'a, T>, zk: &'a mut Quantity<f64>) -> Result<()> {
        let supplied = self.supplied(vec![(EnergyDensity, Some(zk))], true)?;
        self.evaluate(inputs, EntryPoint::Exc, order(0), supplied, false)
            .map(|_| ())
    }

    pub fn potential<T: Element>(&self, inputs: Inputs<'_, T>) -> Result<Potential> {
        let mut p = self.evaluate(inputs, EntryPoint::Vxc, order(1), vec![], true)?;
        Potential::take(&mut p, self.family())
    }

    pub fn potential_into<'a, T: Element>(&self, inputs: Inputs<'a, T>, out: PotentialMut<'a>) -> Result<()> {
        let supplied = self.supplied(out.slots(), true)?;
        self.evaluate(inputs, EntryPoint::Vxc, order(1), supplied, false)
            .map(|_| ())
    }

    pub fn energy_and_potential<T: Element>(&self, inputs: Inputs<'_, T>) -> Result<EnergyAndPotential> {
        let orders = order(0).union(order(1));
        let mut p = self.evaluate(inputs, EntryPoint::ExcVxc, orders, vec![], true)?;
        EnergyAndPotential::take(&mut p, self.family())
    }

    pub fn energy_and_potential_into<'a, T: Element>(
        &self,
        inputs: Inputs<'a, T>,
        out: EnergyAndPotentialMut<'a>,
    ) -> Result<()> {
        let orders = order(0).union(order(1));
        let supplied = self.supplied(out.slots(), true)?;
        self.evaluate(inputs, EntryPoint::ExcVxc, orders, supplied, false)
            .map(|_| ())
    }

    pub fn second_derivative<T: Element>(&self, inputs: Inputs<'_, T>) -> Result<SecondDerivative> {
        let mut p = self.evaluate(inputs, EntryPoint::Fxc, order(2), vec![], true)?;
        SecondDerivative::take(&mut p, self.family())
    }

    pub fn second_derivative_into<'a, T: Element>(
        &self,
        inputs: Inputs<'a, T>,
        out: SecondDerivativeMut<'a>,
    ) -> Result<()> {
        let supplied = self.supplied(out.slots(), true)?;
        self.evaluate(inputs, EntryPoint::Fxc, order(2), supplied, false)
            .map(|_| ())
    }

    pub fn third_derivative<T: Element>(&self, inputs: Inputs<'_, T>) -> Result<ThirdDerivative> {
        let mut p = self.evaluate(inputs, EntryPoint::Kxc, order(3), vec![], true)?;
        ThirdDerivative::take(&mut p, self.family())
    }

    pub fn third_derivative_into<'a, T: Element>(
        &self,
        inputs: Inputs<'a, T>,
        out: ThirdDerivativeMut<'a>,
    ) -> Result<()> {
        let supplied = self.supplied(out.slots(), true)?;
        self.evaluate(inputs, EntryPoint::Kxc, order(3), supplied, false)
            .map(|_| ())
    }

    /// Energy and every available derivative in one kernel call.
    pub fn all_outputs<T: Element>(&self, inputs: Inputs<'_, T>) -> Result<AllOutputs> {
        let available = self.available_orders();
        let mut p = self.evaluate(inputs, EntryPoint::Combined, available, vec![], true)?;
        AllOutputs::take(&mut p, self.family())
    }

    /// Fills whichever buffers `out` holds in one kernel call. Lower orders
    /// the combined entry point needs are computed into scratch.
    pub fn all_outputs_into<'a, T: Element>(&self, inputs: Inputs<'a, T>, out: AllOutputsMut<'a>) -> Result<()> {
        let supplied = self.supplied(out.slots(), false)?;

        let requested = supplied
            .iter()
            .filter_map(|(role, _)| role.order())
            .fold(DerivativeOrders::NONE, |acc, k| acc.union(order(k)));

        self.evaluate(inputs, EntryPoint::Combined, requested, supplied, false)
            .map(|_| ())
    }

    fn family_mismatch(&self, role: PhysicalQuantity, detail: &'static str) -> XcError {
        XcError::FamilyMismatch {
            name: self.name().to_string(),
            family: self.family(),
            role,
            detail,
        }
    }

    /// Drops empty slots, rejecting gradient buffers for LDA functionals
    /// and, when `complete`, missing ones for GGA functionals.
    fn supplied<'a>(
        &self,
        slots: SuppliedSlots<'a>,
        complete: bool,
    ) -> Result<Vec<(PhysicalQuantity, &'a mut Quantity<f64>)>> {
        let mut supplied = Vec::with_capacity(slots.len());

        for (role, buffer) in slots {
            let exists = multiplier(self.family(), self.polarized(), role).is_some();

            match (buffer, exists) {
                (Some(b), true) => supplied.push((role, b)),
                (Some(_), false) => return Err(self.family_mismatch(role, "is not accepted")),
                (None, true) if complete => return Err(self.family_mismatch(role, "is required")),
                (None, _) => {}
            }
        }

        Ok(supplied)
    }

    fn check_inputs<T>(&self, inputs: &Inputs<'_, T>) -> Result<()> {
        match (self.family().needs_gradient(), inputs.sigma().is_some()) {
            (true, false) => Err(self.family_mismatch(DensityGradient, "is required")),
            (false, true) => Err(self.family_mismatch(DensityGradient, "is not accepted")),
            _ => Ok(()),
        }
    }

    fn evaluate<'a, T: Element>(
        &self,
        inputs: Inputs<'a, T>,
        entry: EntryPoint,
        requested: DerivativeOrders,
        supplied: Vec<(PhysicalQuantity, &'a mut Quantity<f64>)>,
        fresh: bool,
    ) -> Result<Produced> {
        self.check_inputs(&inputs)?;

        let available = dispatch::check_available(self, requested)?;
        let computed = entry.computes(requested, available);

        let contract = ShapeContract::for_orders(self.family(), self.polarized(), computed, inputs.rho().shape());

        let wanted = if fresh { requested } else { DerivativeOrders::NONE };
        let mut bound = binder::bind(contract, inputs, supplied, wanted)?;

        dispatch::invoke(self, entry, &mut bound)?;

        bound.finish()
    }
}
