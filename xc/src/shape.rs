//! Shape contracts: the exact extent of every buffer the kernel reads or
//! writes for a (family, polarization, derivative orders, base shape).

use std::fmt;

use itertools::Itertools;
use xcinfo::{Family, MAX_ORDER};
use xcunits::PhysicalQuantity;

use crate::error::{Result, XcError};

use PhysicalQuantity::*;

/// Spin components packed per point for `quantity`.
///
/// `None` when the role does not exist for the family (gradient roles of an
/// LDA functional). Every role of an unpolarized functional has one.
pub fn multiplier(family: Family, polarized: bool, quantity: PhysicalQuantity) -> Option<usize> {
    if family == Family::Lda && quantity.involves_gradient() {
        return None;
    }

    if !polarized {
        return Some(1);
    }

    let m = match quantity {
        Density => 2,
        DensityGradient => 3,
        EnergyDensity => 1,
        DEDRho => 2,
        DEDGrad => 3,
        D2EDRho2 => 3,
        D2EDRhoDGrad => 6,
        D2EDGrad2 => 6,
        D3EDRho3 => 4,
        D3EDRho2DGrad => 9,
        D3EDRhoDGrad2 => 10,
        D3EDGrad3 => 12,
    };

    Some(m)
}

/// Input roles of a family, in kernel argument order.
pub fn input_roles(family: Family) -> &'static [PhysicalQuantity] {
    match family {
        Family::Lda => &[Density],
        Family::Gga => &[Density, DensityGradient],
    }
}

/// Output roles of derivative `order`, in kernel argument order.
pub fn output_roles(family: Family, order: usize) -> &'static [PhysicalQuantity] {
    match (family, order) {
        (_, 0) => &[EnergyDensity],
        (Family::Lda, 1) => &[DEDRho],
        (Family::Lda, 2) => &[D2EDRho2],
        (Family::Lda, 3) => &[D3EDRho3],
        (Family::Gga, 1) => &[DEDRho, DEDGrad],
        (Family::Gga, 2) => &[D2EDRho2, D2EDRhoDGrad, D2EDGrad2],
        (Family::Gga, 3) => &[D3EDRho3, D3EDRho2DGrad, D3EDRhoDGrad2, D3EDGrad3],
        _ => &[],
    }
}

/// Set of derivative orders `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DerivativeOrders(u8);

impl DerivativeOrders {
    pub const NONE: DerivativeOrders = DerivativeOrders(0);
    pub const ALL: DerivativeOrders = DerivativeOrders(0b1111);

    pub fn single(order: usize) -> Result<DerivativeOrders> {
        DerivativeOrders::NONE.with(order)
    }

    /// `0..=order`.
    pub fn up_to(order: usize) -> Result<DerivativeOrders> {
        if order > MAX_ORDER {
            return Err(XcError::UnsupportedOrder(order));
        }
        Ok(DerivativeOrders((1u8 << (order + 1)) - 1))
    }

    /// Orders advertised by `XC_FLAGS_HAVE_*` bits.
    pub fn from_flags(flags: u32) -> DerivativeOrders {
        DerivativeOrders((flags & 0b1111) as u8)
    }

    pub fn with(self, order: usize) -> Result<DerivativeOrders> {
        if order > MAX_ORDER {
            return Err(XcError::UnsupportedOrder(order));
        }
        Ok(DerivativeOrders(self.0 | 1 << order))
    }

    pub fn contains(self, order: usize) -> bool {
        order <= MAX_ORDER && self.0 & (1 << order) != 0
    }

    pub fn union(self, other: DerivativeOrders) -> DerivativeOrders {
        DerivativeOrders(self.0 | other.0)
    }

    pub fn intersection(self, other: DerivativeOrders) -> DerivativeOrders {
        DerivativeOrders(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn max(self) -> Option<usize> {
        self.iter().last()
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..=MAX_ORDER).filter(move |&k| self.contains(k))
    }
}

impl fmt::Display for DerivativeOrders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

/// Ordered `(role, required shape)` list for one kernel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeContract {
    family: Family,
    polarized: bool,
    orders: DerivativeOrders,
    base: Vec<usize>,
    entries: Vec<(PhysicalQuantity, Vec<usize>)>,
}

impl ShapeContract {
    /// Contract of the single-order entry point for `order`.
    pub fn resolve(family: Family, polarized: bool, order: usize, base: &[usize]) -> Result<ShapeContract> {
        let orders = DerivativeOrders::single(order)?;
        Ok(ShapeContract::for_orders(family, polarized, orders, base))
    }

    /// Union of the single-order contracts, inputs listed once.
    pub fn for_orders(
        family: Family,
        polarized: bool,
        orders: DerivativeOrders,
        base: &[usize],
    ) -> ShapeContract {
        let tail = tail(polarized, base);

        let required = |role: PhysicalQuantity| -> Option<(PhysicalQuantity, Vec<usize>)> {
            let m = multiplier(family, polarized, role)?;
            let shape = if m > 1 {
                std::iter::once(m).chain(tail.iter().copied()).collect()
            } else if polarized {
                tail.to_vec()
            } else {
                base.to_vec()
            };
            Some((role, shape))
        };

        let entries = input_roles(family)
            .iter()
            .chain(orders.iter().flat_map(|k| output_roles(family, k).iter()))
            .filter_map(|&role| required(role))
            .collect();

        ShapeContract {
            family,
            polarized,
            orders,
            base: base.to_vec(),
            entries,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn polarized(&self) -> bool {
        self.polarized
    }

    pub fn orders(&self) -> DerivativeOrders {
        self.orders
    }

    pub fn base(&self) -> &[usize] {
        &self.base
    }

    pub fn entries(&self) -> &[(PhysicalQuantity, Vec<usize>)] {
        &self.entries
    }

    pub fn roles(&self) -> impl Iterator<Item = PhysicalQuantity> + '_ {
        self.entries.iter().map(|(role, _)| *role)
    }

    pub fn required(&self, role: PhysicalQuantity) -> Option<&[usize]> {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, shape)| shape.as_slice())
    }

    /// Number of grid points handed to the kernel.
    pub fn points(&self) -> usize {
        tail(self.polarized, &self.base).iter().product()
    }
}

fn tail(polarized: bool, base: &[usize]) -> &[usize] {
    match (polarized, base.split_first()) {
        (true, Some((_, rest))) => rest,
        (true, None) => &[],
        (false, _) => base,
    }
}
