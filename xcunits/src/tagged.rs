//! Unit-tagged dense buffers.

use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use num_traits::AsPrimitive;

use crate::{PhysicalQuantity, UnitSystem};

/// Numeric element types accepted as kernel inputs.
///
/// Only `f64` reaches the kernel without a copy; every other element type is
/// widened element-wise by the unit adapter.
pub trait Element: Copy + AsPrimitive<f64> + 'static {
    fn as_native(data: &ArrayD<Self>) -> Option<&ArrayD<f64>>;
}

impl Element for f64 {
    fn as_native(data: &ArrayD<f64>) -> Option<&ArrayD<f64>> {
        Some(data)
    }
}

macro_rules! impl_widened_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn as_native(_data: &ArrayD<$t>) -> Option<&ArrayD<f64>> {
                    None
                }
            }
        )*
    };
}

impl_widened_element!(f32, i32, i64, u32);

/// True when `data` is dense in column-major order, which puts the leading
/// (spin) axis fastest in memory as the kernel expects.
pub fn is_kernel_layout<T>(data: &ArrayD<T>) -> bool {
    data.t().is_standard_layout()
}

/// A dense n-d buffer tagged with the quantity it holds and its units.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity<T> {
    quantity: PhysicalQuantity,
    units: UnitSystem,
    data: ArrayD<T>,
}

impl<T> Quantity<T> {
    /// Tags `data` as `quantity` in atomic units.
    pub fn new(quantity: PhysicalQuantity, data: ArrayD<T>) -> Quantity<T> {
        Quantity {
            quantity,
            units: UnitSystem::ATOMIC,
            data,
        }
    }

    pub fn with_units(quantity: PhysicalQuantity, units: UnitSystem, data: ArrayD<T>) -> Quantity<T> {
        Quantity {
            quantity,
            units,
            data,
        }
    }

    /// Builds a column-major buffer from values listed first-index-fastest.
    pub fn from_shape_vec(
        quantity: PhysicalQuantity,
        shape: &[usize],
        values: Vec<T>,
    ) -> Result<Quantity<T>, ndarray::ShapeError> {
        let data = ArrayD::from_shape_vec(IxDyn(shape).f(), values)?;
        Ok(Quantity::new(quantity, data))
    }

    pub fn quantity(&self) -> PhysicalQuantity {
        self.quantity
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<T> {
        &mut self.data
    }

    pub fn into_data(self) -> ArrayD<T> {
        self.data
    }

    /// True when the buffer can be handed to the kernel as is.
    pub fn is_native(&self) -> bool
    where
        T: Element,
    {
        self.units.is_atomic() && T::as_native(&self.data).is_some() && is_kernel_layout(&self.data)
    }
}

impl Quantity<f64> {
    /// Zero-filled atomic-unit buffer in kernel layout.
    pub fn zeros(quantity: PhysicalQuantity, shape: &[usize]) -> Quantity<f64> {
        Quantity::new(quantity, ArrayD::zeros(IxDyn(shape).f()))
    }

    /// Values in memory order. `None` when the buffer is not dense.
    pub fn as_slice(&self) -> Option<&[f64]> {
        self.data.as_slice_memory_order()
    }
}
