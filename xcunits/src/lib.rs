//! Physical quantities, unit systems and unit-tagged buffers for the
//! exchange-correlation kernel boundary.
//!
//! The kernel works in Hartree atomic units. Buffers that already are in
//! atomic units with `f64` elements pass through untouched; everything else
//! is converted once, at the boundary, at the cost of one extra array.

pub mod adapter;
pub mod consts;
mod quantity;
mod system;
mod tagged;

pub use adapter::{denormalize, denormalize_into, normalize};
pub use quantity::*;
pub use system::*;
pub use tagged::*;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("expected a buffer of {expected}, got {found}")]
    Mismatch {
        expected: PhysicalQuantity,
        found: PhysicalQuantity,
    },

    #[error("{quantity}: expected shape {expected:?}, got {actual:?}")]
    ShapeMismatch {
        quantity: PhysicalQuantity,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
}
