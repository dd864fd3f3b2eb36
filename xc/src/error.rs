//! Error types for the XC module

use control::ControlError;
use thiserror::Error;
use xcinfo::Family;
use xcunits::{PhysicalQuantity, UnitError};

#[derive(Debug, Error)]
pub enum XcError {
    #[error("functional '{0}' is not in the registry")]
    NotFound(String),

    #[error("native construction of '{name}' failed with status {code}")]
    AllocationFailed { name: String, code: i32 },

    #[error("{role}: expected shape {expected:?}, got {actual:?}")]
    DimensionError {
        role: PhysicalQuantity,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("'{name}' does not provide derivatives of order {order}")]
    UnsupportedDerivative { name: String, order: usize },

    #[error("derivative order {0} is above the highest supported order 3")]
    UnsupportedOrder(usize),

    #[error("expected a buffer of {expected}, got {found}")]
    UnitMismatch {
        expected: PhysicalQuantity,
        found: PhysicalQuantity,
    },

    #[error("kernel evaluation of '{name}' failed with status {status}")]
    KernelError { name: String, status: i32 },

    /// Gradient supplied to an LDA functional, or missing for a GGA one.
    #[error("'{name}' is {family}: {role} buffer {detail}")]
    FamilyMismatch {
        name: String,
        family: Family,
        role: PhysicalQuantity,
        detail: &'static str,
    },

    #[error("{0}: output buffer is not dense in column-major order")]
    NotContiguous(PhysicalQuantity),

    #[error("{0}: no buffer bound for this role")]
    Unbound(PhysicalQuantity),

    #[error("{0}: buffer supplied for a role the call does not use")]
    UnexpectedBuffer(PhysicalQuantity),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("backend '{requested}' requested, this build provides '{available}'")]
    BackendUnavailable {
        requested: String,
        available: &'static str,
    },

    #[error(transparent)]
    Control(#[from] ControlError),
}

impl From<UnitError> for XcError {
    fn from(e: UnitError) -> Self {
        match e {
            UnitError::Mismatch { expected, found } => XcError::UnitMismatch { expected, found },
            UnitError::ShapeMismatch {
                quantity,
                expected,
                actual,
            } => XcError::DimensionError {
                role: quantity,
                expected,
                actual,
            },
            UnitError::UnknownUnit(u) => XcError::UnknownUnit(u),
        }
    }
}

pub type Result<T> = std::result::Result<T, XcError>;
