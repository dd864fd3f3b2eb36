//! Exchange-correlation functionals behind a checked array contract.
//!
//! A functional is created by name as a [`FunctionalHandle`]. Its operations
//! take unit-tagged, column-major densities (spin axis fastest) and return,
//! or fill, the energy per particle and its derivatives up to third order.
//! Shapes, tags and layouts are checked before anything reaches the kernel.
//!
//! ```no_run
//! use xc::{Inputs, XcLibrary};
//! use xc::xcunits::{PhysicalQuantity, Quantity};
//!
//! let lib: XcLibrary = XcLibrary::default();
//! let rho = Quantity::from_shape_vec(PhysicalQuantity::Density, &[3], vec![0.1, 0.2, 0.3])?;
//! let zk = lib.energy("lda_x", Some(false), Inputs::lda(&rho))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binder;
pub mod correlation;
pub mod dispatch;
pub mod error;
pub mod exchange;
pub mod handle;
pub mod kernel;
pub mod kernels;
pub mod library;
mod ops;
pub mod outputs;
pub mod shape;
pub mod spin;

pub use control;
pub use xcinfo;
pub use xcunits;

pub use binder::Inputs;
pub use error::{Result, XcError};
pub use handle::FunctionalHandle;
pub use kernel::{Backend, Kernel};
pub use kernels::builtin::BuiltinKernel;
pub use kernels::DefaultKernel;
pub use library::XcLibrary;
pub use outputs::{
    AllOutputs, AllOutputsMut, EnergyAndPotential, EnergyAndPotentialMut, Potential, PotentialMut,
    SecondDerivative, SecondDerivativeMut, ThirdDerivative, ThirdDerivativeMut,
};
pub use shape::{DerivativeOrders, ShapeContract};

pub use xcinfo::{Family, Kind, Registry};
pub use xcunits::{PhysicalQuantity, Quantity, UnitSystem};
