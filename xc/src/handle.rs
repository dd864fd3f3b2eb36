use std::fmt;

use tracing::debug;
use xcinfo::{Citation, Family, FunctionalDescriptor, Kind, Registry};

use crate::error::{Result, XcError};
use crate::kernel::Kernel;
use crate::shape::DerivativeOrders;

/// A live native functional object.
///
/// Move-only; the native object is released exactly once, when the handle
/// is dropped or passed to [`FunctionalHandle::destroy`].
pub struct FunctionalHandle<'k, K: Kernel> {
    kernel: &'k K,
    descriptor: &'static FunctionalDescriptor,
    polarized: bool,
    native: K::Functional,
}

impl<'k, K: Kernel> FunctionalHandle<'k, K> {
    pub fn create(registry: &Registry, kernel: &'k K, name: &str, polarized: bool) -> Result<Self> {
        let descriptor = registry
            .lookup(name)
            .ok_or_else(|| XcError::NotFound(name.to_string()))?;

        let native = kernel
            .init(descriptor.library_id, polarized)
            .map_err(|code| XcError::AllocationFailed {
                name: name.to_string(),
                code,
            })?;

        debug!(
            "created {} (id {}, {})",
            descriptor.name,
            descriptor.library_id,
            if polarized { "polarized" } else { "unpolarized" }
        );

        Ok(FunctionalHandle {
            kernel,
            descriptor,
            polarized,
            native,
        })
    }

    /// Releases the native object now.
    pub fn destroy(self) {}

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn family(&self) -> Family {
        self.descriptor.family
    }

    pub fn kind(&self) -> Kind {
        self.descriptor.kind
    }

    pub fn polarized(&self) -> bool {
        self.polarized
    }

    pub fn library_id(&self) -> i32 {
        self.descriptor.library_id
    }

    pub fn descriptor(&self) -> &'static FunctionalDescriptor {
        self.descriptor
    }

    pub fn description(&self) -> &'static str {
        self.descriptor.description
    }

    pub fn citations(&self) -> &'static [Citation] {
        self.descriptor.citations
    }

    /// Derivative orders the live native object implements.
    pub fn available_orders(&self) -> DerivativeOrders {
        DerivativeOrders::from_flags(self.kernel.flags(&self.native))
    }

    pub(crate) fn kernel(&self) -> &'k K {
        self.kernel
    }

    pub(crate) fn native(&self) -> &K::Functional {
        &self.native
    }
}

impl<'k, K: Kernel> Drop for FunctionalHandle<'k, K> {
    fn drop(&mut self) {
        self.kernel.end(&mut self.native);
        debug!("released {}", self.descriptor.name);
    }
}

impl<'k, K: Kernel> fmt::Debug for FunctionalHandle<'k, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionalHandle")
            .field("name", &self.name())
            .field("library_id", &self.library_id())
            .field("polarized", &self.polarized)
            .finish()
    }
}

impl<'k, K: Kernel> fmt::Display for FunctionalHandle<'k, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.description(), self.name())?;
        writeln!(
            f,
            "  {} {}, {}",
            self.family(),
            self.kind(),
            if self.polarized { "spin-polarized" } else { "unpolarized" }
        )?;
        writeln!(f, "  derivative orders {}", self.available_orders())?;
        for c in self.citations() {
            writeln!(f, "  {}", c)?;
        }
        Ok(())
    }
}
