//! Name-based entry points that create, use and release a handle per call.

use std::path::Path;

use control::Control;
use ndarray::ArrayD;
use tracing::{debug, info};
use xcinfo::Registry;
use xcunits::{Element, PhysicalQuantity, Quantity, UnitSystem};

use crate::binder::Inputs;
use crate::error::{Result, XcError};
use crate::handle::FunctionalHandle;
use crate::kernel::{Backend, Kernel};
use crate::kernels::DefaultKernel;
use crate::outputs::*;
use crate::spin;

pub struct XcLibrary<K: Kernel = DefaultKernel> {
    registry: Registry,
    kernel: K,
    default_spin: Option<bool>,
    units: UnitSystem,
    verbose: bool,
}

impl<K: Kernel + Default> Default for XcLibrary<K> {
    fn default() -> Self {
        XcLibrary::new(K::default())
    }
}

impl<K: Kernel> XcLibrary<K> {
    pub fn new(kernel: K) -> Self {
        XcLibrary {
            registry: Registry::standard(),
            kernel,
            default_spin: None,
            units: UnitSystem::ATOMIC,
            verbose: false,
        }
    }

    /// Spin treatment for by-name calls that pass `None`.
    pub fn with_default_spin(mut self, polarized: Option<bool>) -> Self {
        self.default_spin = polarized;
        self
    }

    /// Units attached by [`XcLibrary::tag`].
    pub fn with_input_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn default_spin(&self) -> Option<bool> {
        self.default_spin
    }

    pub fn input_units(&self) -> UnitSystem {
        self.units
    }

    /// Tags raw caller data with the configured input units.
    pub fn tag<T>(&self, quantity: PhysicalQuantity, data: ArrayD<T>) -> Quantity<T> {
        Quantity::with_units(quantity, self.units, data)
    }

    pub fn create(&self, name: &str, polarized: bool) -> Result<FunctionalHandle<'_, K>> {
        FunctionalHandle::create(&self.registry, &self.kernel, name, polarized)
    }

    fn with_functional<T, R, F>(
        &self,
        op: &str,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'_, T>,
        f: F,
    ) -> Result<R>
    where
        F: FnOnce(&FunctionalHandle<'_, K>) -> Result<R>,
    {
        let polarized = spin::resolve(polarized.or(self.default_spin), inputs.rho().shape());

        if self.verbose {
            debug!(
                "{} of {} on density {:?} ({})",
                op,
                name,
                inputs.rho().shape(),
                if polarized { "polarized" } else { "unpolarized" }
            );
        }

        let handle = self.create(name, polarized)?;
        f(&handle)
    }

    pub fn energy<T: Element>(&self, name: &str, polarized: Option<bool>, inputs: Inputs<'_, T>) -> Result<Quantity<f64>> {
        self.with_functional("energy", name, polarized, inputs, |h| h.energy(inputs))
    }

    pub fn energy_into<'a, T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'a, T>,
        zk: &'a mut Quantity<f64>,
    ) -> Result<()> {
        self.with_functional("energy", name, polarized, inputs, |h| h.energy_into(inputs, zk))
    }

    pub fn potential<T: Element>(&self, name: &str, polarized: Option<bool>, inputs: Inputs<'_, T>) -> Result<Potential> {
        self.with_functional("potential", name, polarized, inputs, |h| h.potential(inputs))
    }

    pub fn potential_into<'a, T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'a, T>,
        out: PotentialMut<'a>,
    ) -> Result<()> {
        self.with_functional("potential", name, polarized, inputs, |h| h.potential_into(inputs, out))
    }

    pub fn energy_and_potential<T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'_, T>,
    ) -> Result<EnergyAndPotential> {
        self.with_functional("energy and potential", name, polarized, inputs, |h| {
            h.energy_and_potential(inputs)
        })
    }

    pub fn energy_and_potential_into<'a, T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'a, T>,
        out: EnergyAndPotentialMut<'a>,
    ) -> Result<()> {
        self.with_functional("energy and potential", name, polarized, inputs, |h| {
            h.energy_and_potential_into(inputs, out)
        })
    }

    pub fn second_derivative<T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'_, T>,
    ) -> Result<SecondDerivative> {
        self.with_functional("second derivative", name, polarized, inputs, |h| {
            h.second_derivative(inputs)
        })
    }

    pub fn second_derivative_into<'a, T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'a, T>,
        out: SecondDerivativeMut<'a>,
    ) -> Result<()> {
        self.with_functional("second derivative", name, polarized, inputs, |h| {
            h.second_derivative_into(inputs, out)
        })
    }

    pub fn third_derivative<T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'_, T>,
    ) -> Result<ThirdDerivative> {
        self.with_functional("third derivative", name, polarized, inputs, |h| {
            h.third_derivative(inputs)
        })
    }

    pub fn third_derivative_into<'a, T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'a, T>,
        out: ThirdDerivativeMut<'a>,
    ) -> Result<()> {
        self.with_functional("third derivative", name, polarized, inputs, |h| {
            h.third_derivative_into(inputs, out)
        })
    }

    pub fn all_outputs<T: Element>(&self, name: &str, polarized: Option<bool>, inputs: Inputs<'_, T>) -> Result<AllOutputs> {
        self.with_functional("all outputs", name, polarized, inputs, |h| h.all_outputs(inputs))
    }

    pub fn all_outputs_into<'a, T: Element>(
        &self,
        name: &str,
        polarized: Option<bool>,
        inputs: Inputs<'a, T>,
        out: AllOutputsMut<'a>,
    ) -> Result<()> {
        self.with_functional("all outputs", name, polarized, inputs, |h| {
            h.all_outputs_into(inputs, out)
        })
    }
}

impl<K: Backend> XcLibrary<K> {
    /// Fails with `BackendUnavailable` when the control file names a kernel
    /// other than `K`.
    pub fn from_control(ctrl: &Control) -> Result<Self> {
        if ctrl.get_xc_backend() != K::NAME {
            return Err(XcError::BackendUnavailable {
                requested: ctrl.get_xc_backend().to_string(),
                available: K::NAME,
            });
        }

        let kernel = K::with_dens_threshold(ctrl.get_dens_threshold());

        let library = XcLibrary::new(kernel)
            .with_default_spin(ctrl.get_spin_polarized())
            .with_input_units(ctrl.get_input_units())
            .with_verbose(ctrl.is_verbose());

        info!(
            "xc library ready: {} kernel, {} functionals",
            K::NAME,
            library.registry.len()
        );

        Ok(library)
    }

    pub fn from_file<P: AsRef<Path>>(inpfile: P) -> Result<Self> {
        let mut ctrl = Control::new();
        ctrl.read_file(inpfile)?;
        ctrl.display();

        XcLibrary::from_control(&ctrl)
    }
}
