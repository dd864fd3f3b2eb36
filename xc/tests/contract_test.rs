mod common;

use common::*;

use ndarray::{Array2, ArrayD, IxDyn, ShapeBuilder};
use xc::control::Control;
use xc::exchange::slater::slater_unpolarized;
use xc::xcunits::consts::{ANG_TO_BOHR, HA_TO_EV};
use xc::xcunits::PhysicalQuantity::*;
use xc::xcunits::{EnergyUnit, LengthUnit};
use xc::*;

fn counting() -> XcLibrary<CountingKernel> {
    XcLibrary::new(CountingKernel::new())
}

#[test]
fn test_handle_lifecycle() {
    let lib = counting();

    {
        let h = lib.create("lda_x", false).unwrap();
        assert_eq!(lib.kernel().live(), 1);
        h.destroy();
    }
    assert_eq!(lib.kernel().live(), 0);

    let a = lib.create("lda_x", true).unwrap();
    let b = lib.create("lda_c_pz", true).unwrap();
    assert_eq!(lib.kernel().live(), 2);
    drop(b);
    drop(a);

    assert_eq!(lib.kernel().inits.get(), 3);
    assert_eq!(lib.kernel().ends.get(), 3);
}

#[test]
fn test_not_found_allocates_nothing() {
    let lib = counting();
    let rho = density(&[1], &[1.0]);

    let err = lib.energy("lda_x_nope", Some(false), Inputs::lda(&rho)).unwrap_err();

    assert!(matches!(err, XcError::NotFound(ref n) if n == "lda_x_nope"));
    assert_eq!(lib.kernel().inits.get(), 0);
}

#[test]
fn test_unsupported_derivative_before_evaluation() {
    let lib = counting();
    let rho = density(&[3], &[0.1, 0.2, 0.3]);

    let err = lib
        .third_derivative("lda_c_pz", Some(false), Inputs::lda(&rho))
        .unwrap_err();

    match err {
        XcError::UnsupportedDerivative { name, order } => {
            assert_eq!(name, "lda_c_pz");
            assert_eq!(order, 3);
        }
        e => panic!("unexpected {:?}", e),
    }
    assert_eq!(lib.kernel().calls.get(), 0);
    assert_eq!(lib.kernel().live(), 0);
}

#[test]
fn test_dimension_error_reports_shapes() {
    let lib = counting();
    let rho = density(&[2, 3], &[0.1; 6]);
    let mut vrho = Quantity::zeros(DEDRho, &[2, 4]);

    let err = lib
        .potential_into("lda_x", Some(true), Inputs::lda(&rho), PotentialMut::lda(&mut vrho))
        .unwrap_err();

    match err {
        XcError::DimensionError { role, expected, actual } => {
            assert_eq!(role, DEDRho);
            assert_eq!(expected, vec![2, 3]);
            assert_eq!(actual, vec![2, 4]);
        }
        e => panic!("unexpected {:?}", e),
    }
    assert_eq!(lib.kernel().calls.get(), 0);
    assert_eq!(lib.kernel().live(), 0);
}

#[test]
fn test_polarized_gradient_needs_three_components() {
    let lib = counting();
    let rho = density(&[2, 5], &[0.1; 10]);
    let sigma = gradient(&[2, 5], &[0.01; 10]);

    let err = lib
        .energy("gga_x_pbe", Some(true), Inputs::gga(&rho, &sigma))
        .unwrap_err();

    assert!(matches!(
        err,
        XcError::DimensionError { role: DensityGradient, ref expected, .. } if expected == &vec![3, 5]
    ));
    assert_eq!(lib.kernel().calls.get(), 0);
}

#[test]
fn test_polarized_density_needs_spin_axis() {
    let lib = counting();
    let rho = density(&[3, 4], &[0.1; 12]);

    let err = lib.energy("lda_x", Some(true), Inputs::lda(&rho)).unwrap_err();

    assert!(matches!(
        err,
        XcError::DimensionError { role: Density, ref expected, .. } if expected == &vec![2, 4]
    ));
}

#[test]
fn test_family_mismatch() {
    let lib = counting();
    let rho = density(&[2], &[0.1, 0.2]);
    let sigma = gradient(&[2], &[0.0, 0.0]);

    let err = lib.energy("lda_x", Some(false), Inputs::gga(&rho, &sigma)).unwrap_err();
    assert!(matches!(
        err,
        XcError::FamilyMismatch { role: DensityGradient, family: Family::Lda, .. }
    ));

    let err = lib.energy("gga_x_pbe", Some(false), Inputs::lda(&rho)).unwrap_err();
    assert!(matches!(
        err,
        XcError::FamilyMismatch { role: DensityGradient, family: Family::Gga, .. }
    ));

    let mut vrho = Quantity::zeros(DEDRho, &[2]);
    let err = lib
        .potential_into("gga_x_pbe", Some(false), Inputs::gga(&rho, &sigma), PotentialMut::lda(&mut vrho))
        .unwrap_err();
    assert!(matches!(err, XcError::FamilyMismatch { role: DEDGrad, .. }));

    let mut vsigma = Quantity::zeros(DEDGrad, &[2]);
    let err = lib
        .potential_into(
            "lda_x",
            Some(false),
            Inputs::lda(&rho),
            PotentialMut::gga(&mut vrho, &mut vsigma),
        )
        .unwrap_err();
    assert!(matches!(err, XcError::FamilyMismatch { role: DEDGrad, .. }));

    assert_eq!(lib.kernel().calls.get(), 0);
    assert_eq!(lib.kernel().live(), 0);
}

#[test]
fn test_wrong_tag_is_unit_mismatch() {
    let lib = counting();
    let rho = Quantity::from_shape_vec(EnergyDensity, &[2], vec![0.1, 0.2]).unwrap();

    let err = lib.energy("lda_x", Some(false), Inputs::lda(&rho)).unwrap_err();

    assert!(matches!(
        err,
        XcError::UnitMismatch { expected: Density, found: EnergyDensity }
    ));
}

#[test]
fn test_row_major_output_is_rejected() {
    let lib = counting();
    let rho = density(&[2, 3], &[0.1; 6]);
    let mut vrho = Quantity::new(DEDRho, Array2::<f64>::zeros((2, 3)).into_dyn());

    let err = lib
        .potential_into("lda_x", Some(true), Inputs::lda(&rho), PotentialMut::lda(&mut vrho))
        .unwrap_err();

    assert!(matches!(err, XcError::NotContiguous(DEDRho)));
}

#[test]
fn test_row_major_input_is_copied() {
    let lib = counting();
    // (↑, ↓) = (1, 3), (2, 2), (3, 1) laid out row-major
    let data = Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 3.0, 2.0, 1.0]).unwrap();
    let rho = Quantity::new(Density, data.into_dyn());

    let zk = lib.energy("lda_x", Some(true), Inputs::lda(&rho)).unwrap();

    assert_close(&values(&zk), &[-1.23917, -1.17239, -1.23917], TOL);
}

#[test]
fn test_in_place_outputs() {
    let lib = counting();
    let rho = density(&[2, 3], &[1.0, 3.0, 2.0, 2.0, 3.0, 1.0]);
    let mut zk = Quantity::zeros(EnergyDensity, &[3]);
    let mut vrho = Quantity::zeros(DEDRho, &[2, 3]);

    lib.energy_and_potential_into(
        "lda_x",
        Some(true),
        Inputs::lda(&rho),
        EnergyAndPotentialMut::lda(&mut zk, &mut vrho),
    )
    .unwrap();

    let fresh = lib
        .energy_and_potential("lda_x", Some(true), Inputs::lda(&rho))
        .unwrap();

    assert_eq!(zk, fresh.zk);
    assert_eq!(vrho, fresh.vrho);
    assert_eq!(lib.kernel().calls.get(), 2);
}

#[test]
fn test_every_in_place_variant() {
    let lib = counting();
    let rho = density(&[2], &[0.4, 0.9]);

    let mut zk = Quantity::zeros(EnergyDensity, &[2]);
    lib.energy_into("lda_x", Some(false), Inputs::lda(&rho), &mut zk)
        .unwrap();

    let mut v2 = Quantity::zeros(D2EDRho2, &[2]);
    lib.second_derivative_into("lda_x", Some(false), Inputs::lda(&rho), SecondDerivativeMut::lda(&mut v2))
        .unwrap();

    let mut v3 = Quantity::zeros(D3EDRho3, &[2]);
    lib.third_derivative_into("lda_x", Some(false), Inputs::lda(&rho), ThirdDerivativeMut::lda(&mut v3))
        .unwrap();

    let all = lib.all_outputs("lda_x", Some(false), Inputs::lda(&rho)).unwrap();

    assert_eq!(Some(zk), all.zk);
    assert_eq!(v2, all.second.unwrap().v2rho2);
    assert_eq!(v3, all.third.unwrap().v3rho3);
}

#[test]
fn test_all_outputs_into_single_call() {
    let lib = counting();
    let rho = density(&[3], &[0.2, 0.4, 0.6]);
    let mut v2 = Quantity::zeros(D2EDRho2, &[3]);

    let out = AllOutputsMut {
        v2rho2: Some(&mut v2),
        ..AllOutputsMut::default()
    };
    lib.all_outputs_into("lda_x", Some(false), Inputs::lda(&rho), out)
        .unwrap();

    assert_eq!(lib.kernel().calls.get(), 1);

    let f = lib
        .second_derivative("lda_x", Some(false), Inputs::lda(&rho))
        .unwrap();
    assert_close(&values(&v2), &values(&f.v2rho2), 1.0E-14);
}

#[test]
fn test_all_outputs_into_respects_capabilities() {
    let lib = counting();
    let rho = density(&[1], &[0.5]);
    let mut v2 = Quantity::zeros(D2EDRho2, &[1]);

    let out = AllOutputsMut {
        v2rho2: Some(&mut v2),
        ..AllOutputsMut::default()
    };
    let err = lib
        .all_outputs_into("lda_c_pz", Some(false), Inputs::lda(&rho), out)
        .unwrap_err();

    assert!(matches!(err, XcError::UnsupportedDerivative { order: 2, .. }));
    assert_eq!(lib.kernel().calls.get(), 0);
}

#[test]
fn test_unit_conversion_at_the_boundary() {
    let lib = XcLibrary::new(BuiltinKernel::new())
        .with_input_units(UnitSystem::new(EnergyUnit::Hartree, LengthUnit::Angstrom));

    let bohr = [1.0, 2.0, 3.0];
    let per_ang3: Vec<f64> = bohr.iter().map(|r| r * ANG_TO_BOHR.powi(3)).collect();
    let rho = lib.tag(Density, ArrayD::from_shape_vec(IxDyn(&[3]).f(), per_ang3).unwrap());

    let ev = UnitSystem::new(EnergyUnit::ElectronVolt, LengthUnit::Bohr);
    let mut zk = Quantity::with_units(EnergyDensity, ev, ArrayD::zeros(IxDyn(&[3]).f()));

    lib.energy_into("lda_x", Some(false), Inputs::lda(&rho), &mut zk)
        .unwrap();

    assert_eq!(zk.units(), ev);
    let expected: Vec<f64> = bohr
        .iter()
        .map(|&r| slater_unpolarized(r).ex * HA_TO_EV)
        .collect();
    assert_close(&values(&zk), &expected, 1.0E-9);
}

#[test]
fn test_kernel_status_is_reported() {
    struct Failing(CountingKernel);

    impl Kernel for Failing {
        type Functional = kernels::builtin::BuiltinFunctional;

        fn init(&self, id: i32, polarized: bool) -> std::result::Result<Self::Functional, i32> {
            self.0.init(id, polarized)
        }

        fn end(&self, f: &mut Self::Functional) {
            self.0.end(f)
        }

        fn flags(&self, f: &Self::Functional) -> u32 {
            self.0.flags(f)
        }

        fn lda(&self, _: &Self::Functional, _: usize, _: &[f64], _: kernel::LdaOut<'_>) -> kernel::KernelResult {
            Err(7)
        }

        fn gga(
            &self,
            _: &Self::Functional,
            _: usize,
            _: &[f64],
            _: &[f64],
            _: kernel::GgaOut<'_>,
        ) -> kernel::KernelResult {
            Err(7)
        }
    }

    let lib = XcLibrary::new(Failing(CountingKernel::new()));
    let rho = density(&[1], &[0.5]);

    let err = lib.energy("lda_x", Some(false), Inputs::lda(&rho)).unwrap_err();

    assert!(matches!(err, XcError::KernelError { status: 7, ref name } if name == "lda_x"));
    assert_eq!(lib.kernel().0.live(), 0);
}

#[test]
fn test_from_control() {
    let mut ctrl = Control::new();
    ctrl.read_lines(&["xc_backend = builtin", "spin_scheme = nonspin", "dens_threshold = 1.0E-8"])
        .unwrap();

    let lib = XcLibrary::<BuiltinKernel>::from_control(&ctrl).unwrap();

    assert_eq!(lib.default_spin(), Some(false));
    assert_eq!(lib.kernel().dens_threshold(), 1.0E-8);

    let rho = density(&[2, 2], &[1.0, 1.0E-9, 0.5, 0.5]);
    let zk = lib.energy("lda_x", None, Inputs::lda(&rho)).unwrap();
    assert_eq!(zk.shape(), &[2, 2]);
    assert_eq!(values(&zk)[1], 0.0);
}

#[test]
fn test_backend_unavailable() {
    let mut ctrl = Control::new();
    ctrl.read_lines(&["xc_backend = libxc"]).unwrap();

    let err = XcLibrary::<BuiltinKernel>::from_control(&ctrl).err().unwrap();

    assert!(matches!(
        err,
        XcError::BackendUnavailable { ref requested, available: "builtin" } if requested == "libxc"
    ));
}

#[test]
fn test_from_missing_file() {
    let err = XcLibrary::<BuiltinKernel>::from_file("/nonexistent/xc.ctrl").err().unwrap();

    assert!(matches!(err, XcError::Control(_)));
}

#[test]
fn test_invoke_checks_capabilities() {
    let lib = counting();
    let h = lib.create("lda_c_pz", false).unwrap();
    let rho = density(&[2], &[0.1, 0.2]);

    let contract = h.contract(3, rho.shape()).unwrap();
    let mut bound = binder::bind(contract, Inputs::lda(&rho), vec![], DerivativeOrders::NONE).unwrap();

    let err = dispatch::invoke(&h, dispatch::EntryPoint::Kxc, &mut bound).unwrap_err();

    assert!(matches!(err, XcError::UnsupportedDerivative { order: 3, ref name } if name == "lda_c_pz"));
    assert_eq!(lib.kernel().calls.get(), 0);
}

#[test]
fn test_invoke_runs_available_orders() {
    let lib = counting();
    let h = lib.create("lda_c_pz", false).unwrap();
    let rho = density(&[2], &[0.1, 0.2]);

    let contract = h.contract(1, rho.shape()).unwrap();
    let mut bound = binder::bind(contract, Inputs::lda(&rho), vec![], DerivativeOrders::ALL).unwrap();

    dispatch::invoke(&h, dispatch::EntryPoint::Vxc, &mut bound).unwrap();
    let mut produced = bound.finish().unwrap();

    assert_eq!(lib.kernel().calls.get(), 1);
    assert!(values(&produced.require(DEDRho).unwrap()).iter().all(|&v| v < 0.0));
}

#[test]
fn test_gga_in_place_derivative_sets() {
    let lib = counting();
    let h = lib.create("gga_x_pbe", true).unwrap();
    let rho = density(&[2, 2], &[0.2, 0.1, 0.3, 0.3]);
    let sigma = gradient(&[3, 2], &[0.01, 0.0, 0.02, 0.03, 0.0, 0.03]);

    let mut v2rho2 = Quantity::zeros(D2EDRho2, &[3, 2]);
    let mut v2rhosigma = Quantity::zeros(D2EDRhoDGrad, &[6, 2]);
    let mut v2sigma2 = Quantity::zeros(D2EDGrad2, &[6, 2]);
    let out = SecondDerivativeMut::gga(&mut v2rho2, &mut v2rhosigma, &mut v2sigma2);

    let err = h.second_derivative_into(Inputs::gga(&rho, &sigma), out).unwrap_err();
    assert!(matches!(err, XcError::UnsupportedDerivative { order: 2, .. }));

    let mut v3rho3 = Quantity::zeros(D3EDRho3, &[4, 2]);
    let mut v3rho2sigma = Quantity::zeros(D3EDRho2DGrad, &[9, 2]);
    let mut v3rhosigma2 = Quantity::zeros(D3EDRhoDGrad2, &[10, 2]);
    let mut v3sigma3 = Quantity::zeros(D3EDGrad3, &[12, 2]);
    let out = ThirdDerivativeMut::gga(&mut v3rho3, &mut v3rho2sigma, &mut v3rhosigma2, &mut v3sigma3);

    let err = h.third_derivative_into(Inputs::gga(&rho, &sigma), out).unwrap_err();
    assert!(matches!(err, XcError::UnsupportedDerivative { order: 3, .. }));

    assert_eq!(lib.kernel().calls.get(), 0);
}
