//! Moves buffers in and out of the kernel's native representation:
//! `f64`, Hartree atomic units, column-major.

use ndarray::{ArrayD, CowArray, IxDyn, ShapeBuilder, Zip};
use num_traits::AsPrimitive;
use tracing::debug;

use crate::tagged::is_kernel_layout;
use crate::{Element, PhysicalQuantity, Quantity, UnitError, UnitSystem};

/// Returns `buffer` in native form and whether a conversion was needed.
///
/// A buffer that is already native comes back as a borrowed view of the
/// caller's data. Anything else is copied once into a fresh native array.
pub fn normalize<T: Element>(
    buffer: &Quantity<T>,
    quantity: PhysicalQuantity,
) -> Result<(CowArray<'_, f64, IxDyn>, bool), UnitError> {
    check_tag(buffer.quantity(), quantity)?;

    if buffer.units().is_atomic() && is_kernel_layout(buffer.data()) {
        if let Some(native) = T::as_native(buffer.data()) {
            return Ok((CowArray::from(native.view()), false));
        }
    }

    let factor = buffer.units().factor_to_atomic(quantity.dimensions());

    debug!(
        "converting {} of shape {:?} from ({}) to atomic units",
        quantity,
        buffer.shape(),
        buffer.units()
    );

    let mut native = ArrayD::<f64>::zeros(IxDyn(buffer.shape()).f());
    Zip::from(&mut native)
        .and(buffer.data())
        .for_each(|n, &x| *n = x.as_() * factor);

    Ok((CowArray::from(native), true))
}

/// Tags a native kernel result, converting it to `target` units if needed.
pub fn denormalize(native: ArrayD<f64>, quantity: PhysicalQuantity, target: UnitSystem) -> Quantity<f64> {
    if target.is_atomic() {
        return Quantity::new(quantity, native);
    }

    let inv = 1.0 / target.factor_to_atomic(quantity.dimensions());
    let mut native = native;
    native.mapv_inplace(|x| x * inv);

    Quantity::with_units(quantity, target, native)
}

/// Writes a native kernel result into a caller buffer, in the caller's units.
pub fn denormalize_into(native: &ArrayD<f64>, target: &mut Quantity<f64>) -> Result<(), UnitError> {
    if native.shape() != target.shape() {
        return Err(UnitError::ShapeMismatch {
            quantity: target.quantity(),
            expected: native.shape().to_vec(),
            actual: target.shape().to_vec(),
        });
    }

    let inv = 1.0 / target.units().factor_to_atomic(target.quantity().dimensions());

    Zip::from(target.data_mut())
        .and(native)
        .for_each(|t, &n| *t = n * inv);

    Ok(())
}

/// The tag carries the dimensions, so a differing tag is a unit error.
pub fn check_tag(found: PhysicalQuantity, expected: PhysicalQuantity) -> Result<(), UnitError> {
    if found == expected {
        Ok(())
    } else {
        Err(UnitError::Mismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::{EnergyUnit, LengthUnit};
    use ndarray::Array2;

    const TOL: f64 = 1.0E-12;

    fn density(values: Vec<f64>) -> Quantity<f64> {
        let n = values.len();
        Quantity::from_shape_vec(PhysicalQuantity::Density, &[n], values).unwrap()
    }

    #[test]
    fn test_normalize_native_is_alias() {
        let rho = density(vec![1.0, 2.0, 3.0]);

        let (native, converted) = normalize(&rho, PhysicalQuantity::Density).unwrap();

        assert!(!converted);
        assert!(native.is_view());
        assert_eq!(native.as_ptr(), rho.data().as_ptr());
    }

    #[test]
    fn test_normalize_converts_angstrom_density() {
        let units = UnitSystem::new(EnergyUnit::Hartree, LengthUnit::Angstrom);
        let rho = Quantity::with_units(
            PhysicalQuantity::Density,
            units,
            ndarray::arr1(&[1.0, 2.0]).into_dyn(),
        );

        let (native, converted) = normalize(&rho, PhysicalQuantity::Density).unwrap();

        assert!(converted);
        assert!(native.is_owned());
        let f = BOHR_TO_ANG.powi(3);
        assert!((native[[0]] - f).abs() < TOL);
        assert!((native[[1]] - 2.0 * f).abs() < TOL);
    }

    #[test]
    fn test_normalize_widens_integers() {
        let rho = Quantity::from_shape_vec(PhysicalQuantity::Density, &[3], vec![1_i32, 2, 3]).unwrap();

        let (native, converted) = normalize(&rho, PhysicalQuantity::Density).unwrap();

        assert!(converted);
        assert_eq!(native.as_slice_memory_order().unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_normalize_relayouts_row_major() {
        let mut c_order = Array2::<f64>::zeros((2, 3));
        c_order[[0, 1]] = 2.0;
        c_order[[1, 1]] = 5.0;
        let rho = Quantity::new(PhysicalQuantity::Density, c_order.into_dyn());

        let (native, converted) = normalize(&rho, PhysicalQuantity::Density).unwrap();

        assert!(converted);
        assert!(is_kernel_layout(&native.to_owned()));
        // point 1 holds (up, down) next to each other
        assert_eq!(&native.as_slice_memory_order().unwrap()[2..4], &[2.0, 5.0]);
    }

    #[test]
    fn test_normalize_rejects_wrong_tag() {
        let eps = Quantity::zeros(PhysicalQuantity::EnergyDensity, &[3]);

        let err = normalize(&eps, PhysicalQuantity::Density).unwrap_err();

        assert_eq!(
            err,
            UnitError::Mismatch {
                expected: PhysicalQuantity::Density,
                found: PhysicalQuantity::EnergyDensity,
            }
        );
    }

    #[test]
    fn test_denormalize_to_ev() {
        let units = UnitSystem::new(EnergyUnit::ElectronVolt, LengthUnit::Bohr);
        let native = ndarray::arr1(&[-1.0, 0.5]).into_dyn();

        let eps = denormalize(native, PhysicalQuantity::EnergyDensity, units);

        assert_eq!(eps.units(), units);
        assert!((eps.data()[[0]] + HA_TO_EV).abs() < 1.0E-9);
        assert!((eps.data()[[1]] - 0.5 * HA_TO_EV).abs() < 1.0E-9);
    }

    #[test]
    fn test_denormalize_into_checks_shape() {
        let native = ndarray::arr1(&[1.0, 2.0]).into_dyn();
        let mut target = Quantity::zeros(PhysicalQuantity::DEDRho, &[3]);

        assert!(denormalize_into(&native, &mut target).is_err());
    }
}
