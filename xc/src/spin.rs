use tracing::{debug, warn};

/// Decides whether a density of shape `base` is spin-polarized.
///
/// An explicit request wins and is not checked against the shape. Without
/// one, a leading axis of extent 2 on a multi-dimensional array is read as
/// the spin axis. Two batched unpolarized systems therefore look exactly
/// like one polarized system; pass `Some(false)` for those.
pub fn resolve(explicit: Option<bool>, base: &[usize]) -> bool {
    if let Some(polarized) = explicit {
        return polarized;
    }

    let polarized = base.len() > 1 && base[0] == 2;

    if polarized {
        warn!(
            "density of shape {:?} taken as spin-polarized from its leading axis",
            base
        );
    } else {
        debug!("density of shape {:?} taken as unpolarized", base);
    }

    polarized
}
