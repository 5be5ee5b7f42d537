//! Compartment classification of a labeled grid plus membrane mask.

use cellvox_grid::{Compartment, CompartmentGrid, GridError, LabelGrid, VoxelMask};
use tracing::debug;

use crate::MorphResult;

/// Classifies every voxel as outside, cell interior, or membrane.
///
/// A voxel is membrane if flagged in the mask, interior if it carries a
/// nonzero label and is not flagged, and outside otherwise. Membrane takes
/// precedence wherever both conditions would apply, so interior and membrane
/// are mutually exclusive in the result.
///
/// # Errors
///
/// Returns [`MorphError::Grid`](crate::MorphError::Grid) if the label grid
/// and membrane mask shapes differ.
///
/// # Example
///
/// ```
/// use cellvox_grid::{Compartment, GridDims, LabelGrid, VoxelMask};
/// use cellvox_morph::classify;
///
/// let mut labels = LabelGrid::new(GridDims::cubic(4));
/// labels.set(1, 1, 1, 1);
/// let mut membrane = VoxelMask::new(GridDims::cubic(4));
/// membrane.set(2, 1, 1, true);
///
/// let compartments = classify(&labels, &membrane).unwrap();
/// assert_eq!(compartments.get(1, 1, 1), Compartment::Interior);
/// assert_eq!(compartments.get(2, 1, 1), Compartment::Membrane);
/// assert_eq!(compartments.get(0, 0, 0), Compartment::Outside);
/// ```
pub fn classify(labels: &LabelGrid, membrane: &VoxelMask) -> MorphResult<CompartmentGrid> {
    let dims = labels.dims();
    if dims != membrane.dims() {
        return Err(GridError::ShapeMismatch {
            expected: dims,
            got: membrane.dims(),
        }
        .into());
    }

    let mut out = CompartmentGrid::new(dims);
    for (idx, (&label, &flagged)) in labels
        .as_slice()
        .iter()
        .zip(membrane.as_slice())
        .enumerate()
    {
        let value = if flagged {
            Compartment::Membrane
        } else if label != 0 {
            Compartment::Interior
        } else {
            Compartment::Outside
        };
        if value != Compartment::Outside {
            let (x, y, z) = dims.coords(idx);
            out.set(x, y, z, value);
        }
    }

    let counts = out.counts();
    debug!(
        "classified {}: {} interior, {} membrane, {} outside",
        dims, counts.interior, counts.membrane, counts.outside
    );
    Ok(out)
}
