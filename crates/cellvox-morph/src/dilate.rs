//! Binary dilation of voxel masks.

// Coordinate arithmetic mixes usize indices with signed neighbor offsets;
// grids anywhere near i64 range are far beyond addressable memory.
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use cellvox_grid::VoxelMask;

use crate::StructuringElement;

/// One binary dilation pass.
///
/// Every voxel within one structuring-element step of a set voxel becomes
/// set. The grid boundary clamps: dilation never wraps around edges.
///
/// # Example
///
/// ```
/// use cellvox_grid::{GridDims, VoxelMask};
/// use cellvox_morph::{StructuringElement, dilate};
///
/// let mut mask = VoxelMask::new(GridDims::cubic(5));
/// mask.set(2, 2, 2, true);
///
/// let grown = dilate(&mask, StructuringElement::Face);
/// assert_eq!(grown.count(), 7); // center plus 6 face neighbors
/// ```
#[must_use]
pub fn dilate(mask: &VoxelMask, element: StructuringElement) -> VoxelMask {
    let mut out = mask.clone();
    for (x, y, z) in mask.iter_set() {
        for &(dx, dy, dz) in element.offsets() {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            let nz = z as i64 + dz;
            if nx >= 0 && ny >= 0 && nz >= 0 {
                // Out-of-range high coordinates are dropped by the mask itself.
                out.set(nx as usize, ny as usize, nz as usize, true);
            }
        }
    }
    out
}

/// Iterated dilation of fixed depth.
///
/// `iterations == 0` returns the mask unchanged. Used for thicker membranes,
/// the conventional choice for single-slice (2D) geometries.
#[must_use]
pub fn dilate_n(mask: &VoxelMask, element: StructuringElement, iterations: usize) -> VoxelMask {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    out
}
