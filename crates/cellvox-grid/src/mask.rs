//! Dense boolean voxel mask.

use crate::{GridDims, GridError};

/// A dense 3D boolean mask.
///
/// Used as a label indicator during membrane extraction and as the membrane
/// mask itself. Out-of-bounds reads return `false` and out-of-bounds writes
/// are no-ops.
///
/// # Example
///
/// ```
/// use cellvox_grid::{GridDims, VoxelMask};
///
/// let mut mask = VoxelMask::new(GridDims::cubic(4));
/// mask.set(1, 1, 1, true);
///
/// assert!(mask.get(1, 1, 1));
/// assert_eq!(mask.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelMask {
    dims: GridDims,
    data: Vec<bool>,
}

impl VoxelMask {
    /// Creates an all-false mask.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            data: vec![false; dims.volume()],
        }
    }

    /// Creates a mask by evaluating a predicate on every linear index.
    #[must_use]
    pub fn from_fn<F: FnMut(usize) -> bool>(dims: GridDims, mut f: F) -> Self {
        Self {
            dims,
            data: (0..dims.volume()).map(|idx| f(idx)).collect(),
        }
    }

    /// Grid extents.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Value at `(x, y, z)`, or `false` if out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.dims.contains(x, y, z) && self.data[self.dims.index(x, y, z)]
    }

    /// Sets the value at `(x, y, z)`. Does nothing if out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: bool) {
        if self.dims.contains(x, y, z) {
            let idx = self.dims.index(x, y, z);
            self.data[idx] = value;
        }
    }

    /// Number of set voxels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Returns `true` if any voxel is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    /// In-place logical OR with another mask of the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if the shapes differ.
    pub fn union_with(&mut self, other: &Self) -> Result<(), GridError> {
        self.check_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a |= b;
        }
        Ok(())
    }

    /// Voxel-wise XOR, marking voxels whose state differs between the masks.
    ///
    /// This is the boundary-detection primitive: dilating an indicator and
    /// XORing with the original yields the shell of changed voxels.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if the shapes differ.
    pub fn xor(&self, other: &Self) -> Result<Self, GridError> {
        self.check_shape(other)?;
        Ok(Self {
            dims: self.dims,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| a != b)
                .collect(),
        })
    }

    /// Iterator over the coordinates of set voxels, x fastest.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(idx, _)| self.dims.coords(idx))
    }

    /// Raw values in row-major order, x fastest.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    fn check_shape(&self, other: &Self) -> Result<(), GridError> {
        if self.dims == other.dims {
            Ok(())
        } else {
            Err(GridError::ShapeMismatch {
                expected: self.dims,
                got: other.dims,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mask_is_clear() {
        let mask = VoxelMask::new(GridDims::cubic(4));
        assert_eq!(mask.count(), 0);
        assert!(!mask.any());
    }

    #[test]
    fn set_get_count() {
        let mut mask = VoxelMask::new(GridDims::new(3, 3, 3));
        mask.set(0, 1, 2, true);
        mask.set(2, 2, 2, true);
        assert!(mask.get(0, 1, 2));
        assert!(!mask.get(0, 0, 0));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn out_of_bounds_reads_false() {
        let mut mask = VoxelMask::new(GridDims::cubic(2));
        mask.set(9, 9, 9, true);
        assert!(!mask.get(9, 9, 9));
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn union_accumulates() {
        let dims = GridDims::cubic(3);
        let mut a = VoxelMask::new(dims);
        a.set(0, 0, 0, true);
        let mut b = VoxelMask::new(dims);
        b.set(1, 1, 1, true);
        b.set(0, 0, 0, true);

        a.union_with(&b).unwrap();
        assert_eq!(a.count(), 2);
    }

    #[test]
    fn xor_marks_differences() {
        let dims = GridDims::cubic(2);
        let mut a = VoxelMask::new(dims);
        a.set(0, 0, 0, true);
        a.set(1, 0, 0, true);
        let mut b = VoxelMask::new(dims);
        b.set(1, 0, 0, true);
        b.set(0, 1, 0, true);

        let diff = a.xor(&b).unwrap();
        assert!(diff.get(0, 0, 0));
        assert!(diff.get(0, 1, 0));
        assert!(!diff.get(1, 0, 0));
        assert_eq!(diff.count(), 2);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let mut a = VoxelMask::new(GridDims::cubic(2));
        let b = VoxelMask::new(GridDims::cubic(3));
        assert!(matches!(
            a.union_with(&b),
            Err(GridError::ShapeMismatch { .. })
        ));
        assert!(matches!(a.xor(&b), Err(GridError::ShapeMismatch { .. })));
    }

    #[test]
    fn iter_set_yields_coords() {
        let mut mask = VoxelMask::new(GridDims::new(4, 4, 4));
        mask.set(1, 2, 3, true);
        let coords: Vec<_> = mask.iter_set().collect();
        assert_eq!(coords, vec![(1, 2, 3)]);
    }
}
