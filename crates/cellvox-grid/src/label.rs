//! Dense label grid: one object identifier per voxel.

use crate::{GridDims, VoxelMask};

/// A dense 3D grid of object labels.
///
/// Label 0 means "no object"; any positive value identifies one object.
/// Labels are assigned during generation and never reused within one grid.
///
/// Out-of-bounds reads return 0 and out-of-bounds writes are no-ops.
///
/// # Example
///
/// ```
/// use cellvox_grid::{GridDims, LabelGrid};
///
/// let mut labels = LabelGrid::new(GridDims::cubic(8));
/// labels.set(1, 2, 3, 7);
///
/// assert_eq!(labels.get(1, 2, 3), 7);
/// assert_eq!(labels.get(100, 0, 0), 0); // out of bounds reads as empty
/// assert_eq!(labels.max_label(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelGrid {
    dims: GridDims,
    data: Vec<u32>,
}

impl LabelGrid {
    /// Creates a grid with every voxel unlabeled.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            data: vec![0; dims.volume()],
        }
    }

    /// Grid extents.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Label at `(x, y, z)`, or 0 if out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> u32 {
        if self.dims.contains(x, y, z) {
            self.data[self.dims.index(x, y, z)]
        } else {
            0
        }
    }

    /// Sets the label at `(x, y, z)`. Does nothing if out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, label: u32) {
        if self.dims.contains(x, y, z) {
            let idx = self.dims.index(x, y, z);
            self.data[idx] = label;
        }
    }

    /// Largest label value present, or 0 for an all-background grid.
    #[must_use]
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Number of voxels carrying `label`.
    #[must_use]
    pub fn count_of(&self, label: u32) -> usize {
        self.data.iter().filter(|&&v| v == label).count()
    }

    /// Binary indicator mask for one label value.
    ///
    /// The mask is true exactly where the grid holds `label`, so
    /// `indicator(0)` selects the background.
    #[must_use]
    pub fn indicator(&self, label: u32) -> VoxelMask {
        VoxelMask::from_fn(self.dims, |idx| self.data[idx] == label)
    }

    /// Occupancy mask: true wherever any object is present.
    ///
    /// # Example
    ///
    /// ```
    /// use cellvox_grid::{GridDims, LabelGrid};
    ///
    /// let mut labels = LabelGrid::new(GridDims::cubic(4));
    /// labels.set(0, 0, 0, 3);
    /// labels.set(1, 0, 0, 5);
    ///
    /// assert_eq!(labels.occupancy().count(), 2);
    /// ```
    #[must_use]
    pub fn occupancy(&self) -> VoxelMask {
        VoxelMask::from_fn(self.dims, |idx| self.data[idx] != 0)
    }

    /// Raw voxel values in row-major order, x fastest.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }
}
