//! Grid extents and linear indexing.

use std::fmt;

/// Extents of a dense voxel grid.
///
/// Values are stored in row-major order with x varying fastest, then y, then
/// z, matching `index = x + y * nx + z * nx * ny`.
///
/// # Example
///
/// ```
/// use cellvox_grid::GridDims;
///
/// let dims = GridDims::new(4, 3, 2);
/// assert_eq!(dims.volume(), 24);
/// assert_eq!(dims.index(1, 2, 0), 9);
/// assert!(dims.contains(3, 2, 1));
/// assert!(!dims.contains(4, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    /// Extent along the x axis.
    pub nx: usize,
    /// Extent along the y axis.
    pub ny: usize,
    /// Extent along the z axis.
    pub nz: usize,
}

impl GridDims {
    /// Creates new grid extents.
    #[must_use]
    pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Creates cubic extents with the same side length on every axis.
    ///
    /// # Example
    ///
    /// ```
    /// use cellvox_grid::GridDims;
    ///
    /// assert_eq!(GridDims::cubic(20), GridDims::new(20, 20, 20));
    /// ```
    #[must_use]
    pub const fn cubic(side: usize) -> Self {
        Self::new(side, side, side)
    }

    /// Creates a 2D grid: a single-slice 3D grid with `nz == 1`.
    #[must_use]
    pub const fn plane(nx: usize, ny: usize) -> Self {
        Self::new(nx, ny, 1)
    }

    /// Total number of voxels.
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Returns `true` if the grid holds no voxels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    /// Checks whether `(x, y, z)` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.nx && y < self.ny && z < self.nz
    }

    /// Converts `(x, y, z)` to a linear index.
    ///
    /// The coordinate must lie inside the grid; use [`GridDims::contains`]
    /// to check first.
    #[must_use]
    pub const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.nx + z * self.nx * self.ny
    }

    /// Converts a linear index back to `(x, y, z)`.
    #[must_use]
    pub const fn coords(&self, index: usize) -> (usize, usize, usize) {
        let x = index % self.nx;
        let y = (index / self.nx) % self.ny;
        let z = index / (self.nx * self.ny);
        (x, y, z)
    }

    /// Returns an iterator over all coordinates, x varying fastest.
    ///
    /// # Example
    ///
    /// ```
    /// use cellvox_grid::GridDims;
    ///
    /// let coords: Vec<_> = GridDims::new(2, 2, 1).iter().collect();
    /// assert_eq!(coords, vec![(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 0)]);
    /// ```
    #[must_use]
    pub const fn iter(&self) -> DimsIter {
        DimsIter {
            dims: *self,
            next: 0,
        }
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

impl IntoIterator for GridDims {
    type Item = (usize, usize, usize);
    type IntoIter = DimsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over all coordinates of a [`GridDims`].
#[derive(Debug, Clone)]
pub struct DimsIter {
    dims: GridDims,
    next: usize,
}

impl Iterator for DimsIter {
    type Item = (usize, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.dims.volume() {
            return None;
        }
        let coords = self.dims.coords(self.next);
        self.next += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dims.volume() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DimsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_and_contains() {
        let dims = GridDims::new(4, 3, 2);
        assert_eq!(dims.volume(), 24);
        assert!(dims.contains(3, 2, 1));
        assert!(!dims.contains(4, 2, 1));
        assert!(!dims.contains(0, 3, 0));
        assert!(!dims.contains(0, 0, 2));
    }

    #[test]
    fn index_roundtrip() {
        let dims = GridDims::new(5, 7, 3);
        for (x, y, z) in dims.iter() {
            assert_eq!(dims.coords(dims.index(x, y, z)), (x, y, z));
        }
    }

    #[test]
    fn iter_order_x_fastest() {
        let dims = GridDims::new(2, 2, 2);
        let coords: Vec<_> = dims.iter().collect();
        assert_eq!(coords[0], (0, 0, 0));
        assert_eq!(coords[1], (1, 0, 0));
        assert_eq!(coords[2], (0, 1, 0));
        assert_eq!(coords[4], (0, 0, 1));
        assert_eq!(coords.len(), 8);
    }

    #[test]
    fn iter_exact_size() {
        let dims = GridDims::new(3, 4, 5);
        assert_eq!(dims.iter().len(), 60);
    }

    #[test]
    fn empty_dims() {
        let dims = GridDims::new(0, 10, 10);
        assert!(dims.is_empty());
        assert_eq!(dims.iter().count(), 0);
    }

    #[test]
    fn plane_is_single_slice() {
        let dims = GridDims::plane(8, 6);
        assert_eq!(dims.nz, 1);
        assert_eq!(dims.volume(), 48);
    }

    #[test]
    fn display() {
        assert_eq!(GridDims::new(1, 2, 3).to_string(), "1x2x3");
    }
}
