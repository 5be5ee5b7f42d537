//! Three-phase compartment segmentation.

use std::fmt;

use crate::{GridDims, GridError};

/// Semantic class of a voxel in the segmented geometry.
///
/// These are the three values the external simulation engine's
/// geometry-import routine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Compartment {
    /// No object: extracellular space.
    #[default]
    Outside = 0,
    /// Cell interior.
    Interior = 1,
    /// Membrane shell around a cell.
    Membrane = 2,
}

impl Compartment {
    /// Encoded byte value (0, 1 or 2).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decodes a byte value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCompartment`] for values above 2.
    pub const fn from_u8(value: u8) -> Result<Self, GridError> {
        match value {
            0 => Ok(Self::Outside),
            1 => Ok(Self::Interior),
            2 => Ok(Self::Membrane),
            other => Err(GridError::InvalidCompartment(other)),
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outside => write!(f, "outside"),
            Self::Interior => write!(f, "interior"),
            Self::Membrane => write!(f, "membrane"),
        }
    }
}

/// Per-class voxel counts of a [`CompartmentGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompartmentCounts {
    /// Voxels outside every cell.
    pub outside: usize,
    /// Cell-interior voxels.
    pub interior: usize,
    /// Membrane voxels.
    pub membrane: usize,
}

impl CompartmentCounts {
    /// Total voxel count.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.outside + self.interior + self.membrane
    }
}

/// Dense three-phase segmentation grid.
///
/// Every voxel holds exactly one [`Compartment`]; membrane and interior are
/// mutually exclusive by construction. This is the final product of the
/// pipeline, serialized as one 8-bit value per voxel.
///
/// # Example
///
/// ```
/// use cellvox_grid::{Compartment, CompartmentGrid, GridDims};
///
/// let mut grid = CompartmentGrid::new(GridDims::cubic(4));
/// grid.set(1, 1, 1, Compartment::Membrane);
///
/// assert_eq!(grid.get(1, 1, 1), Compartment::Membrane);
/// assert_eq!(grid.counts().membrane, 1);
/// assert_eq!(grid.counts().outside, 63);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompartmentGrid {
    dims: GridDims,
    data: Vec<Compartment>,
}

impl CompartmentGrid {
    /// Creates a grid with every voxel outside.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            data: vec![Compartment::Outside; dims.volume()],
        }
    }

    /// Grid extents.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Compartment at `(x, y, z)`, or [`Compartment::Outside`] out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Compartment {
        if self.dims.contains(x, y, z) {
            self.data[self.dims.index(x, y, z)]
        } else {
            Compartment::Outside
        }
    }

    /// Sets the compartment at `(x, y, z)`. Does nothing if out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: Compartment) {
        if self.dims.contains(x, y, z) {
            let idx = self.dims.index(x, y, z);
            self.data[idx] = value;
        }
    }

    /// Per-class voxel counts.
    #[must_use]
    pub fn counts(&self) -> CompartmentCounts {
        let mut counts = CompartmentCounts::default();
        for &value in &self.data {
            match value {
                Compartment::Outside => counts.outside += 1,
                Compartment::Interior => counts.interior += 1,
                Compartment::Membrane => counts.membrane += 1,
            }
        }
        counts
    }

    /// Encoded bytes in row-major order, x fastest: one 0/1/2 per voxel.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().map(|v| v.as_u8()).collect()
    }

    /// Rebuilds a grid from encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCompartment`] on a byte above 2 and
    /// [`GridError::ShapeMismatch`] if the byte count does not match `dims`.
    pub fn from_bytes(dims: GridDims, bytes: &[u8]) -> Result<Self, GridError> {
        if bytes.len() != dims.volume() {
            // Report the flat length as a 1D shape so the caller sees both sizes.
            return Err(GridError::ShapeMismatch {
                expected: dims,
                got: GridDims::new(bytes.len(), 1, 1),
            });
        }
        let data = bytes
            .iter()
            .map(|&b| Compartment::from_u8(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { dims, data })
    }

    /// Raw compartment values in row-major order, x fastest.
    #[must_use]
    pub fn as_slice(&self) -> &[Compartment] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compartment_codes() {
        assert_eq!(Compartment::Outside.as_u8(), 0);
        assert_eq!(Compartment::Interior.as_u8(), 1);
        assert_eq!(Compartment::Membrane.as_u8(), 2);
        assert_eq!(Compartment::from_u8(1).unwrap(), Compartment::Interior);
        assert!(matches!(
            Compartment::from_u8(3),
            Err(GridError::InvalidCompartment(3))
        ));
    }

    #[test]
    fn new_grid_is_outside() {
        let grid = CompartmentGrid::new(GridDims::cubic(3));
        let counts = grid.counts();
        assert_eq!(counts.outside, 27);
        assert_eq!(counts.interior, 0);
        assert_eq!(counts.membrane, 0);
        assert_eq!(counts.total(), 27);
    }

    #[test]
    fn set_get_counts() {
        let mut grid = CompartmentGrid::new(GridDims::cubic(2));
        grid.set(0, 0, 0, Compartment::Interior);
        grid.set(1, 0, 0, Compartment::Membrane);

        assert_eq!(grid.get(0, 0, 0), Compartment::Interior);
        let counts = grid.counts();
        assert_eq!(counts.interior, 1);
        assert_eq!(counts.membrane, 1);
        assert_eq!(counts.outside, 6);
    }

    #[test]
    fn bytes_roundtrip() {
        let mut grid = CompartmentGrid::new(GridDims::new(2, 2, 1));
        grid.set(0, 0, 0, Compartment::Membrane);
        grid.set(1, 1, 0, Compartment::Interior);

        let bytes = grid.to_bytes();
        assert_eq!(bytes, vec![2, 0, 0, 1]);

        let rebuilt = CompartmentGrid::from_bytes(grid.dims(), &bytes).unwrap();
        assert_eq!(rebuilt, grid);
    }

    #[test]
    fn from_bytes_rejects_bad_values() {
        let dims = GridDims::new(2, 1, 1);
        assert!(matches!(
            CompartmentGrid::from_bytes(dims, &[0, 7]),
            Err(GridError::InvalidCompartment(7))
        ));
        assert!(matches!(
            CompartmentGrid::from_bytes(dims, &[0, 1, 2]),
            Err(GridError::ShapeMismatch { .. })
        ));
    }
}
