//! Dense voxel grid data model for segmented cell geometries.
//!
//! This crate provides the grid types shared across the cellvox pipeline:
//!
//! - [`GridDims`] - Grid extents with row-major linear indexing
//! - [`LabelGrid`] - One object identifier per voxel (0 = no object)
//! - [`VoxelMask`] - Dense boolean mask, same shape as a label grid
//! - [`CompartmentGrid`] - Three-phase segmentation (outside/interior/membrane)
//!
//! # Coordinate System
//!
//! Voxels are addressed by `(x, y, z)` indices with x varying fastest in
//! memory. A 2D grid is a 3D grid with `nz == 1`.
//!
//! # Out-of-Bounds Policy
//!
//! Reads outside the grid return the empty value (label 0, mask false) and
//! writes outside the grid are no-ops. Structural mismatches between grids of
//! different shapes are reported as [`GridError::ShapeMismatch`].
//!
//! # Example
//!
//! ```
//! use cellvox_grid::{Compartment, GridDims, LabelGrid};
//!
//! let dims = GridDims::cubic(16);
//! let mut labels = LabelGrid::new(dims);
//! labels.set(8, 8, 8, 1);
//!
//! assert_eq!(labels.get(8, 8, 8), 1);
//! assert_eq!(labels.max_label(), 1);
//! assert_eq!(labels.indicator(1).count(), 1);
//! assert_eq!(Compartment::Interior.as_u8(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod compartment;
mod dims;
mod error;
mod label;
mod mask;

pub use compartment::{Compartment, CompartmentCounts, CompartmentGrid};
pub use dims::{DimsIter, GridDims};
pub use error::GridError;
pub use label::LabelGrid;
pub use mask::VoxelMask;
