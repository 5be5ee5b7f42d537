//! Morphological operations for segmented cell geometries.
//!
//! This crate turns a [`LabelGrid`](cellvox_grid::LabelGrid) into the
//! three-phase segmentation handed to a spatial simulation engine:
//!
//! 1. [`dilate`] / [`dilate_n`] - binary dilation of a voxel mask
//! 2. [`extract_membrane`] - per-label dilation shells, unioned
//! 3. [`classify`] - outside / interior / membrane compartment grid
//!
//! # Membrane Semantics
//!
//! Each label's shell is computed from its own indicator mask, independent of
//! neighboring objects, so two adjacent cells each get their own membrane
//! ring rather than a single shared one. The background (label 0) is
//! iterated like any other value; its pass marks the object-side rim of
//! every boundary, giving membranes that cover the outer voxel layer of each
//! cell as well as the first layer outside it.
//!
//! # Example
//!
//! ```
//! use cellvox_grid::{Compartment, GridDims, LabelGrid};
//! use cellvox_morph::{MembraneParams, classify, extract_membrane};
//!
//! let mut labels = LabelGrid::new(GridDims::cubic(8));
//! labels.set(4, 4, 4, 1);
//!
//! let membrane = extract_membrane(&labels, &MembraneParams::default());
//! let compartments = classify(&labels, &membrane).unwrap();
//!
//! // A single voxel is all boundary: it is claimed by membrane.
//! assert_eq!(compartments.get(4, 4, 4), Compartment::Membrane);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod classify;
mod dilate;
mod element;
mod error;
mod membrane;

pub use classify::classify;
pub use dilate::{dilate, dilate_n};
pub use element::StructuringElement;
pub use error::{MorphError, MorphResult};
pub use membrane::{MembraneParams, extract_membrane};
