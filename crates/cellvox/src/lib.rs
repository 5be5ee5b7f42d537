//! Synthetic cell geometry generation for spatial simulation engines.
//!
//! `cellvox` generates random segmented cell geometries on dense voxel
//! grids: ellipsoidal cells are packed into a label grid, each cell gets a
//! one-voxel (or thicker) membrane shell by morphological dilation, and the
//! result is classified into three compartments the downstream simulation
//! understands:
//!
//! | value | compartment |
//! |-------|-------------|
//! | 0     | outside     |
//! | 1     | interior    |
//! | 2     | membrane    |
//!
//! The segmentation exports as a multi-page 8-bit TIFF, one page per
//! z-slice.
//!
//! This crate is the facade over the pipeline crates:
//!
//! - [`cellvox_grid`] - grid data model (labels, masks, compartments)
//! - [`cellvox_synth`] - random ellipsoid placement
//! - [`cellvox_morph`] - dilation, membrane extraction, classification
//! - [`cellvox_io`] - TIFF stack export
//!
//! # Example
//!
//! ```no_run
//! use cellvox::GeometryBuilder;
//!
//! let geometry = GeometryBuilder::new()
//!     .side(40)
//!     .cell_count(6)
//!     .max_radius(8.0)
//!     .seed(1)
//!     .build()?;
//!
//! println!("{:?}", geometry.counts());
//! geometry.export("cells.tif")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod builder;

pub use builder::{CellGeometry, GeometryBuilder};

pub use cellvox_grid::{
    Compartment, CompartmentCounts, CompartmentGrid, GridDims, GridError, LabelGrid, VoxelMask,
};
pub use cellvox_io::{ImageStack, IoError, IoResult, load_compartment_stack, save_compartment_stack};
pub use cellvox_morph::{
    MembraneParams, MorphError, MorphResult, StructuringElement, classify, dilate, dilate_n,
    extract_membrane,
};
pub use cellvox_synth::{Ellipsoid, SynthParams, place, synthesize};
