//! Multi-page image stack export for segmented cell geometries.
//!
//! A [`CompartmentGrid`](cellvox_grid::CompartmentGrid) is serialized as a
//! multi-page 8-bit grayscale TIFF: one page per z-slice, one byte per
//! voxel holding the compartment code (0 outside, 1 interior, 2 membrane).
//! The format is the baseline little-endian subset, uncompressed and one
//! strip per page, so any TIFF reader can open the output without plugins.
//!
//! # Example
//!
//! ```no_run
//! use cellvox_grid::{CompartmentGrid, GridDims};
//! use cellvox_io::{load_compartment_stack, save_compartment_stack};
//!
//! let grid = CompartmentGrid::new(GridDims::cubic(16));
//! save_compartment_stack(&grid, "geometry.tif")?;
//!
//! let reloaded = load_compartment_stack("geometry.tif")?;
//! assert_eq!(reloaded, grid);
//! # Ok::<(), cellvox_io::IoError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod stack;
mod tiff;

pub use error::{IoError, IoResult};
pub use stack::ImageStack;
pub use tiff::{
    load_compartment_stack, load_stack, read_stack, save_compartment_stack, save_stack,
    write_stack,
};
