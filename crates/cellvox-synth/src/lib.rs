//! Random ellipsoid packing for synthetic segmented cell geometries.
//!
//! Produces [`LabelGrid`](cellvox_grid::LabelGrid)s populated with randomly
//! placed, sized, and per-axis-deformed ellipsoids, one label per object.
//! Later objects overwrite earlier ones on overlap; there is no collision
//! avoidance, matching the behavior of the notebooks this replaces.
//!
//! # Example
//!
//! ```
//! use cellvox_synth::{SynthParams, synthesize};
//!
//! let params = SynthParams::default()
//!     .with_side(24)
//!     .with_cell_count(3)
//!     .with_max_radius(5.0)
//!     .with_seed(42);
//!
//! let labels = synthesize(&params);
//! assert!(labels.max_label() <= 3);
//!
//! // Same seed, same grid.
//! assert_eq!(labels, synthesize(&params));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod ellipsoid;
mod params;
mod synth;

pub use ellipsoid::Ellipsoid;
pub use params::SynthParams;
pub use synth::{place, synthesize};
