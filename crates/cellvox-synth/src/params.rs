//! Synthesis parameters.

use cellvox_grid::GridDims;

/// Configuration for geometry synthesis.
///
/// Per sampled object: the center is uniform within an inset margin of
/// `max_radius` from every grid face, the radius is uniform in
/// `[max_radius / 2, max_radius]`, and each axis gets an independent
/// deformation factor uniform in `[1 / max_deformation, max_deformation]`.
///
/// Degenerate values (zero radius, deformation at or below 1) are tolerated
/// silently: they narrow the sampled ranges, never error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynthParams {
    /// Grid extents.
    pub dims: GridDims,
    /// Number of objects to place; labels run `1..=cell_count`.
    pub cell_count: u32,
    /// Upper bound of the sampled radius, in voxels.
    pub max_radius: f64,
    /// Upper bound of the per-axis deformation factor.
    pub max_deformation: f64,
    /// Seed for reproducible sampling; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            dims: GridDims::cubic(40),
            cell_count: 6,
            max_radius: 8.0,
            max_deformation: 1.5,
            seed: None,
        }
    }
}

impl SynthParams {
    /// Create parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid extents.
    #[must_use]
    pub const fn with_dims(mut self, dims: GridDims) -> Self {
        self.dims = dims;
        self
    }

    /// Set cubic grid extents with the given side length.
    #[must_use]
    pub const fn with_side(mut self, side: usize) -> Self {
        self.dims = GridDims::cubic(side);
        self
    }

    /// Set the object count.
    #[must_use]
    pub const fn with_cell_count(mut self, cell_count: u32) -> Self {
        self.cell_count = cell_count;
        self
    }

    /// Set the maximum radius in voxels.
    #[must_use]
    pub const fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Set the maximum per-axis deformation factor.
    #[must_use]
    pub const fn with_max_deformation(mut self, max_deformation: f64) -> Self {
        self.max_deformation = max_deformation;
        self
    }

    /// Set a random seed for reproducibility.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
