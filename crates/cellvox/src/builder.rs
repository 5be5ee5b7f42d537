//! Fluent builder API for the full geometry pipeline.
//!
//! # Example
//!
//! ```
//! use cellvox::GeometryBuilder;
//!
//! let geometry = GeometryBuilder::new()
//!     .side(24)
//!     .cell_count(3)
//!     .max_radius(5.0)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let counts = geometry.counts();
//! assert_eq!(counts.total(), 24 * 24 * 24);
//! ```

use std::path::Path;

use cellvox_grid::{CompartmentCounts, CompartmentGrid, GridDims, LabelGrid, VoxelMask};
use cellvox_io::{IoResult, save_compartment_stack};
use cellvox_morph::{MembraneParams, MorphResult, StructuringElement, classify, extract_membrane};
use cellvox_synth::{SynthParams, synthesize};
use tracing::info;

/// Result of a full pipeline run: every intermediate stage plus the final
/// segmentation.
#[derive(Debug, Clone)]
pub struct CellGeometry {
    /// Synthesized label grid, one value per voxel, 0 for background.
    pub labels: LabelGrid,
    /// Union of all per-label membrane shells.
    pub membrane: VoxelMask,
    /// Three-phase segmentation.
    pub compartments: CompartmentGrid,
}

impl CellGeometry {
    /// Grid extents.
    #[must_use]
    pub fn dims(&self) -> GridDims {
        self.compartments.dims()
    }

    /// Per-class voxel counts of the final segmentation.
    #[must_use]
    pub fn counts(&self) -> CompartmentCounts {
        self.compartments.counts()
    }

    /// Writes the segmentation as a multi-page 8-bit TIFF, one page per
    /// z-slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the grid does not
    /// fit the format's 32-bit offsets.
    pub fn export(&self, path: impl AsRef<Path>) -> IoResult<()> {
        save_compartment_stack(&self.compartments, path)
    }
}

/// Fluent builder for generating a [`CellGeometry`].
///
/// Chains synthesis and membrane configuration, then runs the pipeline:
/// random ellipsoid placement, per-label membrane extraction, and
/// three-phase classification.
///
/// # Example
///
/// ```no_run
/// use cellvox::{GeometryBuilder, StructuringElement};
///
/// let geometry = GeometryBuilder::new()
///     .dims(64, 64, 32)
///     .cell_count(10)
///     .max_radius(9.0)
///     .max_deformation(1.4)
///     .element(StructuringElement::Face)
///     .membrane_iterations(2)
///     .seed(7)
///     .build()?;
///
/// geometry.export("cells.tif")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    synth: SynthParams,
    membrane: MembraneParams,
}

impl GeometryBuilder {
    /// Creates a builder with default synthesis and membrane parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            synth: SynthParams::default(),
            membrane: MembraneParams::default(),
        }
    }

    /// Set the grid extents.
    #[must_use]
    pub const fn dims(mut self, nx: usize, ny: usize, nz: usize) -> Self {
        self.synth = self.synth.with_dims(GridDims::new(nx, ny, nz));
        self
    }

    /// Set cubic grid extents with the given side length.
    #[must_use]
    pub const fn side(mut self, side: usize) -> Self {
        self.synth = self.synth.with_side(side);
        self
    }

    /// Set the number of cells to place.
    #[must_use]
    pub const fn cell_count(mut self, count: u32) -> Self {
        self.synth = self.synth.with_cell_count(count);
        self
    }

    /// Set the maximum cell radius in voxels.
    #[must_use]
    pub const fn max_radius(mut self, radius: f64) -> Self {
        self.synth = self.synth.with_max_radius(radius);
        self
    }

    /// Set the maximum per-axis deformation factor.
    #[must_use]
    pub const fn max_deformation(mut self, factor: f64) -> Self {
        self.synth = self.synth.with_max_deformation(factor);
        self
    }

    /// Set a random seed for reproducible geometry.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.synth = self.synth.with_seed(seed);
        self
    }

    /// Set the dilation neighborhood for membrane extraction.
    #[must_use]
    pub const fn element(mut self, element: StructuringElement) -> Self {
        self.membrane = self.membrane.with_element(element);
        self
    }

    /// Set the number of dilation passes per membrane shell.
    #[must_use]
    pub const fn membrane_iterations(mut self, iterations: usize) -> Self {
        self.membrane = self.membrane.with_iterations(iterations);
        self
    }

    /// Runs the pipeline with the configured parameters.
    ///
    /// # Errors
    ///
    /// Classification fails only on an internal shape mismatch between the
    /// label grid and its membrane mask, which the pipeline rules out by
    /// construction; the `Result` is kept so callers compose with `?`.
    pub fn build(self) -> MorphResult<CellGeometry> {
        info!(
            dims = %self.synth.dims,
            cells = self.synth.cell_count,
            "generating cell geometry"
        );

        let labels = synthesize(&self.synth);
        let membrane = extract_membrane(&labels, &self.membrane);
        let compartments = classify(&labels, &membrane)?;

        let counts = compartments.counts();
        info!(
            interior = counts.interior,
            membrane = counts.membrane,
            outside = counts.outside,
            "cell geometry complete"
        );

        Ok(CellGeometry {
            labels,
            membrane,
            compartments,
        })
    }

    /// Runs the pipeline and exports the segmentation in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if classification or the file write fails.
    pub fn build_and_export(
        self,
        path: impl AsRef<Path>,
    ) -> Result<CellGeometry, Box<dyn std::error::Error>> {
        let geometry = self.build()?;
        geometry.export(path)?;
        Ok(geometry)
    }
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cellvox_grid::Compartment;

    #[test]
    fn builder_defaults() {
        let builder = GeometryBuilder::new();
        assert_eq!(builder.synth, SynthParams::default());
        assert_eq!(builder.membrane.element, StructuringElement::Full);
        assert_eq!(builder.membrane.iterations, 1);
    }

    #[test]
    fn builder_chaining() {
        let builder = GeometryBuilder::new()
            .dims(10, 12, 14)
            .cell_count(4)
            .max_radius(3.0)
            .max_deformation(1.2)
            .element(StructuringElement::Face)
            .membrane_iterations(2)
            .seed(9);

        assert_eq!(builder.synth.dims, GridDims::new(10, 12, 14));
        assert_eq!(builder.synth.cell_count, 4);
        assert_eq!(builder.synth.seed, Some(9));
        assert_eq!(builder.membrane.element, StructuringElement::Face);
        assert_eq!(builder.membrane.iterations, 2);
    }

    #[test]
    fn build_produces_consistent_bundle() {
        let geometry = GeometryBuilder::new()
            .side(16)
            .cell_count(2)
            .max_radius(4.0)
            .seed(11)
            .build()
            .unwrap();

        assert_eq!(geometry.dims(), GridDims::cubic(16));
        assert_eq!(geometry.labels.dims(), geometry.compartments.dims());
        assert_eq!(geometry.counts().total(), 16 * 16 * 16);

        // Membrane voxels in the mask are membrane in the segmentation.
        for (i, &value) in geometry.compartments.as_slice().iter().enumerate() {
            if geometry.membrane.as_slice()[i] {
                assert_eq!(value, Compartment::Membrane);
            }
        }
    }

    #[test]
    fn zero_cells_gives_empty_geometry() {
        let geometry = GeometryBuilder::new()
            .side(8)
            .cell_count(0)
            .seed(1)
            .build()
            .unwrap();

        let counts = geometry.counts();
        assert_eq!(counts.outside, 512);
        assert_eq!(counts.interior, 0);
        assert_eq!(counts.membrane, 0);
    }
}
