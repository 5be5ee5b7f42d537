//! Error types for grid operations.

use crate::GridDims;

/// Errors that can occur when combining or decoding grids.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GridError {
    /// Two grids that must share a shape do not.
    #[error("grid shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Shape of the grid the operation was called on.
        expected: GridDims,
        /// Shape of the grid passed in.
        got: GridDims,
    },

    /// A byte value does not encode a compartment.
    #[error("invalid compartment value {0}, expected 0, 1 or 2")]
    InvalidCompartment(u8),
}
