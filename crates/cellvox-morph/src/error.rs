//! Error types for morphological operations.

use cellvox_grid::GridError;

/// Result type for morphological operations.
pub type MorphResult<T> = Result<T, MorphError>;

/// Errors that can occur during membrane extraction or classification.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MorphError {
    /// The label grid and mask shapes do not match.
    #[error(transparent)]
    Grid(#[from] GridError),
}
