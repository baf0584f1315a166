//! Typed resampler errors.

use thiserror::Error;

/// Typed failure for the Cartesian and uniform resamplers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// A failure from the underlying table layer.
    #[error(transparent)]
    Core(#[from] kanon_core::CoreError),
}
