//! Typed diversity post-processor errors.

use thiserror::Error;

/// Typed failure for the l-diversity post-processor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiversityError {
    /// The table-wide sensitive-attribute diversity is below the requested
    /// `l`; no amount of merging can manufacture distinct values that do not
    /// exist in the data.
    #[error("maximal diversity is {available}, but l = {required}")]
    InsufficientDiversity { available: usize, required: usize },

    /// A failure from the underlying table or grouping layer.
    #[error(transparent)]
    Core(#[from] kanon_core::CoreError),
}
