//! Typed search errors.

use thiserror::Error;

/// Typed failure for the branch-and-bound search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `k` was outside `[1, k_max]`, where `k_max` is the row count of the
    /// encoded table.
    #[error("k must be in [1, {k_max}], got {k}")]
    KOutOfRange { k: usize, k_max: usize },
}
