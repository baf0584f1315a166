//! Typed driver errors, covering configuration, persistence, and the
//! upstream core/search failure taxonomies the driver wraps.

use thiserror::Error;

/// Typed failure for the partitioned driver and its persisted-file surface.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The quasi-identifier set and the grouping-key set overlap, or a
    /// `mode`/`qi` string did not match a known configuration.
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    /// The requested `k` fell outside `[1, k_max]`. Mirrors
    /// [`kanon_search::SearchError::KOutOfRange`] for the suppression-only
    /// path, which never constructs a `kanon_search::Anonymizer` and so
    /// cannot surface that error directly.
    #[error("k must be in [1, {k_max}], got {k}")]
    InvalidK { k: usize, k_max: usize },

    /// A failure from the underlying domain encoder or table operations.
    #[error(transparent)]
    Core(#[from] kanon_core::CoreError),

    /// A failure from the underlying branch-and-bound search.
    #[error(transparent)]
    Search(#[from] kanon_search::SearchError),

    /// A persisted-file read or write failed at the filesystem boundary.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// `setup.json` failed to serialize or deserialize.
    #[error("setup.json failure: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV read or write (`K{k}L{l}.csv`, `experiments.csv`) failed.
    #[error("CSV failure: {0}")]
    Csv(#[from] csv::Error),
}
