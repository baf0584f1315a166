//! Shared error taxonomy for the table and domain-encoding layer.

use thiserror::Error;

/// Typed failure for table and domain-encoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A row or column did not match the table's declared schema width.
    #[error("schema mismatch: expected {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    /// A referenced column name is not present in the table's schema.
    #[error("unknown attribute: {attribute}")]
    UnknownAttribute { attribute: String },

    /// An attribute's domain (distinct values) is empty -- it has no rows,
    /// or none of its groups retained any members.
    #[error("attribute domain is empty")]
    EmptyDomain,
}
