//! Kanon Diversity: the l-diversity post-processor for k-anonymized
//! tables, plus the `get_l_distinct` measurement helper the driver's sweep
//! bookkeeping depends on.
//!
//! This is a new crate with no module of its own elsewhere in the
//! workspace.
//!
//! # Key entry points
//!
//! - [`merge::post_process`] -- greedily merge minimum-diversity equivalence
//!   classes until every class reaches sensitive-attribute diversity `>= l`.
//! - [`l_distinct::l_distinct`] -- the minimum sensitive-attribute diversity
//!   across a table's QI equivalence classes (`get_l_distinct`).

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod l_distinct;
pub mod merge;

pub use error::DiversityError;
pub use l_distinct::l_distinct;
pub use merge::{post_process, post_process_weighted, DEFAULT_MERGE_WEIGHT};
