//! Kanon Core: the deterministic data model and domain encoder underneath
//! k-anonymization search.
//!
//! # API Surface
//!
//! - [`table::Table`] -- the typed columnar store every other crate in this
//!   workspace reads from and writes back to.
//! - [`group_by::group_by`] -- the single canonical grouping utility.
//! - [`domain::encode`] / [`domain::EncodedTable`] -- the domain encoder:
//!   flattens per-attribute domains into one contiguous integer enumeration
//!   and encodes/decodes rows against it.
//! - [`label`] -- the `{v1; v2; ...}` generalization wire format shared by
//!   the encoder, the diversity post-processor, and the resamplers.
//! - [`stats::current_k`] -- `get_k`: minimum QI equivalence-class size.
//!
//! # Module dependency direction
//!
//! `error` ← `table` ← `group_by` ← `domain`, `stats`
//!
//! One-way only. No cycles.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod domain;
pub mod error;
pub mod group_by;
pub mod label;
pub mod stats;
pub mod table;

pub use error::CoreError;
pub use table::Table;
