//! Kanon Search: optimal k-anonymization via Bayardo-style branch-and-bound.
//!
//! This crate provides the search layer for the anonymization
//! pipeline. It depends only on `kanon_core` -- it does NOT depend on
//! `kanon_driver`.
//!
//! # Crate dependency graph
//!
//! ```text
//! kanon_core  ←  kanon_search  ←  kanon_driver
//! (domain encoding)  (branch-and-bound)  (partitioning, persistence)
//! ```
//!
//! # Key types
//!
//! - [`anonymizer::Anonymizer`] -- runs the search for a single QI domain
//!   and `k`, and decodes the winning head-set into output rows.
//! - [`cost::generate_eq_classes`] / [`cost::compute_cost`] /
//!   [`cost::compute_lower_bound`] -- the discernibility metric and its
//!   branch-and-bound lower bound.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod anonymizer;
pub mod cost;
pub mod error;

pub use anonymizer::{Anonymizer, AnonymizationResult};
pub use error::SearchError;
