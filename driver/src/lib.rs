//! Kanon Driver: the partitioned anonymization driver, the
//! `mode`/`qi` configuration surface, and the persisted-file contract
//! (`setup.json`, `K{k}L{l}.csv`, `experiments.csv`) an external sweep loop
//! consumes and produces.
//!
//! This crate does NOT parse `argv`, walk a results-directory tree, or drive
//! the multi-`k` sweep loop itself -- those remain an external driver
//! binary's job. It exposes everything such a loop needs: `k_max`, `run(k)`,
//! and the typed record types for every file that loop would read or write.
//!
//! # Crate dependency graph
//!
//! ```text
//! kanon_core  ←  kanon_search  ←  kanon_driver
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod partitioned;
pub mod persist;

pub use config::{AnonMode, QiMap};
pub use error::DriverError;
pub use partitioned::{PartitionedAnonymizer, PartitionedRun};
pub use persist::{AnonymizedTableFile, ExperimentLog, ExperimentRecord, SetupDescriptor};
