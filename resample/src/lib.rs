//! Kanon Resample: converts generalized categorical cells of an anonymized
//! table back into concrete values, either by full Cartesian expansion or by
//! uniform random sampling.
//!
//! Grounded on `examples/original_source/privacy/postprocessing.py`; the
//! Cartesian expansion uses `itertools::Itertools::multi_cartesian_product`
//! rather than the source's `DataFrame.explode` loop.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cartesian;
pub mod error;
pub mod uniform;

pub use cartesian::resample_cartesian;
pub use error::ResampleError;
pub use uniform::resample_uniform;
