//! Core types and loading for the district census dataset.
//!
//! - `district`: the per-district base record and row parsing
//! - `dataset`: the immutable, loaded-once collection of records
//! - `columns`: canonical column names and header normalization
//! - `error`: load and validation errors

pub mod columns;
pub mod dataset;
pub mod district;
pub mod error;

pub use dataset::Dataset;
pub use district::DistrictRecord;
pub use error::{CensusError, Result};
