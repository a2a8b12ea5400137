//! Benchmark support crate for maxforest.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks for forest computation.

pub mod error;
pub mod params;
pub mod source;
