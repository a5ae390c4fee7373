//! Benchmark support crate for sngdbscan.
//!
//! Provides seeded synthetic datasets and parameter types used by the
//! Criterion benchmarks for end-to-end fitting, graph construction and the
//! exact reference comparison.

pub mod error;
pub mod params;
pub mod source;
