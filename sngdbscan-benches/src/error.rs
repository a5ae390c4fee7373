//! Benchmark setup error type.
//!
//! Collects the failures that can occur while preparing benchmark inputs so
//! setup functions can propagate them with `?`.

use sngdbscan_core::SngDbscanError;

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Building or running the clusterer failed.
    #[error("clustering failed: {0}")]
    Clustering(#[from] SngDbscanError),
}
