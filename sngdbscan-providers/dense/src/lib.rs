//! Dense point ingestion from Arrow and Parquet `FixedSizeList<Float32, D>`
//! columns.
//!
//! [`DenseMatrixProvider`] gathers every row of a column into one row-major
//! buffer and hands it to the clustering engine as a validated
//! [`sngdbscan_core::PointSet`].

mod errors;
mod ingest;
mod provider;

pub use errors::DenseMatrixProviderError;
pub use provider::DenseMatrixProvider;

#[cfg(test)]
mod tests;
