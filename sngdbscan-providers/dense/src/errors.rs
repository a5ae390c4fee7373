use arrow_schema::{ArrowError, DataType};
use sngdbscan_core::PointSetError;
use thiserror::Error;

/// Failures raised while loading dense points from Arrow or Parquet.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DenseMatrixProviderError {
    /// The requested column is absent from the schema.
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound {
        /// Requested column name.
        column: String,
    },
    /// The column is not a `FixedSizeList`.
    #[error("column `{column}` must be a FixedSizeList<Float32, _> but found {actual:?}")]
    InvalidColumnType {
        /// Requested column name.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// The list's child type is not `Float32`.
    #[error("FixedSizeList child type must be Float32 but found {actual:?}")]
    InvalidListValueType {
        /// Child type found in the schema.
        actual: DataType,
    },
    /// The list width is zero or negative.
    #[error("invalid FixedSizeList dimension {actual}")]
    InvalidDimension {
        /// Declared list width.
        actual: i32,
    },
    /// The column or its child field is declared nullable.
    #[error("column `{column}` must be non-nullable (nullable child: {nullable_child})")]
    NullableField {
        /// Requested column name.
        column: String,
        /// Whether the child field, rather than the list itself, is nullable.
        nullable_child: bool,
    },
    /// A list entry is null.
    #[error("row {row} is null")]
    NullRow {
        /// Absolute row index across batches.
        row: usize,
    },
    /// A coordinate inside a row is null.
    #[error("row {row} contains null value at position {value_index}")]
    NullValue {
        /// Absolute row index across batches.
        row: usize,
        /// Position of the null coordinate.
        value_index: usize,
    },
    /// A row's child slice has the wrong length.
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        /// Absolute row index across batches.
        row: usize,
        /// List width.
        expected: usize,
        /// Observed length.
        actual: usize,
    },
    /// `rows * dimension` overflows `usize`.
    #[error("matrix with {rows} rows and dimension {dimension} exceeds capacity limits")]
    CapacityOverflow {
        /// Rows in the offending batch.
        rows: usize,
        /// List width.
        dimension: usize,
    },
    /// Two record batches disagree on the list width.
    #[error("inconsistent dimensions across batches: expected {expected}, got {actual}")]
    InconsistentBatchDimension {
        /// Width of the first batch.
        expected: usize,
        /// Width of the offending batch.
        actual: usize,
    },
    /// The loaded values do not form a valid point set.
    #[error("invalid points: {0}")]
    PointSet(#[from] PointSetError),
    /// Arrow reported a failure.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Parquet decoding failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// Opening or reading the source failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
