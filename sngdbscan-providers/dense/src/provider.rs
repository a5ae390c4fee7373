//! Dense matrix provider and its Arrow / Parquet constructors.
use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatch, RecordBatchReader};
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use sngdbscan_core::PointSet;

use crate::errors::DenseMatrixProviderError;
use crate::ingest::{RowAccumulator, validate_fixed_size_list_field};

/// Dense points loaded into a contiguous row-major buffer.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array};
/// use arrow_schema::{DataType, Field};
/// use sngdbscan_providers_dense::DenseMatrixProvider;
///
/// let values: ArrayRef = Arc::new(Float32Array::from(vec![0.0, 1.0, 2.0, 3.0]));
/// let item = Arc::new(Field::new("item", DataType::Float32, false));
/// let array = FixedSizeListArray::new(item, 2, values, None);
///
/// let provider = DenseMatrixProvider::try_from_fixed_size_list("demo", &array)?;
/// let points = provider.into_point_set()?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.point(1), Some(&[2.0, 3.0][..]));
/// # Ok::<(), sngdbscan_providers_dense::DenseMatrixProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrixProvider {
    name: String,
    rows: usize,
    dimension: usize,
    values: Vec<f32>,
}

impl DenseMatrixProvider {
    fn from_accumulator(name: impl Into<String>, accumulator: RowAccumulator) -> Self {
        let (rows, dimension, values) = accumulator.finish();
        debug_assert_eq!(values.len(), rows.saturating_mul(dimension));
        Self {
            name: name.into(),
            rows,
            dimension,
            values,
        }
    }

    /// Returns the data source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows
    }

    /// Returns whether no rows were loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the dimensionality of each row.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the underlying row-major matrix.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.values
    }

    /// Converts the matrix into a validated [`PointSet`].
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::PointSet`] when a coordinate is
    /// NaN or infinite.
    pub fn into_point_set(self) -> Result<PointSet, DenseMatrixProviderError> {
        Ok(PointSet::try_from_flat(self.dimension, self.values)?)
    }

    /// Builds a validated [`PointSet`] from a copy of the matrix.
    ///
    /// # Errors
    /// Same as [`Self::into_point_set`].
    pub fn to_point_set(&self) -> Result<PointSet, DenseMatrixProviderError> {
        Ok(PointSet::try_from_flat(self.dimension, self.values.clone())?)
    }

    /// Loads data from an Arrow [`FixedSizeListArray`].
    ///
    /// # Errors
    /// Fails when the child type is not `Float32`, the width is not positive
    /// or any row or value is null.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut accumulator = RowAccumulator::default();
        accumulator.append(array)?;
        Ok(Self::from_accumulator(name, accumulator))
    }

    /// Loads `column` from a sequence of record batches.
    ///
    /// # Errors
    /// Fails when a batch lacks the column, its field is not a non-nullable
    /// `FixedSizeList<Float32, D>` or batches disagree on `D`.
    pub fn try_from_record_batches<I>(
        name: impl Into<String>,
        column: &str,
        batches: I,
    ) -> Result<Self, DenseMatrixProviderError>
    where
        I: IntoIterator<Item = RecordBatch>,
    {
        let mut accumulator = RowAccumulator::default();
        for batch in batches {
            let schema = batch.schema();
            let index = column_index(schema.index_of(column).ok(), column)?;
            validate_fixed_size_list_field(schema.field(index), column)?;
            accumulator.append(downcast_list(batch.column(index), column)?)?;
        }
        Ok(Self::from_accumulator(name, accumulator))
    }

    /// Loads data from a Parquet column containing `FixedSizeList<Float32, D>` rows.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::Io`] when the file cannot be
    /// opened, otherwise the errors of [`Self::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads data from a Parquet reader.
    ///
    /// # Errors
    /// Fails when the column is missing or mistyped, a row or value is null,
    /// or Parquet decoding fails.
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let reader = builder.with_projection(mask).build()?;
        let schema = reader.schema();
        let index = column_index(schema.index_of(column).ok(), column)?;
        let dimension = validate_fixed_size_list_field(schema.field(index), column)?;
        let mut accumulator = RowAccumulator::with_dimension(dimension);
        for batch in reader {
            let batch = batch?;
            accumulator.append(downcast_list(batch.column(index), column)?)?;
        }
        Ok(Self::from_accumulator(name, accumulator))
    }
}

fn column_index(index: Option<usize>, column: &str) -> Result<usize, DenseMatrixProviderError> {
    index.ok_or_else(|| DenseMatrixProviderError::ColumnNotFound {
        column: column.to_owned(),
    })
}

fn downcast_list<'a>(
    array: &'a dyn Array,
    column: &str,
) -> Result<&'a FixedSizeListArray, DenseMatrixProviderError> {
    array
        .as_any()
        .downcast_ref::<FixedSizeListArray>()
        .ok_or_else(|| DenseMatrixProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: array.data_type().clone(),
        })
}
