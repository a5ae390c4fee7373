//! Copies `FixedSizeList<Float32, D>` arrays into a row-major buffer.
use arrow_array::{Array, FixedSizeListArray, Float32Array};
use arrow_schema::{DataType, Field};

use crate::errors::DenseMatrixProviderError;

/// Checks a schema field and returns its list width.
pub(crate) fn validate_fixed_size_list_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseMatrixProviderError> {
    match field.data_type() {
        DataType::FixedSizeList(child, width) => {
            if field.is_nullable() || child.is_nullable() {
                return Err(DenseMatrixProviderError::NullableField {
                    column: column.to_owned(),
                    nullable_child: child.is_nullable(),
                });
            }
            if child.data_type() != &DataType::Float32 {
                return Err(DenseMatrixProviderError::InvalidListValueType {
                    actual: child.data_type().clone(),
                });
            }
            positive_width(*width)
        }
        other => Err(DenseMatrixProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

fn positive_width(width: i32) -> Result<usize, DenseMatrixProviderError> {
    match usize::try_from(width) {
        Ok(dimension) if dimension > 0 => Ok(dimension),
        _ => Err(DenseMatrixProviderError::InvalidDimension { actual: width }),
    }
}

/// Accumulates rows from successive arrays that must share one width.
#[derive(Debug, Default)]
pub(crate) struct RowAccumulator {
    dimension: Option<usize>,
    rows: usize,
    values: Vec<f32>,
}

impl RowAccumulator {
    pub(crate) const fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            rows: 0,
            values: Vec::new(),
        }
    }

    pub(crate) fn append(
        &mut self,
        array: &FixedSizeListArray,
    ) -> Result<(), DenseMatrixProviderError> {
        let dimension = validate_fixed_size_list(array)?;
        match self.dimension {
            Some(expected) if expected != dimension => {
                return Err(DenseMatrixProviderError::InconsistentBatchDimension {
                    expected,
                    actual: dimension,
                });
            }
            Some(_) => {}
            None => self.dimension = Some(dimension),
        }
        copy_list_values(array, dimension, self.rows, &mut self.values)?;
        self.rows += array.len();
        Ok(())
    }

    /// Returns `(rows, dimension, values)`; the dimension is zero when no
    /// array was ever appended or declared.
    pub(crate) fn finish(self) -> (usize, usize, Vec<f32>) {
        (self.rows, self.dimension.unwrap_or(0), self.values)
    }
}

fn validate_fixed_size_list(array: &FixedSizeListArray) -> Result<usize, DenseMatrixProviderError> {
    let value_type = array.value_type();
    if value_type != DataType::Float32 {
        return Err(DenseMatrixProviderError::InvalidListValueType { actual: value_type });
    }
    positive_width(array.value_length())
}

pub(crate) fn copy_list_values(
    array: &FixedSizeListArray,
    dimension: usize,
    start_row: usize,
    out: &mut Vec<f32>,
) -> Result<(), DenseMatrixProviderError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(dimension)
        .ok_or(DenseMatrixProviderError::CapacityOverflow { rows, dimension })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let absolute_row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(DenseMatrixProviderError::NullRow { row: absolute_row });
        }
        let row = array.value(row_index);
        let floats = row.as_any().downcast_ref::<Float32Array>().ok_or_else(|| {
            DenseMatrixProviderError::InvalidListValueType {
                actual: row.data_type().clone(),
            }
        })?;
        if floats.len() != dimension {
            return Err(DenseMatrixProviderError::InvalidRowLength {
                row: absolute_row,
                expected: dimension,
                actual: floats.len(),
            });
        }
        if let Some(value_index) = (0..dimension).find(|&index| floats.is_null(index)) {
            return Err(DenseMatrixProviderError::NullValue {
                row: absolute_row,
                value_index,
            });
        }
        out.extend(floats.iter().flatten());
    }
    Ok(())
}
