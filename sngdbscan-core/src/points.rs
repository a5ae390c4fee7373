//! Immutable point storage for the clustering pipeline.
//!
//! Points live in one contiguous row-major buffer so neighbour evaluation
//! walks memory linearly. Validation happens at construction, which lets the
//! distance kernels downstream assume finite, equally sized rows.

use crate::error::PointSetError;

/// Fixed-dimension collection of finite `f32` vectors indexed `0..len()`.
///
/// # Examples
/// ```
/// use sngdbscan_core::PointSet;
///
/// let points = PointSet::try_from_rows(vec![vec![0.0, 0.0], vec![3.0, 4.0]])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dimension(), 2);
/// assert_eq!(points.point(1), Some(&[3.0, 4.0][..]));
/// # Ok::<(), sngdbscan_core::PointSetError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    values: Vec<f32>,
    dimension: usize,
    len: usize,
}

impl PointSet {
    /// Returns a point set containing no points.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            values: Vec::new(),
            dimension: 0,
            len: 0,
        }
    }

    /// Builds a point set from individual rows.
    ///
    /// An empty `rows` vector yields an empty set.
    ///
    /// # Errors
    /// Returns [`PointSetError::ZeroDimension`] when the rows are empty
    /// vectors, [`PointSetError::DimensionMismatch`] when row lengths differ,
    /// and [`PointSetError::NonFinite`] when any coordinate is NaN or infinite.
    pub fn try_from_rows(rows: Vec<Vec<f32>>) -> Result<Self, PointSetError> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let dimension = first.len();
        if dimension == 0 {
            return Err(PointSetError::ZeroDimension);
        }

        let mut values = Vec::with_capacity(rows.len().saturating_mul(dimension));
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != dimension {
                return Err(PointSetError::DimensionMismatch {
                    row: row_index,
                    expected: dimension,
                    actual: row.len(),
                });
            }
            ensure_finite(row_index, row)?;
            values.extend_from_slice(row);
        }

        Ok(Self {
            values,
            dimension,
            len: rows.len(),
        })
    }

    /// Builds a point set from a row-major buffer.
    ///
    /// # Errors
    /// Returns [`PointSetError::ZeroDimension`] when `dimension` is zero but
    /// values were supplied, [`PointSetError::RaggedBuffer`] when the buffer
    /// length is not a multiple of `dimension`, and
    /// [`PointSetError::NonFinite`] for NaN or infinite coordinates.
    ///
    /// # Examples
    /// ```
    /// use sngdbscan_core::PointSet;
    ///
    /// let points = PointSet::try_from_flat(2, vec![0.0, 1.0, 2.0, 3.0])?;
    /// assert_eq!(points.len(), 2);
    /// # Ok::<(), sngdbscan_core::PointSetError>(())
    /// ```
    pub fn try_from_flat(dimension: usize, values: Vec<f32>) -> Result<Self, PointSetError> {
        if values.is_empty() {
            return Ok(Self::empty());
        }
        if dimension == 0 {
            return Err(PointSetError::ZeroDimension);
        }
        if values.len() % dimension != 0 {
            return Err(PointSetError::RaggedBuffer {
                len: values.len(),
                dimension,
            });
        }
        for (row_index, row) in values.chunks_exact(dimension).enumerate() {
            ensure_finite(row_index, row)?;
        }
        let len = values.len() / dimension;
        Ok(Self {
            values,
            dimension,
            len,
        })
    }

    /// Returns the number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the set holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the dimension shared by every point, or `0` for an empty set.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the coordinates of point `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&[f32]> {
        if index >= self.len {
            return None;
        }
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.values.get(start..end)
    }

    /// Iterates over the points in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        // `chunks_exact` panics on a zero chunk size; an empty set has no rows.
        self.values
            .chunks_exact(self.dimension.max(1))
            .take(self.len)
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        &self.values
    }
}

impl TryFrom<Vec<Vec<f32>>> for PointSet {
    type Error = PointSetError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self, Self::Error> {
        Self::try_from_rows(rows)
    }
}

fn ensure_finite(row: usize, values: &[f32]) -> Result<(), PointSetError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(column) => Err(PointSetError::NonFinite {
            row,
            column,
            value: values[column],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_rows_produce_empty_set() {
        let points = PointSet::try_from_rows(Vec::new()).expect("empty input is valid");
        assert!(points.is_empty());
        assert_eq!(points.dimension(), 0);
        assert_eq!(points.iter().count(), 0);
    }

    #[rstest]
    fn rows_are_stored_in_index_order() {
        let points = PointSet::try_from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
            .expect("rows are uniform");
        let collected: Vec<&[f32]> = points.iter().collect();
        assert_eq!(collected, vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
        assert_eq!(points.as_flat(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(points.point(2), None);
    }

    #[rstest]
    fn ragged_rows_are_rejected() {
        let err = PointSet::try_from_rows(vec![vec![0.0], vec![1.0, 2.0]])
            .expect_err("ragged rows must fail");
        assert_eq!(
            err,
            PointSetError::DimensionMismatch {
                row: 1,
                expected: 1,
                actual: 2,
            }
        );
    }

    #[rstest]
    #[case::nan(f32::NAN)]
    #[case::positive_infinity(f32::INFINITY)]
    #[case::negative_infinity(f32::NEG_INFINITY)]
    fn non_finite_values_are_rejected(#[case] value: f32) {
        let err = PointSet::try_from_rows(vec![vec![0.0, 0.0], vec![1.0, value]])
            .expect_err("non-finite values must fail");
        assert!(
            matches!(err, PointSetError::NonFinite { row: 1, column: 1, .. }),
            "unexpected error: {err:?}",
        );
    }

    #[rstest]
    fn zero_dimension_rows_are_rejected() {
        let err = PointSet::try_from_rows(vec![Vec::new(), Vec::new()])
            .expect_err("zero-dimension rows must fail");
        assert_eq!(err, PointSetError::ZeroDimension);
    }

    #[rstest]
    #[case(2, vec![0.0, 1.0, 2.0], PointSetError::RaggedBuffer { len: 3, dimension: 2 })]
    #[case(0, vec![0.0], PointSetError::ZeroDimension)]
    fn flat_buffers_are_validated(
        #[case] dimension: usize,
        #[case] values: Vec<f32>,
        #[case] expected: PointSetError,
    ) {
        let err = PointSet::try_from_flat(dimension, values).expect_err("buffer must fail");
        assert_eq!(err, expected);
    }
}
