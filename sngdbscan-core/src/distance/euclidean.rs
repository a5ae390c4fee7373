use super::Distance;

/// Euclidean (L2) distance, the default metric.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, left: &[f32], right: &[f32]) -> f32 {
        euclidean_distance(left, right)
    }

    fn name(&self) -> &str {
        "euclidean"
    }
}

/// Computes the Euclidean distance between two vectors.
///
/// Accumulates in `f64` so long vectors do not lose precision before the
/// final square root.
///
/// # Examples
///
/// ```
/// use sngdbscan_core::euclidean_distance;
///
/// let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0]);
/// assert!((distance - 7.071_068).abs() < 1e-6);
/// ```
#[must_use]
pub fn euclidean_distance(left: &[f32], right: &[f32]) -> f32 {
    debug_assert_eq!(left.len(), right.len(), "vectors must share a dimension");
    let mut sum = 0.0f64;
    for (&l, &r) in left.iter().zip(right) {
        let diff = f64::from(l) - f64::from(r);
        sum += diff * diff;
    }

    sum.sqrt() as f32
}
