use super::Distance;

/// Manhattan (L1) distance.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Manhattan;

impl Distance for Manhattan {
    fn distance(&self, left: &[f32], right: &[f32]) -> f32 {
        manhattan_distance(left, right)
    }

    fn name(&self) -> &str {
        "manhattan"
    }
}

/// Computes the sum of absolute coordinate differences.
///
/// # Examples
///
/// ```
/// use sngdbscan_core::manhattan_distance;
///
/// assert_eq!(manhattan_distance(&[1.0, -1.0], &[4.0, 3.0]), 7.0);
/// ```
#[must_use]
pub fn manhattan_distance(left: &[f32], right: &[f32]) -> f32 {
    debug_assert_eq!(left.len(), right.len(), "vectors must share a dimension");
    let sum: f64 = left
        .iter()
        .zip(right)
        .map(|(&l, &r)| (f64::from(l) - f64::from(r)).abs())
        .sum();
    sum as f32
}
