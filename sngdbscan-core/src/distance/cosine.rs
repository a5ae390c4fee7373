use super::Distance;

/// Cosine distance, `1 - cos(θ)`, in `[0, 2]`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cosine;

impl Distance for Cosine {
    fn distance(&self, left: &[f32], right: &[f32]) -> f32 {
        cosine_distance(left, right)
    }

    fn name(&self) -> &str {
        "cosine"
    }
}

/// Computes the cosine distance between two vectors.
///
/// A zero-magnitude vector has no direction; it is treated as orthogonal to
/// every other vector and sits at distance `1.0`. The result stays symmetric
/// and non-negative, which is all the linker relies on.
///
/// # Examples
///
/// ```
/// use sngdbscan_core::cosine_distance;
///
/// assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
/// assert!(cosine_distance(&[1.0, 1.0], &[2.0, 2.0]).abs() < 1e-6);
/// assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
/// ```
#[must_use]
pub fn cosine_distance(left: &[f32], right: &[f32]) -> f32 {
    debug_assert_eq!(left.len(), right.len(), "vectors must share a dimension");
    let mut dot = 0.0f64;
    let mut left_squares = 0.0f64;
    let mut right_squares = 0.0f64;
    for (&l, &r) in left.iter().zip(right) {
        let (l, r) = (f64::from(l), f64::from(r));
        dot += l * r;
        left_squares += l * l;
        right_squares += r * r;
    }

    if left_squares == 0.0 || right_squares == 0.0 {
        return 1.0;
    }

    let similarity = dot / (left_squares.sqrt() * right_squares.sqrt());
    // Theoretical range is [-1, 1], but numerical noise can spill over.
    let similarity = similarity.clamp(-1.0, 1.0);
    (1.0 - similarity) as f32
}
