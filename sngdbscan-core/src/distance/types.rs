//! Capability trait and metric selection shared by the distance kernels.

use core::fmt;

use super::{Cosine, Euclidean, Manhattan};

/// Symmetric, non-negative distance between two equally sized vectors.
///
/// Any `Fn(&[f32], &[f32]) -> f32` closure qualifies, which keeps ad-hoc
/// metrics cheap to plug in.
///
/// # Examples
/// ```
/// use sngdbscan_core::{Distance, Euclidean};
///
/// assert_eq!(Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
///
/// let chebyshev = |left: &[f32], right: &[f32]| {
///     left.iter()
///         .zip(right)
///         .map(|(l, r)| (l - r).abs())
///         .fold(0.0_f32, f32::max)
/// };
/// assert_eq!(chebyshev.distance(&[0.0, 0.0], &[3.0, 4.0]), 4.0);
/// ```
pub trait Distance {
    /// Computes the distance between `left` and `right`.
    fn distance(&self, left: &[f32], right: &[f32]) -> f32;

    /// Returns a short human-readable name for diagnostics.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Distance for F
where
    F: Fn(&[f32], &[f32]) -> f32,
{
    fn distance(&self, left: &[f32], right: &[f32]) -> f32 {
        self(left, right)
    }
}

/// Built-in metrics selectable at runtime.
///
/// # Examples
/// ```
/// use sngdbscan_core::{Distance, Metric};
///
/// let metric = Metric::Manhattan;
/// assert_eq!(metric.distance(&[0.0, 0.0], &[3.0, 4.0]), 7.0);
/// assert_eq!(metric.to_string(), "manhattan");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Metric {
    /// L2 norm of the difference.
    #[default]
    Euclidean,
    /// L1 norm of the difference.
    Manhattan,
    /// One minus cosine similarity.
    Cosine,
}

impl Metric {
    /// Returns the stable lowercase name of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Cosine => "cosine",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Distance for Metric {
    fn distance(&self, left: &[f32], right: &[f32]) -> f32 {
        match self {
            Self::Euclidean => Euclidean.distance(left, right),
            Self::Manhattan => Manhattan.distance(left, right),
            Self::Cosine => Cosine.distance(left, right),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}
