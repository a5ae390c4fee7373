//! Partition agreement scores.
//!
//! Adjusted Rand Index (ARI) and Normalized Mutual Information (NMI) compare
//! two labellings of the same points independently of how clusters are
//! numbered. [`crate::NOISE`] is treated as one more label, so two runs agree
//! perfectly only when they also agree on which points are noise.

use std::collections::HashMap;

/// ARI and NMI computed from the same pair of labellings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusteringQualityScore {
    /// Adjusted Rand Index in `[-1.0, 1.0]`.
    pub ari: f64,
    /// Normalized Mutual Information in `[0.0, 1.0]`.
    pub nmi: f64,
}

/// Errors raised while scoring labellings.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ClusteringQualityError {
    /// The labellings cover different numbers of points.
    #[error("label length mismatch: expected={expected_len}, predicted={predicted_len}")]
    LabelLengthMismatch {
        /// Number of reference labels.
        expected_len: usize,
        /// Number of predicted labels.
        predicted_len: usize,
    },
}

/// Joint and marginal label counts over two labellings.
struct Contingency {
    items: usize,
    left: HashMap<i32, usize>,
    right: HashMap<i32, usize>,
    joint: HashMap<(i32, i32), usize>,
}

impl Contingency {
    fn tally(expected: &[i32], predicted: &[i32]) -> Result<Self, ClusteringQualityError> {
        if expected.len() != predicted.len() {
            return Err(ClusteringQualityError::LabelLengthMismatch {
                expected_len: expected.len(),
                predicted_len: predicted.len(),
            });
        }
        let mut table = Self {
            items: expected.len(),
            left: HashMap::new(),
            right: HashMap::new(),
            joint: HashMap::new(),
        };
        for (&left, &right) in expected.iter().zip(predicted) {
            *table.left.entry(left).or_default() += 1;
            *table.right.entry(right).or_default() += 1;
            *table.joint.entry((left, right)).or_default() += 1;
        }
        Ok(table)
    }

    fn adjusted_rand_index(&self) -> f64 {
        let total = pairs(self.items);
        if total == 0.0 {
            return 1.0;
        }
        let agreeing: f64 = self.joint.values().copied().map(pairs).sum();
        let left: f64 = self.left.values().copied().map(pairs).sum();
        let right: f64 = self.right.values().copied().map(pairs).sum();

        let expected = left * right / total;
        let denominator = 0.5 * (left + right) - expected;
        if denominator == 0.0 {
            1.0
        } else {
            (agreeing - expected) / denominator
        }
    }

    fn normalized_mutual_information(&self) -> f64 {
        if self.items == 0 {
            return 1.0;
        }
        let n = self.items as f64;
        let left_entropy = entropy(self.left.values().copied(), n);
        let right_entropy = entropy(self.right.values().copied(), n);
        match (left_entropy == 0.0, right_entropy == 0.0) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.0,
            (false, false) => {
                let mutual: f64 = self
                    .joint
                    .iter()
                    .map(|(&(left, right), &count)| {
                        let count = count as f64;
                        let marginals = self.left.get(&left).copied().unwrap_or(0) as f64
                            * self.right.get(&right).copied().unwrap_or(0) as f64;
                        (count / n) * (count * n / marginals).ln()
                    })
                    .sum();
                (mutual / (left_entropy * right_entropy).sqrt()).clamp(0.0, 1.0)
            }
        }
    }
}

fn pairs(count: usize) -> f64 {
    let count = count as f64;
    count * (count - 1.0) / 2.0
}

fn entropy(counts: impl Iterator<Item = usize>, n: f64) -> f64 {
    counts
        .map(|count| {
            let probability = count as f64 / n;
            -probability * probability.ln()
        })
        .sum()
}

/// Computes the Adjusted Rand Index between two labellings.
///
/// # Errors
/// Returns [`ClusteringQualityError::LabelLengthMismatch`] when the
/// labellings differ in length.
///
/// # Examples
/// ```
/// use sngdbscan_core::adjusted_rand_index;
///
/// let ari = adjusted_rand_index(&[0, 0, 1, 1, -1], &[1, 1, 0, 0, -1])?;
/// assert!((ari - 1.0).abs() < 1e-12);
/// # Ok::<(), sngdbscan_core::ClusteringQualityError>(())
/// ```
pub fn adjusted_rand_index(
    expected: &[i32],
    predicted: &[i32],
) -> Result<f64, ClusteringQualityError> {
    Contingency::tally(expected, predicted).map(|table| table.adjusted_rand_index())
}

/// Computes the Normalized Mutual Information between two labellings.
///
/// # Errors
/// Returns [`ClusteringQualityError::LabelLengthMismatch`] when the
/// labellings differ in length.
pub fn normalized_mutual_information(
    expected: &[i32],
    predicted: &[i32],
) -> Result<f64, ClusteringQualityError> {
    Contingency::tally(expected, predicted).map(|table| table.normalized_mutual_information())
}

/// Computes ARI and NMI from a single contingency table.
///
/// # Errors
/// Returns [`ClusteringQualityError::LabelLengthMismatch`] when the
/// labellings differ in length.
pub fn clustering_quality_score(
    expected: &[i32],
    predicted: &[i32],
) -> Result<ClusteringQualityScore, ClusteringQualityError> {
    let table = Contingency::tally(expected, predicted)?;
    Ok(ClusteringQualityScore {
        ari: table.adjusted_rand_index(),
        nmi: table.normalized_mutual_information(),
    })
}
