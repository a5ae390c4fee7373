//! Label assignment and the clustering result type.
//!
//! Labels are dense `i32` values: `0..k` identify the `k` clusters in the
//! order they were discovered and [`NOISE`] marks points outside every
//! cluster.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::extract::Cluster;

/// Label carried by points that belong to no cluster.
pub const NOISE: i32 = -1;

/// Writes each cluster's discovery index into its members' slots, leaving
/// every other slot as [`NOISE`].
///
/// Members outside `0..items` are ignored.
///
/// # Examples
/// ```
/// use sngdbscan_core::{Cluster, NOISE, assign_labels};
///
/// let clusters = vec![Cluster::from_members(vec![2, 0]), Cluster::from_members(vec![3])];
/// assert_eq!(assign_labels(5, &clusters), vec![0, NOISE, 0, 1, NOISE]);
/// ```
#[must_use]
pub fn assign_labels(items: usize, clusters: &[Cluster]) -> Vec<i32> {
    let mut labels = vec![NOISE; items];
    for (cluster_id, cluster) in clusters.iter().enumerate() {
        let Ok(label) = i32::try_from(cluster_id) else {
            break;
        };
        for &member in cluster.members() {
            if let Some(slot) = labels.get_mut(member) {
                *slot = label;
            }
        }
    }
    labels
}

/// Error returned when labels are not [`NOISE`] or contiguous from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidLabels {
    /// A label was negative but not [`NOISE`].
    #[error("label {label} at index {index} is neither noise nor a cluster id")]
    Negative {
        /// Position of the offending label.
        index: usize,
        /// The offending label.
        label: i32,
    },
    /// Cluster identifiers skip a value.
    #[error("cluster identifiers must be contiguous from 0 (missing {missing})")]
    Gap {
        /// Smallest identifier absent from the labels.
        missing: i32,
    },
}

/// Output of one clustering run.
///
/// # Examples
/// ```
/// use sngdbscan_core::{ClusteringResult, NOISE};
///
/// let result = ClusteringResult::try_from_labels(vec![0, 0, NOISE, 1])?;
/// assert_eq!(result.cluster_count(), 2);
/// assert_eq!(result.noise_count(), 1);
/// assert!(result.is_noise(2));
/// # Ok::<(), sngdbscan_core::InvalidLabels>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusteringResult {
    labels: Vec<i32>,
    cluster_count: usize,
    noise_count: usize,
    core_indices: Vec<usize>,
}

impl ClusteringResult {
    /// Validates explicit labels and builds a result without core
    /// information.
    ///
    /// # Errors
    /// Returns [`InvalidLabels::Negative`] for negative labels other than
    /// [`NOISE`] and [`InvalidLabels::Gap`] when cluster identifiers are not
    /// contiguous from zero.
    pub fn try_from_labels(labels: Vec<i32>) -> Result<Self, InvalidLabels> {
        let mut seen = BTreeSet::new();
        let mut noise_count = 0;
        for (index, &label) in labels.iter().enumerate() {
            match label {
                NOISE => noise_count += 1,
                label if label < 0 => return Err(InvalidLabels::Negative { index, label }),
                label => {
                    seen.insert(label);
                }
            }
        }
        if let Some(missing) = (0..).zip(&seen).find_map(|(expected, &label)| {
            (expected != label).then_some(expected)
        }) {
            return Err(InvalidLabels::Gap { missing });
        }
        Ok(Self {
            labels,
            cluster_count: seen.len(),
            noise_count,
            core_indices: Vec::new(),
        })
    }

    pub(crate) fn from_clusters(
        items: usize,
        clusters: &[Cluster],
        noise_count: usize,
        core_indices: Vec<usize>,
    ) -> Self {
        Self {
            labels: assign_labels(items, clusters),
            cluster_count: clusters.len(),
            noise_count,
            core_indices,
        }
    }

    /// Returns one label per point.
    #[must_use]
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Consumes the result and returns the labels.
    #[must_use]
    pub fn into_labels(self) -> Vec<i32> {
        self.labels
    }

    /// Returns the number of clusters.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Returns the number of points labelled [`NOISE`].
    #[must_use]
    pub const fn noise_count(&self) -> usize {
        self.noise_count
    }

    /// Returns the core points in ascending order. Empty for results built
    /// from bare labels.
    #[must_use]
    pub fn core_indices(&self) -> &[usize] {
        &self.core_indices
    }

    /// Returns whether `index` was classified as a core point.
    #[must_use]
    pub fn is_core(&self, index: usize) -> bool {
        self.core_indices.binary_search(&index).is_ok()
    }

    /// Returns whether `index` is labelled [`NOISE`]. Unknown indices are not
    /// noise.
    #[must_use]
    pub fn is_noise(&self, index: usize) -> bool {
        self.labels.get(index) == Some(&NOISE)
    }

    /// Returns the number of labelled points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether no points were labelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn labels_follow_discovery_order() {
        let clusters = vec![
            Cluster::from_members(vec![4, 5]),
            Cluster::from_members(vec![0]),
        ];
        assert_eq!(assign_labels(6, &clusters), vec![1, NOISE, NOISE, NOISE, 0, 0]);
    }

    #[rstest]
    fn out_of_range_members_are_ignored() {
        let clusters = vec![Cluster::from_members(vec![0, 9])];
        assert_eq!(assign_labels(2, &clusters), vec![0, NOISE]);
    }

    #[rstest]
    #[case::empty(vec![], 0, 0)]
    #[case::all_noise(vec![NOISE, NOISE], 0, 2)]
    #[case::mixed(vec![1, 0, NOISE, 1], 2, 1)]
    fn try_from_labels_counts(
        #[case] labels: Vec<i32>,
        #[case] clusters: usize,
        #[case] noise: usize,
    ) {
        let result = ClusteringResult::try_from_labels(labels).expect("labels are valid");
        assert_eq!(result.cluster_count(), clusters);
        assert_eq!(result.noise_count(), noise);
        assert!(result.core_indices().is_empty());
    }

    #[rstest]
    #[case::gap(vec![0, 2], InvalidLabels::Gap { missing: 1 })]
    #[case::missing_zero(vec![1, NOISE], InvalidLabels::Gap { missing: 0 })]
    #[case::negative(vec![0, -3], InvalidLabels::Negative { index: 1, label: -3 })]
    fn try_from_labels_rejects_malformed_labels(
        #[case] labels: Vec<i32>,
        #[case] expected: InvalidLabels,
    ) {
        assert_eq!(ClusteringResult::try_from_labels(labels), Err(expected));
    }

    #[rstest]
    fn from_clusters_records_core_points() {
        let clusters = vec![Cluster::from_members(vec![0, 1, 3])];
        let result = ClusteringResult::from_clusters(4, &clusters, 1, vec![0, 1]);
        assert_eq!(result.labels(), &[0, 0, NOISE, 0]);
        assert!(result.is_core(1));
        assert!(!result.is_core(3));
        assert!(result.is_noise(2));
        assert!(!result.is_noise(7));
    }
}
