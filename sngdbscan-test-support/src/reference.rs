//! Exact DBSCAN used as an oracle for the sampled implementation.
//!
//! Every pair of points is compared, so this is quadratic and only suitable
//! for small fixtures. A point is core when at least `min_points` *other*
//! points lie within `max_distance`, the same convention the sampled graph
//! uses for degrees. Border points join the lowest-numbered cluster among
//! their core neighbours.

use std::collections::VecDeque;

/// Labels and core flags from an exact run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceClustering {
    /// One label per point; `-1` marks noise.
    pub labels: Vec<i32>,
    /// Whether each point is core.
    pub core: Vec<bool>,
    /// For each point, every cluster it could legally join: its own cluster
    /// for core points, the clusters of its core neighbours for border
    /// points and nothing for noise.
    pub admissible: Vec<Vec<i32>>,
}

/// Runs exact DBSCAN over `rows`.
///
/// # Examples
/// ```
/// use sngdbscan_test_support::reference::exact_dbscan;
///
/// let rows = vec![vec![0.0], vec![1.0], vec![2.0], vec![9.0]];
/// let euclid = |a: &[f32], b: &[f32]| (a[0] - b[0]).abs();
/// let exact = exact_dbscan(&rows, 1.0, 2, euclid);
/// assert_eq!(exact.labels, vec![0, 0, 0, -1]);
/// assert_eq!(exact.core, vec![false, true, false, false]);
/// ```
#[must_use]
pub fn exact_dbscan<F>(
    rows: &[Vec<f32>],
    max_distance: f32,
    min_points: usize,
    distance: F,
) -> ReferenceClustering
where
    F: Fn(&[f32], &[f32]) -> f32,
{
    let neighbours = region_queries(rows, max_distance, &distance);
    let core: Vec<bool> = neighbours
        .iter()
        .map(|list| list.len() >= min_points)
        .collect();

    let mut labels = vec![-1_i32; rows.len()];
    let mut next_label = 0_i32;
    let mut queue = VecDeque::new();
    for seed in 0..rows.len() {
        if !core[seed] || labels[seed] != -1 {
            continue;
        }
        labels[seed] = next_label;
        queue.push_back(seed);
        while let Some(node) = queue.pop_front() {
            for &neighbour in &neighbours[node] {
                if core[neighbour] && labels[neighbour] == -1 {
                    labels[neighbour] = next_label;
                    queue.push_back(neighbour);
                }
            }
        }
        next_label += 1;
    }

    let admissible: Vec<Vec<i32>> = (0..rows.len())
        .map(|node| {
            if core[node] {
                return vec![labels[node]];
            }
            let mut options: Vec<i32> = neighbours[node]
                .iter()
                .filter(|&&neighbour| core[neighbour])
                .map(|&neighbour| labels[neighbour])
                .collect();
            options.sort_unstable();
            options.dedup();
            options
        })
        .collect();

    for (node, options) in admissible.iter().enumerate() {
        if !core[node] {
            labels[node] = options.first().copied().unwrap_or(-1);
        }
    }

    ReferenceClustering {
        labels,
        core,
        admissible,
    }
}

fn region_queries<F>(rows: &[Vec<f32>], max_distance: f32, distance: &F) -> Vec<Vec<usize>>
where
    F: Fn(&[f32], &[f32]) -> f32,
{
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            rows.iter()
                .enumerate()
                .filter(|&(other, candidate)| {
                    other != index && distance(row.as_slice(), candidate.as_slice()) <= max_distance
                })
                .map(|(other, _)| other)
                .collect()
        })
        .collect()
}
