//! Connected-component extraction over core nodes.
//!
//! Seeds are taken in ascending index order and each component is explored
//! breadth-first through core-to-core edges only, so the number, membership
//! and discovery order of clusters depend solely on the graph and
//! `min_points`.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::graph::Graph;

/// A set of point indices forming one cluster.
///
/// Members are kept in the order they joined: the core component in
/// breadth-first order, followed by any border nodes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cluster {
    members: Vec<usize>,
}

impl Cluster {
    /// Creates a cluster from explicit members.
    #[must_use]
    pub const fn from_members(members: Vec<usize>) -> Self {
        Self { members }
    }

    /// Returns the members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the cluster has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn push(&mut self, node: usize) {
        self.members.push(node);
    }
}

/// Finds the connected components of the subgraph induced by core nodes.
///
/// A node is core when its degree is at least `min_points`. Non-core nodes
/// are never visited here; they are handled by
/// [`crate::assign_border_nodes`].
///
/// # Examples
/// ```
/// use sngdbscan_core::{Graph, PointSet, extract_clusters};
///
/// let points = PointSet::try_from_rows((0..6).map(|x| vec![x as f32]).collect())?;
/// let mut graph = Graph::new(&points);
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// graph.add_edge(0, 2);
/// graph.add_edge(3, 4);
/// let clusters = extract_clusters(&graph, 2);
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].members(), &[0, 1, 2]);
/// # Ok::<(), sngdbscan_core::PointSetError>(())
/// ```
#[instrument(name = "core.extract_clusters", skip(graph), fields(items = graph.len()))]
#[must_use]
pub fn extract_clusters(graph: &Graph<'_>, min_points: usize) -> Vec<Cluster> {
    let core = core_mask(graph, min_points);
    let mut consumed = vec![false; graph.len()];
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..graph.len() {
        if !core[seed] || consumed[seed] {
            continue;
        }
        consumed[seed] = true;
        queue.push_back(seed);
        let mut cluster = Cluster::default();
        while let Some(node) = queue.pop_front() {
            cluster.push(node);
            for &neighbour in graph.neighbours(node) {
                if core[neighbour] && !consumed[neighbour] {
                    consumed[neighbour] = true;
                    queue.push_back(neighbour);
                }
            }
        }
        clusters.push(cluster);
    }

    debug!(
        core_nodes = core.iter().filter(|&&is_core| is_core).count(),
        clusters = clusters.len(),
        "core components extracted"
    );
    clusters
}

/// Flags every node whose degree is at least `min_points`.
pub(crate) fn core_mask(graph: &Graph<'_>, min_points: usize) -> Vec<bool> {
    (0..graph.len())
        .map(|node| graph.degree(node) >= min_points)
        .collect()
}
