//! Symmetric sampled-neighbourhood graph.
//!
//! Each node keeps its neighbours in a sorted `Vec<usize>`, which keeps
//! membership checks logarithmic and traversal order deterministic without
//! per-node hash sets. The degree of a node is the graph's estimate of local
//! density.

use crate::points::PointSet;

/// Undirected adjacency over the indices of a [`PointSet`].
///
/// Edges are inserted in both directions at once, so
/// `j ∈ neighbours(i) ⇔ i ∈ neighbours(j)` holds after every mutation.
/// Self-edges are never stored.
///
/// # Examples
/// ```
/// use sngdbscan_core::{Graph, PointSet};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0], vec![1.0], vec![2.0]])?;
/// let mut graph = Graph::new(&points);
/// assert!(graph.add_edge(0, 1));
/// assert!(!graph.add_edge(1, 0));
/// assert!(!graph.add_edge(2, 2));
/// assert_eq!(graph.neighbours(1), &[0]);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), sngdbscan_core::PointSetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Graph<'a> {
    points: &'a PointSet,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl<'a> Graph<'a> {
    /// Creates an edgeless graph with one node per point.
    #[must_use]
    pub fn new(points: &'a PointSet) -> Self {
        Self {
            points,
            adjacency: vec![Vec::new(); points.len()],
            edge_count: 0,
        }
    }

    /// Returns the points the graph is built over.
    #[must_use]
    pub const fn points(&self) -> &'a PointSet {
        self.points
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Records the undirected edge `(left, right)`.
    ///
    /// Returns `true` when the edge is new. Existing edges and self-edges are
    /// no-ops returning `false`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn add_edge(&mut self, left: usize, right: usize) -> bool {
        assert!(
            left < self.len() && right < self.len(),
            "edge ({left}, {right}) is outside a graph of {} nodes",
            self.len(),
        );
        if left == right {
            return false;
        }
        if !insert_sorted(&mut self.adjacency[left], right) {
            return false;
        }
        let inserted = insert_sorted(&mut self.adjacency[right], left);
        debug_assert!(inserted, "adjacency lost symmetry at ({left}, {right})");
        self.edge_count += 1;
        true
    }

    /// Returns whether `left` and `right` are adjacent.
    #[must_use]
    pub fn contains_edge(&self, left: usize, right: usize) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|neighbours| neighbours.binary_search(&right).is_ok())
    }

    /// Returns the neighbours of `node` in ascending order, or an empty slice
    /// for an unknown node.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of neighbours of `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours(node).len()
    }

    /// Returns, in ascending order, every node whose degree is at least
    /// `min_points`.
    #[must_use]
    pub fn core_nodes(&self, min_points: usize) -> Vec<usize> {
        self.adjacency
            .iter()
            .enumerate()
            .filter(|(_, neighbours)| neighbours.len() >= min_points)
            .map(|(node, _)| node)
            .collect()
    }

    /// Checks that every edge is stored in both directions and that no node
    /// lists itself.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().enumerate().all(|(node, neighbours)| {
            neighbours
                .iter()
                .all(|&other| other != node && self.contains_edge(other, node))
        })
    }
}

fn insert_sorted(neighbours: &mut Vec<usize>, node: usize) -> bool {
    match neighbours.binary_search(&node) {
        Ok(_) => false,
        Err(position) => {
            neighbours.insert(position, node);
            true
        }
    }
}
