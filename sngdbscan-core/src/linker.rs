//! Neighbour linking and sampled graph construction.

use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    distance::Distance,
    graph::Graph,
    points::PointSet,
    sampling::{SamplingEngine, SelfSampling},
};

/// Records an edge between a point and every sampled candidate within
/// `max_distance` of it.
///
/// # Examples
/// ```
/// use sngdbscan_core::{Euclidean, Graph, NeighbourLinker, PointSet};
///
/// let points = PointSet::try_from_rows(vec![vec![0.0], vec![1.0], vec![5.0]])?;
/// let mut graph = Graph::new(&points);
/// let linker = NeighbourLinker::new(&Euclidean, 1.5);
/// assert_eq!(linker.link(&mut graph, 0, &[1, 2]), 1);
/// assert!(graph.contains_edge(1, 0));
/// assert!(!graph.contains_edge(0, 2));
/// # Ok::<(), sngdbscan_core::PointSetError>(())
/// ```
#[derive(Debug)]
pub struct NeighbourLinker<'d, D: ?Sized> {
    distance: &'d D,
    max_distance: f32,
}

impl<D: ?Sized> Clone for NeighbourLinker<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for NeighbourLinker<'_, D> {}

impl<'d, D: Distance + ?Sized> NeighbourLinker<'d, D> {
    /// Creates a linker using `distance` and the inclusive threshold
    /// `max_distance`.
    #[must_use]
    pub const fn new(distance: &'d D, max_distance: f32) -> Self {
        Self {
            distance,
            max_distance,
        }
    }

    /// Returns the inclusive distance threshold.
    #[must_use]
    pub const fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Links `point` to every candidate within the threshold and returns the
    /// number of new edges.
    ///
    /// The point itself and indices outside the graph are skipped.
    pub fn link(&self, graph: &mut Graph<'_>, point: usize, candidates: &[usize]) -> usize {
        let points = graph.points();
        let Some(origin) = points.point(point) else {
            return 0;
        };
        let mut added = 0;
        for &candidate in candidates {
            if candidate == point {
                continue;
            }
            let Some(other) = points.point(candidate) else {
                continue;
            };
            if self.distance.distance(origin, other) <= self.max_distance
                && graph.add_edge(point, candidate)
            {
                added += 1;
            }
        }
        added
    }
}

/// Builds the sampled-neighbourhood graph in a single pass over the points.
///
/// Points are visited in index order; each draws its own candidate sample
/// and is linked against it. Earlier samples are never revisited, so a node's
/// degree counts edges it discovered plus edges later points discovered
/// towards it.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sngdbscan_core::{
///     Euclidean, NeighbourLinker, PointSet, SamplingEngine, SelfSampling, build_graph,
/// };
///
/// let points = PointSet::try_from_rows(vec![vec![0.0], vec![1.0], vec![9.0]])?;
/// let sampler = SamplingEngine::new(1.0)?;
/// let linker = NeighbourLinker::new(&Euclidean, 1.0);
/// let mut rng = SmallRng::seed_from_u64(0);
/// let graph = build_graph(&points, &sampler, SelfSampling::Exclude, &linker, &mut rng);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.degree(2), 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.build_graph",
    skip_all,
    fields(items = points.len(), rate = sampler.rate(), policy = policy.as_str()),
)]
pub fn build_graph<'a, D, R>(
    points: &'a PointSet,
    sampler: &SamplingEngine,
    policy: SelfSampling,
    linker: &NeighbourLinker<'_, D>,
    rng: &mut R,
) -> Graph<'a>
where
    D: Distance + ?Sized,
    R: Rng + ?Sized,
{
    let items = points.len();
    let mut graph = Graph::new(points);
    for point in 0..items {
        let candidates = sampler.candidates_for(items, point, policy, rng);
        linker.link(&mut graph, point, &candidates);
    }
    debug!(
        edges = graph.edge_count(),
        candidates_per_point = sampler.candidate_count(items, policy),
        "sampled graph constructed"
    );
    graph
}
