//! Clustering entry points.
//!
//! [`SngDbscan`] runs the whole pipeline for one dataset: sampled graph
//! construction, core component extraction, border attachment and labelling.
//! [`cluster`] wraps it for callers holding plain rows.

use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{Span, field, info, instrument};

use crate::{
    Result,
    border::assign_border_nodes,
    builder::SngDbscanBuilder,
    distance::{Distance, Euclidean},
    extract::extract_clusters,
    linker::{NeighbourLinker, build_graph},
    points::PointSet,
    result::ClusteringResult,
    sampling::{SamplingEngine, SamplingRate, SelfSampling},
};

/// A validated SNG-DBSCAN configuration.
///
/// Instances are immutable and may be reused across datasets; all per-run
/// state lives inside [`SngDbscan::fit_predict`].
///
/// # Examples
/// ```
/// use sngdbscan_core::{PointSet, SngDbscanBuilder};
///
/// let points = PointSet::try_from_rows(vec![
///     vec![0.0, 0.0],
///     vec![0.0, 1.0],
///     vec![1.0, 0.0],
///     vec![10.0, 10.0],
///     vec![10.0, 11.0],
///     vec![11.0, 10.0],
/// ])?;
/// let engine = SngDbscanBuilder::new()
///     .with_max_distance(1.5)
///     .with_min_points(2)
///     .build()?;
/// let result = engine.fit_predict_seeded(&points, 7)?;
/// assert_eq!(result.labels(), &[0, 0, 0, 1, 1, 1]);
/// # Ok::<(), sngdbscan_core::SngDbscanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SngDbscan<D = Euclidean> {
    sampling_rate: SamplingRate,
    max_distance: f32,
    min_points: NonZeroUsize,
    self_sampling: SelfSampling,
    distance: D,
}

impl<D: Distance> SngDbscan<D> {
    pub(crate) const fn new(
        sampling_rate: SamplingRate,
        max_distance: f32,
        min_points: NonZeroUsize,
        self_sampling: SelfSampling,
        distance: D,
    ) -> Self {
        Self {
            sampling_rate,
            max_distance,
            min_points,
            self_sampling,
            distance,
        }
    }

    /// Returns the configured sampling rate.
    #[must_use]
    pub const fn sampling_rate(&self) -> SamplingRate {
        self.sampling_rate
    }

    /// Returns the inclusive neighbour distance threshold.
    #[must_use]
    pub const fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Returns the minimum degree of a core node.
    #[must_use]
    pub const fn min_points(&self) -> NonZeroUsize {
        self.min_points
    }

    /// Returns the self-sampling policy.
    #[must_use]
    pub const fn self_sampling(&self) -> SelfSampling {
        self.self_sampling
    }

    /// Returns the distance function.
    #[must_use]
    pub const fn distance(&self) -> &D {
        &self.distance
    }

    /// Clusters `points`, drawing every sample and tie-break from `rng`.
    ///
    /// An empty point set yields an empty result.
    ///
    /// # Errors
    /// Returns [`crate::SngDbscanError::InvalidSamplingRate`] if a
    /// logarithmic rate resolves to an unusable value for this dataset.
    pub fn fit_predict<R: Rng + ?Sized>(
        &self,
        points: &PointSet,
        rng: &mut R,
    ) -> Result<ClusteringResult> {
        self.fit_with(points, &self.distance, rng)
    }

    /// Clusters `points` with a [`SmallRng`] seeded from `seed`.
    ///
    /// Equal seeds, points and configuration give equal results.
    ///
    /// # Errors
    /// See [`Self::fit_predict`].
    pub fn fit_predict_seeded(&self, points: &PointSet, seed: u64) -> Result<ClusteringResult> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.fit_predict(points, &mut rng)
    }

    #[instrument(
        name = "core.fit",
        err,
        skip(self, points, distance, rng),
        fields(
            items = points.len(),
            dimension = points.dimension(),
            distance = distance.name(),
            max_distance = self.max_distance,
            min_points = self.min_points.get(),
            sampling_rate = field::Empty,
            sample_size = field::Empty,
        ),
    )]
    fn fit_with<E, R>(
        &self,
        points: &PointSet,
        distance: &E,
        rng: &mut R,
    ) -> Result<ClusteringResult>
    where
        E: Distance + ?Sized,
        R: Rng + ?Sized,
    {
        let items = points.len();
        if items == 0 {
            info!("empty point set, nothing to cluster");
            return Ok(ClusteringResult::default());
        }

        let sampler = SamplingEngine::new(self.sampling_rate.resolve(items))?;
        let span = Span::current();
        span.record("sampling_rate", sampler.rate());
        span.record(
            "sample_size",
            sampler.candidate_count(items, self.self_sampling),
        );

        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();
        let linker = NeighbourLinker::new(distance, self.max_distance);
        let graph = build_graph(points, &sampler, self.self_sampling, &linker, rng);
        #[cfg(feature = "metrics")]
        metrics::histogram!("sng_dbscan_graph_build_seconds")
            .record(started.elapsed().as_secs_f64());

        let min_points = self.min_points.get();
        let core_indices = graph.core_nodes(min_points);
        let mut clusters = extract_clusters(&graph, min_points);
        let noise = assign_border_nodes(&graph, &mut clusters, rng);
        let result =
            ClusteringResult::from_clusters(items, &clusters, noise.len(), core_indices);

        record_run(graph.edge_count(), &result);
        info!(
            edges = graph.edge_count(),
            core_points = result.core_indices().len(),
            clusters = result.cluster_count(),
            noise = result.noise_count(),
            "clustering completed"
        );
        Ok(result)
    }
}

#[cfg(feature = "metrics")]
fn record_run(edges: usize, result: &ClusteringResult) {
    metrics::counter!("sng_dbscan_edges_total").increment(edges as u64);
    metrics::counter!("sng_dbscan_clusters_total").increment(result.cluster_count() as u64);
    metrics::counter!("sng_dbscan_noise_points_total").increment(result.noise_count() as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_run(_edges: usize, _result: &ClusteringResult) {}

/// Clusters plain rows and returns one label per row, `-1` for noise.
///
/// Parameters are validated before the rows, and before any sampling. A
/// missing `distance` means Euclidean.
///
/// # Errors
/// Returns the parameter errors of [`SngDbscanBuilder::build`] and
/// [`crate::SngDbscanError::PointSet`] when the rows are ragged, have zero
/// dimension or hold non-finite values.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sngdbscan_core::{Manhattan, cluster};
///
/// let rows = vec![vec![0.0], vec![0.5], vec![1.0], vec![40.0]];
/// let mut rng = SmallRng::seed_from_u64(1);
/// let labels = cluster(&rows, 1.0, 0.5, 1, Some(&Manhattan), &mut rng)?;
/// assert_eq!(labels, vec![0, 0, 0, -1]);
/// assert!(cluster(&[], 1.0, 0.5, 1, None, &mut rng)?.is_empty());
/// # Ok::<(), sngdbscan_core::SngDbscanError>(())
/// ```
pub fn cluster<R: Rng + ?Sized>(
    points: &[Vec<f32>],
    sampling_rate: f64,
    max_distance: f32,
    min_points: usize,
    distance: Option<&dyn Distance>,
    rng: &mut R,
) -> Result<Vec<i32>> {
    let engine = SngDbscanBuilder::new()
        .with_sampling_rate(sampling_rate)
        .with_max_distance(max_distance)
        .with_min_points(min_points)
        .build()?;
    let points = PointSet::try_from_rows(points.to_vec())?;
    let result = match distance {
        Some(distance) => engine.fit_with(&points, distance, rng)?,
        None => engine.fit_predict(&points, rng)?,
    };
    Ok(result.into_labels())
}
