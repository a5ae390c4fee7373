//! Seeded synthetic datasets for benchmarking.

mod errors;
mod generation;

pub use errors::SyntheticError;

use generation::{blob_centroids, standard_normal_sample, validate_blob_config};
use rand::{SeedableRng, rngs::SmallRng};
use sngdbscan_core::PointSet;

/// Configuration for isotropic Gaussian blobs.
#[derive(Clone, Debug)]
pub struct GaussianBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each point.
    pub dimensions: usize,
    /// Number of Gaussian clusters.
    pub cluster_count: usize,
    /// Radius of the circle the centroids are spread around.
    pub separation: f32,
    /// Standard deviation of every coordinate around its centroid.
    pub spread: f32,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates Gaussian blobs and their ground-truth labels.
///
/// Points are assigned to centroids round-robin, so point `i` belongs to
/// cluster `i % cluster_count`. The same configuration always yields the same
/// points.
///
/// # Errors
/// Returns [`SyntheticError`] when the configuration is invalid.
///
/// # Examples
/// ```
/// use sngdbscan_benches::source::{GaussianBlobConfig, generate_gaussian_blobs};
///
/// let config = GaussianBlobConfig {
///     point_count: 6,
///     dimensions: 2,
///     cluster_count: 3,
///     separation: 10.0,
///     spread: 0.1,
///     seed: 7,
/// };
/// let (points, labels) = generate_gaussian_blobs(&config)?;
/// assert_eq!(points.len(), 6);
/// assert_eq!(labels, vec![0, 1, 2, 0, 1, 2]);
/// # Ok::<(), sngdbscan_benches::source::SyntheticError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "Gaussian data generation requires floating-point arithmetic"
)]
pub fn generate_gaussian_blobs(
    config: &GaussianBlobConfig,
) -> Result<(PointSet, Vec<i32>), SyntheticError> {
    validate_blob_config(config)?;
    let total = config
        .point_count
        .checked_mul(config.dimensions)
        .ok_or(SyntheticError::Overflow)?;

    let centroids = blob_centroids(config, &mut SmallRng::seed_from_u64(config.seed));
    let mut rng = SmallRng::seed_from_u64(config.seed ^ 0xA5A5_A5A5_A5A5_A5A5_u64);
    let mut data = Vec::with_capacity(total);
    let mut labels = Vec::with_capacity(config.point_count);
    let cycle = centroids.iter().zip(0_i32..).cycle();
    for (centroid, label) in cycle.take(config.point_count) {
        labels.push(label);
        for centroid_value in centroid {
            data.push(*centroid_value + standard_normal_sample(&mut rng)? * config.spread);
        }
    }

    let points = PointSet::try_from_flat(config.dimensions, data)?;
    Ok((points, labels))
}
