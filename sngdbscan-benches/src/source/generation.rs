//! Blob validation, centroid placement and normal sampling.

use std::f32::consts::PI;

use rand::{Rng, rngs::SmallRng};

use super::GaussianBlobConfig;
use crate::source::SyntheticError;

pub(super) fn validate_blob_config(config: &GaussianBlobConfig) -> Result<(), SyntheticError> {
    if config.point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if config.dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    if config.cluster_count == 0 {
        return Err(SyntheticError::ZeroClusters);
    }
    if config.cluster_count > config.point_count || i32::try_from(config.cluster_count).is_err() {
        return Err(SyntheticError::ClusterCountExceedsPointCount {
            cluster_count: config.cluster_count,
            point_count: config.point_count,
        });
    }
    if !config.separation.is_finite() || config.separation <= 0.0 {
        return Err(SyntheticError::InvalidFloatParameter {
            parameter: "separation",
        });
    }
    if !config.spread.is_finite() || config.spread < 0.0 {
        return Err(SyntheticError::InvalidFloatParameter {
            parameter: "spread",
        });
    }
    Ok(())
}

/// Places centroids evenly on a circle in the first two axes; further axes
/// get a small uniform offset.
#[expect(
    clippy::cast_precision_loss,
    reason = "centroid placement uses index-derived floating-point angles"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "centroid placement uses trigonometric expressions"
)]
pub(super) fn blob_centroids(config: &GaussianBlobConfig, rng: &mut SmallRng) -> Vec<Vec<f32>> {
    (0..config.cluster_count)
        .map(|cluster_index| {
            let angle = (cluster_index as f32 / config.cluster_count as f32) * (2.0 * PI);
            let mut centroid = vec![0.0_f32; config.dimensions];
            if let Some(value) = centroid.get_mut(0) {
                *value = config.separation * angle.cos();
            }
            if let Some(value) = centroid.get_mut(1) {
                *value = config.separation * angle.sin();
            }
            let jitter = 0.2 * config.separation;
            for value in centroid.iter_mut().skip(2) {
                *value = rng.gen_range(-jitter..jitter);
            }
            centroid
        })
        .collect()
}

/// Draws one standard normal sample with the Box-Muller transform.
#[expect(
    clippy::float_arithmetic,
    reason = "Box-Muller transform requires floating-point arithmetic"
)]
pub(super) fn standard_normal_sample(rng: &mut SmallRng) -> Result<f32, SyntheticError> {
    let u1 = rng.gen_range(0.0_f32..1.0_f32).max(f32::EPSILON);
    let u2 = rng.gen_range(0.0_f32..1.0_f32);
    let sample = (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * PI * u2).cos();
    if sample.is_finite() {
        Ok(sample)
    } else {
        Err(SyntheticError::InvalidFloatParameter {
            parameter: "standard_normal_sample",
        })
    }
}
