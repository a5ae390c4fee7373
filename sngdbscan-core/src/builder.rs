//! Builder utilities for configuring SNG-DBSCAN runs.
//!
//! Every parameter is validated once in [`SngDbscanBuilder::build`], before
//! any sampling takes place.

use std::num::NonZeroUsize;

use crate::{
    Result,
    distance::{Distance, Euclidean},
    error::SngDbscanError,
    sampling::{SamplingRate, SelfSampling},
    sng_dbscan::SngDbscan,
};

/// Configures and constructs [`SngDbscan`] instances.
///
/// # Examples
/// ```
/// use sngdbscan_core::{Manhattan, SamplingRate, SngDbscanBuilder};
///
/// let engine = SngDbscanBuilder::new()
///     .with_sampling_rate(0.25)
///     .with_max_distance(1.5)
///     .with_min_points(3)
///     .with_distance(Manhattan)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(engine.sampling_rate(), SamplingRate::Fixed(0.25));
/// assert_eq!(engine.min_points().get(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SngDbscanBuilder<D = Euclidean> {
    sampling_rate: SamplingRate,
    max_distance: f32,
    min_points: usize,
    self_sampling: SelfSampling,
    distance: D,
}

impl Default for SngDbscanBuilder {
    fn default() -> Self {
        Self {
            sampling_rate: SamplingRate::default(),
            max_distance: 0.5,
            min_points: 5,
            self_sampling: SelfSampling::default(),
            distance: Euclidean,
        }
    }
}

impl SngDbscanBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use sngdbscan_core::{SamplingRate, SngDbscanBuilder};
    ///
    /// let builder = SngDbscanBuilder::new();
    /// assert_eq!(builder.sampling_rate(), SamplingRate::Fixed(1.0));
    /// assert_eq!(builder.max_distance(), 0.5);
    /// assert_eq!(builder.min_points(), 5);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D> SngDbscanBuilder<D> {
    /// Uses a fixed sampling rate in `(0, 1]`.
    #[must_use]
    pub fn with_sampling_rate(mut self, rate: f64) -> Self {
        self.sampling_rate = SamplingRate::Fixed(rate);
        self
    }

    /// Uses the rate `min(1, factor * ln(n) / n)`, resolved per dataset.
    ///
    /// # Examples
    /// ```
    /// use sngdbscan_core::{SamplingRate, SngDbscanBuilder};
    ///
    /// let builder = SngDbscanBuilder::new().with_log_sampling_factor(20.0);
    /// assert_eq!(builder.sampling_rate(), SamplingRate::Logarithmic { factor: 20.0 });
    /// ```
    #[must_use]
    pub fn with_log_sampling_factor(mut self, factor: f64) -> Self {
        self.sampling_rate = SamplingRate::Logarithmic { factor };
        self
    }

    /// Replaces the sampling rate wholesale.
    #[must_use]
    pub fn with_sampling(mut self, rate: SamplingRate) -> Self {
        self.sampling_rate = rate;
        self
    }

    /// Returns the configured sampling rate.
    #[must_use]
    pub const fn sampling_rate(&self) -> SamplingRate {
        self.sampling_rate
    }

    /// Overrides the inclusive neighbour distance threshold.
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Returns the configured distance threshold.
    #[must_use]
    pub const fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Overrides the minimum degree of a core node.
    #[must_use]
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Returns the configured minimum degree.
    #[must_use]
    pub const fn min_points(&self) -> usize {
        self.min_points
    }

    /// Selects how a point's own index is kept out of its sample.
    #[must_use]
    pub fn with_self_sampling(mut self, policy: SelfSampling) -> Self {
        self.self_sampling = policy;
        self
    }

    /// Returns the configured self-sampling policy.
    #[must_use]
    pub const fn self_sampling(&self) -> SelfSampling {
        self.self_sampling
    }

    /// Swaps the distance function.
    ///
    /// # Examples
    /// ```
    /// use sngdbscan_core::SngDbscanBuilder;
    ///
    /// let engine = SngDbscanBuilder::new()
    ///     .with_distance(|a: &[f32], b: &[f32]| (a[0] - b[0]).abs())
    ///     .build()
    ///     .expect("builder configuration is valid");
    /// assert_eq!(engine.min_points().get(), 5);
    /// ```
    #[must_use]
    pub fn with_distance<E>(self, distance: E) -> SngDbscanBuilder<E> {
        SngDbscanBuilder {
            sampling_rate: self.sampling_rate,
            max_distance: self.max_distance,
            min_points: self.min_points,
            self_sampling: self.self_sampling,
            distance,
        }
    }
}

impl<D: Distance> SngDbscanBuilder<D> {
    /// Validates the configuration and constructs an [`SngDbscan`] instance.
    ///
    /// # Errors
    /// Returns [`SngDbscanError::InvalidSamplingRate`],
    /// [`SngDbscanError::SampleSizeUnsatisfiable`] or
    /// [`SngDbscanError::InvalidLogSamplingFactor`] for a bad sampling rate,
    /// [`SngDbscanError::InvalidMaxDistance`] when the threshold is negative
    /// or not finite, and [`SngDbscanError::InvalidMinPoints`] when
    /// `min_points` is zero.
    ///
    /// # Examples
    /// ```
    /// use sngdbscan_core::{SngDbscanBuilder, SngDbscanErrorCode};
    ///
    /// let err = SngDbscanBuilder::new()
    ///     .with_max_distance(-1.0)
    ///     .build()
    ///     .expect_err("negative thresholds are rejected");
    /// assert_eq!(err.code(), SngDbscanErrorCode::InvalidMaxDistance);
    /// ```
    pub fn build(self) -> Result<SngDbscan<D>> {
        let sampling_rate = self.sampling_rate.validate()?;
        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(SngDbscanError::InvalidMaxDistance {
                got: self.max_distance,
            });
        }
        let min_points = NonZeroUsize::new(self.min_points).ok_or(
            SngDbscanError::InvalidMinPoints {
                got: self.min_points,
            },
        )?;

        Ok(SngDbscan::new(
            sampling_rate,
            self.max_distance,
            min_points,
            self.self_sampling,
            self.distance,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SngDbscanErrorCode;
    use rstest::rstest;

    #[rstest]
    fn defaults_build() {
        let engine = SngDbscanBuilder::new().build().expect("defaults are valid");
        assert_eq!(engine.sampling_rate(), SamplingRate::Fixed(1.0));
        assert!((engine.max_distance() - 0.5).abs() < f32::EPSILON);
        assert_eq!(engine.min_points().get(), 5);
        assert_eq!(engine.self_sampling(), SelfSampling::Exclude);
        assert_eq!(engine.distance().name(), "euclidean");
    }

    #[rstest]
    #[case::zero_rate(SngDbscanBuilder::new().with_sampling_rate(0.0), SngDbscanErrorCode::InvalidSamplingRate)]
    #[case::rate_above_one(SngDbscanBuilder::new().with_sampling_rate(1.01), SngDbscanErrorCode::SampleSizeUnsatisfiable)]
    #[case::bad_factor(SngDbscanBuilder::new().with_log_sampling_factor(-2.0), SngDbscanErrorCode::InvalidLogSamplingFactor)]
    #[case::negative_distance(SngDbscanBuilder::new().with_max_distance(-0.1), SngDbscanErrorCode::InvalidMaxDistance)]
    #[case::nan_distance(SngDbscanBuilder::new().with_max_distance(f32::NAN), SngDbscanErrorCode::InvalidMaxDistance)]
    #[case::zero_min_points(SngDbscanBuilder::new().with_min_points(0), SngDbscanErrorCode::InvalidMinPoints)]
    fn build_rejects_invalid_parameters(
        #[case] builder: SngDbscanBuilder,
        #[case] expected: SngDbscanErrorCode,
    ) {
        let err = builder.build().expect_err("configuration must be rejected");
        assert_eq!(err.code(), expected);
        assert!(err.is_invalid_parameter());
    }

    #[rstest]
    fn zero_distance_threshold_is_allowed() {
        let engine = SngDbscanBuilder::new()
            .with_max_distance(0.0)
            .build()
            .expect("zero threshold is valid");
        assert!(engine.max_distance().abs() < f32::EPSILON);
    }
}
