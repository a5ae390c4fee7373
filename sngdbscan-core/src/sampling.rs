//! Candidate sampling for sampled-neighbourhood graph construction.
//!
//! Every point is compared against a uniform random subset of the other
//! points instead of the whole dataset. The subset size is a fraction of the
//! dataset size, drawn without replacement from a caller-owned random source
//! so runs are reproducible under a fixed seed.

use rand::{Rng, seq::index};

use crate::error::{Result, SngDbscanError};

/// Absorbs floating-point noise in `rate * n` before rounding up, so
/// `0.3 * 10` yields three candidates rather than four, and vanishing rates
/// round down to an empty sample.
const SAMPLE_SIZE_TOLERANCE: f64 = 1e-9;

/// How a point's own index is kept out of its neighbourhood.
///
/// Either way the graph never records a self-edge; the policies differ in
/// whether the point occupies a slot in its own sample.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SelfSampling {
    /// Remove the point from its own candidate pool, leaving `n - 1`
    /// candidates.
    #[default]
    Exclude,
    /// Sample from all `n` indices and drop the point itself when linking.
    DiscardSelfEdges,
}

impl SelfSampling {
    /// Returns the stable lowercase name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exclude => "exclude",
            Self::DiscardSelfEdges => "discard",
        }
    }
}

/// Sampling rate as configured by the caller.
///
/// # Examples
/// ```
/// use sngdbscan_core::SamplingRate;
///
/// assert_eq!(SamplingRate::Fixed(0.25).resolve(100), 0.25);
///
/// // 20 ln(n) / n, capped at 1.
/// let rate = SamplingRate::Logarithmic { factor: 20.0 }.resolve(1_000);
/// assert!((rate - 0.138_155).abs() < 1e-6);
/// assert_eq!(SamplingRate::Logarithmic { factor: 20.0 }.resolve(10), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SamplingRate {
    /// A fixed fraction in `(0, 1]`.
    Fixed(f64),
    /// `factor * ln(n) / n`, capped at `1`, resolved per dataset.
    Logarithmic {
        /// Multiplier applied to `ln(n) / n`.
        factor: f64,
    },
}

impl Default for SamplingRate {
    fn default() -> Self {
        Self::Fixed(1.0)
    }
}

impl SamplingRate {
    /// Checks the configured values without knowing the dataset size.
    ///
    /// # Errors
    /// Returns [`SngDbscanError::InvalidSamplingRate`] for non-finite or
    /// non-positive fixed rates, [`SngDbscanError::SampleSizeUnsatisfiable`]
    /// for fixed rates above `1`, and
    /// [`SngDbscanError::InvalidLogSamplingFactor`] for non-finite or
    /// non-positive factors.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Fixed(rate) => validate_fixed_rate(rate).map(Self::Fixed),
            Self::Logarithmic { factor } => {
                if factor.is_finite() && factor > 0.0 {
                    Ok(self)
                } else {
                    Err(SngDbscanError::InvalidLogSamplingFactor { got: factor })
                }
            }
        }
    }

    /// Resolves the rate for a dataset of `items` points.
    ///
    /// Logarithmic rates resolve to `1` for datasets of at most one point,
    /// where `ln(n) / n` would be zero.
    #[must_use]
    pub fn resolve(self, items: usize) -> f64 {
        match self {
            Self::Fixed(rate) => rate,
            Self::Logarithmic { factor } => {
                if items <= 1 {
                    return 1.0;
                }
                let n = items as f64;
                (factor * n.ln() / n).min(1.0)
            }
        }
    }
}

fn validate_fixed_rate(rate: f64) -> Result<f64> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(SngDbscanError::InvalidSamplingRate { got: rate });
    }
    if rate > 1.0 {
        return Err(SngDbscanError::SampleSizeUnsatisfiable { got: rate });
    }
    Ok(rate)
}

/// Draws uniform candidate samples without replacement.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sngdbscan_core::SamplingEngine;
///
/// let engine = SamplingEngine::new(0.5)?;
/// let mut rng = SmallRng::seed_from_u64(7);
/// let sample = engine.sample(10, &mut rng)?;
/// assert_eq!(sample.len(), 5);
/// assert!(sample.windows(2).all(|pair| pair[0] < pair[1]));
/// # Ok::<(), sngdbscan_core::SngDbscanError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingEngine {
    rate: f64,
}

impl SamplingEngine {
    /// Creates an engine sampling `rate * n` candidates per point.
    ///
    /// # Errors
    /// Returns [`SngDbscanError::InvalidSamplingRate`] when `rate` is not a
    /// finite positive number and [`SngDbscanError::SampleSizeUnsatisfiable`]
    /// when it exceeds `1`.
    pub fn new(rate: f64) -> Result<Self> {
        validate_fixed_rate(rate).map(|rate| Self { rate })
    }

    /// Returns the sampling rate.
    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the number of candidates drawn from a pool of `population`
    /// indices: `ceil(rate * population)`, clamped to `population`.
    ///
    /// # Examples
    /// ```
    /// use sngdbscan_core::SamplingEngine;
    ///
    /// let engine = SamplingEngine::new(0.3)?;
    /// assert_eq!(engine.sample_size(10), 3);
    /// assert_eq!(engine.sample_size(11), 4);
    /// assert_eq!(SamplingEngine::new(1e-12)?.sample_size(10), 0);
    /// # Ok::<(), sngdbscan_core::SngDbscanError>(())
    /// ```
    #[must_use]
    pub fn sample_size(&self, population: usize) -> usize {
        let expected = self.rate * population as f64;
        let size = (expected - SAMPLE_SIZE_TOLERANCE).ceil();
        if size <= 0.0 {
            0
        } else {
            (size as usize).min(population)
        }
    }

    /// Returns the number of candidates each point receives in a dataset of
    /// `items` points under `policy`.
    ///
    /// The size is computed from the full dataset size and then clamped to
    /// the candidate pool, which loses one slot under
    /// [`SelfSampling::Exclude`].
    #[must_use]
    pub fn candidate_count(&self, items: usize, policy: SelfSampling) -> usize {
        let size = self.sample_size(items);
        match policy {
            SelfSampling::Exclude => size.min(items.saturating_sub(1)),
            SelfSampling::DiscardSelfEdges => size,
        }
    }

    /// Draws `sample_size(population)` distinct indices from
    /// `0..population`, sorted ascending.
    ///
    /// # Errors
    /// Returns [`SngDbscanError::EmptyPopulation`] when `population` is zero.
    pub fn sample<R: Rng + ?Sized>(&self, population: usize, rng: &mut R) -> Result<Vec<usize>> {
        if population == 0 {
            return Err(SngDbscanError::EmptyPopulation);
        }
        Ok(draw(rng, population, self.sample_size(population)))
    }

    /// Draws distinct indices from `0..population` with `excluded` removed
    /// from the pool, sorted ascending.
    ///
    /// The sample size is computed from `population` and clamped to the
    /// `population - 1` remaining candidates.
    ///
    /// # Errors
    /// Returns [`SngDbscanError::EmptyPopulation`] when `population` is zero.
    pub fn sample_excluding<R: Rng + ?Sized>(
        &self,
        population: usize,
        excluded: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        if population == 0 {
            return Err(SngDbscanError::EmptyPopulation);
        }
        Ok(self.draw_excluding(population, excluded, rng))
    }

    /// Draws the candidates for `point` under `policy`.
    ///
    /// Callers guarantee `point < items`.
    pub(crate) fn candidates_for<R: Rng + ?Sized>(
        &self,
        items: usize,
        point: usize,
        policy: SelfSampling,
        rng: &mut R,
    ) -> Vec<usize> {
        match policy {
            SelfSampling::Exclude => self.draw_excluding(items, point, rng),
            SelfSampling::DiscardSelfEdges => draw(rng, items, self.sample_size(items)),
        }
    }

    fn draw_excluding<R: Rng + ?Sized>(
        &self,
        population: usize,
        excluded: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        if excluded >= population {
            return draw(rng, population, self.sample_size(population));
        }
        let pool = population - 1;
        let amount = self.sample_size(population).min(pool);
        // Draw from the shrunken pool and shift everything at or above the
        // excluded index up by one.
        let mut sample = draw(rng, pool, amount);
        for candidate in &mut sample {
            if *candidate >= excluded {
                *candidate += 1;
            }
        }
        sample
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, pool: usize, amount: usize) -> Vec<usize> {
    if amount == 0 {
        return Vec::new();
    }
    let mut sample = index::sample(rng, pool, amount).into_vec();
    sample.sort_unstable();
    sample
}
