//! Benchmark parameter types.
//!
//! Each struct renders as the Criterion parameter label for one benchmark
//! case.

use std::fmt;

use sngdbscan_core::SamplingRate;

/// Parameters for an end-to-end fit benchmark.
#[derive(Clone, Copy, Debug)]
pub struct FitBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Sampling rate under test.
    pub sampling_rate: SamplingRate,
}

impl fmt::Display for FitBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{}", self.point_count, RateLabel(self.sampling_rate))
    }
}

/// Parameters for a graph construction benchmark.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Fixed sampling rate in `(0, 1]`.
    pub sampling_rate: f64,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},s={}", self.point_count, self.sampling_rate)
    }
}

/// Parameters for the exact reference benchmark.
#[derive(Clone, Copy, Debug)]
pub struct ReferenceBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
}

impl fmt::Display for ReferenceBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.point_count)
    }
}

struct RateLabel(SamplingRate);

impl fmt::Display for RateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SamplingRate::Fixed(rate) => write!(f, "s={rate}"),
            SamplingRate::Logarithmic { factor } => write!(f, "s={factor}ln(n)/n"),
        }
    }
}
