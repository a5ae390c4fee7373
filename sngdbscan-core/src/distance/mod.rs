//! Distance capability used by the neighbour linker.
//!
//! The linker only needs a symmetric, non-negative function of two vectors.
//! [`Distance`] captures that as a single-method trait so alternative metrics
//! can replace the Euclidean default without touching the pipeline. Inputs are
//! assumed to come from a validated [`crate::PointSet`]: equal length, finite
//! coordinates.

mod cosine;
mod euclidean;
mod manhattan;
mod types;

pub use self::cosine::{Cosine, cosine_distance};
pub use self::euclidean::{Euclidean, euclidean_distance};
pub use self::manhattan::{Manhattan, manhattan_distance};
pub use self::types::{Distance, Metric};
