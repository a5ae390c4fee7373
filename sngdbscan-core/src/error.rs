//! Error types for the SNG-DBSCAN core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.
//! Parameter validation happens once, before any sampling begins, so every
//! variant here describes a failure that retrying with the same inputs cannot
//! fix.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while validating a [`crate::PointSet`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PointSetError {
    /// A row's length differed from the first row's length.
    #[error("row {row} has dimension {actual} but expected {expected}")]
    DimensionMismatch {
        /// Row whose length disagreed with the first row.
        row: usize,
        /// Dimension established by the first row.
        expected: usize,
        /// Dimension of the offending row.
        actual: usize,
    },
    /// Points must have a positive dimension.
    #[error("points must have positive dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("row {row} contains a non-finite value at position {column}: {value}")]
    NonFinite {
        /// Row holding the offending coordinate.
        row: usize,
        /// Position of the coordinate within the row.
        column: usize,
        /// The offending value.
        value: f32,
    },
    /// A flat buffer's length was not a multiple of the declared dimension.
    #[error("flat buffer of length {len} is not a multiple of dimension {dimension}")]
    RaggedBuffer {
        /// Length of the supplied buffer.
        len: usize,
        /// Declared dimension.
        dimension: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PointSetError`] variants.
    enum PointSetErrorCode for PointSetError {
        /// A row's length differed from the first row's length.
        DimensionMismatch => DimensionMismatch { .. } => "POINT_SET_DIMENSION_MISMATCH",
        /// Points must have a positive dimension.
        ZeroDimension => ZeroDimension => "POINT_SET_ZERO_DIMENSION",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "POINT_SET_NON_FINITE",
        /// A flat buffer's length was not a multiple of the declared dimension.
        RaggedBuffer => RaggedBuffer { .. } => "POINT_SET_RAGGED_BUFFER",
    }
}

/// Error type produced when configuring or running [`crate::SngDbscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SngDbscanError {
    /// Sampling rate must be finite and strictly positive.
    #[error("sampling_rate must be finite and greater than 0 (got {got})")]
    InvalidSamplingRate {
        /// The rejected sampling rate.
        got: f64,
    },
    /// Sampling rate asks for more distinct candidates than any pool holds.
    #[error("sampling_rate {got} exceeds 1 and cannot be satisfied without replacement")]
    SampleSizeUnsatisfiable {
        /// The rejected sampling rate.
        got: f64,
    },
    /// Logarithmic sampling factor must be finite and strictly positive.
    #[error("log sampling factor must be finite and greater than 0 (got {got})")]
    InvalidLogSamplingFactor {
        /// The rejected factor.
        got: f64,
    },
    /// Maximum neighbour distance must be finite and non-negative.
    #[error("max_distance must be finite and at least 0 (got {got})")]
    InvalidMaxDistance {
        /// The rejected distance threshold.
        got: f32,
    },
    /// Minimum neighbour count must be at least one.
    #[error("min_points must be at least 1 (got {got})")]
    InvalidMinPoints {
        /// The rejected minimum.
        got: usize,
    },
    /// A sample was requested from an empty population.
    #[error("cannot sample from an empty population")]
    EmptyPopulation,
    /// The supplied points failed validation.
    #[error("invalid points: {error}")]
    PointSet {
        #[source]
        /// Underlying validation failure.
        error: PointSetError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SngDbscanError`] variants.
    enum SngDbscanErrorCode for SngDbscanError {
        /// Sampling rate must be finite and strictly positive.
        InvalidSamplingRate => InvalidSamplingRate { .. } => "SNG_DBSCAN_INVALID_SAMPLING_RATE",
        /// Sampling rate asks for more distinct candidates than any pool holds.
        SampleSizeUnsatisfiable => SampleSizeUnsatisfiable { .. } => "SNG_DBSCAN_SAMPLE_SIZE_UNSATISFIABLE",
        /// Logarithmic sampling factor must be finite and strictly positive.
        InvalidLogSamplingFactor => InvalidLogSamplingFactor { .. } => "SNG_DBSCAN_INVALID_LOG_SAMPLING_FACTOR",
        /// Maximum neighbour distance must be finite and non-negative.
        InvalidMaxDistance => InvalidMaxDistance { .. } => "SNG_DBSCAN_INVALID_MAX_DISTANCE",
        /// Minimum neighbour count must be at least one.
        InvalidMinPoints => InvalidMinPoints { .. } => "SNG_DBSCAN_INVALID_MIN_POINTS",
        /// A sample was requested from an empty population.
        EmptyPopulation => EmptyPopulation => "SNG_DBSCAN_EMPTY_POPULATION",
        /// The supplied points failed validation.
        PointSetFailure => PointSet { .. } => "SNG_DBSCAN_POINT_SET_FAILURE",
    }
}

impl SngDbscanError {
    /// Returns `true` when the error reports an invalid algorithm parameter
    /// rather than invalid input data.
    ///
    /// # Examples
    /// ```
    /// use sngdbscan_core::SngDbscanError;
    ///
    /// assert!(SngDbscanError::InvalidMinPoints { got: 0 }.is_invalid_parameter());
    /// ```
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        !matches!(self, Self::PointSet { .. })
    }

    /// Retrieve the inner [`PointSetErrorCode`] when the error originated in
    /// point validation.
    #[must_use]
    pub const fn point_set_code(&self) -> Option<PointSetErrorCode> {
        match self {
            Self::PointSet { error } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<PointSetError> for SngDbscanError {
    fn from(error: PointSetError) -> Self {
        Self::PointSet { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SngDbscanError>;
