//! Error types raised while normalising preferences and producing rankings.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Reasons a caller's preference vector cannot be normalised.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidPreferenceError {
    /// None of the supplied keys names a recognised dimension.
    #[error("preferences must weight at least one of: {recognised}")]
    NoRecognisedDimension {
        /// Comma-separated list of recognised dimensions.
        recognised: String,
    },
    /// The recognised weights sum to zero, so no ratio exists.
    #[error("preference weights must not all be zero")]
    ZeroTotal,
    /// A recognised weight was not a number.
    #[error("preference weight for {dimension} is not a number: {value:?}")]
    NotNumeric {
        /// Dimension whose weight failed to parse.
        dimension: String,
        /// Raw text supplied by the caller.
        value: String,
    },
    /// A recognised weight was below zero.
    #[error("preference weight for {dimension} must not be negative, got {value}")]
    Negative {
        /// Dimension carrying the negative weight.
        dimension: String,
        /// Supplied weight.
        value: f64,
    },
    /// A recognised weight, or the weight total, was NaN or infinite.
    #[error("preference weight for {dimension} must be finite")]
    NonFinite {
        /// Dimension carrying the non-finite weight, or `total`.
        dimension: String,
    },
}

/// Error returned by [`RankLimit::new`](crate::RankLimit::new).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("recommendation limit must be a positive integer")]
pub struct RankLimitError;

/// Failures surfaced by the composed recommendation pipeline.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The caller's preferences were rejected before any data was read.
    #[error(transparent)]
    Preference(#[from] InvalidPreferenceError),
    /// Reading the rating snapshot failed.
    #[error("failed to read rating submissions: {source}")]
    Source {
        /// Error reported by the rating source.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
