//! Facade crate for cafeteria menu ratings and recommendations.
//!
//! This crate re-exports the core domain types, the recommendation pipeline
//! and, behind the `store-sqlite` feature, the SQLite rating store.

#![forbid(unsafe_code)]

pub use cafeteria_core::{
    AggregatedMenuRating, Dimension, DimensionError, DimensionSet, MenuKey, RankedRecommendation,
    RatingSink, RatingSource, RatingSubmission, ScoreBounds, ScoreBoundsError, VenueRating,
};

pub use cafeteria_scorer::{
    Aggregates, Aggregator, InvalidPreferenceError, MalformedPreferencePair, MenuRatings,
    PreferenceValue, PreferenceWeights, RankLimit, RankLimitError, RawPreferences,
    RecommendError, Recommender, VenueRatingSummary, WholeMenu, normalise, rank, recommend,
    summarise_venue, whole_menu,
};

#[cfg(feature = "store-sqlite")]
pub use cafeteria_core::{SqliteRatingStore, SqliteRatingStoreError};

#[cfg(feature = "test-support")]
pub use cafeteria_core::test_support;
