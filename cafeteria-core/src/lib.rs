//! Core domain types for cafeteria menu ratings.
//!
//! These models describe what is stored (raw submissions and venue stars),
//! what is derived per request (aggregated means and ranked picks) and the
//! traits through which storage is reached. Constructors return `Result` to
//! surface invalid configuration early; stored data is never rejected here.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod dimension;
pub mod recommendation;
pub mod store;
pub mod submission;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use dimension::{Dimension, DimensionError, DimensionSet};
pub use recommendation::{AggregatedMenuRating, RankedRecommendation};
pub use store::{RatingSink, RatingSource};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteRatingStore, SqliteRatingStoreError};
pub use submission::{MenuKey, RatingSubmission, ScoreBounds, ScoreBoundsError, VenueRating};
