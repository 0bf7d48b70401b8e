//! Preference-weighted menu recommendations.
//!
//! The crate turns raw rating submissions into a ranked list in three pure
//! stages:
//! - **Aggregation** groups submissions by `(venue, menu)` and averages each
//!   recognised dimension independently ([`Aggregator`]).
//! - **Normalisation** rescales a caller's raw preference vector so the
//!   recognised weights sum to one, rejecting vectors that cannot be
//!   rescaled ([`normalise`]).
//! - **Ranking** scores each aggregate as the weighted sum of its means,
//!   orders by score with a `(venue, menu)` tie-break and keeps the best
//!   ([`rank`]).
//!
//! [`Recommender`] composes the stages over a
//! [`RatingSource`](cafeteria_core::RatingSource), reading a fresh snapshot
//! per call.
//!
//! # Examples
//!
//! ```
//! use cafeteria_core::{MenuKey, RatingSubmission};
//! use cafeteria_scorer::{Aggregator, RankLimit, RawPreferences, recommend};
//!
//! let submissions = [
//!     RatingSubmission::new(MenuKey::new("Annex", "curry"))
//!         .with_score("taste", 4.0)
//!         .with_score("portion", 2.0)
//!         .with_score("price", 5.0),
//!     RatingSubmission::new(MenuKey::new("Annex", "salad"))
//!         .with_score("taste", 2.0)
//!         .with_score("portion", 5.0)
//!         .with_score("price", 2.0),
//! ];
//! let preferences = RawPreferences::from_pairs(["taste=2", "portion=1", "price=1"]).unwrap();
//!
//! let picks = recommend(
//!     &submissions,
//!     &preferences,
//!     &Aggregator::default(),
//!     RankLimit::default(),
//! )
//! .unwrap();
//! assert_eq!(picks[0].menu, "curry");
//! assert_eq!(picks[0].recommended, 3.75);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use cafeteria_core::{RankedRecommendation, RatingSubmission};

mod aggregate;
mod error;
mod preference;
mod rank;
mod recommender;
mod venue;
mod whole_menu;

pub use aggregate::{Aggregates, Aggregator};
pub use error::{InvalidPreferenceError, RankLimitError, RecommendError};
pub use preference::{
    MalformedPreferencePair, PreferenceValue, PreferenceWeights, RawPreferences, normalise,
};
pub use rank::{RankLimit, rank};
pub use recommender::Recommender;
pub use venue::{VenueRatingSummary, summarise_venue};
pub use whole_menu::{MenuRatings, WholeMenu, whole_menu};

/// Run the full pipeline over an in-memory snapshot.
///
/// Preferences are normalised against the aggregator's dimensions before the
/// snapshot is touched.
///
/// # Errors
/// Returns [`InvalidPreferenceError`] when `preferences` cannot be
/// normalised.
pub fn recommend<'a, I>(
    submissions: I,
    preferences: &RawPreferences,
    aggregator: &Aggregator,
    limit: RankLimit,
) -> Result<Vec<RankedRecommendation>, InvalidPreferenceError>
where
    I: IntoIterator<Item = &'a RatingSubmission>,
{
    let weights = normalise(preferences, aggregator.dimensions())?;
    let aggregates = aggregator.aggregate(submissions);
    Ok(rank(&aggregates, &weights, limit))
}
