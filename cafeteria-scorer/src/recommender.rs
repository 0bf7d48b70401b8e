//! Request-scoped recommendation pipeline over a rating source.
//!
//! Each call normalises the caller's preferences, reads a fresh snapshot from
//! the [`RatingSource`], aggregates it and ranks the result. Nothing is cached
//! between calls, so concurrent requests never observe each other.

#![forbid(unsafe_code)]

use cafeteria_core::{RankedRecommendation, RatingSource};
use log::{debug, warn};

use crate::{
    Aggregates, Aggregator, RankLimit, RawPreferences, RecommendError, VenueRatingSummary,
    WholeMenu, normalise, rank, summarise_venue, whole_menu,
};

/// Recommends menus by combining stored ratings with caller preferences.
///
/// # Examples
///
/// ```
/// use cafeteria_core::{MenuKey, RatingSubmission, test_support::MemoryRatingStore};
/// use cafeteria_scorer::{RawPreferences, Recommender};
///
/// let store = MemoryRatingStore::with_submissions([
///     RatingSubmission::new(MenuKey::new("Annex", "curry")).with_score("taste", 4.0),
///     RatingSubmission::new(MenuKey::new("Annex", "salad")).with_score("taste", 2.0),
/// ]);
/// let recommender = Recommender::new(store);
///
/// let picks = recommender
///     .recommend(&RawPreferences::new().with("taste", 1.0))
///     .unwrap();
/// assert_eq!(picks[0].menu, "curry");
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<S> {
    source: S,
    aggregator: Aggregator,
    limit: RankLimit,
}

impl<S: RatingSource> Recommender<S> {
    /// Build a recommender with the default dimensions, bounds and limit.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            aggregator: Aggregator::default(),
            limit: RankLimit::default(),
        }
    }

    /// Replace the aggregator, and with it the recognised dimensions.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Replace the default result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: RankLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Borrow the underlying rating source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Rank menus for `preferences` using the configured limit.
    ///
    /// # Errors
    /// Returns [`RecommendError::Preference`] when the preferences cannot be
    /// normalised and [`RecommendError::Source`] when the snapshot cannot be
    /// read.
    pub fn recommend(
        &self,
        preferences: &RawPreferences,
    ) -> Result<Vec<RankedRecommendation>, RecommendError> {
        self.recommend_with_limit(preferences, self.limit)
    }

    /// Rank menus for `preferences`, returning at most `limit` entries.
    ///
    /// Preferences are validated before any data is read.
    ///
    /// # Errors
    /// See [`Recommender::recommend`].
    pub fn recommend_with_limit(
        &self,
        preferences: &RawPreferences,
        limit: RankLimit,
    ) -> Result<Vec<RankedRecommendation>, RecommendError> {
        let weights = normalise(preferences, self.aggregator.dimensions()).inspect_err(|err| {
            warn!("rejecting preferences: {err}");
        })?;
        let aggregates = self.aggregates()?;
        let ranked = rank(&aggregates, &weights, limit);
        debug!(
            "ranked {} of {} menus (limit {})",
            ranked.len(),
            aggregates.len(),
            limit.get()
        );
        Ok(ranked)
    }

    /// Aggregate the current snapshot without scoring it.
    ///
    /// # Errors
    /// Returns [`RecommendError::Source`] when the snapshot cannot be read.
    pub fn aggregates(&self) -> Result<Aggregates, RecommendError> {
        let submissions = self.source.submissions().map_err(source_error)?;
        Ok(self.aggregator.aggregate(&submissions))
    }

    /// Every recorded rating for each menu of `venue`.
    ///
    /// # Errors
    /// Returns [`RecommendError::Source`] when the venue's ratings cannot be
    /// read.
    pub fn whole_menu(&self, venue: &str) -> Result<WholeMenu, RecommendError> {
        let submissions = self
            .source
            .venue_submissions(venue)
            .map_err(source_error)?;
        Ok(whole_menu(venue, &submissions))
    }

    /// Summarise the star ratings appended to `venue`.
    ///
    /// # Errors
    /// Returns [`RecommendError::Source`] when the ratings cannot be read.
    pub fn venue_summary(&self, venue: &str) -> Result<Option<VenueRatingSummary>, RecommendError> {
        let ratings = self.source.venue_ratings(venue).map_err(source_error)?;
        Ok(summarise_venue(venue, &ratings))
    }
}

fn source_error<E>(source: E) -> RecommendError
where
    E: std::error::Error + Send + Sync + 'static,
{
    RecommendError::Source {
        source: Box::new(source),
    }
}
