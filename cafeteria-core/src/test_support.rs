//! Test-only rating stores used by unit, behaviour and property tests.

use std::collections::HashMap;
use std::convert::Infallible;

use thiserror::Error;

use crate::{RatingSink, RatingSource, RatingSubmission, VenueRating};

/// In-memory rating store.
///
/// The store keeps submissions in recording order and is intended only for
/// small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryRatingStore {
    submissions: Vec<RatingSubmission>,
    venue_ratings: HashMap<String, Vec<VenueRating>>,
}

impl MemoryRatingStore {
    /// Create a store from a collection of submissions.
    #[must_use]
    pub fn with_submissions<I>(submissions: I) -> Self
    where
        I: IntoIterator<Item = RatingSubmission>,
    {
        Self {
            submissions: submissions.into_iter().collect(),
            venue_ratings: HashMap::new(),
        }
    }
}

impl RatingSource for MemoryRatingStore {
    type Error = Infallible;

    fn submissions(&self) -> Result<Vec<RatingSubmission>, Self::Error> {
        Ok(self.submissions.clone())
    }

    fn venue_ratings(&self, venue: &str) -> Result<Vec<VenueRating>, Self::Error> {
        Ok(self.venue_ratings.get(venue).cloned().unwrap_or_default())
    }
}

impl RatingSink for MemoryRatingStore {
    type Error = Infallible;

    fn record_menu_rating(&mut self, submission: &RatingSubmission) -> Result<(), Self::Error> {
        self.submissions.push(submission.clone());
        Ok(())
    }

    fn record_venue_rating(
        &mut self,
        venue: &str,
        rating: VenueRating,
    ) -> Result<(), Self::Error> {
        self.venue_ratings
            .entry(venue.to_owned())
            .or_default()
            .push(rating);
        Ok(())
    }
}

/// Error produced by [`FailingSource`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("rating source unavailable")]
pub struct SourceUnavailable;

/// `RatingSource` whose every read fails.
#[derive(Default, Debug, Copy, Clone)]
pub struct FailingSource;

impl RatingSource for FailingSource {
    type Error = SourceUnavailable;

    fn submissions(&self) -> Result<Vec<RatingSubmission>, Self::Error> {
        Err(SourceUnavailable)
    }

    fn venue_ratings(&self, _venue: &str) -> Result<Vec<VenueRating>, Self::Error> {
        Err(SourceUnavailable)
    }
}
