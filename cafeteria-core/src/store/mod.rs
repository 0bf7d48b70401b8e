//! Data access traits for rating submissions.
//!
//! [`RatingSource`] is the read side consumed by the scorer: it hands over a
//! materialised snapshot of stored submissions. [`RatingSink`] is the
//! append-only write side used by rating ingestion. Neither side validates
//! scores; aggregation decides what counts.

use crate::{RatingSubmission, VenueRating};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteRatingStore, SqliteRatingStoreError};

/// Read access to stored ratings.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use cafeteria_core::{MenuKey, RatingSource, RatingSubmission, VenueRating};
///
/// struct Fixed(Vec<RatingSubmission>);
///
/// impl RatingSource for Fixed {
///     type Error = Infallible;
///
///     fn submissions(&self) -> Result<Vec<RatingSubmission>, Self::Error> {
///         Ok(self.0.clone())
///     }
///
///     fn venue_ratings(&self, _venue: &str) -> Result<Vec<VenueRating>, Self::Error> {
///         Ok(Vec::new())
///     }
/// }
///
/// let source = Fixed(vec![RatingSubmission::new(MenuKey::new("Annex", "curry"))]);
/// assert_eq!(source.venue_submissions("Annex").map(|all| all.len()), Ok(1));
/// assert_eq!(source.venue_submissions("Dorm").map(|all| all.len()), Ok(0));
/// ```
pub trait RatingSource {
    /// Failure raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every stored menu submission, in recording order.
    ///
    /// # Errors
    /// Returns the storage error when the snapshot cannot be read.
    fn submissions(&self) -> Result<Vec<RatingSubmission>, Self::Error>;

    /// Return the submissions recorded against one venue.
    ///
    /// The default implementation filters [`RatingSource::submissions`].
    ///
    /// # Errors
    /// Returns the storage error when the snapshot cannot be read.
    fn venue_submissions(&self, venue: &str) -> Result<Vec<RatingSubmission>, Self::Error> {
        let mut all = self.submissions()?;
        all.retain(|submission| submission.key.venue == venue);
        Ok(all)
    }

    /// Return the star ratings appended to a venue, in recording order.
    ///
    /// # Errors
    /// Returns the storage error when the ratings cannot be read.
    fn venue_ratings(&self, venue: &str) -> Result<Vec<VenueRating>, Self::Error>;
}

/// Append-only write access to stored ratings.
pub trait RatingSink {
    /// Failure raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append a structured menu rating.
    ///
    /// # Errors
    /// Returns the storage error when the rating cannot be persisted.
    fn record_menu_rating(&mut self, submission: &RatingSubmission) -> Result<(), Self::Error>;

    /// Append a star rating to a venue.
    ///
    /// # Errors
    /// Returns the storage error when the rating cannot be persisted.
    fn record_venue_rating(&mut self, venue: &str, rating: VenueRating)
    -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::{RatingSink, RatingSource};
    use crate::{MenuKey, RatingSubmission, VenueRating, test_support::MemoryRatingStore};
    use rstest::rstest;

    #[rstest]
    fn memory_store_returns_submissions_in_order() {
        let mut store = MemoryRatingStore::default();
        let first = RatingSubmission::new(MenuKey::new("A", "m1")).with_score("taste", 4.0);
        let second = RatingSubmission::new(MenuKey::new("B", "m2")).with_score("taste", 2.0);
        store.record_menu_rating(&first).expect("infallible");
        store.record_menu_rating(&second).expect("infallible");

        let all = store.submissions().expect("infallible");

        assert_eq!(all, vec![first, second]);
    }

    #[rstest]
    fn venue_submissions_filter_by_exact_name() {
        let store = MemoryRatingStore::with_submissions([
            RatingSubmission::new(MenuKey::new("A", "m1")),
            RatingSubmission::new(MenuKey::new("a", "m1")),
            RatingSubmission::new(MenuKey::new("A", "m2")),
        ]);

        let found = store.venue_submissions("A").expect("infallible");

        let menus: Vec<&str> = found.iter().map(|s| s.key.menu.as_str()).collect();
        assert_eq!(menus, ["m1", "m2"]);
    }

    #[rstest]
    fn venue_ratings_are_kept_per_venue() {
        let mut store = MemoryRatingStore::default();
        store
            .record_venue_rating("A", VenueRating(4.0))
            .expect("infallible");
        store
            .record_venue_rating("B", VenueRating(1.0))
            .expect("infallible");

        assert_eq!(
            store.venue_ratings("A").expect("infallible"),
            vec![VenueRating(4.0)]
        );
        assert!(store.venue_ratings("C").expect("infallible").is_empty());
    }
}
