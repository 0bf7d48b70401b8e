//! Summaries of the star ratings appended to whole venues.
#![forbid(unsafe_code)]

use cafeteria_core::VenueRating;
use serde::Serialize;

/// Count and mean of a venue's usable star ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueRatingSummary {
    /// Venue the summary describes.
    pub venue: String,
    /// Number of finite ratings.
    pub count: usize,
    /// Mean of the finite ratings.
    pub mean: f64,
}

/// Summarise `ratings`, skipping non-finite values.
///
/// Returns `None` when no usable rating exists.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the mean divides a floating-point sum by a small count"
)]
pub fn summarise_venue(venue: &str, ratings: &[VenueRating]) -> Option<VenueRatingSummary> {
    let (sum, count) = ratings
        .iter()
        .map(|rating| rating.0)
        .filter(|stars| stars.is_finite())
        .fold((0.0_f64, 0_usize), |(sum, count), stars| {
            (sum + stars, count.saturating_add(1))
        });
    (count > 0).then(|| VenueRatingSummary {
        venue: venue.to_owned(),
        count,
        mean: sum / count as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn averages_finite_ratings() {
        let ratings = [VenueRating(5.0), VenueRating(f64::NAN), VenueRating(3.0)];

        let summary = summarise_venue("A", &ratings).expect("usable ratings");

        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 4.0);
    }

    #[rstest]
    #[case(&[])]
    #[case(&[VenueRating(f64::INFINITY)])]
    fn no_usable_ratings_yields_none(#[case] ratings: &[VenueRating]) {
        assert!(summarise_venue("A", ratings).is_none());
    }
}
