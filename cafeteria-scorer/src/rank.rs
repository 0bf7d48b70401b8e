//! Score aggregated menus against preference weights and keep the best.
#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use cafeteria_core::{AggregatedMenuRating, RankedRecommendation};

use crate::{Aggregates, PreferenceWeights, RankLimitError};

const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

/// Maximum number of recommendations returned.
///
/// # Examples
/// ```
/// use cafeteria_scorer::RankLimit;
///
/// assert_eq!(RankLimit::default().get(), 20);
/// assert!(RankLimit::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankLimit(NonZeroUsize);

impl RankLimit {
    /// Validate and construct a limit.
    ///
    /// # Errors
    /// Returns [`RankLimitError`] when `limit` is zero.
    pub fn new(limit: usize) -> Result<Self, RankLimitError> {
        NonZeroUsize::new(limit).map(Self).ok_or(RankLimitError)
    }

    /// The limit as a plain count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for RankLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

/// Rank aggregated menus by their preference-weighted score.
///
/// Results are ordered by score, highest first. Equal scores fall back to
/// the menu key, so `(venue, menu)` ascending decides ties. At most `limit`
/// entries are returned; an empty input yields an empty list.
#[must_use]
pub fn rank(
    aggregates: &Aggregates,
    weights: &PreferenceWeights,
    limit: RankLimit,
) -> Vec<RankedRecommendation> {
    let mut scored: Vec<(f64, &AggregatedMenuRating)> = aggregates
        .values()
        .map(|rating| (weights.score(rating), rating))
        .collect();
    scored.sort_by(|(left_score, left), (right_score, right)| {
        compare_scores(*left_score, *right_score).then_with(|| left.key.cmp(&right.key))
    });
    scored.truncate(limit.get());
    scored
        .into_iter()
        .map(|(recommended, rating)| RankedRecommendation {
            venue: rating.key.venue.clone(),
            menu: rating.key.menu.clone(),
            recommended,
            rating: rating.means.clone(),
        })
        .collect()
}

/// Descending order; NaN sinks below every number and signed zeros tie.
fn compare_scores(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
    }
}
