//! Per-venue view of every rating recorded against each menu.
//!
//! This is a reshaping of stored data, not a score: no averaging or
//! filtering of values happens here.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use cafeteria_core::RatingSubmission;
use serde::Serialize;

/// All ratings recorded against one menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuRatings {
    /// Venue offering the menu.
    pub venue: String,
    /// Score maps in recording order.
    pub ratings: Vec<BTreeMap<String, f64>>,
}

/// Ratings for each menu of a venue keyed by menu identifier.
pub type WholeMenu = BTreeMap<String, MenuRatings>;

/// Group a venue's submissions by menu.
///
/// Submissions for other venues are skipped.
///
/// # Examples
/// ```
/// use cafeteria_core::{MenuKey, RatingSubmission};
/// use cafeteria_scorer::whole_menu;
///
/// let submissions = [
///     RatingSubmission::new(MenuKey::new("Annex", "curry")).with_score("taste", 4.0),
///     RatingSubmission::new(MenuKey::new("Dorm", "curry")).with_score("taste", 1.0),
/// ];
/// let menu = whole_menu("Annex", &submissions);
/// assert_eq!(menu["curry"].ratings.len(), 1);
/// ```
pub fn whole_menu<'a, I>(venue: &str, submissions: I) -> WholeMenu
where
    I: IntoIterator<Item = &'a RatingSubmission>,
{
    let mut menus = WholeMenu::new();
    for submission in submissions
        .into_iter()
        .filter(|submission| submission.key.venue == venue)
    {
        menus
            .entry(submission.key.menu.clone())
            .or_insert_with(|| MenuRatings {
                venue: venue.to_owned(),
                ratings: Vec::new(),
            })
            .ratings
            .push(submission.scores.clone());
    }
    menus
}
