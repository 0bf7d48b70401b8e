//! Raw rating records as they come out of storage.
//!
//! Submissions are immutable snapshots. They keep scores keyed by the raw
//! stored names so that aggregation, not ingestion, decides which entries
//! count.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Identifies one menu item at one venue.
///
/// Keys order lexicographically by venue and then by menu, which is the
/// tie-break used when ranking equal scores.
///
/// # Examples
/// ```
/// use cafeteria_core::MenuKey;
///
/// let a = MenuKey::new("Annex", "bibimbap");
/// let b = MenuKey::new("Annex", "curry");
/// assert!(a < b);
/// assert_eq!(a.to_string(), "Annex/bibimbap");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuKey {
    /// Venue (cafeteria) name.
    pub venue: String,
    /// Menu identifier within the venue.
    pub menu: String,
}

impl MenuKey {
    /// Construct a key from venue and menu names.
    #[must_use]
    pub fn new(venue: impl Into<String>, menu: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            menu: menu.into(),
        }
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.venue, self.menu)
    }
}

/// One visitor's scores for one menu item.
///
/// # Examples
/// ```
/// use cafeteria_core::{MenuKey, RatingSubmission};
///
/// let submission = RatingSubmission::new(MenuKey::new("Annex", "curry"))
///     .with_score("taste", 4.0)
///     .with_score("price", 5.0);
/// assert_eq!(submission.score("taste"), Some(4.0));
/// assert!(submission.score("portion").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingSubmission {
    /// Menu the scores apply to.
    pub key: MenuKey,
    /// Scores keyed by the stored dimension name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scores: BTreeMap<String, f64>,
}

impl RatingSubmission {
    /// Create a submission without scores.
    #[must_use]
    pub const fn new(key: MenuKey) -> Self {
        Self {
            key,
            scores: BTreeMap::new(),
        }
    }

    /// Add a score while returning `self` for chaining.
    #[must_use]
    pub fn with_score(mut self, name: impl Into<String>, value: f64) -> Self {
        self.scores.insert(name.into(), value);
        self
    }

    /// Return the score stored under `name`, matching case-insensitively.
    ///
    /// An exact key wins over keys that differ only in case or padding, so a
    /// payload holding both `taste` and `Taste` yields one value.
    #[must_use]
    pub fn score(&self, name: &str) -> Option<f64> {
        if let Some(value) = self.scores.get(name) {
            return Some(*value);
        }
        let folded = name.trim().to_lowercase();
        self.scores
            .iter()
            .find(|(key, _)| key.trim().to_lowercase() == folded)
            .map(|(_, value)| *value)
    }
}

/// Errors returned by [`ScoreBounds::new`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScoreBoundsError {
    /// A bound was NaN or infinite.
    #[error("score bounds must be finite")]
    NonFinite,
    /// The lower bound exceeded the upper bound.
    #[error("score lower bound {min} exceeds upper bound {max}")]
    Inverted {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}

/// Inclusive range a stored score must fall into to be counted.
///
/// # Examples
/// ```
/// use cafeteria_core::ScoreBounds;
///
/// let bounds = ScoreBounds::default();
/// assert!(bounds.admits(5.0));
/// assert!(!bounds.admits(0.0));
/// assert!(!bounds.admits(f64::NAN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBounds {
    min: f64,
    max: f64,
}

impl ScoreBounds {
    /// Validate and construct bounds.
    ///
    /// # Errors
    /// Returns [`ScoreBoundsError`] for non-finite or inverted bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, ScoreBoundsError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ScoreBoundsError::NonFinite);
        }
        if min > max {
            return Err(ScoreBoundsError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    /// Report whether `value` is finite and inside the bounds.
    #[must_use]
    pub fn admits(self, value: f64) -> bool {
        value.is_finite() && (self.min..=self.max).contains(&value)
    }
}

impl Default for ScoreBounds {
    /// The one-to-five star scale.
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

/// A star rating appended to a venue as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VenueRating(pub f64);
