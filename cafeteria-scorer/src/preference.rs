//! Caller preference vectors and their normalisation into weights.
//!
//! Callers express relative importance per dimension in any units, for
//! example `taste=2, portion=1`. [`normalise`] rescales the recognised
//! entries so they sum to one, producing [`PreferenceWeights`] for the
//! ranker. The caller's [`RawPreferences`] is only borrowed.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use cafeteria_core::{AggregatedMenuRating, Dimension, DimensionSet};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::InvalidPreferenceError;

/// A raw weight as supplied by a caller: a number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// Numeric weight.
    Number(f64),
    /// Weight still in textual form, such as a query-string value.
    Text(String),
}

impl From<f64> for PreferenceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Error returned when a `name=value` pair cannot be split.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("preference '{pair}' must have the form name=value")]
pub struct MalformedPreferencePair {
    /// Offending input.
    pub pair: String,
}

/// Un-normalised preference weights keyed by name.
///
/// Names are trimmed and lowercased on insertion. Keys that do not name a
/// recognised dimension are carried but ignored by [`normalise`].
///
/// # Examples
/// ```
/// use cafeteria_scorer::RawPreferences;
///
/// let raw: RawPreferences = serde_json::from_str(r#"{"taste":"2","price":1}"#).unwrap();
/// let parsed = RawPreferences::from_pairs(["taste=2", "price=1"]).unwrap();
/// assert_eq!(raw.len(), parsed.len());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RawPreferences {
    entries: BTreeMap<String, PreferenceValue>,
}

impl RawPreferences {
    /// Create an empty preference vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a weight.
    pub fn insert(&mut self, name: &str, value: impl Into<PreferenceValue>) {
        self.entries
            .insert(name.trim().to_lowercase(), value.into());
    }

    /// Add a weight while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<PreferenceValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Build preferences from `name=value` pairs, keeping values as text.
    ///
    /// # Errors
    /// Returns [`MalformedPreferencePair`] when a pair lacks `=` or a name.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, MalformedPreferencePair>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut preferences = Self::new();
        for pair in pairs {
            let text = pair.as_ref();
            let Some((name, value)) = text.split_once('=') else {
                return Err(MalformedPreferencePair {
                    pair: text.to_owned(),
                });
            };
            if name.trim().is_empty() {
                return Err(MalformedPreferencePair {
                    pair: text.to_owned(),
                });
            }
            preferences.insert(name, value.trim());
        }
        Ok(preferences)
    }

    /// Return the raw value for a normalised name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PreferenceValue> {
        self.entries.get(name)
    }

    /// Number of supplied entries, recognised or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no entries were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for RawPreferences {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = BTreeMap::<String, PreferenceValue>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .fold(Self::new(), |acc, (name, value)| acc.with(&name, value)))
    }
}

/// Normalised weights: one entry per recognised dimension, summing to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceWeights {
    weights: BTreeMap<Dimension, f64>,
}

impl PreferenceWeights {
    /// Weight for `dimension`; zero when it is not recognised.
    #[must_use]
    pub fn weight(&self, dimension: &Dimension) -> f64 {
        self.weights.get(dimension).copied().unwrap_or(0.0)
    }

    /// Iterate over `(dimension, weight)` pairs in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (&Dimension, f64)> {
        self.weights.iter().map(|(dimension, weight)| (dimension, *weight))
    }

    /// Weighted sum of a menu's dimension means.
    ///
    /// A dimension without a mean contributes zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "scores are a weighted sum of means"
    )]
    pub fn score(&self, rating: &AggregatedMenuRating) -> f64 {
        self.weights
            .iter()
            .filter_map(|(dimension, weight)| rating.mean(dimension).map(|mean| mean * weight))
            .sum()
    }
}

/// Rescale the recognised entries of `raw` so they sum to one.
///
/// Recognised dimensions missing from `raw` get weight zero. Unrecognised
/// names are ignored.
///
/// # Errors
/// Returns [`InvalidPreferenceError`] when no recognised dimension is
/// present, when a recognised value is not a finite, non-negative number, or
/// when the recognised values sum to zero.
///
/// # Examples
/// ```
/// use cafeteria_core::{Dimension, DimensionSet};
/// use cafeteria_scorer::{RawPreferences, normalise};
///
/// let raw = RawPreferences::new()
///     .with("taste", 2.0)
///     .with("portion", 1.0)
///     .with("price", 1.0)
///     .with("utm_source", "newsletter");
/// let weights = normalise(&raw, &DimensionSet::default()).unwrap();
/// assert_eq!(weights.weight(&Dimension::new("taste").unwrap()), 0.5);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "normalisation sums the weights and divides by the total"
)]
pub fn normalise(
    raw: &RawPreferences,
    dimensions: &DimensionSet,
) -> Result<PreferenceWeights, InvalidPreferenceError> {
    let mut weights = BTreeMap::new();
    let mut recognised = 0_usize;
    for dimension in dimensions {
        let weight = match raw.get(dimension.as_str()) {
            Some(value) => {
                recognised = recognised.saturating_add(1);
                parse_weight(dimension, value)?
            }
            None => 0.0,
        };
        weights.insert(dimension.clone(), weight);
    }
    for ignored in raw.names().filter(|name| dimensions.recognise(name).is_none()) {
        debug!("ignoring unrecognised preference '{ignored}'");
    }
    if recognised == 0 {
        return Err(InvalidPreferenceError::NoRecognisedDimension {
            recognised: dimensions.to_string(),
        });
    }

    let total: f64 = weights.values().sum();
    if !total.is_finite() {
        return Err(InvalidPreferenceError::NonFinite {
            dimension: "total".to_owned(),
        });
    }
    if total == 0.0 {
        return Err(InvalidPreferenceError::ZeroTotal);
    }
    for weight in weights.values_mut() {
        *weight /= total;
    }
    Ok(PreferenceWeights { weights })
}

fn parse_weight(
    dimension: &Dimension,
    value: &PreferenceValue,
) -> Result<f64, InvalidPreferenceError> {
    let weight = match value {
        PreferenceValue::Number(number) => *number,
        PreferenceValue::Text(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| InvalidPreferenceError::NotNumeric {
                    dimension: dimension.to_string(),
                    value: text.clone(),
                })?
        }
    };
    if !weight.is_finite() {
        return Err(InvalidPreferenceError::NonFinite {
            dimension: dimension.to_string(),
        });
    }
    if weight < 0.0 {
        return Err(InvalidPreferenceError::Negative {
            dimension: dimension.to_string(),
            value: weight,
        });
    }
    Ok(weight)
}
