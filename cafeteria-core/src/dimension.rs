//! Rating dimensions: the named axes a menu is scored on.
//!
//! The set of recognised dimensions is configuration, not code. Every
//! component that aggregates or weights scores receives a [`DimensionSet`]
//! instead of naming individual axes.
//!
//! # Examples
//! ```
//! use cafeteria_core::{Dimension, DimensionSet};
//!
//! let set = DimensionSet::default();
//! assert_eq!(set.to_string(), "taste,portion,price");
//! assert!(set.contains(&Dimension::new("Taste").unwrap()));
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

const DEFAULT_DIMENSIONS: [&str; 3] = ["taste", "portion", "price"];

/// Field names used by serialised recommendations; dimensions may not shadow
/// them.
const RESERVED_NAMES: [&str; 3] = ["venue", "menu", "recommended"];

/// Errors returned when building dimensions or dimension sets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// The dimension name was blank.
    #[error("dimension name must not be empty")]
    Empty,
    /// The dimension name collides with a recommendation field.
    #[error("dimension name '{name}' is reserved")]
    Reserved {
        /// Offending name.
        name: String,
    },
    /// The same dimension was listed twice.
    #[error("dimension '{name}' is listed more than once")]
    Duplicate {
        /// Repeated name.
        name: String,
    },
    /// No dimensions were supplied.
    #[error("at least one rating dimension is required")]
    NoDimensions,
}

/// A single rating axis such as `taste`.
///
/// Names are trimmed and lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Dimension(String);

impl Dimension {
    /// Validate and construct a dimension.
    ///
    /// # Errors
    /// Returns [`DimensionError::Empty`] for blank names and
    /// [`DimensionError::Reserved`] for names used by recommendation output.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DimensionError> {
        let normalised = name.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(DimensionError::Empty);
        }
        if RESERVED_NAMES.contains(&normalised.as_str()) {
            return Err(DimensionError::Reserved { name: normalised });
        }
        Ok(Self(normalised))
    }

    /// Return the normalised name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Report whether a raw, caller-supplied key names this dimension.
    ///
    /// The key is folded the same way as in [`Dimension::new`].
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim().to_lowercase() == self.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Ordered, duplicate-free collection of recognised dimensions.
///
/// # Examples
/// ```
/// use cafeteria_core::DimensionSet;
///
/// let set: DimensionSet = "taste, price".parse().unwrap();
/// assert_eq!(set.len(), 2);
/// assert!("taste,taste".parse::<DimensionSet>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSet {
    dimensions: Vec<Dimension>,
}

impl DimensionSet {
    /// Build a set from names, preserving their order.
    ///
    /// # Errors
    /// Returns [`DimensionError`] when a name is invalid, repeated, or when
    /// no names are supplied.
    pub fn new<I, S>(names: I) -> Result<Self, DimensionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dimensions: Vec<Dimension> = Vec::new();
        for name in names {
            let dimension = Dimension::new(name)?;
            if dimensions.contains(&dimension) {
                return Err(DimensionError::Duplicate {
                    name: dimension.0,
                });
            }
            dimensions.push(dimension);
        }
        if dimensions.is_empty() {
            return Err(DimensionError::NoDimensions);
        }
        Ok(Self { dimensions })
    }

    /// Iterate over the dimensions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter()
    }

    /// Report whether `dimension` is recognised.
    #[must_use]
    pub fn contains(&self, dimension: &Dimension) -> bool {
        self.dimensions.contains(dimension)
    }

    /// Resolve a raw key against the recognised dimensions.
    #[must_use]
    pub fn recognise(&self, raw: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|dimension| dimension.matches(raw))
    }

    /// Number of recognised dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Always `false`; construction rejects empty sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

impl Default for DimensionSet {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS
                .iter()
                .map(|name| Dimension((*name).to_owned()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DimensionSet {
    type Item = &'a Dimension;
    type IntoIter = std::slice::Iter<'a, Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.dimensions.iter()
    }
}

impl fmt::Display for DimensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.dimensions.iter().map(Dimension::as_str).collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for DimensionSet {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(',').filter(|part| !part.trim().is_empty()))
    }
}
