//! Derived, per-request results: aggregated means and ranked picks.

use std::collections::BTreeMap;

use crate::{Dimension, MenuKey};

/// Mean score per dimension for one menu item.
///
/// A dimension with no usable stored values is absent from `means`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedMenuRating {
    /// Menu the means describe.
    pub key: MenuKey,
    /// Number of submissions recorded against the menu.
    pub submissions: usize,
    /// Arithmetic mean for each dimension with at least one usable value.
    pub means: BTreeMap<Dimension, f64>,
}

impl AggregatedMenuRating {
    /// Return the mean for `dimension`, if any value contributed to it.
    #[must_use]
    pub fn mean(&self, dimension: &Dimension) -> Option<f64> {
        self.means.get(dimension).copied()
    }
}

/// A menu item with its preference-weighted score.
///
/// Serialises as a flat record: `venue`, `menu`, `recommended`, then one
/// field per dimension mean.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use cafeteria_core::{Dimension, RankedRecommendation};
///
/// let pick = RankedRecommendation {
///     venue: "Annex".into(),
///     menu: "curry".into(),
///     recommended: 3.75,
///     rating: BTreeMap::from([(Dimension::new("taste").unwrap(), 4.0)]),
/// };
/// let json = serde_json::to_value(&pick).unwrap();
/// assert_eq!(json["taste"], 4.0);
/// assert_eq!(json["recommended"], 3.75);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedRecommendation {
    /// Venue offering the menu.
    pub venue: String,
    /// Menu identifier.
    pub menu: String,
    /// Composite preference-weighted score.
    pub recommended: f64,
    /// Underlying dimension means.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rating: BTreeMap<Dimension, f64>,
}

impl RankedRecommendation {
    /// Key of the recommended menu.
    #[must_use]
    pub fn key(&self) -> MenuKey {
        MenuKey::new(self.venue.clone(), self.menu.clone())
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn recommendation_serialises_flat() {
        let taste = Dimension::new("taste").expect("dimension");
        let price = Dimension::new("price").expect("dimension");
        let pick = RankedRecommendation {
            venue: "A".to_owned(),
            menu: "m1".to_owned(),
            recommended: 3.75,
            rating: BTreeMap::from([(taste, 4.0), (price, 5.0)]),
        };

        let json = serde_json::to_value(&pick).expect("serialise");

        assert_eq!(
            json,
            serde_json::json!({
                "venue": "A",
                "menu": "m1",
                "recommended": 3.75,
                "taste": 4.0,
                "price": 5.0,
            })
        );
    }

    #[rstest]
    fn recommendation_deserialises_flat() {
        let json = r#"{"venue":"A","menu":"m1","recommended":2.5,"portion":3.0}"#;
        let pick: RankedRecommendation = serde_json::from_str(json).expect("parse");
        let portion = Dimension::new("portion").expect("dimension");
        assert_eq!(pick.rating.get(&portion), Some(&3.0));
        assert_eq!(pick.key(), MenuKey::new("A", "m1"));
    }
}
