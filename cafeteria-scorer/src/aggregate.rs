//! Group raw submissions by menu and average each dimension.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use cafeteria_core::{
    AggregatedMenuRating, Dimension, DimensionSet, MenuKey, RatingSubmission, ScoreBounds,
};
use log::debug;

/// Per-menu means keyed by `(venue, menu)`.
pub type Aggregates = BTreeMap<MenuKey, AggregatedMenuRating>;

/// Running sum and count for one dimension of one menu.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: u32,
}

impl Accumulator {
    #[expect(
        clippy::float_arithmetic,
        reason = "means are accumulated as floating-point sums"
    )]
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count = self.count.saturating_add(1);
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "a mean divides the sum by the sample count"
    )]
    fn mean(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

#[derive(Debug, Default)]
struct MenuGroup {
    submissions: usize,
    dimensions: BTreeMap<Dimension, Accumulator>,
}

/// Averages stored scores over a fixed set of recognised dimensions.
///
/// Each dimension is averaged independently: a submission that lacks a
/// dimension, or stores a value outside [`ScoreBounds`], is left out of that
/// dimension's mean only. Menus with no usable value for any dimension do not
/// appear in the output.
///
/// # Examples
///
/// ```
/// use cafeteria_core::{Dimension, MenuKey, RatingSubmission};
/// use cafeteria_scorer::Aggregator;
///
/// let submissions = vec![
///     RatingSubmission::new(MenuKey::new("A", "m1"))
///         .with_score("taste", 4.0)
///         .with_score("portion", 2.0)
///         .with_score("price", 5.0),
///     RatingSubmission::new(MenuKey::new("A", "m1"))
///         .with_score("taste", 2.0)
///         .with_score("portion", 4.0)
///         .with_score("price", 3.0),
/// ];
///
/// let aggregates = Aggregator::default().aggregate(&submissions);
/// let rating = &aggregates[&MenuKey::new("A", "m1")];
/// assert_eq!(rating.mean(&Dimension::new("price").unwrap()), Some(4.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregator {
    dimensions: DimensionSet,
    bounds: ScoreBounds,
}

impl Aggregator {
    /// Create an aggregator for the given dimensions and admissible range.
    #[must_use]
    pub const fn new(dimensions: DimensionSet, bounds: ScoreBounds) -> Self {
        Self { dimensions, bounds }
    }

    /// Dimensions this aggregator averages.
    #[must_use]
    pub const fn dimensions(&self) -> &DimensionSet {
        &self.dimensions
    }

    /// Average every recognised dimension per `(venue, menu)` key.
    pub fn aggregate<'a, I>(&self, submissions: I) -> Aggregates
    where
        I: IntoIterator<Item = &'a RatingSubmission>,
    {
        let mut groups: BTreeMap<MenuKey, MenuGroup> = BTreeMap::new();
        let mut seen = 0_usize;
        for submission in submissions {
            seen = seen.saturating_add(1);
            let group = groups.entry(submission.key.clone()).or_default();
            group.submissions = group.submissions.saturating_add(1);
            for dimension in &self.dimensions {
                let Some(value) = submission.score(dimension.as_str()) else {
                    continue;
                };
                if !self.bounds.admits(value) {
                    debug!(
                        "excluding {dimension} score {value} for {} outside bounds",
                        submission.key
                    );
                    continue;
                }
                group
                    .dimensions
                    .entry(dimension.clone())
                    .or_default()
                    .push(value);
            }
        }

        let aggregates: Aggregates = groups
            .into_iter()
            .filter_map(|(key, group)| finish_group(key, group))
            .collect();
        debug!(
            "aggregated {seen} submissions into {} menus",
            aggregates.len()
        );
        aggregates
    }
}

fn finish_group(key: MenuKey, group: MenuGroup) -> Option<(MenuKey, AggregatedMenuRating)> {
    let means: BTreeMap<Dimension, f64> = group
        .dimensions
        .into_iter()
        .filter_map(|(dimension, accumulator)| accumulator.mean().map(|mean| (dimension, mean)))
        .collect();
    if means.is_empty() {
        debug!("dropping {key}: no usable scores");
        return None;
    }
    let rating = AggregatedMenuRating {
        key: key.clone(),
        submissions: group.submissions,
        means,
    };
    Some((key, rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn dimension(name: &str) -> Dimension {
        Dimension::new(name).expect("valid dimension")
    }

    fn submission(venue: &str, menu: &str, scores: &[(&str, f64)]) -> RatingSubmission {
        scores.iter().fold(
            RatingSubmission::new(MenuKey::new(venue, menu)),
            |acc, (name, value)| acc.with_score(*name, *value),
        )
    }

    #[fixture]
    fn aggregator() -> Aggregator {
        Aggregator::default()
    }

    #[rstest]
    fn case_variants_count_once_per_submission(aggregator: Aggregator) {
        let submissions = [
            submission("A", "m1", &[("taste", 1.0), ("Taste", 5.0)]),
            submission("A", "m1", &[("taste", 5.0)]),
        ];

        let aggregates = aggregator.aggregate(&submissions);

        let rating = aggregates
            .get(&MenuKey::new("A", "m1"))
            .expect("menu aggregated");
        assert_eq!(rating.submissions, 2);
        assert_eq!(rating.mean(&dimension("taste")), Some(3.0));
    }

    #[rstest]
    fn non_ascii_dimensions_are_recognised() {
        let dimensions = DimensionSet::new(["Äpfel"]).expect("valid dimensions");
        let aggregator = Aggregator::new(dimensions, ScoreBounds::default());
        let submissions = [submission("A", "m1", &[("Äpfel", 4.0)])];

        let aggregates = aggregator.aggregate(&submissions);

        let rating = aggregates
            .get(&MenuKey::new("A", "m1"))
            .expect("menu aggregated");
        assert_eq!(rating.mean(&dimension("äpfel")), Some(4.0));
    }

    #[rstest]
    fn averages_each_dimension(aggregator: Aggregator) {
        let submissions = [
            submission("A", "m1", &[("taste", 4.0), ("portion", 2.0), ("price", 5.0)]),
            submission("A", "m1", &[("taste", 2.0), ("portion", 4.0), ("price", 3.0)]),
        ];

        let aggregates = aggregator.aggregate(&submissions);

        let rating = aggregates
            .get(&MenuKey::new("A", "m1"))
            .expect("aggregate for A/m1");
        assert_eq!(rating.submissions, 2);
        assert_eq!(rating.mean(&dimension("taste")), Some(3.0));
        assert_eq!(rating.mean(&dimension("portion")), Some(3.0));
        assert_eq!(rating.mean(&dimension("price")), Some(4.0));
    }

    #[rstest]
    fn missing_dimension_only_affects_its_own_mean(aggregator: Aggregator) {
        let submissions = [
            submission("A", "m1", &[("taste", 5.0), ("price", 1.0)]),
            submission("A", "m1", &[("taste", 3.0), ("portion", 4.0), ("price", 3.0)]),
        ];

        let aggregates = aggregator.aggregate(&submissions);

        let rating = aggregates
            .get(&MenuKey::new("A", "m1"))
            .expect("aggregate for A/m1");
        assert_eq!(rating.mean(&dimension("taste")), Some(4.0));
        assert_eq!(rating.mean(&dimension("portion")), Some(4.0));
        assert_eq!(rating.mean(&dimension("price")), Some(2.0));
    }

    #[rstest]
    #[case(0.0)]
    #[case(9.0)]
    #[case(f64::NAN)]
    #[case(f64::NEG_INFINITY)]
    fn out_of_range_values_are_excluded(aggregator: Aggregator, #[case] bad: f64) {
        let submissions = [
            submission("A", "m1", &[("taste", bad), ("price", 2.0)]),
            submission("A", "m1", &[("taste", 3.0)]),
        ];

        let aggregates = aggregator.aggregate(&submissions);

        let rating = aggregates
            .get(&MenuKey::new("A", "m1"))
            .expect("aggregate for A/m1");
        assert_eq!(rating.mean(&dimension("taste")), Some(3.0));
        assert_eq!(rating.mean(&dimension("price")), Some(2.0));
        assert!(rating.mean(&dimension("portion")).is_none());
    }

    #[rstest]
    fn unrecognised_dimensions_are_ignored(aggregator: Aggregator) {
        let submissions = [submission("A", "m1", &[("taste", 4.0), ("spice", 5.0)])];

        let aggregates = aggregator.aggregate(&submissions);

        let rating = aggregates
            .get(&MenuKey::new("A", "m1"))
            .expect("aggregate for A/m1");
        assert_eq!(rating.means.len(), 1);
    }

    #[rstest]
    fn menus_without_usable_scores_are_absent(aggregator: Aggregator) {
        let submissions = [
            submission("A", "empty", &[]),
            submission("A", "junk", &[("taste", 42.0), ("noise", 3.0)]),
            submission("B", "m2", &[("portion", 5.0)]),
        ];

        let aggregates = aggregator.aggregate(&submissions);

        let keys: Vec<&MenuKey> = aggregates.keys().collect();
        assert_eq!(keys, vec![&MenuKey::new("B", "m2")]);
    }

    #[rstest]
    fn empty_corpus_yields_empty_aggregates(aggregator: Aggregator) {
        let submissions: [RatingSubmission; 0] = [];
        assert!(aggregator.aggregate(&submissions).is_empty());
    }

    #[rstest]
    fn same_menu_name_at_different_venues_stays_separate(aggregator: Aggregator) {
        let submissions = [
            submission("A", "curry", &[("taste", 5.0)]),
            submission("B", "curry", &[("taste", 1.0)]),
        ];

        let aggregates = aggregator.aggregate(&submissions);

        assert_eq!(aggregates.len(), 2);
    }

    #[rstest]
    fn custom_dimension_sets_are_honoured() {
        let dimensions = DimensionSet::new(["taste", "speed"]).expect("valid set");
        let aggregator = Aggregator::new(dimensions, ScoreBounds::default());
        let submissions = [submission("A", "m1", &[("speed", 2.0), ("price", 5.0)])];

        let aggregates = aggregator.aggregate(&submissions);

        let rating = aggregates
            .get(&MenuKey::new("A", "m1"))
            .expect("aggregate for A/m1");
        assert_eq!(rating.mean(&dimension("speed")), Some(2.0));
        assert!(rating.mean(&dimension("price")).is_none());
    }
}
