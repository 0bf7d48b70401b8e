#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for preference-weighted recommendations.

use std::cell::RefCell;

use cafeteria_core::{
    MenuKey, RankedRecommendation, RatingSubmission, test_support::MemoryRatingStore,
};
use cafeteria_scorer::{InvalidPreferenceError, RawPreferences, RecommendError, Recommender};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    submissions: RefCell<Vec<RatingSubmission>>,
    outcome: RefCell<Option<Result<Vec<RankedRecommendation>, RecommendError>>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        submissions: RefCell::new(Vec::new()),
        outcome: RefCell::new(None),
    }
}

fn rated(venue: &str, menu: &str, taste: f64, portion: f64, price: f64) -> RatingSubmission {
    RatingSubmission::new(MenuKey::new(venue, menu))
        .with_score("taste", taste)
        .with_score("portion", portion)
        .with_score("price", price)
}

fn run(context: &TestContext, preferences: &RawPreferences) {
    let store = MemoryRatingStore::with_submissions(context.submissions.borrow().clone());
    let outcome = Recommender::new(store).recommend(preferences);
    *context.outcome.borrow_mut() = Some(outcome);
}

fn picks(context: &TestContext) -> Vec<RankedRecommendation> {
    context
        .outcome
        .borrow_mut()
        .take()
        .expect("recommendations should be requested")
        .expect("recommendations should succeed")
}

#[given("ratings for two menus at one venue")]
fn two_menus(context: &TestContext) {
    *context.submissions.borrow_mut() = vec![
        rated("Annex", "curry", 4.0, 1.0, 5.0),
        rated("Annex", "curry", 4.0, 3.0, 5.0),
        rated("Annex", "salad", 1.0, 5.0, 2.0),
        rated("Annex", "salad", 3.0, 5.0, 2.0),
    ];
}

#[given("ratings for twenty five menus at one venue")]
#[expect(
    clippy::float_arithmetic,
    reason = "fixture scores are derived from small indices"
)]
fn many_menus(context: &TestContext) {
    *context.submissions.borrow_mut() = (0..25_u32)
        .map(|index| {
            let taste = 1.0 + f64::from(index) * 0.16;
            let price = 5.0 - f64::from(index) * 0.1;
            rated("Annex", &format!("menu-{index:02}"), taste, 3.0, price)
        })
        .collect();
}

#[given("identical ratings for menus at two venues")]
fn tied_menus(context: &TestContext) {
    *context.submissions.borrow_mut() = vec![
        rated("Dorm", "b", 4.0, 4.0, 4.0),
        rated("Annex", "z", 4.0, 4.0, 4.0),
        rated("Annex", "a", 4.0, 4.0, 4.0),
    ];
}

#[when("I ask for recommendations weighting taste twice as much as portion and price")]
fn weighted_taste(context: &TestContext) {
    let preferences = RawPreferences::from_pairs(["taste=2", "portion=1", "price=1"])
        .expect("well-formed pairs");
    run(context, &preferences);
}

#[when("I ask for recommendations with every weight set to zero")]
fn all_zero(context: &TestContext) {
    let preferences = RawPreferences::new()
        .with("taste", 0.0)
        .with("portion", 0.0)
        .with("price", 0.0);
    run(context, &preferences);
}

#[when("I ask for recommendations weighting price and an unknown dimension")]
fn price_and_unknown(context: &TestContext) {
    let preferences = RawPreferences::new().with("price", 1.0).with("spice", 9.0);
    run(context, &preferences);
}

#[when("I ask for the default number of recommendations")]
fn default_limit(context: &TestContext) {
    let preferences = RawPreferences::new().with("taste", 1.0).with("price", 1.0);
    run(context, &preferences);
}

#[when("I ask for recommendations weighting taste only")]
fn taste_only(context: &TestContext) {
    run(context, &RawPreferences::new().with("taste", 1.0));
}

#[then("the menu with the better taste and price is ranked first")]
fn curry_first(context: &TestContext) {
    let ranked: Vec<(String, f64)> = picks(context)
        .into_iter()
        .map(|pick| (pick.menu, pick.recommended))
        .collect();
    assert_eq!(
        ranked,
        vec![("curry".to_owned(), 3.75), ("salad".to_owned(), 2.75)]
    );
}

#[then("the request is rejected for a zero total")]
fn rejected_zero(context: &TestContext) {
    let outcome = context
        .outcome
        .borrow_mut()
        .take()
        .expect("recommendations should be requested");
    assert!(matches!(
        outcome,
        Err(RecommendError::Preference(InvalidPreferenceError::ZeroTotal))
    ));
}

#[then("the cheaper menu is ranked first")]
fn cheaper_first(context: &TestContext) {
    let ranked = picks(context);
    let first = ranked.first().expect("at least one recommendation");
    assert_eq!(first.menu, "curry");
    assert_eq!(first.recommended, 5.0);
}

#[then("twenty recommendations are returned in descending score order")]
fn twenty_descending(context: &TestContext) {
    let ranked = picks(context);
    assert_eq!(ranked.len(), 20);
    assert!(
        ranked
            .windows(2)
            .all(|pair| matches!(pair, [left, right] if left.recommended >= right.recommended))
    );
}

#[then("the tied menus are ordered by venue then menu")]
fn tie_break(context: &TestContext) {
    let keys: Vec<MenuKey> = picks(context).iter().map(RankedRecommendation::key).collect();
    assert_eq!(
        keys,
        vec![
            MenuKey::new("Annex", "a"),
            MenuKey::new("Annex", "z"),
            MenuKey::new("Dorm", "b"),
        ]
    );
}

#[scenario(path = "tests/features/recommendation.feature", index = 0)]
fn weighted_sum_ranking(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 1)]
fn zero_vector_rejection(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 2)]
fn unknown_names_ignored(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 3)]
fn default_limit_truncates(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 4)]
fn ties_break_on_key(context: TestContext) {
    let _ = context;
}
