#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for reading and validating rating inputs.

use std::cell::RefCell;

use listings_core::{Category, InputError, RatingInput, ReviewProvider};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// State shared across the steps of one scenario.
pub struct TestContext {
    json: RefCell<String>,
    parsed: RefCell<Option<RatingInput>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        json: RefCell::new(String::new()),
        parsed: RefCell::new(None),
    }
}

fn parsed(context: &TestContext) -> RatingInput {
    context
        .parsed
        .borrow()
        .clone()
        .expect("record should have been parsed")
}

#[given("a JSON record of kind hotel")]
fn hotel_json(context: &TestContext) {
    context.json.replace(
        r#"{"kind": "hotel", "id": "h-1", "name": "Harbour Inn", "google_rating": 4.4}"#
            .to_owned(),
    );
}

#[given("a JSON restaurant record with a blank id")]
fn blank_id_json(context: &TestContext) {
    context
        .json
        .replace(r#"{"kind": "restaurant", "id": " ", "name": "Nameless Noodles"}"#.to_owned());
}

#[given("a JSON restaurant record with price level 5")]
fn price_level_json(context: &TestContext) {
    context.json.replace(
        r#"{"kind": "restaurant", "id": "r-5", "name": "Gilded Fork", "price_level": 5}"#
            .to_owned(),
    );
}

#[given("a JSON fitness place record with a manual rating of 4.5")]
fn fitness_json(context: &TestContext) {
    context.json.replace(
        r#"{
            "kind": "fitness_place",
            "id": "f-1",
            "name": "Iron Works",
            "additional_sources": [{
                "source": "manual",
                "rating": 4.5,
                "review_count": 3,
                "last_updated": "2024-05-01T10:00:00Z"
            }]
        }"#
        .to_owned(),
    );
}

#[when("the record is parsed")]
fn parse(context: &TestContext) {
    let record: RatingInput =
        serde_json::from_str(&context.json.borrow()).expect("record should parse");
    context.parsed.replace(Some(record));
}

#[then("the record is a hotel named Harbour Inn")]
fn is_hotel(context: &TestContext) {
    let record = parsed(context);
    assert_eq!(record.category(), Some(Category::Hotel));
    assert_eq!(record.kind(), "hotel");
    assert_eq!(record.name(), "Harbour Inn");
}

#[then("the record passes validation")]
fn passes_validation(context: &TestContext) {
    assert_eq!(parsed(context).validate(), Ok(()));
}

#[then("validation reports a missing id")]
fn missing_id(context: &TestContext) {
    assert_eq!(
        parsed(context).validate(),
        Err(InputError::MissingId {
            name: "Nameless Noodles".to_owned()
        })
    );
}

#[then("validation reports the price level")]
fn bad_price_level(context: &TestContext) {
    assert_eq!(
        parsed(context).validate(),
        Err(InputError::PriceLevelOutOfRange {
            id: "r-5".to_owned(),
            level: 5
        })
    );
}

#[then("the manual source normalises to 9.0")]
fn manual_normalised(context: &TestContext) {
    let RatingInput::FitnessPlace(record) = parsed(context) else {
        panic!("expected a fitness place record");
    };
    let source = record
        .additional_sources
        .first()
        .expect("manual source present");
    assert_eq!(source.source, ReviewProvider::Manual);
    assert_eq!(source.normalized(), 9.0);
}

#[scenario(path = "tests/features/rating_input.feature", index = 0)]
fn hotel_record_from_json(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/rating_input.feature", index = 1)]
fn record_without_id(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/rating_input.feature", index = 2)]
fn impossible_price_level(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/rating_input.feature", index = 3)]
fn additional_sources_normalise(context: TestContext) {
    let _ = context;
}
