//! Behavioural coverage for batch recalculation.

use std::cell::RefCell;

use listings_core::test_support::{MemorySink, StaticAnalyzer};
use listings_core::{Category, ListingRatingInput, RatingInput, RestaurantRatingInput};
use listings_scorer::{
    ALGORITHM_VERSION, BatchOptions, BatchRunner, BatchSummary, RatingCalculator, RatingService,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// State shared across the steps of one scenario.
pub struct TestContext {
    inputs: RefCell<Vec<RatingInput>>,
    sink: RefCell<MemorySink>,
    summary: RefCell<BatchSummary>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        inputs: RefCell::new(Vec::new()),
        sink: RefCell::new(MemorySink::new()),
        summary: RefCell::new(BatchSummary::default()),
    }
}

fn restaurant(id: &str, name: &str, version: Option<&str>) -> RatingInput {
    let mut record = RestaurantRatingInput::new(id, name);
    record.algorithm_version = version.map(str::to_owned);
    RatingInput::Restaurant(record)
}

fn run(context: &TestContext, force: bool) {
    let service = RatingService::new(RatingCalculator::default(), StaticAnalyzer::default());
    let runner = BatchRunner::new(
        service,
        BatchOptions {
            force,
            ..BatchOptions::default()
        },
    );
    let summary = runner.run(context.inputs.borrow().iter(), &mut *context.sink.borrow_mut());
    context.summary.replace(summary);
}

#[given("a batch with one current, one stale and one nameless record")]
fn mixed_batch(context: &TestContext) {
    context.inputs.replace(vec![
        restaurant("r-current", "Current Cafe", Some(ALGORITHM_VERSION)),
        restaurant("r-stale", "Stale Steakhouse", Some("1.0")),
        restaurant("", "Nameless Noodles", None),
    ]);
}

#[given("a batch of three stale hotel records")]
fn hotel_batch(context: &TestContext) {
    let hotels = ["h-1", "h-2", "h-3"]
        .into_iter()
        .map(|id| {
            RatingInput::listing(
                Category::Hotel,
                ListingRatingInput::new(id, format!("Hotel {id}")),
            )
        })
        .collect();
    context.inputs.replace(hotels);
}

#[given("the sink refuses the second record")]
fn refusing_sink(context: &TestContext) {
    context.sink.replace(MemorySink::new().reject("h-2"));
}

#[when("the batch is recalculated")]
fn recalculate(context: &TestContext) {
    run(context, false);
}

#[when("the batch is recalculated with force")]
fn recalculate_forced(context: &TestContext) {
    run(context, true);
}

#[then("one record is rated")]
fn one_rated(context: &TestContext) {
    assert_eq!(context.summary.borrow().succeeded, 1);
    assert!(context.sink.borrow().get("r-stale").is_some());
}

#[then("two records are rated")]
fn two_rated(context: &TestContext) {
    assert_eq!(context.summary.borrow().succeeded, 2);
    assert_eq!(context.sink.borrow().len(), 2);
}

#[then("one record is skipped")]
fn one_skipped(context: &TestContext) {
    assert_eq!(context.summary.borrow().skipped, 1);
    assert!(context.sink.borrow().get("r-current").is_none());
}

#[then("no record is skipped")]
fn none_skipped(context: &TestContext) {
    assert_eq!(context.summary.borrow().skipped, 0);
}

#[then("the nameless record is reported as failed")]
fn nameless_failed(context: &TestContext) {
    let summary = context.summary.borrow();
    let names: Vec<&str> = summary.failed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Nameless Noodles"]);
    assert!(
        summary
            .failed
            .first()
            .is_some_and(|failure| failure.reason.contains("has no id"))
    );
}

#[then("the refused record is reported as failed")]
fn refused_failed(context: &TestContext) {
    let summary = context.summary.borrow();
    let ids: Vec<&str> = summary.failed.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["h-2"]);
    assert!(context.sink.borrow().get("h-3").is_some());
}

#[scenario(path = "tests/features/batch_recalculation.feature", index = 0)]
fn current_records_are_skipped(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/batch_recalculation.feature", index = 1)]
fn forced_recalculation(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/batch_recalculation.feature", index = 2)]
fn refusing_sink_does_not_stop_the_run(context: TestContext) {
    let _ = context;
}
