//! Sequential recalculation of many records.
//!
//! Records already stamped with the calculator's algorithm version are
//! skipped unless the run is forced. Validation runs first, so an invalid
//! record is always reported as failed, never as skipped. A record that
//! fails validation or persistence is recorded in the [`BatchSummary`] and
//! the run moves on.

use std::thread;
use std::time::Duration;

use chrono::Utc;
use listings_core::{RatingInput, RatingSink, SentimentAnalyzer};
use log::{info, warn};

use crate::error::RatingError;
use crate::service::RatingService;

/// Knobs for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOptions {
    /// Pause between consecutive rated records.
    pub delay: Duration,
    /// Re-rate records already stamped with the current algorithm version.
    pub force: bool,
}

/// A record that could not be rated or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Identifier of the record, possibly blank.
    pub id: String,
    /// Display name of the record.
    pub name: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Records rated and stored.
    pub succeeded: usize,
    /// Records left untouched because they were current.
    pub skipped: usize,
    /// Records that failed, in input order.
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    /// Number of failed records.
    #[must_use]
    pub const fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Number of records seen.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.succeeded
            .saturating_add(self.skipped)
            .saturating_add(self.failed.len())
    }
}

/// Drives a [`RatingService`] over a sequence of records.
#[derive(Debug, Clone)]
pub struct BatchRunner<A> {
    service: RatingService<A>,
    options: BatchOptions,
}

impl<A> BatchRunner<A>
where
    A: SentimentAnalyzer,
{
    /// Create a runner.
    pub const fn new(service: RatingService<A>, options: BatchOptions) -> Self {
        Self { service, options }
    }

    /// Rate every record in `inputs` and persist the results to `sink`.
    ///
    /// The configured delay is applied between rated records only, so
    /// skipped records cost nothing.
    ///
    /// # Examples
    /// ```
    /// use listings_core::test_support::{FailingAnalyzer, MemorySink};
    /// use listings_core::{RatingInput, RestaurantRatingInput};
    /// use listings_scorer::{BatchOptions, BatchRunner, RatingCalculator, RatingService};
    ///
    /// let service = RatingService::new(RatingCalculator::default(), FailingAnalyzer);
    /// let runner = BatchRunner::new(service, BatchOptions::default());
    /// let inputs = vec![
    ///     RatingInput::Restaurant(RestaurantRatingInput::new("r-1", "Trattoria")),
    ///     RatingInput::Restaurant(RestaurantRatingInput::new("", "Nameless")),
    /// ];
    /// let mut sink = MemorySink::new();
    /// let summary = runner.run(&inputs, &mut sink);
    /// assert_eq!(summary.succeeded, 1);
    /// assert_eq!(summary.failed_count(), 1);
    /// ```
    pub fn run<'a, I, S>(&self, inputs: I, sink: &mut S) -> BatchSummary
    where
        I: IntoIterator<Item = &'a RatingInput>,
        S: RatingSink + ?Sized,
    {
        let mut summary = BatchSummary::default();
        let mut rated_any = false;
        for input in inputs {
            if let Err(err) = input.validate() {
                record_failure(&mut summary, input, &RatingError::from(err));
                continue;
            }
            if self.is_current(input) {
                info!("skipping {} {}: rating is current", input.kind(), input.id());
                summary.skipped = summary.skipped.saturating_add(1);
                continue;
            }
            if rated_any && !self.options.delay.is_zero() {
                thread::sleep(self.options.delay);
            }
            rated_any = true;

            match self.service.rate_and_persist(input, sink, Utc::now()) {
                Ok(_) => summary.succeeded = summary.succeeded.saturating_add(1),
                Err(err) => record_failure(&mut summary, input, &err),
            }
        }
        info!(
            "batch finished: {} rated, {} skipped, {} failed",
            summary.succeeded,
            summary.skipped,
            summary.failed_count()
        );
        summary
    }

    fn is_current(&self, input: &RatingInput) -> bool {
        !self.options.force
            && input.algorithm_version() == Some(self.service.calculator().algorithm_version())
    }
}

fn record_failure(summary: &mut BatchSummary, input: &RatingInput, err: &RatingError) {
    let reason = error_chain(err);
    warn!(
        "failed to rate {} '{}' ({}): {reason}",
        input.kind(),
        input.name(),
        input.id()
    );
    summary.failed.push(BatchFailure {
        id: input.id().to_owned(),
        name: input.name().to_owned(),
        reason,
    });
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}
