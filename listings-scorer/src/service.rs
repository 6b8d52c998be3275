//! Entry point combining validation, sentiment analysis and calculation.

use chrono::{DateTime, Utc};
use listings_core::{
    Category, RatingInput, RatingResult, RatingSink, RestaurantRatingInput, RestaurantRatings,
    SentimentAnalyzer, SentimentOutcome,
};

use crate::calculator::RatingCalculator;
use crate::error::RatingError;
use crate::sentiment::analyze_sentiment;

/// Rates records of any kind with an injected sentiment backend.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use listings_core::{RatingInput, RestaurantRatingInput};
/// use listings_scorer::{KeywordImpactAnalyzer, RatingCalculator, RatingService};
///
/// let service = RatingService::new(RatingCalculator::default(), KeywordImpactAnalyzer);
/// let mut record = RestaurantRatingInput::new("r-1", "Trattoria");
/// record.reviews = vec!["Delicious food and friendly staff".to_owned()];
/// let rating = service.rate(&RatingInput::Restaurant(record), Utc::now()).unwrap();
/// assert!(rating.overall() > 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct RatingService<A> {
    calculator: RatingCalculator,
    analyzer: A,
}

impl<A> RatingService<A>
where
    A: SentimentAnalyzer,
{
    /// Build a service from a calculator and a sentiment backend.
    pub const fn new(calculator: RatingCalculator, analyzer: A) -> Self {
        Self {
            calculator,
            analyzer,
        }
    }

    /// Calculator used for scoring.
    #[must_use]
    pub const fn calculator(&self) -> &RatingCalculator {
        &self.calculator
    }

    /// Validate and rate `input`.
    ///
    /// # Errors
    /// Returns [`RatingError::MissingId`] for a blank id and
    /// [`RatingError::Input`] for other precondition violations. Sentiment
    /// failures never surface here.
    pub fn rate(&self, input: &RatingInput, at: DateTime<Utc>) -> Result<RatingResult, RatingError> {
        input.validate()?;
        let result = match input {
            RatingInput::Restaurant(record) => {
                RatingResult::Restaurant(self.rate_restaurant(record, at))
            }
            RatingInput::Hotel(record) => {
                RatingResult::Listing(self.calculator.listing(Category::Hotel, record, at))
            }
            RatingInput::Attraction(record) => {
                RatingResult::Listing(self.calculator.listing(Category::Attraction, record, at))
            }
            RatingInput::Mall(record) => {
                RatingResult::Listing(self.calculator.listing(Category::Mall, record, at))
            }
            RatingInput::School(record) => {
                RatingResult::Listing(self.calculator.listing(Category::School, record, at))
            }
            RatingInput::FitnessPlace(record) => {
                RatingResult::Listing(self.calculator.listing(Category::FitnessPlace, record, at))
            }
        };
        Ok(result)
    }

    /// Rate `input` and hand the result to `sink`.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::rate`], or
    /// [`RatingError::Persist`] when the sink fails.
    pub fn rate_and_persist<S>(
        &self,
        input: &RatingInput,
        sink: &mut S,
        at: DateTime<Utc>,
    ) -> Result<RatingResult, RatingError>
    where
        S: RatingSink + ?Sized,
    {
        let rating = self.rate(input, at)?;
        sink.persist(input.id(), &rating)
            .map_err(|source| RatingError::Persist {
                id: input.id().to_owned(),
                source,
            })?;
        Ok(rating)
    }

    /// Rate a restaurant without validating it.
    ///
    /// Pre-computed `sentiment` on the record is used as-is and counts as
    /// analysed; otherwise the record's reviews go through the backend.
    #[must_use]
    pub fn rate_restaurant(
        &self,
        input: &RestaurantRatingInput,
        at: DateTime<Utc>,
    ) -> RestaurantRatings {
        let sentiment = input.sentiment.clone().map_or_else(
            || analyze_sentiment(&self.analyzer, &input.reviews),
            SentimentOutcome::analyzed,
        );
        self.calculator.restaurant(input, &sentiment, at)
    }
}

#[cfg(test)]
mod tests {
    use listings_core::test_support::{FailingAnalyzer, MemorySink, StaticAnalyzer};
    use listings_core::{ListingRatingInput, SentimentModifiers, SinkError};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn at() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    fn boosting() -> StaticAnalyzer {
        StaticAnalyzer::new(SentimentModifiers {
            food_quality_modifier: 1.0,
            ..SentimentModifiers::neutral()
        })
    }

    fn reviewed(id: &str) -> RestaurantRatingInput {
        let mut record = RestaurantRatingInput::new(id, "Trattoria");
        record.reviews = vec!["Lovely".to_owned()];
        record
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_ids_are_rejected(at: DateTime<Utc>, #[case] id: &str) {
        let service = RatingService::new(RatingCalculator::default(), boosting());
        let input = RatingInput::Restaurant(reviewed(id));
        let result = service.rate(&input, at);
        assert!(matches!(result, Err(RatingError::MissingId { .. })));
    }

    #[rstest]
    fn out_of_range_price_level_is_rejected(at: DateTime<Utc>) {
        let service = RatingService::new(RatingCalculator::default(), boosting());
        let mut record = reviewed("r-1");
        record.price_level = Some(5);
        let result = service.rate(&RatingInput::Restaurant(record), at);
        assert!(matches!(result, Err(RatingError::Input { .. })));
    }

    #[rstest]
    fn reviews_go_through_the_backend(at: DateTime<Utc>) {
        let service = RatingService::new(RatingCalculator::default(), boosting());
        let rating = service.rate_restaurant(&reviewed("r-1"), at);
        assert!(rating.sentiment_analyzed);
        assert_eq!(rating.food_quality, 8.0);
    }

    #[rstest]
    fn failing_backend_degrades_to_neutral(at: DateTime<Utc>) {
        let service = RatingService::new(RatingCalculator::default(), FailingAnalyzer);
        let rating = service.rate_restaurant(&reviewed("r-1"), at);
        assert!(!rating.sentiment_analyzed);
        assert_eq!(rating.overall_score, 7.0);
    }

    #[rstest]
    fn precomputed_sentiment_bypasses_the_backend(at: DateTime<Utc>) {
        let service = RatingService::new(RatingCalculator::default(), FailingAnalyzer);
        let mut record = reviewed("r-1");
        record.sentiment = Some(SentimentModifiers {
            service_modifier: -1.0,
            ..SentimentModifiers::neutral()
        });
        let rating = service.rate_restaurant(&record, at);
        assert!(rating.sentiment_analyzed);
        assert_eq!(rating.service, 6.2);
    }

    #[rstest]
    fn listings_dispatch_by_kind(at: DateTime<Utc>) {
        let service = RatingService::new(RatingCalculator::default(), FailingAnalyzer);
        let input = RatingInput::listing(
            Category::Attraction,
            ListingRatingInput::new("a-1", "Old Fort"),
        );
        let Ok(RatingResult::Listing(rating)) = service.rate(&input, at) else {
            panic!("expected a listing rating");
        };
        assert_eq!(rating.category, Category::Attraction);
        assert!(rating.component("uniqueness").is_some());
    }

    #[rstest]
    fn persisted_ratings_reach_the_sink(at: DateTime<Utc>) {
        let service = RatingService::new(RatingCalculator::default(), boosting());
        let mut sink = MemorySink::new();
        let input = RatingInput::Restaurant(reviewed("r-1"));
        let rating = service.rate_and_persist(&input, &mut sink, at);
        assert!(rating.is_ok());
        assert_eq!(sink.get("r-1").map(RatingResult::overall), rating.ok().map(|r| r.overall()));
    }

    #[rstest]
    fn sink_failures_name_the_record(at: DateTime<Utc>) {
        let service = RatingService::new(RatingCalculator::default(), boosting());
        let mut sink = MemorySink::new().reject("r-1");
        let input = RatingInput::Restaurant(reviewed("r-1"));
        let result = service.rate_and_persist(&input, &mut sink, at);
        assert!(matches!(
            result,
            Err(RatingError::Persist { ref id, source: SinkError::Rejected { .. } }) if id == "r-1"
        ));
        assert!(sink.is_empty());
    }
}
