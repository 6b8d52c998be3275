//! Pure rating calculation for a single record.

use chrono::{DateTime, Utc};
use listings_core::{
    Category, CategoryRatingBreakdown, ListingRatingInput, RestaurantRatingInput,
    RestaurantRatings, SentimentOutcome,
};
use log::debug;

use crate::aggregate::{
    aggregate_restaurant_sources, collect_review_sources, listing_base_score,
    restaurant_base_score, total_reviews,
};
use crate::combine::{combine_category, combine_restaurant};
use crate::components::{category_components, restaurant_components};
use crate::label::score_label;
use crate::sentiment::score_sentiment;

/// Version stamped on ratings produced by this crate.
pub const ALGORITHM_VERSION: &str = "2.0";

/// Stateless calculator turning records into ratings.
///
/// The calculator performs no I/O and holds no per-record state; the same
/// record, sentiment and timestamp always yield the same rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingCalculator {
    algorithm_version: String,
}

impl Default for RatingCalculator {
    fn default() -> Self {
        Self::new(ALGORITHM_VERSION)
    }
}

impl RatingCalculator {
    /// Create a calculator stamping `algorithm_version` on its ratings.
    #[must_use]
    pub fn new(algorithm_version: impl Into<String>) -> Self {
        Self {
            algorithm_version: algorithm_version.into(),
        }
    }

    /// Version stamped on produced ratings.
    #[must_use]
    pub fn algorithm_version(&self) -> &str {
        &self.algorithm_version
    }

    /// Rate a restaurant.
    ///
    /// `sentiment` carries the modifiers obtained from review analysis and
    /// whether that analysis actually ran.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use listings_core::{RestaurantRatingInput, ScoreLabel, SentimentOutcome};
    /// use listings_scorer::RatingCalculator;
    ///
    /// let input = RestaurantRatingInput::new("r-1", "Empty Kitchen");
    /// let rating = RatingCalculator::default().restaurant(
    ///     &input,
    ///     &SentimentOutcome::skipped(),
    ///     Utc::now(),
    /// );
    /// assert_eq!(rating.overall_score, 7.0);
    /// assert_eq!(rating.score_label, ScoreLabel::VeryGood);
    /// ```
    #[must_use]
    pub fn restaurant(
        &self,
        input: &RestaurantRatingInput,
        sentiment: &SentimentOutcome,
        at: DateTime<Utc>,
    ) -> RestaurantRatings {
        let sources = aggregate_restaurant_sources(input, input.tripadvisor);
        let base = restaurant_base_score(&sources);
        let components = restaurant_components(input, base, &sentiment.modifiers);
        let overall = combine_restaurant(&components);
        let label = score_label(overall);
        debug!(
            "rated restaurant {}: base {base:.2}, overall {overall:.1} ({label})",
            input.id
        );

        RestaurantRatings {
            overall_score: overall,
            score_label: label,
            food_quality: components.food_quality,
            service: components.service,
            ambience: components.ambience,
            value: components.value,
            accessibility: components.accessibility,
            total_review_count: sources.total_review_count(),
            rating_sources: sources,
            sentiment_analyzed: sentiment.analyzed,
            last_rating_update: at,
            algorithm_version: self.algorithm_version.clone(),
        }
    }

    /// Rate a hotel, attraction, mall, school or fitness place.
    ///
    /// The record's free-text `review_sentiment` both feeds a synthetic
    /// source into the base score and shifts every component.
    #[must_use]
    pub fn listing(
        &self,
        category: Category,
        input: &ListingRatingInput,
        at: DateTime<Utc>,
    ) -> CategoryRatingBreakdown {
        let sources = collect_review_sources(input, input.tripadvisor, at);
        let base = listing_base_score(&sources);
        let sentiment_text = input.sentiment_text();
        let sentiment = sentiment_text.map_or(0.0, score_sentiment);
        let components = category_components(category, base, sentiment);
        let overall = combine_category(category, &components);
        debug!(
            "rated {category} {}: base {base:.2}, sentiment {sentiment:.1}, overall {overall:.2}",
            input.id
        );

        CategoryRatingBreakdown {
            category,
            overall_rating: overall,
            components,
            total_reviews_aggregated: total_reviews(&sources),
            breakdown: sources,
            sentiment_analyzed: sentiment_text.is_some(),
            calculated_at: at,
            algorithm_version: self.algorithm_version.clone(),
        }
    }
}
