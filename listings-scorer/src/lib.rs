//! Rating engine for directory listings.
//!
//! The crate turns the records defined in [`listings_core`] into bounded
//! ratings. A calculation runs through five stages:
//!
//! - **Sentiment**: free text becomes a simple score in `-2.0..=2.0`
//!   ([`score_sentiment`]) and restaurant reviews become per-component
//!   modifiers through a [`SentimentAnalyzer`](listings_core::SentimentAnalyzer)
//!   such as [`KeywordImpactAnalyzer`].
//! - **Aggregation**: provider ratings are normalised to ten points and
//!   averaged by review count, with a neutral `7.0` prior when nothing is
//!   known.
//! - **Components**: the base score is adjusted per component by feature
//!   bonuses and sentiment.
//! - **Combination**: components are weighted into an overall score.
//! - **Labelling**: restaurant scores map to a display band.
//!
//! [`RatingCalculator`] performs the pure calculation, [`RatingService`]
//! adds validation and sentiment analysis, and [`BatchRunner`] recalculates
//! many records through a [`RatingSink`](listings_core::RatingSink).
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use listings_core::{NamedTag, RatingInput, RestaurantRatingInput, ScoreLabel};
//! use listings_scorer::{KeywordImpactAnalyzer, RatingCalculator, RatingService};
//!
//! let mut record = RestaurantRatingInput::new("r-1", "Trattoria");
//! record.overall_rating = Some(4.2);
//! record.total_reviews_aggregated = Some(150);
//! record.price_level = Some(2);
//! record.features = vec![NamedTag::new("WiFi")];
//!
//! let service = RatingService::new(RatingCalculator::default(), KeywordImpactAnalyzer);
//! let rating = service.rate_restaurant(&record, Utc::now());
//! assert_eq!(rating.food_quality, 8.4);
//! assert_eq!(rating.score_label, ScoreLabel::Excellent);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod batch;
mod calculator;
mod combine;
mod components;
mod error;
mod label;
mod sentiment;
mod service;

pub use aggregate::{
    aggregate_restaurant_sources, collect_review_sources, listing_base_score,
    restaurant_base_score, total_reviews,
};
pub use batch::{BatchFailure, BatchOptions, BatchRunner, BatchSummary};
pub use calculator::{ALGORITHM_VERSION, RatingCalculator};
pub use combine::{RESTAURANT_WEIGHTS, category_weights, combine_category, combine_restaurant};
pub use components::{
    ComponentBase, ComponentRule, DESCRIPTION_BONUS_THRESHOLD, RestaurantComponents,
    category_components, category_rules, has_tag, restaurant_components,
};
pub use error::RatingError;
pub use label::score_label;
pub use sentiment::{
    KeywordImpactAnalyzer, SENTIMENT_SCORE_LIMIT, TimeoutAnalyzer, analyze_sentiment,
    score_sentiment,
};
pub use service::RatingService;
