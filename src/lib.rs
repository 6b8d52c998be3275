//! Facade crate for the listings rating engine.
//!
//! This crate re-exports the domain types from `listings-core` and the rating
//! pipeline from `listings-scorer`, so callers need a single dependency.
//!
//! ```
//! use chrono::Utc;
//! use listings_engine::{
//!     KeywordImpactAnalyzer, RatingCalculator, RatingInput, RatingResult, RatingService,
//! };
//!
//! let input: RatingInput = serde_json::from_str(
//!     r#"{"kind": "school", "id": "s-1", "name": "Hillside Academy"}"#,
//! )
//! .unwrap();
//! let service = RatingService::new(RatingCalculator::default(), KeywordImpactAnalyzer);
//! let RatingResult::Listing(breakdown) = service.rate(&input, Utc::now()).unwrap() else {
//!     panic!("schools produce a category breakdown");
//! };
//! assert!((0.0..=10.0).contains(&breakdown.overall_rating));
//! ```

#![forbid(unsafe_code)]

pub use listings_core::{
    Category, CategoryRatingBreakdown, InputError, ListingRatingInput, RatingInput, RatingResult,
    RatingSink, RestaurantRatingInput, RestaurantRatings, ScoreLabel, SentimentAnalyzer,
    SentimentError, SentimentModifiers, SentimentOutcome, SinkError,
};

pub use listings_scorer::{
    ALGORITHM_VERSION, BatchFailure, BatchOptions, BatchRunner, BatchSummary,
    KeywordImpactAnalyzer, RatingCalculator, RatingError, RatingService, TimeoutAnalyzer,
    analyze_sentiment, score_label, score_sentiment,
};
