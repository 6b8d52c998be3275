//! Core domain types for the listings rating engine.
//!
//! The crate defines the records the engine consumes, the rating artefacts
//! it produces, and the two seams through which it meets the outside world:
//! [`SentimentAnalyzer`] for review sentiment backends and [`RatingSink`] for
//! persistence. Scores live on a `0.0..=10.0` scale throughout.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod category;
pub mod input;
pub mod rating;
pub mod score;
pub mod sentiment;
pub mod sink;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use category::Category;
pub use input::{InputError, ListingRatingInput, NamedTag, RatingInput, RestaurantRatingInput};
pub use rating::{CategoryRatingBreakdown, RatingResult, RestaurantRatings, ScoreLabel};
pub use score::{
    NEUTRAL_BASE_SCORE, SCORE_MAX, SCORE_MIN, clamp_score, round_to_hundredths, round_to_tenths,
};
pub use sentiment::{
    KeywordCounts, MODIFIER_LIMIT, SentimentAnalyzer, SentimentError, SentimentModifiers,
    SentimentOutcome,
};
pub use sink::{RatingSink, SinkError};
pub use source::{ProviderRating, RatingSource, RatingSources, ReviewProvider, ReviewSource};
