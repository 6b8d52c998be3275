//! Rating artefacts handed back to callers for persistence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Category, RatingSources, ReviewSource};

/// Human-readable band for a restaurant's overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreLabel {
    /// Below 5.0.
    #[serde(rename = "Below Average")]
    BelowAverage,
    /// From 5.0.
    Average,
    /// From 6.0.
    Good,
    /// From 7.0.
    #[serde(rename = "Very Good")]
    VeryGood,
    /// From 8.0.
    Excellent,
    /// From 9.0.
    Exceptional,
}

impl ScoreLabel {
    /// Display text of the band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BelowAverage => "Below Average",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
            Self::Excellent => "Excellent",
            Self::Exceptional => "Exceptional",
        }
    }
}

impl std::fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final restaurant rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRatings {
    /// Weighted overall score, one decimal place.
    pub overall_score: f64,
    /// Band derived from the overall score.
    pub score_label: ScoreLabel,
    /// Food quality component.
    pub food_quality: f64,
    /// Service component.
    pub service: f64,
    /// Ambience component.
    pub ambience: f64,
    /// Value component.
    pub value: f64,
    /// Accessibility component.
    pub accessibility: f64,
    /// Providers that contributed to the base score.
    pub rating_sources: RatingSources,
    /// Review volume across providers.
    pub total_review_count: u32,
    /// Whether sentiment analysis produced the modifiers.
    pub sentiment_analyzed: bool,
    /// When the rating was computed.
    pub last_rating_update: DateTime<Utc>,
    /// Version of the scoring algorithm.
    pub algorithm_version: String,
}

/// Final rating for a hotel, attraction, mall, school or fitness place.
///
/// Component scores are flattened into the serialised object under their
/// names, e.g. `room_quality` for hotels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRatingBreakdown {
    /// Category the record was scored as.
    pub category: Category,
    /// Weighted overall rating, two decimal places.
    pub overall_rating: f64,
    /// Component scores keyed by component name.
    #[serde(flatten)]
    pub components: BTreeMap<String, f64>,
    /// Sources that contributed to the base score.
    pub breakdown: Vec<ReviewSource>,
    /// Review volume across real providers.
    pub total_reviews_aggregated: u32,
    /// Whether review sentiment influenced the score.
    pub sentiment_analyzed: bool,
    /// When the rating was computed.
    pub calculated_at: DateTime<Utc>,
    /// Version of the scoring algorithm.
    pub algorithm_version: String,
}

impl CategoryRatingBreakdown {
    /// Return a named component score.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<f64> {
        self.components.get(name).copied()
    }
}

/// Either rating shape, as produced for a [`crate::RatingInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingResult {
    /// Restaurant rating.
    Restaurant(RestaurantRatings),
    /// Category rating.
    Listing(CategoryRatingBreakdown),
}

impl RatingResult {
    /// Overall score regardless of shape.
    #[must_use]
    pub const fn overall(&self) -> f64 {
        match self {
            Self::Restaurant(rating) => rating.overall_score,
            Self::Listing(rating) => rating.overall_rating,
        }
    }

    /// Algorithm version stamped on the result.
    #[must_use]
    pub fn algorithm_version(&self) -> &str {
        match self {
            Self::Restaurant(rating) => &rating.algorithm_version,
            Self::Listing(rating) => &rating.algorithm_version,
        }
    }

    /// Timestamp of the calculation.
    #[must_use]
    pub const fn calculated_at(&self) -> DateTime<Utc> {
        match self {
            Self::Restaurant(rating) => rating.last_rating_update,
            Self::Listing(rating) => rating.calculated_at,
        }
    }
}
