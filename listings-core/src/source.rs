//! Provider ratings and their normalised counterparts.
//!
//! Ratings arrive on each provider's native scale and are converted to the
//! common `0.0..=10.0` scale via `(rating / provider_max) * 10`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::score::{SCORE_MAX, clamp_score};

/// Rating providers whose reviews can contribute to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewProvider {
    /// Google Places reviews.
    Google,
    /// TripAdvisor reviews.
    Tripadvisor,
    /// OpenTable diner reviews.
    Opentable,
    /// Ratings entered by an editor.
    Manual,
    /// Synthetic source derived from free-text sentiment.
    AiAnalysis,
}

impl ReviewProvider {
    /// Maximum rating on the provider's native scale.
    ///
    /// Star-based providers use five stars. The synthetic sentiment source is
    /// already expressed on the ten-point scale.
    #[must_use]
    pub const fn max_scale(self) -> f64 {
        match self {
            Self::Google | Self::Tripadvisor | Self::Opentable | Self::Manual => 5.0,
            Self::AiAnalysis => SCORE_MAX,
        }
    }

    /// Return the provider as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Tripadvisor => "tripadvisor",
            Self::Opentable => "opentable",
            Self::Manual => "manual",
            Self::AiAnalysis => "ai_analysis",
        }
    }

    /// Convert a native rating to the ten-point scale.
    ///
    /// The result is clamped so an out-of-range provider value cannot push
    /// the weighted average past the scale.
    ///
    /// # Examples
    /// ```
    /// use listings_core::ReviewProvider;
    ///
    /// assert_eq!(ReviewProvider::Google.normalise(2.5), 5.0);
    /// assert_eq!(ReviewProvider::AiAnalysis.normalise(7.5), 7.5);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "linear rescaling between rating scales"
    )]
    pub fn normalise(self, rating: f64) -> f64 {
        clamp_score((rating / self.max_scale()) * SCORE_MAX)
    }
}

impl std::fmt::Display for ReviewProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rating as fetched from a provider, before normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProviderRating {
    /// Rating on the provider's native scale.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub count: u32,
}

impl ProviderRating {
    /// Build a provider rating.
    #[must_use]
    pub const fn new(rating: f64, count: u32) -> Self {
        Self { rating, count }
    }
}

/// One provider's contribution to a restaurant score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSource {
    /// Raw rating on the provider's native scale.
    pub rating: f64,
    /// Review volume.
    pub count: u32,
    /// Rating on the common ten-point scale.
    pub normalized: f64,
}

impl RatingSource {
    /// Build a source from a provider rating.
    ///
    /// Returns `None` when the rating is not finite or no reviews back it;
    /// such providers are omitted rather than counted as zero.
    #[must_use]
    pub fn from_provider(provider: ReviewProvider, rating: ProviderRating) -> Option<Self> {
        if !rating.rating.is_finite() || rating.count == 0 {
            return None;
        }
        Some(Self {
            rating: rating.rating,
            count: rating.count,
            normalized: provider.normalise(rating.rating),
        })
    }
}

/// Restaurant rating sources keyed by provider.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSources {
    /// Google contribution, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<RatingSource>,
    /// TripAdvisor contribution, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tripadvisor: Option<RatingSource>,
}

impl RatingSources {
    /// Iterate over the present sources.
    pub fn iter(&self) -> impl Iterator<Item = &RatingSource> {
        self.google.iter().chain(self.tripadvisor.iter())
    }

    /// Total review volume across present sources.
    #[must_use]
    pub fn total_review_count(&self) -> u32 {
        self.iter()
            .fold(0_u32, |total, source| total.saturating_add(source.count))
    }

    /// Report whether no provider contributed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.google.is_none() && self.tripadvisor.is_none()
    }
}

/// One provider's contribution to a category score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSource {
    /// Provider the rating came from.
    pub source: ReviewProvider,
    /// Rating on the provider's native scale.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Sentiment score for synthetic sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    /// When the rating was last refreshed.
    pub last_updated: DateTime<Utc>,
}

impl ReviewSource {
    /// Rating on the common ten-point scale.
    #[must_use]
    pub fn normalized(&self) -> f64 {
        self.source.normalise(self.rating)
    }

    /// Report whether the source carries a usable rating.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.rating.is_finite() && self.review_count > 0
    }
}
