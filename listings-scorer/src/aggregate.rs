//! Collect provider ratings and reduce them to a base score.
//!
//! Providers without a finite rating or without reviews are left out rather
//! than counted as zero. The base score is the review-count-weighted average
//! of the normalised ratings, or [`NEUTRAL_BASE_SCORE`] when no reviews exist.

use chrono::{DateTime, Utc};
use listings_core::{
    ListingRatingInput, NEUTRAL_BASE_SCORE, ProviderRating, RatingSource, RatingSources,
    RestaurantRatingInput, ReviewProvider, ReviewSource,
};

use crate::sentiment::score_sentiment;

/// Collect the Google and TripAdvisor sources for a restaurant.
///
/// `tripadvisor` is the externally fetched TripAdvisor rating, if any.
#[must_use]
pub fn aggregate_restaurant_sources(
    input: &RestaurantRatingInput,
    tripadvisor: Option<ProviderRating>,
) -> RatingSources {
    RatingSources {
        google: input
            .google()
            .and_then(|rating| RatingSource::from_provider(ReviewProvider::Google, rating)),
        tripadvisor: tripadvisor
            .and_then(|rating| RatingSource::from_provider(ReviewProvider::Tripadvisor, rating)),
    }
}

/// Weighted average of restaurant sources on the ten-point scale.
///
/// # Examples
/// ```
/// use listings_core::{ProviderRating, RatingSource, RatingSources, ReviewProvider};
/// use listings_scorer::restaurant_base_score;
///
/// assert_eq!(restaurant_base_score(&RatingSources::default()), 7.0);
///
/// let sources = RatingSources {
///     google: RatingSource::from_provider(ReviewProvider::Google, ProviderRating::new(4.0, 100)),
///     tripadvisor: None,
/// };
/// assert_eq!(restaurant_base_score(&sources), 8.0);
/// ```
#[must_use]
pub fn restaurant_base_score(sources: &RatingSources) -> f64 {
    weighted_average(sources.iter().map(|source| (source.normalized, source.count)))
}

/// Collect every usable source for a category record.
///
/// Besides the provider ratings, a non-blank `review_sentiment` is folded in
/// as a synthetic [`ReviewProvider::AiAnalysis`] source with rating
/// `7 + sentiment` and a single review, so sparse listings still feel the
/// sentiment without it outweighing real reviews.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the synthetic source offsets the neutral prior by the sentiment score"
)]
pub fn collect_review_sources(
    input: &ListingRatingInput,
    tripadvisor: Option<ProviderRating>,
    now: DateTime<Utc>,
) -> Vec<ReviewSource> {
    let provider_source = |source: ReviewProvider, rating: ProviderRating| ReviewSource {
        source,
        rating: rating.rating,
        review_count: rating.count,
        sentiment_score: None,
        last_updated: now,
    };

    let mut sources: Vec<ReviewSource> = input
        .google()
        .map(|rating| provider_source(ReviewProvider::Google, rating))
        .into_iter()
        .chain(tripadvisor.map(|rating| provider_source(ReviewProvider::Tripadvisor, rating)))
        .chain(input.additional_sources.iter().cloned())
        .filter(ReviewSource::is_usable)
        .collect();

    if let Some(text) = input.sentiment_text() {
        let sentiment = score_sentiment(text);
        sources.push(ReviewSource {
            source: ReviewProvider::AiAnalysis,
            rating: NEUTRAL_BASE_SCORE + sentiment,
            review_count: 1,
            sentiment_score: Some(sentiment),
            last_updated: now,
        });
    }
    sources
}

/// Weighted average of category sources on the ten-point scale.
#[must_use]
pub fn listing_base_score(sources: &[ReviewSource]) -> f64 {
    weighted_average(
        sources
            .iter()
            .filter(|source| source.is_usable())
            .map(|source| (source.normalized(), source.review_count)),
    )
}

/// Review volume across real providers, excluding synthetic sentiment.
#[must_use]
pub fn total_reviews(sources: &[ReviewSource]) -> u32 {
    sources
        .iter()
        .filter(|source| source.source != ReviewProvider::AiAnalysis)
        .fold(0_u32, |total, source| {
            total.saturating_add(source.review_count)
        })
}

/// `Σ(normalised · count) / Σ count`, or the neutral prior without reviews.
#[expect(
    clippy::float_arithmetic,
    reason = "weighted averaging requires floating-point sums"
)]
fn weighted_average(entries: impl Iterator<Item = (f64, u32)>) -> f64 {
    let (weighted_sum, total_count) = entries.fold((0.0_f64, 0.0_f64), |(sum, count), entry| {
        let (normalised, reviews) = entry;
        let weight = f64::from(reviews);
        (sum + normalised * weight, count + weight)
    });
    if total_count == 0.0 {
        return NEUTRAL_BASE_SCORE;
    }
    weighted_sum / total_count
}
