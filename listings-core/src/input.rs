//! Entity records accepted by the rating engine.
//!
//! Each entity type has an explicit input struct with named optional fields.
//! Validation happens at the call boundary via [`RatingInput::validate`]; the
//! scoring code itself assumes a well-formed record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Category, ProviderRating, ReviewSource, SentimentModifiers};

/// A named feature or cuisine tag, e.g. `{"name": "Outdoor Seating"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTag {
    /// Display name of the tag.
    pub name: String,
}

impl NamedTag {
    /// Build a tag from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for NamedTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Restaurant record fed to the five-component model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantRatingInput {
    /// Storage identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Google rating on a five-star scale.
    pub overall_rating: Option<f64>,
    /// Number of Google reviews.
    pub total_reviews_aggregated: Option<u32>,
    /// Pre-fetched TripAdvisor rating.
    pub tripadvisor: Option<ProviderRating>,
    /// Price level from 1 (cheap) to 4 (expensive).
    pub price_level: Option<u8>,
    /// Amenity and service features.
    pub features: Vec<NamedTag>,
    /// Cuisine tags.
    pub cuisines: Vec<NamedTag>,
    /// Long-form description.
    pub description: Option<String>,
    /// Short description used when no long description exists.
    pub short_description: Option<String>,
    /// Review texts available for sentiment analysis.
    pub reviews: Vec<String>,
    /// Modifiers computed ahead of time by an external sentiment service.
    pub sentiment: Option<SentimentModifiers>,
    /// Algorithm version stamped on the stored rating, if any.
    pub algorithm_version: Option<String>,
}

impl RestaurantRatingInput {
    /// Build a record with only an identifier and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// The Google rating, when both rating and review count are present.
    #[must_use]
    pub fn google(&self) -> Option<ProviderRating> {
        let rating = self.overall_rating?;
        let count = self.total_reviews_aggregated?;
        Some(ProviderRating::new(rating, count))
    }

    /// The description used for length-based bonuses.
    #[must_use]
    pub fn effective_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(self.short_description.as_deref())
    }
}

/// Record shared by hotels, attractions, malls, schools and fitness places.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingRatingInput {
    /// Storage identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Google rating on a five-star scale.
    pub google_rating: Option<f64>,
    /// Number of Google reviews.
    pub google_review_count: Option<u32>,
    /// Pre-fetched TripAdvisor rating.
    pub tripadvisor: Option<ProviderRating>,
    /// Further provider ratings, e.g. OpenTable or manual entries.
    pub additional_sources: Vec<ReviewSource>,
    /// Free-text summary of review sentiment.
    pub review_sentiment: Option<String>,
    /// Algorithm version stamped on the stored rating, if any.
    pub algorithm_version: Option<String>,
}

impl ListingRatingInput {
    /// Build a record with only an identifier and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// The Google rating, when both rating and review count are present.
    #[must_use]
    pub fn google(&self) -> Option<ProviderRating> {
        let rating = self.google_rating?;
        let count = self.google_review_count?;
        Some(ProviderRating::new(rating, count))
    }

    /// The sentiment text, ignoring blank strings.
    #[must_use]
    pub fn sentiment_text(&self) -> Option<&str> {
        self.review_sentiment
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Any entity record, tagged by its `kind`.
///
/// # Examples
/// ```
/// use listings_core::{Category, RatingInput};
///
/// let json = r#"{"kind": "hotel", "id": "h-1", "name": "Harbour Inn"}"#;
/// let input: RatingInput = serde_json::from_str(json).unwrap();
/// assert_eq!(input.category(), Some(Category::Hotel));
/// assert_eq!(input.id(), "h-1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatingInput {
    /// A restaurant.
    Restaurant(RestaurantRatingInput),
    /// A hotel.
    Hotel(ListingRatingInput),
    /// An attraction.
    Attraction(ListingRatingInput),
    /// A mall.
    Mall(ListingRatingInput),
    /// A school.
    School(ListingRatingInput),
    /// A gym or fitness studio.
    FitnessPlace(ListingRatingInput),
}

/// Caller precondition violations detected before scoring.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    /// The record has no identifier.
    #[error("record '{name}' has no id")]
    MissingId {
        /// Name of the offending record, possibly empty.
        name: String,
    },
    /// The price level is outside `1..=4`.
    #[error("record {id} has price level {level}, expected 1 to 4")]
    PriceLevelOutOfRange {
        /// Identifier of the offending record.
        id: String,
        /// Level supplied.
        level: u8,
    },
}

impl RatingInput {
    /// Wrap a listing record for the given category.
    #[must_use]
    pub fn listing(category: Category, input: ListingRatingInput) -> Self {
        match category {
            Category::Hotel => Self::Hotel(input),
            Category::Attraction => Self::Attraction(input),
            Category::Mall => Self::Mall(input),
            Category::School => Self::School(input),
            Category::FitnessPlace => Self::FitnessPlace(input),
        }
    }

    /// Category of a non-restaurant record.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Restaurant(_) => None,
            Self::Hotel(_) => Some(Category::Hotel),
            Self::Attraction(_) => Some(Category::Attraction),
            Self::Mall(_) => Some(Category::Mall),
            Self::School(_) => Some(Category::School),
            Self::FitnessPlace(_) => Some(Category::FitnessPlace),
        }
    }

    /// Lowercase label of the entity kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self.category() {
            Some(category) => category.as_str(),
            None => "restaurant",
        }
    }

    /// Storage identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Restaurant(record) => &record.id,
            Self::Hotel(record)
            | Self::Attraction(record)
            | Self::Mall(record)
            | Self::School(record)
            | Self::FitnessPlace(record) => &record.id,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Restaurant(record) => &record.name,
            Self::Hotel(record)
            | Self::Attraction(record)
            | Self::Mall(record)
            | Self::School(record)
            | Self::FitnessPlace(record) => &record.name,
        }
    }

    /// Algorithm version of the rating currently stored for this record.
    #[must_use]
    pub fn algorithm_version(&self) -> Option<&str> {
        match self {
            Self::Restaurant(record) => record.algorithm_version.as_deref(),
            Self::Hotel(record)
            | Self::Attraction(record)
            | Self::Mall(record)
            | Self::School(record)
            | Self::FitnessPlace(record) => record.algorithm_version.as_deref(),
        }
    }

    /// Check caller preconditions.
    ///
    /// # Errors
    /// Returns [`InputError`] when the record has a blank id or an
    /// out-of-range price level.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.id().trim().is_empty() {
            return Err(InputError::MissingId {
                name: self.name().to_owned(),
            });
        }
        if let Self::Restaurant(record) = self
            && let Some(level) = record.price_level
            && !(1..=4).contains(&level)
        {
            return Err(InputError::PriceLevelOutOfRange {
                id: record.id.clone(),
                level,
            });
        }
        Ok(())
    }
}
