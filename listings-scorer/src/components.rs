//! Component scores derived from the base score.
//!
//! Restaurants use a five-component model with feature bonuses and
//! per-component sentiment modifiers; the result is rounded to one decimal.
//! Every other category uses six components of the form
//! `base + sentiment × factor`, rounded to two decimals. The two rounding
//! granularities match what is already stored and must not be unified.

use std::collections::BTreeMap;

use listings_core::{
    Category, NamedTag, RestaurantRatingInput, SentimentModifiers, clamp_score,
    round_to_hundredths, round_to_tenths,
};

/// Descriptions longer than this earn a food quality bonus.
pub const DESCRIPTION_BONUS_THRESHOLD: usize = 200;

/// The five restaurant component scores, each in `0.0..=10.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestaurantComponents {
    /// Food quality.
    pub food_quality: f64,
    /// Service.
    pub service: f64,
    /// Ambience.
    pub ambience: f64,
    /// Value for money.
    pub value: f64,
    /// Accessibility.
    pub accessibility: f64,
}

impl RestaurantComponents {
    /// Components in combination order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 5] {
        [
            self.food_quality,
            self.service,
            self.ambience,
            self.value,
            self.accessibility,
        ]
    }
}

struct FeatureBonus {
    keywords: &'static [&'static str],
    bonus: f64,
}

const CHEF_SPECIAL: FeatureBonus = FeatureBonus {
    keywords: &["chef special", "chef's special"],
    bonus: 0.2,
};
const RESERVATIONS: FeatureBonus = FeatureBonus {
    keywords: &["reservation"],
    bonus: 0.1,
};
const TABLE_SERVICE: FeatureBonus = FeatureBonus {
    keywords: &["waiter", "table service"],
    bonus: 0.15,
};
const OUTDOOR_SEATING: FeatureBonus = FeatureBonus {
    keywords: &["outdoor"],
    bonus: 0.15,
};
const LIVE_MUSIC: FeatureBonus = FeatureBonus {
    keywords: &["live music"],
    bonus: 0.1,
};
const FINE_DINING: FeatureBonus = FeatureBonus {
    keywords: &["fine dining"],
    bonus: 0.2,
};
const ROMANTIC: FeatureBonus = FeatureBonus {
    keywords: &["romantic"],
    bonus: 0.1,
};
const WHEELCHAIR: FeatureBonus = FeatureBonus {
    keywords: &["wheelchair"],
    bonus: 0.3,
};
const PARKING: FeatureBonus = FeatureBonus {
    keywords: &["parking"],
    bonus: 0.15,
};
const RESTROOM: FeatureBonus = FeatureBonus {
    keywords: &["restroom"],
    bonus: 0.1,
};
const WIFI: FeatureBonus = FeatureBonus {
    keywords: &["wifi", "wi-fi"],
    bonus: 0.1,
};

const SERVICE_MODIFIER_WEIGHT: f64 = 0.8;
const AMBIENCE_MODIFIER_WEIGHT: f64 = 0.8;
const VALUE_MODIFIER_WEIGHT: f64 = 0.6;
const ACCESSIBILITY_MODIFIER_WEIGHT: f64 = 0.3;

/// Case-insensitive substring match of any keyword against any tag name.
///
/// # Examples
/// ```
/// use listings_core::NamedTag;
/// use listings_scorer::has_tag;
///
/// let features = vec![NamedTag::new("Accepts Reservations")];
/// assert!(has_tag(&features, &["reservation"]));
/// assert!(!has_tag(&features, &["parking"]));
/// ```
#[must_use]
pub fn has_tag(tags: &[NamedTag], keywords: &[&str]) -> bool {
    tags.iter().any(|tag| {
        let name = tag.name.to_lowercase();
        keywords.iter().any(|keyword| name.contains(keyword))
    })
}

fn bonus(tags: &[NamedTag], feature: &FeatureBonus) -> f64 {
    if has_tag(tags, feature.keywords) {
        feature.bonus
    } else {
        0.0
    }
}

/// Compute the five restaurant components from `base` and `modifiers`.
///
/// Each component is clamped to `0.0..=10.0` and rounded to one decimal.
#[must_use]
pub fn restaurant_components(
    input: &RestaurantRatingInput,
    base: f64,
    modifiers: &SentimentModifiers,
) -> RestaurantComponents {
    let finish = |raw: f64| round_to_tenths(clamp_score(raw));
    RestaurantComponents {
        food_quality: finish(food_quality(input, base, modifiers)),
        service: finish(service(input, base, modifiers)),
        ambience: finish(ambience(input, base, modifiers)),
        value: finish(value(input, base, modifiers)),
        accessibility: finish(accessibility(input, base, modifiers)),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "component scores add bonuses to the base score"
)]
fn food_quality(input: &RestaurantRatingInput, base: f64, modifiers: &SentimentModifiers) -> f64 {
    let description_bonus = match input.effective_description() {
        Some(text) if text.chars().count() > DESCRIPTION_BONUS_THRESHOLD => 0.1,
        _ => 0.0,
    };
    base + description_bonus
        + bonus(&input.features, &CHEF_SPECIAL)
        + modifiers.food_quality_modifier
}

#[expect(
    clippy::float_arithmetic,
    reason = "component scores add bonuses to the base score"
)]
fn service(input: &RestaurantRatingInput, base: f64, modifiers: &SentimentModifiers) -> f64 {
    let price_bonus = if input.price_level.is_some_and(|level| level >= 3) {
        0.15
    } else {
        0.0
    };
    base + price_bonus
        + bonus(&input.features, &RESERVATIONS)
        + bonus(&input.features, &TABLE_SERVICE)
        + modifiers.service_modifier * SERVICE_MODIFIER_WEIGHT
}

#[expect(
    clippy::float_arithmetic,
    reason = "component scores add bonuses to the base score"
)]
fn ambience(input: &RestaurantRatingInput, base: f64, modifiers: &SentimentModifiers) -> f64 {
    base + bonus(&input.features, &OUTDOOR_SEATING)
        + bonus(&input.features, &LIVE_MUSIC)
        + bonus(&input.cuisines, &FINE_DINING)
        + bonus(&input.features, &ROMANTIC)
        + modifiers.ambience_modifier * AMBIENCE_MODIFIER_WEIGHT
}

#[expect(
    clippy::float_arithmetic,
    reason = "component scores add bonuses to the base score"
)]
fn value(input: &RestaurantRatingInput, base: f64, modifiers: &SentimentModifiers) -> f64 {
    let price_adjustment = match input.price_level {
        Some(1) => 0.1,
        Some(4) => -0.1,
        _ => 0.0,
    };
    base + price_adjustment + modifiers.value_modifier * VALUE_MODIFIER_WEIGHT
}

#[expect(
    clippy::float_arithmetic,
    reason = "component scores add bonuses to the base score"
)]
fn accessibility(input: &RestaurantRatingInput, base: f64, modifiers: &SentimentModifiers) -> f64 {
    base + bonus(&input.features, &WHEELCHAIR)
        + bonus(&input.features, &PARKING)
        + bonus(&input.features, &RESTROOM)
        + bonus(&input.features, &WIFI)
        + modifiers.accessibility_modifier * ACCESSIBILITY_MODIFIER_WEIGHT
}

/// Where a category component starts before sentiment is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentBase {
    /// The review-weighted base score.
    Aggregated,
    /// A fixed starting value, independent of reviews.
    Fixed(f64),
}

/// How one category component is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentRule {
    /// Name the component is stored under.
    pub name: &'static str,
    /// Starting value.
    pub base: ComponentBase,
    /// Share of the sentiment score added to the component.
    pub sentiment_factor: f64,
}

const fn aggregated(name: &'static str, sentiment_factor: f64) -> ComponentRule {
    ComponentRule {
        name,
        base: ComponentBase::Aggregated,
        sentiment_factor,
    }
}

const fn fixed(name: &'static str, base: f64, sentiment_factor: f64) -> ComponentRule {
    ComponentRule {
        name,
        base: ComponentBase::Fixed(base),
        sentiment_factor,
    }
}

const HOTEL_RULES: [ComponentRule; 6] = [
    aggregated("room_quality", 0.5),
    aggregated("service", 0.6),
    aggregated("cleanliness", 0.4),
    aggregated("location", 0.2),
    aggregated("value_for_money", 0.3),
    aggregated("amenities", 0.3),
];

const ATTRACTION_RULES: [ComponentRule; 6] = [
    aggregated("experience", 0.6),
    aggregated("cultural_value", 0.3),
    aggregated("accessibility", 0.2),
    aggregated("facilities", 0.3),
    aggregated("value_for_money", 0.4),
    aggregated("uniqueness", 0.3),
];

const MALL_RULES: [ComponentRule; 6] = [
    aggregated("variety", 0.3),
    aggregated("amenities", 0.3),
    aggregated("accessibility", 0.2),
    aggregated("cleanliness", 0.4),
    aggregated("atmosphere", 0.5),
    aggregated("value", 0.3),
];

// School scores are qualitative placeholders rather than review aggregates.
const SCHOOL_RULES: [ComponentRule; 6] = [
    fixed("academic_excellence", 8.0, 0.3),
    fixed("facilities_quality", 7.5, 0.2),
    fixed("teacher_quality", 8.0, 0.4),
    fixed("programs_activities", 7.5, 0.2),
    fixed("environment_safety", 8.0, 0.3),
    fixed("value_for_money", 7.0, 0.2),
];

const FITNESS_RULES: [ComponentRule; 6] = [
    aggregated("equipment", 0.4),
    aggregated("cleanliness", 0.5),
    aggregated("staff", 0.6),
    aggregated("facilities", 0.3),
    aggregated("value_for_money", 0.3),
    aggregated("atmosphere", 0.4),
];

/// Component rules for `category`, in storage order.
#[must_use]
pub const fn category_rules(category: Category) -> &'static [ComponentRule; 6] {
    match category {
        Category::Hotel => &HOTEL_RULES,
        Category::Attraction => &ATTRACTION_RULES,
        Category::Mall => &MALL_RULES,
        Category::School => &SCHOOL_RULES,
        Category::FitnessPlace => &FITNESS_RULES,
    }
}

/// Compute the six category components.
///
/// `base` is the weighted average of the collected sources and `sentiment`
/// the simple sentiment score of the record's free text (zero without
/// text). Each component is clamped and rounded to two decimals.
///
/// # Examples
/// ```
/// use listings_core::Category;
/// use listings_scorer::category_components;
///
/// let components = category_components(Category::School, 5.0, 0.0);
/// assert_eq!(components.get("academic_excellence"), Some(&8.0));
/// assert_eq!(components.get("value_for_money"), Some(&7.0));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "components scale sentiment and add it to the base"
)]
pub fn category_components(category: Category, base: f64, sentiment: f64) -> BTreeMap<String, f64> {
    category_rules(category)
        .iter()
        .map(|rule| {
            let start = match rule.base {
                ComponentBase::Aggregated => base,
                ComponentBase::Fixed(value) => value,
            };
            let score = round_to_hundredths(clamp_score(start + sentiment * rule.sentiment_factor));
            (rule.name.to_owned(), score)
        })
        .collect()
}
