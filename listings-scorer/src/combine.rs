//! Weighted combination of component scores into an overall score.

use std::collections::BTreeMap;

use listings_core::{Category, clamp_score, round_to_hundredths, round_to_tenths};

use crate::components::RestaurantComponents;

/// Restaurant component weights in combination order:
/// food quality, service, ambience, value, accessibility.
pub const RESTAURANT_WEIGHTS: [f64; 5] = [0.35, 0.25, 0.20, 0.15, 0.05];

const HOTEL_WEIGHTS: [(&str, f64); 6] = [
    ("room_quality", 0.30),
    ("service", 0.20),
    ("cleanliness", 0.20),
    ("location", 0.10),
    ("value_for_money", 0.10),
    ("amenities", 0.10),
];

const ATTRACTION_WEIGHTS: [(&str, f64); 6] = [
    ("experience", 0.40),
    ("cultural_value", 0.20),
    ("accessibility", 0.10),
    ("facilities", 0.10),
    ("value_for_money", 0.10),
    ("uniqueness", 0.10),
];

const MALL_WEIGHTS: [(&str, f64); 6] = [
    ("variety", 0.30),
    ("amenities", 0.20),
    ("accessibility", 0.20),
    ("cleanliness", 0.10),
    ("atmosphere", 0.10),
    ("value", 0.10),
];

const SCHOOL_WEIGHTS: [(&str, f64); 6] = [
    ("academic_excellence", 0.30),
    ("facilities_quality", 0.20),
    ("teacher_quality", 0.20),
    ("programs_activities", 0.10),
    ("environment_safety", 0.10),
    ("value_for_money", 0.10),
];

const FITNESS_WEIGHTS: [(&str, f64); 6] = [
    ("equipment", 0.30),
    ("cleanliness", 0.20),
    ("staff", 0.20),
    ("facilities", 0.10),
    ("value_for_money", 0.10),
    ("atmosphere", 0.10),
];

/// Component weights for `category`.
#[must_use]
pub const fn category_weights(category: Category) -> &'static [(&'static str, f64); 6] {
    match category {
        Category::Hotel => &HOTEL_WEIGHTS,
        Category::Attraction => &ATTRACTION_WEIGHTS,
        Category::Mall => &MALL_WEIGHTS,
        Category::School => &SCHOOL_WEIGHTS,
        Category::FitnessPlace => &FITNESS_WEIGHTS,
    }
}

/// Combine restaurant components into the overall score.
///
/// The result is clamped and rounded to one decimal.
///
/// # Examples
/// ```
/// use listings_scorer::{RestaurantComponents, combine_restaurant};
///
/// let neutral = RestaurantComponents {
///     food_quality: 7.0,
///     service: 7.0,
///     ambience: 7.0,
///     value: 7.0,
///     accessibility: 7.0,
/// };
/// assert_eq!(combine_restaurant(&neutral), 7.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the overall score is a weighted sum of components"
)]
pub fn combine_restaurant(components: &RestaurantComponents) -> f64 {
    let total = components
        .as_array()
        .iter()
        .zip(RESTAURANT_WEIGHTS)
        .fold(0.0_f64, |sum, (score, weight)| sum + score * weight);
    round_to_tenths(clamp_score(total))
}

/// Combine category components into the overall rating.
///
/// Components missing from `components` contribute nothing. The result is
/// clamped and rounded to two decimals.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the overall score is a weighted sum of components"
)]
pub fn combine_category(category: Category, components: &BTreeMap<String, f64>) -> f64 {
    let total = category_weights(category)
        .iter()
        .fold(0.0_f64, |sum, (name, weight)| {
            components
                .get(*name)
                .map_or(sum, |score| sum + score * weight)
        });
    round_to_hundredths(clamp_score(total))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::components::{category_components, category_rules};

    const EPSILON: f64 = 1e-9;

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn restaurant_weights_sum_to_one() {
        let sum: f64 = RESTAURANT_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < EPSILON, "sum {sum}");
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn category_weights_sum_to_one() {
        for category in Category::ALL {
            let sum: f64 = category_weights(category).iter().map(|(_, w)| w).sum();
            assert!((sum - 1.0).abs() < EPSILON, "{category} sums to {sum}");
        }
    }

    #[rstest]
    fn weight_names_match_component_rules() {
        for category in Category::ALL {
            let weighted: Vec<&str> = category_weights(category)
                .iter()
                .map(|(name, _)| *name)
                .collect();
            let derived: Vec<&str> = category_rules(category)
                .iter()
                .map(|rule| rule.name)
                .collect();
            assert_eq!(weighted, derived, "{category}");
        }
    }

    #[rstest]
    fn restaurant_example_combines_to_excellent_band() {
        let components = RestaurantComponents {
            food_quality: 8.4,
            service: 8.4,
            ambience: 8.4,
            value: 8.4,
            accessibility: 8.5,
        };
        assert_eq!(combine_restaurant(&components), 8.4);
    }

    #[rstest]
    #[case(Category::Hotel)]
    #[case(Category::Attraction)]
    #[case(Category::Mall)]
    #[case(Category::FitnessPlace)]
    fn neutral_components_give_neutral_overall(#[case] category: Category) {
        let components = category_components(category, 7.0, 0.0);
        assert_eq!(combine_category(category, &components), 7.0);
    }

    #[rstest]
    fn school_overall_uses_fixed_bases() {
        let components = category_components(Category::School, 7.0, 0.0);
        // 8.0*0.3 + 7.5*0.2 + 8.0*0.2 + 7.5*0.1 + 8.0*0.1 + 7.0*0.1
        assert_eq!(combine_category(Category::School, &components), 7.75);
    }

    #[rstest]
    fn missing_components_contribute_nothing() {
        let components = BTreeMap::from([("room_quality".to_owned(), 10.0)]);
        assert_eq!(combine_category(Category::Hotel, &components), 3.0);
    }
}
