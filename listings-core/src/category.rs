//! Listing categories scored with the six-component model.
//!
//! Restaurants use their own five-component model and are not a
//! [`Category`]; every other directory entry type is.
//!
//! # Examples
//! ```
//! use listings_core::Category;
//!
//! assert_eq!(Category::FitnessPlace.as_str(), "fitness_place");
//! assert_eq!(Category::Mall.to_string(), "mall");
//! ```

use serde::{Deserialize, Serialize};

/// Non-restaurant entity types handled by the category scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Hotels and other accommodation.
    Hotel,
    /// Tourist attractions and landmarks.
    Attraction,
    /// Shopping malls.
    Mall,
    /// Schools and nurseries.
    School,
    /// Gyms and fitness studios.
    FitnessPlace,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Hotel,
        Self::Attraction,
        Self::Mall,
        Self::School,
        Self::FitnessPlace,
    ];

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Attraction => "attraction",
            Self::Mall => "mall",
            Self::School => "school",
            Self::FitnessPlace => "fitness_place",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hotel" => Ok(Self::Hotel),
            "attraction" => Ok(Self::Attraction),
            "mall" => Ok(Self::Mall),
            "school" => Ok(Self::School),
            "fitness_place" | "fitness" => Ok(Self::FitnessPlace),
            _ => Err(format!("unknown category '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn parsing_accepts_fitness_alias() {
        assert_eq!(Category::from_str("Fitness"), Ok(Category::FitnessPlace));
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = Category::from_str("restaurant").unwrap_err();
        assert!(err.contains("unknown category"));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::FitnessPlace).unwrap();
        assert_eq!(json, "\"fitness_place\"");
    }
}
