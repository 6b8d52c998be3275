//! Sentiment modifiers and the seam for sentiment backends.
//!
//! A [`SentimentAnalyzer`] turns a batch of review texts into per-component
//! [`SentimentModifiers`]. Backends may be remote and fallible; callers are
//! expected to degrade to [`SentimentModifiers::neutral`] on failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest magnitude any single modifier may take.
pub const MODIFIER_LIMIT: f64 = 3.0;

/// Keywords matched while deriving modifiers, grouped by severity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCounts {
    /// Keywords describing serious failures.
    pub critical_negative: Vec<String>,
    /// Keywords describing notable problems.
    pub moderate_negative: Vec<String>,
    /// Keywords describing small annoyances.
    pub minor_negative: Vec<String>,
    /// Keywords describing praise.
    pub positive: Vec<String>,
}

impl KeywordCounts {
    /// Total number of matches across all severities.
    #[must_use]
    pub fn total(&self) -> usize {
        self.critical_negative.len()
            + self.moderate_negative.len()
            + self.minor_negative.len()
            + self.positive.len()
    }
}

/// Per-component score adjustments derived from review sentiment.
///
/// Each modifier lies in `-3.0..=3.0` once [`SentimentModifiers::clamped`]
/// has been applied. Modifiers missing from serialised input default to
/// `0.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SentimentModifiers {
    /// Adjustment for food quality.
    pub food_quality_modifier: f64,
    /// Adjustment for service.
    pub service_modifier: f64,
    /// Adjustment for ambience.
    pub ambience_modifier: f64,
    /// Adjustment for value.
    pub value_modifier: f64,
    /// Adjustment for accessibility.
    pub accessibility_modifier: f64,
    /// Diagnostic breakdown of matched keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_counts: Option<KeywordCounts>,
}

impl SentimentModifiers {
    /// Modifiers that leave every component unchanged.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Return a copy with every modifier clamped to `-3.0..=3.0`.
    ///
    /// Non-finite modifiers collapse to `0.0`.
    ///
    /// # Examples
    /// ```
    /// use listings_core::SentimentModifiers;
    ///
    /// let raw = SentimentModifiers {
    ///     food_quality_modifier: -4.2,
    ///     service_modifier: 1.5,
    ///     ..SentimentModifiers::neutral()
    /// };
    /// let clamped = raw.clamped();
    /// assert_eq!(clamped.food_quality_modifier, -3.0);
    /// assert_eq!(clamped.service_modifier, 1.5);
    /// ```
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            food_quality_modifier: clamp_modifier(self.food_quality_modifier),
            service_modifier: clamp_modifier(self.service_modifier),
            ambience_modifier: clamp_modifier(self.ambience_modifier),
            value_modifier: clamp_modifier(self.value_modifier),
            accessibility_modifier: clamp_modifier(self.accessibility_modifier),
            keyword_counts: self.keyword_counts,
        }
    }

    /// Report whether every modifier is zero.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        [
            self.food_quality_modifier,
            self.service_modifier,
            self.ambience_modifier,
            self.value_modifier,
            self.accessibility_modifier,
        ]
        .iter()
        .all(|value| *value == 0.0)
    }
}

const fn clamp_modifier(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(-MODIFIER_LIMIT, MODIFIER_LIMIT)
}

/// Modifiers together with whether analysis actually ran.
///
/// `analyzed` distinguishes "neutral because nothing was analysed or the
/// backend failed" from "neutral because the reviews were neutral".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SentimentOutcome {
    /// Modifiers to apply.
    pub modifiers: SentimentModifiers,
    /// Whether the modifiers came from a successful analysis.
    pub analyzed: bool,
}

impl SentimentOutcome {
    /// Outcome used when analysis was skipped or failed.
    #[must_use]
    pub fn skipped() -> Self {
        Self::default()
    }

    /// Outcome for modifiers produced by a successful analysis.
    #[must_use]
    pub fn analyzed(modifiers: SentimentModifiers) -> Self {
        Self {
            modifiers: modifiers.clamped(),
            analyzed: true,
        }
    }
}

/// Errors raised by sentiment backends.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SentimentError {
    /// The backend reported a failure.
    #[error("sentiment backend failed: {message}")]
    Backend {
        /// Description provided by the backend.
        message: String,
    },
    /// The backend did not answer within the allowed time.
    #[error("sentiment analysis timed out after {after:?}")]
    TimedOut {
        /// Bound that elapsed.
        after: Duration,
    },
    /// The backend worker stopped without producing a result.
    #[error("sentiment worker stopped before replying")]
    Disconnected,
}

/// Derive per-component modifiers from review texts.
///
/// Implementations must be thread-safe so a backend can be bounded by a
/// worker thread.
pub trait SentimentAnalyzer: Send + Sync {
    /// Analyse `reviews` and return raw modifiers.
    ///
    /// # Errors
    /// Returns [`SentimentError`] when the backend cannot produce modifiers.
    fn analyse(&self, reviews: &[String]) -> Result<SentimentModifiers, SentimentError>;
}

impl<T: SentimentAnalyzer + ?Sized> SentimentAnalyzer for &T {
    fn analyse(&self, reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        (**self).analyse(reviews)
    }
}

impl<T: SentimentAnalyzer + ?Sized> SentimentAnalyzer for std::sync::Arc<T> {
    fn analyse(&self, reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        (**self).analyse(reviews)
    }
}

impl<T: SentimentAnalyzer + ?Sized> SentimentAnalyzer for Box<T> {
    fn analyse(&self, reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        (**self).analyse(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.5, 2.5)]
    #[case(3.4, 3.0)]
    #[case(-7.0, -3.0)]
    #[case(f64::NAN, 0.0)]
    fn clamps_each_modifier(#[case] raw: f64, #[case] expected: f64) {
        let modifiers = SentimentModifiers {
            value_modifier: raw,
            ..SentimentModifiers::neutral()
        }
        .clamped();
        assert_eq!(modifiers.value_modifier, expected);
    }

    #[rstest]
    fn neutral_modifiers_report_neutral() {
        assert!(SentimentModifiers::neutral().is_neutral());
        let skewed = SentimentModifiers {
            ambience_modifier: 0.3,
            ..SentimentModifiers::neutral()
        };
        assert!(!skewed.is_neutral());
    }

    #[rstest]
    fn modifiers_serialise_in_camel_case() {
        let json = serde_json::to_value(SentimentModifiers::neutral()).unwrap();
        assert!(json.get("foodQualityModifier").is_some());
        assert!(json.get("keywordCounts").is_none());
    }

    #[rstest]
    fn missing_modifiers_default_to_zero() {
        let parsed: SentimentModifiers =
            serde_json::from_str(r#"{"serviceModifier": -0.8}"#).unwrap();
        assert_eq!(parsed.service_modifier, -0.8);
        assert_eq!(parsed.food_quality_modifier, 0.0);
        assert_eq!(parsed.accessibility_modifier, 0.0);
        assert!(parsed.keyword_counts.is_none());
    }

    #[rstest]
    fn keyword_counts_total_spans_every_severity() {
        let counts = KeywordCounts {
            critical_negative: vec!["rude".to_owned()],
            moderate_negative: vec!["bland".to_owned(), "noisy".to_owned()],
            minor_negative: Vec::new(),
            positive: vec!["cozy".to_owned()],
        };
        assert_eq!(counts.total(), 4);
    }

    #[rstest]
    fn analyzed_outcome_clamps_modifiers() {
        let outcome = SentimentOutcome::analyzed(SentimentModifiers {
            service_modifier: 9.0,
            ..SentimentModifiers::neutral()
        });
        assert!(outcome.analyzed);
        assert_eq!(outcome.modifiers.service_modifier, 3.0);
    }
}
