//! Keyword-based sentiment scoring.
//!
//! Two deliberately separate algorithms live here:
//! - [`score_sentiment`] turns one free-text summary into a single number in
//!   `-2.0..=2.0`; the category variants fold it into their components.
//! - [`KeywordImpactAnalyzer`] turns a batch of restaurant reviews into five
//!   per-component [`SentimentModifiers`].
//!
//! [`analyze_sentiment`] wraps any [`SentimentAnalyzer`] so that a failing
//! backend degrades to neutral modifiers instead of failing the rating.

use std::sync::{Arc, mpsc};
use std::time::Duration;

use listings_core::{
    KeywordCounts, SentimentAnalyzer, SentimentError, SentimentModifiers, SentimentOutcome,
};
use log::{debug, warn};

const POSITIVE_KEYWORDS: [&str; 8] = [
    "excellent",
    "great",
    "good",
    "amazing",
    "love",
    "best",
    "delicious",
    "friendly",
];
const NEGATIVE_KEYWORDS: [&str; 8] = [
    "bad",
    "poor",
    "worst",
    "rude",
    "dirty",
    "expensive",
    "slow",
    "avoid",
];
const POSITIVE_KEYWORD_WEIGHT: f64 = 0.2;
const NEGATIVE_KEYWORD_WEIGHT: f64 = -0.3;

/// Bound of the simple sentiment score.
pub const SENTIMENT_SCORE_LIMIT: f64 = 2.0;

/// Score free text by keyword containment.
///
/// Each listed keyword counts once, however often it appears.
///
/// # Examples
/// ```
/// use listings_scorer::score_sentiment;
///
/// let score = score_sentiment("Great views but a slow lift");
/// assert!((score - (0.2 - 0.3)).abs() < 1e-9);
/// assert_eq!(score_sentiment(""), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "keyword weights are summed into a score"
)]
pub fn score_sentiment(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let positive = keyword_total(&lowered, &POSITIVE_KEYWORDS, POSITIVE_KEYWORD_WEIGHT);
    let negative = keyword_total(&lowered, &NEGATIVE_KEYWORDS, NEGATIVE_KEYWORD_WEIGHT);
    (positive + negative).clamp(-SENTIMENT_SCORE_LIMIT, SENTIMENT_SCORE_LIMIT)
}

#[expect(
    clippy::float_arithmetic,
    reason = "keyword weights are summed into a score"
)]
fn keyword_total(text: &str, keywords: &[&str], weight: f64) -> f64 {
    keywords
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .fold(0.0, |total, _| total + weight)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Critical,
    Moderate,
    Minor,
    Positive,
}

impl Severity {
    const NEGATIVE: [Self; 3] = [Self::Critical, Self::Moderate, Self::Minor];

    const fn impact(self) -> f64 {
        match self {
            Self::Critical => -0.8,
            Self::Moderate => -0.4,
            Self::Minor => -0.2,
            Self::Positive => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aspect {
    FoodQuality,
    Service,
    Ambience,
    Value,
    Accessibility,
}

struct Lexicon {
    aspect: Aspect,
    critical: &'static [&'static str],
    moderate: &'static [&'static str],
    minor: &'static [&'static str],
    positive: &'static [&'static str],
}

impl Lexicon {
    const fn keywords(&self, severity: Severity) -> &'static [&'static str] {
        match severity {
            Severity::Critical => self.critical,
            Severity::Moderate => self.moderate,
            Severity::Minor => self.minor,
            Severity::Positive => self.positive,
        }
    }
}

const LEXICONS: [Lexicon; 5] = [
    Lexicon {
        aspect: Aspect::FoodQuality,
        critical: &["food poisoning", "raw chicken", "cockroach", "hair in"],
        moderate: &["undercooked", "overcooked", "cold food", "bland", "stale"],
        minor: &["too salty", "greasy", "small portion"],
        positive: &["delicious", "tasty", "flavorful", "fresh ingredients", "perfectly cooked"],
    },
    Lexicon {
        aspect: Aspect::Service,
        critical: &["rude", "ignored us", "never came back"],
        moderate: &["slow service", "unfriendly", "wrong order", "long wait"],
        minor: &["forgot", "inattentive"],
        positive: &["friendly", "attentive", "helpful", "welcoming"],
    },
    Lexicon {
        aspect: Aspect::Ambience,
        critical: &["filthy", "dirty", "smelly"],
        moderate: &["noisy", "crowded", "cramped"],
        minor: &["loud music", "too dark"],
        positive: &["cozy", "beautiful", "romantic", "relaxing", "great atmosphere"],
    },
    Lexicon {
        aspect: Aspect::Value,
        critical: &["rip off", "ripoff", "scam"],
        moderate: &["overpriced", "expensive"],
        minor: &["pricey"],
        positive: &["good value", "reasonable prices", "affordable", "worth it"],
    },
    Lexicon {
        aspect: Aspect::Accessibility,
        critical: &["no wheelchair", "inaccessible"],
        moderate: &["no parking", "hard to find"],
        minor: &["steep stairs", "narrow entrance"],
        positive: &["wheelchair accessible", "easy parking", "ample parking", "convenient location"],
    },
];

#[derive(Debug, Default)]
struct AspectTotals {
    food_quality: f64,
    service: f64,
    ambience: f64,
    value: f64,
    accessibility: f64,
}

impl AspectTotals {
    #[expect(
        clippy::float_arithmetic,
        reason = "keyword impacts accumulate per aspect"
    )]
    fn add(&mut self, aspect: Aspect, impact: f64) {
        let slot = match aspect {
            Aspect::FoodQuality => &mut self.food_quality,
            Aspect::Service => &mut self.service,
            Aspect::Ambience => &mut self.ambience,
            Aspect::Value => &mut self.value,
            Aspect::Accessibility => &mut self.accessibility,
        };
        *slot += impact;
    }

    fn into_modifiers(self, counts: KeywordCounts) -> SentimentModifiers {
        SentimentModifiers {
            food_quality_modifier: self.food_quality,
            service_modifier: self.service,
            ambience_modifier: self.ambience,
            value_modifier: self.value,
            accessibility_modifier: self.accessibility,
            keyword_counts: Some(counts),
        }
        .clamped()
    }
}

fn record_match(counts: &mut KeywordCounts, severity: Severity, keyword: &str) {
    let bucket = match severity {
        Severity::Critical => &mut counts.critical_negative,
        Severity::Moderate => &mut counts.moderate_negative,
        Severity::Minor => &mut counts.minor_negative,
        Severity::Positive => &mut counts.positive,
    };
    bucket.push(keyword.to_owned());
}

/// Per-component keyword-impact analyzer for restaurant reviews.
///
/// For every review and every component lexicon, each contained keyword
/// contributes its severity's impact: critical `-0.8`, moderate `-0.4`,
/// minor `-0.2`, positive `+0.3`. Totals are clamped to `-3.0..=3.0` per
/// component. The analyzer never fails.
///
/// # Examples
/// ```
/// use listings_core::SentimentAnalyzer;
/// use listings_scorer::KeywordImpactAnalyzer;
///
/// let reviews = vec!["Delicious pasta, friendly staff".to_owned()];
/// let modifiers = KeywordImpactAnalyzer.analyse(&reviews).unwrap();
/// assert!((modifiers.food_quality_modifier - 0.3).abs() < 1e-9);
/// assert!((modifiers.service_modifier - 0.3).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordImpactAnalyzer;

impl KeywordImpactAnalyzer {
    /// Compute clamped modifiers for `reviews`.
    #[must_use]
    pub fn modifiers(reviews: &[String]) -> SentimentModifiers {
        let mut totals = AspectTotals::default();
        let mut counts = KeywordCounts::default();
        for review in reviews {
            score_review(&review.to_lowercase(), &mut totals, &mut counts);
        }
        debug!(
            "matched {} sentiment keywords across {} reviews",
            counts.total(),
            reviews.len()
        );
        totals.into_modifiers(counts)
    }
}

/// Match negative phrases first and blank them out, so praise embedded in a
/// complaint ("friendly" in "unfriendly") is not counted.
fn score_review(review: &str, totals: &mut AspectTotals, counts: &mut KeywordCounts) {
    let mut remaining = review.to_owned();
    for lexicon in &LEXICONS {
        for severity in Severity::NEGATIVE {
            for keyword in lexicon.keywords(severity) {
                if review.contains(keyword) {
                    totals.add(lexicon.aspect, severity.impact());
                    record_match(counts, severity, keyword);
                    remaining = remaining.replace(keyword, " ");
                }
            }
        }
    }
    for lexicon in &LEXICONS {
        for keyword in lexicon.keywords(Severity::Positive) {
            if remaining.contains(keyword) {
                totals.add(lexicon.aspect, Severity::Positive.impact());
                record_match(counts, Severity::Positive, keyword);
            }
        }
    }
}

impl SentimentAnalyzer for KeywordImpactAnalyzer {
    fn analyse(&self, reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        Ok(Self::modifiers(reviews))
    }
}

/// Run `analyzer` over `reviews`, degrading to neutral modifiers.
///
/// No reviews, or any analyzer error, yields neutral modifiers with
/// `analyzed == false`. This function never fails.
pub fn analyze_sentiment<A>(analyzer: &A, reviews: &[String]) -> SentimentOutcome
where
    A: SentimentAnalyzer + ?Sized,
{
    if reviews.iter().all(|review| review.trim().is_empty()) {
        return SentimentOutcome::skipped();
    }
    match analyzer.analyse(reviews) {
        Ok(modifiers) => SentimentOutcome::analyzed(modifiers),
        Err(err) => {
            warn!("sentiment analysis failed, using neutral modifiers: {err}");
            SentimentOutcome::skipped()
        }
    }
}

/// Bound a sentiment backend by a deadline.
///
/// The wrapped analyzer runs on a worker thread. When it does not answer
/// within the timeout the call fails with [`SentimentError::TimedOut`]; the
/// worker is left to finish on its own and its answer is discarded.
#[derive(Debug)]
pub struct TimeoutAnalyzer<A> {
    inner: Arc<A>,
    timeout: Duration,
}

impl<A> TimeoutAnalyzer<A> {
    /// Wrap `inner` with a `timeout`.
    pub fn new(inner: A, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    /// Deadline applied to each call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<A> SentimentAnalyzer for TimeoutAnalyzer<A>
where
    A: SentimentAnalyzer + 'static,
{
    fn analyse(&self, reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        let (sender, receiver) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let owned = reviews.to_vec();
        std::thread::Builder::new()
            .name("sentiment-worker".to_owned())
            .spawn(move || {
                if sender.send(inner.analyse(&owned)).is_err() {
                    debug!("sentiment result arrived after the caller gave up");
                }
            })
            .map_err(|err| SentimentError::Backend {
                message: format!("failed to spawn sentiment worker: {err}"),
            })?;

        match receiver.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(SentimentError::TimedOut {
                after: self.timeout,
            }),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(SentimentError::Disconnected),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the keyword scorers.

    use listings_core::test_support::{FailingAnalyzer, SlowAnalyzer, StaticAnalyzer};
    use rstest::rstest;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn reviews(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| (*text).to_owned()).collect()
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn mixed_review_scores_sum_of_keywords() {
        let score = score_sentiment(
            "The food was excellent and the staff were amazing but parking was bad",
        );
        assert!((score - 0.1).abs() < TOLERANCE, "got {score}");
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn repeated_keywords_count_once() {
        let once = score_sentiment("great");
        let many = score_sentiment("great great GREAT great");
        assert!((once - many).abs() < TOLERANCE);
        assert!((once - 0.2).abs() < TOLERANCE);
    }

    #[rstest]
    fn negative_text_is_clamped() {
        let score = score_sentiment("bad poor worst rude dirty expensive slow avoid");
        assert_eq!(score, -SENTIMENT_SCORE_LIMIT);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn positive_text_stays_within_bound() {
        let score = score_sentiment("excellent great good amazing love best delicious friendly");
        assert!((score - 1.6).abs() < TOLERANCE, "got {score}");
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn impacts_accumulate_per_component() {
        let modifiers = KeywordImpactAnalyzer::modifiers(&reviews(&[
            "Food poisoning after the bland soup",
            "Rude waiter, but a romantic terrace",
        ]));
        assert!((modifiers.food_quality_modifier - (-1.2)).abs() < TOLERANCE);
        assert!((modifiers.service_modifier - (-0.8)).abs() < TOLERANCE);
        assert!((modifiers.ambience_modifier - 0.3).abs() < TOLERANCE);
        assert_eq!(modifiers.value_modifier, 0.0);
        let counts = modifiers.keyword_counts.expect("keyword counts");
        assert_eq!(counts.critical_negative, vec!["food poisoning", "rude"]);
        assert_eq!(counts.moderate_negative, vec!["bland"]);
        assert_eq!(counts.positive, vec!["romantic"]);
    }

    #[rstest]
    #[case("The waiter was unfriendly", "unfriendly", -0.4)]
    #[case("Our server was inattentive", "inattentive", -0.2)]
    fn complaints_do_not_count_the_praise_they_contain(
        #[case] review: &str,
        #[case] complaint: &str,
        #[case] expected: f64,
    ) {
        let modifiers = KeywordImpactAnalyzer::modifiers(&reviews(&[review]));
        assert_eq!(modifiers.service_modifier, expected);
        let counts = modifiers.keyword_counts.expect("keyword counts");
        assert!(counts.positive.is_empty(), "{:?}", counts.positive);
        assert_eq!(counts.total(), 1);
        assert!(
            counts.moderate_negative.iter().chain(&counts.minor_negative).any(|k| k == complaint)
        );
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn praise_beside_a_complaint_still_counts() {
        let modifiers =
            KeywordImpactAnalyzer::modifiers(&reviews(&["Unfriendly host but a friendly chef"]));
        assert!((modifiers.service_modifier - (-0.1)).abs() < TOLERANCE);
    }

    #[rstest]
    fn modifiers_clamp_at_three() {
        let batch = reviews(&["Cockroach on the plate, food poisoning, hair in the soup"; 3]);
        let modifiers = KeywordImpactAnalyzer::modifiers(&batch);
        assert_eq!(modifiers.food_quality_modifier, -3.0);
    }

    #[rstest]
    fn empty_reviews_are_not_analyzed() {
        let outcome = analyze_sentiment(&KeywordImpactAnalyzer, &[]);
        assert!(!outcome.analyzed);
        assert!(outcome.modifiers.is_neutral());
    }

    #[rstest]
    fn failing_backend_degrades_to_neutral() {
        let outcome = analyze_sentiment(&FailingAnalyzer, &reviews(&["lovely"]));
        assert!(!outcome.analyzed);
        assert!(outcome.modifiers.is_neutral());
    }

    #[rstest]
    fn successful_backend_marks_outcome_analyzed() {
        let analyzer = StaticAnalyzer::new(SentimentModifiers {
            value_modifier: 5.0,
            ..SentimentModifiers::neutral()
        });
        let outcome = analyze_sentiment(&analyzer, &reviews(&["anything"]));
        assert!(outcome.analyzed);
        assert_eq!(outcome.modifiers.value_modifier, 3.0);
    }

    #[rstest]
    fn slow_backend_times_out() {
        let analyzer = TimeoutAnalyzer::new(
            SlowAnalyzer::new(Duration::from_millis(500)),
            Duration::from_millis(20),
        );
        let err = analyzer.analyse(&reviews(&["hello"])).unwrap_err();
        assert!(matches!(err, SentimentError::TimedOut { .. }));
        let outcome = analyze_sentiment(&analyzer, &reviews(&["hello"]));
        assert!(!outcome.analyzed);
    }

    #[rstest]
    fn fast_backend_answers_within_timeout() {
        let analyzer = TimeoutAnalyzer::new(KeywordImpactAnalyzer, Duration::from_secs(5));
        let modifiers = analyzer.analyse(&reviews(&["affordable"])).expect("modifiers");
        assert!(modifiers.value_modifier > 0.0);
    }
}
