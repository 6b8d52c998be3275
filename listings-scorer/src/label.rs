//! Map overall scores to display bands.

use listings_core::ScoreLabel;

const BANDS: [(f64, ScoreLabel); 5] = [
    (9.0, ScoreLabel::Exceptional),
    (8.0, ScoreLabel::Excellent),
    (7.0, ScoreLabel::VeryGood),
    (6.0, ScoreLabel::Good),
    (5.0, ScoreLabel::Average),
];

/// Band for `score`. Lower bounds are inclusive.
///
/// # Examples
/// ```
/// use listings_core::ScoreLabel;
/// use listings_scorer::score_label;
///
/// assert_eq!(score_label(9.0), ScoreLabel::Exceptional);
/// assert_eq!(score_label(8.95), ScoreLabel::Excellent);
/// assert_eq!(score_label(4.99), ScoreLabel::BelowAverage);
/// ```
#[must_use]
pub fn score_label(score: f64) -> ScoreLabel {
    BANDS
        .iter()
        .find(|(lower, _)| score >= *lower)
        .map_or(ScoreLabel::BelowAverage, |(_, label)| *label)
}
