//! Bounds and rounding shared by every rating variant.
//!
//! All persisted scores live on a `0.0..=10.0` scale. Restaurant scores are
//! stored with one decimal place and category scores with two; the helpers
//! here keep that granularity in one place so the variants cannot drift.

/// Lowest score any component or overall rating may take.
pub const SCORE_MIN: f64 = 0.0;

/// Highest score any component or overall rating may take.
pub const SCORE_MAX: f64 = 10.0;

/// Base score used when an entity has no review data at all.
pub const NEUTRAL_BASE_SCORE: f64 = 7.0;

/// Clamp a raw score into `SCORE_MIN..=SCORE_MAX`.
///
/// Non-finite input collapses to [`SCORE_MIN`].
///
/// # Examples
/// ```
/// use listings_core::clamp_score;
///
/// assert_eq!(clamp_score(11.2), 10.0);
/// assert_eq!(clamp_score(-0.4), 0.0);
/// assert_eq!(clamp_score(f64::NAN), 0.0);
/// ```
#[must_use]
pub const fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Round to one decimal place, half away from zero.
///
/// # Examples
/// ```
/// use listings_core::round_to_tenths;
///
/// assert_eq!(round_to_tenths(8.44), 8.4);
/// assert_eq!(round_to_tenths(6.999_999), 7.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "decimal rounding scales, rounds and rescales"
)]
pub fn round_to_tenths(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Round to two decimal places, half away from zero.
///
/// # Examples
/// ```
/// use listings_core::round_to_hundredths;
///
/// assert_eq!(round_to_hundredths(7.456), 7.46);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "decimal rounding scales, rounds and rescales"
)]
pub fn round_to_hundredths(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
