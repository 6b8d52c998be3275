//! Log subscriber installation.
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! captures those records alongside any `tracing` events.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Level used when neither configuration nor `RUST_LOG` provide one.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log level/filter '{value}'")]
    EnvFilter {
        /// Rejected filter text.
        value: String,
        /// Parser error from `tracing-subscriber`.
        #[source]
        source: ParseError,
    },
    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Build the filter, preferring `RUST_LOG` over the configured level.
pub(crate) fn env_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|source| TelemetryError::EnvFilter {
            value: level.to_owned(),
            source,
        })
    })
}

/// Install a compact stderr subscriber filtered at `level`.
pub(crate) fn init(level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DEFAULT_LOG_LEVEL)]
    #[case("debug")]
    #[case("listings_scorer=debug,warn")]
    fn builds_filters_for_valid_levels(#[case] level: &str) {
        assert!(env_filter(level).is_ok());
    }
}
