//! Error types raised while rating a record.

use listings_core::{InputError, SinkError};
use thiserror::Error;

/// Errors raised while rating or persisting a single record.
#[derive(Debug, Error)]
pub enum RatingError {
    /// The record has no identifier.
    #[error("record '{name}' has no id")]
    MissingId {
        /// Name of the offending record, possibly empty.
        name: String,
    },
    /// The record violates another caller precondition.
    #[error("invalid record")]
    Input {
        /// Underlying validation failure.
        #[source]
        source: InputError,
    },
    /// The sink refused or failed to store the rating.
    #[error("failed to persist rating for {id}")]
    Persist {
        /// Identifier of the affected record.
        id: String,
        /// Source error from the sink.
        #[source]
        source: SinkError,
    },
}

impl From<InputError> for RatingError {
    fn from(source: InputError) -> Self {
        match source {
            InputError::MissingId { name } => Self::MissingId { name },
            other @ InputError::PriceLevelOutOfRange { .. } => Self::Input { source: other },
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn missing_id_is_lifted_out_of_input_errors() {
        let error = RatingError::from(InputError::MissingId {
            name: "Nameless Cafe".to_owned(),
        });
        assert!(matches!(error, RatingError::MissingId { ref name } if name == "Nameless Cafe"));
    }

    #[rstest]
    fn other_input_errors_keep_their_source() {
        let error = RatingError::from(InputError::PriceLevelOutOfRange {
            id: "r-9".to_owned(),
            level: 7,
        });
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("record r-9 has price level 7, expected 1 to 4")
        );
    }
}
