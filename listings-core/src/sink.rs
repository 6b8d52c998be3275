//! Persistence seam for computed ratings.
//!
//! The engine never writes anything itself. Callers hand each result to a
//! [`RatingSink`], which owns the storage concern (a document store, a SQL
//! row, a JSON-lines file).

use thiserror::Error;

use crate::RatingResult;

/// Errors raised while persisting a rating.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Encoding the rating failed.
    #[error("failed to encode rating for {id}")]
    Encode {
        /// Identifier of the entity being written.
        id: String,
        /// Underlying encoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Writing to the backing store failed.
    #[error("failed to write rating for {id}")]
    Write {
        /// Identifier of the entity being written.
        id: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The backing store refused the write.
    #[error("rating for {id} was rejected: {reason}")]
    Rejected {
        /// Identifier of the entity being written.
        id: String,
        /// Reason given by the store.
        reason: String,
    },
}

/// Destination for computed ratings, keyed by entity id.
pub trait RatingSink {
    /// Persist `rating` for the entity identified by `id`.
    ///
    /// # Errors
    /// Returns [`SinkError`] when the rating cannot be stored.
    fn persist(&mut self, id: &str, rating: &RatingResult) -> Result<(), SinkError>;
}

impl<T: RatingSink + ?Sized> RatingSink for &mut T {
    fn persist(&mut self, id: &str, rating: &RatingResult) -> Result<(), SinkError> {
        (**self).persist(id, rating)
    }
}
