//! Test doubles for the sentiment and persistence seams.
//!
//! These let unit and behaviour tests drive the engine without a network
//! backend or a real store.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::{
    RatingResult, RatingSink, SentimentAnalyzer, SentimentError, SentimentModifiers, SinkError,
};

/// Analyzer that always returns the same modifiers.
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    modifiers: SentimentModifiers,
}

impl StaticAnalyzer {
    /// Create an analyzer returning `modifiers` for every call.
    #[must_use]
    pub const fn new(modifiers: SentimentModifiers) -> Self {
        Self { modifiers }
    }
}

impl SentimentAnalyzer for StaticAnalyzer {
    fn analyse(&self, _reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        Ok(self.modifiers.clone())
    }
}

/// Analyzer that always fails with a backend error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAnalyzer;

impl SentimentAnalyzer for FailingAnalyzer {
    fn analyse(&self, _reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        Err(SentimentError::Backend {
            message: "backend unavailable".to_owned(),
        })
    }
}

/// Analyzer that sleeps before answering, for exercising timeouts.
#[derive(Debug, Clone, Copy)]
pub struct SlowAnalyzer {
    delay: Duration,
}

impl SlowAnalyzer {
    /// Create an analyzer that answers neutrally after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SentimentAnalyzer for SlowAnalyzer {
    fn analyse(&self, _reviews: &[String]) -> Result<SentimentModifiers, SentimentError> {
        std::thread::sleep(self.delay);
        Ok(SentimentModifiers::neutral())
    }
}

/// In-memory sink keyed by entity id.
///
/// Ids listed via [`MemorySink::reject`] fail with [`SinkError::Rejected`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    stored: BTreeMap<String, RatingResult>,
    rejected: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse writes for `id`.
    #[must_use]
    pub fn reject(mut self, id: impl Into<String>) -> Self {
        self.rejected.push(id.into());
        self
    }

    /// Return the stored rating for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RatingResult> {
        self.stored.get(id)
    }

    /// Number of stored ratings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stored.len()
    }

    /// Report whether nothing was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }
}

impl RatingSink for MemorySink {
    fn persist(&mut self, id: &str, rating: &RatingResult) -> Result<(), SinkError> {
        if self.rejected.iter().any(|rejected| rejected == id) {
            return Err(SinkError::Rejected {
                id: id.to_owned(),
                reason: "write refused".to_owned(),
            });
        }
        self.stored.insert(id.to_owned(), rating.clone());
        Ok(())
    }
}
