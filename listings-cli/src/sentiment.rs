//! Sentiment command: score free text without rating anything.

use std::io::Write;

use clap::Args;
use listings_core::SentimentModifiers;
use listings_scorer::{KeywordImpactAnalyzer, score_sentiment};
use serde::Serialize;

use crate::CliError;

/// CLI arguments for the `sentiment` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct SentimentArgs {
    /// Review texts; each argument is one review.
    #[arg(value_name = "text", required = true)]
    pub(crate) reviews: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SentimentReport<'a> {
    /// Simple score of all reviews joined together.
    score: f64,
    /// Per-component modifiers across the reviews.
    modifiers: &'a SentimentModifiers,
}

/// Score `args.reviews` and print a JSON report to `writer`.
pub(crate) fn run_sentiment_with(
    args: &SentimentArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let score = score_sentiment(&args.reviews.join(" "));
    let modifiers = KeywordImpactAnalyzer::modifiers(&args.reviews);
    let payload = serde_json::to_string_pretty(&SentimentReport {
        score,
        modifiers: &modifiers,
    })
    .map_err(CliError::SerialiseSentiment)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
