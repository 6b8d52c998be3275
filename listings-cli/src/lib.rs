//! Command-line interface for the listings rating engine.
//!
//! `listings rate` recalculates ratings for a JSON file of records and
//! writes them as JSON lines; `listings sentiment` scores review text.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod error;
mod io;
mod rate;
mod sentiment;
mod telemetry;

pub use error::CliError;
pub use telemetry::TelemetryError;

use rate::{RateArgs, run_rate_with};
use sentiment::{SentimentArgs, run_sentiment_with};

pub(crate) const ARG_RATE_INPUT: &str = "input";
pub(crate) const ARG_RATE_OUTPUT: &str = "output";
pub(crate) const ARG_RATE_DELAY_MS: &str = "delay-ms";
pub(crate) const ARG_RATE_SENTIMENT_TIMEOUT_MS: &str = "sentiment-timeout-ms";
pub(crate) const ARG_RATE_ALGORITHM_VERSION: &str = "algorithm-version";
pub(crate) const ARG_RATE_FORCE: &str = "force";
pub(crate) const ARG_RATE_LOG_LEVEL: &str = "log-level";
pub(crate) const ENV_RATE_INPUT: &str = "LISTINGS_CMDS_RATE_INPUT";

/// Run the listings CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, configuration cannot be
/// resolved, or the command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Rate(args) => {
            let config = args.into_config()?;
            telemetry::init(&config.log_level)?;
            run_rate_with(&config, &mut stdout)
        }
        Command::Sentiment(args) => {
            telemetry::init(telemetry::DEFAULT_LOG_LEVEL)?;
            run_sentiment_with(&args, &mut stdout)
        }
    }
}

/// Parse `argv` and run the command, writing results to `writer`.
///
/// Unlike [`run`], this does not install a log subscriber.
///
/// # Errors
/// Returns [`CliError`] under the same conditions as [`run`].
pub fn run_with<I, T>(argv: I, writer: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        Command::Rate(args) => run_rate_with(&args.into_config()?, writer),
        Command::Sentiment(args) => run_sentiment_with(&args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "listings",
    about = "Rating engine for restaurants, hotels, attractions, malls, schools and fitness places",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recalculate ratings for a batch of records.
    Rate(RateArgs),
    /// Score review text and print the sentiment breakdown.
    Sentiment(SentimentArgs),
}

#[cfg(test)]
mod tests;
