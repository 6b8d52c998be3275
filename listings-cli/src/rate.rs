//! Rate command implementation for the listings CLI.

use std::io::{BufWriter, Write};
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use listings_core::RatingInput;
use listings_scorer::{
    ALGORITHM_VERSION, BatchOptions, BatchRunner, BatchSummary, KeywordImpactAnalyzer,
    RatingCalculator, RatingService, TimeoutAnalyzer,
};
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::io::{JsonLinesSink, create_utf8_file, load_records};
use crate::telemetry::DEFAULT_LOG_LEVEL;
use crate::{
    ARG_RATE_ALGORITHM_VERSION, ARG_RATE_DELAY_MS, ARG_RATE_FORCE, ARG_RATE_INPUT,
    ARG_RATE_LOG_LEVEL, ARG_RATE_OUTPUT, ARG_RATE_SENTIMENT_TIMEOUT_MS, CliError, ENV_RATE_INPUT,
};

/// Bound on a single sentiment analysis call when none is configured.
pub(crate) const DEFAULT_SENTIMENT_TIMEOUT_MS: u64 = 5_000;

/// CLI arguments for the `rate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recalculate ratings for a JSON array of restaurant, hotel, \
                 attraction, mall, school and fitness place records. Each \
                 rating is written as one JSON object per line, to the output \
                 file when given and to stdout otherwise. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Recalculate ratings for a batch of records"
)]
#[ortho_config(prefix = "LISTINGS")]
pub(crate) struct RateArgs {
    /// Path to a JSON array of records tagged by `kind`.
    #[arg(long = ARG_RATE_INPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Path of the JSON-lines ratings file; stdout when omitted.
    #[arg(long = ARG_RATE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Pause between rated records, in milliseconds.
    #[arg(long = ARG_RATE_DELAY_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) delay_ms: Option<u64>,
    /// Deadline for sentiment analysis of one record, in milliseconds.
    #[arg(long = ARG_RATE_SENTIMENT_TIMEOUT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) sentiment_timeout_ms: Option<u64>,
    /// Algorithm version stamped on the ratings.
    #[arg(long = ARG_RATE_ALGORITHM_VERSION, value_name = "version")]
    #[serde(default)]
    pub(crate) algorithm_version: Option<String>,
    /// Re-rate records already stamped with the algorithm version.
    #[arg(long = ARG_RATE_FORCE)]
    #[serde(default)]
    pub(crate) force: bool,
    /// Log level or filter directive; `RUST_LOG` takes precedence.
    #[arg(long = ARG_RATE_LOG_LEVEL, value_name = "level")]
    #[serde(default)]
    pub(crate) log_level: Option<String>,
}

impl RateArgs {
    pub(crate) fn into_config(self) -> Result<RateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RateConfig::try_from(merged)
    }
}

/// Resolved `rate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RateConfig {
    /// Path to the JSON record file.
    pub(crate) input: Utf8PathBuf,
    /// Ratings destination; `None` writes to stdout.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Pause between rated records.
    pub(crate) delay: Duration,
    /// Deadline for one sentiment analysis call.
    pub(crate) sentiment_timeout: Duration,
    /// Algorithm version stamped on ratings.
    pub(crate) algorithm_version: String,
    /// Re-rate current records.
    pub(crate) force: bool,
    /// Log filter.
    pub(crate) log_level: String,
}

impl TryFrom<RateArgs> for RateConfig {
    type Error = CliError;

    fn try_from(args: RateArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_RATE_INPUT,
            env: ENV_RATE_INPUT,
        })?;
        Ok(Self {
            input,
            output: args.output,
            delay: Duration::from_millis(args.delay_ms.unwrap_or(0)),
            sentiment_timeout: Duration::from_millis(
                args.sentiment_timeout_ms
                    .unwrap_or(DEFAULT_SENTIMENT_TIMEOUT_MS),
            ),
            algorithm_version: args
                .algorithm_version
                .unwrap_or_else(|| ALGORITHM_VERSION.to_owned()),
            force: args.force,
            log_level: args
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

/// Rate every record in `config.input`.
///
/// Ratings go to `config.output` when set and to `writer` otherwise. Array
/// elements that do not parse as records count as failed records. A run in
/// which any record failed returns [`CliError::BatchFailures`] after all
/// other records have been written.
pub(crate) fn run_rate_with(config: &RateConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let loaded = load_records(&config.input)?;
    info!(
        "rating {} records from {} ({} unreadable)",
        loaded.records.len(),
        config.input,
        loaded.rejected.len()
    );

    let analyzer = TimeoutAnalyzer::new(KeywordImpactAnalyzer, config.sentiment_timeout);
    debug!("sentiment analysis is bounded by {:?}", analyzer.timeout());
    let service = RatingService::new(
        RatingCalculator::new(config.algorithm_version.clone()),
        analyzer,
    );
    let runner = BatchRunner::new(
        service,
        BatchOptions {
            delay: config.delay,
            force: config.force,
        },
    );

    let records = &loaded.records;
    let mut summary = match &config.output {
        Some(path) => {
            let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            rate_into(&runner, records, BufWriter::new(file))?
        }
        None => rate_into(&runner, records, writer)?,
    };

    summary.failed.extend(loaded.rejected);

    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::BatchFailures {
            failed: summary.failed_count(),
            total: summary.total(),
        })
    }
}

fn rate_into<W: Write>(
    runner: &BatchRunner<TimeoutAnalyzer<KeywordImpactAnalyzer>>,
    records: &[RatingInput],
    writer: W,
) -> Result<BatchSummary, CliError> {
    let mut sink = JsonLinesSink::new(writer);
    let summary = runner.run(records, &mut sink);
    sink.flush().map_err(CliError::WriteOutput)?;
    info!("wrote {} ratings", sink.written());
    Ok(summary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RateConfig, CliError> {
    let merged = RateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RateConfig::try_from(merged)
}
