//! Error types emitted by the listings CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Errors emitted by the listings CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag naming the option.
        field: &'static str,
        /// Environment variable naming the option.
        env: &'static str,
    },
    /// Installing the log subscriber failed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// Opening the record file failed.
    #[error("failed to open records at {path:?}: {source}")]
    OpenInput {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The record file is not a JSON array of records.
    #[error("failed to parse records JSON at {path:?}: {source}")]
    ParseInput {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Creating the ratings output file failed.
    #[error("failed to create ratings output at {path:?}: {source}")]
    CreateOutput {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Serialising the sentiment report failed.
    #[error("failed to serialise sentiment report: {0}")]
    SerialiseSentiment(#[source] serde_json::Error),
    /// Some records could not be rated or stored.
    #[error("{failed} of {total} records failed to rate")]
    BatchFailures {
        /// Records that failed.
        failed: usize,
        /// Records in the input.
        total: usize,
    },
}
