//! Error types emitted by the cafeteria CLI.
//!
//! Store and pipeline errors are boxed or wrapped so `CliError` stays small
//! under `clippy::result_large_err`.

use std::sync::Arc;

use cafeteria_core::{DimensionError, SqliteRatingStoreError};
use cafeteria_scorer::{MalformedPreferencePair, RankLimitError, RecommendError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the cafeteria CLI.
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
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The ratings database does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingDatabase {
        /// Flag that named the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The ratings database path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    DatabaseNotFile {
        /// Flag that named the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The ratings database path could not be inspected or prepared.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectDatabase {
        /// Flag that named the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A `name=value` weight could not be split.
    #[error(transparent)]
    MalformedWeight(#[from] MalformedPreferencePair),
    /// A `name=value` score could not be parsed.
    #[error("score '{pair}' must look like name=number with a finite number")]
    MalformedScore {
        /// Offending pair as supplied.
        pair: String,
    },
    /// A venue star rating was not a finite number.
    #[error("stars must be a finite number, got {stars}")]
    InvalidStars {
        /// Rejected value.
        stars: f64,
    },
    /// The configured dimension list was invalid.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(#[from] DimensionError),
    /// The configured result limit was invalid.
    #[error("invalid limit: {0}")]
    InvalidLimit(#[from] RankLimitError),
    /// Opening or writing the ratings database failed.
    #[error("rating store failed: {0}")]
    Store(#[source] Box<SqliteRatingStoreError>),
    /// The recommendation pipeline rejected the request or could not read
    /// its data.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<SqliteRatingStoreError> for CliError {
    fn from(source: SqliteRatingStoreError) -> Self {
        Self::Store(Box::new(source))
    }
}
