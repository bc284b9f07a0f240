// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by defect-age.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error that occurred while loading or resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An explicitly specified config file does not exist.
    #[error("config file not found at {path}")]
    FileNotFound {
        /// The path that was specified.
        path: Utf8PathBuf,
    },

    /// Error reading a config file.
    #[error("failed to read config file at {path}")]
    Read {
        /// The path that failed to be read.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// Error parsing a config file as TOML.
    #[error("failed to parse config file at {path}")]
    Parse {
        /// The path that failed to parse.
        path: Utf8PathBuf,
        /// The underlying TOML error.
        #[source]
        error: toml::de::Error,
    },

    /// The embedded default config failed to parse.
    ///
    /// This is a bug in defect-age.
    #[error("failed to parse embedded default config")]
    DefaultParse {
        /// The underlying TOML error.
        #[source]
        error: toml::de::Error,
    },

    /// A resolved configuration value is invalid.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// The key, in dotted form (e.g. `report.delimiter`).
        key: &'static str,
        /// Why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid_value(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}

/// An error that occurred while reading the current batch of result files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsReadError {
    /// The results path exists but is not a directory.
    #[error("results path {path} is not a directory")]
    NotADirectory {
        /// The results path.
        path: Utf8PathBuf,
    },

    /// Error listing the results directory.
    #[error("failed to list results directory {path}")]
    ReadDir {
        /// The directory that failed to be listed.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// Error reading a result file.
    #[error("failed to read result file {path}")]
    ReadFile {
        /// The file that failed to be read.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// A result file is not valid JSON, and invalid records are configured to fail the report.
    #[error("failed to parse result file {path}")]
    Parse {
        /// The file that failed to parse.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        error: serde_json::Error,
    },
}

/// An error that occurred while reading the history store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryReadError {
    /// Error reading the history file.
    #[error("failed to read history file at {path}")]
    Read {
        /// The path that failed to be read.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// Error deserializing the history file.
    #[error("failed to deserialize history file at {path}")]
    Parse {
        /// The path that failed to be deserialized.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        error: serde_json::Error,
    },
}

/// An error that occurred while writing the report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportWriteError {
    /// Error creating the report's parent directory.
    #[error("failed to create directory {path}")]
    CreateDir {
        /// The directory path that failed to be created.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// Error writing the report.
    ///
    /// The report is written atomically, so a previous report at the same path is left intact.
    #[error("failed to write report to {path}")]
    Write {
        /// The path that failed to be written.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}

/// An error that occurred while generating a report.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the current batch failed.
    #[error("error reading test results")]
    ResultsRead(#[from] ResultsReadError),

    /// Reading the history store failed.
    #[error("error reading test history")]
    HistoryRead(#[from] HistoryReadError),

    /// Writing the report failed.
    #[error("error writing defect age report")]
    ReportWrite(#[from] ReportWriteError),
}
