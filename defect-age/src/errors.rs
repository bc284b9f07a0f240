// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::FromPathBufError;
use defect_age_metadata::DefectAgeExitCode;
use defect_age_runner::errors::{
    ConfigError, HistoryReadError, PipelineError, ReportWriteError, ResultsReadError,
};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;

// Expected errors are displayed with display_to_stderr rather than through color-eyre, so each
// variant gets a short heading and a "Caused by" chain.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    CurrentDirFailed {
        #[source]
        error: std::io::Error,
    },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 {
        #[source]
        error: FromPathBufError,
    },
    #[error("config error")]
    Config {
        #[source]
        err: ConfigError,
    },
    #[error("error reading test results")]
    ResultsRead {
        #[source]
        err: ResultsReadError,
    },
    #[error("error reading test history")]
    HistoryRead {
        #[source]
        err: HistoryReadError,
    },
    #[error("error writing report")]
    ReportWrite {
        #[source]
        err: ReportWriteError,
    },
}

impl ExpectedError {
    pub(crate) fn config(err: ConfigError) -> Self {
        Self::Config { err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. }
            | Self::Config { .. } => DefectAgeExitCode::SETUP_ERROR,
            Self::ResultsRead { .. } => DefectAgeExitCode::RESULTS_READ_FAILED,
            Self::HistoryRead { .. } => DefectAgeExitCode::HISTORY_READ_FAILED,
            Self::ReportWrite { .. } => DefectAgeExitCode::REPORT_WRITE_FAILED,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::CurrentDirFailed { error } => {
                error!("could not determine current directory");
                Some(error as &dyn Error)
            }
            Self::CurrentDirInvalidUtf8 { error } => {
                error!(
                    "current directory `{}` is not valid UTF-8",
                    error.as_path().display().style(styles.bold)
                );
                None
            }
            Self::Config { err } => {
                error!("{err}");
                err.source()
            }
            Self::ResultsRead { err } => {
                error!("{err}");
                err.source()
            }
            Self::HistoryRead { err } => {
                error!("{err}");
                err.source()
            }
            Self::ReportWrite { err } => {
                error!("{err}");
                err.source()
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

impl From<PipelineError> for ExpectedError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ResultsRead(err) => Self::ResultsRead { err },
            PipelineError::HistoryRead(err) => Self::HistoryRead { err },
            PipelineError::ReportWrite(err) => Self::ReportWrite { err },
        }
    }
}
