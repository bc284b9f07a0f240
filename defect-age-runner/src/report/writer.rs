// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{DefectAgeReport, DelimitedFormat};
use crate::errors::ReportWriteError;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::{Utf8Path, Utf8PathBuf};
use std::{fs, io::Write};
use tracing::debug;

/// Writes reports to a file.
#[derive(Clone, Debug)]
pub struct ReportWriter {
    path: Utf8PathBuf,
    format: DelimitedFormat,
}

impl ReportWriter {
    /// Creates a new writer for `path`.
    pub fn new(path: impl Into<Utf8PathBuf>, format: DelimitedFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Returns the path the report is written to.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Writes `report`, replacing any existing file at the path. Returns the number of data rows
    /// written.
    ///
    /// The parent directory is created if necessary. The file is written to a temporary location
    /// and renamed into place, so on failure an existing report is left untouched and no partial
    /// file is left behind.
    pub fn write(&self, report: &DefectAgeReport) -> Result<usize, ReportWriteError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| ReportWriteError::CreateDir {
                path: parent.to_owned(),
                error,
            })?;
        }

        let contents = self.format.render(report);
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(contents.as_bytes()))
            .map_err(|error| ReportWriteError::Write {
                path: self.path.clone(),
                error: match error {
                    atomicwrites::Error::Internal(error) => error,
                    atomicwrites::Error::User(error) => error,
                },
            })?;

        debug!("wrote {} bytes to {}", contents.len(), self.path);
        Ok(report.len())
    }
}
