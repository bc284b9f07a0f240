// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::TestRunRecord;
use crate::errors::ResultsReadError;
use camino::{Utf8Path, Utf8PathBuf};
use defect_age_metadata::{AllureTestResult, RESULT_FILE_SUFFIX};
use serde::Deserialize;
use std::{fs, io};
use tracing::{debug, warn};

/// What to do with a result file that is not valid JSON.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidRecordPolicy {
    /// Log a warning and leave the file out of the report.
    #[default]
    Skip,

    /// Fail the report.
    Fail,
}

/// A directory of Allure result files making up the current batch.
#[derive(Clone, Debug)]
pub struct ResultsDir {
    path: Utf8PathBuf,
}

impl ResultsDir {
    /// Creates a new `ResultsDir` at the given path. The directory is not accessed until it is
    /// read.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the directory.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns true if something exists at the directory's path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Lists the result files in this directory, sorted by file name.
    ///
    /// Only regular files whose names end with `-result.json` are returned. Entries whose names
    /// are not valid UTF-8 cannot be Allure result files and are skipped.
    pub fn result_files(&self) -> Result<Vec<Utf8PathBuf>, ResultsReadError> {
        if !self.path.is_dir() {
            return Err(ResultsReadError::NotADirectory {
                path: self.path.clone(),
            });
        }

        let read_dir_err = |error| ResultsReadError::ReadDir {
            path: self.path.clone(),
            error,
        };

        let mut files = Vec::new();
        for entry in self.path.read_dir_utf8().map_err(read_dir_err)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                    debug!("skipping non-UTF-8 entry in {}: {error}", self.path);
                    continue;
                }
                Err(error) => return Err(read_dir_err(error)),
            };

            if entry.file_name().ends_with(RESULT_FILE_SUFFIX) && entry.path().is_file() {
                files.push(entry.path().to_owned());
            }
        }

        files.sort_unstable();
        Ok(files)
    }

    /// Reads every result file in this directory.
    ///
    /// Files are read in file name order, so order-dependent aggregation (first-seen naming,
    /// last-seen diagnostics) is reproducible across invocations.
    pub fn read(&self, policy: InvalidRecordPolicy) -> Result<ResultsBatch, ResultsReadError> {
        let files = self.result_files()?;
        debug!("found {} result files in {}", files.len(), self.path);

        let mut batch = ResultsBatch::default();
        for path in files {
            let contents = fs::read(&path).map_err(|error| ResultsReadError::ReadFile {
                path: path.clone(),
                error,
            })?;

            match serde_json::from_slice::<AllureTestResult>(&contents) {
                Ok(result) => {
                    batch.records.push(TestRunRecord::from_allure(result));
                    batch.files_read += 1;
                }
                Err(error) => match policy {
                    InvalidRecordPolicy::Skip => {
                        warn!("skipping invalid result file {path}: {error}");
                        batch.invalid_files.push(path);
                    }
                    InvalidRecordPolicy::Fail => {
                        return Err(ResultsReadError::Parse { path, error });
                    }
                },
            }
        }

        Ok(batch)
    }
}

/// The records read from a [`ResultsDir`].
#[derive(Clone, Debug, Default)]
pub struct ResultsBatch {
    /// Records in file name order.
    pub records: Vec<TestRunRecord>,

    /// The number of result files that were parsed successfully.
    pub files_read: usize,

    /// Result files that were skipped because they were not valid JSON.
    pub invalid_files: Vec<Utf8PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::TestOutcome;
    use camino_tempfile::Utf8TempDir;

    fn write(dir: &Utf8Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn lists_only_result_files_in_name_order() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let dir = temp_dir.path();
        write(dir, "b-result.json", "{}");
        write(dir, "a-result.json", "{}");
        write(dir, "c-container.json", "{}");
        write(dir, "attachment.txt", "hello");
        fs::create_dir(dir.join("d-result.json")).unwrap();

        let files = ResultsDir::new(dir).result_files().unwrap();
        assert_eq!(
            files,
            vec![dir.join("a-result.json"), dir.join("b-result.json")]
        );
    }

    #[test]
    fn not_a_directory() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let file = temp_dir.path().join("results");
        fs::write(&file, "").unwrap();

        let results_dir = ResultsDir::new(&file);
        assert!(results_dir.exists());
        assert!(matches!(
            results_dir.read(InvalidRecordPolicy::Skip),
            Err(ResultsReadError::NotADirectory { .. })
        ));
    }

    #[test]
    fn invalid_files_follow_policy() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let dir = temp_dir.path();
        write(
            dir,
            "a-result.json",
            r#"{"historyId": "h1", "fullName": "A.t", "status": "failed"}"#,
        );
        write(dir, "b-result.json", "{ not json");

        let results_dir = ResultsDir::new(dir);

        let batch = results_dir.read(InvalidRecordPolicy::Skip).unwrap();
        assert_eq!(batch.files_read, 1);
        assert_eq!(batch.invalid_files, vec![dir.join("b-result.json")]);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].identity.as_deref(), Some("h1"));
        assert_eq!(batch.records[0].outcome, TestOutcome::Failed);

        match results_dir.read(InvalidRecordPolicy::Fail) {
            Err(ResultsReadError::Parse { path, .. }) => {
                assert_eq!(path, dir.join("b-result.json"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_directory() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let batch = ResultsDir::new(temp_dir.path())
            .read(InvalidRecordPolicy::Fail)
            .unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.files_read, 0);
    }
}
