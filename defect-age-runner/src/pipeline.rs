// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generating a report end to end.

use crate::{
    aggregate::Aggregator,
    config::DefectAgeConfig,
    errors::PipelineError,
    record::{HistoryStore, ResultsDir},
    report::{DefectAgeReport, ReportKind, ReportWriter},
};
use camino::Utf8PathBuf;
use tracing::{debug, info, warn};

/// Reads the current batch and history, and writes a report.
#[derive(Clone, Debug)]
pub struct ReportPipeline<'cfg> {
    config: &'cfg DefectAgeConfig,
}

impl<'cfg> ReportPipeline<'cfg> {
    /// Creates a new pipeline for the given configuration.
    pub fn new(config: &'cfg DefectAgeConfig) -> Self {
        Self { config }
    }

    /// Runs the pipeline.
    ///
    /// A missing results directory is not an error: no report is written, and
    /// [`PipelineOutcome::ResultsDirMissing`] is returned.
    pub fn run(&self) -> Result<PipelineOutcome, PipelineError> {
        let input = &self.config.input;
        let report_config = &self.config.report;

        let results_dir = ResultsDir::new(&input.results_dir);
        if !results_dir.exists() {
            info!(
                "results directory {} does not exist, not writing a report",
                results_dir.path(),
            );
            return Ok(PipelineOutcome::ResultsDirMissing {
                path: input.results_dir.clone(),
            });
        }

        let batch = results_dir.read(input.invalid_records)?;
        if batch.files_read == 0 && batch.invalid_files.is_empty() {
            warn!(
                "no result files found in {}, writing an empty report",
                results_dir.path(),
            );
        }

        let (history, history_status) = self.load_history()?;

        let mut aggregator = Aggregator::new(self.config.naming.splitter());
        aggregator.extend(batch.records);
        let aggregated = aggregator.finish();
        if aggregated.skipped_records > 0 {
            debug!(
                "skipped {} records without an identity or name",
                aggregated.skipped_records,
            );
        }

        let report = DefectAgeReport::build(report_config.kind, &aggregated, history.as_ref());
        let writer = ReportWriter::new(&report_config.path, report_config.format);
        let rows = writer.write(&report)?;
        info!(
            "wrote {} report with {rows} {} to {}",
            report_config.kind,
            if rows == 1 { "row" } else { "rows" },
            writer.path(),
        );

        Ok(PipelineOutcome::Written(ReportSummary {
            path: report_config.path.clone(),
            kind: report_config.kind,
            rows,
            files_read: batch.files_read,
            invalid_files: batch.invalid_files.len(),
            skipped_records: aggregated.skipped_records,
            history: history_status,
        }))
    }

    fn load_history(&self) -> Result<(Option<HistoryStore>, HistoryStatus), PipelineError> {
        // Summary reports don't have streaks, so history is never needed for them.
        if self.config.report.kind == ReportKind::Summary {
            return Ok((None, HistoryStatus::Unused));
        }
        let Some(path) = &self.config.input.history_file else {
            debug!("history disabled");
            return Ok((None, HistoryStatus::Unused));
        };

        match HistoryStore::load(path)? {
            Some(store) => {
                let tests = store.len();
                Ok((Some(store), HistoryStatus::Loaded { tests }))
            }
            None => {
                info!("no history store at {path}, defect ages only count the current run");
                Ok((None, HistoryStatus::Missing))
            }
        }
    }
}

/// The result of running a [`ReportPipeline`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PipelineOutcome {
    /// The results directory does not exist, so no report was written.
    ResultsDirMissing {
        /// The results directory.
        path: Utf8PathBuf,
    },

    /// A report was written.
    Written(ReportSummary),
}

/// Statistics about a written report.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportSummary {
    /// Where the report was written.
    pub path: Utf8PathBuf,

    /// The kind of report.
    pub kind: ReportKind,

    /// The number of data rows written.
    pub rows: usize,

    /// The number of result files parsed.
    pub files_read: usize,

    /// The number of result files skipped because they were not valid JSON.
    pub invalid_files: usize,

    /// The number of records skipped for lacking an identity or a name.
    pub skipped_records: usize,

    /// Whether history was consulted.
    pub history: HistoryStatus,
}

/// Whether the history store was consulted for a report.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HistoryStatus {
    /// History was disabled, or not needed for this kind of report.
    Unused,

    /// History was enabled, but the store does not exist.
    Missing,

    /// The store was loaded.
    Loaded {
        /// The number of identities in the store.
        tests: usize,
    },
}
