// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ReportKind;
use crate::{aggregate::AggregatedBatch, record::HistoryStore, streak::resolve_age};
use std::num::NonZero;

/// A report ready to be written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefectAgeReport {
    rows: ReportRows,
}

impl DefectAgeReport {
    /// Builds a report of the given kind from an aggregated batch.
    ///
    /// `history` is only consulted for [`ReportKind::Defects`].
    pub fn build(kind: ReportKind, batch: &AggregatedBatch, history: Option<&HistoryStore>) -> Self {
        let rows = match kind {
            ReportKind::Defects => ReportRows::Defects(defect_rows(batch, history)),
            ReportKind::Summary => ReportRows::Summary(summary_rows(batch)),
        };
        Self { rows }
    }

    /// Returns the kind of this report.
    pub fn kind(&self) -> ReportKind {
        match &self.rows {
            ReportRows::Defects(_) => ReportKind::Defects,
            ReportRows::Summary(_) => ReportKind::Summary,
        }
    }

    /// Returns the rows of this report, in output order.
    pub fn rows(&self) -> &ReportRows {
        &self.rows
    }

    /// Returns the number of data rows, not counting the header.
    pub fn len(&self) -> usize {
        match &self.rows {
            ReportRows::Defects(rows) => rows.len(),
            ReportRows::Summary(rows) => rows.len(),
        }
    }

    /// Returns true if the report has no data rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The data rows of a [`DefectAgeReport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReportRows {
    /// Rows of a [`ReportKind::Defects`] report.
    Defects(Vec<DefectRecord>),

    /// Rows of a [`ReportKind::Summary`] report.
    Summary(Vec<SummaryRow>),
}

/// A test whose current run is a defect.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefectRecord {
    /// The identity of the test. Not written; used to order rows with equal names.
    pub identity: String,

    /// The class name.
    pub class_name: String,

    /// The test name.
    pub test_name: String,

    /// The message of the last defect in the batch.
    pub error_message: Option<String>,

    /// The first line of the last defect's trace.
    pub short_trace: Option<String>,

    /// The number of consecutive most-recent runs, including the current one, that were defects.
    pub age: NonZero<usize>,
}

/// Counts for a single test in the batch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SummaryRow {
    /// The identity of the test. Not written; used to order rows with equal names.
    pub identity: String,

    /// The class name.
    pub class_name: String,

    /// The test name.
    pub test_name: String,

    /// The number of runs in the batch with a defect outcome.
    pub defect_count: usize,

    /// The number of runs in the batch.
    pub total_runs: usize,
}

impl SummaryRow {
    /// The value of the `Defect Age` column.
    ///
    /// In a summary report this is the cumulative defect count for the batch, not a streak.
    pub fn defect_age(&self) -> usize {
        self.defect_count
    }
}

fn defect_rows(batch: &AggregatedBatch, history: Option<&HistoryStore>) -> Vec<DefectRecord> {
    let mut rows: Vec<_> = batch
        .tests
        .iter()
        .filter_map(|test| {
            let age = resolve_age(test.identity(), test.current().outcome, history)?;
            let diagnostic = test.last_defect();
            Some(DefectRecord {
                identity: test.identity().to_owned(),
                class_name: test.class_name().to_owned(),
                test_name: test.test_name().to_owned(),
                error_message: diagnostic.and_then(|d| d.message.clone()),
                short_trace: diagnostic.and_then(|d| d.short_trace()).map(str::to_owned),
                age,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.age
            .cmp(&a.age)
            .then_with(|| a.class_name.cmp(&b.class_name))
            .then_with(|| a.test_name.cmp(&b.test_name))
            .then_with(|| a.identity.cmp(&b.identity))
    });
    rows
}

fn summary_rows(batch: &AggregatedBatch) -> Vec<SummaryRow> {
    let mut rows: Vec<_> = batch
        .tests
        .iter()
        .map(|test| SummaryRow {
            identity: test.identity().to_owned(),
            class_name: test.class_name().to_owned(),
            test_name: test.test_name().to_owned(),
            defect_count: test.defect_count(),
            total_runs: test.total_runs(),
        })
        .collect();

    rows.sort_by(|a, b| {
        (&a.class_name, &a.test_name, &a.identity).cmp(&(&b.class_name, &b.test_name, &b.identity))
    });
    rows
}
