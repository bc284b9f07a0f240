// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building and writing defect-age reports.
//!
//! A report is a flat delimited text file with a header row. Two kinds are supported; see
//! [`ReportKind`].

mod build;
mod format;
mod writer;

pub use build::{DefectAgeReport, DefectRecord, ReportRows, SummaryRow};
pub use format::DelimitedFormat;
pub use writer::ReportWriter;

use serde::Deserialize;
use std::fmt;

/// The kind of report to write.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// One row per test whose current run is a defect, with its defect age: the number of
    /// consecutive most-recent runs that were defects.
    #[default]
    Defects,

    /// One row per test in the batch, with defect and run counts.
    Summary,
}

impl ReportKind {
    /// Returns the column names for this kind of report.
    pub fn header(self) -> &'static [&'static str] {
        match self {
            Self::Defects => &[
                "Class_Name",
                "Test_Name",
                "Defect_Age_Builds",
                "Error_Message",
                "Short_Trace",
            ],
            Self::Summary => &[
                "Class Name",
                "Test Name",
                "Defect Count",
                "Total Runs",
                "Defect Age",
            ],
        }
    }

    /// Returns the name of this kind, as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Defects => "defects",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
