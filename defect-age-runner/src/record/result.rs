// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::outcome::TestOutcome;
use defect_age_metadata::{AllureStatusDetails, AllureTestResult};

/// A single executed test in the current batch.
///
/// Fields that are required for aggregation (`identity` and `qualified_name`) are still optional
/// here: records that lack them are excluded by the
/// [`Aggregator`](crate::aggregate::Aggregator) rather than at parse time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestRunRecord {
    /// The stable identity of the logical test (Allure `historyId`).
    pub identity: Option<String>,

    /// The qualified name from which class and test names are derived.
    pub qualified_name: Option<String>,

    /// The outcome of this run.
    pub outcome: TestOutcome,

    /// Failure details, if any.
    pub diagnostic: Diagnostic,

    /// When this run completed, in milliseconds since the Unix epoch.
    pub completed_at: Option<i64>,
}

impl TestRunRecord {
    /// Converts an Allure result into a record.
    ///
    /// The qualified name is `fullName`, falling back to `name` when `fullName` is missing.
    /// Blank identities and names are treated as missing.
    pub fn from_allure(result: AllureTestResult) -> Self {
        let AllureTestResult {
            history_id,
            name,
            full_name,
            status,
            status_details,
            stop,
            ..
        } = result;

        Self {
            identity: non_blank(history_id),
            qualified_name: non_blank(full_name).or_else(|| non_blank(name)),
            outcome: TestOutcome::from_status(status.as_deref()),
            diagnostic: status_details.map(Diagnostic::from).unwrap_or_default(),
            completed_at: stop,
        }
    }
}

/// Failure details attached to a test run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Diagnostic {
    /// The failure message.
    pub message: Option<String>,

    /// The full stack trace.
    pub trace: Option<String>,
}

impl Diagnostic {
    /// Returns the first non-blank line of the trace, trimmed.
    pub fn short_trace(&self) -> Option<&str> {
        self.trace
            .as_deref()?
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

impl From<AllureStatusDetails> for Diagnostic {
    fn from(details: AllureStatusDetails) -> Self {
        Self {
            message: details.message,
            trace: details.trace,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
