// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test outcomes.

use std::fmt;

/// The outcome of a single test run, as reported by Allure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TestOutcome {
    /// The test passed.
    Passed,

    /// An assertion in the test failed.
    Failed,

    /// The test raised an unexpected error.
    Broken,

    /// The test was skipped.
    Skipped,

    /// The status was missing or not recognized.
    Unknown,
}

impl TestOutcome {
    /// Parses an Allure status string, ignoring case and surrounding whitespace.
    ///
    /// Missing and unrecognized statuses map to [`TestOutcome::Unknown`], which is not a defect.
    pub fn from_status(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Unknown;
        };
        let status = status.trim();
        if status.eq_ignore_ascii_case("passed") {
            Self::Passed
        } else if status.eq_ignore_ascii_case("failed") {
            Self::Failed
        } else if status.eq_ignore_ascii_case("broken") {
            Self::Broken
        } else if status.eq_ignore_ascii_case("skipped") {
            Self::Skipped
        } else {
            Self::Unknown
        }
    }

    /// Returns true if this outcome counts as a defect: `failed` or `broken`.
    #[inline]
    pub fn is_defect(self) -> bool {
        matches!(self, Self::Failed | Self::Broken)
    }

    /// Returns the canonical lowercase name of this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Broken => "broken",
            Self::Skipped => "skipped",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("passed"), TestOutcome::Passed ; "passed")]
    #[test_case(Some("FAILED"), TestOutcome::Failed ; "failed uppercase")]
    #[test_case(Some(" Broken\n"), TestOutcome::Broken ; "broken with whitespace")]
    #[test_case(Some("skipped"), TestOutcome::Skipped ; "skipped")]
    #[test_case(Some("unknown"), TestOutcome::Unknown ; "unknown")]
    #[test_case(Some("pending"), TestOutcome::Unknown ; "unrecognized")]
    #[test_case(Some(""), TestOutcome::Unknown ; "empty")]
    #[test_case(None, TestOutcome::Unknown ; "missing")]
    fn from_status(input: Option<&str>, expected: TestOutcome) {
        assert_eq!(TestOutcome::from_status(input), expected);
    }

    #[test]
    fn only_failed_and_broken_are_defects() {
        let defects: Vec<_> = [
            TestOutcome::Passed,
            TestOutcome::Failed,
            TestOutcome::Broken,
            TestOutcome::Skipped,
            TestOutcome::Unknown,
        ]
        .into_iter()
        .filter(|outcome| outcome.is_defect())
        .collect();
        assert_eq!(defects, [TestOutcome::Failed, TestOutcome::Broken]);
    }
}
