// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `defect-age` failures.
///
/// `defect-age` may fail for a variety of reasons. This structure documents the exit codes that
/// may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum DefectAgeExitCode {}

impl DefectAgeExitCode {
    /// No errors occurred and `defect-age` exited normally.
    ///
    /// This includes runs where the results directory was missing or contained no records.
    pub const OK: i32 = 0;

    /// A user issue happened while setting up a `defect-age` invocation, for example an invalid
    /// configuration file.
    pub const SETUP_ERROR: i32 = 96;

    /// Reading the current batch of result files produced an error.
    pub const RESULTS_READ_FAILED: i32 = 110;

    /// Reading the history store produced an error.
    pub const HISTORY_READ_FAILED: i32 = 111;

    /// Writing the report produced an error.
    pub const REPORT_WRITE_FAILED: i32 = 112;
}
