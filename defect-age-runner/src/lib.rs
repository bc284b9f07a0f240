// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [defect-age](https://crates.io/crates/defect-age).
//!
//! defect-age reads a batch of Allure test results, groups them by test identity, and reports how
//! many consecutive most-recent runs each currently failing test has been failing for.
//!
//! The library is organized in the order data flows through it:
//!
//! 1. [`record`] reads the current batch of result files and the optional history store.
//! 2. [`aggregate`] folds the batch into one accumulator per test identity.
//! 3. [`streak`] computes defect ages from history.
//! 4. [`report`] builds and writes the delimited report.
//!
//! [`pipeline::ReportPipeline`] runs all of these in sequence, as configured by [`config`].

pub mod aggregate;
pub mod config;
pub mod errors;
pub mod naming;
pub mod outcome;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod streak;
