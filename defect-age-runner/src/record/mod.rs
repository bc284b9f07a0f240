// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading test-run records and history.
//!
//! Two inputs feed a report:
//!
//! - [`ResultsDir`]: the current batch, one Allure `*-result.json` file per executed test.
//! - [`HistoryStore`]: the optional Allure history store, with prior runs keyed by identity.

mod history;
mod result;
mod source;

pub use history::{HistoryEntry, HistoryStore};
pub use result::{Diagnostic, TestRunRecord};
pub use source::{InvalidRecordPolicy, ResultsBatch, ResultsDir};
