// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reports how long failing tests have been failing.
//!
//! `defect-age` reads a directory of Allure `*-result.json` files, along with the Allure history
//! store if present, and writes a delimited report with one row per currently failing test and the
//! number of consecutive runs it has been failing for.
//!
//! The core logic lives in the `defect-age-runner` crate; this crate is the command-line
//! interface.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, StderrStyles};
