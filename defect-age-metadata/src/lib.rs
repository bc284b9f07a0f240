// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the machine-readable inputs and outputs of `defect-age`.
//!
//! This crate contains:
//!
//! * serde models for the two Allure files `defect-age` reads: per-test `*-result.json` files and
//!   the `history/history.json` store;
//! * the documented exit codes produced by the `defect-age` binary.
//!
//! The models are permissive: every field is optional, and fields with an unexpected
//! JSON type deserialize to `None` instead of failing the whole file. Deciding which records are
//! usable is left to consumers.

mod allure;
mod exit_codes;

pub use allure::*;
pub use exit_codes::*;
