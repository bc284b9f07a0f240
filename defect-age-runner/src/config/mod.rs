// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for defect-age.
//!
//! ## Config file location
//!
//! By default, the config file is read from `.config/defect-age.toml` relative to the working
//! directory, if it exists. A different file can be passed in with `--config-file`, and
//! `--config-file none` skips loading a config file entirely.
//!
//! ## Configuration hierarchy
//!
//! Settings are resolved in the following order (highest priority first):
//!
//! 1. CLI arguments (e.g. `--results-dir`, `--kind`)
//! 2. The config file
//! 3. Built-in defaults (`default-config.toml`, embedded at build time)

pub mod elements;
mod imp;

pub use imp::*;
