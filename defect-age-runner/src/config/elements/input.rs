// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input-related configuration.

use crate::{config::ConfigOverrides, record::InvalidRecordPolicy};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Input configuration in a config file.
///
/// All fields are optional; unspecified fields will use defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeserializedInputConfig {
    /// The directory containing Allure result files.
    #[serde(default)]
    pub results_dir: Option<Utf8PathBuf>,

    /// Whether to consult the history store.
    #[serde(default)]
    pub use_history: Option<bool>,

    /// Path to the history store, relative to the results directory.
    #[serde(default)]
    pub history_file: Option<Utf8PathBuf>,

    /// What to do with result files that are not valid JSON.
    #[serde(default)]
    pub invalid_records: Option<InvalidRecordPolicy>,
}

/// Default input configuration with all values required.
///
/// This is parsed from the embedded default config TOML. All fields are required: if the TOML is
/// missing any field, parsing fails.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultInputConfig {
    /// The directory containing Allure result files.
    pub results_dir: Utf8PathBuf,

    /// Whether to consult the history store.
    pub use_history: bool,

    /// Path to the history store, relative to the results directory.
    pub history_file: Utf8PathBuf,

    /// What to do with result files that are not valid JSON.
    pub invalid_records: InvalidRecordPolicy,
}

/// Resolved input configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputConfig {
    /// The directory containing Allure result files.
    pub results_dir: Utf8PathBuf,

    /// Path to the history store, or `None` if history is disabled.
    pub history_file: Option<Utf8PathBuf>,

    /// What to do with result files that are not valid JSON.
    pub invalid_records: InvalidRecordPolicy,
}

impl InputConfig {
    /// Resolves input configuration.
    ///
    /// Relative paths from configuration are resolved against `base_dir`, except for the history
    /// file which is resolved against the results directory. A history file passed in through
    /// `overrides` is resolved against `base_dir`.
    pub(in crate::config) fn resolve(
        default_config: &DefaultInputConfig,
        user_config: Option<&DeserializedInputConfig>,
        base_dir: &Utf8Path,
        overrides: &ConfigOverrides,
    ) -> Self {
        let results_dir = match &overrides.results_dir {
            Some(results_dir) => base_dir.join(results_dir),
            None => base_dir.join(
                user_config
                    .and_then(|c| c.results_dir.as_deref())
                    .unwrap_or(&default_config.results_dir),
            ),
        };

        let use_history = user_config
            .and_then(|c| c.use_history)
            .unwrap_or(default_config.use_history);
        let history_file = if overrides.no_history {
            None
        } else if let Some(history_file) = &overrides.history_file {
            Some(base_dir.join(history_file))
        } else if use_history {
            Some(
                results_dir.join(
                    user_config
                        .and_then(|c| c.history_file.as_deref())
                        .unwrap_or(&default_config.history_file),
                ),
            )
        } else {
            None
        };

        let invalid_records = user_config
            .and_then(|c| c.invalid_records)
            .unwrap_or(default_config.invalid_records);

        Self {
            results_dir,
            history_file,
            invalid_records,
        }
    }
}
