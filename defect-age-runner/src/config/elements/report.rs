// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report-related configuration.

use crate::{
    config::ConfigOverrides,
    errors::ConfigError,
    report::{DelimitedFormat, ReportKind},
};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Report configuration in a config file.
///
/// All fields are optional; unspecified fields will use defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeserializedReportConfig {
    /// The kind of report to write.
    #[serde(default)]
    pub kind: Option<ReportKind>,

    /// Where the report is written.
    #[serde(default)]
    pub path: Option<Utf8PathBuf>,

    /// The field delimiter, a single character.
    #[serde(default)]
    pub delimiter: Option<String>,

    /// The character that replaces the delimiter inside values.
    #[serde(default)]
    pub delimiter_substitute: Option<String>,
}

/// Default report configuration with all values required.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultReportConfig {
    /// The kind of report to write.
    pub kind: ReportKind,

    /// Where the report is written.
    pub path: Utf8PathBuf,

    /// The field delimiter, a single character.
    pub delimiter: String,

    /// The character that replaces the delimiter inside values.
    pub delimiter_substitute: String,
}

/// Resolved report configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportConfig {
    /// The kind of report to write.
    pub kind: ReportKind,

    /// Where the report is written.
    pub path: Utf8PathBuf,

    /// How rows are delimited.
    pub format: DelimitedFormat,
}

impl ReportConfig {
    /// Resolves report configuration. Relative paths are resolved against `base_dir`.
    ///
    /// Returns an error if the delimiter or its substitute is not a single character, is a line
    /// break or an ASCII digit, or if they are the same.
    pub(in crate::config) fn resolve(
        default_config: &DefaultReportConfig,
        user_config: Option<&DeserializedReportConfig>,
        base_dir: &Utf8Path,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let kind = overrides
            .kind
            .or_else(|| user_config.and_then(|c| c.kind))
            .unwrap_or(default_config.kind);

        let path = base_dir.join(
            overrides
                .output
                .as_deref()
                .or_else(|| user_config.and_then(|c| c.path.as_deref()))
                .unwrap_or(&default_config.path),
        );

        let delimiter = single_char(
            "report.delimiter",
            user_config
                .and_then(|c| c.delimiter.as_deref())
                .unwrap_or(&default_config.delimiter),
        )?;
        let substitute = single_char(
            "report.delimiter-substitute",
            user_config
                .and_then(|c| c.delimiter_substitute.as_deref())
                .unwrap_or(&default_config.delimiter_substitute),
        )?;
        if delimiter == substitute {
            return Err(ConfigError::invalid_value(
                "report.delimiter-substitute",
                format!("must differ from the delimiter {delimiter:?}"),
            ));
        }

        Ok(Self {
            kind,
            path,
            format: DelimitedFormat::new(delimiter, substitute),
        })
    }
}

fn single_char(key: &'static str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(ConfigError::invalid_value(
            key,
            format!("expected a single character, found {value:?}"),
        ));
    };
    if c == '\r' || c == '\n' {
        return Err(ConfigError::invalid_value(key, "must not be a line break"));
    }
    // Count columns are written unsanitized.
    if c.is_ascii_digit() {
        return Err(ConfigError::invalid_value(key, "must not be a digit"));
    }
    Ok(c)
}
