// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::elements::{
    DefaultInputConfig, DefaultNamingConfig, DefaultReportConfig, DeserializedInputConfig,
    DeserializedNamingConfig, DeserializedReportConfig, InputConfig, NamingConfig, ReportConfig,
};
use crate::{errors::ConfigError, report::ReportKind};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::{collections::BTreeSet, io};
use tracing::{debug, warn};

/// Special value for `--config-file` that skips loading a config file, using only built-in
/// defaults.
pub const CONFIG_NONE: &str = "none";

/// The path of the config file, relative to the working directory, used if no other path is
/// specified.
pub const DEFAULT_CONFIG_PATH: &str = ".config/defect-age.toml";

/// Specifies where to load configuration from.
#[derive(Clone, Copy, Debug)]
pub enum ConfigLocation<'a> {
    /// Use [`DEFAULT_CONFIG_PATH`] if it exists.
    Default,

    /// Skip loading a config file entirely, using only built-in defaults.
    Isolated,

    /// Load config from an explicit path.
    ///
    /// Returns an error if the file does not exist.
    Explicit(&'a Utf8Path),
}

impl<'a> ConfigLocation<'a> {
    /// Creates a config location from a CLI value.
    ///
    /// Returns `Default` if `None`, `Isolated` if `"none"`, otherwise `Explicit` with the path.
    pub fn from_cli(s: Option<&'a str>) -> Self {
        match s {
            None => Self::Default,
            Some(s) if s == CONFIG_NONE => Self::Isolated,
            Some(s) => Self::Explicit(Utf8Path::new(s)),
        }
    }
}

/// Settings passed in on the command line, which take precedence over the config file.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Overrides `input.results-dir`.
    pub results_dir: Option<Utf8PathBuf>,

    /// Overrides `input.history-file`, and enables history.
    pub history_file: Option<Utf8PathBuf>,

    /// Disables history.
    pub no_history: bool,

    /// Overrides `report.path`.
    pub output: Option<Utf8PathBuf>,

    /// Overrides `report.kind`.
    pub kind: Option<ReportKind>,
}

/// Configuration after the config file and overrides have been applied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefectAgeConfig {
    /// Resolved input configuration.
    pub input: InputConfig,

    /// Resolved report configuration.
    pub report: ReportConfig,

    /// Resolved naming configuration.
    pub naming: NamingConfig,
}

impl DefectAgeConfig {
    /// Loads and resolves configuration.
    ///
    /// Relative paths are resolved against `base_dir`, which is typically the current working
    /// directory.
    pub fn load(
        location: ConfigLocation<'_>,
        base_dir: &Utf8Path,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        Self::load_with_warnings(location, base_dir, overrides, &mut DefaultConfigWarnings)
    }

    fn load_with_warnings(
        location: ConfigLocation<'_>,
        base_dir: &Utf8Path,
        overrides: &ConfigOverrides,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Self, ConfigError> {
        let user_config = DeserializedConfig::from_location(location, base_dir, warnings)?;
        let default_config = DefaultConfig::from_embedded()?;
        Self::resolve(&default_config, user_config.as_ref(), base_dir, overrides)
    }

    fn resolve(
        default_config: &DefaultConfig,
        user_config: Option<&DeserializedConfig>,
        base_dir: &Utf8Path,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let input = InputConfig::resolve(
            &default_config.input,
            user_config.map(|c| &c.input),
            base_dir,
            overrides,
        );
        let report = ReportConfig::resolve(
            &default_config.report,
            user_config.map(|c| &c.report),
            base_dir,
            overrides,
        )?;
        let naming = NamingConfig::resolve(&default_config.naming, user_config.map(|c| &c.naming))?;

        Ok(Self {
            input,
            report,
            naming,
        })
    }
}

/// Trait for handling configuration warnings.
///
/// Allows warnings to be logged (the default) or collected in tests.
trait ConfigWarnings {
    /// Handle unknown configuration keys found in a config file.
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>);
}

struct DefaultConfigWarnings;

impl ConfigWarnings for DefaultConfigWarnings {
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>) {
        let mut unknown_str = String::new();
        if let (1, Some(key)) = (unknown.len(), unknown.first()) {
            // Print this on the same line.
            unknown_str.push_str("key: ");
            unknown_str.push_str(key);
        } else {
            unknown_str.push_str("keys:\n");
            for ignored_key in unknown {
                unknown_str.push('\n');
                unknown_str.push_str("  - ");
                unknown_str.push_str(ignored_key);
            }
        }

        warn!("in config file {config_file}, ignoring unknown configuration {unknown_str}");
    }
}

/// Configuration as read from a config file. All fields are optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedConfig {
    #[serde(default)]
    input: DeserializedInputConfig,

    #[serde(default)]
    report: DeserializedReportConfig,

    #[serde(default)]
    naming: DeserializedNamingConfig,
}

impl DeserializedConfig {
    fn from_location(
        location: ConfigLocation<'_>,
        base_dir: &Utf8Path,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Option<Self>, ConfigError> {
        match location {
            ConfigLocation::Isolated => {
                debug!("config: skipping (isolated)");
                Ok(None)
            }
            ConfigLocation::Explicit(path) => {
                let path = base_dir.join(path);
                debug!("config: loading from explicit path {path}");
                match Self::from_path_with_warnings(&path, warnings)? {
                    Some(config) => Ok(Some(config)),
                    None => Err(ConfigError::FileNotFound { path }),
                }
            }
            ConfigLocation::Default => {
                Self::from_path_with_warnings(&base_dir.join(DEFAULT_CONFIG_PATH), warnings)
            }
        }
    }

    /// Returns `Ok(None)` if the file does not exist.
    fn from_path_with_warnings(
        path: &Utf8Path,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Option<Self>, ConfigError> {
        debug!("config: attempting to load from {path}");
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("config: file does not exist at {path}");
                return Ok(None);
            }
            Err(error) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    error,
                });
            }
        };

        let (config, unknown) =
            deserialize_toml::<Self>(&contents).map_err(|error| ConfigError::Parse {
                path: path.to_owned(),
                error,
            })?;

        if !unknown.is_empty() {
            warnings.unknown_config_keys(path, &unknown);
        }

        debug!("config: loaded successfully from {path}");
        Ok(Some(config))
    }
}

/// Default configuration parsed from the embedded TOML. All fields are required.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultConfig {
    input: DefaultInputConfig,
    report: DefaultReportConfig,
    naming: DefaultNamingConfig,
}

impl DefaultConfig {
    /// The embedded default config TOML.
    const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    fn from_embedded() -> Result<Self, ConfigError> {
        let (config, unknown) = deserialize_toml::<Self>(Self::DEFAULT_CONFIG)
            .map_err(|error| ConfigError::DefaultParse { error })?;
        // The default config ships with the binary, so unknown keys in it are a bug.
        debug_assert!(
            unknown.is_empty(),
            "found unknown keys in default config: {unknown:?}"
        );
        Ok(config)
    }
}

/// Deserializes TOML content and returns the value along with any unknown keys.
fn deserialize_toml<T>(contents: &str) -> Result<(T, BTreeSet<String>), toml::de::Error>
where
    T: for<'de> Deserialize<'de>,
{
    let deserializer = toml::Deserializer::parse(contents)?;
    let mut unknown = BTreeSet::new();
    let value = serde_ignored::deserialize(deserializer, |path| {
        unknown.insert(path.to_string());
    })?;
    Ok((value, unknown))
}
