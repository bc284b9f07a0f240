// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Naming-related configuration.

use crate::{errors::ConfigError, naming::NameSplitter};
use serde::Deserialize;

/// Naming configuration in a config file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeserializedNamingConfig {
    /// Separators between the class name and the test name.
    #[serde(default)]
    pub separators: Option<Vec<String>>,
}

/// Default naming configuration with all values required.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultNamingConfig {
    /// Separators between the class name and the test name.
    pub separators: Vec<String>,
}

/// Resolved naming configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamingConfig {
    /// Separators between the class name and the test name.
    pub separators: Vec<String>,
}

impl NamingConfig {
    pub(in crate::config) fn resolve(
        default_config: &DefaultNamingConfig,
        user_config: Option<&DeserializedNamingConfig>,
    ) -> Result<Self, ConfigError> {
        let separators = user_config
            .and_then(|c| c.separators.clone())
            .unwrap_or_else(|| default_config.separators.clone());
        if separators.iter().any(String::is_empty) {
            return Err(ConfigError::invalid_value(
                "naming.separators",
                "separators must not be empty strings",
            ));
        }
        Ok(Self { separators })
    }

    /// Returns a [`NameSplitter`] for these separators.
    pub fn splitter(&self) -> NameSplitter {
        NameSplitter::new(self.separators.iter().cloned())
    }
}
