// SPDX-License-Identifier: PMPL-1.0-or-later

//! Engine configuration.
//!
//! Loaded from an optional YAML file, then overridden by `LOCALE_CATALOG_*`
//! environment variables, then by whatever the host sets explicitly.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DIR_ENV: &str = "LOCALE_CATALOG_DIR";
pub const REFERENCE_ENV: &str = "LOCALE_CATALOG_REFERENCE";
pub const LANG_ENV: &str = "LOCALE_CATALOG_LANG";
pub const DEBUG_ENV: &str = "LOCALE_CATALOG_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Directory scanned for `<code>.json` / `<code>.yaml` files.
    pub resource_dir: PathBuf,
    /// Canonical language for audits and initialization fallback.
    pub reference_language: String,
    /// Language a host should pass to `initialize` when it has no preference.
    pub default_language: String,
    /// Log missing keys (once per language and key).
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("i18n"),
            reference_language: "en".to_string(),
            default_language: "en".to_string(),
            debug: false,
        }
    }
}

impl EngineConfig {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = non_empty(DIR_ENV) {
            self.resource_dir = PathBuf::from(dir);
        }
        if let Some(code) = non_empty(REFERENCE_ENV) {
            self.reference_language = code.trim().to_string();
        }
        if let Some(code) = non_empty(LANG_ENV) {
            self.default_language = code.trim().to_string();
        }
        if let Some(flag) = non_empty(DEBUG_ENV) {
            self.debug = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        self
    }
}
