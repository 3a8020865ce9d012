// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for the catalog engine.
//!
//! Only language switches, initialization and config loading fail loudly.
//! Per-file load failures are recovered inside [`crate::catalog::Catalog`]
//! and key misses are never errors at all.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single resource file could not become a bundle.
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", .path.display())]
    Encoding { path: PathBuf },

    #[error("invalid {format} in {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("unexpected structure in {}: {reason}", .path.display())]
    Shape { path: PathBuf, reason: String },
}

impl ResourceLoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Encoding { path }
            | Self::Parse { path, .. }
            | Self::Shape { path, .. } => path,
        }
    }
}

/// Failures surfaced by the language controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    #[error("language '{requested}' not available (available: {})", .available.join(", "))]
    LanguageNotAvailable {
        requested: String,
        available: Vec<String>,
    },

    #[error(
        "language '{requested}' not found and no reference language is loaded (available: {})",
        .available.join(", ")
    )]
    Configuration {
        requested: String,
        available: Vec<String>,
    },

    #[error("a process-wide translator is already installed")]
    AlreadyInstalled,
}

/// Problems reading an engine config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_not_available_lists_alternatives() {
        let err = I18nError::LanguageNotAvailable {
            requested: "xx".to_string(),
            available: vec!["en".to_string(), "tr".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "language 'xx' not available (available: en, tr)"
        );
    }

    #[test]
    fn load_error_exposes_path() {
        let err = ResourceLoadError::Shape {
            path: PathBuf::from("i18n/en.json"),
            reason: "root is not a mapping".to_string(),
        };
        assert_eq!(err.path(), &PathBuf::from("i18n/en.json"));
        assert!(err.to_string().contains("root is not a mapping"));
    }
}
