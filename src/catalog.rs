// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog of per-language resource bundles.
//!
//! The resource directory is scanned exactly once per [`Catalog`]. Every
//! `<code>.json`, `<code>.yaml` or `<code>.yml` file directly inside it becomes
//! one bundle keyed by its stem. A file that cannot be read or parsed is
//! logged, recorded as a [`LoadStatus`] and skipped; it never aborts the scan.
//! After the scan the bundles are immutable and safe to read from any thread.

use crate::bundle::ResourceBundle;
use crate::config::EngineConfig;
use crate::error::ResourceLoadError;
use crate::langcode::{self, ResourceFormat};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Outcome of loading one resource file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded { code: String, keys: usize },
    Missing,
    Unreadable { reason: String },
    Malformed { reason: String },
    /// Another file already supplied a bundle for this code.
    Duplicate { code: String },
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded { .. })
    }

    fn from_error(err: &ResourceLoadError) -> Self {
        match err {
            ResourceLoadError::NotFound { .. } => LoadStatus::Missing,
            ResourceLoadError::Io { .. } | ResourceLoadError::Encoding { .. } => {
                LoadStatus::Unreadable {
                    reason: err.to_string(),
                }
            }
            ResourceLoadError::Parse { .. } | ResourceLoadError::Shape { .. } => {
                LoadStatus::Malformed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    bundles: BTreeMap<String, ResourceBundle>,
    statuses: BTreeMap<PathBuf, LoadStatus>,
}

#[derive(Debug)]
pub struct Catalog {
    resource_dir: PathBuf,
    reference: String,
    state: OnceLock<CatalogState>,
}

impl Catalog {
    /// A catalog that will scan `resource_dir` on first [`Catalog::load`].
    pub fn new(resource_dir: impl Into<PathBuf>, reference: impl Into<String>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            reference: reference.into(),
            state: OnceLock::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.resource_dir, &config.reference_language)
    }

    /// An already-loaded catalog built from in-memory bundles.
    ///
    /// `load()` on the result is a no-op.
    pub fn from_bundles<I>(reference: impl Into<String>, bundles: I) -> Self
    where
        I: IntoIterator<Item = (String, ResourceBundle)>,
    {
        let state = CatalogState {
            bundles: bundles.into_iter().collect(),
            statuses: BTreeMap::new(),
        };
        Self {
            resource_dir: PathBuf::new(),
            reference: reference.into(),
            state: OnceLock::from(state),
        }
    }

    /// Scan the resource directory if no scan has happened yet.
    ///
    /// Returns `true` when this call performed the scan. Later calls return
    /// `false` without touching the filesystem, even if the scan found nothing.
    pub fn load(&self) -> bool {
        let mut scanned = false;
        self.state.get_or_init(|| {
            scanned = true;
            scan(&self.resource_dir)
        });
        scanned
    }

    pub fn is_loaded(&self) -> bool {
        self.state.get().is_some()
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// The reference language as configured, whether or not it loaded.
    pub fn configured_reference(&self) -> &str {
        &self.reference
    }

    /// Codes with a successfully loaded bundle.
    pub fn languages(&self) -> BTreeSet<String> {
        self.bundles().map(|(code, _)| code.to_string()).collect()
    }

    pub fn bundle(&self, code: &str) -> Option<&ResourceBundle> {
        self.state.get()?.bundles.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.bundle(code).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.state
            .get()
            .map(|state| state.bundles.is_empty())
            .unwrap_or(true)
    }

    /// Loaded bundles in code order.
    pub fn bundles(&self) -> impl Iterator<Item = (&str, &ResourceBundle)> {
        self.state
            .get()
            .into_iter()
            .flat_map(|state| state.bundles.iter())
            .map(|(code, bundle)| (code.as_str(), bundle))
    }

    /// Per-file load results from the directory scan.
    pub fn statuses(&self) -> impl Iterator<Item = (&Path, &LoadStatus)> {
        self.state
            .get()
            .into_iter()
            .flat_map(|state| state.statuses.iter())
            .map(|(path, status)| (path.as_path(), status))
    }

    /// The language used as canonical key set and initialization fallback.
    ///
    /// This is the configured reference when it loaded, otherwise the first
    /// loaded code in sorted order, otherwise `None`.
    pub fn reference_language(&self) -> Option<&str> {
        let state = self.state.get()?;
        if let Some((code, _)) = state.bundles.get_key_value(self.reference.as_str()) {
            return Some(code.as_str());
        }
        state.bundles.keys().next().map(String::as_str)
    }
}

fn scan(dir: &Path) -> CatalogState {
    let mut state = CatalogState::default();

    if !dir.is_dir() {
        tracing::warn!(path = %dir.display(), "resource directory not found; catalog is empty");
        return state;
    }

    let candidates: Vec<(PathBuf, String)> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let code = langcode::code_from_path(entry.path())?;
            Some((entry.into_path(), code))
        })
        .collect();

    if candidates.is_empty() {
        tracing::warn!(path = %dir.display(), "no resource files found");
        return state;
    }

    for (path, code) in candidates {
        if state.bundles.contains_key(&code) {
            tracing::warn!(path = %path.display(), language = %code, "duplicate resource file ignored");
            state.statuses.insert(path, LoadStatus::Duplicate { code });
            continue;
        }

        match read_bundle(&path) {
            Ok(bundle) => {
                let keys = bundle.leaf_count();
                state.bundles.insert(code.clone(), bundle);
                state.statuses.insert(path, LoadStatus::Loaded { code, keys });
            }
            Err(err) => {
                tracing::error!(language = %code, path = %err.path().display(), "{}", err);
                state.statuses.insert(path, LoadStatus::from_error(&err));
            }
        }
    }

    if state.bundles.is_empty() {
        tracing::warn!(path = %dir.display(), "no resource bundle could be loaded");
    } else {
        let loaded: Vec<&str> = state.bundles.keys().map(String::as_str).collect();
        tracing::info!("loaded languages: {}", loaded.join(", "));
    }
    state
}

/// Read and parse a single resource file.
pub fn read_bundle(path: &Path) -> Result<ResourceBundle, ResourceLoadError> {
    let format = ResourceFormat::from_path(path).ok_or_else(|| ResourceLoadError::Shape {
        path: path.to_path_buf(),
        reason: "unsupported file extension".to_string(),
    })?;

    let raw = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ResourceLoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ResourceLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let text = decode_text(path, &raw)?;

    let parsed: Result<Value, String> = match format {
        ResourceFormat::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
        ResourceFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
    };
    let value = parsed.map_err(|message| ResourceLoadError::Parse {
        path: path.to_path_buf(),
        format: format.name(),
        message,
    })?;

    ResourceBundle::from_value(value).map_err(|reason| ResourceLoadError::Shape {
        path: path.to_path_buf(),
        reason,
    })
}

// UTF-8 (BOM stripped) first. Windows-1252 only for files with no multi-byte
// UTF-8 at all; a UTF-8 file with a corrupt byte is rejected, not re-decoded.
fn decode_text(path: &Path, raw: &[u8]) -> Result<String, ResourceLoadError> {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(raw);
    if !had_errors {
        return Ok(text.into_owned());
    }
    if raw.utf8_chunks().any(|chunk| !chunk.valid().is_ascii()) {
        return Err(ResourceLoadError::Encoding {
            path: path.to_path_buf(),
        });
    }
    tracing::warn!(path = %path.display(), "not valid UTF-8, decoding as Windows-1252");
    let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(raw);
    Ok(text.into_owned())
}
