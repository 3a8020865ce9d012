// SPDX-License-Identifier: PMPL-1.0-or-later

//! Missing-key logging and catalog self-diagnostics.

use crate::audit;
use crate::catalog::{Catalog, LoadStatus};
use crate::langcode;
use anyhow::{anyhow, Result};
use colored::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Reports each missing `(language, key)` pair at most once per process.
///
/// Only emits while enabled; lookups behave the same either way.
#[derive(Debug, Default)]
pub struct MissingKeyLog {
    enabled: AtomicBool,
    seen: Mutex<HashSet<(String, String)>>,
}

impl MissingKeyLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            seen: Mutex::new(HashSet::new()),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Returns `true` if this call emitted a diagnostic.
    pub fn record(&self, language: &str, key: &str, reason: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if !seen.insert((language.to_string(), key.to_string())) {
            return false;
        }
        drop(seen);
        tracing::warn!(key, language, reason, "missing translation key");
        true
    }

    /// Every pair reported so far, sorted.
    pub fn reported(&self) -> Vec<(String, String)> {
        let seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        let mut pairs: Vec<_> = seen.iter().cloned().collect();
        pairs.sort();
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> ColoredString {
        match self {
            Level::Ok => "OK".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERR".red(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub label: String,
    pub level: Level,
    pub detail: String,
}

impl Diagnostic {
    fn new(label: impl Into<String>, level: Level, detail: String) -> Self {
        Self {
            label: label.into(),
            level,
            detail,
        }
    }

    fn ok(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    fn print(&self) {
        println!("  [{}] {:22} {}", self.level.tag(), self.label, self.detail);
    }
}

/// Health checks over a catalog. Loads it if needed.
pub fn check_catalog(catalog: &Catalog) -> Vec<Diagnostic> {
    catalog.load();
    let mut checks = Vec::new();

    let dir = catalog.resource_dir();
    checks.push(if dir.is_dir() {
        Diagnostic::ok("resource directory", format!("{} exists", dir.display()))
    } else if dir.exists() {
        Diagnostic::error(
            "resource directory",
            format!("{} exists but is not a directory", dir.display()),
        )
    } else {
        Diagnostic::error("resource directory", format!("{} missing", dir.display()))
    });

    for (path, status) in catalog.statuses() {
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        checks.push(match status {
            LoadStatus::Loaded { code, keys } => {
                Diagnostic::ok(label, format!("'{}' loaded ({} keys)", code, keys))
            }
            LoadStatus::Duplicate { code } => Diagnostic::warning(
                label,
                format!("ignored, '{}' already loaded from another file", code),
            ),
            LoadStatus::Missing => Diagnostic::error(label, "file disappeared during scan".to_string()),
            LoadStatus::Unreadable { reason } | LoadStatus::Malformed { reason } => {
                Diagnostic::error(label, reason.clone())
            }
        });
    }

    for code in catalog.languages() {
        if !langcode::is_iso639_1(&code) {
            checks.push(Diagnostic::warning(
                "language code",
                format!("'{}' is not an ISO 639-1 code", code),
            ));
        }
    }

    let configured = catalog.configured_reference();
    checks.push(match catalog.reference_language() {
        Some(code) if code == configured => {
            Diagnostic::ok("reference language", format!("'{}' loaded", code))
        }
        Some(code) => Diagnostic::warning(
            "reference language",
            format!("'{}' not loaded, using '{}'", configured, code),
        ),
        None => Diagnostic::error(
            "reference language",
            "no bundles loaded; every lookup returns its default".to_string(),
        ),
    });

    if let Some(report) = audit::audit(catalog) {
        let inconsistent = report.inconsistent_languages();
        checks.push(if inconsistent.is_empty() {
            Diagnostic::ok(
                "key consistency",
                format!("all languages match '{}'", report.reference_language),
            )
        } else {
            Diagnostic::warning(
                "key consistency",
                format!("differs from reference: {}", inconsistent.join(", ")),
            )
        });
    }

    checks
}

/// Print [`check_catalog`] results; fails if any check is an error.
pub fn run_self_diagnostics(catalog: &Catalog) -> Result<()> {
    println!("locale-catalog self-diagnostics");
    println!();

    let checks = check_catalog(catalog);
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}
