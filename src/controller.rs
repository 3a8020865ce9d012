// SPDX-License-Identifier: PMPL-1.0-or-later

//! Active-language control and the lookup entry points.
//!
//! A [`Translator`] owns the catalog, the active-language pointer and the
//! missing-key log. Hosts with one UI context use [`Translator::get`], which
//! follows the active pointer. Code that runs concurrently for different
//! users pins a language with [`Translator::context`] instead, so a switch
//! made elsewhere never leaks into its lookups.

use crate::audit::{self, AuditReport};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::diagnostics::MissingKeyLog;
use crate::error::I18nError;
use crate::resolver::{Args, Lookup, Resolver};
use std::collections::BTreeSet;
use std::sync::{OnceLock, PoisonError, RwLock};

#[derive(Debug)]
pub struct Translator {
    catalog: Catalog,
    active: RwLock<Option<String>>,
    misses: MissingKeyLog,
}

impl Translator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            active: RwLock::new(None),
            misses: MissingKeyLog::new(false),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let translator = Self::new(Catalog::from_config(config));
        translator.misses.set_enabled(config.debug);
        translator
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn missing_keys(&self) -> &MissingKeyLog {
        &self.misses
    }

    /// Load the catalog (once) and select `requested`.
    ///
    /// Falls back to the reference language with a warning when `requested`
    /// has no bundle. Fails only when no bundle loaded at all, leaving the
    /// previous selection in place. Returns the selected code.
    pub fn initialize(&self, requested: &str, debug: bool) -> Result<String, I18nError> {
        self.misses.set_enabled(debug);
        self.catalog.load();

        let selected = if self.catalog.contains(requested) {
            requested.to_string()
        } else if let Some(reference) = self.catalog.reference_language() {
            tracing::warn!(
                requested,
                fallback = reference,
                available = %self.available_list().join(", "),
                "language not found, using reference language"
            );
            reference.to_string()
        } else {
            return Err(I18nError::Configuration {
                requested: requested.to_string(),
                available: self.available_list(),
            });
        };

        tracing::info!(language = %selected, "language set");
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(selected.clone());
        Ok(selected)
    }

    /// Switch the active language. A rejected switch changes nothing.
    pub fn set_language(&self, code: &str) -> Result<(), I18nError> {
        // An unloaded catalog contains nothing, so this also covers calls
        // made before `initialize`.
        if !self.catalog.contains(code) {
            let err = I18nError::LanguageNotAvailable {
                requested: code.to_string(),
                available: self.available_list(),
            };
            tracing::error!("{}", err);
            return Err(err);
        }

        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(code.to_string());
        tracing::info!(language = code, "language switched");
        Ok(())
    }

    /// The active language, or `None` before a successful `initialize`.
    pub fn current_language(&self) -> Option<String> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn available_languages(&self) -> BTreeSet<String> {
        self.catalog.languages()
    }

    fn available_list(&self) -> Vec<String> {
        self.catalog.languages().into_iter().collect()
    }

    /// Resolve `key` in the active language, or return `default`.
    pub fn get(&self, key: &str, default: &str) -> String {
        self.get_with(key, default, &Args::new())
    }

    /// [`Translator::get`] with `{name}` placeholders filled from `args`.
    pub fn get_with(&self, key: &str, default: &str, args: &Args) -> String {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        let Some(code) = active.as_deref() else {
            tracing::debug!(key, "lookup before initialize; returning default");
            return default.to_string();
        };
        match self.catalog.bundle(code) {
            Some(bundle) => Resolver::new(bundle, code)
                .with_miss_log(&self.misses)
                .get(key, default, args),
            None => default.to_string(),
        }
    }

    /// A lookup handle pinned to `code`, independent of the active pointer.
    pub fn context(&self, code: &str) -> Result<LanguageContext<'_>, I18nError> {
        let (code, bundle) = self
            .catalog
            .bundles()
            .find(|(candidate, _)| *candidate == code)
            .ok_or_else(|| I18nError::LanguageNotAvailable {
                requested: code.to_string(),
                available: self.available_list(),
            })?;
        Ok(LanguageContext {
            resolver: Resolver::new(bundle, code).with_miss_log(&self.misses),
        })
    }

    /// Consistency audit over the loaded catalog.
    pub fn audit(&self) -> Option<AuditReport> {
        audit::audit(&self.catalog)
    }
}

/// Lookups bound to one language for the lifetime of a call or request.
#[derive(Debug, Clone, Copy)]
pub struct LanguageContext<'a> {
    resolver: Resolver<'a>,
}

impl<'a> LanguageContext<'a> {
    pub fn language(&self) -> &str {
        self.resolver.language()
    }

    pub fn get(&self, key: &str, default: &str) -> String {
        self.resolver.get(key, default, &Args::new())
    }

    pub fn get_with(&self, key: &str, default: &str, args: &Args) -> String {
        self.resolver.get(key, default, args)
    }

    pub fn lookup(&self, key: &str) -> Lookup<'a> {
        self.resolver.lookup(key)
    }
}

static INSTALLED: OnceLock<Translator> = OnceLock::new();

/// Make `translator` the process-wide instance used by [`t`] and [`t_with`].
pub fn install(translator: Translator) -> Result<&'static Translator, I18nError> {
    let mut fresh = false;
    let slot = INSTALLED.get_or_init(|| {
        fresh = true;
        translator
    });
    if fresh {
        Ok(slot)
    } else {
        Err(I18nError::AlreadyInstalled)
    }
}

pub fn installed() -> Option<&'static Translator> {
    INSTALLED.get()
}

/// Shorthand lookup through the installed translator.
///
/// Returns `default` until a translator is installed and initialized.
pub fn t(key: &str, default: &str) -> String {
    t_with(key, default, &Args::new())
}

pub fn t_with(key: &str, default: &str, args: &Args) -> String {
    match installed() {
        Some(translator) => translator.get_with(key, default, args),
        None => default.to_string(),
    }
}
