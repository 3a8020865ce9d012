// SPDX-License-Identifier: PMPL-1.0-or-later

//! locale-catalog — per-language string bundles for desktop applications.
//!
//! Resource files (`<code>.json`, `<code>.yaml`) are loaded once into a
//! [`Catalog`]; a [`Translator`] selects the active language and resolves
//! dotted keys (`"validation.age_min"`) with caller defaults and `{name}`
//! placeholders. Lookups never fail. Only initialization and language
//! switches can.
//!
//! ```no_run
//! use locale_catalog::{Args, EngineConfig, Translator};
//!
//! let translator = Translator::from_config(&EngineConfig::new("app/i18n"));
//! translator.initialize("tr", false)?;
//! let title = translator.get("login.title", "Welcome");
//! let hint = translator.get_with("validation.age_min", "", &Args::new().with("min", 18));
//! # Ok::<(), locale_catalog::I18nError>(())
//! ```

pub mod audit;
pub mod bundle;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod langcode;
pub mod report;
pub mod resolver;

pub use audit::{AuditReport, LanguageAudit};
pub use bundle::{Node, ResourceBundle};
pub use catalog::{Catalog, LoadStatus};
pub use config::EngineConfig;
pub use controller::{install, installed, t, t_with, LanguageContext, Translator};
pub use error::{ConfigError, I18nError, ResourceLoadError};
pub use resolver::{Args, Lookup};
