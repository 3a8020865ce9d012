// SPDX-License-Identifier: PMPL-1.0-or-later

//! Dotted key resolution and placeholder interpolation.
//!
//! `get` never fails: every miss resolves to the caller's default, and a
//! template whose placeholders cannot all be filled comes back unformatted so
//! the mismatch stays visible on screen.

use crate::bundle::{Node, ResourceBundle};
use crate::diagnostics::MissingKeyLog;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::OnceLock;
use thiserror::Error;

/// Result of walking a key path through a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a str),
    /// A segment does not exist at its level.
    Missing,
    /// A leaf was reached before the path was exhausted.
    ThroughLeaf,
    /// The path ends on a mapping.
    NotALeaf,
    /// Empty key or empty segment.
    InvalidKey,
}

impl Lookup<'_> {
    pub fn found(&self) -> Option<&str> {
        match self {
            Lookup::Found(text) => Some(text),
            _ => None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Lookup::Found(_) => "found",
            Lookup::Missing => "missing key",
            Lookup::ThroughLeaf => "path continues past a string",
            Lookup::NotALeaf => "path ends on a section",
            Lookup::InvalidKey => "empty key segment",
        }
    }
}

/// Walk `key` (`"validation.age_min"`) through `bundle`.
pub fn lookup<'a>(bundle: &'a ResourceBundle, key: &str) -> Lookup<'a> {
    if key.split('.').any(str::is_empty) {
        return Lookup::InvalidKey;
    }

    let mut level = bundle.root();
    let mut segments = key.split('.').peekable();
    while let Some(segment) = segments.next() {
        let Some(node) = level.get(segment) else {
            return Lookup::Missing;
        };
        let last = segments.peek().is_none();
        match (node, last) {
            (Node::Leaf(text), true) => return Lookup::Found(text),
            (Node::Branch(_), true) => return Lookup::NotALeaf,
            (Node::Leaf(_), false) => return Lookup::ThroughLeaf,
            (Node::Branch(children), false) => level = children,
        }
    }
    Lookup::InvalidKey
}

/// Named placeholder values, rendered to text when inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: BTreeMap<String, String>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.values.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error("no value for placeholder '{0}'")]
    Missing(String),
    #[error("positional placeholder '{{{0}}}' is not supported")]
    Positional(String),
    #[error("format spec in placeholder '{{{0}}}' is not supported")]
    Unsupported(String),
    #[error("unbalanced '{0}' in template")]
    Unbalanced(char),
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("placeholder pattern is valid")
    })
}

/// Substitute every `{name}` in `template` from `args`.
///
/// `{{` and `}}` produce literal braces. Substitution is all-or-nothing: the
/// first placeholder that cannot be filled aborts with an error and nothing
/// is returned.
pub fn interpolate(template: &str, args: &Args) -> Result<String, PlaceholderError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in placeholder_pattern().captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        match (whole.as_str(), caps.get(1)) {
            ("{{", _) => out.push('{'),
            ("}}", _) => out.push('}'),
            (_, Some(name)) => out.push_str(substitute(name.as_str(), args)?),
            (stray, None) => {
                return Err(PlaceholderError::Unbalanced(
                    stray.chars().next().unwrap_or('{'),
                ))
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}

fn substitute<'a>(name: &str, args: &'a Args) -> Result<&'a str, PlaceholderError> {
    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
        return Err(PlaceholderError::Positional(name.to_string()));
    }
    if name.contains([':', '!', '.', '[']) {
        return Err(PlaceholderError::Unsupported(name.to_string()));
    }
    args.get(name)
        .ok_or_else(|| PlaceholderError::Missing(name.to_string()))
}

/// Resolves keys against one language's bundle.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    bundle: &'a ResourceBundle,
    language: &'a str,
    misses: Option<&'a MissingKeyLog>,
}

impl<'a> Resolver<'a> {
    pub fn new(bundle: &'a ResourceBundle, language: &'a str) -> Self {
        Self {
            bundle,
            language,
            misses: None,
        }
    }

    /// Report misses through `log` (which decides whether to emit anything).
    pub fn with_miss_log(mut self, log: &'a MissingKeyLog) -> Self {
        self.misses = Some(log);
        self
    }

    pub fn language(&self) -> &str {
        self.language
    }

    pub fn lookup(&self, key: &str) -> Lookup<'a> {
        lookup(self.bundle, key)
    }

    /// Resolve `key`, falling back to `default`, then fill placeholders.
    pub fn get(&self, key: &str, default: &str, args: &Args) -> String {
        let template = match self.lookup(key) {
            Lookup::Found(text) if !text.is_empty() => text,
            Lookup::Found(_) => return default.to_string(),
            miss => {
                if let Some(log) = self.misses {
                    log.record(self.language, key, miss.describe());
                }
                return default.to_string();
            }
        };

        if args.is_empty() {
            return template.to_string();
        }

        match interpolate(template, args) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(key, language = self.language, "{}", err);
                template.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle() -> ResourceBundle {
        ResourceBundle::from_value(json!({
            "login": { "title": "Welcome", "empty": "" },
            "validation": {
                "age_min": "Age must be at least {min}",
                "phone_invalid": "Phone must be {min}-{max} digits",
                "braces": "Use {{name}} for {name}"
            }
        }))
        .unwrap()
    }

    #[test]
    fn lookup_distinguishes_failure_shapes() {
        let b = bundle();
        assert_eq!(lookup(&b, "login.title"), Lookup::Found("Welcome"));
        assert_eq!(lookup(&b, "login.empty"), Lookup::Found(""));
        assert_eq!(lookup(&b, "login.subtitle"), Lookup::Missing);
        assert_eq!(lookup(&b, "login.title.extra"), Lookup::ThroughLeaf);
        assert_eq!(lookup(&b, "login"), Lookup::NotALeaf);
        assert_eq!(lookup(&b, ""), Lookup::InvalidKey);
        assert_eq!(lookup(&b, "login..title"), Lookup::InvalidKey);
        assert_eq!(lookup(&b, ".login"), Lookup::InvalidKey);
    }

    #[test]
    fn interpolate_fills_named_values() {
        let args = Args::new().with("min", 7).with("max", 15);
        assert_eq!(
            interpolate("Phone must be {min}-{max} digits", &args).unwrap(),
            "Phone must be 7-15 digits"
        );
    }

    #[test]
    fn interpolate_handles_escaped_braces() {
        let args = Args::new().with("name", "x");
        assert_eq!(
            interpolate("Use {{name}} for {name}", &args).unwrap(),
            "Use {name} for x"
        );
    }

    #[test]
    fn interpolate_reports_each_failure_kind() {
        let args = Args::new().with("min", 1);
        assert_eq!(
            interpolate("{max}", &args),
            Err(PlaceholderError::Missing("max".to_string()))
        );
        assert_eq!(
            interpolate("{0}", &args),
            Err(PlaceholderError::Positional("0".to_string()))
        );
        assert_eq!(
            interpolate("{}", &args),
            Err(PlaceholderError::Positional(String::new()))
        );
        assert_eq!(
            interpolate("{min:>4}", &args),
            Err(PlaceholderError::Unsupported("min:>4".to_string()))
        );
        assert_eq!(
            interpolate("open { brace", &args),
            Err(PlaceholderError::Unbalanced('{'))
        );
        assert_eq!(
            interpolate("{min}}", &args),
            Err(PlaceholderError::Unbalanced('}'))
        );
    }

    #[test]
    fn get_substitutes_or_returns_template_unchanged() {
        let b = bundle();
        let resolver = Resolver::new(&b, "en");
        assert_eq!(
            resolver.get("validation.age_min", "", &Args::new().with("min", 18)),
            "Age must be at least 18"
        );
        assert_eq!(
            resolver.get("validation.age_min", "", &Args::new().with("max", 18)),
            "Age must be at least {min}"
        );
        // a partial fill is never returned
        assert_eq!(
            resolver.get("validation.phone_invalid", "", &Args::new().with("min", 7)),
            "Phone must be {min}-{max} digits"
        );
    }

    #[test]
    fn get_without_args_is_verbatim() {
        let b = bundle();
        let resolver = Resolver::new(&b, "en");
        assert_eq!(
            resolver.get("validation.braces", "", &Args::new()),
            "Use {{name}} for {name}"
        );
    }

    #[test]
    fn get_falls_back_to_default() {
        let b = bundle();
        let resolver = Resolver::new(&b, "en");
        assert_eq!(resolver.get("nonexistent.key", "DEFAULT", &Args::new()), "DEFAULT");
        assert_eq!(resolver.get("login", "DEFAULT", &Args::new()), "DEFAULT");
        assert_eq!(resolver.get("login.empty", "DEFAULT", &Args::new()), "DEFAULT");
        assert_eq!(resolver.get("login.title.x", "", &Args::new()), "");
    }

    #[test]
    fn misses_are_recorded_when_logging() {
        let b = bundle();
        let log = MissingKeyLog::new(true);
        let resolver = Resolver::new(&b, "en").with_miss_log(&log);
        resolver.get("nope", "", &Args::new());
        resolver.get("nope", "", &Args::new());
        resolver.get("login.empty", "", &Args::new());
        assert_eq!(log.reported(), vec![("en".to_string(), "nope".to_string())]);
    }

    #[test]
    fn args_collect_from_pairs() {
        let args: Args = [("min", 3), ("max", 50)].into_iter().collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args.get("max"), Some("50"));
    }
}
