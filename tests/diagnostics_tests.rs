// SPDX-License-Identifier: PMPL-1.0-or-later

//! Self-diagnostics over real resource directories

use locale_catalog::diagnostics::{check_catalog, Level};
use locale_catalog::Catalog;
use std::fs;
use tempfile::TempDir;

fn level_of(checks: &[locale_catalog::diagnostics::Diagnostic], label: &str) -> Level {
    checks
        .iter()
        .find(|c| c.label == label)
        .map(|c| c.level)
        .unwrap_or_else(|| panic!("no check labelled {}", label))
}

#[test]
fn test_healthy_directory_is_all_ok() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"a": {"b": "x"}}"#).unwrap();
    fs::write(dir.path().join("tr.json"), r#"{"a": {"b": "y"}}"#).unwrap();

    let checks = check_catalog(&Catalog::new(dir.path(), "en"));
    assert!(checks.iter().all(|c| c.level == Level::Ok), "{:?}", checks);
    assert_eq!(level_of(&checks, "key consistency"), Level::Ok);
}

#[test]
fn test_problems_are_flagged() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tr.json"), r#"{"a": {"b": "y", "c": "z"}}"#).unwrap();
    fs::write(dir.path().join("xx.json"), r#"{"a": {"b": "y"}}"#).unwrap();
    fs::write(dir.path().join("fr.json"), "{ broken").unwrap();

    let checks = check_catalog(&Catalog::new(dir.path(), "en"));
    assert_eq!(level_of(&checks, "fr.json"), Level::Error);
    assert_eq!(level_of(&checks, "tr.json"), Level::Ok);
    assert_eq!(level_of(&checks, "language code"), Level::Warn);
    // "en" never loaded, so the first loaded code stands in
    assert_eq!(level_of(&checks, "reference language"), Level::Warn);
    assert_eq!(level_of(&checks, "key consistency"), Level::Warn);
}
