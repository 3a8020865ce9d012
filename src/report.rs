// SPDX-License-Identifier: PMPL-1.0-or-later

//! Terminal and JSON rendering for the QA commands.

use crate::audit::AuditReport;
use crate::catalog::Catalog;
use crate::langcode;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Audit report as written by `audit --output`.
#[derive(Debug, Serialize)]
pub struct AuditExport<'a> {
    pub created_at: String,
    pub resource_dir: &'a Path,
    #[serde(flatten)]
    pub report: &'a AuditReport,
}

impl<'a> AuditExport<'a> {
    pub fn new(catalog: &'a Catalog, report: &'a AuditReport) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            resource_dir: catalog.resource_dir(),
            report,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing audit report")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, self.to_json()?).with_context(|| format!("writing {}", path.display()))
    }
}

/// Print the audit, listing at most `limit` keys per category.
pub fn print_audit(report: &AuditReport, limit: usize) {
    println!("{}", "KEY CONSISTENCY".bold().yellow());
    println!("Reference language: {}", report.reference_language);
    println!("Total reference keys: {}", report.reference_key_count);
    println!();

    for (code, lang) in &report.languages {
        let status = if lang.is_consistent {
            "✓".green()
        } else {
            "✗".red()
        };
        let mut line = format!("{} {}: {} keys", status, code, lang.key_count);
        if !lang.missing_keys.is_empty() {
            line.push_str(&format!(" | MISSING: {}", lang.missing_keys.len()));
        }
        if !lang.extra_keys.is_empty() {
            line.push_str(&format!(" | EXTRA: {}", lang.extra_keys.len()));
        }
        println!("{}", line);
    }

    if report.is_consistent() {
        println!();
        println!("{}", "All languages have consistent keys.".green());
        return;
    }

    println!();
    println!("{}", "Key inconsistencies detected:".bold().red());
    for (code, lang) in &report.languages {
        print_key_list(code, "Missing keys", &lang.missing_keys, limit);
        print_key_list(code, "Extra keys", &lang.extra_keys, limit);
    }
}

fn print_key_list(code: &str, title: &str, keys: &[String], limit: usize) {
    if keys.is_empty() {
        return;
    }
    println!();
    println!("  {} - {}:", code, title);
    for key in keys.iter().take(limit) {
        println!("    - {}", key);
    }
    if keys.len() > limit {
        println!("    ... and {} more", keys.len() - limit);
    }
}

/// Print loaded languages with display names, marking the reference.
pub fn print_languages(catalog: &Catalog) {
    let reference = catalog.reference_language();
    if catalog.is_empty() {
        println!("No languages loaded from {}", catalog.resource_dir().display());
        return;
    }

    println!(
        "  {:<8} {:<12} {:<14} {:>6}",
        "Code", "Language", "Native", "Keys"
    );
    println!("  {}", "-".repeat(44));
    for (code, bundle) in catalog.bundles() {
        let marker = if Some(code) == reference { " (reference)" } else { "" };
        println!(
            "  {:<8} {:<12} {:<14} {:>6}{}",
            code,
            langcode::english_name(code).unwrap_or("-"),
            langcode::native_name(code).unwrap_or("-"),
            bundle.leaf_count(),
            marker.dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit;
    use crate::bundle::ResourceBundle;
    use serde_json::json;

    #[test]
    fn export_flattens_report_fields() {
        let catalog = Catalog::from_bundles(
            "en",
            [(
                "en".to_string(),
                ResourceBundle::from_value(json!({ "a": "b" })).unwrap(),
            )],
        );
        let report = audit::audit(&catalog).unwrap();
        let json = AuditExport::new(&catalog, &report).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["reference_language"], "en");
        assert_eq!(value["reference_key_count"], 1);
        assert_eq!(value["languages"]["en"]["is_consistent"], true);
        assert!(value["created_at"].as_str().is_some());
    }
}
