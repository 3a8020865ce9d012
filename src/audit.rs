// SPDX-License-Identifier: PMPL-1.0-or-later

//! Cross-language key consistency audit.
//!
//! Every bundle is flattened to its set of leaf paths and compared with the
//! reference language's set. Pure over an already-loaded catalog: no I/O,
//! no logging, and never consulted by lookups.

use crate::bundle::{Node, ResourceBundle};
use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-language comparison against the reference key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageAudit {
    pub key_count: usize,
    pub missing_keys: Vec<String>,
    pub extra_keys: Vec<String>,
    pub is_consistent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub reference_language: String,
    pub reference_key_count: usize,
    pub languages: BTreeMap<String, LanguageAudit>,
}

impl AuditReport {
    pub fn is_consistent(&self) -> bool {
        self.languages.values().all(|lang| lang.is_consistent)
    }

    pub fn inconsistent_languages(&self) -> Vec<String> {
        self.languages
            .iter()
            .filter(|(_, lang)| !lang.is_consistent)
            .map(|(code, _)| code.clone())
            .collect()
    }
}

/// All dot-joined leaf paths of a bundle. Sections are not listed themselves.
pub fn flatten(bundle: &ResourceBundle) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for (name, node) in bundle.root() {
        collect(node, name, &mut keys);
    }
    keys
}

fn collect(node: &Node, path: &str, keys: &mut BTreeSet<String>) {
    match node {
        Node::Leaf(_) => {
            keys.insert(path.to_string());
        }
        Node::Branch(children) => {
            for (name, child) in children {
                collect(child, &format!("{}.{}", path, name), keys);
            }
        }
    }
}

/// Diff one key set against the canonical one.
pub fn compare(canonical: &BTreeSet<String>, keys: &BTreeSet<String>) -> LanguageAudit {
    let missing_keys: Vec<String> = canonical.difference(keys).cloned().collect();
    let extra_keys: Vec<String> = keys.difference(canonical).cloned().collect();
    LanguageAudit {
        key_count: keys.len(),
        is_consistent: missing_keys.is_empty() && extra_keys.is_empty(),
        missing_keys,
        extra_keys,
    }
}

/// Audit every loaded language, reference included.
///
/// Returns `None` when the catalog has no bundles.
pub fn audit(catalog: &Catalog) -> Option<AuditReport> {
    let reference = catalog.reference_language()?;
    let canonical = flatten(catalog.bundle(reference)?);

    let languages = catalog
        .bundles()
        .map(|(code, bundle)| (code.to_string(), compare(&canonical, &flatten(bundle))))
        .collect();

    Some(AuditReport {
        reference_language: reference.to_string(),
        reference_key_count: canonical.len(),
        languages,
    })
}
