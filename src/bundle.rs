// SPDX-License-Identifier: PMPL-1.0-or-later

//! One language's string tree.
//!
//! Interior nodes map segment names to children, leaves are strings. A bundle
//! is built once from a parsed resource file and never edited afterwards.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A node in a resource tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(String),
    Branch(BTreeMap<String, Node>),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(children) => Some(children),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(children) => children.values().map(Node::leaf_count).sum(),
        }
    }
}

/// A complete vocabulary for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceBundle {
    root: BTreeMap<String, Node>,
}

impl ResourceBundle {
    pub fn new(root: BTreeMap<String, Node>) -> Self {
        Self { root }
    }

    /// Convert a parsed document into a bundle.
    ///
    /// The document root must be a mapping. Strings, numbers and booleans
    /// become leaves (non-strings in their textual form). `null` (a blank YAML
    /// value) becomes an empty leaf: it still counts as a key but resolves to
    /// the caller's default. Arrays are rejected, and the error names the
    /// offending key path.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => {
                let mut root = BTreeMap::new();
                for (name, child) in map {
                    let node = convert(child, &name)?;
                    root.insert(name, node);
                }
                Ok(Self { root })
            }
            other => Err(format!("root is {}, expected a mapping", kind(&other))),
        }
    }

    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of leaf strings in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.root.values().map(Node::leaf_count).sum()
    }
}

fn convert(value: Value, path: &str) -> Result<Node, String> {
    match value {
        Value::String(text) => Ok(Node::Leaf(text)),
        Value::Number(number) => Ok(Node::Leaf(number.to_string())),
        Value::Bool(flag) => Ok(Node::Leaf(flag.to_string())),
        Value::Null => Ok(Node::Leaf(String::new())),
        Value::Object(map) => {
            let mut children = BTreeMap::new();
            for (name, child) in map {
                let child_path = format!("{}.{}", path, name);
                let node = convert(child, &child_path)?;
                children.insert(name, node);
            }
            Ok(Node::Branch(children))
        }
        other => Err(format!(
            "value at '{}' is {}, expected a string or mapping",
            path,
            kind(&other)
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_become_branches() {
        let bundle = ResourceBundle::from_value(json!({
            "login": { "title": "Welcome", "button": "Sign in" },
            "app": "Client Manager"
        }))
        .unwrap();

        let login = bundle.root()["login"].as_branch().unwrap();
        assert_eq!(login["title"].as_leaf(), Some("Welcome"));
        assert_eq!(bundle.root()["app"].as_leaf(), Some("Client Manager"));
        assert_eq!(bundle.leaf_count(), 3);
    }

    #[test]
    fn scalars_are_kept_as_text() {
        let bundle = ResourceBundle::from_value(json!({ "limits": { "max": 50, "on": true } }))
            .unwrap();
        let limits = bundle.root()["limits"].as_branch().unwrap();
        assert_eq!(limits["max"].as_leaf(), Some("50"));
        assert_eq!(limits["on"].as_leaf(), Some("true"));
    }

    #[test]
    fn null_becomes_an_empty_leaf() {
        let bundle = ResourceBundle::from_value(json!({ "login": { "hint": null } })).unwrap();
        let login = bundle.root()["login"].as_branch().unwrap();
        assert_eq!(login["hint"].as_leaf(), Some(""));
        assert_eq!(bundle.leaf_count(), 1);
    }

    #[test]
    fn arrays_are_rejected_with_their_path() {
        let err = ResourceBundle::from_value(json!({ "menu": { "items": ["a", "b"] } }))
            .unwrap_err();
        assert!(err.contains("menu.items"), "unexpected reason: {}", err);
        assert!(err.contains("an array"));
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = ResourceBundle::from_value(json!(["en"])).unwrap_err();
        assert_eq!(err, "root is an array, expected a mapping");
    }

    #[test]
    fn empty_mapping_is_an_empty_bundle() {
        let bundle = ResourceBundle::from_value(json!({})).unwrap();
        assert!(bundle.is_empty());
        assert_eq!(bundle.leaf_count(), 0);
    }
}
