//! MappingTree — the ordered key/value container behind every internal
//! mapping node.

use std::fmt;

use hashbrown::HashMap;
use serde::Deserialize;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::MappingValue;

/// Ordered map of mapping keys to values.
///
/// Keys keep the order they were first inserted in, which is the order
/// they appear in the source document. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct MappingTree {
    entries: Vec<(String, MappingValue)>,
    positions: HashMap<String, usize>,
}

impl MappingTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MappingValue> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Insert or replace. A replaced key keeps its original position.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MappingValue>) -> Option<MappingValue> {
        let key = key.into();
        let value = value.into();
        match self.positions.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MappingValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for MappingTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V> FromIterator<(K, V)> for MappingTree
where
    K: Into<String>,
    V: Into<MappingValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = MappingTree::new();
        for (k, v) in iter {
            tree.insert(k, v);
        }
        tree
    }
}

/// Convert a list of (key, value) pairs into a tree node.
impl<K, V> From<Vec<(K, V)>> for MappingValue
where
    K: Into<String>,
    V: Into<MappingValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        MappingValue::Tree(pairs.into_iter().collect())
    }
}

impl fmt::Display for MappingTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for MappingTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MappingTree {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MappingValue::deserialize(deserializer)? {
            MappingValue::Tree(tree) => Ok(tree),
            other => Err(serde::de::Error::custom(format!(
                "expected a mapping tree, got {}",
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut tree = MappingTree::new().with("a", 1).with("b", 2);
        assert_eq!(tree.insert("a", 3), Some(MappingValue::Int(1)));
        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(tree.get("a"), Some(&MappingValue::Int(3)));
    }

    #[test]
    fn test_equality_ignores_order() {
        let left = MappingTree::new().with("type", "keyword").with("ignore_above", 256);
        let right = MappingTree::new().with("ignore_above", 256).with("type", "keyword");
        assert_eq!(left, right);
    }

    #[test]
    fn test_equality_is_field_for_field() {
        let base = MappingTree::new().with("type", "keyword").with("ignore_above", 256);
        let extra = base.clone().with("norms", false);
        assert_ne!(base, extra);
        assert_ne!(extra, base);
    }

    #[test]
    fn test_wide_object_keeps_order_and_lookups() {
        let width = 20_000;
        let body = (0..width)
            .map(|i| format!(r#""f{i}": {{"type": "keyword", "ignore_above": {i}}}"#))
            .collect::<Vec<_>>()
            .join(",");
        let tree: MappingTree = serde_json::from_str(&format!("{{{body}}}")).unwrap();

        assert_eq!(tree.len(), width);
        assert_eq!(tree.keys().next(), Some("f0"));
        assert_eq!(tree.keys().last(), Some("f19999"));
        let last = tree.get("f19999").and_then(|f| f.get("ignore_above"));
        assert_eq!(last, Some(&MappingValue::Int(19_999)));
        assert!(tree.get("f20000").is_none());
    }

    #[test]
    fn test_duplicate_key_in_document_keeps_last_value() {
        let tree: MappingTree = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(tree.get("a"), Some(&MappingValue::Int(3)));
    }

    #[test]
    fn test_deserialize_rejects_non_tree() {
        assert!(serde_json::from_str::<MappingTree>("[1, 2]").is_err());
        let tree: MappingTree = serde_json::from_str(r#"{"k": "v"}"#).unwrap();
        assert_eq!(tree.get("k").and_then(MappingValue::as_str), Some("v"));
    }
}
