//! Dynamic mapping detection.
//!
//! When a document introduces a string field the index mapping does not
//! know, the engine maps it as `text` with a `keyword` sub-field capped at
//! 256 characters. Finding that exact `fields` block means nobody wrote the
//! mapping for the field.

use std::sync::LazyLock;

use smallvec::SmallVec;

use super::Check;
use crate::logger::AuditLogger;
use crate::model::{IndexList, MappingTree, MappingValue};

/// `{"keyword": {"type": "keyword", "ignore_above": 256}}`
static DEFAULT_DYNAMIC_FIELDS: LazyLock<MappingValue> = LazyLock::new(|| {
    MappingValue::Tree(MappingTree::new().with(
        "keyword",
        MappingTree::new().with("type", "keyword").with("ignore_above", 256),
    ))
});

/// Path of keys from the mapping root; most real mappings stay shallow.
type KeyPath<'a> = SmallVec<[&'a str; 8]>;

/// Logs every field whose mapping has the default dynamic shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicMappingCheck;

impl DynamicMappingCheck {
    pub const NAME: &'static str = "dynamic_mapping";
}

impl Check for DynamicMappingCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, index_list: &IndexList, logger: &dyn AuditLogger) {
        for (_group_name, indices) in index_list.iter() {
            for index in indices {
                let offenses = dynamic_mappings(&index.mapping);
                if offenses.is_empty() {
                    continue;
                }
                logger.warn(&format!(
                    "{} dynamic mappings detected in index {}",
                    offenses.len(),
                    index.name
                ));
                for field in &offenses {
                    logger.info(&format!("Field {field} looks like a dynamic field to me"));
                }
            }
        }
    }
}

/// True if `fields` is exactly the engine's default keyword sub-field.
pub fn is_default_dynamic_fields(fields: &MappingValue) -> bool {
    *fields == *DEFAULT_DYNAMIC_FIELDS
}

/// Dot-joined paths of every subtree of `mapping` that carries the default
/// dynamic `fields` block.
///
/// Depth-first, in tree order. A matching subtree is not searched any
/// further. Leaves and lists contribute nothing. A match on `mapping`
/// itself is reported as the empty path.
pub fn dynamic_mappings(mapping: &MappingValue) -> Vec<String> {
    let mut offenses = Vec::new();
    let mut path = KeyPath::new();
    collect(mapping, &mut path, &mut offenses);
    offenses
}

fn collect<'a>(node: &'a MappingValue, path: &mut KeyPath<'a>, offenses: &mut Vec<String>) {
    let MappingValue::Tree(tree) = node else {
        return;
    };

    if tree.get("fields").is_some_and(is_default_dynamic_fields) {
        offenses.push(path.join("."));
        return;
    }

    for (key, child) in tree.iter() {
        path.push(key);
        collect(child, path, offenses);
        path.pop();
    }
}
