//! Build an `IndexList` from metadata that has already been fetched.
//!
//! Two inputs are understood:
//!
//! ```text
//! GET _mapping body     { "<index>": { "mappings": { ... } }, ... }
//! grouped snapshot      [ { "name": "<group>", "indices": [ { "name", "mapping" } ] } ]
//! ```
//!
//! Mapping bodies are grouped by index name with any trailing date
//! stripped, so `logs-2024.01.01` and `logs-2024.01.02` land in `logs`.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Index, IndexGroup, IndexList, MappingTree, MappingValue};
use crate::{Error, Result};

/// Trailing `YYYY.MM.DD` / `YYYY-MM-DD`, with an optional leading separator.
static TRAILING_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-_.]?[0-9]{4}[-.][0-9]{2}[-.][0-9]{2}$").expect("Invalid trailing date regex pattern")
});

/// Options for turning a mapping body into an `IndexList`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Keep indices whose name starts with `.`.
    pub include_hidden: bool,
}

/// Group key for an index name: the name without its trailing date.
pub fn group_name(index_name: &str) -> &str {
    match TRAILING_DATE_PATTERN.find(index_name) {
        Some(m) if m.start() > 0 => &index_name[..m.start()],
        _ => index_name,
    }
}

impl IndexList {
    /// Parse a `GET _mapping` response body.
    pub fn from_mapping_response(text: &str, options: &LoadOptions) -> Result<Self> {
        let body: MappingValue = serde_json::from_str(text)?;
        Self::from_mapping_value(body, options)
    }

    /// Same as [`IndexList::from_mapping_response`], for an already decoded body.
    pub fn from_mapping_value(body: MappingValue, options: &LoadOptions) -> Result<Self> {
        let body = match body {
            MappingValue::Tree(tree) => tree,
            other => {
                return Err(Error::InvalidMetadata(format!(
                    "mapping response must be an object, got {}",
                    other.type_name()
                )));
            }
        };

        let mut list = IndexList::new();
        let mut skipped = 0usize;
        for (name, entry) in body.iter() {
            let Some(entry) = entry.as_tree() else {
                return Err(Error::InvalidMetadata(format!(
                    "entry for index {name} must be an object, got {}",
                    entry.type_name()
                )));
            };

            let index = Index::new(name).with_mapping(
                entry
                    .get("mappings")
                    .cloned()
                    .unwrap_or_else(|| MappingValue::Tree(MappingTree::new())),
            );
            if index.is_hidden() && !options.include_hidden {
                skipped += 1;
                continue;
            }
            list.push(group_name(name), index);
        }

        tracing::debug!(
            indices = list.index_count(),
            groups = list.group_count(),
            skipped,
            "loaded mapping response"
        );
        Ok(list)
    }

    /// Parse the grouped snapshot format. Hidden indices are dropped unless
    /// `include_hidden` is set; a group left with no indices goes with them.
    pub fn from_snapshot_str(text: &str, options: &LoadOptions) -> Result<Self> {
        let snapshot: IndexList = serde_json::from_str(text)?;
        if options.include_hidden {
            return Ok(snapshot);
        }

        let mut list = IndexList::new();
        let mut skipped = 0usize;
        for group in Vec::<IndexGroup>::from(snapshot) {
            for index in group.indices {
                if index.is_hidden() {
                    skipped += 1;
                    continue;
                }
                list.push(group.name.as_str(), index);
            }
        }

        tracing::debug!(
            indices = list.index_count(),
            groups = list.group_count(),
            skipped,
            "loaded snapshot"
        );
        Ok(list)
    }
}
