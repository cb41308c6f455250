//! Index descriptor: a name plus its field mapping.

use serde::{Deserialize, Serialize};
use super::{MappingTree, MappingValue};

/// One index as seen by the checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    #[serde(default = "empty_mapping")]
    pub mapping: MappingValue,
}

fn empty_mapping() -> MappingValue {
    MappingValue::Tree(MappingTree::new())
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mapping: empty_mapping(),
        }
    }

    pub fn with_mapping(mut self, mapping: impl Into<MappingValue>) -> Self {
        self.mapping = mapping.into();
        self
    }

    /// Hidden (system) indices start with a dot.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
