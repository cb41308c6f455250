//! # Audit Checks
//!
//! Every check walks the same `IndexList` and reports through an
//! `AuditLogger`. Checks hold no state between runs and never mutate
//! their input, so they can run in any order.
//!
//! ## Built-in checks
//!
//! | Check | Name | Finds |
//! |-------|------|-------|
//! | `DynamicMappingCheck` | `dynamic_mapping` | fields left in the engine's default dynamic shape |
//! | `IndexNameCheck` | `index_name` | index names dated `YYYY-MM-DD` instead of `YYYY.MM.DD` |

pub mod dynamic_mapping;
pub mod index_name;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logger::AuditLogger;
use crate::model::IndexList;
use crate::{Error, Result};

pub use dynamic_mapping::{DynamicMappingCheck, dynamic_mappings, is_default_dynamic_fields};
pub use index_name::{IndexNameCheck, has_dashed_date};

// ============================================================================
// Check trait
// ============================================================================

/// The contract between the auditor and a single check.
pub trait Check: Send + Sync {
    /// Stable identifier, also used on the command line and in config.
    fn name(&self) -> &'static str;

    /// Inspect every index in `index_list`, logging findings to `logger`.
    fn check(&self, index_list: &IndexList, logger: &dyn AuditLogger);
}

// ============================================================================
// Built-in check registry
// ============================================================================

/// Identifier for one of the built-in checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    DynamicMapping,
    IndexName,
}

impl CheckKind {
    /// Every built-in check, in default run order.
    pub const ALL: [CheckKind; 2] = [CheckKind::DynamicMapping, CheckKind::IndexName];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::DynamicMapping => DynamicMappingCheck::NAME,
            CheckKind::IndexName => IndexNameCheck::NAME,
        }
    }

    pub fn build(&self) -> Box<dyn Check> {
        match self {
            CheckKind::DynamicMapping => Box::new(DynamicMappingCheck),
            CheckKind::IndexName => Box::new(IndexNameCheck),
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace('-', "_");
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownCheck(s.to_owned()))
    }
}
