//! Audit configuration.
//!
//! ```json
//! { "checks": ["dynamic_mapping", "index_name"], "include_hidden": false }
//! ```
//!
//! Missing fields take their defaults: every built-in check, hidden
//! indices skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checks::CheckKind;
use crate::loader::LoadOptions;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Checks to run, in order.
    pub checks: Vec<CheckKind>,
    /// Audit indices whose name starts with `.`.
    pub include_hidden: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            checks: CheckKind::ALL.to_vec(),
            include_hidden: false,
        }
    }
}

impl AuditConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: AuditConfig = serde_json::from_str(text)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// An empty check list would silently audit nothing.
    pub fn validate(&self) -> Result<()> {
        if self.checks.is_empty() {
            return Err(Error::Config("at least one check must be enabled".into()));
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            include_hidden: self.include_hidden,
        }
    }
}
