//! # opensearch-audit — Index Metadata Audits
//!
//! Lints already-fetched OpenSearch / Elasticsearch index metadata for two
//! smells: fields that were mapped dynamically by the engine, and index
//! names dated `YYYY-MM-DD` instead of `YYYY.MM.DD`.
//!
//! ## Design Principles
//!
//! 1. **Checks are pure readers**: they never mutate the `IndexList`
//! 2. **Logger is explicit**: every check writes to the `&dyn AuditLogger` it is handed
//! 3. **Mappings are a tagged tree**: `MappingValue` is either a `Tree` or a leaf
//! 4. **No cluster client**: metadata arrives as JSON, fetched by someone else
//!
//! ## Quick Start
//!
//! ```rust
//! use opensearch_audit::{Auditor, IndexList, LoadOptions, RecordingLogger};
//!
//! # fn example() -> opensearch_audit::Result<()> {
//! let body = r#"{
//!     "logs-2024-01-01": {"mappings": {"properties": {"user": {
//!         "type": "text",
//!         "fields": {"keyword": {"type": "keyword", "ignore_above": 256}}
//!     }}}}
//! }"#;
//! let index_list = IndexList::from_mapping_response(body, &LoadOptions::default())?;
//!
//! let logger = RecordingLogger::new();
//! Auditor::new().run(&index_list, &logger);
//!
//! assert_eq!(logger.warnings().len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Checks
//!
//! | Check | Name | Description |
//! |-------|------|-------------|
//! | `DynamicMappingCheck` | `dynamic_mapping` | Default keyword sub-field left by dynamic mapping |
//! | `IndexNameCheck` | `index_name` | Dash-delimited date in the index name |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod checks;
pub mod logger;
pub mod config;
pub mod loader;
#[cfg(feature = "cli")]
pub mod cli;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Index, IndexGroup, IndexList, MappingTree, MappingValue};

// ============================================================================
// Re-exports: Checks
// ============================================================================

pub use checks::{
    Check, CheckKind, DynamicMappingCheck, IndexNameCheck,
    dynamic_mappings, has_dashed_date,
};

// ============================================================================
// Re-exports: Logging, Config, Loading
// ============================================================================

pub use logger::{AuditLogger, CountingLogger, Level, LogRecord, RecordingLogger, TracingLogger};
pub use config::AuditConfig;
pub use loader::{LoadOptions, group_name};

// ============================================================================
// Top-level Auditor handle
// ============================================================================

/// The primary entry point. An `Auditor` owns an ordered set of checks
/// and runs them over an `IndexList`.
pub struct Auditor {
    checks: Vec<Box<dyn Check>>,
}

impl Auditor {
    /// Auditor running every built-in check.
    pub fn new() -> Self {
        Self::with_kinds(CheckKind::ALL)
    }

    /// Auditor with no checks; add them with [`Auditor::with_check`].
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Auditor running the given built-in checks in order. A kind listed
    /// twice runs once, at its first position.
    pub fn with_kinds(kinds: impl IntoIterator<Item = CheckKind>) -> Self {
        let mut seen = Vec::new();
        let mut auditor = Self::empty();
        for kind in kinds {
            if seen.contains(&kind) {
                continue;
            }
            seen.push(kind);
            auditor.checks.push(kind.build());
        }
        auditor
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::with_kinds(config.checks.iter().copied())
    }

    /// Append a check (built-in or custom).
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Names of the configured checks, in run order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check once, in order.
    pub fn run(&self, index_list: &IndexList, logger: &dyn AuditLogger) {
        tracing::debug!(
            checks = self.checks.len(),
            groups = index_list.group_count(),
            indices = index_list.index_count(),
            "starting audit"
        );
        for check in &self.checks {
            let _span = tracing::info_span!("check", name = check.name()).entered();
            tracing::debug!("running check");
            check.check(index_list, logger);
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Auditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auditor").field("checks", &self.check_names()).finish()
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid index metadata: {0}")]
    InvalidMetadata(String),

    #[error("Unknown check: {0}")]
    UnknownCheck(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
