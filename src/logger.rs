//! # Audit Logger
//!
//! The sink every check writes its findings to. Checks receive a
//! `&dyn AuditLogger` explicitly; nothing reaches for a global.
//!
//! | Logger | Description |
//! |--------|-------------|
//! | `TracingLogger` | Forwards to `tracing` under target `opensearch_audit` |
//! | `RecordingLogger` | Keeps every record in memory, in order |
//! | `CountingLogger` | Wraps another logger and counts warnings |

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Severity of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// A finding: one per offending index.
    Warn,
    /// Detail attached to the preceding warning.
    Info,
}

/// One emitted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

impl LogRecord {
    pub fn warn(message: impl Into<String>) -> Self {
        Self { level: Level::Warn, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: Level::Info, message: message.into() }
    }
}

/// Append-only two-level sink.
pub trait AuditLogger: Send + Sync {
    fn warn(&self, message: &str);
    fn info(&self, message: &str);

    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Warn => self.warn(message),
            Level::Info => self.info(message),
        }
    }
}

impl<L: AuditLogger + ?Sized> AuditLogger for &L {
    fn warn(&self, message: &str) { (**self).warn(message) }
    fn info(&self, message: &str) { (**self).info(message) }
}

// ============================================================================
// TracingLogger
// ============================================================================

/// Forwards records to the `tracing` dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl AuditLogger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "opensearch_audit", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "opensearch_audit", "{message}");
    }
}

// ============================================================================
// RecordingLogger
// ============================================================================

/// In-memory logger. Used by tests and by callers that want the findings
/// as data rather than as log output.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages_at(Level::Warn)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages_at(Level::Info)
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    fn messages_at(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }
}

impl AuditLogger for RecordingLogger {
    fn warn(&self, message: &str) {
        self.records.lock().push(LogRecord::warn(message));
    }

    fn info(&self, message: &str) {
        self.records.lock().push(LogRecord::info(message));
    }
}

// ============================================================================
// CountingLogger
// ============================================================================

/// Passes every record through to `inner` and counts the warnings.
#[derive(Debug, Default)]
pub struct CountingLogger<L> {
    inner: L,
    warnings: AtomicUsize,
}

impl<L: AuditLogger> CountingLogger<L> {
    pub fn new(inner: L) -> Self {
        Self { inner, warnings: AtomicUsize::new(0) }
    }

    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: AuditLogger> AuditLogger for CountingLogger<L> {
    fn warn(&self, message: &str) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        self.inner.warn(message);
    }

    fn info(&self, message: &str) {
        self.inner.info(message);
    }
}
