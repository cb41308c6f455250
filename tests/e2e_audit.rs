//! End-to-end tests for the audit pipeline.
//!
//! Each test exercises: mapping response -> IndexList -> Auditor -> logger.

use std::io;
use std::sync::Arc;

use opensearch_audit::{
    AuditConfig, Auditor, Check, CheckKind, CountingLogger, IndexList, LoadOptions, LogRecord,
    RecordingLogger, TracingLogger, AuditLogger,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

const MAPPING_RESPONSE: &str = r#"{
    "logs-2024-01-01": {"mappings": {"properties": {
        "user": {"type": "text", "fields": {"keyword": {"type": "keyword", "ignore_above": 256}}}
    }}},
    "logs-2024-01-02": {"mappings": {"properties": {
        "user": {"type": "keyword"}
    }}},
    "metrics.2024.01.01": {"mappings": {"properties": {
        "cpu": {"type": "float"}
    }}},
    ".tasks": {"mappings": {"properties": {
        "task": {"type": "text", "fields": {"keyword": {"type": "keyword", "ignore_above": 256}}}
    }}}
}"#;

fn load(options: LoadOptions) -> IndexList {
    IndexList::from_mapping_response(MAPPING_RESPONSE, &options).unwrap()
}

// ============================================================================
// 1. Default auditor runs both checks in order
// ============================================================================

#[test]
fn test_default_audit() {
    let list = load(LoadOptions::default());
    assert_eq!(list.group_count(), 2);

    let logger = RecordingLogger::new();
    Auditor::new().run(&list, &logger);

    assert_eq!(
        logger.records(),
        vec![
            LogRecord::warn("1 dynamic mappings detected in index logs-2024-01-01"),
            LogRecord::info("Field properties.user looks like a dynamic field to me"),
            LogRecord::warn("Prefer YYYY.MM.dd to YYYY-MM-dd for naming indices: logs-2024-01-01"),
            LogRecord::warn("Prefer YYYY.MM.dd to YYYY-MM-dd for naming indices: logs-2024-01-02"),
        ]
    );
}

// ============================================================================
// 2. Hidden indices are audited only on request
// ============================================================================

#[test]
fn test_include_hidden() {
    let list = load(LoadOptions { include_hidden: true });
    let logger = RecordingLogger::new();
    Auditor::with_kinds([CheckKind::DynamicMapping]).run(&list, &logger);

    assert_eq!(
        logger.warnings(),
        vec![
            "1 dynamic mappings detected in index logs-2024-01-01",
            "1 dynamic mappings detected in index .tasks",
        ]
    );
}

// ============================================================================
// 3. Config selects and orders checks
// ============================================================================

#[test]
fn test_config_selects_checks() {
    let config = AuditConfig::from_json_str(
        r#"{"checks": ["index_name", "dynamic_mapping", "index_name"]}"#,
    )
    .unwrap();
    let auditor = Auditor::from_config(&config);
    assert_eq!(auditor.check_names(), vec!["index_name", "dynamic_mapping"]);

    let logger = RecordingLogger::new();
    auditor.run(&load(config.load_options()), &logger);
    assert_eq!(
        logger.records()[0],
        LogRecord::warn("Prefer YYYY.MM.dd to YYYY-MM-dd for naming indices: logs-2024-01-01")
    );
}

// ============================================================================
// 4. Running twice gives identical output
// ============================================================================

#[test]
fn test_audit_is_idempotent() {
    let list = load(LoadOptions::default());
    let auditor = Auditor::new();

    let logger = RecordingLogger::new();
    auditor.run(&list, &logger);
    let first = logger.take();
    auditor.run(&list, &logger);
    assert_eq!(logger.take(), first);
}

// ============================================================================
// 5. Custom checks plug in next to the built-ins
// ============================================================================

struct GroupSizeCheck;

impl Check for GroupSizeCheck {
    fn name(&self) -> &'static str {
        "group_size"
    }

    fn check(&self, index_list: &IndexList, logger: &dyn AuditLogger) {
        for (group_name, indices) in index_list.iter() {
            logger.info(&format!("{group_name}: {} indices", indices.len()));
        }
    }
}

#[test]
fn test_custom_check() {
    let auditor = Auditor::empty().with_check(GroupSizeCheck);
    assert_eq!(auditor.check_names(), vec!["group_size"]);

    let logger = RecordingLogger::new();
    auditor.run(&load(LoadOptions::default()), &logger);
    assert_eq!(logger.infos(), vec!["logs: 2 indices", "metrics: 1 indices"]);
}

// ============================================================================
// 6. Counting logger sees every warning
// ============================================================================

#[test]
fn test_counting_logger() {
    let logger = CountingLogger::new(RecordingLogger::new());
    Auditor::new().run(&load(LoadOptions::default()), &logger);
    assert_eq!(logger.warnings(), 3);
}

// ============================================================================
// 7. Snapshot format
// ============================================================================

#[test]
fn test_snapshot_input() {
    let snapshot = r#"[
        {"name": "orders", "indices": [
            {"name": "orders-2023-12-31", "mapping": {"id": {"type": "keyword"}}}
        ]}
    ]"#;
    let list = IndexList::from_snapshot_str(snapshot, &LoadOptions::default()).unwrap();
    let logger = RecordingLogger::new();
    Auditor::new().run(&list, &logger);
    assert_eq!(
        logger.warnings(),
        vec!["Prefer YYYY.MM.dd to YYYY-MM-dd for naming indices: orders-2023-12-31"]
    );
}

// ============================================================================
// 8. TracingLogger emits at the matching tracing levels
// ============================================================================

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_tracing_logger_levels() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        Auditor::with_kinds([CheckKind::DynamicMapping])
            .run(&load(LoadOptions::default()), &TracingLogger);
    });

    let text = String::from_utf8(sink.0.lock().clone()).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("1 dynamic mappings detected in index logs-2024-01-01"));
    assert!(lines[0].contains("dynamic_mapping"));
    assert!(lines[1].contains("INFO"));
    assert!(lines[1].contains("Field properties.user looks like a dynamic field to me"));
}
