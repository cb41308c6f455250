//! Command-line front end: argument parsing, config resolution and the
//! exit-status decision. `src/bin/opensearch-audit.rs` only wires this to
//! a `tracing` subscriber.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use crate::{AuditConfig, AuditLogger, Auditor, CheckKind, CountingLogger, IndexList};

#[derive(Debug, Parser)]
#[command(name = "opensearch-audit")]
#[command(about = "Audit index metadata for dynamic mappings and dash-dated index names")]
pub struct Cli {
    /// Metadata file to audit
    pub file: PathBuf,

    /// Layout of the metadata file
    #[arg(long, value_enum, default_value_t = InputFormat::Mapping)]
    pub format: InputFormat,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Check to run (repeatable); overrides the config file
    #[arg(long = "check", value_name = "NAME")]
    pub checks: Vec<String>,

    /// Include indices whose name starts with `.`, in either input format
    #[arg(long)]
    pub include_hidden: bool,

    /// Exit with status 1 if any warning was logged
    #[arg(long)]
    pub fail_on_warn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// `GET _mapping` response body
    Mapping,
    /// Grouped snapshot: `[{"name": ..., "indices": [...]}]`
    Snapshot,
}

/// What one run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub warnings: usize,
    pub failed: bool,
}

impl Outcome {
    /// Process status: 1 when the run failed, 0 otherwise.
    pub fn status(&self) -> u8 {
        u8::from(self.failed)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

impl Cli {
    /// Config file (or defaults), then `--check` and `--include-hidden` on top.
    pub fn resolve_config(&self) -> anyhow::Result<AuditConfig> {
        let mut config = match &self.config {
            Some(path) => AuditConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AuditConfig::default(),
        };

        if !self.checks.is_empty() {
            config.checks = self
                .checks
                .iter()
                .map(|name| name.parse::<CheckKind>())
                .collect::<Result<_, _>>()?;
        }
        if self.include_hidden {
            config.include_hidden = true;
        }
        Ok(config)
    }

    /// Load the metadata file, audit it into `logger`, and decide the outcome.
    pub fn run(&self, logger: &dyn AuditLogger) -> anyhow::Result<Outcome> {
        let config = self.resolve_config()?;
        let options = config.load_options();

        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let index_list = match self.format {
            InputFormat::Mapping => IndexList::from_mapping_response(&text, &options),
            InputFormat::Snapshot => IndexList::from_snapshot_str(&text, &options),
        }
        .with_context(|| format!("parsing {}", self.file.display()))?;

        let counting = CountingLogger::new(logger);
        Auditor::from_config(&config).run(&index_list, &counting);

        let warnings = counting.warnings();
        Ok(Outcome {
            warnings,
            failed: self.fail_on_warn && warnings > 0,
        })
    }
}
