//! opensearch-audit - run the index metadata audits over a JSON file
//!
//! Usage:
//!   curl -s localhost:9200/_mapping > mapping.json
//!   opensearch-audit mapping.json [--check dynamic_mapping] [--fail-on-warn]

use std::process::ExitCode;

use clap::Parser;
use opensearch_audit::TracingLogger;
use opensearch_audit::cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let outcome = cli.run(&TracingLogger)?;
    Ok(outcome.exit_code())
}
