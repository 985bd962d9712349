//! Advisory Flags Binary
//!
//! Runs a rule set over a snapshot and prints the flag report as JSON.
//!
//! # Usage
//!
//! ```bash
//! advisory-flags flags <domain> [snapshot.json]   # stdin when no file or "-"
//! advisory-flags rebalance-result <result.json>
//! advisory-flags domains
//! advisory-flags --help
//! ```
//!
//! # Environment Variables
//!
//! - `ADVISORY_CONFIG`: config file path when `--config` is not given (default: config.yaml)
//! - `RUST_LOG`: log filter, overrides the configured level

use std::path::Path;

use advisory_flags::application::{read_json, render_json};
use advisory_flags::cli::{Cli, Commands};
use advisory_flags::config::{Config, load_config};
use advisory_flags::telemetry::init_logging;
use advisory_flags::{FlagDomain, FlagReport, RebalanceResult, generate_flags};
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_ref().map(|p| p.to_string_lossy().into_owned());
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;
    init_logging(&config.observability.logging).context("failed to initialize logging")?;
    tracing::info!(
        command = ?cli.command,
        log_format = ?config.observability.logging.format,
        "advisory-flags starting"
    );

    let rendered = match &cli.command {
        Commands::Flags { domain, path } => flags(*domain, path.as_deref(), &config)?,
        Commands::RebalanceResult { path } => rebalance_result(path, &config)?,
        Commands::Domains => render_json(&FlagDomain::ALL, &config.output)?,
    };

    println!("{rendered}");
    Ok(())
}

fn flags(domain: FlagDomain, path: Option<&Path>, config: &Config) -> Result<String> {
    let snapshot: serde_json::Value =
        read_json(path).with_context(|| format!("failed to read {domain} snapshot"))?;
    let mut report = FlagReport::new(domain, generate_flags(domain, &snapshot));
    if !config.output.include_counts {
        report = report.without_counts();
    }
    Ok(render_json(&report, &config.output)?)
}

fn rebalance_result(path: &Path, config: &Config) -> Result<String> {
    let result: RebalanceResult = read_json(Some(path))
        .with_context(|| format!("failed to read rebalance result '{}'", path.display()))?;
    let agent_snapshot = result.get_agent_snapshot();
    let flags = generate_flags(FlagDomain::Rebalance, &agent_snapshot);
    tracing::info!(
        status = %result.status(),
        legs = result.legs().len(),
        flag_count = flags.len(),
        "rebalance result interpreted"
    );
    let output = json!({
        "agent_snapshot": agent_snapshot,
        "api_response": result.to_api_response(),
        "flags": flags,
    });
    Ok(render_json(&output, &config.output)?)
}
