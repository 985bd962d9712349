//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::FlagDomain;

/// Advisory Flags - severity-ordered flags from analysis snapshots.
#[derive(Parser, Debug)]
#[command(name = "advisory-flags")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: $ADVISORY_CONFIG or config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run a domain rule set over a snapshot
    Flags {
        /// Analysis domain
        #[arg(value_enum)]
        domain: FlagDomain,
        /// Snapshot JSON file; stdin when omitted or "-"
        path: Option<PathBuf>,
    },

    /// Interpret a serialized rebalance result
    RebalanceResult {
        /// Rebalance result JSON file; "-" for stdin
        path: PathBuf,
    },

    /// List the flag domains
    Domains,
}
