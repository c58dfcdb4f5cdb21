//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CliOverrides, OutputFormat};

/// Version string with git hash and build date, e.g. "0.1.0 (abc1234, 2026-10-19)".
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("TRIAGE_GIT_HASH");
    const BUILD_DATE: &str = env!("TRIAGE_BUILD_DATE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Triage - distribute classified support issues across team rosters
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a config file (default: ./triage.toml if present)
    #[arg(short, long, env = "TRIAGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count classified issues per category
    Tally {
        /// Issue file (.json document or .jsonl records)
        #[arg(required = true)]
        issues: PathBuf,

        /// Output format (table, json, brief)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Distribute tallied issues across every team's roster
    Allocate {
        /// Issue file (.json document or .jsonl records)
        #[arg(required = true)]
        issues: PathBuf,

        /// Roster file with teams and current member loads
        #[arg(required = true)]
        roster: PathBuf,

        /// Write the JSON report here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Allocate teams one after another instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Output format (table, json, brief)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List teams in a roster file
    Teams {
        /// Roster file with teams and current member loads
        #[arg(required = true)]
        roster: PathBuf,

        /// Output format (table, json, brief)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

impl Commands {
    /// Config overrides carried by this command's flags.
    pub fn overrides(&self) -> CliOverrides {
        match self {
            Commands::Tally { format, .. } | Commands::Teams { format, .. } => CliOverrides {
                format: *format,
                ..CliOverrides::default()
            },
            Commands::Allocate {
                sequential,
                compact,
                format,
                ..
            } => CliOverrides {
                sequential: *sequential,
                compact: *compact,
                format: *format,
            },
        }
    }
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
