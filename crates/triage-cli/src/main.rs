//! Triage CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use triage_cli::cli::Cli;
use triage_cli::commands;
use triage_cli::config::TriageConfig;

fn main() {
    // Load .env.local if it exists (for TRIAGE_* overrides)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::Result<()> {
    let overrides = cli.command.overrides();
    let config = TriageConfig::load(cli.config.as_deref(), &overrides)?;
    tracing::debug!(?config, "Resolved configuration");

    let output = commands::execute(cli.command, &config)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
