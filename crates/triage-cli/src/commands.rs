//! Command handlers for CLI subcommands.

use std::path::Path;

use tracing::info;
use triage_allocation::{AllocationPlanner, CategoryTally};
use triage_persistence::{atomic_write_json, read_issues, read_roster};

use crate::cli::Commands;
use crate::config::TriageConfig;
use crate::render::{render_report, render_tally, render_teams};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Executes a CLI command and returns the text to print.
pub fn execute(command: Commands, config: &TriageConfig) -> Result<String> {
    match command {
        Commands::Tally { issues, .. } => cmd_tally(&issues, config),
        Commands::Allocate {
            issues,
            roster,
            output,
            ..
        } => cmd_allocate(&issues, &roster, output.as_deref(), config),
        Commands::Teams { roster, .. } => cmd_teams(&roster, config),
    }
}

fn cmd_tally(issues_path: &Path, config: &TriageConfig) -> Result<String> {
    let issues = read_issues(issues_path)?;
    let tally = tally(&issues, config);
    Ok(render_tally(&tally, config.report.format, config.report.pretty)?)
}

fn cmd_allocate(
    issues_path: &Path,
    roster_path: &Path,
    output: Option<&Path>,
    config: &TriageConfig,
) -> Result<String> {
    let issues = read_issues(issues_path)?;
    let teams = read_roster(roster_path)?;
    let tally = tally(&issues, config);

    let planner = AllocationPlanner::new().with_parallel(config.allocation.parallel);
    let report = planner.plan(&tally, teams)?;

    match output {
        Some(path) => {
            atomic_write_json(path, &report, config.report.pretty)?;
            info!(path = %path.display(), run_id = %report.run_id, "Wrote allocation report");
            Ok(format!(
                "Allocated {} issue(s) across {} team(s); report written to {}",
                tally.total(),
                report.teams.len(),
                path.display()
            ))
        }
        None => Ok(render_report(&report, config.report.format, config.report.pretty)?),
    }
}

fn cmd_teams(roster_path: &Path, config: &TriageConfig) -> Result<String> {
    let teams = read_roster(roster_path)?;
    Ok(render_teams(&teams, config.report.format, config.report.pretty)?)
}

fn tally(issues: &[triage_models::ClassifiedIssue], config: &TriageConfig) -> CategoryTally {
    if config.allocation.parallel {
        CategoryTally::from_issues_parallel(issues)
    } else {
        CategoryTally::from_issues(issues)
    }
}
