//! Text rendering of tallies, rosters and allocation reports.

use std::fmt::Write;

use triage_allocation::CategoryTally;
use triage_models::{is_known_team, AllocationReport, Team};

use crate::config::OutputFormat;

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Renders category counts.
pub fn render_tally(
    tally: &CategoryTally,
    format: OutputFormat,
    pretty: bool,
) -> serde_json::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => out = to_json(tally.as_map(), pretty)?,
        OutputFormat::Table => {
            if tally.is_empty() {
                return Ok("No issues found.".to_string());
            }
            let _ = writeln!(out, "{:<24}  {:>6}", "CATEGORY", "ISSUES");
            let _ = writeln!(out, "{}", "-".repeat(32));
            for (category, count) in tally.iter() {
                let _ = writeln!(out, "{:<24}  {:>6}", display_category(category), count);
            }
            let _ = write!(out, "\n{} issue(s) in {} categories", tally.total(), tally.len());
        }
        OutputFormat::Brief => {
            for (category, count) in tally.iter() {
                let _ = writeln!(out, "{}\t{}", category, count);
            }
        }
    }
    Ok(out.trim_end().to_string())
}

/// Renders a roster listing.
pub fn render_teams(
    teams: &[Team],
    format: OutputFormat,
    pretty: bool,
) -> serde_json::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => out = to_json(&teams, pretty)?,
        OutputFormat::Table => {
            if teams.is_empty() {
                return Ok("No teams found.".to_string());
            }
            let _ = writeln!(
                out,
                "{:<12}  {:<24}  {:>7}  {:>6}",
                "ID", "NAME", "MEMBERS", "LOAD"
            );
            let _ = writeln!(out, "{}", "-".repeat(55));
            for team in teams {
                let marker = if is_known_team(&team.name) { "" } else { "  (unknown team)" };
                let _ = writeln!(
                    out,
                    "{:<12}  {:<24}  {:>7}  {:>6}{}",
                    truncate(team.id.as_str(), 12),
                    truncate(&team.name, 24),
                    team.members.len(),
                    team.total_load(),
                    marker
                );
            }
            let _ = write!(out, "\n{} team(s)", teams.len());
        }
        OutputFormat::Brief => {
            for team in teams {
                let _ = writeln!(out, "{}\t{}\t{}", team.id, team.name, team.members.len());
            }
        }
    }
    Ok(out.trim_end().to_string())
}

/// Renders an allocation report.
pub fn render_report(
    report: &AllocationReport,
    format: OutputFormat,
    pretty: bool,
) -> serde_json::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => out = to_json(report, pretty)?,
        OutputFormat::Table => {
            let _ = writeln!(out, "Run {} ({})", report.run_id, report.generated_at.to_rfc3339());
            for team in &report.teams {
                let _ = writeln!(
                    out,
                    "\n{} [{}]: {} new issue(s)",
                    team.team_name, team.team_id, team.total_issues
                );
                let _ = writeln!(
                    out,
                    "  {:<20}  {:>6}  {:>6}  {:>6}",
                    "MEMBER", "LOAD", "BEFORE", "AFTER"
                );
                for member in &team.members {
                    let (before, after) = match team.ledger.get(member.key.as_str()) {
                        Some(entry) => (entry.before.to_string(), entry.after.to_string()),
                        None => ("-".to_string(), "-".to_string()),
                    };
                    let _ = writeln!(
                        out,
                        "  {:<20}  {:>6}  {:>6}  {:>6}",
                        truncate(member.key.as_str(), 20),
                        member.current_load,
                        before,
                        after
                    );
                }
            }
            if !report.unrouted.is_empty() {
                let _ = writeln!(out, "\nUnrouted categories:");
                for (category, count) in &report.unrouted {
                    let _ = writeln!(out, "  {:<24}  {:>6}", display_category(category), count);
                }
            }
        }
        OutputFormat::Brief => {
            for team in &report.teams {
                for (member, entry) in team.ledger.iter() {
                    let _ = writeln!(
                        out,
                        "{}\t{}\t{}\t{}",
                        team.team_name, member, entry.before, entry.after
                    );
                }
            }
        }
    }
    Ok(out.trim_end().to_string())
}

fn display_category(category: &str) -> &str {
    if category.is_empty() {
        "(uncategorized)"
    } else {
        category
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
