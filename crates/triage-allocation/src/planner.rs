//! AllocationPlanner - runs the distribution engine for every team.
//!
//! Each team owns its roster for the duration of its allocation, so teams can
//! be handed to separate rayon workers without any shared mutable state.

use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;
use tracing::{info, warn};
use triage_models::{AllocationReport, Team, TeamReport};

use crate::engine::distribute;
use crate::error::{AllocationError, Result};
use crate::tally::CategoryTally;

/// Composes the category tally with per-team distribution.
#[derive(Debug, Clone)]
pub struct AllocationPlanner {
    parallel: bool,
}

impl Default for AllocationPlanner {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl AllocationPlanner {
    /// Creates a planner that allocates teams in parallel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables parallel allocation across teams.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Allocates every team's tallied issues and assembles the run report.
    ///
    /// Teams appear in the report in input order regardless of parallelism.
    /// The first failing team aborts the run; no partial report is returned.
    pub fn plan(&self, tally: &CategoryTally, teams: Vec<Team>) -> Result<AllocationReport> {
        check_unique_names(&teams)?;

        for (category, count) in tally.iter() {
            info!(category = %category, count = count, "Category count");
        }

        let unrouted = unrouted_categories(tally, &teams);
        for (category, count) in &unrouted {
            warn!(category = %category, count = count, "No team for category");
        }

        // Either mode reports the first failure in roster order.
        let team_reports = if self.parallel {
            teams
                .into_par_iter()
                .map(|team| allocate_team(tally, team))
                .collect::<Vec<Result<TeamReport>>>()
                .into_iter()
                .collect::<Result<Vec<_>>>()?
        } else {
            teams
                .into_iter()
                .map(|team| allocate_team(tally, team))
                .collect::<Result<Vec<_>>>()?
        };

        let mut report = AllocationReport::new(tally.as_map().clone());
        report.teams = team_reports;
        report.unrouted = unrouted;

        info!(
            run_id = %report.run_id,
            teams = report.teams.len(),
            issues = tally.total(),
            "Allocation run complete"
        );

        Ok(report)
    }
}

fn allocate_team(tally: &CategoryTally, mut team: Team) -> Result<TeamReport> {
    let total_issues = i64::try_from(tally.count(&team.name)).unwrap_or(i64::MAX);
    let ledger = distribute(&mut team, total_issues)?;
    Ok(TeamReport::new(team, total_issues, ledger))
}

fn check_unique_names(teams: &[Team]) -> Result<()> {
    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.name.as_str()) {
            return Err(AllocationError::InvalidRoster {
                team: team.name.clone(),
                reason: "team name appears more than once".to_string(),
            });
        }
    }
    Ok(())
}

/// Tallied categories that no team in `teams` is named after.
fn unrouted_categories(tally: &CategoryTally, teams: &[Team]) -> BTreeMap<String, usize> {
    let names: HashSet<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    tally
        .iter()
        .filter(|(category, _)| !names.contains(category))
        .map(|(category, count)| (category.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_models::{ClassifiedIssue, LedgerEntry, Member};

    fn tally(categories: &[&str]) -> CategoryTally {
        let issues: Vec<_> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| ClassifiedIssue::new(i.to_string(), *c))
            .collect();
        CategoryTally::from_issues(&issues)
    }

    fn roster() -> Vec<Team> {
        vec![
            Team::new("T1", "Server_Team")
                .with_member("alice", 2)
                .with_member("bob", 0),
            Team::new("T2", "Voice_Team").with_member("carol", 1),
            Team::new("T3", "Data_Team")
                .with_member("dave", 0)
                .with_member("erin", 0),
        ]
    }

    #[test]
    fn test_plan_allocates_each_team_its_count() {
        let tally = tally(&["Server_Team", "Server_Team", "Server_Team", "Voice_Team"]);
        let report = AllocationPlanner::new().plan(&tally, roster()).unwrap();

        let server = report.team("Server_Team").unwrap();
        assert_eq!(server.total_issues, 3);
        // bob (0) sorts first and takes the double share.
        assert_eq!(server.members[0].current_load, 3);
        assert_eq!(server.members[1].current_load, 2);
        assert_eq!(
            server.ledger.get("bob"),
            Some(&LedgerEntry { before: 0, after: 2 })
        );

        let voice = report.team("Voice_Team").unwrap();
        assert_eq!(voice.members[0].current_load, 2);
    }

    #[test]
    fn test_team_without_issues_has_empty_ledger() {
        let tally = tally(&["Voice_Team"]);
        let report = AllocationPlanner::new().plan(&tally, roster()).unwrap();

        let data = report.team("Data_Team").unwrap();
        assert_eq!(data.total_issues, 0);
        assert!(data.ledger.is_empty());
    }

    #[test]
    fn test_report_keeps_roster_order() {
        let report = AllocationPlanner::new()
            .plan(&tally(&["Data_Team"]), roster())
            .unwrap();

        let names: Vec<_> = report.teams.iter().map(|t| t.team_name.as_str()).collect();
        assert_eq!(names, vec!["Server_Team", "Voice_Team", "Data_Team"]);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let tally = tally(&[
            "Server_Team",
            "Data_Team",
            "Data_Team",
            "Voice_Team",
            "Data_Team",
        ]);

        let parallel = AllocationPlanner::new().plan(&tally, roster()).unwrap();
        let sequential = AllocationPlanner::new()
            .with_parallel(false)
            .plan(&tally, roster())
            .unwrap();

        assert_eq!(parallel.teams, sequential.teams);
    }

    #[test]
    fn test_unrouted_categories_are_reported() {
        let tally = tally(&["Voice_Team", "Miscellaneous", "", "Miscellaneous"]);
        let report = AllocationPlanner::new().plan(&tally, roster()).unwrap();

        assert_eq!(report.unrouted.get("Miscellaneous"), Some(&2));
        assert_eq!(report.unrouted.get(""), Some(&1));
        assert!(!report.unrouted.contains_key("Voice_Team"));
        assert_eq!(report.tally.get("Voice_Team"), Some(&1));
    }

    #[test]
    fn test_empty_team_with_issues_fails_run() {
        let mut teams = roster();
        teams.push(Team::new("T4", "Storage_Team"));

        let err = AllocationPlanner::new()
            .plan(&tally(&["Storage_Team"]), teams)
            .unwrap_err();
        assert!(
            matches!(err, AllocationError::InvalidRoster { ref team, .. } if team == "Storage_Team")
        );
    }

    #[test]
    fn test_parallel_failure_is_first_in_roster_order() {
        // Server_Team takes longest to validate; Voice_Team fails immediately.
        let mut server = Team::new("T1", "Server_Team");
        server.members = (0..100_000).map(|i| Member::new(format!("m{}", i), 0)).collect();
        server.members.push(Member::new("m0", 0));
        let teams = vec![server, Team::new("T2", "Voice_Team")];
        let tally = tally(&["Server_Team", "Voice_Team"]);

        for parallel in [true, false] {
            let err = AllocationPlanner::new()
                .with_parallel(parallel)
                .plan(&tally, teams.clone())
                .unwrap_err();
            let failed_team = match err {
                AllocationError::InvalidRoster { ref team, .. } => team.as_str(),
                ref other => panic!("parallel={}: unexpected error {}", parallel, other),
            };
            assert_eq!(failed_team, "Server_Team", "parallel={}", parallel);
        }
    }

    #[test]
    fn test_duplicate_team_names_rejected() {
        let mut teams = roster();
        teams.push(Team::new("T9", "Voice_Team").with_member("zed", 0));

        let err = AllocationPlanner::new()
            .plan(&tally(&["Voice_Team"]), teams)
            .unwrap_err();
        assert!(matches!(err, AllocationError::InvalidRoster { .. }));
    }
}
