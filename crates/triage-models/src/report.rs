//! Allocation report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{RunId, TeamId};
use crate::team::{Ledger, Member, Team};

/// Outcome of allocating one team's issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamReport {
    pub team_id: TeamId,
    pub team_name: String,

    /// Issues distributed across the team in this run.
    pub total_issues: i64,

    /// Roster with final loads, in input order.
    pub members: Vec<Member>,

    /// Last recorded load transition per member.
    pub ledger: Ledger,
}

impl TeamReport {
    /// Builds a report from an allocated team.
    pub fn new(team: Team, total_issues: i64, ledger: Ledger) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name,
            total_issues,
            members: team.members,
            ledger,
        }
    }

    /// Sum of final member loads.
    pub fn total_load(&self) -> i64 {
        self.members.iter().map(|m| m.current_load).sum()
    }
}

/// Report for a whole allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationReport {
    pub run_id: RunId,

    pub generated_at: DateTime<Utc>,

    /// Issue count per category.
    pub tally: BTreeMap<String, usize>,

    /// One entry per team, in roster order.
    pub teams: Vec<TeamReport>,

    /// Categories with issues but no matching team.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unrouted: BTreeMap<String, usize>,
}

impl AllocationReport {
    /// Creates an empty report stamped with a fresh run ID.
    pub fn new(tally: BTreeMap<String, usize>) -> Self {
        Self {
            run_id: RunId::new(),
            generated_at: Utc::now(),
            tally,
            teams: Vec::new(),
            unrouted: BTreeMap::new(),
        }
    }

    /// Finds a team's report by name.
    pub fn team(&self, name: &str) -> Option<&TeamReport> {
        self.teams.iter().find(|t| t.team_name == name)
    }
}
