//! Workload distribution engine.
//!
//! Hands a team's new issues out across its roster in rounds:
//!
//! - The roster is stable-sorted ascending by current load once, up front.
//!   The order is not recomputed as loads change.
//! - Each round walks the sorted roster. The first (least loaded) member gets
//!   a double share whenever the running assigned count is a multiple of the
//!   roster size; everyone else gets one issue, capped by what remains.
//! - Every visit records a `before`/`after` pair for the member, replacing
//!   the pair from any earlier round. Members visited after the issues run
//!   out record an unchanged pair.
//!
//! With a single member the assigned count is always a multiple of one, so
//! that member always receives the double share.

use std::collections::HashSet;

use tracing::{debug, info};
use triage_models::{Ledger, LedgerEntry, Member, Team};

use crate::error::{AllocationError, Result};

/// Share granted to the first member of the sorted roster at a round boundary.
pub const DOUBLE_SHARE: i64 = 2;

/// Share granted on every other visit.
pub const SINGLE_SHARE: i64 = 1;

/// Distributes `total_issues` across `team`, updating member loads in place.
///
/// Returns the ledger of the last recorded transition per member. On error
/// the roster is left untouched.
pub fn distribute(team: &mut Team, total_issues: i64) -> Result<Ledger> {
    validate(team, total_issues)?;

    if total_issues == 0 {
        debug!(team = %team.name, "No issues to distribute");
        return Ok(Ledger::new());
    }

    let order = sorted_order(&team.members);
    let roster_size = order.len() as i64;
    let mut last_visit = vec![LedgerEntry { before: 0, after: 0 }; order.len()];

    let mut remaining = total_issues;
    let mut assigned: i64 = 0;
    let mut rounds: u64 = 0;

    while remaining > 0 {
        rounds += 1;
        for (idx, &member_idx) in order.iter().enumerate() {
            let member = &mut team.members[member_idx];
            let before = member.current_load;

            if remaining > 0 {
                let share = if idx == 0 && assigned % roster_size == 0 {
                    DOUBLE_SHARE
                } else {
                    SINGLE_SHARE
                };
                let grant = remaining.min(share);
                member.current_load += grant;
                remaining -= grant;
                assigned += grant;
            }

            last_visit[idx] = LedgerEntry {
                before,
                after: member.current_load,
            };
        }

        debug!(
            team = %team.name,
            round = rounds,
            assigned = assigned,
            remaining = remaining,
            "Completed distribution round"
        );
    }

    let ledger = Ledger::from_entries(
        order
            .iter()
            .zip(last_visit)
            .map(|(&member_idx, entry)| (team.members[member_idx].key.clone(), entry)),
    );

    info!(
        team = %team.name,
        total_issues = total_issues,
        members = order.len(),
        rounds = rounds,
        "Distributed issues"
    );

    Ok(ledger)
}

/// Indices of `members` sorted ascending by load; ties keep input order.
pub fn sorted_order(members: &[Member]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..members.len()).collect();
    order.sort_by_key(|&i| members[i].current_load);
    order
}

/// Checks preconditions before any load is touched.
fn validate(team: &Team, total_issues: i64) -> Result<()> {
    if total_issues < 0 {
        return Err(AllocationError::NegativeCount {
            team: team.name.clone(),
            what: "total issues".to_string(),
            value: total_issues,
        });
    }

    if let Some(member) = team.members.iter().find(|m| m.current_load < 0) {
        return Err(AllocationError::NegativeCount {
            team: team.name.clone(),
            what: format!("load of member {}", member.key),
            value: member.current_load,
        });
    }

    if team.members.is_empty() && total_issues > 0 {
        return Err(AllocationError::InvalidRoster {
            team: team.name.clone(),
            reason: format!("no members to receive {} issue(s)", total_issues),
        });
    }

    let mut seen = HashSet::new();
    for member in &team.members {
        if !seen.insert(member.key.as_str()) {
            return Err(AllocationError::InvalidRoster {
                team: team.name.clone(),
                reason: format!("duplicate member {}", member.key),
            });
        }
        if member.current_load.checked_add(total_issues).is_none() {
            return Err(AllocationError::InvalidRoster {
                team: team.name.clone(),
                reason: format!("load of member {} would overflow", member.key),
            });
        }
    }

    Ok(())
}
