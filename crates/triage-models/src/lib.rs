//! Core data models for issue triage.
//!
//! This crate provides the types shared by every triage crate: classified
//! issues, team rosters, the per-member allocation ledger and the report
//! produced by an allocation run.

pub mod ids;
pub mod issue;
pub mod report;
pub mod team;

// Re-export main types
pub use ids::{IssueId, MemberKey, RunId, TeamId};
pub use issue::{is_known_team, ClassifiedIssue, IssuePriority, KNOWN_TEAMS};
pub use report::{AllocationReport, TeamReport};
pub use team::{Ledger, LedgerEntry, Member, Team};
