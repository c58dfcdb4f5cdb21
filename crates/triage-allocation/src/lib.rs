//! Category tally and workload distribution for triage.
//!
//! This crate provides:
//! - `CategoryTally`: issue counts per category, sequential or across rayon
//! - `distribute`: the per-team distribution engine with its load ledger
//! - `AllocationPlanner`: runs the engine over every team and builds the report
//!
//! # Example
//!
//! ```
//! use triage_allocation::{distribute, AllocationPlanner, CategoryTally};
//! use triage_models::{ClassifiedIssue, Team};
//!
//! let issues = vec![
//!     ClassifiedIssue::new("1", "Voice_Team"),
//!     ClassifiedIssue::new("2", "Voice_Team"),
//! ];
//! let tally = CategoryTally::from_issues(&issues);
//!
//! let mut team = Team::new("T1", "Voice_Team").with_member("alice", 0);
//! let ledger = distribute(&mut team, tally.count("Voice_Team") as i64).unwrap();
//! assert_eq!(team.members[0].current_load, 2);
//! assert_eq!(ledger.get("alice").unwrap().after, 2);
//!
//! let teams = vec![Team::new("T1", "Voice_Team").with_member("alice", 0)];
//! let report = AllocationPlanner::new().plan(&tally, teams).unwrap();
//! assert_eq!(report.teams.len(), 1);
//! ```

pub mod engine;
pub mod error;
pub mod planner;
pub mod tally;

pub use engine::{distribute, sorted_order};
pub use error::{AllocationError, Result};
pub use planner::AllocationPlanner;
pub use tally::CategoryTally;
