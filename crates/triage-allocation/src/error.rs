//! Error types for allocation operations.

use thiserror::Error;

/// Errors that can occur while distributing a team's issues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// Roster cannot receive the requested issues.
    #[error("invalid roster for team {team}: {reason}")]
    InvalidRoster { team: String, reason: String },

    /// A count or load below zero was supplied.
    #[error("negative count for team {team}: {what} is {value}")]
    NegativeCount {
        team: String,
        what: String,
        value: i64,
    },
}

/// Result type alias for allocation operations.
pub type Result<T> = std::result::Result<T, AllocationError>;
