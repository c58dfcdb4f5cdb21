//! Persistence layer for triage.
//!
//! Reads the roster and classified-issue inputs into typed records, failing
//! on the first malformed record, and writes allocation reports atomically
//! (write to temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use triage_persistence::{atomic_write_json, read_issues, read_roster};
//!
//! let teams = read_roster(Path::new("teams.json")).unwrap();
//! let issues = read_issues(Path::new("issues.jsonl")).unwrap();
//! atomic_write_json(Path::new("out/teams.json"), &teams, true).unwrap();
//! # let _ = issues;
//! ```

pub mod atomic;
pub mod error;
pub mod issues;
pub mod roster;

pub use atomic::{atomic_write_json, read_json};
pub use error::{PersistenceError, Result};
pub use issues::{read_issues, IssueDocument, IssueFormat};
pub use roster::{read_roster, RosterDocument};
