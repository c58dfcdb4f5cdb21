//! Roster document loading.
//!
//! ```text
//! {
//!   "teams": [
//!     { "id": "T1", "name": "Server_Team",
//!       "members": [ { "key": "alice", "current_load": 3 } ] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_models::Team;

use crate::atomic::read_json;
use crate::error::Result;

/// On-disk shape of a roster file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterDocument {
    pub teams: Vec<Team>,
}

/// Reads every team from a roster document, keeping file order.
pub fn read_roster(path: &Path) -> Result<Vec<Team>> {
    let document: RosterDocument = read_json(path)?;
    debug!(
        path = %path.display(),
        teams = document.teams.len(),
        "Loaded roster"
    );
    Ok(document.teams)
}
