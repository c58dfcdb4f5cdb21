//! Classified issue records.
//!
//! Issues arrive already labelled with a category (the owning team) and a
//! priority. Only the category takes part in allocation; the remaining
//! fields are carried through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::IssueId;

/// Team names an issue may be classified into.
pub const KNOWN_TEAMS: &[&str] = &[
    "Server_Team",
    "Network_Team",
    "Storage_Team",
    "Voice_Team",
    "Data_Team",
    "Applications_Team",
    "General_Support",
    "Miscellaneous",
];

/// Returns true if `name` is one of [`KNOWN_TEAMS`].
pub fn is_known_team(name: &str) -> bool {
    KNOWN_TEAMS.contains(&name)
}

/// Priority label assigned by the classifier.
///
/// Labels outside `P1`..`P4` are kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum IssuePriority {
    P1,
    P2,
    P3,
    P4,
    #[default]
    Unlabelled,
    Unknown(String),
}

impl IssuePriority {
    /// Returns the label as written in issue records.
    pub fn as_label(&self) -> &str {
        match self {
            IssuePriority::P1 => "P1",
            IssuePriority::P2 => "P2",
            IssuePriority::P3 => "P3",
            IssuePriority::P4 => "P4",
            IssuePriority::Unlabelled => "",
            IssuePriority::Unknown(label) => label,
        }
    }
}

impl From<String> for IssuePriority {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "P1" => IssuePriority::P1,
            "P2" => IssuePriority::P2,
            "P3" => IssuePriority::P3,
            "P4" => IssuePriority::P4,
            "" => IssuePriority::Unlabelled,
            _ => IssuePriority::Unknown(label),
        }
    }
}

impl From<&str> for IssuePriority {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<IssuePriority> for String {
    fn from(priority: IssuePriority) -> Self {
        priority.as_label().to_string()
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// An issue after classification. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifiedIssue {
    /// Row identifier.
    pub id: IssueId,

    /// Tracker-side issue number.
    #[serde(default)]
    pub issue_id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub reported_time: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub description: String,

    /// Team the issue was classified into. May be any string, including empty.
    pub category: String,

    #[serde(default)]
    pub priority: IssuePriority,
}

impl ClassifiedIssue {
    /// Creates an issue with only an ID and a category.
    pub fn new(id: impl Into<IssueId>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            issue_id: String::new(),
            title: String::new(),
            reported_time: String::new(),
            owner: String::new(),
            description: String::new(),
            category: category.into(),
            priority: IssuePriority::Unlabelled,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: IssuePriority) -> Self {
        self.priority = priority;
        self
    }
}
