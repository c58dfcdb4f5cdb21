//! Teams, their members and the per-member allocation ledger.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::ids::{MemberKey, TeamId};

/// A team member and their pre-existing backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Member {
    /// Member key, unique within the team.
    pub key: MemberKey,

    /// Issues currently assigned to the member.
    #[serde(default)]
    pub current_load: i64,
}

impl Member {
    /// Creates a member with the given backlog.
    pub fn new(key: impl Into<MemberKey>, current_load: i64) -> Self {
        Self {
            key: key.into(),
            current_load,
        }
    }
}

/// A team and its roster.
///
/// Member order is the input order and breaks ties between equal loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Team {
    pub id: TeamId,

    /// Team name; matches issue categories.
    pub name: String,

    #[serde(default)]
    pub members: Vec<Member>,
}

impl Team {
    /// Creates a team with an empty roster.
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Appends a member to the roster.
    pub fn with_member(mut self, key: impl Into<MemberKey>, current_load: i64) -> Self {
        self.members.push(Member::new(key, current_load));
        self
    }

    /// Looks up a member by key.
    pub fn member(&self, key: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.key.as_str() == key)
    }

    /// Sum of all members' current loads.
    pub fn total_load(&self) -> i64 {
        self.members.iter().map(|m| m.current_load).sum()
    }
}

/// Load transition recorded the last time a member was visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub before: i64,
    pub after: i64,
}

impl LedgerEntry {
    /// Issues granted in the recorded step.
    pub fn delta(&self) -> i64 {
        self.after - self.before
    }
}

/// Per-member ledger of one allocation pass.
///
/// Entries keep the order in which members were first recorded. Recording a
/// member again replaces its entry in place.
///
/// Serialises as a JSON object keyed by member, in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<(MemberKey, LedgerEntry)>,
    index: HashMap<MemberKey, usize>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Records `entry` for `key`, replacing any earlier entry for that member.
    pub fn record(&mut self, key: &MemberKey, entry: LedgerEntry) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), entry));
            }
        }
    }

    /// Builds a ledger by recording each entry in turn.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (MemberKey, LedgerEntry)>,
    {
        let entries = entries.into_iter();
        let mut ledger = Self::with_capacity(entries.size_hint().0);
        for (key, entry) in entries {
            ledger.record(&key, entry);
        }
        ledger
    }

    /// Returns the entry for a member, if one was recorded.
    pub fn get(&self, key: &str) -> Option<&LedgerEntry> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberKey, &LedgerEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = Ledger;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of member keys to ledger entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Ledger, A::Error> {
        let mut ledger = Ledger::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, entry)) = access.next_entry::<MemberKey, LedgerEntry>()? {
            ledger.record(&key, entry);
        }
        Ok(ledger)
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LedgerVisitor)
    }
}
