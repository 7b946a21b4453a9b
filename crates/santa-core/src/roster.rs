// Participant roster: adding, removing, and splitting people into groups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ValidationError;

/// Opaque, unique participant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        ParticipantId(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The two exchange groups. Gifts never cross between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Adult,
    Kid,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Adult, Group::Kid];

    /// Display label ("Adult" / "Kid").
    pub fn display_str(self) -> &'static str {
        match self {
            Group::Adult => "Adult",
            Group::Kid => "Kid",
        }
    }

    /// The other group, used by the setup screen's group toggle.
    pub fn toggled(self) -> Group {
        match self {
            Group::Adult => Group::Kid,
            Group::Kid => Group::Adult,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

impl FromStr for Group {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("adult") {
            Ok(Group::Adult)
        } else if trimmed.eq_ignore_ascii_case("kid") {
            Ok(Group::Kid)
        } else {
            Err(ValidationError::UnknownGroup(trimmed.to_string()))
        }
    }
}

/// A person taking part in the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Display name, stored trimmed. Never empty.
    pub name: String,
    pub group: Group,
}

/// Roster split by group, each side in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    pub adults: Vec<Participant>,
    pub kids: Vec<Participant>,
}

impl RosterSnapshot {
    /// At least one group is large enough to exchange gifts.
    pub fn can_generate(&self) -> bool {
        self.adults.len() >= 2 || self.kids.len() >= 2
    }

    pub fn group(&self, group: Group) -> &[Participant] {
        match group {
            Group::Adult => &self.adults,
            Group::Kid => &self.kids,
        }
    }
}

/// The ordered set of participants.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    /// Append a participant with a fresh id.
    ///
    /// The name is trimmed before it is stored. Empty or whitespace-only
    /// names are rejected and the roster stays as it was.
    pub fn add(&mut self, name: &str, group: Group) -> Result<Participant, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let participant = Participant {
            id: ParticipantId::new(),
            name: name.to_string(),
            group,
        };
        info!("Added participant '{}' ({})", participant.name, group);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Like [`Roster::add`], with the group given as text ("Adult" or "Kid").
    pub fn add_str(&mut self, name: &str, group: &str) -> Result<Participant, ValidationError> {
        let group: Group = group.parse()?;
        self.add(name, group)
    }

    /// Remove the participant with the given id.
    ///
    /// Returns `true` if someone was removed. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &ParticipantId) -> bool {
        match self.participants.iter().position(|p| p.id == *id) {
            Some(idx) => {
                let removed = self.participants.remove(idx);
                info!("Removed participant '{}' ({})", removed.name, removed.group);
                true
            }
            None => {
                debug!("remove: no participant with id {}", id);
                false
            }
        }
    }

    /// Split into adults and kids, preserving insertion order in each.
    pub fn partition_by_group(&self) -> RosterSnapshot {
        let (adults, kids) = self
            .participants
            .iter()
            .cloned()
            .partition(|p| p.group == Group::Adult);
        RosterSnapshot { adults, kids }
    }

    /// Alias of [`Roster::partition_by_group`].
    pub fn snapshot(&self) -> RosterSnapshot {
        self.partition_by_group()
    }

    pub fn can_generate(&self) -> bool {
        Group::ALL.iter().any(|&g| self.count(g) >= 2)
    }

    pub fn count(&self, group: Group) -> usize {
        self.participants.iter().filter(|p| p.group == group).count()
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
