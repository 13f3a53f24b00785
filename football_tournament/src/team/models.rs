//! Team data models.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::player::Player;

/// Team ID type
pub type TeamId = Uuid;

/// A football team
///
/// `players` is only filled in by an explicit membership query and is left
/// out of the JSON representation while empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<Player>,
}

/// Mutable fields of a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDetails {
    pub name: String,
}

impl Team {
    /// Create a team with a fresh identifier and creation timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now().trunc_subsecs(6),
            players: Vec::new(),
        }
    }

    /// Overwrite the mutable fields, keeping id and creation time.
    pub fn apply(&mut self, details: &TeamDetails) {
        self.name = details.name.clone();
    }
}
