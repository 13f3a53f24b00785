//! Player data models.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Player ID type
pub type PlayerId = Uuid;

/// A registered footballer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub date_birth: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Mutable fields of a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetails {
    pub name: String,
    pub date_birth: DateTime<Utc>,
}

impl Player {
    /// Create a player with a fresh identifier and creation timestamp.
    pub fn new(name: impl Into<String>, date_birth: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date_birth,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub fn details(&self) -> PlayerDetails {
        PlayerDetails {
            name: self.name.clone(),
            date_birth: self.date_birth,
        }
    }

    /// Overwrite the mutable fields, keeping id and creation time.
    pub fn apply(&mut self, details: &PlayerDetails) {
        self.name = details.name.clone();
        self.date_birth = details.date_birth;
    }
}
