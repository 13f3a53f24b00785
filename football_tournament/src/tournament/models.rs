//! Tournament data models.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::team::Team;

/// Tournament ID type
pub type TournamentId = Uuid;

/// A competition grouping several teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
}

/// Mutable fields of a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentDetails {
    pub name: String,
}

impl Tournament {
    /// Create a tournament with a fresh identifier and creation timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now().trunc_subsecs(6),
            teams: Vec::new(),
        }
    }

    /// Overwrite the mutable fields, keeping id and creation time.
    pub fn apply(&mut self, details: &TournamentDetails) {
        self.name = details.name.clone();
    }
}
