//! Match data models.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::team::TeamId;

/// Match ID type
pub type MatchId = Uuid;

/// A game played between two distinct teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub match_number: i32,
    pub date: DateTime<Utc>,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub goal_scored_team1: i32,
    pub goal_scored_team2: i32,
    pub created_at: DateTime<Utc>,
}

/// Mutable fields of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub match_number: i32,
    pub date: DateTime<Utc>,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub goal_scored_team1: i32,
    pub goal_scored_team2: i32,
}

impl MatchDetails {
    pub fn is_self_match(&self) -> bool {
        self.team1_id == self.team2_id
    }

    pub fn has_negative_goals(&self) -> bool {
        self.goal_scored_team1 < 0 || self.goal_scored_team2 < 0
    }
}

impl Match {
    /// Create a match with a fresh identifier and creation timestamp.
    pub fn new(details: MatchDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_number: details.match_number,
            date: details.date,
            team1_id: details.team1_id,
            team2_id: details.team2_id,
            goal_scored_team1: details.goal_scored_team1,
            goal_scored_team2: details.goal_scored_team2,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub fn details(&self) -> MatchDetails {
        MatchDetails {
            match_number: self.match_number,
            date: self.date,
            team1_id: self.team1_id,
            team2_id: self.team2_id,
            goal_scored_team1: self.goal_scored_team1,
            goal_scored_team2: self.goal_scored_team2,
        }
    }

    /// Overwrite the mutable fields, keeping id and creation time.
    pub fn apply(&mut self, details: &MatchDetails) {
        self.match_number = details.match_number;
        self.date = details.date;
        self.team1_id = details.team1_id;
        self.team2_id = details.team2_id;
        self.goal_scored_team1 = details.goal_scored_team1;
        self.goal_scored_team2 = details.goal_scored_team2;
    }
}
