//! Match use cases.

use std::sync::Arc;

use super::models::{Match, MatchDetails, MatchId};
use crate::db::{MatchRepository, TeamRepository};
use crate::errors::{SELF_MATCH, TournamentError, TournamentResult};

/// Match manager
///
/// Scheduling checks run before the write without a surrounding transaction.
/// A team deleted in between is caught by the foreign keys and still reported
/// as `NotFound`.
#[derive(Clone)]
pub struct MatchManager {
    matches: Arc<dyn MatchRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl MatchManager {
    pub fn new(matches: Arc<dyn MatchRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { matches, teams }
    }

    /// Store a new match
    ///
    /// # Errors
    ///
    /// * `TournamentError::Validation` - Both sides are the same team
    /// * `TournamentError::NotFound` - `"team1 not found"` or `"team2 not found"`
    pub async fn create_match(&self, game: &Match) -> TournamentResult<()> {
        self.check_teams(&game.details()).await?;
        self.matches.create(game).await?;
        log::debug!(
            "Created match #{} ({}): {} vs {}",
            game.match_number,
            game.id,
            game.team1_id,
            game.team2_id
        );
        Ok(())
    }

    pub async fn get_match(&self, id: MatchId) -> TournamentResult<Match> {
        self.matches.get_by_id(id).await
    }

    pub async fn list_matches(&self) -> TournamentResult<Vec<Match>> {
        self.matches.get_all().await
    }

    /// Overwrite every mutable field, applying the same checks as creation
    pub async fn update_match(&self, id: MatchId, details: &MatchDetails) -> TournamentResult<Match> {
        self.check_teams(details).await?;
        self.matches.update(id, details).await
    }

    pub async fn delete_match(&self, id: MatchId) -> TournamentResult<()> {
        self.matches.delete(id).await?;
        log::debug!("Deleted match {id}");
        Ok(())
    }

    async fn check_teams(&self, details: &MatchDetails) -> TournamentResult<()> {
        if details.is_self_match() {
            return Err(TournamentError::validation(SELF_MATCH));
        }
        self.teams
            .get_by_id(details.team1_id)
            .await
            .map_err(|e| e.relabel_not_found("team1 not found"))?;
        self.teams
            .get_by_id(details.team2_id)
            .await
            .map_err(|e| e.relabel_not_found("team2 not found"))?;
        Ok(())
    }
}
