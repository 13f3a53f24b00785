//! Tournament use cases, including team registration.

use std::sync::Arc;

use super::models::{Tournament, TournamentDetails, TournamentId};
use crate::db::{TeamRepository, TournamentRepository};
use crate::errors::TournamentResult;
use crate::team::{Team, TeamId};

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    tournaments: Arc<dyn TournamentRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl TournamentManager {
    pub fn new(tournaments: Arc<dyn TournamentRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { tournaments, teams }
    }

    pub async fn create_tournament(&self, tournament: &Tournament) -> TournamentResult<()> {
        self.tournaments.create(tournament).await?;
        log::debug!("Created tournament {} ({})", tournament.name, tournament.id);
        Ok(())
    }

    pub async fn get_tournament(&self, id: TournamentId) -> TournamentResult<Tournament> {
        self.tournaments.get_by_id(id).await
    }

    pub async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        self.tournaments.get_all().await
    }

    pub async fn update_tournament(
        &self,
        id: TournamentId,
        details: &TournamentDetails,
    ) -> TournamentResult<Tournament> {
        self.tournaments.update(id, details).await
    }

    pub async fn delete_tournament(&self, id: TournamentId) -> TournamentResult<()> {
        self.tournaments.delete(id).await?;
        log::debug!("Deleted tournament {id}");
        Ok(())
    }

    /// Register a team in a tournament
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - `"tournament not found"` or `"team not found"`
    /// * `TournamentError::Conflict` - Team already registered
    pub async fn add_team_to_tournament(
        &self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> TournamentResult<()> {
        self.tournaments
            .get_by_id(tournament_id)
            .await
            .map_err(|e| e.relabel_not_found("tournament not found"))?;
        self.teams
            .get_by_id(team_id)
            .await
            .map_err(|e| e.relabel_not_found("team not found"))?;

        self.tournaments.add_team(tournament_id, team_id).await?;
        log::debug!("Team {team_id} registered in tournament {tournament_id}");
        Ok(())
    }

    pub async fn remove_team_from_tournament(
        &self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> TournamentResult<()> {
        self.tournaments.remove_team(tournament_id, team_id).await
    }

    /// Teams registered in a tournament, ordered by name
    pub async fn tournament_teams(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Team>> {
        self.tournaments.tournament_teams(tournament_id).await
    }
}
