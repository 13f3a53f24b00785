//! Team use cases, including player membership.

use std::sync::Arc;

use super::models::{Team, TeamDetails, TeamId};
use crate::db::{PlayerRepository, TeamRepository};
use crate::errors::TournamentResult;
use crate::player::{Player, PlayerId};

/// Team manager
#[derive(Clone)]
pub struct TeamManager {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl TeamManager {
    pub fn new(teams: Arc<dyn TeamRepository>, players: Arc<dyn PlayerRepository>) -> Self {
        Self { teams, players }
    }

    /// Store a new team
    ///
    /// # Errors
    ///
    /// * `TournamentError::Conflict` - Name already taken
    pub async fn create_team(&self, team: &Team) -> TournamentResult<()> {
        self.teams.create(team).await?;
        log::debug!("Created team {} ({})", team.name, team.id);
        Ok(())
    }

    pub async fn get_team(&self, id: TeamId) -> TournamentResult<Team> {
        self.teams.get_by_id(id).await
    }

    pub async fn list_teams(&self) -> TournamentResult<Vec<Team>> {
        self.teams.get_all().await
    }

    pub async fn update_team(&self, id: TeamId, details: &TeamDetails) -> TournamentResult<Team> {
        self.teams.update(id, details).await
    }

    /// Delete a team along with its memberships, registrations and matches
    pub async fn delete_team(&self, id: TeamId) -> TournamentResult<()> {
        self.teams.delete(id).await?;
        log::debug!("Deleted team {id}");
        Ok(())
    }

    /// Add a player to a team
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - `"team not found"` or `"player not found"`
    /// * `TournamentError::Conflict` - Player already on the team
    pub async fn add_player_to_team(
        &self,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> TournamentResult<()> {
        self.teams
            .get_by_id(team_id)
            .await
            .map_err(|e| e.relabel_not_found("team not found"))?;
        self.players
            .get_by_id(player_id)
            .await
            .map_err(|e| e.relabel_not_found("player not found"))?;

        self.teams.add_player(team_id, player_id).await?;
        log::debug!("Player {player_id} joined team {team_id}");
        Ok(())
    }

    /// Remove a player from a team; a no-op when they were not a member
    pub async fn remove_player_from_team(
        &self,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> TournamentResult<()> {
        self.teams.remove_player(team_id, player_id).await
    }

    /// Players on a team, ordered by name
    pub async fn team_players(&self, team_id: TeamId) -> TournamentResult<Vec<Player>> {
        self.teams.team_players(team_id).await
    }
}
