//! Repository trait definitions for testability and dependency injection.
//!
//! Each entity has one storage contract. Managers only ever see these traits,
//! so the PostgreSQL implementations in [`super::postgres`] and the in-memory
//! ones in [`super::memory`] are interchangeable.
//!
//! Shared contract:
//! - `get_by_id` fails with [`TournamentError::NotFound`](crate::TournamentError::NotFound)
//!   when no row matches, distinct from connectivity errors
//! - `get_all` returns newest first (by `created_at`)
//! - `update` and `delete` fail with `NotFound` when no row was affected
//! - relation listings are ordered alphabetically by name

use async_trait::async_trait;

use crate::errors::TournamentResult;
use crate::matches::{Match, MatchDetails, MatchId};
use crate::player::{Player, PlayerDetails, PlayerId};
use crate::team::{Team, TeamDetails, TeamId};
use crate::tournament::{Tournament, TournamentDetails, TournamentId};

/// Trait for player storage
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Insert a new player
    async fn create(&self, player: &Player) -> TournamentResult<()>;

    /// Find player by ID
    async fn get_by_id(&self, id: PlayerId) -> TournamentResult<Player>;

    /// All players, newest first
    async fn get_all(&self) -> TournamentResult<Vec<Player>>;

    /// Overwrite mutable fields and return the stored player
    async fn update(&self, id: PlayerId, details: &PlayerDetails) -> TournamentResult<Player>;

    /// Delete player and their team memberships
    async fn delete(&self, id: PlayerId) -> TournamentResult<()>;
}

/// Trait for team storage, including player membership
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team
    async fn create(&self, team: &Team) -> TournamentResult<()>;

    /// Find team by ID
    async fn get_by_id(&self, id: TeamId) -> TournamentResult<Team>;

    /// All teams, newest first
    async fn get_all(&self) -> TournamentResult<Vec<Team>>;

    /// Overwrite mutable fields and return the stored team
    async fn update(&self, id: TeamId, details: &TeamDetails) -> TournamentResult<Team>;

    /// Delete team, cascading to memberships and matches
    async fn delete(&self, id: TeamId) -> TournamentResult<()>;

    /// Record a player as member of a team
    async fn add_player(&self, team_id: TeamId, player_id: PlayerId) -> TournamentResult<()>;

    /// Remove a membership; removing a non-member is not an error
    async fn remove_player(&self, team_id: TeamId, player_id: PlayerId) -> TournamentResult<()>;

    /// Members of a team, ordered by name
    async fn team_players(&self, team_id: TeamId) -> TournamentResult<Vec<Player>>;
}

/// Trait for tournament storage, including team registration
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Insert a new tournament
    async fn create(&self, tournament: &Tournament) -> TournamentResult<()>;

    /// Find tournament by ID
    async fn get_by_id(&self, id: TournamentId) -> TournamentResult<Tournament>;

    /// All tournaments, newest first
    async fn get_all(&self) -> TournamentResult<Vec<Tournament>>;

    /// Overwrite mutable fields and return the stored tournament
    async fn update(
        &self,
        id: TournamentId,
        details: &TournamentDetails,
    ) -> TournamentResult<Tournament>;

    /// Delete tournament and its team registrations
    async fn delete(&self, id: TournamentId) -> TournamentResult<()>;

    /// Register a team in a tournament
    async fn add_team(&self, tournament_id: TournamentId, team_id: TeamId) -> TournamentResult<()>;

    /// Remove a registration; removing an unregistered team is not an error
    async fn remove_team(
        &self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> TournamentResult<()>;

    /// Teams registered in a tournament, ordered by name
    async fn tournament_teams(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Team>>;
}

/// Trait for match storage
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert a new match
    async fn create(&self, game: &Match) -> TournamentResult<()>;

    /// Find match by ID
    async fn get_by_id(&self, id: MatchId) -> TournamentResult<Match>;

    /// All matches, newest first
    async fn get_all(&self) -> TournamentResult<Vec<Match>>;

    /// Overwrite mutable fields and return the stored match
    async fn update(&self, id: MatchId, details: &MatchDetails) -> TournamentResult<Match>;

    /// Delete match
    async fn delete(&self, id: MatchId) -> TournamentResult<()>;
}
