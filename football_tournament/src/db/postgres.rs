//! PostgreSQL implementations of the repository traits.
//!
//! All statements are parameterized and run under the statement timeout held
//! by [`Database`]. Constraint violations are translated into domain errors by
//! `From<sqlx::Error> for TournamentError`.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgQueryResult, PgRow};

use super::Database;
use super::repository::{MatchRepository, PlayerRepository, TeamRepository, TournamentRepository};
use crate::errors::{TournamentError, TournamentResult};
use crate::matches::{Match, MatchDetails, MatchId};
use crate::player::{Player, PlayerDetails, PlayerId};
use crate::team::{Team, TeamDetails, TeamId};
use crate::tournament::{Tournament, TournamentDetails, TournamentId};

fn player_from_row(row: &PgRow) -> Player {
    Player {
        id: row.get("id"),
        name: row.get("name"),
        date_birth: row.get("date_birth"),
        created_at: row.get("created_at"),
    }
}

fn team_from_row(row: &PgRow) -> Team {
    Team {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        players: Vec::new(),
    }
}

fn tournament_from_row(row: &PgRow) -> Tournament {
    Tournament {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        teams: Vec::new(),
    }
}

fn match_from_row(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        match_number: row.get("match_number"),
        date: row.get("date"),
        team1_id: row.get("team1_id"),
        team2_id: row.get("team2_id"),
        goal_scored_team1: row.get("goal_scored_team1"),
        goal_scored_team2: row.get("goal_scored_team2"),
        created_at: row.get("created_at"),
    }
}

/// Zero affected rows means the target did not exist.
fn require_affected(result: PgQueryResult, entity: &str) -> TournamentResult<()> {
    if result.rows_affected() == 0 {
        return Err(TournamentError::not_found(format!("{entity} not found")));
    }
    Ok(())
}

fn not_found(entity: &str) -> TournamentError {
    TournamentError::not_found(format!("{entity} not found"))
}

/// PostgreSQL implementation of `PlayerRepository`
#[derive(Clone)]
pub struct PgPlayerRepository {
    db: Database,
}

impl PgPlayerRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn create(&self, player: &Player) -> TournamentResult<()> {
        let query = sqlx::query(
            "INSERT INTO players (id, name, date_birth, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(player.id)
        .bind(&player.name)
        .bind(player.date_birth)
        .bind(player.created_at);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: PlayerId) -> TournamentResult<Player> {
        let query =
            sqlx::query("SELECT id, name, date_birth, created_at FROM players WHERE id = $1")
                .bind(id);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(player_from_row).ok_or_else(|| not_found("player"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Player>> {
        let query = sqlx::query(
            "SELECT id, name, date_birth, created_at FROM players ORDER BY created_at DESC",
        );

        let rows = self.db.run(query.fetch_all(self.db.pool())).await?;
        Ok(rows.iter().map(player_from_row).collect())
    }

    async fn update(&self, id: PlayerId, details: &PlayerDetails) -> TournamentResult<Player> {
        let query = sqlx::query(
            "UPDATE players SET name = $2, date_birth = $3 WHERE id = $1
             RETURNING id, name, date_birth, created_at",
        )
        .bind(id)
        .bind(&details.name)
        .bind(details.date_birth);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(player_from_row).ok_or_else(|| not_found("player"))
    }

    async fn delete(&self, id: PlayerId) -> TournamentResult<()> {
        let query = sqlx::query("DELETE FROM players WHERE id = $1").bind(id);
        let result = self.db.run(query.execute(self.db.pool())).await?;
        require_affected(result, "player")
    }
}

/// PostgreSQL implementation of `TeamRepository`
#[derive(Clone)]
pub struct PgTeamRepository {
    db: Database,
}

impl PgTeamRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn create(&self, team: &Team) -> TournamentResult<()> {
        let query = sqlx::query("INSERT INTO teams (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(team.id)
            .bind(&team.name)
            .bind(team.created_at);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: TeamId) -> TournamentResult<Team> {
        let query = sqlx::query("SELECT id, name, created_at FROM teams WHERE id = $1").bind(id);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(team_from_row).ok_or_else(|| not_found("team"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Team>> {
        let query = sqlx::query("SELECT id, name, created_at FROM teams ORDER BY created_at DESC");

        let rows = self.db.run(query.fetch_all(self.db.pool())).await?;
        Ok(rows.iter().map(team_from_row).collect())
    }

    async fn update(&self, id: TeamId, details: &TeamDetails) -> TournamentResult<Team> {
        let query = sqlx::query(
            "UPDATE teams SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(id)
        .bind(&details.name);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(team_from_row).ok_or_else(|| not_found("team"))
    }

    async fn delete(&self, id: TeamId) -> TournamentResult<()> {
        let query = sqlx::query("DELETE FROM teams WHERE id = $1").bind(id);
        let result = self.db.run(query.execute(self.db.pool())).await?;
        require_affected(result, "team")
    }

    async fn add_player(&self, team_id: TeamId, player_id: PlayerId) -> TournamentResult<()> {
        let query = sqlx::query("INSERT INTO team_players (team_id, player_id) VALUES ($1, $2)")
            .bind(team_id)
            .bind(player_id);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn remove_player(&self, team_id: TeamId, player_id: PlayerId) -> TournamentResult<()> {
        let query = sqlx::query("DELETE FROM team_players WHERE team_id = $1 AND player_id = $2")
            .bind(team_id)
            .bind(player_id);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn team_players(&self, team_id: TeamId) -> TournamentResult<Vec<Player>> {
        let query = sqlx::query(
            r#"
            SELECT p.id, p.name, p.date_birth, p.created_at
            FROM players p
            INNER JOIN team_players tp ON p.id = tp.player_id
            WHERE tp.team_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(team_id);

        let rows = self.db.run(query.fetch_all(self.db.pool())).await?;
        Ok(rows.iter().map(player_from_row).collect())
    }
}

/// PostgreSQL implementation of `TournamentRepository`
#[derive(Clone)]
pub struct PgTournamentRepository {
    db: Database,
}

impl PgTournamentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn create(&self, tournament: &Tournament) -> TournamentResult<()> {
        let query =
            sqlx::query("INSERT INTO tournaments (id, name, created_at) VALUES ($1, $2, $3)")
                .bind(tournament.id)
                .bind(&tournament.name)
                .bind(tournament.created_at);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: TournamentId) -> TournamentResult<Tournament> {
        let query =
            sqlx::query("SELECT id, name, created_at FROM tournaments WHERE id = $1").bind(id);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(tournament_from_row).ok_or_else(|| not_found("tournament"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Tournament>> {
        let query =
            sqlx::query("SELECT id, name, created_at FROM tournaments ORDER BY created_at DESC");

        let rows = self.db.run(query.fetch_all(self.db.pool())).await?;
        Ok(rows.iter().map(tournament_from_row).collect())
    }

    async fn update(
        &self,
        id: TournamentId,
        details: &TournamentDetails,
    ) -> TournamentResult<Tournament> {
        let query = sqlx::query(
            "UPDATE tournaments SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(id)
        .bind(&details.name);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(tournament_from_row).ok_or_else(|| not_found("tournament"))
    }

    async fn delete(&self, id: TournamentId) -> TournamentResult<()> {
        let query = sqlx::query("DELETE FROM tournaments WHERE id = $1").bind(id);
        let result = self.db.run(query.execute(self.db.pool())).await?;
        require_affected(result, "tournament")
    }

    async fn add_team(&self, tournament_id: TournamentId, team_id: TeamId) -> TournamentResult<()> {
        let query =
            sqlx::query("INSERT INTO tournament_teams (tournament_id, team_id) VALUES ($1, $2)")
                .bind(tournament_id)
                .bind(team_id);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn remove_team(
        &self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> TournamentResult<()> {
        let query = sqlx::query(
            "DELETE FROM tournament_teams WHERE tournament_id = $1 AND team_id = $2",
        )
        .bind(tournament_id)
        .bind(team_id);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn tournament_teams(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Team>> {
        let query = sqlx::query(
            r#"
            SELECT t.id, t.name, t.created_at
            FROM teams t
            INNER JOIN tournament_teams tt ON t.id = tt.team_id
            WHERE tt.tournament_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(tournament_id);

        let rows = self.db.run(query.fetch_all(self.db.pool())).await?;
        Ok(rows.iter().map(team_from_row).collect())
    }
}

/// PostgreSQL implementation of `MatchRepository`
#[derive(Clone)]
pub struct PgMatchRepository {
    db: Database,
}

impl PgMatchRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    async fn create(&self, game: &Match) -> TournamentResult<()> {
        let query = sqlx::query(
            r#"
            INSERT INTO matches (id, match_number, date, team1_id, team2_id,
                                 goal_scored_team1, goal_scored_team2, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(game.id)
        .bind(game.match_number)
        .bind(game.date)
        .bind(game.team1_id)
        .bind(game.team2_id)
        .bind(game.goal_scored_team1)
        .bind(game.goal_scored_team2)
        .bind(game.created_at);

        self.db.run(query.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: MatchId) -> TournamentResult<Match> {
        let query = sqlx::query(
            r#"
            SELECT id, match_number, date, team1_id, team2_id,
                   goal_scored_team1, goal_scored_team2, created_at
            FROM matches
            WHERE id = $1
            "#,
        )
        .bind(id);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(match_from_row).ok_or_else(|| not_found("match"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Match>> {
        let query = sqlx::query(
            r#"
            SELECT id, match_number, date, team1_id, team2_id,
                   goal_scored_team1, goal_scored_team2, created_at
            FROM matches
            ORDER BY created_at DESC
            "#,
        );

        let rows = self.db.run(query.fetch_all(self.db.pool())).await?;
        Ok(rows.iter().map(match_from_row).collect())
    }

    async fn update(&self, id: MatchId, details: &MatchDetails) -> TournamentResult<Match> {
        let query = sqlx::query(
            r#"
            UPDATE matches
            SET match_number = $2, date = $3, team1_id = $4, team2_id = $5,
                goal_scored_team1 = $6, goal_scored_team2 = $7
            WHERE id = $1
            RETURNING id, match_number, date, team1_id, team2_id,
                      goal_scored_team1, goal_scored_team2, created_at
            "#,
        )
        .bind(id)
        .bind(details.match_number)
        .bind(details.date)
        .bind(details.team1_id)
        .bind(details.team2_id)
        .bind(details.goal_scored_team1)
        .bind(details.goal_scored_team2);

        let row = self.db.run(query.fetch_optional(self.db.pool())).await?;
        row.as_ref().map(match_from_row).ok_or_else(|| not_found("match"))
    }

    async fn delete(&self, id: MatchId) -> TournamentResult<()> {
        let query = sqlx::query("DELETE FROM matches WHERE id = $1").bind(id);
        let result = self.db.run(query.execute(self.db.pool())).await?;
        require_affected(result, "match")
    }
}
