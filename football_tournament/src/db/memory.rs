//! In-memory repositories.
//!
//! A single [`MemoryStore`] backs all four repository traits and enforces the
//! same constraints as the PostgreSQL schema: unique team names, composite
//! keys on the join tables, foreign keys, cascading deletes and the match
//! checks. Used by unit tests, the HTTP integration tests and the
//! `--in-memory` server mode.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::Repositories;
use super::repository::{MatchRepository, PlayerRepository, TeamRepository, TournamentRepository};
use crate::errors::{
    DANGLING_REFERENCE, DUPLICATE_TEAM_NAME, DUPLICATE_TEAM_PLAYER, DUPLICATE_TOURNAMENT_TEAM,
    EMPTY_PLAYER_NAME, NEGATIVE_GOALS, SELF_MATCH, TournamentError, TournamentResult,
};
use crate::matches::{Match, MatchDetails, MatchId};
use crate::player::{Player, PlayerDetails, PlayerId};
use crate::team::{Team, TeamDetails, TeamId};
use crate::tournament::{Tournament, TournamentDetails, TournamentId};

#[derive(Default)]
struct Tables {
    players: HashMap<PlayerId, Player>,
    teams: HashMap<TeamId, Team>,
    tournaments: HashMap<TournamentId, Tournament>,
    matches: HashMap<MatchId, Match>,
    team_players: BTreeSet<(TeamId, PlayerId)>,
    tournament_teams: BTreeSet<(TournamentId, TeamId)>,
}

impl Tables {
    fn team_name_taken(&self, name: &str, except: Option<TeamId>) -> bool {
        self.teams
            .values()
            .any(|t| t.name == name && Some(t.id) != except)
    }

    fn check_match(&self, details: &MatchDetails) -> TournamentResult<()> {
        if details.is_self_match() {
            return Err(TournamentError::validation(SELF_MATCH));
        }
        if details.has_negative_goals() {
            return Err(TournamentError::validation(NEGATIVE_GOALS));
        }
        if !self.teams.contains_key(&details.team1_id) || !self.teams.contains_key(&details.team2_id)
        {
            return Err(TournamentError::not_found(DANGLING_REFERENCE));
        }
        Ok(())
    }
}

fn newest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

fn check_player_name(name: &str) -> TournamentResult<()> {
    if name.trim().is_empty() {
        return Err(TournamentError::validation(EMPTY_PLAYER_NAME));
    }
    Ok(())
}

fn not_found(entity: &str) -> TournamentError {
    TournamentError::not_found(format!("{entity} not found"))
}

/// Shared state behind the in-memory repositories
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository handles that all share this store.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            players: Arc::new(MemoryPlayerRepository::new(self.clone())),
            teams: Arc::new(MemoryTeamRepository::new(self.clone())),
            tournaments: Arc::new(MemoryTournamentRepository::new(self.clone())),
            matches: Arc::new(MemoryMatchRepository::new(self.clone())),
        }
    }

    // A panicking test must not wedge every later operation.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory implementation of `PlayerRepository`
#[derive(Clone)]
pub struct MemoryPlayerRepository {
    store: MemoryStore,
}

impl MemoryPlayerRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PlayerRepository for MemoryPlayerRepository {
    async fn create(&self, player: &Player) -> TournamentResult<()> {
        check_player_name(&player.name)?;
        let mut tables = self.store.lock();
        if tables.players.contains_key(&player.id) {
            return Err(TournamentError::conflict("duplicate record"));
        }
        tables.players.insert(player.id, player.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: PlayerId) -> TournamentResult<Player> {
        self.store
            .lock()
            .players
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("player"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Player>> {
        let players = self.store.lock().players.values().cloned().collect();
        Ok(newest_first(players, |p: &Player| p.created_at))
    }

    async fn update(&self, id: PlayerId, details: &PlayerDetails) -> TournamentResult<Player> {
        check_player_name(&details.name)?;
        let mut tables = self.store.lock();
        let player = tables.players.get_mut(&id).ok_or_else(|| not_found("player"))?;
        player.apply(details);
        Ok(player.clone())
    }

    async fn delete(&self, id: PlayerId) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        tables.players.remove(&id).ok_or_else(|| not_found("player"))?;
        tables.team_players.retain(|(_, player_id)| *player_id != id);
        Ok(())
    }
}

/// In-memory implementation of `TeamRepository`
#[derive(Clone)]
pub struct MemoryTeamRepository {
    store: MemoryStore,
}

impl MemoryTeamRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TeamRepository for MemoryTeamRepository {
    async fn create(&self, team: &Team) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        if tables.team_name_taken(&team.name, None) {
            return Err(TournamentError::conflict(DUPLICATE_TEAM_NAME));
        }
        if tables.teams.contains_key(&team.id) {
            return Err(TournamentError::conflict("duplicate record"));
        }
        let mut stored = team.clone();
        stored.players.clear();
        tables.teams.insert(team.id, stored);
        Ok(())
    }

    async fn get_by_id(&self, id: TeamId) -> TournamentResult<Team> {
        self.store
            .lock()
            .teams
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("team"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Team>> {
        let teams = self.store.lock().teams.values().cloned().collect();
        Ok(newest_first(teams, |t: &Team| t.created_at))
    }

    async fn update(&self, id: TeamId, details: &TeamDetails) -> TournamentResult<Team> {
        let mut tables = self.store.lock();
        if !tables.teams.contains_key(&id) {
            return Err(not_found("team"));
        }
        if tables.team_name_taken(&details.name, Some(id)) {
            return Err(TournamentError::conflict(DUPLICATE_TEAM_NAME));
        }
        let team = tables.teams.get_mut(&id).ok_or_else(|| not_found("team"))?;
        team.apply(details);
        Ok(team.clone())
    }

    async fn delete(&self, id: TeamId) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        tables.teams.remove(&id).ok_or_else(|| not_found("team"))?;
        tables.team_players.retain(|(team_id, _)| *team_id != id);
        tables.tournament_teams.retain(|(_, team_id)| *team_id != id);
        tables
            .matches
            .retain(|_, game| game.team1_id != id && game.team2_id != id);
        Ok(())
    }

    async fn add_player(&self, team_id: TeamId, player_id: PlayerId) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        if !tables.teams.contains_key(&team_id) || !tables.players.contains_key(&player_id) {
            return Err(TournamentError::not_found(DANGLING_REFERENCE));
        }
        if !tables.team_players.insert((team_id, player_id)) {
            return Err(TournamentError::conflict(DUPLICATE_TEAM_PLAYER));
        }
        Ok(())
    }

    async fn remove_player(&self, team_id: TeamId, player_id: PlayerId) -> TournamentResult<()> {
        self.store.lock().team_players.remove(&(team_id, player_id));
        Ok(())
    }

    async fn team_players(&self, team_id: TeamId) -> TournamentResult<Vec<Player>> {
        let tables = self.store.lock();
        let mut players: Vec<Player> = tables
            .team_players
            .iter()
            .filter(|(t, _)| *t == team_id)
            .filter_map(|(_, p)| tables.players.get(p).cloned())
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }
}

/// In-memory implementation of `TournamentRepository`
#[derive(Clone)]
pub struct MemoryTournamentRepository {
    store: MemoryStore,
}

impl MemoryTournamentRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TournamentRepository for MemoryTournamentRepository {
    async fn create(&self, tournament: &Tournament) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        if tables.tournaments.contains_key(&tournament.id) {
            return Err(TournamentError::conflict("duplicate record"));
        }
        let mut stored = tournament.clone();
        stored.teams.clear();
        tables.tournaments.insert(tournament.id, stored);
        Ok(())
    }

    async fn get_by_id(&self, id: TournamentId) -> TournamentResult<Tournament> {
        self.store
            .lock()
            .tournaments
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("tournament"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Tournament>> {
        let tournaments = self.store.lock().tournaments.values().cloned().collect();
        Ok(newest_first(tournaments, |t: &Tournament| t.created_at))
    }

    async fn update(
        &self,
        id: TournamentId,
        details: &TournamentDetails,
    ) -> TournamentResult<Tournament> {
        let mut tables = self.store.lock();
        let tournament = tables
            .tournaments
            .get_mut(&id)
            .ok_or_else(|| not_found("tournament"))?;
        tournament.apply(details);
        Ok(tournament.clone())
    }

    async fn delete(&self, id: TournamentId) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        tables
            .tournaments
            .remove(&id)
            .ok_or_else(|| not_found("tournament"))?;
        tables.tournament_teams.retain(|(t, _)| *t != id);
        Ok(())
    }

    async fn add_team(&self, tournament_id: TournamentId, team_id: TeamId) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        if !tables.tournaments.contains_key(&tournament_id) || !tables.teams.contains_key(&team_id)
        {
            return Err(TournamentError::not_found(DANGLING_REFERENCE));
        }
        if !tables.tournament_teams.insert((tournament_id, team_id)) {
            return Err(TournamentError::conflict(DUPLICATE_TOURNAMENT_TEAM));
        }
        Ok(())
    }

    async fn remove_team(
        &self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> TournamentResult<()> {
        self.store
            .lock()
            .tournament_teams
            .remove(&(tournament_id, team_id));
        Ok(())
    }

    async fn tournament_teams(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Team>> {
        let tables = self.store.lock();
        let mut teams: Vec<Team> = tables
            .tournament_teams
            .iter()
            .filter(|(t, _)| *t == tournament_id)
            .filter_map(|(_, team)| tables.teams.get(team).cloned())
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }
}

/// In-memory implementation of `MatchRepository`
#[derive(Clone)]
pub struct MemoryMatchRepository {
    store: MemoryStore,
}

impl MemoryMatchRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MatchRepository for MemoryMatchRepository {
    async fn create(&self, game: &Match) -> TournamentResult<()> {
        let mut tables = self.store.lock();
        tables.check_match(&game.details())?;
        if tables.matches.contains_key(&game.id) {
            return Err(TournamentError::conflict("duplicate record"));
        }
        tables.matches.insert(game.id, game.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: MatchId) -> TournamentResult<Match> {
        self.store
            .lock()
            .matches
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("match"))
    }

    async fn get_all(&self) -> TournamentResult<Vec<Match>> {
        let matches = self.store.lock().matches.values().cloned().collect();
        Ok(newest_first(matches, |m: &Match| m.created_at))
    }

    async fn update(&self, id: MatchId, details: &MatchDetails) -> TournamentResult<Match> {
        let mut tables = self.store.lock();
        if !tables.matches.contains_key(&id) {
            return Err(not_found("match"));
        }
        tables.check_match(details)?;
        let game = tables.matches.get_mut(&id).ok_or_else(|| not_found("match"))?;
        game.apply(details);
        Ok(game.clone())
    }

    async fn delete(&self, id: MatchId) -> TournamentResult<()> {
        self.store
            .lock()
            .matches
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("match"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use chrono::{TimeZone, Utc};

    fn born() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(1987, 6, 24, 0, 0, 0).unwrap()
    }

    fn fixture(team1_id: TeamId, team2_id: TeamId) -> MatchDetails {
        MatchDetails {
            match_number: 1,
            date: Utc.with_ymd_and_hms(2026, 6, 11, 18, 0, 0).unwrap(),
            team1_id,
            team2_id,
            goal_scored_team1: 2,
            goal_scored_team2: 1,
        }
    }

    // ============================================================
    // Players
    // ============================================================

    #[tokio::test]
    async fn test_player_round_trip() {
        let repos = MemoryStore::new().repositories();
        let player = Player::new("Messi", born());
        repos.players.create(&player).await.unwrap();

        let fetched = repos.players.get_by_id(player.id).await.unwrap();
        assert_eq!(fetched, player);
    }

    #[tokio::test]
    async fn test_blank_player_name_rejected() {
        let repos = MemoryStore::new().repositories();
        let err = repos.players.create(&Player::new("  ", born())).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(repos.players.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let repos = MemoryStore::new().repositories();
        let id = uuid::Uuid::new_v4();

        let err = repos.players.get_by_id(id).await.unwrap_err();
        assert_eq!(err.to_string(), "player not found");

        let err = repos.players.delete(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let details = PlayerDetails {
            name: "Nobody".to_string(),
            date_birth: born(),
        };
        let err = repos.players.update(id, &details).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_all_newest_first() {
        let repos = MemoryStore::new().repositories();
        let mut older = Team::new("Brazil");
        older.created_at -= chrono::Duration::seconds(10);
        let newer = Team::new("Argentina");
        repos.teams.create(&older).await.unwrap();
        repos.teams.create(&newer).await.unwrap();

        let names: Vec<String> = repos
            .teams
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Argentina", "Brazil"]);
    }

    // ============================================================
    // Teams
    // ============================================================

    #[tokio::test]
    async fn test_duplicate_team_name_conflicts() {
        let repos = MemoryStore::new().repositories();
        repos.teams.create(&Team::new("Argentina")).await.unwrap();

        let err = repos.teams.create(&Team::new("Argentina")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), DUPLICATE_TEAM_NAME);
        assert_eq!(repos.teams.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_conflicts() {
        let repos = MemoryStore::new().repositories();
        let argentina = Team::new("Argentina");
        let brazil = Team::new("Brazil");
        repos.teams.create(&argentina).await.unwrap();
        repos.teams.create(&brazil).await.unwrap();

        let rename = TeamDetails {
            name: "Argentina".to_string(),
        };
        let err = repos.teams.update(brazil.id, &rename).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Renaming a team to its own name is fine
        let same = repos.teams.update(argentina.id, &rename).await.unwrap();
        assert_eq!(same.name, "Argentina");
    }

    #[tokio::test]
    async fn test_membership_rules() {
        let repos = MemoryStore::new().repositories();
        let team = Team::new("Argentina");
        let messi = Player::new("Messi", born());
        let di_maria = Player::new("Di Maria", born());
        repos.teams.create(&team).await.unwrap();
        repos.players.create(&messi).await.unwrap();
        repos.players.create(&di_maria).await.unwrap();

        repos.teams.add_player(team.id, messi.id).await.unwrap();
        repos.teams.add_player(team.id, di_maria.id).await.unwrap();

        let err = repos.teams.add_player(team.id, messi.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let names: Vec<String> = repos
            .teams
            .team_players(team.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Di Maria", "Messi"]);

        // Removing a non-member succeeds silently
        repos
            .teams
            .remove_player(team.id, uuid::Uuid::new_v4())
            .await
            .unwrap();
        repos.teams.remove_player(team.id, messi.id).await.unwrap();
        assert_eq!(repos.teams.team_players(team.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_membership_requires_both_sides() {
        let repos = MemoryStore::new().repositories();
        let team = Team::new("Argentina");
        repos.teams.create(&team).await.unwrap();

        let err = repos
            .teams
            .add_player(team.id, uuid::Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_team_delete_cascades() {
        let repos = MemoryStore::new().repositories();
        let argentina = Team::new("Argentina");
        let france = Team::new("France");
        let messi = Player::new("Messi", born());
        let cup = Tournament::new("World Cup");
        repos.teams.create(&argentina).await.unwrap();
        repos.teams.create(&france).await.unwrap();
        repos.players.create(&messi).await.unwrap();
        repos.tournaments.create(&cup).await.unwrap();
        repos.teams.add_player(argentina.id, messi.id).await.unwrap();
        repos.tournaments.add_team(cup.id, argentina.id).await.unwrap();
        let game = Match::new(fixture(argentina.id, france.id));
        repos.matches.create(&game).await.unwrap();

        repos.teams.delete(argentina.id).await.unwrap();

        assert!(repos.teams.team_players(argentina.id).await.unwrap().is_empty());
        assert!(repos.tournaments.tournament_teams(cup.id).await.unwrap().is_empty());
        assert!(repos.matches.get_all().await.unwrap().is_empty());
        // The player itself survives
        assert!(repos.players.get_by_id(messi.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_player_delete_removes_memberships() {
        let repos = MemoryStore::new().repositories();
        let team = Team::new("Argentina");
        let messi = Player::new("Messi", born());
        repos.teams.create(&team).await.unwrap();
        repos.players.create(&messi).await.unwrap();
        repos.teams.add_player(team.id, messi.id).await.unwrap();

        repos.players.delete(messi.id).await.unwrap();
        assert!(repos.teams.team_players(team.id).await.unwrap().is_empty());
    }

    // ============================================================
    // Tournaments
    // ============================================================

    #[tokio::test]
    async fn test_tournament_registration() {
        let repos = MemoryStore::new().repositories();
        let cup = Tournament::new("Copa America");
        let team = Team::new("Argentina");
        repos.tournaments.create(&cup).await.unwrap();
        repos.teams.create(&team).await.unwrap();

        repos.tournaments.add_team(cup.id, team.id).await.unwrap();
        let err = repos.tournaments.add_team(cup.id, team.id).await.unwrap_err();
        assert_eq!(err.to_string(), DUPLICATE_TOURNAMENT_TEAM);

        repos.tournaments.delete(cup.id).await.unwrap();
        assert!(repos.tournaments.tournament_teams(cup.id).await.unwrap().is_empty());
        assert!(repos.teams.get_by_id(team.id).await.is_ok());
    }

    // ============================================================
    // Matches
    // ============================================================

    #[tokio::test]
    async fn test_match_constraints() {
        let repos = MemoryStore::new().repositories();
        let argentina = Team::new("Argentina");
        repos.teams.create(&argentina).await.unwrap();

        let err = repos
            .matches
            .create(&Match::new(fixture(argentina.id, argentina.id)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), SELF_MATCH);

        let err = repos
            .matches
            .create(&Match::new(fixture(argentina.id, uuid::Uuid::new_v4())))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let france = Team::new("France");
        repos.teams.create(&france).await.unwrap();
        let mut negative = fixture(argentina.id, france.id);
        negative.goal_scored_team2 = -1;
        let err = repos.matches.create(&Match::new(negative)).await.unwrap_err();
        assert_eq!(err.to_string(), NEGATIVE_GOALS);

        assert!(repos.matches.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_match_update_returns_stored_row() {
        let repos = MemoryStore::new().repositories();
        let argentina = Team::new("Argentina");
        let france = Team::new("France");
        repos.teams.create(&argentina).await.unwrap();
        repos.teams.create(&france).await.unwrap();
        let game = Match::new(fixture(argentina.id, france.id));
        repos.matches.create(&game).await.unwrap();

        let mut details = game.details();
        details.goal_scored_team2 = 3;
        let updated = repos.matches.update(game.id, &details).await.unwrap();

        assert_eq!(updated.id, game.id);
        assert_eq!(updated.created_at, game.created_at);
        assert_eq!(updated.goal_scored_team2, 3);
    }
}
