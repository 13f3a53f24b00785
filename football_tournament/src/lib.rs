//! # Football Tournament
//!
//! Domain, storage and use cases for a football tournament service: players,
//! teams, tournaments and matches, plus the two many-to-many relations
//! (team↔player, tournament↔team).
//!
//! ## Layers
//!
//! - [`player`], [`team`], [`tournament`], [`matches`]: entity models and one
//!   manager per entity. Managers add the cross-entity checks (both sides of a
//!   relation exist, match teams are distinct and exist) and otherwise call
//!   straight through to storage.
//! - [`db`]: repository traits with PostgreSQL and in-memory implementations,
//!   connection pooling, migrations and statement timeouts.
//! - [`errors`]: [`TournamentError`] and its coarse [`ErrorKind`], which callers
//!   switch on to pick a response.
//!
//! ## Example
//!
//! ```
//! use football_tournament::db::MemoryStore;
//! use football_tournament::matches::{Match, MatchDetails, MatchManager};
//! use football_tournament::team::{Team, TeamManager};
//! use football_tournament::ErrorKind;
//!
//! #[tokio::main]
//! async fn main() {
//!     let repos = MemoryStore::new().repositories();
//!     let teams = TeamManager::new(repos.teams.clone(), repos.players.clone());
//!     let matches = MatchManager::new(repos.matches.clone(), repos.teams.clone());
//!
//!     let argentina = Team::new("Argentina");
//!     teams.create_team(&argentina).await.unwrap();
//!
//!     let details = MatchDetails {
//!         match_number: 1,
//!         date: chrono::Utc::now(),
//!         team1_id: argentina.id,
//!         team2_id: argentina.id,
//!         goal_scored_team1: 0,
//!         goal_scored_team2: 0,
//!     };
//!     let err = matches.create_match(&Match::new(details)).await.unwrap_err();
//!     assert_eq!(err.kind(), ErrorKind::Validation);
//! }
//! ```

/// Storage backends and repository contracts.
pub mod db;

/// Error taxonomy shared by every layer.
pub mod errors;
pub use errors::{ErrorKind, TournamentError, TournamentResult};

pub mod matches;
pub mod player;
pub mod team;
pub mod tournament;
