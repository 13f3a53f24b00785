//! Tournaments and the teams registered in them.
//!
//! ## Example
//!
//! ```no_run
//! use football_tournament::db::{MemoryStore, TeamRepository};
//! use football_tournament::team::Team;
//! use football_tournament::tournament::{Tournament, TournamentManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repos = MemoryStore::new().repositories();
//!     let manager = TournamentManager::new(repos.tournaments.clone(), repos.teams.clone());
//!
//!     let team = Team::new("Argentina");
//!     repos.teams.create(&team).await?;
//!
//!     let cup = Tournament::new("World Cup 2026");
//!     manager.create_tournament(&cup).await?;
//!     manager.add_team_to_tournament(cup.id, team.id).await?;
//!
//!     for team in manager.tournament_teams(cup.id).await? {
//!         println!("{} plays in {}", team.name, cup.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod manager;
pub mod models;

pub use manager::TournamentManager;
pub use models::{Tournament, TournamentDetails, TournamentId};
