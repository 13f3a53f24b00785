//! Players: the leaf entity of the domain.
//!
//! Players exist on their own and are linked to teams through
//! [`TeamManager::add_player_to_team`](crate::team::TeamManager::add_player_to_team).

pub mod manager;
pub mod models;

pub use manager::PlayerManager;
pub use models::{Player, PlayerDetails, PlayerId};
