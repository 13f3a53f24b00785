//! Matches between two teams.

pub mod manager;
pub mod models;

pub use manager::MatchManager;
pub use models::{Match, MatchDetails, MatchId};
