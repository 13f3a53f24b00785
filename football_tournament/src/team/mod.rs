//! Teams and their player memberships.
//!
//! Membership is many-to-many: a player can belong to several teams. Team
//! names are unique; the storage layer enforces it.

pub mod manager;
pub mod models;

pub use manager::TeamManager;
pub use models::{Team, TeamDetails, TeamId};
