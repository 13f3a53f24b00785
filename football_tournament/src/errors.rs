//! Error types shared by repositories and managers.

use std::time::Duration;

use sqlx::error::{DatabaseError, ErrorKind as DbErrorKind};
use thiserror::Error;

/// Message returned when a match is scheduled between a team and itself.
pub const SELF_MATCH: &str = "a team cannot play against itself";

/// Message returned when a team name is already taken.
pub const DUPLICATE_TEAM_NAME: &str = "team name already exists";

/// Message returned when a player is added twice to the same team.
pub const DUPLICATE_TEAM_PLAYER: &str = "player already belongs to this team";

/// Message returned when a team is added twice to the same tournament.
pub const DUPLICATE_TOURNAMENT_TEAM: &str = "team already registered in this tournament";

/// Message returned when a player is stored with a blank name.
pub const EMPTY_PLAYER_NAME: &str = "player name must not be empty";

/// Message returned when a match carries a negative score.
pub const NEGATIVE_GOALS: &str = "goal counts must be non-negative";

/// Message returned when a write references a row that no longer exists.
pub const DANGLING_REFERENCE: &str = "referenced entity does not exist";

/// Coarse classification used by callers to choose a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
    Internal,
}

/// Errors produced by the domain layer
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Business rule or constraint check failed
    #[error("{0}")]
    Validation(String),

    /// Write collides with existing data
    #[error("{0}")]
    Conflict(String),

    /// Storage or connectivity failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Statement exceeded the configured timeout
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl TournamentError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Database(_) | Self::Timeout(_) | Self::Migration(_) => ErrorKind::Internal,
        }
    }

    /// Replace the message of a `NotFound` error, leaving other kinds untouched.
    ///
    /// Used by managers to say which side of a relation was missing.
    pub fn relabel_not_found(self, message: &str) -> Self {
        match self {
            Self::NotFound(_) => Self::NotFound(message.to_string()),
            other => other,
        }
    }
}

impl From<sqlx::Error> for TournamentError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(translated) = translate_constraint(db_err.as_ref()) {
                return translated;
            }
        }
        Self::Database(err)
    }
}

/// Map a constraint violation reported by PostgreSQL onto a domain error.
fn translate_constraint(db_err: &dyn DatabaseError) -> Option<TournamentError> {
    let constraint = db_err.constraint().unwrap_or_default();
    match db_err.kind() {
        DbErrorKind::UniqueViolation => Some(TournamentError::conflict(match constraint {
            "teams_name_key" => DUPLICATE_TEAM_NAME,
            "team_players_pkey" => DUPLICATE_TEAM_PLAYER,
            "tournament_teams_pkey" => DUPLICATE_TOURNAMENT_TEAM,
            _ => "duplicate record",
        })),
        DbErrorKind::ForeignKeyViolation => Some(TournamentError::not_found(DANGLING_REFERENCE)),
        DbErrorKind::CheckViolation => Some(TournamentError::validation(match constraint {
            "matches_distinct_teams" => SELF_MATCH,
            "matches_goals_non_negative" => NEGATIVE_GOALS,
            "players_name_not_empty" => EMPTY_PLAYER_NAME,
            _ => "constraint violated",
        })),
        _ => None,
    }
}

/// Result type for domain operations
pub type TournamentResult<T> = Result<T, TournamentError>;
