//! Request bodies and their conversion into domain values.
//!
//! Dates travel as RFC3339 strings and team references as UUID strings, so
//! each can be rejected with its own message.

use axum::body::Bytes;
use chrono::{DateTime, SubsecRound, Utc};
use football_tournament::errors::NEGATIVE_GOALS;
use football_tournament::matches::MatchDetails;
use football_tournament::player::PlayerDetails;
use football_tournament::team::TeamDetails;
use football_tournament::tournament::TournamentDetails;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::{ApiError, INVALID_PAYLOAD};

pub const INVALID_DATE: &str = "Invalid date format";
pub const INVALID_BIRTH_DATE: &str = "Invalid date format, use ISO 8601";

/// Decode a JSON body, rejecting anything malformed or incomplete.
pub fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {e}");
        ApiError::bad_request(INVALID_PAYLOAD)
    })
}

/// Parse an RFC3339 timestamp, truncated to the precision storage keeps.
pub fn parse_date(raw: &str, message: &'static str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc).trunc_subsecs(6))
        .map_err(|_| ApiError::bad_request(message))
}

fn parse_uuid(raw: &str, message: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(message))
}

#[derive(Debug, Deserialize)]
pub struct PlayerPayload {
    pub name: String,
    pub date_birth: String,
}

impl PlayerPayload {
    /// `date_message` differs between create and update.
    pub fn into_details(self, date_message: &'static str) -> Result<PlayerDetails, ApiError> {
        Ok(PlayerDetails {
            date_birth: parse_date(&self.date_birth, date_message)?,
            name: self.name,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamPayload {
    pub name: String,
}

impl From<TeamPayload> for TeamDetails {
    fn from(payload: TeamPayload) -> Self {
        Self { name: payload.name }
    }
}

#[derive(Debug, Deserialize)]
pub struct TournamentPayload {
    pub name: String,
}

impl From<TournamentPayload> for TournamentDetails {
    fn from(payload: TournamentPayload) -> Self {
        Self { name: payload.name }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchPayload {
    pub match_number: i32,
    pub date: String,
    pub team1_id: String,
    pub team2_id: String,
    pub goal_scored_team1: i32,
    pub goal_scored_team2: i32,
}

impl TryFrom<MatchPayload> for MatchDetails {
    type Error = ApiError;

    fn try_from(payload: MatchPayload) -> Result<Self, Self::Error> {
        let details = MatchDetails {
            match_number: payload.match_number,
            date: parse_date(&payload.date, INVALID_DATE)?,
            team1_id: parse_uuid(&payload.team1_id, "Invalid team1_id UUID")?,
            team2_id: parse_uuid(&payload.team2_id, "Invalid team2_id UUID")?,
            goal_scored_team1: payload.goal_scored_team1,
            goal_scored_team2: payload.goal_scored_team2,
        };
        if details.has_negative_goals() {
            return Err(ApiError::bad_request(NEGATIVE_GOALS));
        }
        Ok(details)
    }
}
