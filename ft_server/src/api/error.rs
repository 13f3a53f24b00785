//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": "<message>"}` with a status
//! chosen from the error kind, never from the message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use football_tournament::{ErrorKind, TournamentError};
use serde_json::json;

use super::routing::RouteError;

pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Error returned by the resource handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Malformed input: body, identifier, date or score
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Mapping for relation changes and match writes.
    ///
    /// Every domain rejection becomes 400; storage failures stay 500.
    pub fn relation(err: TournamentError) -> Self {
        match err.kind() {
            ErrorKind::Internal => err.into(),
            ErrorKind::NotFound | ErrorKind::Validation | ErrorKind::Conflict => {
                Self::bad_request(err.to_string())
            }
        }
    }
}

/// Mapping for single-entity operations
impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        let status = match err.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        let status = match err {
            RouteError::InvalidId(_) => StatusCode::BAD_REQUEST,
            RouteError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
