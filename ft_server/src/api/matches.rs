//! Match endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::Response,
};
use football_tournament::matches::{Match, MatchDetails};

use super::{
    AppState, created,
    error::ApiError,
    message, ok,
    payload::{self, MatchPayload},
    preflight,
    routing::{self, Route, RouteError},
};

/// Serve everything under `/api/matches`.
///
/// Scheduling failures on create and update (self-match, unknown team) are
/// reported as 400. Updating a match that does not exist is 404.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let matches = &state.matches;

    match routing::resolve(&routing::MATCHES, &method, uri.path())? {
        Route::Preflight => Ok(preflight()),
        Route::List => Ok(ok(matches.list_matches().await?)),
        Route::Create => {
            let details = MatchDetails::try_from(payload::decode::<MatchPayload>(&body)?)?;
            let game = Match::new(details);
            matches
                .create_match(&game)
                .await
                .map_err(ApiError::relation)?;
            Ok(created(game))
        }
        Route::Get(id) => Ok(ok(matches.get_match(id).await?)),
        Route::Update(id) => {
            let details = MatchDetails::try_from(payload::decode::<MatchPayload>(&body)?)?;
            matches.get_match(id).await?;
            let game = matches
                .update_match(id, &details)
                .await
                .map_err(ApiError::relation)?;
            Ok(ok(game))
        }
        Route::Delete(id) => {
            matches.delete_match(id).await?;
            Ok(message("Match deleted"))
        }
        Route::ListRelated(_) | Route::Attach { .. } | Route::Detach { .. } => {
            Err(RouteError::MethodNotAllowed.into())
        }
    }
}
