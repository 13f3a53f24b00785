//! Player endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::Response,
};
use football_tournament::player::Player;

use super::{
    AppState, created,
    error::ApiError,
    message, ok,
    payload::{self, INVALID_BIRTH_DATE, INVALID_DATE, PlayerPayload},
    preflight,
    routing::{self, Route, RouteError},
};

/// Serve everything under `/api/players`.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let players = &state.players;

    match routing::resolve(&routing::PLAYERS, &method, uri.path())? {
        Route::Preflight => Ok(preflight()),
        Route::List => Ok(ok(players.list_players().await?)),
        Route::Create => {
            let details = payload::decode::<PlayerPayload>(&body)?.into_details(INVALID_BIRTH_DATE)?;
            let player = Player::new(details.name, details.date_birth);
            players.create_player(&player).await?;
            Ok(created(player))
        }
        Route::Get(id) => Ok(ok(players.get_player(id).await?)),
        Route::Update(id) => {
            let details = payload::decode::<PlayerPayload>(&body)?.into_details(INVALID_DATE)?;
            Ok(ok(players.update_player(id, &details).await?))
        }
        Route::Delete(id) => {
            players.delete_player(id).await?;
            Ok(message("Player deleted"))
        }
        Route::ListRelated(_) | Route::Attach { .. } | Route::Detach { .. } => {
            Err(RouteError::MethodNotAllowed.into())
        }
    }
}
