//! Tournament endpoints, including `/api/tournaments/{id}/teams`.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::Response,
};
use football_tournament::tournament::{Tournament, TournamentDetails};

use super::{
    AppState, created,
    error::ApiError,
    message, ok,
    payload::{self, TournamentPayload},
    preflight,
    routing::{self, Route},
};

/// Serve everything under `/api/tournaments`.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let tournaments = &state.tournaments;

    match routing::resolve(&routing::TOURNAMENTS, &method, uri.path())? {
        Route::Preflight => Ok(preflight()),
        Route::List => Ok(ok(tournaments.list_tournaments().await?)),
        Route::Create => {
            let details = TournamentDetails::from(payload::decode::<TournamentPayload>(&body)?);
            let tournament = Tournament::new(details.name);
            tournaments.create_tournament(&tournament).await?;
            Ok(created(tournament))
        }
        Route::Get(id) => Ok(ok(tournaments.get_tournament(id).await?)),
        Route::Update(id) => {
            let details = TournamentDetails::from(payload::decode::<TournamentPayload>(&body)?);
            Ok(ok(tournaments.update_tournament(id, &details).await?))
        }
        Route::Delete(id) => {
            tournaments.delete_tournament(id).await?;
            Ok(message("Tournament deleted"))
        }
        Route::ListRelated(tournament_id) => {
            Ok(ok(tournaments.tournament_teams(tournament_id).await?))
        }
        Route::Attach { parent, child } => {
            tournaments
                .add_team_to_tournament(parent, child)
                .await
                .map_err(ApiError::relation)?;
            Ok(message("Team added to tournament"))
        }
        Route::Detach { parent, child } => {
            tournaments
                .remove_team_from_tournament(parent, child)
                .await
                .map_err(ApiError::relation)?;
            Ok(message("Team removed from tournament"))
        }
    }
}
