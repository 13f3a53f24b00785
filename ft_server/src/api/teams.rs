//! Team endpoints, including `/api/teams/{id}/players`.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::Response,
};
use football_tournament::team::{Team, TeamDetails};

use super::{
    AppState, created,
    error::ApiError,
    message, ok,
    payload::{self, TeamPayload},
    preflight,
    routing::{self, Route},
};

/// Serve everything under `/api/teams`.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let teams = &state.teams;

    match routing::resolve(&routing::TEAMS, &method, uri.path())? {
        Route::Preflight => Ok(preflight()),
        Route::List => Ok(ok(teams.list_teams().await?)),
        Route::Create => {
            let details = TeamDetails::from(payload::decode::<TeamPayload>(&body)?);
            let team = Team::new(details.name);
            teams.create_team(&team).await?;
            Ok(created(team))
        }
        Route::Get(id) => Ok(ok(teams.get_team(id).await?)),
        Route::Update(id) => {
            let details = TeamDetails::from(payload::decode::<TeamPayload>(&body)?);
            Ok(ok(teams.update_team(id, &details).await?))
        }
        Route::Delete(id) => {
            teams.delete_team(id).await?;
            Ok(message("Team deleted"))
        }
        Route::ListRelated(team_id) => Ok(ok(teams.team_players(team_id).await?)),
        Route::Attach { parent, child } => {
            teams
                .add_player_to_team(parent, child)
                .await
                .map_err(ApiError::relation)?;
            Ok(message("Player added to team"))
        }
        Route::Detach { parent, child } => {
            teams
                .remove_player_from_team(parent, child)
                .await
                .map_err(ApiError::relation)?;
            Ok(message("Player removed from team"))
        }
    }
}
