//! HTTP API for the football tournament service.
//!
//! # Architecture
//!
//! Each resource is mounted under its prefix and served by a single
//! `dispatch` handler. The handler asks [`routing::resolve`] which operation
//! the `(method, path)` pair names, then decodes the body, calls the manager
//! and encodes the result.
//!
//! # Endpoints Overview
//!
//! ```text
//! GET     /health
//!
//! GET     /api/players              POST /api/players
//! GET     /api/players/{id}         PUT  /api/players/{id}     DELETE /api/players/{id}
//!
//! GET     /api/teams                POST /api/teams
//! GET     /api/teams/{id}           PUT  /api/teams/{id}       DELETE /api/teams/{id}
//! GET     /api/teams/{id}/players
//! POST    /api/teams/{id}/players/{player_id}
//! DELETE  /api/teams/{id}/players/{player_id}
//!
//! GET     /api/tournaments          POST /api/tournaments
//! GET     /api/tournaments/{id}     PUT  /api/tournaments/{id} DELETE /api/tournaments/{id}
//! GET     /api/tournaments/{id}/teams
//! POST    /api/tournaments/{id}/teams/{team_id}
//! DELETE  /api/tournaments/{id}/teams/{team_id}
//!
//! GET     /api/matches              POST /api/matches
//! GET     /api/matches/{id}         PUT  /api/matches/{id}     DELETE /api/matches/{id}
//! ```
//!
//! # CORS
//!
//! `/api` routes allow any origin with `GET, POST, PUT, DELETE, OPTIONS` and
//! the `Content-Type` and `Authorization` headers. `/health` has no CORS layer.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use football_tournament::db::Repositories;
//! use ft_server::api::{AppState, create_router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(&Repositories::in_memory());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod matches;
pub mod payload;
pub mod players;
pub mod request_id;
pub mod routing;
pub mod teams;
pub mod tournaments;

use std::sync::Arc;

use axum::{
    Router,
    handler::Handler,
    http::{Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{any, get},
};
use football_tournament::db::Repositories;
use football_tournament::matches::MatchManager;
use football_tournament::player::PlayerManager;
use football_tournament::team::TeamManager;
use football_tournament::tournament::TournamentManager;
use serde::Serialize;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use routing::Resource;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub players: Arc<PlayerManager>,
    pub teams: Arc<TeamManager>,
    pub tournaments: Arc<TournamentManager>,
    pub matches: Arc<MatchManager>,
}

impl AppState {
    /// Build one manager per entity over the given repositories.
    pub fn new(repos: &Repositories) -> Self {
        Self {
            players: Arc::new(PlayerManager::new(repos.players.clone())),
            teams: Arc::new(TeamManager::new(repos.teams.clone(), repos.players.clone())),
            tournaments: Arc::new(TournamentManager::new(
                repos.tournaments.clone(),
                repos.teams.clone(),
            )),
            matches: Arc::new(MatchManager::new(repos.matches.clone(), repos.teams.clone())),
        }
    }
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use ft_server::api::{create_router, AppState};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let state: AppState = unimplemented!();
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(mount(routing::PLAYERS, players::dispatch))
        .merge(mount(routing::TEAMS, teams::dispatch))
        .merge(mount(routing::TOURNAMENTS, tournaments::dispatch))
        .merge(mount(routing::MATCHES, matches::dispatch))
        .layer(cors_layer());

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(ServiceBuilder::new().layer(middleware::from_fn(request_id::request_id_middleware)))
        .with_state(state)
}

/// Serve a resource's bare prefix, its trailing-slash form and everything
/// below it from one handler.
fn mount<H, T>(resource: Resource, handler: H) -> Router<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    Router::new()
        .route(resource.prefix, any(handler.clone()))
        .route(&format!("{}/", resource.prefix), any(handler.clone()))
        .route(&format!("{}/{{*rest}}", resource.prefix), any(handler))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Liveness probe.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "tournament-api"
    }))
}

/// Empty 200 for `OPTIONS` requests that reach a handler.
pub(crate) fn preflight() -> Response {
    StatusCode::OK.into_response()
}

pub(crate) fn ok<T: Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

pub(crate) fn created<T: Serialize>(value: T) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

/// `{"message": ...}` confirmation body
pub(crate) fn message(text: &str) -> Response {
    ok(json!({ "message": text }))
}
