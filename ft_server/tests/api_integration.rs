//! Integration tests for the HTTP API.
//!
//! Drives the full router (routing, CORS, request IDs, handlers, managers)
//! over the in-memory store, so no database is needed.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use football_tournament::db::Repositories;
use ft_server::api::{AppState, create_router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For `oneshot` method

/// Helper to create a router over a fresh store
fn test_app() -> Router {
    create_router(AppState::new(&Repositories::in_memory()))
}

/// Send one request and decode the JSON response, if any
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_team(app: &Router, name: &str) -> String {
    let (status, team) = send(app, Method::POST, "/api/teams", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    team["id"].as_str().unwrap().to_string()
}

async fn create_player(app: &Router, name: &str) -> String {
    let (status, player) = send(
        app,
        Method::POST,
        "/api/players",
        Some(json!({ "name": name, "date_birth": "1987-06-24T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    player["id"].as_str().unwrap().to_string()
}

fn match_body(team1: &str, team2: &str) -> Value {
    json!({
        "match_number": 1,
        "date": "2026-06-11T18:00:00Z",
        "team1_id": team1,
        "team2_id": team2,
        "goal_scored_team1": 2,
        "goal_scored_team2": 1
    })
}

// ============================================================
// End-to-end scenario
// ============================================================

#[tokio::test]
async fn test_team_roster_and_self_match() {
    let app = test_app();

    let (status, team) =
        send(&app, Method::POST, "/api/teams", Some(json!({ "name": "Argentina" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(team["name"], "Argentina");
    assert!(team.get("players").is_none(), "Empty roster is omitted");
    let team_id = team["id"].as_str().unwrap().to_string();

    let (status, player) = send(
        &app,
        Method::POST,
        "/api/players",
        Some(json!({ "name": "Messi", "date_birth": "1987-06-24T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(player["date_birth"], "1987-06-24T00:00:00Z");
    let player_id = player["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/teams/{team_id}/players/{player_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Player added to team" }));

    let (status, roster) = send(
        &app,
        Method::GET,
        &format!("/api/teams/{team_id}/players"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["name"], "Messi");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/matches",
        Some(match_body(&team_id, &team_id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "a team cannot play against itself" }));
}

// ============================================================
// Players
// ============================================================

#[tokio::test]
async fn test_player_crud() {
    let app = test_app();
    let id = create_player(&app, "Leo").await;
    let uri = format!("/api/players/{id}");

    let (status, player) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(player["name"], "Leo");

    let (status, player) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Lionel Messi", "date_birth": "1987-06-24T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(player["name"], "Lionel Messi");
    assert_eq!(player["id"], id);

    let (status, players) = send(&app, Method::GET, "/api/players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(players.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Player deleted" }));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "player not found" }));
}

#[tokio::test]
async fn test_player_input_errors() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/players",
        Some(json!({ "name": "Messi", "date_birth": "24/06/1987" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid date format, use ISO 8601");

    let (status, body) = send(&app, Method::POST, "/api/players", Some(json!({ "name": 7 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request payload");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/players",
        Some(json!({ "name": "", "date_birth": "1987-06-24T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/players/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid UUID");

    let id = create_player(&app, "Messi").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/players/{id}"),
        Some(json!({ "name": "Messi", "date_birth": "yesterday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid date format");
}

// ============================================================
// Teams and memberships
// ============================================================

#[tokio::test]
async fn test_duplicate_team_name_conflicts() {
    let app = test_app();
    create_team(&app, "Argentina").await;

    let (status, _) = send(&app, Method::POST, "/api/teams", Some(json!({ "name": "Argentina" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, teams) = send(&app, Method::GET, "/api/teams", None).await;
    assert_eq!(teams.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_team_names() {
    const ATTEMPTS: usize = 16;
    let app = test_app();

    let handles: Vec<_> = (0..ATTEMPTS)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                send(&app, Method::POST, "/api/teams", Some(json!({ "name": "Dup" }))).await.0
            })
        })
        .collect();

    let mut statuses = Vec::with_capacity(ATTEMPTS);
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1, "statuses: {statuses:?}");
    assert_eq!(conflicts, ATTEMPTS - 1, "statuses: {statuses:?}");

    let (_, teams) = send(&app, Method::GET, "/api/teams", None).await;
    let teams = teams.as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["name"], "Dup");
}

#[tokio::test]
async fn test_membership_errors_are_bad_request() {
    let app = test_app();
    let team_id = create_team(&app, "Argentina").await;
    let player_id = create_player(&app, "Messi").await;
    let ghost = uuid::Uuid::new_v4();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/teams/{ghost}/players/{player_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "team not found");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/teams/{team_id}/players/{ghost}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "player not found");

    let uri = format!("/api/teams/{team_id}/players/{player_id}");
    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Duplicate membership");

    let (status, body) = send(&app, Method::GET, "/api/teams/bad/players", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid team UUID");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/teams/{team_id}/players/bad"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid player UUID");
}

#[tokio::test]
async fn test_remove_player_and_cascade_on_team_delete() {
    let app = test_app();
    let team_id = create_team(&app, "Argentina").await;
    let messi = create_player(&app, "Messi").await;
    let aguero = create_player(&app, "Aguero").await;

    for player in [&messi, &aguero] {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/teams/{team_id}/players/{player}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/teams/{team_id}/players/{messi}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Player removed from team" }));

    let (_, roster) = send(&app, Method::GET, &format!("/api/teams/{team_id}/players"), None).await;
    assert_eq!(roster.as_array().unwrap().len(), 1);
    assert_eq!(roster[0]["name"], "Aguero");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/teams/{team_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Team deleted" }));

    let (status, roster) = send(&app, Method::GET, &format!("/api/teams/{team_id}/players"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roster, json!([]));
}

// ============================================================
// Tournaments
// ============================================================

#[tokio::test]
async fn test_tournament_registration() {
    let app = test_app();
    let team_id = create_team(&app, "Argentina").await;

    let (status, cup) = send(
        &app,
        Method::POST,
        "/api/tournaments",
        Some(json!({ "name": "World Cup" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let cup_id = cup["id"].as_str().unwrap().to_string();

    let uri = format!("/api/tournaments/{cup_id}/teams/{team_id}");
    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Team added to tournament" }));

    let (_, teams) = send(&app, Method::GET, &format!("/api/tournaments/{cup_id}/teams"), None).await;
    assert_eq!(teams[0]["name"], "Argentina");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Team removed from tournament" }));

    let (status, cup) = send(
        &app,
        Method::PUT,
        &format!("/api/tournaments/{cup_id}"),
        Some(json!({ "name": "World Cup 2026" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cup["name"], "World Cup 2026");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/tournaments/{cup_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Tournament deleted" }));

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/tournaments/{cup_id}/teams/{team_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tournament not found");
}

// ============================================================
// Matches
// ============================================================

#[tokio::test]
async fn test_match_lifecycle() {
    let app = test_app();
    let argentina = create_team(&app, "Argentina").await;
    let france = create_team(&app, "France").await;

    let (status, game) = send(&app, Method::POST, "/api/matches", Some(match_body(&argentina, &france))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(game["goal_scored_team1"], 2);
    let uri = format!("/api/matches/{}", game["id"].as_str().unwrap());

    let mut updated = match_body(&argentina, &france);
    updated["goal_scored_team2"] = json!(3);
    let (status, game) = send(&app, Method::PUT, &uri, Some(updated)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["goal_scored_team2"], 3);

    let (status, body) = send(&app, Method::PUT, &uri, Some(match_body(&france, &france))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "a team cannot play against itself");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Match deleted" }));

    let (status, _) = send(&app, Method::PUT, &uri, Some(match_body(&argentina, &france))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_match_input_errors() {
    let app = test_app();
    let argentina = create_team(&app, "Argentina").await;
    let ghost = uuid::Uuid::new_v4().to_string();

    let (status, body) = send(&app, Method::POST, "/api/matches", Some(match_body(&ghost, &argentina))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "team1 not found");

    let (status, body) = send(&app, Method::POST, "/api/matches", Some(match_body(&argentina, &ghost))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "team2 not found");

    let (status, body) = send(&app, Method::POST, "/api/matches", Some(match_body("x", &argentina))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid team1_id UUID");

    let mut negative = match_body(&argentina, &ghost);
    negative["goal_scored_team1"] = json!(-2);
    let (status, _) = send(&app, Method::POST, "/api/matches", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, matches) = send(&app, Method::GET, "/api/matches", None).await;
    assert_eq!(matches, json!([]));
}

#[tokio::test]
async fn test_team_delete_removes_its_matches() {
    let app = test_app();
    let argentina = create_team(&app, "Argentina").await;
    let france = create_team(&app, "France").await;
    let (status, _) = send(&app, Method::POST, "/api/matches", Some(match_body(&argentina, &france))).await;
    assert_eq!(status, StatusCode::CREATED);

    send(&app, Method::DELETE, &format!("/api/teams/{france}"), None).await;

    let (_, matches) = send(&app, Method::GET, "/api/matches", None).await;
    assert_eq!(matches, json!([]));
}

// ============================================================
// Routing edge cases
// ============================================================

#[tokio::test]
async fn test_method_not_allowed() {
    let app = test_app();
    let id = create_team(&app, "Argentina").await;

    let (status, body) = send(&app, Method::PATCH, &format!("/api/teams/{id}"), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));

    let (status, _) = send(&app, Method::DELETE, "/api/matches", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(&app, Method::PUT, &format!("/api/teams/{id}/players"), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_options_returns_empty_ok() {
    let app = test_app();
    let (status, body) = send(&app, Method::OPTIONS, "/api/tournaments/anything", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/players")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
}

#[tokio::test]
async fn test_trailing_slash_lists() {
    let app = test_app();
    create_team(&app, "Argentina").await;
    let (status, teams) = send(&app, Method::GET, "/api/teams/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(teams.as_array().unwrap().len(), 1);
}
