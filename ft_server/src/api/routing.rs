//! Path resolution for the resource endpoints.
//!
//! [`resolve`] turns `(method, path)` into a [`Route`] without touching any
//! state, so every edge case of the URL scheme is testable in isolation:
//!
//! ```text
//! OPTIONS <anything>                    -> Preflight
//! GET     /api/teams                    -> List
//! POST    /api/teams                    -> Create
//! GET     /api/teams/{id}               -> Get
//! PUT     /api/teams/{id}               -> Update
//! DELETE  /api/teams/{id}               -> Delete
//! GET     /api/teams/{id}/players       -> ListRelated
//! POST    /api/teams/{id}/players/{pid} -> Attach
//! DELETE  /api/teams/{id}/players/{pid} -> Detach
//! ```

use axum::http::Method;
use uuid::Uuid;

/// Nested collection under a resource, e.g. the players of a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubResource {
    /// Path segment naming the collection
    pub segment: &'static str,
    /// Message for an unparseable parent id
    pub invalid_parent: &'static str,
    /// Message for an unparseable child id
    pub invalid_child: &'static str,
}

/// A top-level collection served under a fixed prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub prefix: &'static str,
    pub sub: Option<SubResource>,
}

pub const PLAYERS: Resource = Resource {
    prefix: "/api/players",
    sub: None,
};

pub const TEAMS: Resource = Resource {
    prefix: "/api/teams",
    sub: Some(SubResource {
        segment: "players",
        invalid_parent: "Invalid team UUID",
        invalid_child: "Invalid player UUID",
    }),
};

pub const TOURNAMENTS: Resource = Resource {
    prefix: "/api/tournaments",
    sub: Some(SubResource {
        segment: "teams",
        invalid_parent: "Invalid tournament UUID",
        invalid_child: "Invalid team UUID",
    }),
};

pub const MATCHES: Resource = Resource {
    prefix: "/api/matches",
    sub: None,
};

/// Operation selected for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    List,
    Create,
    Get(Uuid),
    Update(Uuid),
    Delete(Uuid),
    ListRelated(Uuid),
    Attach { parent: Uuid, child: Uuid },
    Detach { parent: Uuid, child: Uuid },
}

/// Why a request could not be routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("{0}")]
    InvalidId(&'static str),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

pub const INVALID_UUID: &str = "Invalid UUID";

/// Resolve a request against one resource.
///
/// Identifiers are parsed before the method is considered for nested paths,
/// so a malformed id yields 400 even for an unsupported method.
pub fn resolve(resource: &Resource, method: &Method, path: &str) -> Result<Route, RouteError> {
    if method == Method::OPTIONS {
        return Ok(Route::Preflight);
    }

    let rest = path
        .strip_prefix(resource.prefix)
        .unwrap_or(path)
        .trim_matches('/');
    let segments: Vec<&str> = rest.split('/').collect();

    if let Some(sub) = resource.sub {
        if segments.len() >= 3 && segments[1] == sub.segment {
            let parent = parse_id(segments[0], sub.invalid_parent)?;
            let child = parse_id(segments[2], sub.invalid_child)?;
            return match *method {
                Method::POST => Ok(Route::Attach { parent, child }),
                Method::DELETE => Ok(Route::Detach { parent, child }),
                _ => Err(RouteError::MethodNotAllowed),
            };
        }

        if segments.len() == 2 && segments[1] == sub.segment {
            let parent = parse_id(segments[0], sub.invalid_parent)?;
            return match *method {
                Method::GET => Ok(Route::ListRelated(parent)),
                _ => Err(RouteError::MethodNotAllowed),
            };
        }
    }

    match (method.clone(), rest.is_empty()) {
        (Method::GET, true) => Ok(Route::List),
        (Method::POST, true) => Ok(Route::Create),
        (Method::GET, false) => Ok(Route::Get(parse_id(rest, INVALID_UUID)?)),
        (Method::PUT, false) => Ok(Route::Update(parse_id(rest, INVALID_UUID)?)),
        (Method::DELETE, false) => Ok(Route::Delete(parse_id(rest, INVALID_UUID)?)),
        _ => Err(RouteError::MethodNotAllowed),
    }
}

fn parse_id(raw: &str, message: &'static str) -> Result<Uuid, RouteError> {
    Uuid::parse_str(raw).map_err(|_| RouteError::InvalidId(message))
}
