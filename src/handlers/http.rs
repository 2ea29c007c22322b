//! Shared application state and the health probe.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::{JwtSecret, SessionCookie};
use crate::services::UserService;

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub jwt_secret: JwtSecret,
    pub session_cookie: SessionCookie,
}

impl AppState {
    pub fn users(&self) -> &UserService {
        &self.users
    }
    pub fn jwt_secret(&self) -> &JwtSecret {
        &self.jwt_secret
    }
    pub fn session_cookie(&self) -> &SessionCookie {
        &self.session_cookie
    }
}

/// GET /health: liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "user-portal" })),
    )
}
