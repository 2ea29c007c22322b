//! Auth HTTP handlers: login, logout, session check.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AuthAppService;
use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;
use crate::middleware::SessionUser;

/// Login body. Both fields are optional so a missing one is reported as 400, not a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    fn credentials(&self) -> AppResult<(&str, &str)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::Validation(
                "Email and password are required.".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<(StatusCode, CookieJar, Json<Value>)> {
    let (email, password) = body.credentials()?;
    let user = AuthAppService::authenticate(state.users(), email, password).await?;
    let token = state.jwt_secret().issue(&user)?;
    info!(user_id = %user.id, "user logged in");

    Ok((
        StatusCode::CREATED,
        state.session_cookie().issue(jar, token),
        Json(json!({ "message": "User logged in successfully." })),
    ))
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        state.session_cookie().clear(jar),
        Json(json!({ "message": "User has been log out." })),
    )
}

/// GET /session: whether the `token` cookie holds a valid session.
pub async fn session(session: Option<SessionUser>) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: session.is_some(),
        user: session,
    })
}
