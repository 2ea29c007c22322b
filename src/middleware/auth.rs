//! Session extractor: the caller's identity, derived from the `token` cookie.

use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::auth::SessionCookie;
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::Role;

/// Extractor: authenticated user from a valid session token.
/// Use `Option<SessionUser>` where anonymous callers are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = SessionCookie::token(&jar)
            .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;
        let claims = state.jwt_secret().validate(token).map_err(|e| {
            debug!(error = %e, "rejected session token");
            e
        })?;
        Ok(SessionUser {
            id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
        })
    }
}
