//! User CRUD and role listing handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;
use crate::models::{Role, UserResponse};
use crate::services::{CreateUser, UpdateUser};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    pub role: Role,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    pub role: Option<Role>,
}

/// Ids that are not UUIDs cannot name a stored user.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::user_not_found())
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateUserRequest>, AppError>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state
        .users()
        .create_user(CreateUser {
            email: body.email,
            name: body.name,
            password: body.password,
            role: body.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users().get_user_by_id(parse_id(&id)?).await?;
    Ok(Json(user.into()))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateUserRequest>, AppError>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id)?;
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state
        .users()
        .update_user(
            id,
            UpdateUser {
                email: body.email,
                name: body.name,
                password: body.password,
                role: body.role,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.users().delete_user(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/role/{segment}: users holding `role`, oldest first. Routed once per role.
pub async fn list_users_by_role(
    State(state): State<AppState>,
    role: Role,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users().get_users_by_role(role).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_uuid_id_is_not_found() {
        assert!(matches!(parse_id("42"), Err(AppError::NotFound(_))));
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
    }

    #[test]
    fn create_request_validation() {
        let ok = CreateUserRequest {
            email: "x@example.com".to_string(),
            password: "longenough".to_string(),
            name: None,
            role: Role::Employee,
        };
        assert!(ok.validate().is_ok());

        let bad = CreateUserRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            name: None,
            role: Role::Employee,
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn update_request_allows_empty_body() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }
}
