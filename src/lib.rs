//! User management backend: user CRUD, role listings and cookie-based sessions.
//!
//! Handlers call `services::UserService`, which stores users through a
//! `repositories::UserRepository` (PostgreSQL or in-memory). Login issues a JWT in
//! the HTTP-only `token` cookie; `/session` and `/nav` derive the session from it.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod frontend;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::http::AppState;
pub use services::UserService;

use axum::extract::State;
use axum::routing::{get, post};
use handlers::{http, users};
use models::Role;

/// Build the API router (users, roles, auth, session, nav, health). Used by main and by
/// integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let mut router = axum::Router::new()
        .route("/users", post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    for role in Role::ALL {
        router = router.route(
            &format!("/users/role/{}", role.listing_segment()),
            get(move |state: State<AppState>| users::list_users_by_role(state, role)),
        );
    }

    router
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session))
        .route("/nav", get(frontend::nav))
        .route("/health", get(http::health))
        .with_state(state)
}
