//! Integration tests: user CRUD, role listings, login/logout, session and nav.
//!
//! Run with `cargo test`. These drive the router in-process against the in-memory user
//! store. The PostgreSQL round trip runs only when `TEST_DATABASE_URL` is set.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;
use user_portal::auth::{JwtSecret, SessionCookie};
use user_portal::models::Role;
use user_portal::repositories::{InMemoryUserRepository, UserRepository};
use user_portal::{create_app, db, AppState, UserService};

const JWT_SECRET: &str = "test-jwt-secret-min-32-chars!!";

fn test_state(repo: Arc<dyn UserRepository>) -> AppState {
    AppState {
        users: UserService::new(repo),
        jwt_secret: JwtSecret::new(JWT_SECRET.to_string(), Duration::hours(1)),
        session_cookie: SessionCookie::default(),
    }
}

fn test_app() -> axum::Router {
    create_app(test_state(Arc::new(InMemoryUserRepository::new())))
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{}=", name);
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(String::from)
    }

    /// Value of the `token` cookie set by this response.
    fn token(&self) -> Option<String> {
        let cookie = self.set_cookie("token")?;
        let value = cookie.trim_start_matches("token=").split(';').next()?;
        Some(value.to_string())
    }
}

async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

async fn create_user(app: &axum::Router, email: &str, password: &str, role: Role) -> Value {
    let res = send(
        app,
        Method::POST,
        "/users",
        Some(json!({ "email": email, "password": password, "role": role, "name": "Test User" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "create should succeed");
    res.json()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let res = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["status"], "ok");
}

#[tokio::test]
async fn create_user_returns_created_user() {
    let app = test_app();
    let user = create_user(&app, "Ana@Example.com", "password123", Role::Supervisor).await;

    assert_eq!(user["email"], "ana@example.com");
    assert_eq!(user["role"], "SUPERVISOR");
    assert_eq!(user["name"], "Test User");
    assert!(user["id"].as_str().is_some());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let id = user["id"].as_str().unwrap();
    let res = send(&app, Method::GET, &format!("/users/{}", id), None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), user);
}

#[tokio::test]
async fn create_user_rejects_bad_payloads() {
    let app = test_app();

    let res = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "email": "nope", "password": "short", "role": "HR" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["message"].as_str().is_some());

    let res = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "email": "a@example.com", "password": "password123", "role": "ADMIN" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["message"].as_str().is_some());
}

#[tokio::test]
async fn create_user_duplicate_email_conflicts() {
    let app = test_app();
    create_user(&app, "dup@example.com", "password123", Role::Hr).await;
    let res = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "email": "DUP@example.com", "password": "password123", "role": "HR" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = test_app();
    let missing = uuid::Uuid::new_v4().to_string();
    create_user(&app, "taken@example.com", "password123", Role::Hr).await;

    for id in [missing.as_str(), "12345"] {
        let uri = format!("/users/{}", id);
        let res = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.json()["message"], "User not found");

        let res = send(&app, Method::PUT, &uri, Some(json!({ "role": "HR" })), None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);

        // Another user's email must not turn a missing id into a conflict.
        let res = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({ "email": "taken@example.com" })),
            None,
        )
        .await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);

        let res = send(&app, Method::DELETE, &uri, None, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn update_user_returns_updated_record() {
    let app = test_app();
    let user = create_user(&app, "up@example.com", "password123", Role::Employee).await;
    let uri = format!("/users/{}", user["id"].as_str().unwrap());

    let res = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "role": "MANAGER", "name": "Promoted" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let updated = res.json();
    assert_eq!(updated["role"], "MANAGER");
    assert_eq!(updated["name"], "Promoted");
    assert_eq!(updated["email"], "up@example.com");
}

#[tokio::test]
async fn delete_user_then_unfindable() {
    let app = test_app();
    let user = create_user(&app, "gone@example.com", "password123", Role::Secretary).await;
    let uri = format!("/users/{}", user["id"].as_str().unwrap());

    let res = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_empty());

    let res = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_listings_only_contain_that_role() {
    let app = test_app();
    for (i, role) in Role::ALL.into_iter().enumerate() {
        create_user(&app, &format!("a{}@example.com", i), "password123", role).await;
        create_user(&app, &format!("b{}@example.com", i), "password123", role).await;
    }

    for role in Role::ALL {
        let uri = format!("/users/role/{}", role.listing_segment());
        let res = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(res.status, StatusCode::OK, "{}", uri);
        let users = res.json();
        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u["role"] == role.as_str()));
    }
}

#[tokio::test]
async fn empty_role_listing_is_empty_array() {
    let app = test_app();
    let res = send(&app, Method::GET, "/users/role/secretaries", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn login_sets_http_only_token_cookie() {
    let app = test_app();
    let user = create_user(&app, "boss@example.com", "password123", Role::Manager).await;

    let res = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "boss@example.com", "password": "password123" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()["message"], "User logged in successfully.");

    let cookie = res.set_cookie("token").expect("token cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));

    let token = res.token().unwrap();
    let claims = JwtSecret::new(JWT_SECRET.to_string(), Duration::hours(1))
        .validate(&token)
        .unwrap();
    assert_eq!(claims.sub, user["id"].as_str().unwrap());
    assert_eq!(claims.email, "boss@example.com");
    assert_eq!(claims.role, Role::Manager);
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let app = test_app();
    create_user(&app, "x@example.com", "password123", Role::Hr).await;

    for body in [
        json!({ "password": "password123" }),
        json!({ "email": "x@example.com" }),
        json!({ "email": "", "password": "password123" }),
        json!({}),
    ] {
        let res = send(&app, Method::POST, "/login", Some(body), None).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.json()["message"], "Email and password are required.");
        assert!(res.set_cookie("token").is_none());
    }
}

#[tokio::test]
async fn login_with_bad_credentials_is_rejected_uniformly() {
    let app = test_app();
    create_user(&app, "y@example.com", "password123", Role::Hr).await;

    for body in [
        json!({ "email": "y@example.com", "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": "password123" }),
    ] {
        let res = send(&app, Method::POST, "/login", Some(body), None).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.json()["message"], "Invalid credentials");
        assert!(res.set_cookie("token").is_none());
    }
}

#[tokio::test]
async fn logout_clears_token_cookie() {
    let app = test_app();
    create_user(&app, "z@example.com", "password123", Role::Employee).await;
    let login = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "z@example.com", "password": "password123" })),
        None,
    )
    .await;
    let token = login.token().unwrap();

    let res = send(&app, Method::POST, "/logout", None, Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["message"], "User has been log out.");
    let cookie = res.set_cookie("token").expect("removal cookie");
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Path=/"));

    // Without a session cookie, logout still answers 200.
    let res = send(&app, Method::POST, "/logout", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn session_and_nav_follow_the_cookie() {
    let app = test_app();
    create_user(&app, "s@example.com", "password123", Role::Secretary).await;

    let res = send(&app, Method::GET, "/session", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "authenticated": false }));

    let res = send(&app, Method::GET, "/nav", None, None).await;
    let html = String::from_utf8(res.body).unwrap();
    assert!(html.contains(">Home<"));
    assert!(html.contains(">Login<"));
    assert!(!html.contains(">Logout<"));

    let login = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "s@example.com", "password": "password123" })),
        None,
    )
    .await;
    let token = login.token().unwrap();

    let res = send(&app, Method::GET, "/session", None, Some(&token)).await;
    let session = res.json();
    assert_eq!(session["authenticated"], true);
    assert_eq!(session["user"]["email"], "s@example.com");
    assert_eq!(session["user"]["role"], "SECRETARY");

    let res = send(&app, Method::GET, "/nav", None, Some(&token)).await;
    let html = String::from_utf8(res.body).unwrap();
    assert!(html.contains(">Home<"));
    assert!(html.contains(">Logout<"));
    assert!(!html.contains(">Login<"));

    let res = send(&app, Method::GET, "/session", None, Some("not-a-jwt")).await;
    assert_eq!(res.json()["authenticated"], false);
}

#[tokio::test]
async fn postgres_user_round_trip() {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("Skip integration test: set TEST_DATABASE_URL");
            return;
        }
    };
    let pool = match db::create_pool(&database_url).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Skip integration test: {}", e);
            return;
        }
    };
    db::migrate(&pool).await.unwrap();
    let app = create_app(test_state(Arc::new(db::PgUserRepository::new(pool))));

    let email = format!(
        "pg-{}@example.com",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
    );
    let user = create_user(&app, &email, "password123", Role::Hr).await;
    let uri = format!("/users/{}", user["id"].as_str().unwrap());

    let res = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": email, "password": "password123" })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = send(&app, Method::PUT, &uri, Some(json!({ "role": "SUPERVISOR" })), None).await;
    assert_eq!(res.json()["role"], "SUPERVISOR");

    let res = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let res = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
