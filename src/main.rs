//! Entry point: load config, wire dependencies, and run the server.

use axum::http::{header, HeaderValue, Method};
use chrono::Duration;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use user_portal::auth::{JwtSecret, SessionCookie};
use user_portal::config::Config;
use user_portal::db;
use user_portal::repositories::{InMemoryUserRepository, UserRepository};
use user_portal::{create_app, AppState, UserService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let repo: Arc<dyn UserRepository> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::migrate(&pool).await?;
            tracing::info!("using PostgreSQL user store");
            Arc::new(db::PgUserRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; users are kept in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let state = AppState {
        users: UserService::new(repo),
        jwt_secret: JwtSecret::new(
            config.jwt_secret.clone(),
            Duration::hours(config.token_ttl_hours),
        ),
        session_cookie: SessionCookie::new(config.cookie_secure),
    };

    let mut app = create_app(state);

    // Static frontend build, if any, for everything the API does not route.
    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    if let Some(origin) = &config.frontend_origin {
        let origin: HeaderValue = origin
            .parse()
            .map_err(|_| anyhow::anyhow!("config: invalid FRONTEND_ORIGIN"))?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    let app = app.layer(TraceLayer::new_for_http());

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
