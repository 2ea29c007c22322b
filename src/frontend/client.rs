//! HTTP client for the portal API and the navigation controller that drives logout.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::navbar::{Navbar, SessionState, HOME_ROUTE, LOGIN_ROUTE};
use crate::auth::SessionResponse;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Cookie-holding client; the session cookie set by `login` rides along on later calls.
#[derive(Clone)]
pub struct PortalClient {
    base_url: String,
    http: reqwest::Client,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn api_error(res: reqwest::Response) -> ClientError {
        let status = res.status();
        let message = match res.json::<MessageBody>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
        };
        ClientError::Api { status, message }
    }

    /// POST /login. On success the `token` cookie is stored in this client.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let res = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(Self::api_error(res).await);
        }
        let body: MessageBody = res.json().await?;
        Ok(body.message)
    }

    /// POST /logout. Returns the response status on success.
    pub async fn logout(&self) -> Result<StatusCode, ClientError> {
        let res = self.http.post(self.url("/logout")).send().await?;
        if !res.status().is_success() {
            return Err(Self::api_error(res).await);
        }
        Ok(res.status())
    }

    /// GET /session: asks the backend whether the stored cookie is a valid session.
    pub async fn session(&self) -> Result<SessionState, ClientError> {
        let res = self.http.get(self.url("/session")).send().await?;
        if !res.status().is_success() {
            return Err(Self::api_error(res).await);
        }
        let body: SessionResponse = res.json().await?;
        Ok(body.into())
    }
}

/// Navigation state: the current session and route. Transitions return the next state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavController {
    pub session: SessionState,
    pub route: String,
}

impl NavController {
    pub fn new(session: SessionState) -> Self {
        Self {
            session,
            route: HOME_ROUTE.to_string(),
        }
    }

    pub fn navbar(&self) -> Navbar {
        Navbar::for_session(&self.session)
    }

    /// Log out through the backend. On 200 the session becomes anonymous and the route
    /// moves to the login page; on any failure the error is logged and nothing changes.
    pub async fn handle_logout(self, client: &PortalClient) -> Self {
        match client.logout().await {
            Ok(status) if status == StatusCode::OK => {
                info!("logged out");
                Self {
                    session: SessionState::anonymous(),
                    route: LOGIN_ROUTE.to_string(),
                }
            }
            Ok(status) => {
                error!(status = %status, "logout returned unexpected status");
                self
            }
            Err(e) => {
                error!(error = %e, "logout failed");
                self
            }
        }
    }

    /// Replace the local session with the backend's view of it.
    pub async fn refresh(self, client: &PortalClient) -> Self {
        match client.session().await {
            Ok(session) => Self { session, ..self },
            Err(e) => {
                error!(error = %e, "session check failed");
                self
            }
        }
    }
}
