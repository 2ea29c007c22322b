//! GET /nav: the navigation fragment for the caller's session.

use axum::response::Html;

use super::navbar::{Navbar, SessionState};
use crate::middleware::SessionUser;

pub async fn nav(session: Option<SessionUser>) -> Html<String> {
    Html(Navbar::for_session(&SessionState::from(session)).to_html())
}
