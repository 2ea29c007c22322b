//! Navigation bar model: Home always, then Login or Logout depending on the session.

use crate::auth::SessionResponse;
use crate::middleware::SessionUser;

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";

/// Session as seen by the frontend. Always obtained from the backend or returned by a
/// controller transition, never mutated in place by views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub user: Option<SessionUser>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

impl From<Option<SessionUser>> for SessionState {
    fn from(user: Option<SessionUser>) -> Self {
        match user {
            Some(user) => Self::signed_in(user),
            None => Self::anonymous(),
        }
    }
}

impl From<SessionResponse> for SessionState {
    fn from(res: SessionResponse) -> Self {
        Self {
            authenticated: res.authenticated,
            user: res.user,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, href: &'static str },
    Button { label: &'static str, action: NavAction },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub items: Vec<NavItem>,
}

impl Navbar {
    pub fn for_session(session: &SessionState) -> Self {
        let mut items = vec![NavItem::Link {
            label: "Home",
            href: HOME_ROUTE,
        }];
        items.push(if session.authenticated {
            NavItem::Button {
                label: "Logout",
                action: NavAction::Logout,
            }
        } else {
            NavItem::Link {
                label: "Login",
                href: LOGIN_ROUTE,
            }
        });
        Self { items }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<ul class=\"navbar\">\n");
        for item in &self.items {
            let li = match item {
                NavItem::Link { label, href } => format!(
                    "  <li><a class=\"btn btn-outline-light\" href=\"{}\">{}</a></li>\n",
                    escape_html(href),
                    escape_html(label)
                ),
                NavItem::Button { label, action } => format!(
                    "  <li><button type=\"button\" class=\"btn btn-outline-light\" data-action=\"{}\">{}</button></li>\n",
                    action.as_str(),
                    escape_html(label)
                ),
            };
            html.push_str(&li);
        }
        html.push_str("</ul>\n");
        html
    }
}

impl NavAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavAction::Logout => "logout",
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
