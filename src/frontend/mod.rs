//! Frontend side: navigation model, its HTML fragment, and the API client that drives logout.

mod client;
mod handlers;
mod navbar;

pub use client::{ClientError, NavController, PortalClient};
pub use handlers::nav;
pub use navbar::{NavAction, NavItem, Navbar, SessionState, HOME_ROUTE, LOGIN_ROUTE};
