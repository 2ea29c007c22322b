//! Authentication: login, logout, session tokens and the session cookie.

mod cookie;
mod handlers;
mod jwt;
mod service;

pub use cookie::{SessionCookie, TOKEN_COOKIE};
pub use handlers::{login, logout, session, LoginRequest, SessionResponse};
pub use jwt::{Claims, JwtSecret};
pub use service::AuthAppService;
