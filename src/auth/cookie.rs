//! The `token` session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const TOKEN_COOKIE: &str = "token";

/// How the session cookie is written and cleared.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionCookie {
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// HTTP-only cookie carrying the signed token.
    pub fn issue(&self, jar: CookieJar, token: String) -> CookieJar {
        let cookie = Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        jar.add(cookie)
    }

    /// Always emits an expired `token` cookie, whether or not the request carried one.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = Cookie::build((TOKEN_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        cookie.make_removal();
        jar.add(cookie)
    }

    pub fn token(jar: &CookieJar) -> Option<&str> {
        jar.get(TOKEN_COOKIE)
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
    }
}
