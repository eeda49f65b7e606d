/**
 * Session Cookie Transport
 *
 * Binds a session token to the `token` cookie. The cookie is HttpOnly,
 * SameSite=Strict, scoped to `/`, and lives exactly as long as the token it
 * carries. The Secure attribute follows the deployment mode.
 */

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::shared::DeploymentMode;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Reads, writes and clears the session cookie
#[derive(Debug, Clone)]
pub struct SessionTransport {
    max_age: time::Duration,
    secure: bool,
}

impl SessionTransport {
    /// Create a transport whose cookies live for `lifetime`
    pub fn new(mode: DeploymentMode, lifetime: Duration) -> Self {
        let secs = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);
        Self {
            max_age: time::Duration::seconds(secs),
            secure: mode.secure_cookies(),
        }
    }

    /// Attach `token` to the outgoing cookie jar
    pub fn attach(&self, jar: CookieJar, token: String) -> CookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(self.max_age)
            .build();

        jar.add(cookie)
    }

    /// Tell the client to discard the session cookie
    ///
    /// The removal cookie is sent even when the request carried no session,
    /// so logout always leaves the client without one.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .build();
        cookie.make_removal();

        jar.add(cookie)
    }

    /// Token carried by the request, if any
    pub fn read(&self, jar: &CookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}
