//! Session cookie handling for HTTP handlers.
//!
//! The cookie carries only an opaque token; the session record itself lives
//! server-side, so logout and expiry take effect immediately regardless of
//! what the client still holds.

use std::future::{ready, Ready};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::domain::SessionToken;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Attributes applied to issued session cookies.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookieSettings {
    /// Whether cookies are marked `Secure`. Disable only for plain-HTTP
    /// development setups.
    pub secure: bool,
}

impl Default for SessionCookieSettings {
    fn default() -> Self {
        Self { secure: true }
    }
}

/// Session token extracted from the request, if a well-formed cookie was
/// present.
///
/// Extraction never fails: a missing or malformed cookie yields an absent
/// token, and the handler decides whether that is an error.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    token: Option<SessionToken>,
}

impl SessionContext {
    /// The extracted token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.token
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| SessionToken::parse(cookie.value()));
        ready(Ok(Self { token }))
    }
}

fn base_cookie(value: String, settings: SessionCookieSettings) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .finish()
}

/// Build the cookie delivering a freshly established session token.
#[must_use]
pub fn session_cookie(token: SessionToken, settings: SessionCookieSettings) -> Cookie<'static> {
    base_cookie(token.to_string(), settings)
}

/// Build the cookie that instructs the client to drop its session token.
#[must_use]
pub fn removal_cookie(settings: SessionCookieSettings) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), settings);
    cookie.make_removal();
    cookie
}
