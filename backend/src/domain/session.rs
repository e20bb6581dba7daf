//! Server-held session records keyed by an opaque token.
//!
//! A session maps a random token (delivered to the client in an HttpOnly
//! cookie) to an authenticated user identity with an expiry deadline.
//! Tokens carry no information themselves; everything lives server-side so
//! logout and expiry take effect immediately.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::user::UserId;

/// Opaque session token delivered via cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a stored token value.
    #[must_use]
    pub fn from_uuid(token: Uuid) -> Self {
        Self(token)
    }

    /// Parse a token from its cookie representation.
    ///
    /// Returns `None` for anything that is not a UUID; malformed cookies are
    /// treated as an absent session rather than an error.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A server-side session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque lookup key.
    pub token: SessionToken,
    /// The authenticated account.
    pub user_id: UserId,
    /// When the session was established.
    pub created_at: DateTime<Utc>,
    /// Hard expiry deadline; the session is invalid at or after this instant.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Establish a new session for `user_id` lasting `ttl` from `now`.
    #[must_use]
    pub fn establish(user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: SessionToken::generate(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the session has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
