//! Port abstraction for server-side session persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::session::{Session, SessionToken};

/// Persistence errors raised by session repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionRepositoryError {
    /// Repository connection could not be established.
    #[error("session repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("session repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl SessionRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable session store keyed by opaque token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a newly established session.
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError>;

    /// Look up a session by token, expired or not.
    async fn find(&self, token: SessionToken)
        -> Result<Option<Session>, SessionRepositoryError>;

    /// Remove a session. Idempotent: removing an absent token succeeds.
    async fn delete(&self, token: SessionToken) -> Result<(), SessionRepositoryError>;

    /// Remove every session expired as of `now`, returning how many went.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionRepositoryError>;
}
