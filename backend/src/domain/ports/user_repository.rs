//! Port abstraction for the credential store.

use async_trait::async_trait;

use crate::domain::user::{NewUser, StoredUser, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The username is already taken.
    #[error("username is already taken")]
    DuplicateUsername,
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl UserRepositoryError {
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

/// Credential store: user accounts keyed by id and by unique username.
///
/// No update or delete is exposed; accounts are immutable in this scope.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, assigning id and creation timestamp.
    ///
    /// Fails with [`UserRepositoryError::DuplicateUsername`] when the
    /// username is already present.
    async fn create(&self, new_user: NewUser) -> Result<StoredUser, UserRepositoryError>;

    /// Fetch an account by its unique username.
    ///
    /// Takes the raw string so accounts created under older naming rules
    /// remain reachable at login.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserRepositoryError>;
}
