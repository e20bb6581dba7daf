//! Port abstraction for recording persistence.

use async_trait::async_trait;

use crate::domain::recording::{NewRecording, Recording, RecordingId};
use crate::domain::user::UserId;

/// Persistence errors raised by recording repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordingRepositoryError {
    /// Repository connection could not be established.
    #[error("recording repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("recording repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl RecordingRepositoryError {
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

/// Recording store.
///
/// The adapter assigns ids (strictly monotonic per store) and the creation
/// timestamp; caller-supplied values never reach this port because
/// [`NewRecording`] carries none.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    /// Persist a validated recording for `owner`, assigning id and
    /// `created_at` and resolving a generated title when none was supplied.
    async fn insert(
        &self,
        recording: &NewRecording,
        owner: UserId,
    ) -> Result<Recording, RecordingRepositoryError>;

    /// All recordings, most recently created first.
    async fn list_newest_first(&self) -> Result<Vec<Recording>, RecordingRepositoryError>;

    /// Delete a recording by id.
    ///
    /// Idempotent: deleting an absent id succeeds. This is the documented
    /// contract of the delete endpoint.
    async fn delete(&self, id: RecordingId) -> Result<(), RecordingRepositoryError>;
}
