//! Recording store service: list, create, delete over the repository port.

use std::sync::Arc;

use super::error::Error;
use super::ports::{RecordingRepository, RecordingRepositoryError};
use super::recording::{NewRecording, Recording, RecordingId};
use super::user::UserId;

/// Map repository errors to transport-agnostic domain errors.
pub(crate) fn map_recording_repository_error(error: RecordingRepositoryError) -> Error {
    match error {
        RecordingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recording store unavailable: {message}"))
        }
        RecordingRepositoryError::Query { message } => {
            Error::internal(format!("recording store error: {message}"))
        }
    }
}

/// Use-case wrapper over the recording repository.
///
/// Input validation happens in [`NewRecording`]; the store assigns ids and
/// timestamps, so caller-supplied values for either cannot exist by
/// construction.
#[derive(Clone)]
pub struct RecordingService {
    repository: Arc<dyn RecordingRepository>,
}

impl RecordingService {
    /// Create a service over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RecordingRepository>) -> Self {
        Self { repository }
    }

    /// All recordings, newest first. An empty store yields an empty list,
    /// not an error.
    pub async fn list(&self) -> Result<Vec<Recording>, Error> {
        self.repository
            .list_newest_first()
            .await
            .map_err(map_recording_repository_error)
    }

    /// Persist a validated recording for `owner`.
    pub async fn create(
        &self,
        recording: &NewRecording,
        owner: UserId,
    ) -> Result<Recording, Error> {
        self.repository
            .insert(recording, owner)
            .await
            .map_err(map_recording_repository_error)
    }

    /// Delete a recording by id.
    ///
    /// Idempotent: an absent id is not an error. Ownership is deliberately
    /// not checked here; any authenticated caller may delete any recording
    /// until the librarian role carries authorization meaning.
    pub async fn delete(&self, id: RecordingId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_recording_repository_error)
    }
}
