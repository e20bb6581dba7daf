//! PostgreSQL-backed `RecordingRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordingRepository, RecordingRepositoryError};
use crate::domain::{NewRecording, Recording, RecordingId, Title, UserId};

use super::error_mapping;
use super::models::{NewRecordingRow, RecordingRow};
use super::pool::{DbPool, PoolError};
use super::schema::recordings;

/// Diesel-backed implementation of the recording store port.
#[derive(Clone)]
pub struct DieselRecordingRepository {
    pool: DbPool,
}

impl DieselRecordingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecordingRepositoryError {
    error_mapping::map_pool_error(error, RecordingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecordingRepositoryError {
    error_mapping::map_diesel_error(
        error,
        RecordingRepositoryError::query,
        RecordingRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain recording.
fn row_to_recording(row: RecordingRow) -> Result<Recording, RecordingRepositoryError> {
    let RecordingRow {
        id,
        title,
        original_text,
        audio_url,
        user_id,
        created_at,
    } = row;

    let title = Title::new(&title)
        .map_err(|err| RecordingRepositoryError::query(format!("decode title: {err}")))?;

    Ok(Recording {
        id: RecordingId::new(id),
        title,
        original_text,
        audio_url,
        owner_id: UserId::new(user_id),
        created_at,
    })
}

#[async_trait]
impl RecordingRepository for DieselRecordingRepository {
    async fn insert(
        &self,
        recording: &NewRecording,
        owner: UserId,
    ) -> Result<Recording, RecordingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The creation timestamp is chosen here rather than by a column
        // default so the generated-title fallback derives from the same
        // instant that is stored.
        let created_at = Utc::now();
        let title = recording.title_or_generated(created_at);

        let new_row = NewRecordingRow {
            title: title.as_ref(),
            original_text: recording.original_text(),
            audio_url: recording.audio_url(),
            user_id: owner.as_i64(),
            created_at,
        };

        let row: RecordingRow = diesel::insert_into(recordings::table)
            .values(&new_row)
            .returning(RecordingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_recording(row)
    }

    async fn list_newest_first(&self) -> Result<Vec<Recording>, RecordingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecordingRow> = recordings::table
            .order((recordings::created_at.desc(), recordings::id.desc()))
            .select(RecordingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_recording).collect()
    }

    async fn delete(&self, id: RecordingId) -> Result<(), RecordingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Zero rows affected is fine; the delete contract is idempotent.
        diesel::delete(recordings::table.find(id.as_i64()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> RecordingRow {
        RecordingRow {
            id: 3,
            title: "Chapter one".into(),
            original_text: "hello".into(),
            audio_url: "blob://x".into(),
            user_id: 1,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            RecordingRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, RecordingRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn valid_row_converts(valid_row: RecordingRow) {
        let recording = row_to_recording(valid_row).expect("valid row converts");
        assert_eq!(recording.id, RecordingId::new(3));
        assert_eq!(recording.owner_id, UserId::new(1));
    }

    #[rstest]
    fn row_conversion_rejects_blank_title(mut valid_row: RecordingRow) {
        valid_row.title = "   ".into();

        let error = row_to_recording(valid_row).expect_err("blank title should fail");
        assert!(matches!(error, RecordingRepositoryError::Query { .. }));
        assert!(error.to_string().contains("decode title"));
    }
}
