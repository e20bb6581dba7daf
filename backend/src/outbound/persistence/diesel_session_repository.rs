//! PostgreSQL-backed `SessionRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{Session, SessionToken, UserId};

use super::error_mapping;
use super::models::{NewSessionRow, SessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel-backed implementation of the session store port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionRepositoryError {
    error_mapping::map_pool_error(error, SessionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionRepositoryError {
    error_mapping::map_diesel_error(
        error,
        SessionRepositoryError::query,
        SessionRepositoryError::connection,
    )
}

fn row_to_session(row: SessionRow) -> Session {
    let SessionRow {
        token,
        user_id,
        created_at,
        expires_at,
    } = row;

    Session {
        token: SessionToken::from_uuid(token),
        user_id: UserId::new(user_id),
        created_at,
        expires_at,
    }
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewSessionRow {
            token: *session.token.as_uuid(),
            user_id: session.user_id.as_i64(),
            created_at: session.created_at,
            expires_at: session.expires_at,
        };

        diesel::insert_into(sessions::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        token: SessionToken,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = sessions::table
            .find(*token.as_uuid())
            .select(SessionRow::as_select())
            .first::<SessionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_session))
    }

    async fn delete(&self, token: SessionToken) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(sessions::table.find(*token.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn purge_expired(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
