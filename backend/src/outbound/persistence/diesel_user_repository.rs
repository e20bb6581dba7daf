//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, PasswordHash, Role, StoredUser, UserId, Username};

use super::error_mapping::{self, is_unique_violation};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the credential store port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    error_mapping::map_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    error_mapping::map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Map insert failures, distinguishing the unique username index.
fn map_insert_error(error: diesel::result::Error) -> UserRepositoryError {
    if is_unique_violation(&error) {
        UserRepositoryError::DuplicateUsername
    } else {
        map_diesel_error(error)
    }
}

/// Convert a database row into a validated stored user.
fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserRepositoryError> {
    let UserRow {
        id,
        username,
        password_hash,
        role,
        created_at,
    } = row;

    let username = Username::new(&username)
        .map_err(|err| UserRepositoryError::query(format!("decode username: {err}")))?;
    let role = Role::parse(&role)
        .map_err(|err| UserRepositoryError::query(format!("decode role: {err}")))?;

    Ok(StoredUser {
        id: UserId::new(id),
        username,
        password_hash: PasswordHash::from_stored(password_hash),
        role,
        created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<StoredUser, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: new_user.username.as_ref(),
            password_hash: new_user.password_hash.as_ref(),
            role: new_user.role.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;

        row_to_stored_user(row)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stored_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .find(id.as_i64())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stored_user).transpose()
    }
}
