//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain; repositories convert them into validated
//! domain values at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{recordings, sessions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
///
/// The database assigns `id` and `created_at`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the recordings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recordings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecordingRow {
    pub id: i64,
    pub title: String,
    pub original_text: String,
    pub audio_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new recording records.
///
/// `created_at` is supplied by the adapter rather than a database default
/// because the generated-title fallback derives from it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recordings)]
pub(crate) struct NewRecordingRow<'a> {
    pub title: &'a str,
    pub original_text: &'a str,
    pub audio_url: &'a str,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub token: Uuid,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Insertable struct for creating new session records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSessionRow {
    pub token: Uuid,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
