//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation. Regenerate with
//! `diesel print-schema` after a migration changes the layout.

diesel::table! {
    /// Registered user accounts.
    ///
    /// Ids are assigned serially by the database; `username` carries a
    /// unique index.
    users (id) {
        /// Primary key: serially assigned identifier.
        id -> Int8,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Salted password hash in `hash.salt` hex form.
        password_hash -> Text,
        /// Account role: `student` or `librarian`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Persisted recordings: extracted text plus an audio reference.
    recordings (id) {
        /// Primary key: serially assigned identifier.
        id -> Int8,
        /// Display title.
        title -> Text,
        /// Text extracted from the source image.
        original_text -> Text,
        /// Reference to the synthesized audio asset.
        audio_url -> Text,
        /// Owning user.
        user_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Server-side login sessions keyed by opaque token.
    sessions (token) {
        /// Primary key: the opaque token held by the client cookie.
        token -> Uuid,
        /// The authenticated account.
        user_id -> Int8,
        /// When the session was established.
        created_at -> Timestamptz,
        /// Hard expiry deadline.
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(recordings -> users (user_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, recordings, sessions);
