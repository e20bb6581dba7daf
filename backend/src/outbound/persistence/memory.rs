//! In-memory implementations of the storage ports.
//!
//! These back the integration tests and DB-less runs. They honour the same
//! contracts as the Diesel adapters: serially assigned monotonic ids,
//! server-side creation timestamps, idempotent deletes, and newest-first
//! listing. Each operation holds one mutex for its duration, matching the
//! single-row transaction granularity of the durable store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    RecordingRepository, RecordingRepositoryError, SessionRepository, SessionRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    NewRecording, NewUser, Recording, RecordingId, Session, SessionToken, StoredUser, UserId,
};

fn poisoned(store: &str, err: impl std::fmt::Display) -> String {
    format!("{store} store lock poisoned: {err}")
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<StoredUser>>,
    next_id: AtomicI64,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<StoredUser, UserRepositoryError> {
        let mut users = self
            .users
            .lock()
            .map_err(|err| UserRepositoryError::query(poisoned("user", err)))?;

        if users
            .iter()
            .any(|user| user.username == new_user.username)
        {
            return Err(UserRepositoryError::DuplicateUsername);
        }

        let stored = StoredUser {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let users = self
            .users
            .lock()
            .map_err(|err| UserRepositoryError::query(poisoned("user", err)))?;
        Ok(users
            .iter()
            .find(|user| user.username.as_ref() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserRepositoryError> {
        let users = self
            .users
            .lock()
            .map_err(|err| UserRepositoryError::query(poisoned("user", err)))?;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }
}

/// In-memory recording store.
#[derive(Debug, Default)]
pub struct MemoryRecordingRepository {
    recordings: Mutex<Vec<Recording>>,
    next_id: AtomicI64,
}

#[async_trait]
impl RecordingRepository for MemoryRecordingRepository {
    async fn insert(
        &self,
        recording: &NewRecording,
        owner: UserId,
    ) -> Result<Recording, RecordingRepositoryError> {
        let mut recordings = self
            .recordings
            .lock()
            .map_err(|err| RecordingRepositoryError::query(poisoned("recording", err)))?;

        let created_at = Utc::now();
        let persisted = Recording {
            id: RecordingId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            title: recording.title_or_generated(created_at),
            original_text: recording.original_text().to_owned(),
            audio_url: recording.audio_url().to_owned(),
            owner_id: owner,
            created_at,
        };
        recordings.push(persisted.clone());
        Ok(persisted)
    }

    async fn list_newest_first(&self) -> Result<Vec<Recording>, RecordingRepositoryError> {
        let recordings = self
            .recordings
            .lock()
            .map_err(|err| RecordingRepositoryError::query(poisoned("recording", err)))?;
        let mut listed = recordings.clone();
        // Ids break ties so two recordings in the same instant still list
        // deterministically, latest insert first.
        listed.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(listed)
    }

    async fn delete(&self, id: RecordingId) -> Result<(), RecordingRepositoryError> {
        let mut recordings = self
            .recordings
            .lock()
            .map_err(|err| RecordingRepositoryError::query(poisoned("recording", err)))?;
        recordings.retain(|recording| recording.id != id);
        Ok(())
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    sessions: Mutex<HashMap<SessionToken, Session>>,
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|err| SessionRepositoryError::query(poisoned("session", err)))?;
        sessions.insert(session.token, session.clone());
        Ok(())
    }

    async fn find(
        &self,
        token: SessionToken,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|err| SessionRepositoryError::query(poisoned("session", err)))?;
        Ok(sessions.get(&token).cloned())
    }

    async fn delete(&self, token: SessionToken) -> Result<(), SessionRepositoryError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|err| SessionRepositoryError::query(poisoned("session", err)))?;
        sessions.remove(&token);
        Ok(())
    }

    async fn purge_expired(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, SessionRepositoryError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|err| SessionRepositoryError::query(poisoned("session", err)))?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage shared with the Diesel adapters.
    use super::*;
    use crate::domain::{PasswordHash, Role, Username};
    use chrono::Duration;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: Username::new(username).expect("valid username"),
            password_hash: PasswordHash::from_stored("hash.salt"),
            role: Role::Student,
        }
    }

    fn draft(title: Option<&str>) -> NewRecording {
        NewRecording::try_from_parts(title, "hello", "blob://x")
            .expect("valid recording input")
    }

    #[tokio::test]
    async fn user_ids_are_monotonic_and_usernames_unique() {
        let repo = MemoryUserRepository::default();
        let first = repo.create(new_user("alice")).await.expect("insertable");
        let second = repo.create(new_user("bob")).await.expect("insertable");
        assert!(second.id > first.id);

        let err = repo
            .create(new_user("alice"))
            .await
            .expect_err("duplicate must fail");
        assert_eq!(err, UserRepositoryError::DuplicateUsername);
    }

    #[tokio::test]
    async fn users_are_reachable_by_name_and_id() {
        let repo = MemoryUserRepository::default();
        let stored = repo.create(new_user("alice")).await.expect("insertable");

        let by_name = repo
            .find_by_username("alice")
            .await
            .expect("queryable")
            .expect("present");
        assert_eq!(by_name.id, stored.id);

        let by_id = repo
            .find_by_id(stored.id)
            .await
            .expect("queryable")
            .expect("present");
        assert_eq!(by_id.username.as_ref(), "alice");

        assert!(repo
            .find_by_username("nobody")
            .await
            .expect("queryable")
            .is_none());
    }

    #[tokio::test]
    async fn recording_ids_grow_strictly() {
        let repo = MemoryRecordingRepository::default();
        let mut last = 0;
        for _ in 0..5 {
            let recording = repo
                .insert(&draft(Some("T")), UserId::new(1))
                .await
                .expect("insertable");
            assert!(recording.id.as_i64() > last);
            last = recording.id.as_i64();
        }
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let repo = MemoryRecordingRepository::default();
        let first = repo
            .insert(&draft(Some("R1")), UserId::new(1))
            .await
            .expect("insertable");
        let second = repo
            .insert(&draft(Some("R2")), UserId::new(1))
            .await
            .expect("insertable");

        let listed = repo.list_newest_first().await.expect("listable");
        assert_eq!(
            listed.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }

    #[tokio::test]
    async fn deleting_an_absent_recording_is_not_an_error() {
        // Pins the intended contract: delete is idempotent even though the
        // endpoint performs no ownership check (see DESIGN.md).
        let repo = MemoryRecordingRepository::default();
        repo.delete(RecordingId::new(999))
            .await
            .expect("idempotent delete succeeds");
    }

    #[tokio::test]
    async fn purge_removes_only_expired_sessions() {
        let repo = MemorySessionRepository::default();
        let now = Utc::now();
        let live = Session::establish(UserId::new(1), now, Duration::hours(1));
        let dead = Session::establish(UserId::new(2), now - Duration::hours(2), Duration::hours(1));
        repo.insert(&live).await.expect("insertable");
        repo.insert(&dead).await.expect("insertable");

        let purged = repo.purge_expired(now).await.expect("purgeable");
        assert_eq!(purged, 1);
        assert!(repo.find(live.token).await.expect("queryable").is_some());
        assert!(repo.find(dead.token).await.expect("queryable").is_none());
    }
}
