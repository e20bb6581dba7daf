//! The session authenticator: registration, login, logout, and session
//! resolution over the credential and session stores.

use std::sync::Arc;

use chrono::{Duration, Utc};

use super::auth::{LoginCredentials, Registration};
use super::error::Error;
use super::password::PasswordHash;
use super::ports::{
    SessionRepository, SessionRepositoryError, UserRepository, UserRepositoryError,
};
use super::session::{Session, SessionToken};
use super::user::{NewUser, User};

/// Uniform login failure; never reveals whether the username or the
/// password was wrong.
const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateUsername => Error::conflict("username is already taken"),
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("credential store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("credential store error: {message}"))
        }
    }
}

fn map_session_repository_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("session store unavailable: {message}"))
        }
        SessionRepositoryError::Query { message } => {
            Error::internal(format!("session store error: {message}"))
        }
    }
}

/// Issues and validates the session identity gating every API call.
///
/// Sessions are server-side rows keyed by an opaque token, so logout and
/// expiry win over any in-flight request validated afterwards: resolution
/// always reads current store state.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

impl AccountService {
    /// Create a service over the credential and session stores.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
        }
    }

    /// Create an account and log it in.
    ///
    /// # Errors
    /// `Conflict` for a taken username; store errors map to
    /// `ServiceUnavailable`/`InternalError`.
    pub async fn register(&self, registration: &Registration) -> Result<(User, Session), Error> {
        let new_user = NewUser {
            username: registration.username().clone(),
            password_hash: PasswordHash::new(registration.password()),
            role: registration.role(),
        };

        let stored = self
            .users
            .create(new_user)
            .await
            .map_err(map_user_repository_error)?;

        let user: User = stored.into();
        let session = self.establish_session(&user).await?;
        Ok((user, session))
    }

    /// Validate credentials and establish a session.
    ///
    /// # Errors
    /// `Unauthorized` with a uniform message for unknown usernames and
    /// wrong passwords alike.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(User, Session), Error> {
        let stored = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        if !stored.password_hash.verify(credentials.password()) {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let user: User = stored.into();
        let session = self.establish_session(&user).await?;
        Ok((user, session))
    }

    /// Invalidate a session. Unknown tokens are a no-op.
    pub async fn logout(&self, token: SessionToken) -> Result<(), Error> {
        self.sessions
            .delete(token)
            .await
            .map_err(map_session_repository_error)
    }

    /// Delete every session that has expired by now.
    ///
    /// Expiry is also enforced lazily on lookup; this sweep keeps the
    /// session store from accumulating rows for clients that never return.
    pub async fn sweep_expired_sessions(&self) -> Result<usize, Error> {
        self.sessions
            .purge_expired(Utc::now())
            .await
            .map_err(map_session_repository_error)
    }

    /// Resolve a token to its user, if the session is live.
    ///
    /// Expired sessions and sessions whose user has vanished are deleted on
    /// sight and resolve to `None`.
    pub async fn current_user(&self, token: SessionToken) -> Result<Option<User>, Error> {
        let Some(session) = self
            .sessions
            .find(token)
            .await
            .map_err(map_session_repository_error)?
        else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            self.logout(token).await?;
            return Ok(None);
        }

        let user = self
            .users
            .find_by_id(session.user_id)
            .await
            .map_err(map_user_repository_error)?;

        if user.is_none() {
            self.logout(token).await?;
        }

        Ok(user.map(Into::into))
    }

    /// Require a live session, rejecting with `Unauthorized` otherwise.
    ///
    /// Every protected handler calls this before doing any work, so a
    /// logout that completed earlier always causes rejection.
    pub async fn authenticated_user(&self, token: Option<SessionToken>) -> Result<User, Error> {
        let Some(token) = token else {
            return Err(Error::unauthorized("login required"));
        };
        self.current_user(token)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    async fn establish_session(&self, user: &User) -> Result<Session, Error> {
        let session = Session::establish(user.id, Utc::now(), self.session_ttl);
        self.sessions
            .insert(&session)
            .await
            .map_err(map_session_repository_error)?;
        Ok(session)
    }
}
