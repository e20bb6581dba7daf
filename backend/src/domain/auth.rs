//! Authentication primitives: login credentials and registration payloads.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use super::password::{Password, PasswordStrengthError};
use super::user::{Role, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `username` is trimmed and non-empty after trimming; it is *not* held to
///   registration rules so accounts created under older rules can still log
///   in.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    username: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Password::for_login(password),
        })
    }

    /// Username string suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Reasons a registration payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Username failed the account naming rules.
    #[error(transparent)]
    Username(#[from] UserValidationError),
    /// Password failed the strength rules.
    #[error(transparent)]
    Password(#[from] PasswordStrengthError),
}

/// Validated registration payload for the account service.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    password: Password,
    role: Role,
}

impl Registration {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        let role = Role::parse(role)?;
        let password = Password::for_registration(password)?;
        Ok(Self {
            username,
            password,
            role,
        })
    }

    /// The validated username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// The validated raw password, ready for hashing.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// The requested account role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  alice  ", "secret")]
    #[case("bob", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
    }

    #[test]
    fn registration_validates_all_fields() {
        let registration = Registration::try_from_parts("alice", "Password1", "student")
            .expect("valid registration");
        assert_eq!(registration.username().as_ref(), "alice");
        assert_eq!(registration.role(), Role::Student);
    }

    #[rstest]
    #[case("a", "Password1", "student")]
    #[case("alice", "short1", "student")]
    #[case("alice", "Password1", "admin")]
    fn invalid_registrations_fail(
        #[case] username: &str,
        #[case] password: &str,
        #[case] role: &str,
    ) {
        assert!(Registration::try_from_parts(username, password, role).is_err());
    }
}
