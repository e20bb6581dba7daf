//! User account data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::password::PasswordHash;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username is shorter than the allowed minimum.
    #[error("username must be at least {min} characters")]
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Username is longer than the allowed maximum.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Username contains characters outside the allowed set.
    #[error("username may only contain letters, numbers, or underscores")]
    UsernameInvalidCharacters,
    /// Role string is not a known role.
    #[error("role must be one of: student, librarian")]
    UnknownRole,
}

/// Stable numeric user identifier assigned by the credential store.
///
/// Identifiers are serially assigned and strictly monotonic within one
/// store instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier produced by a repository.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Unique login name for a user account.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - Between [`USERNAME_MIN`] and [`USERNAME_MAX`] characters.
/// - Contains only ASCII letters, digits, or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "alice")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role collected at registration.
///
/// The role is stored and echoed back to clients but is not consulted for
/// authorization anywhere yet; it is reserved for future librarian-gated
/// behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account.
    Student,
    /// Library staff account.
    Librarian,
}

impl Role {
    /// Parse a role from its wire representation.
    pub fn parse(value: &str) -> Result<Self, UserValidationError> {
        match value {
            "student" => Ok(Self::Student),
            "librarian" => Ok(Self::Librarian),
            _ => Err(UserValidationError::UnknownRole),
        }
    }

    /// The wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Librarian => "librarian",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application user as exposed to clients (never carries the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable numeric identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// Stored account role; not consulted for authorization.
    pub role: Role,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// New account ready for insertion; the repository assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Validated unique login name.
    pub username: Username,
    /// Salted hash of the chosen password.
    pub password_hash: PasswordHash,
    /// Role collected at registration.
    pub role: Role,
}

/// User record as held inside the persistence boundary.
///
/// Carries the password hash so the account service can verify credentials;
/// it never crosses the inbound adapter (handlers convert to [`User`]).
#[derive(Debug, Clone)]
pub struct StoredUser {
    /// Stable numeric identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// Salted password hash.
    pub password_hash: PasswordHash,
    /// Role collected at registration.
    pub role: Role,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for User {
    fn from(value: StoredUser) -> Self {
        let StoredUser {
            id,
            username,
            role,
            created_at,
            ..
        } = value;
        Self {
            id,
            username,
            role,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case("no spaces", UserValidationError::UsernameInvalidCharacters)]
    #[case("emoji🦀", UserValidationError::UsernameInvalidCharacters)]
    fn invalid_usernames_are_rejected(
        #[case] input: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = Username::new(input).expect_err("invalid input must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn overlong_username_is_rejected() {
        let err = Username::new("a".repeat(USERNAME_MAX + 1)).expect_err("too long");
        assert_eq!(err, UserValidationError::UsernameTooLong { max: USERNAME_MAX });
    }

    #[rstest]
    #[case("  alice  ", "alice")]
    #[case("lib_rarian_7", "lib_rarian_7")]
    fn valid_usernames_are_trimmed(#[case] input: &str, #[case] expected: &str) {
        let username = Username::new(input).expect("valid username");
        assert_eq!(username.as_ref(), expected);
    }

    #[rstest]
    #[case("student", Role::Student)]
    #[case("librarian", Role::Librarian)]
    fn roles_parse_from_wire_form(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(Role::parse(input).expect("known role"), expected);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(
            Role::parse("admin").expect_err("unknown role"),
            UserValidationError::UnknownRole
        );
    }

    #[test]
    fn user_serializes_camel_case_without_password() {
        let user = User {
            id: UserId::new(7),
            username: Username::new("alice").expect("valid username"),
            role: Role::Student,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).expect("serializable user");
        assert_eq!(value["id"], serde_json::json!(7));
        assert_eq!(value["username"], serde_json::json!("alice"));
        assert_eq!(value["role"], serde_json::json!("student"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }
}
