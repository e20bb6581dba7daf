//! Password strength rules and salted credential hashing.
//!
//! Hashes use the `hash.salt` hex format: `hex(sha256(salt || password))`
//! joined with the hex-encoded 16-byte salt. The format is stable because
//! it is persisted in the credential store.

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const SALT_LEN: usize = 16;

/// Minimum allowed password length.
pub const PASSWORD_MIN: usize = 8;

/// Why a candidate password was rejected at registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordStrengthError {
    /// Password is shorter than [`PASSWORD_MIN`] characters.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Password contains no letter.
    #[error("password must contain at least one letter")]
    MissingLetter,
    /// Password contains no digit.
    #[error("password must contain at least one digit")]
    MissingDigit,
}

/// A candidate password held only long enough to hash or verify.
///
/// The inner buffer is wiped on drop.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a password without strength checks, for login verification.
    #[must_use]
    pub fn for_login(password: impl Into<String>) -> Self {
        Self(Zeroizing::new(password.into()))
    }

    /// Validate strength rules and construct a password for registration.
    pub fn for_registration(password: impl Into<String>) -> Result<Self, PasswordStrengthError> {
        let password = password.into();
        if password.chars().count() < PASSWORD_MIN {
            return Err(PasswordStrengthError::TooShort { min: PASSWORD_MIN });
        }
        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PasswordStrengthError::MissingLetter);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordStrengthError::MissingDigit);
        }
        Ok(Self(Zeroizing::new(password)))
    }

    fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Salted password hash in the persisted `hash.salt` format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a password with a fresh random salt.
    #[must_use]
    pub fn new(password: &Password) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(password, &salt)
    }

    fn with_salt(password: &Password, salt: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_str().as_bytes());
        let digest = hasher.finalize();
        Self(format!("{}.{}", hex::encode(digest), hex::encode(salt)))
    }

    /// Wrap a hash string loaded from the credential store.
    #[must_use]
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Check a candidate password against this hash.
    ///
    /// A malformed stored hash never verifies; it is treated as a mismatch
    /// rather than an error so login keeps its uniform failure response.
    #[must_use]
    pub fn verify(&self, password: &Password) -> bool {
        let Some((_, salt_hex)) = self.0.split_once('.') else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        Self::with_salt(password, &salt).0 == self.0
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pass1", PasswordStrengthError::TooShort { min: PASSWORD_MIN })]
    #[case("12345678", PasswordStrengthError::MissingLetter)]
    #[case("passwords", PasswordStrengthError::MissingDigit)]
    fn weak_passwords_are_rejected(#[case] input: &str, #[case] expected: PasswordStrengthError) {
        let err = Password::for_registration(input).expect_err("weak password must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn registration_password_hashes_and_verifies() {
        let password = Password::for_registration("Password1").expect("strong enough");
        let hash = PasswordHash::new(&password);
        assert!(hash.verify(&Password::for_login("Password1")));
        assert!(!hash.verify(&Password::for_login("Password2")));
    }

    #[test]
    fn hash_uses_a_fresh_salt_per_call() {
        let password = Password::for_registration("Password1").expect("strong enough");
        let first = PasswordHash::new(&password);
        let second = PasswordHash::new(&password);
        assert_ne!(first, second);
        assert!(second.verify(&Password::for_login("Password1")));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        let hash = PasswordHash::from_stored("not-a-real-hash");
        assert!(!hash.verify(&Password::for_login("anything")));
    }

    #[test]
    fn debug_output_redacts_the_password() {
        let password = Password::for_login("Password1");
        assert_eq!(format!("{password:?}"), "Password(***)");
    }
}
