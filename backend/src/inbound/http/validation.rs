//! Shared validation error shaping for inbound HTTP adapters.
//!
//! Every request validation failure carries machine-readable `details` with
//! the offending field and a stable code so clients can highlight the right
//! input.

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, PasswordStrengthError, RecordingValidationError,
    RegistrationValidationError, UserValidationError,
};

/// Build an `invalid_request` error annotated with field context.
pub(crate) fn field_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Like [`field_error`] but also echoing the rejected value.
pub(crate) fn field_value_error(
    field: &'static str,
    code: &'static str,
    value: &str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
        "value": value,
    }))
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            field_error("username", "empty_username", "username must not be empty")
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", "empty_password", "password must not be empty")
        }
    }
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::Username(inner) => {
            let code = match inner {
                UserValidationError::EmptyUsername => "empty_username",
                UserValidationError::UsernameTooShort { .. } => "username_too_short",
                UserValidationError::UsernameTooLong { .. } => "username_too_long",
                UserValidationError::UsernameInvalidCharacters => "username_invalid_characters",
                UserValidationError::UnknownRole => {
                    return field_error("role", "unknown_role", inner.to_string());
                }
            };
            field_error("username", code, inner.to_string())
        }
        RegistrationValidationError::Password(inner) => {
            let code = match inner {
                PasswordStrengthError::TooShort { .. } => "password_too_short",
                PasswordStrengthError::MissingLetter => "password_missing_letter",
                PasswordStrengthError::MissingDigit => "password_missing_digit",
            };
            field_error("password", code, inner.to_string())
        }
    }
}

pub(crate) fn map_recording_validation_error(err: RecordingValidationError) -> Error {
    match err {
        RecordingValidationError::EmptyTitle => {
            field_error("title", "empty_title", err.to_string())
        }
        RecordingValidationError::EmptyOriginalText => {
            field_error("originalText", "empty_original_text", err.to_string())
        }
        RecordingValidationError::EmptyAudioUrl => {
            field_error("audioUrl", "empty_audio_url", err.to_string())
        }
    }
}
