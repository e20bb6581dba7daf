//! Recording data model: extracted text paired with a synthesized audio
//! reference, owned by a user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Validation errors returned by the recording constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordingValidationError {
    /// Title was missing or blank once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Extracted text was missing or blank once trimmed.
    #[error("originalText must not be empty")]
    EmptyOriginalText,
    /// Audio reference was missing or blank once trimmed.
    #[error("audioUrl must not be empty")]
    EmptyAudioUrl,
}

/// Stable numeric recording identifier assigned by the store.
///
/// Identifiers are serially assigned; every new recording receives an id
/// strictly greater than any previously assigned one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct RecordingId(i64);

impl RecordingId {
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

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty recording title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Chapter one")]
pub struct Title(String);

impl Title {
    /// Validate and construct a [`Title`].
    pub fn new(title: impl AsRef<str>) -> Result<Self, RecordingValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecordingValidationError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Auto-generate a title from the creation timestamp, used when the
    /// caller supplies none.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("Recording {}", at.format("%Y-%m-%d %H:%M:%S")))
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

impl TryFrom<String> for Title {
    type Error = RecordingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted recording: extracted text plus a reference to synthesized
/// audio, owned by exactly one user.
///
/// ## Invariants
/// - `title`, `original_text`, and `audio_url` are non-empty.
/// - `id` and `created_at` are assigned once by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    /// Stable numeric identifier.
    pub id: RecordingId,
    /// Display title.
    pub title: Title,
    /// Text extracted from the source image (possibly transformed).
    pub original_text: String,
    /// Reference to the synthesized audio asset.
    pub audio_url: String,
    /// Owning user.
    pub owner_id: UserId,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Validated recording input; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecording {
    title: Option<Title>,
    original_text: String,
    audio_url: String,
}

impl NewRecording {
    /// Validate raw recording inputs.
    ///
    /// `title` may be absent; a title is generated from the creation
    /// timestamp at persist time. The other fields must be non-empty.
    pub fn try_from_parts(
        title: Option<&str>,
        original_text: &str,
        audio_url: &str,
    ) -> Result<Self, RecordingValidationError> {
        let title = title.map(Title::new).transpose()?;
        let original_text = original_text.trim();
        if original_text.is_empty() {
            return Err(RecordingValidationError::EmptyOriginalText);
        }
        let audio_url = audio_url.trim();
        if audio_url.is_empty() {
            return Err(RecordingValidationError::EmptyAudioUrl);
        }
        Ok(Self {
            title,
            original_text: original_text.to_owned(),
            audio_url: audio_url.to_owned(),
        })
    }

    /// The caller-supplied title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Resolve the final title, generating one from `created_at` when the
    /// caller supplied none.
    #[must_use]
    pub fn title_or_generated(&self, created_at: DateTime<Utc>) -> Title {
        self.title
            .clone()
            .unwrap_or_else(|| Title::from_timestamp(created_at))
    }

    /// The extracted (or transformed) text to persist.
    #[must_use]
    pub fn original_text(&self) -> &str {
        self.original_text.as_str()
    }

    /// The audio asset reference to persist.
    #[must_use]
    pub fn audio_url(&self) -> &str {
        self.audio_url.as_str()
    }
}
