//! Collaborator port for the image-to-text (OCR) engine.

use std::fmt;

use async_trait::async_trait;

use crate::domain::progress::ProgressSink;

/// Locale code hinting which language model(s) the engine should load.
///
/// A capture request carries one or more hints; bilingual documents need
/// two simultaneously active models, so the full set reaches the engine in
/// one call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageHint(String);

impl LanguageHint {
    /// Validate and construct a hint (trimmed, non-empty).
    #[must_use]
    pub fn new(tag: impl AsRef<str>) -> Option<Self> {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for LanguageHint {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LanguageHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Failures reported by extraction engines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// The image bytes are not a format the engine understands.
    #[error("unsupported image format: {message}")]
    UnsupportedFormat {
        /// Engine-level failure description.
        message: String,
    },
    /// The image was readable but no text could be recognised.
    #[error("image could not be read: {message}")]
    Unreadable {
        /// Engine-level failure description.
        message: String,
    },
}

impl ExtractionError {
    /// Create an unsupported-format error with the given message.
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Create an unreadable-image error with the given message.
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::Unreadable {
            message: message.into(),
        }
    }
}

/// Image-to-text engine.
///
/// Implementations report progress through `progress` as they work; the
/// pipeline wraps the sink so values never regress. Re-invoking with the
/// same input must produce an equivalent result with no server-side state
/// mutated.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text from raw image bytes using the hinted language models.
    async fn extract(
        &self,
        image: &[u8],
        hints: &[LanguageHint],
        progress: &dyn ProgressSink,
    ) -> Result<String, ExtractionError>;
}

/// Deterministic extraction engine used in tests and DB-less runs.
///
/// Treats the image bytes as UTF-8 text: valid UTF-8 "extracts" to itself,
/// anything else is reported as unreadable, and an empty payload is an
/// unsupported format. Progress steps through fixed increments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTextExtractor;

#[async_trait]
impl TextExtractor for FixtureTextExtractor {
    async fn extract(
        &self,
        image: &[u8],
        hints: &[LanguageHint],
        progress: &dyn ProgressSink,
    ) -> Result<String, ExtractionError> {
        if image.is_empty() {
            return Err(ExtractionError::unsupported_format("empty image payload"));
        }

        tracing::debug!(
            hints = %hints.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("+"),
            "fixture extraction started"
        );

        for step in [25_u8, 50, 75] {
            progress.report(step);
        }

        std::str::from_utf8(image)
            .map(str::to_owned)
            .map_err(|err| ExtractionError::unreadable(err.to_string()))
    }
}
