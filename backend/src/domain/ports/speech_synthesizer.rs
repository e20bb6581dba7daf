//! Collaborator port for the text-to-speech engine.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::progress::ProgressSink;

/// A playable/downloadable audio asset produced by synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioAsset {
    /// Reference a client can resolve to the audio bytes.
    pub url: String,
}

/// Failures reported by synthesis engines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// The engine failed to produce audio.
    #[error("speech synthesis failed: {message}")]
    Engine {
        /// Engine-level failure description.
        message: String,
    },
}

impl SynthesisError {
    /// Create an engine error with the given message.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }
}

/// Text-to-speech engine.
///
/// Callers never pass empty text; the pipeline rejects it before any audio
/// resource is allocated. Implementations report progress through
/// `progress`; the pipeline emits the final 100 itself on success, so
/// engines should stop short of it. Re-invoking with the same input must
/// produce an equivalent asset with no server-side state mutated.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into an audio asset.
    async fn synthesize(
        &self,
        text: &str,
        progress: &dyn ProgressSink,
    ) -> Result<AudioAsset, SynthesisError>;
}

/// Deterministic synthesis engine used in tests and DB-less runs.
///
/// Produces a unique `blob:` reference per call and steps progress through
/// fixed increments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSpeechSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FixtureSpeechSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        progress: &dyn ProgressSink,
    ) -> Result<AudioAsset, SynthesisError> {
        debug_assert!(!text.trim().is_empty(), "pipeline rejects empty text");

        for step in [20_u8, 55, 90] {
            progress.report(step);
        }

        Ok(AudioAsset {
            url: format!("blob:{}", Uuid::new_v4()),
        })
    }
}
