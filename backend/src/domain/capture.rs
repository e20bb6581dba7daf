//! The capture pipeline: Extract → optional Transform → Synthesize →
//! Persist.
//!
//! Each stage fails with its own error variant so a caller can retry just
//! the failed stage. Persistence is the only stage with a durable side
//! effect; nothing is written unless every upstream stage succeeded, and no
//! stage ever swallows an upstream failure.

use std::sync::Arc;

use serde_json::json;

use super::error::Error;
use super::ports::{
    ExtractionError, LanguageHint, SpeechSynthesizer, SynthesisError, TextExtractor,
    TextTransformer, TransformError,
};
use super::progress::{ProgressSink, ProgressTracker};
use super::recording::{NewRecording, Recording, RecordingValidationError};
use super::recording_service::RecordingService;
use super::transform::{apply_transform, TransformMode};
use super::user::UserId;

/// Validated input for one pipeline run.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    image: Vec<u8>,
    language_hints: Vec<LanguageHint>,
    mode: TransformMode,
    title: Option<String>,
}

impl CaptureRequest {
    /// Validate raw capture inputs.
    ///
    /// At least one language hint is required; blank hints are rejected.
    pub fn try_from_parts(
        image: Vec<u8>,
        language_hints: &[&str],
        mode: TransformMode,
        title: Option<String>,
    ) -> Result<Self, CaptureError> {
        if language_hints.is_empty() {
            return Err(CaptureError::Validation {
                message: "at least one language hint is required".to_owned(),
            });
        }
        let language_hints = language_hints
            .iter()
            .map(|tag| {
                LanguageHint::new(tag).ok_or_else(|| CaptureError::Validation {
                    message: "language hints must not be blank".to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            image,
            language_hints,
            mode,
            title,
        })
    }

    /// The hinted language models for extraction.
    #[must_use]
    pub fn language_hints(&self) -> &[LanguageHint] {
        &self.language_hints
    }
}

/// Distinct failure per pipeline stage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    /// The request itself was malformed; no stage ran.
    #[error("invalid capture request: {message}")]
    Validation {
        /// What was wrong with the request.
        message: String,
    },
    /// Stage 1 failed; the pipeline aborted before any text existed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// Stage 2 failed. The extracted text is preserved so the caller can
    /// retry with [`TransformMode::Direct`] and keep the untransformed text.
    #[error("{source}")]
    Transform {
        /// The engine failure.
        source: TransformError,
        /// Stage 1 output, unchanged.
        extracted: String,
    },
    /// Stage 3 was asked to synthesize empty text; rejected before any
    /// audio resource was allocated.
    #[error("cannot synthesize empty text")]
    EmptyInput,
    /// Stage 3 failed in the engine.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    /// Stage 4 failed in the store; no partial recording exists.
    #[error(transparent)]
    Persistence(Error),
}

impl CaptureError {
    /// The pipeline stage this error belongs to, as a wire-stable label.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Extraction(_) => "extract",
            Self::Transform { .. } => "transform",
            Self::EmptyInput | Self::Synthesis(_) => "synthesize",
            Self::Persistence(_) => "persist",
        }
    }
}

impl From<CaptureError> for Error {
    fn from(value: CaptureError) -> Self {
        let stage = value.stage();
        match value {
            CaptureError::Persistence(error) => error,
            other => Self::invalid_request(other.to_string())
                .with_details(json!({ "stage": stage })),
        }
    }
}

/// Orchestrates the four capture stages over the collaborator and storage
/// ports.
///
/// Stages 1–3 are retryable from the caller's perspective: they mutate no
/// server-side state, so re-running them with the same input yields an
/// equivalent result. Stage 4 delegates to [`RecordingService::create`].
#[derive(Clone)]
pub struct CapturePipeline {
    extractor: Arc<dyn TextExtractor>,
    transformer: Arc<dyn TextTransformer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recordings: Arc<RecordingService>,
}

impl CapturePipeline {
    /// Assemble a pipeline from its collaborator ports and the recording
    /// service.
    #[must_use]
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        transformer: Arc<dyn TextTransformer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        recordings: Arc<RecordingService>,
    ) -> Self {
        Self {
            extractor,
            transformer,
            synthesizer,
            recordings,
        }
    }

    /// Run the full pipeline on behalf of `owner`.
    ///
    /// `extract_progress` and `synthesis_progress` observe the two
    /// long-running stages; both are guaranteed monotonic non-decreasing
    /// with a single 100 at successful stage completion.
    ///
    /// # Errors
    /// One [`CaptureError`] variant per failed stage; see the enum docs.
    pub async fn run(
        &self,
        request: CaptureRequest,
        owner: UserId,
        extract_progress: &dyn ProgressSink,
        synthesis_progress: &dyn ProgressSink,
    ) -> Result<Recording, CaptureError> {
        let extracted = self.extract(&request, extract_progress).await?;

        let text = apply_transform(self.transformer.as_ref(), &extracted, request.mode)
            .await
            .map_err(|source| CaptureError::Transform {
                source,
                extracted: extracted.clone(),
            })?;

        let audio = self.synthesize(&text, synthesis_progress).await?;

        let recording =
            NewRecording::try_from_parts(request.title.as_deref(), &text, &audio.url)
                .map_err(map_draft_error)?;

        self.recordings
            .create(&recording, owner)
            .await
            .map_err(CaptureError::Persistence)
    }

    async fn extract(
        &self,
        request: &CaptureRequest,
        progress: &dyn ProgressSink,
    ) -> Result<String, CaptureError> {
        let tracker = ProgressTracker::new(progress);
        let extracted = self
            .extractor
            .extract(&request.image, &request.language_hints, &tracker)
            .await?;
        tracker.complete();
        Ok(extracted)
    }

    async fn synthesize(
        &self,
        text: &str,
        progress: &dyn ProgressSink,
    ) -> Result<super::ports::AudioAsset, CaptureError> {
        if text.trim().is_empty() {
            return Err(CaptureError::EmptyInput);
        }
        let tracker = ProgressTracker::new(progress);
        let audio = self.synthesizer.synthesize(text, &tracker).await?;
        tracker.complete();
        Ok(audio)
    }
}

/// A recording draft failing validation after successful stages means the
/// pipeline produced unusable output (e.g. synthesis of whitespace); report
/// it as a validation failure rather than inventing a new category.
fn map_draft_error(err: RecordingValidationError) -> CaptureError {
    CaptureError::Validation {
        message: err.to_string(),
    }
}

/// Ports bundle for assembling a pipeline without naming every Arc.
pub struct PipelinePorts {
    /// OCR engine.
    pub extractor: Arc<dyn TextExtractor>,
    /// Transform engine.
    pub transformer: Arc<dyn TextTransformer>,
    /// Speech engine.
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Recording store wrapper.
    pub recordings: Arc<RecordingService>,
}

impl From<PipelinePorts> for CapturePipeline {
    fn from(ports: PipelinePorts) -> Self {
        let PipelinePorts {
            extractor,
            transformer,
            synthesizer,
            recordings,
        } = ports;
        Self::new(extractor, transformer, synthesizer, recordings)
    }
}
