//! Port abstractions the domain services plug into.
//!
//! In hexagonal terms: storage ports (`UserRepository`,
//! `RecordingRepository`, `SessionRepository`) are driven by the services
//! and implemented by the outbound persistence adapters; collaborator ports
//! (`TextExtractor`, `TextTransformer`, `SpeechSynthesizer`) wrap the
//! external OCR, transform, and speech engines so the capture pipeline
//! never depends on a concrete engine.

pub mod recording_repository;
pub mod session_repository;
pub mod speech_synthesizer;
pub mod text_extractor;
pub mod text_transformer;
pub mod user_repository;

pub use self::recording_repository::{RecordingRepository, RecordingRepositoryError};
pub use self::session_repository::{SessionRepository, SessionRepositoryError};
pub use self::speech_synthesizer::{
    AudioAsset, FixtureSpeechSynthesizer, SpeechSynthesizer, SynthesisError,
};
pub use self::text_extractor::{
    ExtractionError, FixtureTextExtractor, LanguageHint, TextExtractor,
};
pub use self::text_transformer::{TextTransformer, TransformError};
pub use self::user_repository::{UserRepository, UserRepositoryError};
