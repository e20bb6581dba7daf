//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! layers, the ports those layers plug into, and the services that implement
//! the capture and account use-cases. Types are immutable once constructed;
//! each documents its invariants and serde contract in Rustdoc.

pub mod account_service;
pub mod auth;
pub mod capture;
pub mod error;
pub mod password;
pub mod ports;
pub mod progress;
pub mod recording;
pub mod recording_service;
pub mod session;
pub mod trace;
pub mod transform;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::capture::{CaptureError, CapturePipeline, CaptureRequest, PipelinePorts};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::password::{Password, PasswordHash, PasswordStrengthError};
pub use self::progress::{DiscardProgress, ProgressSink, ProgressTracker};
pub use self::recording::{
    NewRecording, Recording, RecordingId, RecordingValidationError, Title,
};
pub use self::recording_service::RecordingService;
pub use self::session::{Session, SessionToken};
pub use self::transform::{apply_transform, TransformMode};
pub use self::user::{NewUser, Role, StoredUser, User, UserId, UserValidationError, Username};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
