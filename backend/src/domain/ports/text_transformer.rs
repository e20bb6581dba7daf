//! Collaborator port for the server-side text transform engine.

use async_trait::async_trait;

use crate::domain::transform::TransformMode;

/// Failures reported by transform engines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The engine failed to rewrite the text.
    #[error("text transform failed: {message}")]
    Engine {
        /// Engine-level failure description.
        message: String,
    },
}

impl TransformError {
    /// Create an engine error with the given message.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }
}

/// Text rewriting engine for the non-identity transform modes.
///
/// Never called with [`TransformMode::Direct`]; the identity transform is
/// applied locally without a round-trip (see
/// [`crate::domain::transform::apply_transform`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextTransformer: Send + Sync {
    /// Rewrite `text` according to `mode`.
    async fn transform(&self, text: &str, mode: TransformMode) -> Result<String, TransformError>;
}
