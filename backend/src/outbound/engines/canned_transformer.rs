//! Deterministic stand-in for a real language engine.
//!
//! The rewrites are intentionally simple so the transform endpoint and the
//! capture pipeline are exercisable end to end without an external service.
//! A production deployment swaps this adapter for one backed by a language
//! model behind the same port.

use async_trait::async_trait;

use crate::domain::ports::{TextTransformer, TransformError};
use crate::domain::TransformMode;

/// Word budget for the summarize rewrite.
const SUMMARY_WORDS: usize = 25;

/// Local deterministic transform engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedTextTransformer;

impl CannedTextTransformer {
    fn summarize(text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= SUMMARY_WORDS {
            return words.join(" ");
        }
        let mut summary = words[..SUMMARY_WORDS].join(" ");
        summary.push_str(" ...");
        summary
    }

    fn question_and_answer(text: &str) -> String {
        format!("Q: What does the passage say?\nA: {}", text.trim())
    }
}

#[async_trait]
impl TextTransformer for CannedTextTransformer {
    async fn transform(&self, text: &str, mode: TransformMode) -> Result<String, TransformError> {
        debug_assert!(
            mode != TransformMode::Direct,
            "direct mode must be applied locally"
        );
        let rewritten = match mode {
            // No local translation is possible; the text passes through
            // until a real engine backs this port.
            TransformMode::Direct | TransformMode::Translate => text.trim().to_owned(),
            TransformMode::Summarize => Self::summarize(text),
            TransformMode::Qa => Self::question_and_answer(text),
        };
        Ok(rewritten)
    }
}

/// Engine that always fails, for exercising the failure path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTextTransformer;

#[async_trait]
impl TextTransformer for FailingTextTransformer {
    async fn transform(
        &self,
        _text: &str,
        _mode: TransformMode,
    ) -> Result<String, TransformError> {
        Err(TransformError::engine("transform engine offline"))
    }
}
