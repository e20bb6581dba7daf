//! Text transform modes and the transform stage entry point.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ports::{TextTransformer, TransformError};

/// How extracted text should be rewritten before synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Identity: pass the text through untouched.
    Direct,
    /// Translate into the reader's language.
    Translate,
    /// Condense to a short summary.
    Summarize,
    /// Reshape into question-and-answer form.
    Qa,
}

impl TransformMode {
    /// Parse a mode from its wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "direct" => Some(Self::Direct),
            "translate" => Some(Self::Translate),
            "summarize" => Some(Self::Summarize),
            "qa" => Some(Self::Qa),
            _ => None,
        }
    }

    /// The wire representation of the mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Translate => "translate",
            Self::Summarize => "summarize",
            Self::Qa => "qa",
        }
    }
}

impl std::fmt::Display for TransformMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a transform mode to `text`.
///
/// `Direct` is the identity and returns without touching the engine, so it
/// can never fail and incurs no round-trip. Other modes delegate to the
/// transformer port. On failure the caller still holds the input text and
/// can retry with `Direct` to fall back to the untransformed result.
pub async fn apply_transform(
    transformer: &dyn TextTransformer,
    text: &str,
    mode: TransformMode,
) -> Result<String, TransformError> {
    match mode {
        TransformMode::Direct => Ok(text.to_owned()),
        other => transformer.transform(text, other).await,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::text_transformer::MockTextTransformer;
    use rstest::rstest;

    #[rstest]
    #[case("direct", Some(TransformMode::Direct))]
    #[case("translate", Some(TransformMode::Translate))]
    #[case("summarize", Some(TransformMode::Summarize))]
    #[case("qa", Some(TransformMode::Qa))]
    #[case("uppercase", None)]
    fn modes_parse_from_wire_form(#[case] input: &str, #[case] expected: Option<TransformMode>) {
        assert_eq!(TransformMode::parse(input), expected);
    }

    #[tokio::test]
    async fn direct_is_the_identity_and_skips_the_engine() {
        let mut transformer = MockTextTransformer::new();
        transformer.expect_transform().never();

        let result = apply_transform(&transformer, "as-is", TransformMode::Direct)
            .await
            .expect("direct never fails");
        assert_eq!(result, "as-is");
    }

    #[tokio::test]
    async fn other_modes_delegate_to_the_engine() {
        let mut transformer = MockTextTransformer::new();
        transformer
            .expect_transform()
            .withf(|text, mode| text == "hello" && *mode == TransformMode::Summarize)
            .returning(|_, _| Ok("short".to_owned()));

        let result = apply_transform(&transformer, "hello", TransformMode::Summarize)
            .await
            .expect("engine succeeds");
        assert_eq!(result, "short");
    }

    #[tokio::test]
    async fn engine_failures_surface_as_transform_errors() {
        let mut transformer = MockTextTransformer::new();
        transformer
            .expect_transform()
            .returning(|_, _| Err(TransformError::engine("model offline")));

        let err = apply_transform(&transformer, "hello", TransformMode::Translate)
            .await
            .expect_err("engine failure surfaces");
        assert!(err.to_string().contains("model offline"));
    }
}
