//! Text transform API handler.
//!
//! ```text
//! POST /api/process-text {"text":"...","type":"summarize"}
//! ```
//!
//! `direct` is the identity and never touches the engine; the other modes
//! delegate to the configured transformer. Engine failures surface as 500s
//! because the request itself was valid.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{apply_transform, Error, TransformMode};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, field_value_error};
use crate::inbound::http::ApiResult;

/// Transform request body for `POST /api/process-text`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct ProcessTextRequest {
    pub text: String,
    /// Serialized as `type` on the wire.
    #[serde(rename = "type")]
    pub mode: String,
}

/// Transform response body.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProcessTextResponse {
    pub result: String,
}

/// Rewrite text according to the requested mode.
#[utoipa::path(
    post,
    path = "/api/process-text",
    request_body = ProcessTextRequest,
    responses(
        (status = 200, description = "Transformed text", body = ProcessTextResponse),
        (status = 400, description = "Unknown mode or empty text", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Transform engine failure")
    ),
    tags = ["recordings"],
    operation_id = "processText"
)]
#[post("/process-text")]
pub async fn process_text(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    payload: web::Json<ProcessTextRequest>,
) -> ApiResult<web::Json<ProcessTextResponse>> {
    state.accounts.authenticated_user(ctx.token()).await?;
    let payload = payload.into_inner();

    let mode = TransformMode::parse(&payload.mode).ok_or_else(|| {
        field_value_error("type", "unknown_mode", &payload.mode, "unknown transform type")
    })?;
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(field_error("text", "empty_text", "text must not be empty"));
    }

    let result = apply_transform(state.transformer.as_ref(), text, mode)
        .await
        .map_err(|err| {
            warn!(%mode, error = %err, "transform engine failed");
            Error::internal(format!("text transform failed: {err}"))
        })?;
    Ok(web::Json(ProcessTextResponse { result }))
}
