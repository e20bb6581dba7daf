//! Recording API handlers.
//!
//! ```text
//! GET    /api/recordings
//! POST   /api/recordings {"title":"...","originalText":"...","audioUrl":"..."}
//! DELETE /api/recordings/{id}
//! ```
//!
//! Every endpoint requires a live session. Deletion is intentionally not
//! restricted to the owner; see `RecordingService::delete`.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewRecording, Recording, RecordingId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_value_error, map_recording_validation_error};
use crate::inbound::http::ApiResult;

/// Recording creation body for `POST /api/recordings`.
///
/// Carries no id or timestamp fields: both are assigned server-side, so a
/// client cannot influence them. Unknown fields are ignored.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordingRequest {
    /// Optional display title; generated from the creation timestamp when
    /// omitted.
    #[serde(default)]
    pub title: Option<String>,
    pub original_text: String,
    pub audio_url: String,
}

/// List all recordings, newest first.
#[utoipa::path(
    get,
    path = "/api/recordings",
    responses(
        (status = 200, description = "Recordings, newest first", body = [Recording]),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["recordings"],
    operation_id = "listRecordings"
)]
#[get("/recordings")]
pub async fn list_recordings(
    state: web::Data<HttpState>,
    ctx: SessionContext,
) -> ApiResult<web::Json<Vec<Recording>>> {
    state.accounts.authenticated_user(ctx.token()).await?;
    let recordings = state.recordings.list().await?;
    Ok(web::Json(recordings))
}

/// Persist a new recording for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/recordings",
    request_body = CreateRecordingRequest,
    responses(
        (status = 201, description = "Recording created", body = Recording),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["recordings"],
    operation_id = "createRecording"
)]
#[post("/recordings")]
pub async fn create_recording(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    payload: web::Json<CreateRecordingRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.accounts.authenticated_user(ctx.token()).await?;
    let payload = payload.into_inner();
    let draft = NewRecording::try_from_parts(
        payload.title.as_deref(),
        &payload.original_text,
        &payload.audio_url,
    )
    .map_err(map_recording_validation_error)?;
    let recording = state.recordings.create(&draft, user.id).await?;
    Ok(HttpResponse::Created().json(recording))
}

/// Delete a recording by id.
#[utoipa::path(
    delete,
    path = "/api/recordings/{id}",
    params(("id" = i64, Path, description = "Recording identifier")),
    responses(
        (status = 204, description = "Recording deleted (or already absent)"),
        (status = 400, description = "Non-numeric id", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["recordings"],
    operation_id = "deleteRecording"
)]
#[delete("/recordings/{id}")]
pub async fn delete_recording(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.accounts.authenticated_user(ctx.token()).await?;
    let raw = path.into_inner();
    let id: i64 = raw.parse().map_err(|_| {
        field_value_error("id", "invalid_id", &raw, "recording id must be numeric")
    })?;
    state.recordings.delete(RecordingId::new(id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
