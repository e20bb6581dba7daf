//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the domain schemas they
//! reference. The generated specification backs the Swagger UI served at
//! `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, Recording, RecordingId, Role, Title, TransformMode, User, UserId, Username,
};
use crate::inbound::http::process_text::{ProcessTextRequest, ProcessTextResponse};
use crate::inbound::http::recordings::CreateRecordingRequest;
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/register and /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recording capture backend API",
        description = "Session-authenticated access to recordings, text \
                       processing, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::recordings::list_recordings,
        crate::inbound::http::recordings::create_recording,
        crate::inbound::http::recordings::delete_recording,
        crate::inbound::http::process_text::process_text,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserId,
        Username,
        Role,
        Recording,
        RecordingId,
        Title,
        TransformMode,
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        CreateRecordingRequest,
        ProcessTextRequest,
        ProcessTextResponse,
    )),
    tags(
        (name = "accounts", description = "Account registration and sessions"),
        (name = "recordings", description = "Stored recordings and text transforms"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
