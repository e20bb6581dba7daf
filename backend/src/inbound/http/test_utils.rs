//! Shared helpers for HTTP handler tests.
//!
//! Builds the full `/api` scope over in-memory stores so handler tests
//! exercise the same wiring as the real server without a database.

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web, App};
use chrono::Duration;
use serde_json::json;

use crate::domain::ports::TextTransformer;
use crate::domain::{AccountService, RecordingService};
use crate::outbound::engines::CannedTextTransformer;
use crate::outbound::persistence::memory::{
    MemoryRecordingRepository, MemorySessionRepository, MemoryUserRepository,
};

use super::process_text::process_text;
use super::recordings::{create_recording, delete_recording, list_recordings};
use super::session::SessionCookieSettings;
use super::state::HttpState;
use super::users::{current_user, login, logout, register};

/// Handler state over fresh in-memory stores.
pub fn memory_state(transformer: Arc<dyn TextTransformer>) -> HttpState {
    let users = Arc::new(MemoryUserRepository::default());
    let sessions = Arc::new(MemorySessionRepository::default());
    let recordings = Arc::new(MemoryRecordingRepository::default());
    HttpState::new(
        Arc::new(AccountService::new(users, sessions, Duration::hours(2))),
        Arc::new(RecordingService::new(recordings)),
        transformer,
        // Test requests travel over plain HTTP.
        SessionCookieSettings { secure: false },
    )
}

/// Initialise a test service with the default deterministic engine.
pub async fn init_app(
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    init_app_with(Arc::new(CannedTextTransformer)).await
}

/// Initialise a test service with a caller-chosen transform engine.
pub async fn init_app_with(
    transformer: Arc<dyn TextTransformer>,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = memory_state(transformer);
    actix_test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api")
                .service(register)
                .service(login)
                .service(logout)
                .service(current_user)
                .service(list_recordings)
                .service(create_recording)
                .service(delete_recording)
                .service(process_text),
        ),
    )
    .await
}

/// Register an account (which also logs it in) and return its session
/// cookie.
pub async fn register_and_login<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::CREATED,
        "registration must succeed before the test proper"
    );
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued at registration")
        .into_owned()
}
