//! End-to-end HTTP scenarios over the in-memory stores.
//!
//! These tests assemble the same `/api` scope, health probes, and trace
//! middleware the server binary mounts, then walk client-visible flows:
//! registration through recording management to logout.

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};

use backend::domain::{AccountService, RecordingService};
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::process_text::process_text;
use backend::inbound::http::recordings::{create_recording, delete_recording, list_recordings};
use backend::inbound::http::session::SessionCookieSettings;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{current_user, login, logout, register};
use backend::outbound::engines::CannedTextTransformer;
use backend::outbound::persistence::{
    MemoryRecordingRepository, MemorySessionRepository, MemoryUserRepository,
};
use backend::Trace;

fn state_with_ttl(ttl: Duration) -> (web::Data<HttpState>, web::Data<HealthState>) {
    let users = Arc::new(MemoryUserRepository::default());
    let sessions = Arc::new(MemorySessionRepository::default());
    let recordings = Arc::new(MemoryRecordingRepository::default());
    let http_state = HttpState::new(
        Arc::new(AccountService::new(users, sessions, ttl)),
        Arc::new(RecordingService::new(recordings)),
        Arc::new(CannedTextTransformer),
        // Test requests travel over plain HTTP.
        SessionCookieSettings { secure: false },
    );
    (
        web::Data::new(http_state),
        web::Data::new(HealthState::new()),
    )
}

async fn init_app_with_ttl(
    ttl: Duration,
) -> (
    impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    web::Data<HealthState>,
) {
    let (http_state, health_state) = state_with_ttl(ttl);
    let app = test::init_service(
        App::new()
            .app_data(http_state)
            .app_data(health_state.clone())
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .service(register)
                    .service(login)
                    .service(logout)
                    .service(current_user)
                    .service(list_recordings)
                    .service(create_recording)
                    .service(delete_recording)
                    .service(process_text),
            )
            .service(ready)
            .service(live),
    )
    .await;
    (app, health_state)
}

async fn init_app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
    init_app_with_ttl(Duration::hours(2)).await.0
}

async fn register_account<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": username, "password": "Password1" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued at registration")
        .into_owned()
}

#[actix_web::test]
async fn recordings_require_a_session() {
    let app = init_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/recordings").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response.headers().contains_key("x-trace-id"),
        "error responses carry the trace header"
    );
}

#[actix_web::test]
async fn full_capture_to_deletion_flow() {
    let app = init_app().await;
    let cookie = register_account(&app, "alice").await;

    // The registered account resolves through GET /api/user.
    let me: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/user")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(me["username"], json!("alice"));
    assert_eq!(me["role"], json!("student"));
    assert!(me.get("passwordHash").is_none());

    // Store a recording.
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/recordings")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Chapter one",
                "originalText": "Call me Ishmael.",
                "audioUrl": "blob:chapter-one"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(created).await;
    let id = created["id"].as_i64().expect("numeric recording id");

    // It shows up in the listing.
    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/recordings")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["title"], json!("Chapter one"));

    // Server-side text processing works within the same session.
    let processed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/process-text")
            .cookie(cookie.clone())
            .set_json(json!({ "text": "Call me Ishmael.", "type": "direct" }))
            .to_request(),
    )
    .await;
    assert_eq!(processed["result"], json!("Call me Ishmael."));

    // Delete it and the listing is empty again.
    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/recordings/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/recordings")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));

    // Logout ends the session; the cookie stops working at once.
    let logged_out = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(logged_out.status(), StatusCode::NO_CONTENT);

    let after = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/recordings")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn login_resumes_an_account_across_sessions() {
    let app = init_app().await;
    let first = register_account(&app, "bob").await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/logout")
            .cookie(first)
            .to_request(),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": "bob", "password": "Password1" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("login issues a fresh cookie")
        .into_owned();

    let me: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/user")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me["username"], json!("bob"));
}

#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let app = init_app().await;
    register_account(&app, "carol").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "carol", "password": "Other2pass" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], json!("conflict"));
}

#[actix_web::test]
async fn expired_sessions_are_rejected() {
    let (app, _) = init_app_with_ttl(Duration::zero()).await;
    let cookie = register_account(&app, "dave").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/user")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn health_probes_reflect_server_state() {
    let (app, health_state) = init_app_with_ttl(Duration::hours(2)).await;

    let before = test::call_service(
        &app,
        test::TestRequest::get().uri("/healthz/ready").to_request(),
    )
    .await;
    assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

    health_state.mark_ready();
    let after = test::call_service(
        &app,
        test::TestRequest::get().uri("/healthz/ready").to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::OK);

    let alive = test::call_service(
        &app,
        test::TestRequest::get().uri("/healthz/live").to_request(),
    )
    .await;
    assert_eq!(alive.status(), StatusCode::OK);
}
