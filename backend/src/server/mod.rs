//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{build_http_state, build_pool};

use std::time::Duration;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::{info, warn};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::process_text::process_text;
use crate::inbound::http::recordings::{create_recording, delete_recording, list_recordings};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{current_user, login, logout, register};
use crate::middleware::trace::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(register)
        .service(login)
        .service(logout)
        .service(current_user)
        .service(list_recordings)
        .service(create_recording)
        .service(delete_recording)
        .service(process_text);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Periodically delete expired session rows.
///
/// Expiry is enforced on every lookup regardless; the sweep only bounds
/// store growth, so failures are logged and retried next tick.
fn spawn_session_sweeper(http_state: web::Data<HttpState>) {
    let accounts = http_state.accounts.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match accounts.sweep_expired_sessions().await {
                Ok(0) => {}
                Ok(purged) => info!(purged, "purged expired sessions"),
                Err(err) => warn!(error = %err, "session sweep failed"),
            }
        }
    });
}

/// Construct an Actix HTTP server from the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the database pool or binding
/// the listener fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let pool = build_pool(&config).await?;
    let http_state = build_http_state(&config, &pool);
    spawn_session_sweeper(http_state.clone());

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
