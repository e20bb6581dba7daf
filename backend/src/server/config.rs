//! Runtime configuration parsed from flags and environment.

use std::net::SocketAddr;

use chrono::Duration;
use clap::Parser;

use crate::inbound::http::session::SessionCookieSettings;

/// Command-line and environment configuration for the HTTP server.
///
/// Every flag has an `APP_`-prefixed environment variable fallback so the
/// binary runs unchanged under an orchestrator. When `--database-url` is
/// absent the server keeps all state in process memory, which is the mode
/// the integration tests run in.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Recording capture backend")]
pub struct ServerConfig {
    /// Socket address to bind the HTTP listener to.
    #[arg(long, env = "APP_BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string; omit to run on the in-memory stores.
    #[arg(long, env = "APP_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Session lifetime in seconds.
    #[arg(long, env = "APP_SESSION_TTL_SECS", default_value_t = 7200)]
    pub session_ttl_secs: u32,

    /// Whether issued session cookies carry the `Secure` attribute.
    /// Disable only behind a TLS-terminating proxy on a trusted network.
    #[arg(
        long,
        env = "APP_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Session lifetime as a [`chrono::Duration`].
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(i64::from(self.session_ttl_secs))
    }

    /// Cookie attributes derived from this configuration.
    #[must_use]
    pub fn cookie_settings(&self) -> SessionCookieSettings {
        SessionCookieSettings {
            secure: self.cookie_secure,
        }
    }
}
