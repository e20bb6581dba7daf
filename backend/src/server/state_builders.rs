//! Builders selecting durable or in-memory stores for the HTTP state.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{RecordingRepository, SessionRepository, UserRepository};
use crate::domain::{AccountService, RecordingService};
use crate::inbound::http::state::HttpState;
use crate::outbound::engines::CannedTextTransformer;
use crate::outbound::persistence::{
    DbPool, DieselRecordingRepository, DieselSessionRepository, DieselUserRepository,
    MemoryRecordingRepository, MemorySessionRepository, MemoryUserRepository, PoolConfig,
};

use super::ServerConfig;

/// The three storage ports every service stack needs.
pub(super) struct Stores {
    users: Arc<dyn UserRepository>,
    recordings: Arc<dyn RecordingRepository>,
    sessions: Arc<dyn SessionRepository>,
}

fn diesel_stores(pool: &DbPool) -> Stores {
    Stores {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        recordings: Arc::new(DieselRecordingRepository::new(pool.clone())),
        sessions: Arc::new(DieselSessionRepository::new(pool.clone())),
    }
}

fn memory_stores() -> Stores {
    Stores {
        users: Arc::new(MemoryUserRepository::default()),
        recordings: Arc::new(MemoryRecordingRepository::default()),
        sessions: Arc::new(MemorySessionRepository::default()),
    }
}

/// Pick the durable stores when a pool is configured, the in-memory ones
/// otherwise.
fn select_stores<P>(pool: &Option<P>, durable: impl FnOnce(&P) -> Stores) -> Stores {
    match pool {
        Some(pool) => durable(pool),
        None => memory_stores(),
    }
}

/// Build the connection pool when a database URL is configured.
///
/// # Errors
/// Returns [`std::io::Error`] when the pool cannot be constructed, for
/// example for a malformed connection string.
pub(super) async fn build_pool(config: &ServerConfig) -> std::io::Result<Option<DbPool>> {
    let Some(url) = &config.database_url else {
        return Ok(None);
    };
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))?;
    Ok(Some(pool))
}

/// Assemble the shared HTTP state over the selected stores.
pub(super) fn build_http_state(
    config: &ServerConfig,
    pool: &Option<DbPool>,
) -> web::Data<HttpState> {
    let Stores {
        users,
        recordings,
        sessions,
    } = select_stores(pool, diesel_stores);

    let accounts = Arc::new(AccountService::new(users, sessions, config.session_ttl()));
    let recordings = Arc::new(RecordingService::new(recordings));

    web::Data::new(HttpState::new(
        accounts,
        recordings,
        Arc::new(CannedTextTransformer),
        config.cookie_settings(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_present_selects_the_durable_branch() {
        let mut durable_used = false;
        let _stores = select_stores(&Some(()), |_pool| {
            durable_used = true;
            memory_stores()
        });
        assert!(durable_used);
    }

    #[test]
    fn pool_absent_falls_back_to_memory() {
        let _stores = select_stores::<()>(&None, |_pool| {
            panic!("durable branch must not run without a pool")
        });
    }

    #[tokio::test]
    async fn no_database_url_means_no_pool() {
        let config = <ServerConfig as clap::Parser>::try_parse_from(["backend"])
            .expect("defaults parse");
        let pool = build_pool(&config).await.expect("pool builder succeeds");
        assert!(pool.is_none());
    }
}
