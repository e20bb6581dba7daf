//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain services and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::TextTransformer;
use crate::domain::{AccountService, RecordingService};

use super::session::SessionCookieSettings;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and session resolution.
    pub accounts: Arc<AccountService>,
    /// Recording list/create/delete use cases.
    pub recordings: Arc<RecordingService>,
    /// Server-side transform engine for `/api/process-text`.
    pub transformer: Arc<dyn TextTransformer>,
    /// Attributes applied to issued session cookies.
    pub cookie: SessionCookieSettings,
}

impl HttpState {
    /// Bundle the services a request handler needs.
    #[must_use]
    pub fn new(
        accounts: Arc<AccountService>,
        recordings: Arc<RecordingService>,
        transformer: Arc<dyn TextTransformer>,
        cookie: SessionCookieSettings,
    ) -> Self {
        Self {
            accounts,
            recordings,
            transformer,
            cookie,
        }
    }
}
