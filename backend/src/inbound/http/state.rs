//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! the domain ports and stay testable without I/O. The default wiring uses
//! the in-process fixtures; the server swaps in upstream adapters when a
//! base URL is configured.

use std::sync::Arc;

use crate::domain::ports::{
    DemolitionDirectory, FixtureDemolitionDirectory, FixtureLoginService, LoginService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authenticates users against the upstream backend.
    pub login: Arc<dyn LoginService>,
    /// Read-only queries the guarded pages render.
    pub directory: Arc<dyn DemolitionDirectory>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(login: Arc<dyn LoginService>, directory: Arc<dyn DemolitionDirectory>) -> Self {
        Self { login, directory }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            directory: Arc::new(FixtureDemolitionDirectory),
        }
    }
}
