//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use async_trait::async_trait;

use crate::domain::AccessToken;
use crate::domain::guard::ResourceId;
use crate::domain::ports::{
    ApplicantSummary, ArchiveDocument, DemolitionDirectory, DemolitionRequestSummary,
    DirectoryError, FixtureDemolitionDirectory, RecruitmentSummary,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Directory double that counts upstream calls and delegates to the fixture.
pub struct CountingDirectory {
    /// Number of port methods invoked so far.
    pub calls: Arc<AtomicUsize>,
}

impl CountingDirectory {
    /// New counter starting at zero.
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DemolitionDirectory for CountingDirectory {
    async fn list_recruitments(&self) -> Result<Vec<RecruitmentSummary>, DirectoryError> {
        self.tick();
        FixtureDemolitionDirectory.list_recruitments().await
    }

    async fn fetch_recruitment(
        &self,
        id: ResourceId,
    ) -> Result<RecruitmentSummary, DirectoryError> {
        self.tick();
        FixtureDemolitionDirectory.fetch_recruitment(id).await
    }

    async fn list_demolitions(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<DemolitionRequestSummary>, DirectoryError> {
        self.tick();
        FixtureDemolitionDirectory.list_demolitions(token).await
    }

    async fn fetch_demolition(
        &self,
        token: &AccessToken,
        id: ResourceId,
    ) -> Result<DemolitionRequestSummary, DirectoryError> {
        self.tick();
        FixtureDemolitionDirectory.fetch_demolition(token, id).await
    }

    async fn list_applicants(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ApplicantSummary>, DirectoryError> {
        self.tick();
        FixtureDemolitionDirectory.list_applicants(token).await
    }

    async fn list_archive(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ArchiveDocument>, DirectoryError> {
        self.tick();
        FixtureDemolitionDirectory.list_archive(token).await
    }
}

/// Directory double that fails every call with a fixed error.
pub struct FailingDirectory(pub DirectoryError);

#[async_trait]
impl DemolitionDirectory for FailingDirectory {
    async fn list_recruitments(&self) -> Result<Vec<RecruitmentSummary>, DirectoryError> {
        Err(self.0.clone())
    }

    async fn fetch_recruitment(
        &self,
        _id: ResourceId,
    ) -> Result<RecruitmentSummary, DirectoryError> {
        Err(self.0.clone())
    }

    async fn list_demolitions(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<DemolitionRequestSummary>, DirectoryError> {
        Err(self.0.clone())
    }

    async fn fetch_demolition(
        &self,
        _token: &AccessToken,
        _id: ResourceId,
    ) -> Result<DemolitionRequestSummary, DirectoryError> {
        Err(self.0.clone())
    }

    async fn list_applicants(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<ApplicantSummary>, DirectoryError> {
        Err(self.0.clone())
    }

    async fn list_archive(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<ArchiveDocument>, DirectoryError> {
        Err(self.0.clone())
    }
}
