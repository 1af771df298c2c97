//! Domain ports defining the edges of the hexagon.
//!
//! The portal owns no business state: login and every list/detail view are
//! served by the upstream programme backend. These traits describe that
//! collaborator with strongly typed errors so adapters map wire failures
//! into predictable variants. Fixture implementations back the default
//! wiring and the test suites.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::guard::ResourceId;
use crate::domain::session::{AccessToken, TokenValidationError};
use crate::domain::LoginCredentials;

/// Identity claims returned by a successful upstream login.
///
/// The role arrives as free text; normalisation happens in the session
/// store, not here, so unrecognised spellings stay observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Bearer token for subsequent upstream calls.
    pub access_token: AccessToken,
    /// Login name.
    pub username: String,
    /// Raw role string as the upstream backend spelled it.
    pub role: String,
    /// Contact email, when provided.
    pub email: Option<String>,
    /// Administrative region, when provided.
    pub region: Option<String>,
    /// Supervision zone, when provided.
    pub zone: Option<String>,
}

/// Failures surfaced by [`LoginService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// The upstream backend rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// A 2xx login response arrived without a usable access token. Fatal
    /// local error; the session must not be created.
    #[error("login response missing access token")]
    MissingToken,
    /// The upstream backend could not be reached or answered abnormally.
    #[error("login service unavailable: {message}")]
    Unavailable {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl From<TokenValidationError> for LoginError {
    fn from(_: TokenValidationError) -> Self {
        Self::MissingToken
    }
}

/// Authenticates portal users against the upstream backend.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Exchange credentials for identity claims and a bearer token.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, LoginError>;
}

/// Failures surfaced by [`DemolitionDirectory`] queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The upstream backend rejected the session token. Callers clear the
    /// session before surfacing this.
    #[error("upstream rejected the session token")]
    Unauthorized,
    /// No resource with the requested identifier.
    #[error("resource {id} not found")]
    NotFound {
        /// Identifier that failed to resolve.
        id: u64,
    },
    /// The upstream backend could not be reached or answered abnormally.
    #[error("directory unavailable: {message}")]
    Unavailable {
        /// Adapter-provided failure description.
        message: String,
    },
}

/// Recruitment announcement summary as listed on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentSummary {
    /// Upstream identifier.
    pub id: u64,
    /// Announcement title.
    pub title: String,
    /// First day applications are accepted.
    pub opens_on: NaiveDate,
    /// Last day applications are accepted.
    pub closes_on: NaiveDate,
    /// Upstream workflow status, rendered verbatim.
    pub status: String,
}

/// Demolition-request summary as listed on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemolitionRequestSummary {
    /// Upstream identifier.
    pub id: u64,
    /// Street address of the demolition site.
    pub site_address: String,
    /// District the site belongs to.
    pub district: String,
    /// Upstream workflow status, rendered verbatim.
    pub status: String,
    /// Date the district office filed the request.
    pub requested_on: NaiveDate,
}

/// Inspector application summary shown to screening roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    /// Upstream identifier.
    pub id: u64,
    /// Applicant name.
    pub name: String,
    /// Architect licence number.
    pub licence_no: String,
    /// Upstream screening status, rendered verbatim.
    pub status: String,
}

/// Archived programme document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveDocument {
    /// Upstream identifier.
    pub id: u64,
    /// Document title.
    pub title: String,
    /// Archive category.
    pub category: String,
    /// Date the document was registered.
    pub registered_on: NaiveDate,
}

/// Read-only queries the guarded pages render.
#[async_trait]
pub trait DemolitionDirectory: Send + Sync {
    /// Public recruitment announcements.
    async fn list_recruitments(&self) -> Result<Vec<RecruitmentSummary>, DirectoryError>;

    /// One recruitment announcement.
    async fn fetch_recruitment(&self, id: ResourceId)
    -> Result<RecruitmentSummary, DirectoryError>;

    /// Demolition requests visible to the session.
    async fn list_demolitions(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<DemolitionRequestSummary>, DirectoryError>;

    /// One demolition request.
    async fn fetch_demolition(
        &self,
        token: &AccessToken,
        id: ResourceId,
    ) -> Result<DemolitionRequestSummary, DirectoryError>;

    /// Inspector applications awaiting screening.
    async fn list_applicants(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ApplicantSummary>, DirectoryError>;

    /// Archived programme documents.
    async fn list_archive(&self, token: &AccessToken)
    -> Result<Vec<ArchiveDocument>, DirectoryError>;
}

fn fixture_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DirectoryError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DirectoryError::Unavailable {
        message: format!("invalid fixture date {year}-{month}-{day}"),
    })
}

/// In-process login fixture used when no upstream base URL is configured.
///
/// Every account authenticates with the password `password`. The society
/// account deliberately reports the alias role spelling the legacy backend
/// uses, so normalisation is exercised end to end.
pub struct FixtureLoginService;

const FIXTURE_USERS: [(&str, &str); 4] = [
    ("district-office", "DISTRICT_OFFICE"),
    ("city-hall", "CITY_HALL"),
    ("society", "ARCHITECTURE_SOCIETY"),
    ("inspector", "INSPECTOR"),
];

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, LoginError> {
        let Some((username, role)) = FIXTURE_USERS
            .iter()
            .find(|(name, _)| *name == credentials.username())
        else {
            return Err(LoginError::InvalidCredentials);
        };
        if credentials.password() != "password" {
            return Err(LoginError::InvalidCredentials);
        }
        let access_token = AccessToken::new(format!("fixture-token-{username}"))?;
        Ok(AuthenticatedUser {
            access_token,
            username: (*username).to_owned(),
            role: (*role).to_owned(),
            email: Some(format!("{username}@razewatch.example")),
            region: Some("Seongbuk-gu".to_owned()),
            zone: Some("Zone 1".to_owned()),
        })
    }
}

/// In-process directory fixture with a small stable data set.
pub struct FixtureDemolitionDirectory;

impl FixtureDemolitionDirectory {
    fn recruitments() -> Result<Vec<RecruitmentSummary>, DirectoryError> {
        Ok(vec![
            RecruitmentSummary {
                id: 1,
                title: "2026 first-half supervising inspector recruitment".to_owned(),
                opens_on: fixture_date(2026, 2, 2)?,
                closes_on: fixture_date(2026, 2, 27)?,
                status: "OPEN".to_owned(),
            },
            RecruitmentSummary {
                id: 2,
                title: "Special recruitment for vacant-building zones".to_owned(),
                opens_on: fixture_date(2026, 5, 11)?,
                closes_on: fixture_date(2026, 5, 29)?,
                status: "CLOSED".to_owned(),
            },
        ])
    }

    fn demolitions() -> Result<Vec<DemolitionRequestSummary>, DirectoryError> {
        Ok(vec![
            DemolitionRequestSummary {
                id: 11,
                site_address: "14-3 Dasan-ro".to_owned(),
                district: "Seongbuk-gu".to_owned(),
                status: "IN_REVIEW".to_owned(),
                requested_on: fixture_date(2026, 6, 1)?,
            },
            DemolitionRequestSummary {
                id: 12,
                site_address: "88 Wausan-gil".to_owned(),
                district: "Mapo-gu".to_owned(),
                status: "ASSIGNED".to_owned(),
                requested_on: fixture_date(2026, 6, 15)?,
            },
        ])
    }
}

#[async_trait]
impl DemolitionDirectory for FixtureDemolitionDirectory {
    async fn list_recruitments(&self) -> Result<Vec<RecruitmentSummary>, DirectoryError> {
        Self::recruitments()
    }

    async fn fetch_recruitment(
        &self,
        id: ResourceId,
    ) -> Result<RecruitmentSummary, DirectoryError> {
        Self::recruitments()?
            .into_iter()
            .find(|item| item.id == id.get())
            .ok_or(DirectoryError::NotFound { id: id.get() })
    }

    async fn list_demolitions(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<DemolitionRequestSummary>, DirectoryError> {
        Self::demolitions()
    }

    async fn fetch_demolition(
        &self,
        _token: &AccessToken,
        id: ResourceId,
    ) -> Result<DemolitionRequestSummary, DirectoryError> {
        Self::demolitions()?
            .into_iter()
            .find(|item| item.id == id.get())
            .ok_or(DirectoryError::NotFound { id: id.get() })
    }

    async fn list_applicants(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<ApplicantSummary>, DirectoryError> {
        Ok(vec![
            ApplicantSummary {
                id: 21,
                name: "Seo Yun-a".to_owned(),
                licence_no: "KIRA-2019-1182".to_owned(),
                status: "PENDING".to_owned(),
            },
            ApplicantSummary {
                id: 22,
                name: "Park Ji-ho".to_owned(),
                licence_no: "KIRA-2015-0347".to_owned(),
                status: "APPROVED".to_owned(),
            },
        ])
    }

    async fn list_archive(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<ArchiveDocument>, DirectoryError> {
        Ok(vec![ArchiveDocument {
            id: 31,
            title: "Supervision report form (rev. 4)".to_owned(),
            category: "FORMS".to_owned(),
            registered_on: fixture_date(2026, 1, 12)?,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("valid credential shape")
    }

    #[actix_web::test]
    async fn fixture_login_accepts_known_users() {
        let user = FixtureLoginService
            .authenticate(&creds("inspector", "password"))
            .await
            .expect("known user authenticates");
        assert_eq!(user.username, "inspector");
        assert_eq!(user.role, "INSPECTOR");
    }

    #[actix_web::test]
    async fn fixture_login_reports_alias_spelling_for_society() {
        let user = FixtureLoginService
            .authenticate(&creds("society", "password"))
            .await
            .expect("known user authenticates");
        assert_eq!(user.role, "ARCHITECTURE_SOCIETY");
    }

    #[actix_web::test]
    async fn fixture_login_rejects_bad_credentials() {
        for (username, password) in [("inspector", "wrong"), ("nobody", "password")] {
            let err = FixtureLoginService
                .authenticate(&creds(username, password))
                .await
                .expect_err("must reject");
            assert_eq!(err, LoginError::InvalidCredentials);
        }
    }

    #[actix_web::test]
    async fn fixture_directory_misses_unknown_ids() {
        let id = ResourceId::parse("999").expect("valid id");
        let err = FixtureDemolitionDirectory
            .fetch_recruitment(id)
            .await
            .expect_err("unknown id must miss");
        assert_eq!(err, DirectoryError::NotFound { id: 999 });
    }
}
