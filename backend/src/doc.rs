//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for the
//! portal REST surface: auth/session operations, navigation chrome, the
//! guarded pages, and the health probes. The generated document backs the
//! Swagger UI served in debug builds and can be exported with
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role};
use crate::domain::ports::{
    ApplicantSummary, ArchiveDocument, DemolitionRequestSummary, RecruitmentSummary,
};
use crate::inbound::http::navigation::{
    BreadcrumbView, MenuItemView, NavigationView, SubItemView, TrailEntryView,
};
use crate::inbound::http::sessions::{LoginRequest, SessionView};

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
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the portal REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Razewatch portal API",
        description = "Role-aware navigation, session management, and guarded \
                       pages for the municipal demolition-supervision programme."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sessions::login,
        crate::inbound::http::sessions::logout,
        crate::inbound::http::sessions::current_session,
        crate::inbound::http::navigation::navigation_chrome,
        crate::inbound::http::recruitments::list_recruitments,
        crate::inbound::http::recruitments::get_recruitment,
        crate::inbound::http::demolitions::list_demolitions,
        crate::inbound::http::demolitions::get_demolition,
        crate::inbound::http::applicants::list_applicants,
        crate::inbound::http::archive::list_archive,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        LoginRequest,
        SessionView,
        NavigationView,
        MenuItemView,
        SubItemView,
        BreadcrumbView,
        TrailEntryView,
        RecruitmentSummary,
        DemolitionRequestSummary,
        ApplicantSummary,
        ArchiveDocument,
    )),
    tags(
        (name = "auth", description = "Sign-in, sign-out and session state"),
        (name = "navigation", description = "Role-aware navigation chrome"),
        (name = "recruitments", description = "Recruitment announcements"),
        (name = "demolitions", description = "Demolition-request workflows"),
        (name = "applicants", description = "Inspector-application screening"),
        (name = "archive", description = "Programme document archive"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
