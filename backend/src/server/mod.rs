//! Server construction and middleware wiring.

mod config;
mod session_key;

pub use config::ServerConfig;
pub use session_key::{key_fingerprint, load_session_key};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{BrowserSession, CookieContentSecurity},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::applicants::list_applicants;
use crate::inbound::http::archive::list_archive;
use crate::inbound::http::demolitions::{get_demolition, list_demolitions};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::navigation::navigation_chrome;
use crate::inbound::http::recruitments::{get_recruitment, list_recruitments};
use crate::inbound::http::sessions::{current_session, login, logout};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::UpstreamClient;

/// Everything [`build_app`] needs to assemble one application instance.
///
/// Public so integration suites can assemble the same application the
/// production server runs, with test-controlled state.
#[derive(Clone)]
pub struct AppDependencies {
    /// Shared readiness/liveness state.
    pub health_state: web::Data<HealthState>,
    /// Port implementations the handlers call.
    pub http_state: web::Data<HttpState>,
    /// Session cookie signing key.
    pub key: Key,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` attribute of the session cookie.
    pub same_site: SameSite,
}

/// The generic not-found view: navigations resolving to no known route get a
/// JSON envelope rather than a bare 404.
async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("no such route"))
}

/// Assemble the portal application.
///
/// The session middleware deliberately uses a browser-session lifetime: the
/// cookie (token and identity both) vanishes when the browser session ends,
/// trading convenience for a smaller credential exposure window.
pub fn build_app(
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
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(BrowserSession::default())
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(current_session)
        .service(navigation_chrome)
        .service(list_recruitments)
        .service(get_recruitment)
        .service(list_demolitions)
        .service(get_demolition)
        .service(list_applicants)
        .service(list_archive);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
        .default_service(web::route().to(not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    config.upstream_base.as_ref().map_or_else(
        || web::Data::new(HttpState::default()),
        |base| {
            let client = Arc::new(UpstreamClient::new(base.clone()));
            web::Data::new(HttpState::new(client.clone(), client))
        },
    )
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        upstream_base: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
