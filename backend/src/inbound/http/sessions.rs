//! Sign-in, sign-out and session-view handlers.
//!
//! ```text
//! POST /api/v1/auth/login   {"username":"inspector","password":"password"}
//! POST /api/v1/auth/logout
//! GET  /api/v1/auth/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::LoginError;
use crate::domain::{Error, Identity, LoginCredentials, LoginValidationError, Role, menu};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Password, forwarded verbatim.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Session state as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Whether an identity is present.
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Login name, when signed in.
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Normalised role, when recognised.
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Human-readable role label.
    pub role_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Contact email.
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Administrative region.
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Supervision zone.
    pub zone: Option<String>,
}

impl SessionView {
    fn anonymous() -> Self {
        Self {
            authenticated: false,
            username: None,
            role: None,
            role_label: None,
            email: None,
            region: None,
            zone: None,
        }
    }

    fn from_identity(identity: &Identity) -> Self {
        Self {
            authenticated: true,
            username: Some(identity.username().to_owned()),
            role: identity.role(),
            role_label: menu::role_label(identity.role()).map(str::to_owned),
            email: identity.email().map(str::to_owned),
            region: identity.region().map(str::to_owned),
            zone: identity.zone().map(str::to_owned),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_login_error(err: LoginError) -> Error {
    match err {
        LoginError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        LoginError::MissingToken => Error::internal("login response missing access token"),
        LoginError::Unavailable { message } => {
            Error::internal(format!("login service unavailable: {message}"))
        }
    }
}

/// Authenticate against the upstream backend and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionView,
         headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionView>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state
        .login
        .authenticate(&credentials)
        .await
        .map_err(map_login_error)?;
    let identity = session.set_credentials(&user)?;
    Ok(web::Json(SessionView::from_identity(&identity)))
}

/// Drop the session. Idempotent; signing out twice is not an error.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Session cleared"),
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Current session state, hydrated from the cookie.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Session state", body = SessionView),
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security([])
)]
#[get("/auth/session")]
pub async fn current_session(session: SessionContext) -> web::Json<SessionView> {
    let snapshot = session.hydrate();
    let view = snapshot
        .identity()
        .map_or_else(SessionView::anonymous, SessionView::from_identity);
    web::Json(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    fn app_services() -> (
        actix_web::web::Data<HttpState>,
        actix_session::SessionMiddleware<actix_session::storage::CookieSessionStore>,
    ) {
        (
            web::Data::new(HttpState::default()),
            test_session_middleware(),
        )
    }

    #[actix_web::test]
    async fn login_rejects_blank_username_before_the_port_is_hit() {
        let (state, middleware) = app_services();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(middleware)
                .service(login),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({ "username": " ", "password": "pw" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn login_round_trips_into_a_session_view() {
        let (state, middleware) = app_services();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(middleware)
                .service(login)
                .service(current_session),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({ "username": "society", "password": "password" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();
        let view: SessionView = test::read_body_json(res).await;
        assert!(view.authenticated);
        // Alias spelling from the legacy backend normalises on the way in.
        assert_eq!(view.role, Some(Role::ArchitectSociety));
        assert_eq!(view.role_label.as_deref(), Some("Architect Society"));

        let session_req = test::TestRequest::get()
            .uri("/auth/session")
            .cookie(cookie)
            .to_request();
        let session_res = test::call_service(&app, session_req).await;
        let restored: SessionView = test::read_body_json(session_res).await;
        assert!(restored.authenticated);
        assert_eq!(restored.username.as_deref(), Some("society"));
        assert_eq!(restored.role, Some(Role::ArchitectSociety));
    }

    #[actix_web::test]
    async fn logout_is_idempotent() {
        let (state, middleware) = app_services();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(middleware)
                .service(logout),
        )
        .await;
        for _ in 0..2 {
            let res = test::call_service(
                &app,
                test::TestRequest::post().uri("/auth/logout").to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::NO_CONTENT);
        }
    }

    #[actix_web::test]
    async fn anonymous_session_view_is_unauthenticated() {
        let (state, middleware) = app_services();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(middleware)
                .service(current_session),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/auth/session").to_request(),
        )
        .await;
        let view: SessionView = test::read_body_json(res).await;
        assert!(!view.authenticated);
        assert_eq!(view.role, None);
    }
}
