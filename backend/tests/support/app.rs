//! Shared harness assembling the full portal application for integration
//! suites, exactly as the production server wires it.

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};

use razewatch::inbound::http::health::HealthState;
use razewatch::inbound::http::state::HttpState;
use razewatch::server::AppDependencies;

/// Dependencies for one application instance backed by the fixture ports.
pub fn fixture_deps() -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::default()),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

/// Extract the session cookie from a response, if one was set.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Sign a fixture user in and return the session cookie.
pub async fn sign_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "username": username, "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "fixture login must succeed");
    session_cookie(&res).expect("login sets a session cookie")
}
