//! Per-page guard behaviour through the fully assembled application:
//! redirect-vs-inline denials, identifier rules, and public pages.

// Shared harness has helpers used by other integration suites.
#[allow(dead_code)]
#[path = "support/app.rs"]
mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use razewatch::server::build_app;
use rstest::rstest;
use serde_json::Value;

use support::{fixture_deps, sign_in};

fn location(res: &actix_web::dev::ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[actix_web::test]
async fn anonymous_visitors_may_browse_recruitments() {
    let app = test::init_service(build_app(fixture_deps())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/recruitments")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let items: Value = test::read_body_json(res).await;
    assert!(!items.as_array().expect("array body").is_empty());
}

#[rstest]
#[case("/api/v1/demolitions")]
#[case("/api/v1/archive")]
#[actix_web::test]
async fn restricted_pages_redirect_anonymous_visitors_home(#[case] uri: &str) {
    let app = test::init_service(build_app(fixture_deps())).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "uri {uri}");
    assert_eq!(location(&res), Some("/"));
}

#[actix_web::test]
async fn every_signed_in_role_may_work_demolitions() {
    let app = test::init_service(build_app(fixture_deps())).await;
    for username in ["district-office", "city-hall", "society", "inspector"] {
        let cookie = sign_in(&app, username).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/demolitions")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK, "role of {username}");
    }
}

#[actix_web::test]
async fn applicant_screening_denies_other_roles_inline() {
    let app = test::init_service(build_app(fixture_deps())).await;

    // Screening roles see the list.
    for username in ["city-hall", "society"] {
        let cookie = sign_in(&app, username).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/applicants")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK, "role of {username}");
    }

    // Everyone else stays on the page and reads the denial instead of being
    // navigated away.
    let cookie = sign_in(&app, "inspector").await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/applicants")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(location(&res), None);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-3")]
#[case("3.5")]
#[actix_web::test]
async fn malformed_detail_identifiers_redirect_to_the_list(#[case] raw_id: &str) {
    let app = test::init_service(build_app(fixture_deps())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/recruitments/{raw_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "id {raw_id:?}");
    assert_eq!(location(&res), Some("/recruitments"));
}

#[actix_web::test]
async fn well_formed_detail_identifiers_resolve() {
    let app = test::init_service(build_app(fixture_deps())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/recruitments/1")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], 1);
}
