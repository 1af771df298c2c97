//! Recruitment announcement pages.
//!
//! ```text
//! GET /api/v1/recruitments
//! GET /api/v1/recruitments/{id}
//! ```
//!
//! Open to anonymous visitors; announcements are the public face of the
//! programme. The detail route still applies the identifier rules: a
//! malformed id goes straight back to the list without touching the
//! upstream port.

use actix_web::{HttpResponse, get, web};

use crate::domain::ports::RecruitmentSummary;
use crate::domain::{ALL_ROLES, GuardPolicy, ResourceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::{Access, check_access, handle_detail_failure, map_list_failure};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const LIST_PATH: &str = "/recruitments";

/// Anyone may browse announcements, signed in or not.
const POLICY: GuardPolicy = GuardPolicy::public(&ALL_ROLES);

/// List recruitment announcements.
#[utoipa::path(
    get,
    path = "/api/v1/recruitments",
    responses(
        (status = 200, description = "Announcements", body = [RecruitmentSummary]),
        (status = 500, description = "Internal server error"),
    ),
    tags = ["recruitments"],
    operation_id = "listRecruitments",
    security([])
)]
#[get("/recruitments")]
pub async fn list_recruitments(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    if let Access::Denied(response) = check_access(&session, &POLICY) {
        return Ok(response);
    }
    let items = state
        .directory
        .list_recruitments()
        .await
        .map_err(|err| map_list_failure(&session, err))?;
    Ok(HttpResponse::Ok().json(items))
}

/// One recruitment announcement.
#[utoipa::path(
    get,
    path = "/api/v1/recruitments/{id}",
    params(("id" = String, Path, description = "Announcement identifier")),
    responses(
        (status = 200, description = "Announcement", body = RecruitmentSummary),
        (status = 303, description = "Redirect to the announcement list"),
    ),
    tags = ["recruitments"],
    operation_id = "getRecruitment",
    security([])
)]
#[get("/recruitments/{id}")]
pub async fn get_recruitment(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Access::Denied(response) = check_access(&session, &POLICY) {
        return Ok(response);
    }
    let Ok(id) = ResourceId::parse(&path.into_inner()) else {
        // Malformed identifiers never reach the upstream port.
        return Ok(HttpResponse::SeeOther()
            .insert_header((actix_web::http::header::LOCATION, LIST_PATH))
            .finish());
    };
    match state.directory.fetch_recruitment(id).await {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(err) => Ok(handle_detail_failure(&session, LIST_PATH, &err)),
    }
}
