//! Demolition-request pages.
//!
//! ```text
//! GET /api/v1/demolitions
//! GET /api/v1/demolitions/{id}
//! ```
//!
//! Every organisational role works demolition requests from its own angle,
//! so the pages admit all four and send anonymous visitors back to the
//! landing page.

use actix_web::{HttpResponse, get, web};

use crate::domain::ports::DemolitionRequestSummary;
use crate::domain::{ALL_ROLES, Error, GuardPolicy, ResourceId, UnauthorizedAction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::{
    Access, check_access, handle_detail_failure, map_list_failure, require_token,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const LIST_PATH: &str = "/demolitions";

/// All four roles; anonymous visitors are redirected home.
const POLICY: GuardPolicy = GuardPolicy::roles(
    &ALL_ROLES,
    UnauthorizedAction::Redirect { fallback: "/" },
);

/// List demolition requests visible to the session.
#[utoipa::path(
    get,
    path = "/api/v1/demolitions",
    responses(
        (status = 200, description = "Demolition requests", body = [DemolitionRequestSummary]),
        (status = 303, description = "Redirect for anonymous visitors"),
        (status = 401, description = "Session rejected upstream", body = Error),
    ),
    tags = ["demolitions"],
    operation_id = "listDemolitions"
)]
#[get("/demolitions")]
pub async fn list_demolitions(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    if let Access::Denied(response) = check_access(&session, &POLICY) {
        return Ok(response);
    }
    let token = require_token(&session)?;
    let items = state
        .directory
        .list_demolitions(&token)
        .await
        .map_err(|err| map_list_failure(&session, err))?;
    Ok(HttpResponse::Ok().json(items))
}

/// One demolition request.
#[utoipa::path(
    get,
    path = "/api/v1/demolitions/{id}",
    params(("id" = String, Path, description = "Demolition request identifier")),
    responses(
        (status = 200, description = "Demolition request", body = DemolitionRequestSummary),
        (status = 303, description = "Redirect to the request list"),
    ),
    tags = ["demolitions"],
    operation_id = "getDemolition"
)]
#[get("/demolitions/{id}")]
pub async fn get_demolition(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Access::Denied(response) = check_access(&session, &POLICY) {
        return Ok(response);
    }
    let token = require_token(&session)?;
    let Ok(id) = ResourceId::parse(&path.into_inner()) else {
        return Ok(HttpResponse::SeeOther()
            .insert_header((actix_web::http::header::LOCATION, LIST_PATH))
            .finish());
    };
    match state.directory.fetch_demolition(&token, id).await {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(err) => Ok(handle_detail_failure(&session, LIST_PATH, &err)),
    }
}
