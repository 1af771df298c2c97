//! Inspector-application screening page.
//!
//! ```text
//! GET /api/v1/applicants
//! ```
//!
//! Screening is shared between city hall and the architect society. Other
//! signed-in roles see an inline access-denied notice rather than being
//! navigated away; they reached the page from somewhere legitimate and
//! bouncing them home would be more confusing than telling them why.

use actix_web::{HttpResponse, get, web};

use crate::domain::ports::ApplicantSummary;
use crate::domain::{Error, GuardPolicy, Role, UnauthorizedAction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::{Access, check_access, map_list_failure, require_token};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Screening roles only; unauthorised sessions get the inline denial.
const POLICY: GuardPolicy = GuardPolicy::roles(
    &[Role::CityHall, Role::ArchitectSociety],
    UnauthorizedAction::Inline,
);

/// List inspector applications awaiting screening.
#[utoipa::path(
    get,
    path = "/api/v1/applicants",
    responses(
        (status = 200, description = "Applications", body = [ApplicantSummary]),
        (status = 403, description = "Role not permitted", body = Error),
    ),
    tags = ["applicants"],
    operation_id = "listApplicants"
)]
#[get("/applicants")]
pub async fn list_applicants(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    if let Access::Denied(response) = check_access(&session, &POLICY) {
        return Ok(response);
    }
    let token = require_token(&session)?;
    let items = state
        .directory
        .list_applicants(&token)
        .await
        .map_err(|err| map_list_failure(&session, err))?;
    Ok(HttpResponse::Ok().json(items))
}
