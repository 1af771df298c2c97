//! Document-archive page.
//!
//! ```text
//! GET /api/v1/archive
//! ```
//!
//! Any signed-in role may browse the archive; anonymous visitors go back to
//! the landing page.

use actix_web::{HttpResponse, get, web};

use crate::domain::ports::ArchiveDocument;
use crate::domain::{ALL_ROLES, GuardPolicy, UnauthorizedAction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::{Access, check_access, map_list_failure, require_token};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const POLICY: GuardPolicy = GuardPolicy::roles(
    &ALL_ROLES,
    UnauthorizedAction::Redirect { fallback: "/" },
);

/// List archived programme documents.
#[utoipa::path(
    get,
    path = "/api/v1/archive",
    responses(
        (status = 200, description = "Archived documents", body = [ArchiveDocument]),
        (status = 303, description = "Redirect for anonymous visitors"),
    ),
    tags = ["archive"],
    operation_id = "listArchive"
)]
#[get("/archive")]
pub async fn list_archive(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    if let Access::Denied(response) = check_access(&session, &POLICY) {
        return Ok(response);
    }
    let token = require_token(&session)?;
    let items = state
        .directory
        .list_archive(&token)
        .await
        .map_err(|err| map_list_failure(&session, err))?;
    Ok(HttpResponse::Ok().json(items))
}
