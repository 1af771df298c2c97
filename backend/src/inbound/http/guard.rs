//! HTTP application of the page-guard machine.
//!
//! Every gated handler calls [`check_access`] with its own policy constant,
//! so the pending/authorised/unauthorised machine has exactly one
//! implementation. Detail handlers add [`handle_detail_failure`] for the
//! load sub-machine: parse failures never reach the upstream port, and
//! upstream failures always leave a visible notice behind the redirect.

use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};
use tracing::warn;

use crate::domain::ports::DirectoryError;
use crate::domain::{AccessDecision, Error, GuardPolicy, Role, UnauthorizedAction};

use super::session::SessionContext;

/// Outcome of enforcing a page policy for the current request.
pub enum Access {
    /// Render the page; carries the role access was granted to.
    Granted(Option<Role>),
    /// Do not render; respond with the prepared denial instead.
    Denied(HttpResponse),
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Enforce `policy` against the hydrated session.
pub fn check_access(session: &SessionContext, policy: &GuardPolicy) -> Access {
    let snapshot = session.hydrate();
    match policy.evaluate(snapshot.hydration()) {
        // Cookie hydration resolves synchronously, so a request never
        // observes Pending; the arm stays for exhaustiveness and renders the
        // neutral no-decision affordance without redirecting.
        AccessDecision::Pending => Access::Denied(HttpResponse::NoContent().finish()),
        AccessDecision::Authorized(role) => Access::Granted(role),
        AccessDecision::Unauthorized(action) => Access::Denied(match action {
            UnauthorizedAction::Redirect { fallback } => see_other(fallback),
            UnauthorizedAction::Inline => {
                Error::forbidden("access denied for this role").error_response()
            }
        }),
    }
}

/// Bearer token for upstream calls from a page access was granted to.
///
/// An identity without a token is an inconsistent session; it is dropped
/// rather than calling upstream with nothing.
pub fn require_token(session: &SessionContext) -> Result<crate::domain::AccessToken, Error> {
    match session.hydrate().token() {
        Some(token) => Ok(token.clone()),
        None => {
            session.expire_credentials();
            Err(Error::unauthorized("login required"))
        }
    }
}

/// Redirect to `list_path`, queueing `notice` for the next chrome fetch.
pub fn redirect_with_notice(
    session: &SessionContext,
    list_path: &str,
    notice: &str,
) -> HttpResponse {
    session.push_notice(notice);
    see_other(list_path)
}

/// Resolve a failed detail load into its safe redirect.
///
/// An upstream rejection drops the stored credentials first, so the next
/// guarded render sees an anonymous session; every branch leaves a visible
/// notice. The detail page itself never renders a failure state.
pub fn handle_detail_failure(
    session: &SessionContext,
    list_path: &str,
    err: &DirectoryError,
) -> HttpResponse {
    warn!(error = %err, "detail load failed; redirecting to list view");
    match err {
        DirectoryError::Unauthorized => {
            session.expire_credentials();
            redirect_with_notice(
                session,
                list_path,
                "Your session has expired. Please sign in again.",
            )
        }
        DirectoryError::NotFound { .. } => {
            redirect_with_notice(session, list_path, "The requested record could not be found.")
        }
        DirectoryError::Unavailable { .. } => redirect_with_notice(
            session,
            list_path,
            "The record could not be loaded. Please try again later.",
        ),
    }
}

/// Map a list-load failure onto the error envelope.
///
/// List pages have no safer view to fall back to, so the failure surfaces
/// once as a response the client renders as a transient notification. An
/// upstream rejection still drops the stored credentials.
pub fn map_list_failure(session: &SessionContext, err: DirectoryError) -> Error {
    match err {
        DirectoryError::Unauthorized => {
            session.expire_credentials();
            Error::unauthorized("session rejected by the programme backend")
        }
        DirectoryError::NotFound { id } => Error::not_found(format!("resource {id} not found")),
        DirectoryError::Unavailable { message } => {
            Error::internal(format!("programme backend unavailable: {message}"))
        }
    }
}
