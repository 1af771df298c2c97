//! The session store: single source of truth for who is signed in and as
//! what role.
//!
//! Wraps the cookie-backed Actix session so handlers only deal with
//! domain-level operations. The access token and the identity blob live
//! under separate keys; the identity is stored as a JSON string so a
//! corrupted blob is a modelled case (discard, log, revert to anonymous)
//! rather than a crash. No network I/O originates here.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::AuthenticatedUser;
use crate::domain::{AccessToken, Error, HydrationState, Identity, Role};

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";
pub(crate) const IDENTITY_KEY: &str = "identity";
pub(crate) const NOTICE_KEY: &str = "notice";

/// Snapshot of the persisted session after a hydrate.
///
/// Multiple hydrates of an unchanged session observe identical snapshots;
/// hydration never mutates state except to discard a corrupt identity blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydratedSession {
    token: Option<AccessToken>,
    identity: Option<Identity>,
}

impl HydratedSession {
    /// Bearer token for upstream calls, when signed in.
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Persisted identity, when signed in.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Normalised session role; `None` when anonymous or unrecognised.
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().and_then(Identity::role)
    }

    /// The guard-facing view of this snapshot.
    pub fn hydration(&self) -> HydrationState {
        HydrationState::Resolved(self.role())
    }
}

/// Newtype wrapper exposing the session store operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the identity and token returned by a successful login.
    ///
    /// The raw role string is normalised here; an unrecognised non-empty
    /// value is logged and the session is still created with no role, so an
    /// odd upstream deployment degrades navigation rather than breaking
    /// sign-in.
    pub fn set_credentials(&self, user: &AuthenticatedUser) -> Result<Identity, Error> {
        let role = Role::normalize(&user.role);
        if role.is_none() && !user.role.trim().is_empty() {
            warn!(raw_role = %user.role, "unrecognised role from upstream; session created without role");
        }
        let identity = Identity::new(
            user.username.clone(),
            role,
            user.email.clone(),
            user.region.clone(),
            user.zone.clone(),
        )
        .map_err(|err| Error::internal(format!("login produced invalid identity: {err}")))?;
        let blob = serde_json::to_string(&identity)
            .map_err(|err| Error::internal(format!("failed to encode identity: {err}")))?;
        self.0
            .insert(ACCESS_TOKEN_KEY, user.access_token.reveal())
            .map_err(|err| Error::internal(format!("failed to persist token: {err}")))?;
        self.0
            .insert(IDENTITY_KEY, blob)
            .map_err(|err| Error::internal(format!("failed to persist identity: {err}")))?;
        Ok(identity)
    }

    /// Erase the whole session. Safe to call when already empty.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Drop the stored token and identity after an upstream rejection.
    ///
    /// Unlike [`SessionContext::clear`] this keeps the cookie itself alive,
    /// so the failure notice queued alongside still reaches the next chrome
    /// fetch. The next guarded render hydrates an anonymous session either
    /// way.
    pub fn expire_credentials(&self) {
        let _ = self.0.remove(ACCESS_TOKEN_KEY);
        let _ = self.0.remove(IDENTITY_KEY);
    }

    /// Restore the persisted session state.
    ///
    /// Absent entries leave the snapshot anonymous without clearing
    /// anything; a corrupt identity blob is removed and logged, reverting
    /// the session to anonymous. Idempotent.
    pub fn hydrate(&self) -> HydratedSession {
        let token = match self.0.get::<String>(ACCESS_TOKEN_KEY) {
            Ok(raw) => raw.and_then(|raw| AccessToken::new(raw).ok()),
            Err(err) => {
                warn!(error = %err, "unreadable access token entry; discarding");
                let _ = self.0.remove(ACCESS_TOKEN_KEY);
                None
            }
        };
        let identity = match self.0.get::<String>(IDENTITY_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Identity>(&blob) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    warn!(error = %err, "corrupt identity blob in session; discarding");
                    let _ = self.0.remove(IDENTITY_KEY);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "unreadable identity entry in session; discarding");
                let _ = self.0.remove(IDENTITY_KEY);
                None
            }
        };
        HydratedSession { token, identity }
    }

    /// Queue a one-shot notice shown on the next navigation-chrome fetch.
    pub fn push_notice(&self, message: &str) {
        if let Err(err) = self.0.insert(NOTICE_KEY, message) {
            warn!(error = %err, "failed to queue notice");
        }
    }

    /// Consume the queued notice, if any.
    pub fn take_notice(&self) -> Option<String> {
        match self.0.remove_as::<String>(NOTICE_KEY) {
            Some(Ok(message)) => Some(message),
            Some(Err(raw)) => {
                warn!(raw = %raw, "discarding unreadable notice entry");
                None
            }
            None => None,
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::AuthenticatedUser;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn fixture_user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            access_token: AccessToken::new("tok-fixture").expect("fixture token"),
            username: "city-hall".to_owned(),
            role: role.to_owned(),
            email: Some("clerk@city.example".to_owned()),
            region: Some("Jongno-gu".to_owned()),
            zone: None,
        }
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn credentials_round_trip_through_a_reload() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.set_credentials(&fixture_user("CITY_HALL"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let snapshot = session.hydrate();
                        HttpResponse::Ok().json(serde_json::json!({
                            "token": snapshot.token().map(AccessToken::reveal),
                            "identity": snapshot.identity(),
                        }))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        // A fresh request with only the cookie simulates a page reload.
        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(get_res).await;
        // The token rides its own storage channel, apart from the identity.
        assert_eq!(body["token"], "tok-fixture");
        let identity: Identity =
            serde_json::from_value(body["identity"].clone()).expect("identity blob");
        assert_eq!(identity.username(), "city-hall");
        assert_eq!(identity.role(), Some(Role::CityHall));
        assert_eq!(identity.email(), Some("clerk@city.example"));
        assert_eq!(identity.region(), Some("Jongno-gu"));
        assert_eq!(identity.zone(), None);
    }

    #[actix_web::test]
    async fn alias_role_is_normalised_at_set_time() {
        let app = test::init_service(session_test_app().route(
            "/set",
            web::get().to(|session: SessionContext| async move {
                let identity = session.set_credentials(&fixture_user("ARCHITECTURE_SOCIETY"))?;
                Ok::<_, Error>(HttpResponse::Ok().json(identity.role()))
            }),
        ))
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let role: Option<Role> = test::read_body_json(res).await;
        assert_eq!(role, Some(Role::ArchitectSociety));
    }

    #[actix_web::test]
    async fn unrecognised_role_still_creates_a_session() {
        let app = test::init_service(session_test_app().route(
            "/set",
            web::get().to(|session: SessionContext| async move {
                let identity = session.set_credentials(&fixture_user("SUPER_ADMIN"))?;
                Ok::<_, Error>(HttpResponse::Ok().json(identity))
            }),
        ))
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let identity: Identity = test::read_body_json(res).await;
        assert_eq!(identity.role(), None);
        assert_eq!(identity.username(), "city-hall");
    }

    #[actix_web::test]
    async fn corrupt_identity_blob_reverts_to_anonymous() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/corrupt",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(IDENTITY_KEY, "{not-json")
                            .expect("insert corrupt blob");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let snapshot = session.hydrate();
                        // Hydration must be repeatable after the discard.
                        let again = session.hydrate();
                        assert_eq!(snapshot, again);
                        HttpResponse::Ok().json(snapshot.role())
                    }),
                ),
        )
        .await;

        let corrupt_res =
            test::call_service(&app, test::TestRequest::get().uri("/corrupt").to_request()).await;
        let cookie = session_cookie(&corrupt_res);
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let role: Option<Role> = test::read_body_json(res).await;
        assert_eq!(role, None);
    }

    #[actix_web::test]
    async fn clear_is_idempotent() {
        let app = test::init_service(session_test_app().route(
            "/clear-twice",
            web::get().to(|session: SessionContext| async move {
                session.set_credentials(&fixture_user("CITY_HALL"))?;
                session.clear();
                let first = session.hydrate();
                session.clear();
                let second = session.hydrate();
                assert_eq!(first, second);
                assert!(first.identity().is_none());
                assert!(first.token().is_none());
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/clear-twice").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn notices_are_consumed_once() {
        let app = test::init_service(session_test_app().route(
            "/notice",
            web::get().to(|session: SessionContext| async move {
                session.push_notice("could not load demolition request");
                let first = session.take_notice();
                let second = session.take_notice();
                assert_eq!(
                    first.as_deref(),
                    Some("could not load demolition request")
                );
                assert_eq!(second, None);
                HttpResponse::Ok()
            }),
        ))
        .await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/notice").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
