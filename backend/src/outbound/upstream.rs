//! Outbound adapter for the upstream programme backend.
//!
//! Implements the login and directory ports over REST with bearer-token
//! authentication. Wire failures map into the port error enums: HTTP 401
//! becomes the `Unauthorized` variants the call sites react to by dropping
//! the session, and a 2xx login reply without a usable access token is
//! promoted to a fatal local error rather than a half-created session.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::guard::ResourceId;
use crate::domain::ports::{
    ApplicantSummary, ArchiveDocument, AuthenticatedUser, DemolitionDirectory,
    DemolitionRequestSummary, DirectoryError, LoginError, LoginService, RecruitmentSummary,
};
use crate::domain::{AccessToken, LoginCredentials};

/// REST client for the upstream backend.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: Option<String>,
    username: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    zone: Option<String>,
}

fn user_from_response(response: LoginResponse) -> Result<AuthenticatedUser, LoginError> {
    let raw_token = response.access_token.unwrap_or_default();
    let access_token = AccessToken::new(raw_token)?;
    Ok(AuthenticatedUser {
        access_token,
        username: response.username,
        role: response.role.unwrap_or_default(),
        email: response.email,
        region: response.region,
        zone: response.zone,
    })
}

impl UpstreamClient {
    /// Build a client for the given base URL.
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, DirectoryError> {
        self.base
            .join(path)
            .map_err(|err| DirectoryError::Unavailable {
                message: format!("invalid upstream endpoint {path}: {err}"),
            })
    }

    fn authorized(builder: RequestBuilder, token: Option<&AccessToken>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token.reveal()),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&AccessToken>,
        id: Option<ResourceId>,
    ) -> Result<T, DirectoryError> {
        let url = self.endpoint(path)?;
        let response = Self::authorized(self.http.get(url), token)
            .send()
            .await
            .map_err(|err| DirectoryError::Unavailable {
                message: err.to_string(),
            })?;
        match response.status() {
            StatusCode::UNAUTHORIZED => Err(DirectoryError::Unauthorized),
            StatusCode::NOT_FOUND => Err(id.map_or_else(
                || DirectoryError::Unavailable {
                    message: format!("upstream endpoint {path} not found"),
                },
                |id| DirectoryError::NotFound { id: id.get() },
            )),
            status if status.is_success() => {
                response
                    .json::<T>()
                    .await
                    .map_err(|err| DirectoryError::Unavailable {
                        message: format!("malformed upstream payload: {err}"),
                    })
            }
            status => Err(DirectoryError::Unavailable {
                message: format!("upstream returned {status}"),
            }),
        }
    }
}

#[async_trait]
impl LoginService for UpstreamClient {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, LoginError> {
        let url = self
            .base
            .join("/api/auth/login")
            .map_err(|err| LoginError::Unavailable {
                message: format!("invalid upstream endpoint: {err}"),
            })?;
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({
                "username": credentials.username(),
                "password": credentials.password(),
            }))
            .send()
            .await
            .map_err(|err| LoginError::Unavailable {
                message: err.to_string(),
            })?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(LoginError::InvalidCredentials)
            }
            status if status.is_success() => {
                let payload =
                    response
                        .json::<LoginResponse>()
                        .await
                        .map_err(|err| LoginError::Unavailable {
                            message: format!("malformed login payload: {err}"),
                        })?;
                user_from_response(payload)
            }
            status => Err(LoginError::Unavailable {
                message: format!("upstream returned {status}"),
            }),
        }
    }
}

#[async_trait]
impl DemolitionDirectory for UpstreamClient {
    async fn list_recruitments(&self) -> Result<Vec<RecruitmentSummary>, DirectoryError> {
        self.get_json("/api/recruitments", None, None).await
    }

    async fn fetch_recruitment(
        &self,
        id: ResourceId,
    ) -> Result<RecruitmentSummary, DirectoryError> {
        self.get_json(&format!("/api/recruitments/{id}"), None, Some(id))
            .await
    }

    async fn list_demolitions(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<DemolitionRequestSummary>, DirectoryError> {
        self.get_json("/api/demolition-requests", Some(token), None)
            .await
    }

    async fn fetch_demolition(
        &self,
        token: &AccessToken,
        id: ResourceId,
    ) -> Result<DemolitionRequestSummary, DirectoryError> {
        self.get_json(&format!("/api/demolition-requests/{id}"), Some(token), Some(id))
            .await
    }

    async fn list_applicants(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ApplicantSummary>, DirectoryError> {
        self.get_json("/api/applicants", Some(token), None).await
    }

    async fn list_archive(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<ArchiveDocument>, DirectoryError> {
        self.get_json("/api/resources", Some(token), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response(token: Option<&str>) -> LoginResponse {
        LoginResponse {
            access_token: token.map(str::to_owned),
            username: "inspector".to_owned(),
            role: Some("INSPECTOR".to_owned()),
            email: None,
            region: None,
            zone: None,
        }
    }

    #[rstest]
    fn successful_payload_maps_to_a_user() {
        let user = user_from_response(response(Some("tok-99"))).expect("valid payload");
        assert_eq!(user.username, "inspector");
        assert_eq!(user.role, "INSPECTOR");
        assert_eq!(user.access_token.reveal(), "tok-99");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn missing_or_blank_token_is_a_fatal_local_error(#[case] token: Option<&str>) {
        let err = user_from_response(response(token)).expect_err("must fail");
        assert_eq!(err, LoginError::MissingToken);
    }

    #[rstest]
    fn roleless_payload_keeps_an_empty_raw_role() {
        let mut payload = response(Some("tok"));
        payload.role = None;
        let user = user_from_response(payload).expect("valid payload");
        assert_eq!(user.role, "");
    }
}
