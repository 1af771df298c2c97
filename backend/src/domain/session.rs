//! Session identity and access-token types.
//!
//! The identity is what the session store persists between page loads:
//! username, normalised role, and the optional contact/jurisdiction fields
//! the upstream backend returns at login. The token is kept as a separate
//! value with its own storage channel; it never rides inside the identity
//! blob.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Validation failures for [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// Username was blank once trimmed.
    EmptyUsername,
}

impl std::fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "identity username must not be empty"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Persisted identity of an authenticated portal user.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `role` is already normalised; raw upstream role strings never reach
///   this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    username: String,
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<String>,
}

impl Identity {
    /// Build a validated identity.
    pub fn new(
        username: impl Into<String>,
        role: Option<Role>,
        email: Option<String>,
        region: Option<String>,
        zone: Option<String>,
    ) -> Result<Self, IdentityValidationError> {
        let username = username.into();
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(IdentityValidationError::EmptyUsername);
        }
        Ok(Self {
            username: trimmed.to_owned(),
            role,
            email,
            region,
            zone,
        })
    }

    /// Login name of the user.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Normalised role; `None` when the upstream role was unrecognised.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Contact email, when the upstream backend provided one.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Administrative region the account belongs to.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Supervision zone within the region.
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }
}

/// Validation failures for [`AccessToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    /// The token string was empty.
    EmptyToken,
}

impl std::fmt::Display for TokenValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "access token must not be empty"),
        }
    }
}

impl std::error::Error for TokenValidationError {}

/// Bearer token issued by the upstream backend at login.
///
/// Deliberately has no `Display` impl so the raw value does not drift into
/// log output; adapters reach for [`AccessToken::reveal`] at the one place
/// the wire needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a non-empty token string.
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TokenValidationError::EmptyToken);
        }
        Ok(Self(raw))
    }

    /// The raw token value, for the Authorization header.
    pub fn reveal(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identity_requires_a_username() {
        assert_eq!(
            Identity::new("  ", Some(Role::Inspector), None, None, None),
            Err(IdentityValidationError::EmptyUsername)
        );
    }

    #[rstest]
    fn identity_round_trips_through_json() {
        let identity = Identity::new(
            "gu-admin",
            Some(Role::DistrictOffice),
            Some("admin@district.example".to_owned()),
            Some("Seongdong-gu".to_owned()),
            Some("Zone 2".to_owned()),
        )
        .expect("valid identity");
        let blob = serde_json::to_string(&identity).expect("serializable");
        let back: Identity = serde_json::from_str(&blob).expect("deserializable");
        assert_eq!(back, identity);
    }

    #[rstest]
    fn roleless_identity_serialises_null_role() {
        let identity =
            Identity::new("visitor", None, None, None, None).expect("valid identity");
        let json = serde_json::to_value(&identity).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({ "username": "visitor", "role": null })
        );
    }

    #[rstest]
    fn empty_tokens_are_rejected() {
        assert_eq!(
            AccessToken::new(""),
            Err(TokenValidationError::EmptyToken)
        );
        assert!(AccessToken::new("tok-1").is_ok());
    }
}
