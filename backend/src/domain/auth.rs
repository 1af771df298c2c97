//! Login credential validation.
//!
//! Handlers parse wire payloads into [`LoginCredentials`] before anything
//! talks to the login port, so the port only ever sees shapes worth sending
//! upstream.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Rejections raised while validating a login payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Credentials accepted for a sign-in attempt.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim; surrounding whitespace may be
///   deliberate, so only emptiness is rejected.
///
/// The password is zeroised on drop and masked in debug output, so a stray
/// `{:?}` in a log line cannot leak it.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw username/password input from a login payload.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: trimmed.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login name, trimmed.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as the user typed it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
