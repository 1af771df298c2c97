//! Role-based page guards.
//!
//! One guard implementation serves every gated page; pages differ only in
//! the [`GuardPolicy`] constant they declare. The decision is a small state
//! machine: access stays [`AccessDecision::Pending`] until the session role
//! is known, then settles exactly once into authorised or unauthorised. The
//! unauthorised handling (redirect versus inline denial) is per-page
//! configuration, never inferred.

use crate::domain::Role;

/// What an unauthorised visitor should experience on a given page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedAction {
    /// Navigate away to a fallback route.
    Redirect {
        /// Destination of the redirect.
        fallback: &'static str,
    },
    /// Stay on the page and render an access-denied notice instead.
    Inline,
}

/// Whether the session store has resolved a role yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationState {
    /// Hydration has not completed; no decision may be taken.
    Pending,
    /// Hydration finished; the session role is known (possibly absent).
    Resolved(Option<Role>),
}

/// Outcome of evaluating a policy against a hydration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Role not yet known; render a neutral loading affordance, take no
    /// redirect action.
    Pending,
    /// Session may view the page; carries the role it was granted for.
    Authorized(Option<Role>),
    /// Session may not view the page; carries the configured handling.
    Unauthorized(UnauthorizedAction),
}

/// Per-page access configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardPolicy {
    allowed: &'static [Role],
    allow_anonymous: bool,
    on_unauthorized: UnauthorizedAction,
}

impl GuardPolicy {
    /// Page restricted to `allowed` roles; anonymous visitors are
    /// unauthorised.
    pub const fn roles(allowed: &'static [Role], on_unauthorized: UnauthorizedAction) -> Self {
        Self {
            allowed,
            allow_anonymous: false,
            on_unauthorized,
        }
    }

    /// Page open to anonymous visitors as well as `allowed` roles.
    pub const fn public(allowed: &'static [Role]) -> Self {
        Self {
            allowed,
            allow_anonymous: true,
            on_unauthorized: UnauthorizedAction::Redirect { fallback: "/" },
        }
    }

    /// The configured unauthorised handling.
    pub const fn on_unauthorized(&self) -> UnauthorizedAction {
        self.on_unauthorized
    }

    /// Evaluate the policy. Pending input yields a pending decision; the
    /// authorised/unauthorised transition happens only on resolved input,
    /// and evaluating the same input again yields the same decision.
    pub fn evaluate(&self, hydration: HydrationState) -> AccessDecision {
        let role = match hydration {
            HydrationState::Pending => return AccessDecision::Pending,
            HydrationState::Resolved(role) => role,
        };
        match role {
            None if self.allow_anonymous => AccessDecision::Authorized(None),
            None => AccessDecision::Unauthorized(self.on_unauthorized),
            Some(role) if self.allowed.contains(&role) => AccessDecision::Authorized(Some(role)),
            Some(_) if self.allow_anonymous => AccessDecision::Authorized(role),
            Some(_) => AccessDecision::Unauthorized(self.on_unauthorized),
        }
    }
}

/// Errors raised while parsing a route resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    /// The path segment was not a positive base-10 integer.
    Malformed,
}

impl std::fmt::Display for ResourceIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "identifier must be a positive integer"),
        }
    }
}

impl std::error::Error for ResourceIdError {}

/// Numeric identifier taken from a detail-route path segment.
///
/// ## Invariants
/// - Strictly positive; parsed from plain base-10 digits. Signs, spaces and
///   non-digit characters are malformed input, handled at the guard before
///   any upstream call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Parse a raw path segment.
    pub fn parse(raw: &str) -> Result<Self, ResourceIdError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ResourceIdError::Malformed);
        }
        let value: u64 = raw.parse().map_err(|_| ResourceIdError::Malformed)?;
        if value == 0 {
            return Err(ResourceIdError::Malformed);
        }
        Ok(Self(value))
    }

    /// The numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
