//! Domain types for the portal: roles, sessions, guards, menus, and the
//! ports the upstream backend is reached through.
//!
//! Everything here is transport agnostic. Inbound adapters translate these
//! types to and from HTTP; the outbound adapter maps wire failures into the
//! port error enums. Keep types immutable and document invariants in each
//! type's Rustdoc.

pub mod auth;
pub mod error;
pub mod guard;
pub mod menu;
pub mod ports;
pub mod role;
pub mod session;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::guard::{
    AccessDecision, GuardPolicy, HydrationState, ResourceId, ResourceIdError, UnauthorizedAction,
};
pub use self::role::{ALL_ROLES, Role};
pub use self::session::{AccessToken, Identity, IdentityValidationError, TokenValidationError};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
