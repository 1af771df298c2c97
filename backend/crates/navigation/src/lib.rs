//! Navigation primitives shared by the Razewatch portal's chrome endpoints.
//!
//! The crate holds the pieces of navigation logic that are pure data and pure
//! functions: a validated two-level menu tree, the path-activation rule used
//! by both the sidebar and the breadcrumb, and first-match breadcrumb
//! derivation. Nothing here performs I/O or knows about roles; callers pick
//! which tree to hand in.
//!
//! Both navigation consumers (sidebar highlighting and breadcrumb trails) go
//! through [`is_active`], so they cannot disagree about which entry matches
//! the current location.

mod active;
mod breadcrumb;
mod menu;

pub use active::{has_active_descendant, is_active};
pub use breadcrumb::{HOME_LABEL, HOME_PATH, Trail, TrailEntry, derive_trail};
pub use menu::{MenuItem, MenuTree, MenuValidationError, SubItem};
