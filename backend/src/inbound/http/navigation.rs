//! Navigation chrome handler: role label, menu with activation flags, and
//! the breadcrumb trail for the current location.
//!
//! ```text
//! GET /api/v1/navigation?path=/demolitions/42
//! ```
//!
//! Sidebar highlighting and the breadcrumb both come from the single
//! activation rule in the `navigation` crate, so they cannot disagree. The
//! handler never fails on an odd session: an unrecognised role renders the
//! public tree and chrome degrades rather than erroring.

use actix_web::{get, web};
use navigation::{MenuItem, SubItem, Trail, derive_trail, has_active_descendant, is_active};
use serde::{Deserialize, Serialize};

use crate::domain::menu::{default_menu, menu_for, role_label};
use crate::inbound::http::session::SessionContext;

/// Query parameters for the chrome fetch.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NavigationQuery {
    /// Current location; absent while the client router is still resolving,
    /// in which case nothing is active.
    pub path: Option<String>,
    /// Render the pre-login landing tree instead of the public tree for
    /// anonymous sessions.
    #[serde(default)]
    pub landing: bool,
}

/// Second-level entry with its activation flag.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubItemView {
    /// Display label.
    pub label: String,
    /// Navigation destination.
    pub path: String,
    /// Whether this entry matches the current location.
    pub active: bool,
}

/// Top-level entry with activation and expansion flags.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    /// Display label.
    pub label: String,
    /// Navigation destination.
    pub path: String,
    /// Whether this entry (or one of its children) matches the current
    /// location.
    pub active: bool,
    /// Whether the sub-item list should render expanded.
    pub expanded: bool,
    /// Ordered children; empty for leaf items.
    pub sub_items: Vec<SubItemView>,
}

/// One step of the rendered breadcrumb.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrailEntryView {
    /// Display label.
    pub label: String,
    /// Navigation destination.
    pub path: String,
}

/// Breadcrumb with its presentation flag.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbView {
    /// False for a home-only trail: reserve the layout slot, render nothing.
    pub visible: bool,
    /// Ordered entries, Home first; never more than three.
    pub trail: Vec<TrailEntryView>,
}

/// Full navigation chrome payload.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    /// Human-readable role label; absent for anonymous sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_label: Option<String>,
    /// Ordered menu for the session role.
    pub menu: Vec<MenuItemView>,
    /// Breadcrumb trail for the current location.
    pub breadcrumb: BreadcrumbView,
    /// One-shot failure notice queued by a previous redirect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

fn sub_item_view(current: &str, item: &SubItem) -> SubItemView {
    SubItemView {
        label: item.label().to_owned(),
        path: item.path().to_owned(),
        active: is_active(current, item.path()),
    }
}

fn menu_item_view(current: &str, item: &MenuItem) -> MenuItemView {
    let active = if item.sub_items().is_empty() {
        is_active(current, item.path())
    } else {
        has_active_descendant(current, item.sub_items())
    };
    MenuItemView {
        label: item.label().to_owned(),
        path: item.path().to_owned(),
        active,
        expanded: active && !item.sub_items().is_empty(),
        sub_items: item
            .sub_items()
            .iter()
            .map(|sub| sub_item_view(current, sub))
            .collect(),
    }
}

fn breadcrumb_view(trail: &Trail) -> BreadcrumbView {
    BreadcrumbView {
        visible: !trail.is_home_only(),
        trail: trail
            .entries()
            .iter()
            .map(|entry| TrailEntryView {
                label: entry.label().to_owned(),
                path: entry.path().to_owned(),
            })
            .collect(),
    }
}

/// Navigation chrome for the current location.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Navigation chrome", body = NavigationView),
    ),
    tags = ["navigation"],
    operation_id = "navigationChrome",
    security([])
)]
#[get("/navigation")]
pub async fn navigation_chrome(
    session: SessionContext,
    query: web::Query<NavigationQuery>,
) -> web::Json<NavigationView> {
    let snapshot = session.hydrate();
    let role = snapshot.role();
    let current = query.path.as_deref().unwrap_or("");

    let tree = if query.landing && role.is_none() {
        default_menu()
    } else {
        menu_for(role)
    };

    let menu = tree
        .items()
        .iter()
        .map(|item| menu_item_view(current, item))
        .collect();
    let breadcrumb = breadcrumb_view(&derive_trail(tree, current));

    web::Json(NavigationView {
        role_label: role_label(role).map(str::to_owned),
        menu,
        breadcrumb,
        notice: session.take_notice(),
    })
}
