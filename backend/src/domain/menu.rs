//! Static role-to-menu registry.
//!
//! One curated tree per role, one for anonymous visitors, and one for the
//! pre-login landing state. Trees are built and validated once on first
//! access; a tree that fails validation is a deployment configuration error
//! and degrades to an empty menu with an error log, because navigation
//! chrome must never take the page down with it.

use std::sync::LazyLock;

use navigation::{MenuItem, MenuTree, MenuValidationError, SubItem};
use tracing::error;

use crate::domain::Role;

fn built(name: &str, build: fn() -> Result<MenuTree, MenuValidationError>) -> MenuTree {
    match build() {
        Ok(tree) => tree,
        Err(err) => {
            error!(menu = name, error = %err, "invalid menu configuration; rendering empty menu");
            MenuTree::empty()
        }
    }
}

fn district_office_menu() -> Result<MenuTree, MenuValidationError> {
    MenuTree::try_new(vec![
        MenuItem::with_sub_items(
            "Demolition Requests",
            "/demolitions",
            vec![
                SubItem::new("Submit Request", "/demolitions/new")?,
                SubItem::new("In Review", "/demolitions/review")?,
                SubItem::new("Completed", "/demolitions/completed")?,
            ],
        )?,
        MenuItem::leaf("Recruitments", "/recruitments")?,
        MenuItem::leaf("Notices", "/notices")?,
        MenuItem::leaf("Document Archive", "/archive")?,
    ])
}

fn city_hall_menu() -> Result<MenuTree, MenuValidationError> {
    MenuTree::try_new(vec![
        MenuItem::with_sub_items(
            "Recruitments",
            "/recruitments",
            vec![
                SubItem::new("Announcements", "/recruitments/announcements")?,
                SubItem::new("New Announcement", "/recruitments/new")?,
                SubItem::new("Applicants", "/applicants")?,
            ],
        )?,
        MenuItem::with_sub_items(
            "Demolition Oversight",
            "/demolitions",
            vec![
                SubItem::new("In Review", "/demolitions/review")?,
                SubItem::new("Assignments", "/demolitions/assignments")?,
            ],
        )?,
        MenuItem::leaf("Notices", "/notices")?,
        MenuItem::leaf("Document Archive", "/archive")?,
    ])
}

fn architect_society_menu() -> Result<MenuTree, MenuValidationError> {
    MenuTree::try_new(vec![
        MenuItem::with_sub_items(
            "Applicant Screening",
            "/applicants",
            vec![
                SubItem::new("Pending Review", "/applicants/pending")?,
                SubItem::new("Approved", "/applicants/approved")?,
            ],
        )?,
        MenuItem::leaf("Inspector Pool", "/inspectors")?,
        MenuItem::leaf("Demolition Assignments", "/demolitions")?,
        MenuItem::leaf("Notices", "/notices")?,
    ])
}

fn inspector_menu() -> Result<MenuTree, MenuValidationError> {
    MenuTree::try_new(vec![
        MenuItem::with_sub_items(
            "Recruitments",
            "/recruitments",
            vec![
                SubItem::new("Announcements", "/recruitments/announcements")?,
                SubItem::new("My Applications", "/recruitments/applications")?,
            ],
        )?,
        MenuItem::with_sub_items(
            "My Demolitions",
            "/demolitions",
            vec![
                SubItem::new("Assigned", "/demolitions/assigned")?,
                SubItem::new("Supervision Reports", "/demolitions/reports")?,
            ],
        )?,
        MenuItem::leaf("Notices", "/notices")?,
        MenuItem::leaf("Document Archive", "/archive")?,
    ])
}

fn public_menu() -> Result<MenuTree, MenuValidationError> {
    MenuTree::try_new(vec![
        MenuItem::leaf("Recruitments", "/recruitments")?,
        MenuItem::leaf("Notices", "/notices")?,
        MenuItem::leaf("Sign In", "/login")?,
    ])
}

fn default_menu_tree() -> Result<MenuTree, MenuValidationError> {
    MenuTree::try_new(vec![
        MenuItem::leaf("About the Programme", "/about")?,
        MenuItem::leaf("Recruitments", "/recruitments")?,
        MenuItem::leaf("Notices", "/notices")?,
    ])
}

static DISTRICT_OFFICE: LazyLock<MenuTree> =
    LazyLock::new(|| built("district_office", district_office_menu));
static CITY_HALL: LazyLock<MenuTree> = LazyLock::new(|| built("city_hall", city_hall_menu));
static ARCHITECT_SOCIETY: LazyLock<MenuTree> =
    LazyLock::new(|| built("architect_society", architect_society_menu));
static INSPECTOR: LazyLock<MenuTree> = LazyLock::new(|| built("inspector", inspector_menu));
static PUBLIC: LazyLock<MenuTree> = LazyLock::new(|| built("public", public_menu));
static DEFAULT: LazyLock<MenuTree> = LazyLock::new(|| built("default", default_menu_tree));

/// Menu tree for a hydrated session role; anonymous sessions get the public
/// tree.
pub fn menu_for(role: Option<Role>) -> &'static MenuTree {
    match role {
        Some(Role::DistrictOffice) => &DISTRICT_OFFICE,
        Some(Role::CityHall) => &CITY_HALL,
        Some(Role::ArchitectSociety) => &ARCHITECT_SOCIETY,
        Some(Role::Inspector) => &INSPECTOR,
        None => &PUBLIC,
    }
}

/// Menu tree for the pre-login landing state.
pub fn default_menu() -> &'static MenuTree {
    &DEFAULT
}

/// Human-readable label for the session role; `None` for anonymous sessions.
pub fn role_label(role: Option<Role>) -> Option<&'static str> {
    role.map(Role::label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::ALL_ROLES;
    use navigation::SubItem as NavSubItem;
    use rstest::rstest;

    fn tree_paths(tree: &MenuTree) -> Vec<&str> {
        tree.items()
            .iter()
            .flat_map(|item| {
                std::iter::once(item.path())
                    .chain(item.sub_items().iter().map(NavSubItem::path))
            })
            .collect()
    }

    #[rstest]
    fn every_role_resolves_a_non_empty_menu() {
        for role in ALL_ROLES {
            assert!(
                !menu_for(Some(role)).is_empty(),
                "menu for {role} must not be empty"
            );
        }
        assert!(!menu_for(None).is_empty());
        assert!(!default_menu().is_empty());
    }

    #[rstest]
    fn paths_are_unique_within_each_tree() {
        let mut trees: Vec<&MenuTree> =
            ALL_ROLES.iter().map(|role| menu_for(Some(*role))).collect();
        trees.push(menu_for(None));
        trees.push(default_menu());
        for tree in trees {
            let mut paths = tree_paths(tree);
            let total = paths.len();
            paths.sort_unstable();
            paths.dedup();
            assert_eq!(paths.len(), total, "duplicate path in menu tree");
        }
    }

    #[rstest]
    fn labels_cover_all_roles_and_anonymous() {
        for role in ALL_ROLES {
            assert!(role_label(Some(role)).is_some());
        }
        assert_eq!(role_label(None), None);
    }
}
