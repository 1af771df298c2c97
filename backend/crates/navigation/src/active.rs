//! The single path-activation rule shared by sidebar and breadcrumb.

use crate::menu::SubItem;

/// Whether a navigation entry pointing at `target` is active for
/// `current` location.
///
/// An entry is active on an exact match, or when `current` sits strictly
/// below `target` on a path-segment boundary (`/demolitions` is active for
/// `/demolitions/42` but not for `/demolitionsarchive`). The root path `/`
/// matches only exactly; otherwise every location would light it up as a
/// prefix.
///
/// An empty `current` (location not resolved yet) matches nothing.
#[must_use]
pub fn is_active(current: &str, target: &str) -> bool {
    if current.is_empty() {
        return false;
    }
    if current == target {
        return true;
    }
    if target == "/" {
        return false;
    }
    current
        .strip_prefix(target)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Whether any of `sub_items` is active for `current`. Empty lists yield
/// false.
#[must_use]
pub fn has_active_descendant(current: &str, sub_items: &[SubItem]) -> bool {
    sub_items
        .iter()
        .any(|item| is_active(current, item.path()))
}
