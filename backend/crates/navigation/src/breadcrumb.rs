//! First-match breadcrumb derivation.
//!
//! The trail is a pure function of the menu tree and the current location.
//! Items are scanned in declaration order and the first active entry wins;
//! configuration curates trees so overlaps do not occur, and when they do the
//! earlier entry is the one shown. This is deliberately not a longest-prefix
//! search.

use serde::Serialize;

use crate::active::is_active;
use crate::menu::MenuTree;

/// Label of the fixed leading trail entry.
pub const HOME_LABEL: &str = "Home";

/// Destination of the fixed leading trail entry.
pub const HOME_PATH: &str = "/";

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailEntry {
    label: String,
    path: String,
}

impl TrailEntry {
    fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_owned(),
            path: path.to_owned(),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Navigation destination.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Derived breadcrumb trail.
///
/// ## Invariants
/// - The first entry is always Home.
/// - The trail holds one, two, or three entries; the menu tree is capped at
///   two levels, so nothing longer can be derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    fn home_only() -> Self {
        Self {
            entries: vec![TrailEntry::new(HOME_LABEL, HOME_PATH)],
        }
    }

    /// Ordered entries, Home first.
    #[must_use]
    pub fn entries(&self) -> &[TrailEntry] {
        self.entries.as_slice()
    }

    /// A home-only trail carries no location information; callers reserve
    /// the layout slot but render no visible breadcrumb.
    #[must_use]
    pub fn is_home_only(&self) -> bool {
        self.entries.len() == 1
    }
}

/// Derive the trail for `current_path` from `tree`.
///
/// Scans items in declared order. An item with sub-items matches through its
/// first active sub-item, yielding `[Home, item, sub-item]`; a leaf item
/// matches on its own path, yielding `[Home, item]`. The scan stops at the
/// first match; with no match the trail is Home alone.
#[must_use]
pub fn derive_trail(tree: &MenuTree, current_path: &str) -> Trail {
    let mut trail = Trail::home_only();
    for item in tree.items() {
        if item.sub_items().is_empty() {
            if is_active(current_path, item.path()) {
                trail
                    .entries
                    .push(TrailEntry::new(item.label(), item.path()));
                return trail;
            }
            continue;
        }
        if let Some(sub) = item
            .sub_items()
            .iter()
            .find(|sub| is_active(current_path, sub.path()))
        {
            trail
                .entries
                .push(TrailEntry::new(item.label(), item.path()));
            trail.entries.push(TrailEntry::new(sub.label(), sub.path()));
            return trail;
        }
    }
    trail
}
