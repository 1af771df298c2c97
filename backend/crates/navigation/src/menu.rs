//! Validated two-level menu trees.
//!
//! A tree is an ordered list of [`MenuItem`] values; each item may carry
//! ordered [`SubItem`] children. Sub-items are a distinct type without a
//! children field, so the two-level bound is structural rather than a
//! convention that validation has to chase.

use serde::Serialize;
use thiserror::Error;

/// Failures raised while building a [`MenuTree`] or its entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuValidationError {
    /// A label was empty once trimmed.
    #[error("menu label must not be empty")]
    EmptyLabel,
    /// A path did not begin with `/`.
    #[error("menu path must be absolute: {path:?}")]
    RelativePath {
        /// The offending path value.
        path: String,
    },
    /// The same path appeared twice within one tree.
    #[error("duplicate path in menu tree: {path:?}")]
    DuplicatePath {
        /// The path that occurred more than once.
        path: String,
    },
}

fn validate_entry(label: &str, path: &str) -> Result<(), MenuValidationError> {
    if label.trim().is_empty() {
        return Err(MenuValidationError::EmptyLabel);
    }
    if !path.starts_with('/') {
        return Err(MenuValidationError::RelativePath {
            path: path.to_owned(),
        });
    }
    Ok(())
}

/// Second-level navigation entry. Sub-items never have children of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItem {
    label: String,
    path: String,
}

impl SubItem {
    /// Build a sub-item from a label and an absolute path.
    ///
    /// # Errors
    /// Returns [`MenuValidationError`] when the label is blank or the path is
    /// not absolute.
    pub fn new(
        label: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, MenuValidationError> {
        let item = Self {
            label: label.into(),
            path: path.into(),
        };
        validate_entry(&item.label, &item.path)?;
        Ok(item)
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

/// Top-level navigation entry, optionally carrying sub-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    label: String,
    path: String,
    sub_items: Vec<SubItem>,
}

impl MenuItem {
    /// Build a leaf item with no children.
    ///
    /// # Errors
    /// Returns [`MenuValidationError`] when the label is blank or the path is
    /// not absolute.
    pub fn leaf(
        label: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, MenuValidationError> {
        Self::with_sub_items(label, path, Vec::new())
    }

    /// Build an item with ordered sub-items.
    ///
    /// # Errors
    /// Returns [`MenuValidationError`] when the label is blank or the path is
    /// not absolute. Sub-items validate themselves in [`SubItem::new`];
    /// cross-entry duplicate detection happens in [`MenuTree::try_new`].
    pub fn with_sub_items(
        label: impl Into<String>,
        path: impl Into<String>,
        sub_items: Vec<SubItem>,
    ) -> Result<Self, MenuValidationError> {
        let item = Self {
            label: label.into(),
            path: path.into(),
            sub_items,
        };
        validate_entry(&item.label, &item.path)?;
        Ok(item)
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

    /// Ordered children; empty for leaf items.
    #[must_use]
    pub fn sub_items(&self) -> &[SubItem] {
        self.sub_items.as_slice()
    }
}

/// Ordered menu tree for one audience (one role, or the public visitor).
///
/// ## Invariants
/// - Declaration order is preserved; consumers rely on it for first-match
///   semantics.
/// - Every path in the tree, counting both items and sub-items, is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuTree {
    items: Vec<MenuItem>,
}

impl MenuTree {
    /// Validate and wrap an ordered list of items.
    ///
    /// # Errors
    /// Returns [`MenuValidationError::DuplicatePath`] when two entries in the
    /// tree share a destination.
    pub fn try_new(items: Vec<MenuItem>) -> Result<Self, MenuValidationError> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &items {
            for path in std::iter::once(item.path()).chain(item.sub_items.iter().map(SubItem::path))
            {
                if seen.contains(&path) {
                    return Err(MenuValidationError::DuplicatePath {
                        path: path.to_owned(),
                    });
                }
                seen.push(path);
            }
        }
        Ok(Self { items })
    }

    /// Tree with no entries; renders as nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Ordered items.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        self.items.as_slice()
    }

    /// Whether the tree has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
