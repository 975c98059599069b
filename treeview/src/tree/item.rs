//! Construction records and the derived tri-state.

use serde::{Deserialize, Serialize};

/// Derived check state of a node.
///
/// A leaf maps its own checked flag; an internal node folds its children:
/// all checked, none checked, or a mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    /// Every child (recursively, down to leaves) reports checked.
    Checked,
    /// No child reports checked.
    Unchecked,
    /// Some, but not all, of the subtree is checked.
    Indeterminate,
}

impl TriState {
    pub(crate) fn from_flag(checked: bool) -> Self {
        if checked { Self::Checked } else { Self::Unchecked }
    }

    /// True only for the fully-checked state.
    pub fn is_checked(self) -> bool {
        self == Self::Checked
    }

    pub fn is_indeterminate(self) -> bool {
        self == Self::Indeterminate
    }
}

/// Plain input record a forest is built from.
///
/// Mirrors the host-facing construction shape
/// `{label, value, checked?, collapsed?, disabled?, children?}`; omitted
/// boolean fields default to `false`, so a forest deserializes directly
/// from partial JSON records.
///
/// # Example
///
/// ```ignore
/// let spec = ItemSpec::new("Documents", 1)
///     .collapsed(true)
///     .child(ItemSpec::new("Report.pdf", 2).checked(true))
///     .child(ItemSpec::new("Archive", 3).disabled(true));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec<T> {
    /// Display text.
    pub label: String,
    /// Opaque payload.
    pub value: T,
    /// Initial checked flag. `Some(true)` on a branch seeds every
    /// descendant that does not state its own flag; `None` means
    /// unchecked unless an ancestor seeds it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub children: Vec<ItemSpec<T>>,
}

impl<T> ItemSpec<T> {
    /// Create a leaf spec with all flags unset.
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
            checked: None,
            collapsed: false,
            disabled: false,
            children: Vec::new(),
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn child(mut self, child: ItemSpec<T>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ItemSpec<T>>) -> Self {
        self.children.extend(children);
        self
    }
}
