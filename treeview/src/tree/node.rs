//! Arena storage for tree nodes.

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Key identifying a node within its owning [`Treeview`](super::Treeview)
    /// arena. Keys are stable for the lifetime of the tree; the default
    /// (null) key is never present.
    pub struct NodeId;
}

pub(crate) type Arena<T> = SlotMap<NodeId, TreeNode<T>>;

/// A single node slot.
///
/// Children are owned top-down via keys; `parent` is a traversal-only
/// back-reference used for upward propagation and never carries ownership.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<T> {
    /// Display text, also the default filter-match field.
    pub label: String,
    /// Opaque payload identifying the node to the host application.
    pub value: T,
    /// Own checked flag. Source of truth at leaves; at internal nodes a
    /// stored approximation of the derived state (indeterminate is stored
    /// as `false`).
    pub checked: bool,
    /// Whether children are hidden from the flattened view. Does not
    /// affect checked-state computation.
    pub collapsed: bool,
    /// Excludes the node from user-triggered checked mutations. State
    /// reporting is unaffected.
    pub disabled: bool,
    /// Non-owning back-reference; `None` for roots.
    pub parent: Option<NodeId>,
    /// Insertion order is rendering order. Empty denotes a leaf.
    pub children: Vec<NodeId>,
}

impl<T> TreeNode<T> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
