//! Error types for tree operations.

use crate::tree::NodeId;

/// Errors surfaced by [`Treeview`](crate::Treeview) operations.
///
/// Expected UI conditions (toggling a disabled node, collapsing a leaf,
/// re-applying the current filter text) are not errors; they complete
/// successfully without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeviewError {
    /// The referenced node is not part of this tree. Existing state is
    /// untouched by the failed lookup.
    #[error("node {0:?} not found in tree")]
    NotFound(NodeId),
}
