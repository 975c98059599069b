//! Treeview behaviour configuration.

use serde::{Deserialize, Serialize};

/// Which nodes contribute to the checked-values query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckedScope {
    /// Only leaf nodes report into the selection (default).
    #[default]
    Leaves,
    /// Leaves plus internal nodes whose derived state is fully checked.
    All,
}

/// Label matching strategy for the text filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Trimmed, case-insensitive substring containment (default).
    #[default]
    Substring,
    /// Fuzzy subsequence scoring.
    Fuzzy,
}

/// Configuration for a [`Treeview`](crate::Treeview) instance.
///
/// All fields have serde defaults, so a host application can construct the
/// config from a partial JSON/TOML record the same way item specs are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeviewConfig {
    /// Which nodes report into [`checked_values`](crate::Treeview::checked_values).
    pub checked_scope: CheckedScope,
    /// Label matching strategy used by [`set_filter`](crate::Treeview::set_filter).
    pub filter_mode: FilterMode,
    /// When true, a node's checked flag is fully independent of its
    /// children: checking a node neither cascades downward nor recomputes
    /// ancestors, and every node's state is exactly its own flag.
    pub decouple_child_from_parent: bool,
}
